use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("growth_bands_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("growth-bands").chain(args.iter().copied()))
}

#[test]
fn test_parse_run_command() {
    let cli = parse(&["run", "--input", "refs", "--out", "bands"]).unwrap();
    assert_eq!(cli.verbose, 0);
    match cli.command {
        Command::Run { input, out } => {
            assert_eq!(input, PathBuf::from("refs"));
            assert_eq!(out, PathBuf::from("bands"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_verbose_after_subcommand() {
    let cli = parse(&["band", "--input", "a.lms.json", "--out", "a.bands.json", "-vv"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_parse_requires_out() {
    assert!(parse(&["run", "--input", "refs"]).is_err());
    assert!(parse(&[]).is_err());
}

#[test]
fn test_parse_zscore_day_must_be_unsigned() {
    assert!(parse(&["zscore", "--table", "t", "--day", "-3", "--value", "4.0"]).is_err());
    let cli = parse(&["zscore", "--table", "t", "--day", "3", "--value", "4.5"]).unwrap();
    assert!(matches!(cli.command, Command::Zscore { day: 3, .. }));
}

#[test]
fn test_parse_check_command() {
    let cli = parse(&["check", "--bands", "w.bands.json"]).unwrap();
    assert!(matches!(cli.command, Command::Check { .. }));
}

#[test]
fn test_zscore_for_table_entry() {
    let dir = make_temp_dir();
    let table = dir.join("weight.lms.json");
    fs::write(&table, r#"{"30": {"L": 1.0, "M": 4.0, "S": 0.1}}"#).unwrap();

    let (z, entry) = zscore_for(&table, 30, 4.41456).unwrap();
    assert!((z - 1.0364).abs() < 1e-9);
    assert_eq!(entry.m, 4.0);
    assert_eq!(zscore_for(&table, 30, 4.0).unwrap().0, 0.0);
    assert!(zscore_for(&table, 31, 4.0).unwrap_err().contains("no entry for day 31"));
    assert!(zscore_for(&table, 30, -1.0).unwrap_err().contains("undefined_transform"));
}
