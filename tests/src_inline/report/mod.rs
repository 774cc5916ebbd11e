use super::{FileStatus, FileSummary, OmittedCounts, PointCounts, RunSummary};
use crate::model::bands::BandStats;
use crate::model::percentiles::Percentile;

fn stats() -> BandStats {
    BandStats {
        days: 4,
        points: [3, 4, 4, 4, 4],
        omitted: [0, 1, 0],
    }
}

#[test]
fn test_counts_from_stats() {
    let s = stats();
    let points = PointCounts::from(&s);
    assert_eq!(points.get(Percentile::P3), 3);
    assert_eq!(points.get(Percentile::P97), 4);
    let omitted = OmittedCounts::from(&s);
    assert_eq!(omitted.undefined_transform, 1);
    assert_eq!(omitted.total(), 1);
}

#[test]
fn test_run_summary_tallies() {
    let files = vec![
        FileSummary::ok("a.lms.json".into(), "a.bands.json".into(), &stats()),
        FileSummary::failed("b.lms.json".into(), "bad".into()),
        FileSummary::ok("c.lms.json".into(), "c.bands.json".into(), &stats()),
    ];
    let summary = RunSummary::new("in".into(), "out".into(), files);
    assert_eq!(summary.files_total, 3);
    assert_eq!(summary.files_ok, 2);
    assert_eq!(summary.files_failed, 1);
    assert!(summary.has_failures());
    assert_eq!(summary.files[1].status, FileStatus::Failed);
    assert_eq!(summary.tool.name, "growth-bands");
}

#[test]
fn test_file_summary_json_shape() {
    let ok = serde_json::to_value(FileSummary::ok(
        "a.lms.json".into(),
        "a.bands.json".into(),
        &stats(),
    ))
    .unwrap();
    assert_eq!(ok["status"], "ok");
    assert_eq!(ok["points"]["p3"], 3);
    assert_eq!(ok["omitted"]["undefined_transform"], 1);
    assert!(ok.get("error").is_none());

    let failed = serde_json::to_value(FileSummary::failed("b".into(), "boom".into())).unwrap();
    assert_eq!(failed["status"], "failed");
    assert_eq!(failed["error"], "boom");
    assert!(failed.get("points").is_none());
}
