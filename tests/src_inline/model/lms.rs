use super::{LmsEntry, LmsOutcome, LmsTable, NotComputable, evaluate, z_score};
use crate::model::percentiles::ZScoreSet;

fn value_of(outcome: LmsOutcome) -> f64 {
    match outcome {
        LmsOutcome::Value(v) => v,
        other => panic!("expected value, got {other:?}"),
    }
}

#[test]
fn test_p50_returns_median_exactly() {
    for l in [-1.7, -0.0005, 0.0, 0.0004, 0.3487, 1.0, 2.5] {
        let entry = LmsEntry::new(l, 3.3464, 0.14602);
        assert_eq!(evaluate(0.0, &entry), LmsOutcome::Value(3.3464));
    }
}

#[test]
fn test_general_branch_scenario() {
    let entry = LmsEntry::new(1.0, 4.0, 0.1);
    let v = value_of(evaluate(1.0364, &entry));
    assert!((v - 4.41456).abs() < 1e-12);
}

#[test]
fn test_log_normal_branch_scenario() {
    let entry = LmsEntry::new(0.0001, 10.0, 0.2);
    let v = value_of(evaluate(1.8808, &entry));
    let expected = 10.0 * (0.2f64 * 1.8808).exp();
    assert_eq!(v, expected);
    assert!((v - 14.5668).abs() < 1e-4);
}

#[test]
fn test_continuity_across_log_normal_boundary() {
    let z = 1.8808;
    let near = value_of(evaluate(z, &LmsEntry::new(0.0009, 10.0, 0.2)));
    let zero = value_of(evaluate(z, &LmsEntry::new(0.0, 10.0, 0.2)));
    assert!((near - zero).abs() < 5e-3, "near={near} zero={zero}");

    let just_above = value_of(evaluate(z, &LmsEntry::new(0.001, 10.0, 0.2)));
    assert!((just_above - zero).abs() < 5e-3);
}

#[test]
fn test_monotonic_in_canonical_z_scores() {
    let entries = [
        LmsEntry::new(0.3487, 3.3464, 0.14602),
        LmsEntry::new(-0.3521, 49.8842, 0.03795),
        LmsEntry::new(-1.6, 15.2, 0.08),
        LmsEntry::new(0.0, 10.0, 0.2),
        LmsEntry::new(1.0, 4.0, 0.1),
    ];
    for entry in &entries {
        let values: Vec<f64> = ZScoreSet::CANONICAL
            .iter()
            .map(|(_, z)| value_of(evaluate(z, entry)))
            .collect();
        assert!(
            values.windows(2).all(|w| w[0] < w[1]),
            "not increasing for {entry:?}: {values:?}"
        );
    }
}

#[test]
fn test_degenerate_parameters_rejected_for_every_z() {
    let bad = [
        LmsEntry::new(0.5, 0.0, 0.1),
        LmsEntry::new(0.5, -5.0, 0.1),
        LmsEntry::new(0.5, 4.0, 0.0),
        LmsEntry::new(0.5, 4.0, -0.1),
        LmsEntry::new(f64::NAN, 4.0, 0.1),
        LmsEntry::new(0.5, f64::INFINITY, 0.1),
    ];
    for entry in &bad {
        for (_, z) in ZScoreSet::CANONICAL.iter() {
            assert_eq!(
                evaluate(z, entry),
                LmsOutcome::NotComputable(NotComputable::DegenerateParameters)
            );
        }
    }
}

#[test]
fn test_undefined_transform_when_inside_not_positive() {
    // 1 + 2.0 * 0.5 * -1.0 == 0
    let entry = LmsEntry::new(2.0, 4.0, 0.5);
    assert_eq!(
        evaluate(-1.0, &entry),
        LmsOutcome::NotComputable(NotComputable::UndefinedTransform)
    );
    assert_eq!(
        evaluate(-1.8808, &entry),
        LmsOutcome::NotComputable(NotComputable::UndefinedTransform)
    );
    assert!(evaluate(1.8808, &entry).value().is_some());
}

#[test]
fn test_overflow_is_not_computable() {
    let entry = LmsEntry::new(0.002, 1.0e308, 0.9);
    assert_eq!(
        evaluate(1.8808, &entry),
        LmsOutcome::NotComputable(NotComputable::NonFinite)
    );
    assert_eq!(
        evaluate(f64::NAN, &LmsEntry::new(1.0, 4.0, 0.1)),
        LmsOutcome::NotComputable(NotComputable::NonFinite)
    );
}

#[test]
fn test_z_score_inverts_evaluate() {
    let entries = [
        LmsEntry::new(-0.3, 5.0, 0.12),
        LmsEntry::new(0.0002, 10.0, 0.2),
        LmsEntry::new(1.0, 4.0, 0.1),
    ];
    for entry in &entries {
        for z in [-1.8808, -0.5, 0.0, 1.2, 1.8808] {
            let v = value_of(evaluate(z, entry));
            let back = value_of(z_score(v, entry));
            assert!((back - z).abs() < 1e-9, "{entry:?} z={z} back={back}");
        }
    }
}

#[test]
fn test_z_score_rejects_non_positive_value() {
    let entry = LmsEntry::new(1.0, 4.0, 0.1);
    assert_eq!(
        z_score(0.0, &entry),
        LmsOutcome::NotComputable(NotComputable::UndefinedTransform)
    );
    assert_eq!(
        z_score(3.0, &LmsEntry::new(1.0, 0.0, 0.1)),
        LmsOutcome::NotComputable(NotComputable::DegenerateParameters)
    );
}

#[test]
fn test_table_sorted_days_ignores_insertion_order() {
    let mut table = LmsTable::new();
    for day in [90u32, 0, 30, 7, 1856] {
        assert!(table.insert(day, LmsEntry::new(1.0, 4.0, 0.1)).is_none());
    }
    assert!(table.insert(30, LmsEntry::new(1.0, 5.0, 0.1)).is_some());
    assert_eq!(table.len(), 5);
    assert_eq!(table.sorted_days(), vec![0, 7, 30, 90, 1856]);
    assert_eq!(table.get(30).map(|e| e.m), Some(5.0));
}
