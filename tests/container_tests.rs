mod common;

use common::{case_log, names, table, CaseRow};
use rstest::rstest;
use runlog::error::LogError;
use runlog::model::{CaseContainer, InclusionPolicy, NameMap};
use std::str::FromStr;

fn name_map() -> NameMap {
    names(&[("{v}", "x#W#heel#x")])
}

fn rows_with_trailing_unevaluated() -> Vec<CaseRow> {
    vec![
        CaseRow::new("{c1}").objective(1.0).var("{v}", "1"),
        CaseRow::new("{c2}").objective(2.0).var("{v}", "2").unevaluated(),
        CaseRow::new("{c3}").objective(3.0).var("{v}", "3"),
        CaseRow::new("{c4}").objective(4.0).var("{v}", "4"),
        CaseRow::new("{c5}").objective(0.0).var("{v}", "5").unevaluated(),
    ]
}

#[test]
fn test_strict_keeps_only_evaluated_rows() {
    let t = table(&case_log(1, &rows_with_trailing_unevaluated()));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap();

    assert_eq!(c.len(), 3);
    assert!(c.warnings().is_empty());
    assert!(c.get("{c2}").is_none());
    assert!(c.get("{c5}").is_none());
}

#[test]
fn test_lenient_appends_trailing_unevaluated_case_with_warning() {
    let t = table(&case_log(1, &rows_with_trailing_unevaluated()));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Lenient).unwrap();

    assert_eq!(c.len(), 4);
    assert_eq!(c.warnings().len(), 1);
    assert!(c.warnings()[0].contains("{c5}"));
    let last = c.get("{c5}").unwrap();
    assert!(!last.evaluated);
    // Unevaluated rows in the middle stay out
    assert!(c.get("{c2}").is_none());
}

#[test]
fn test_lenient_without_trailing_unevaluated_matches_strict() {
    let rows = vec![
        CaseRow::new("{c1}").var("{v}", "1").unevaluated(),
        CaseRow::new("{c2}").var("{v}", "2"),
    ];
    let t = table(&case_log(1, &rows));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Lenient).unwrap();
    assert_eq!(c.len(), 1);
    assert!(c.warnings().is_empty());
}

#[test]
fn test_cases_keep_table_order_and_lookup_by_id() {
    let t = table(&case_log(1, &rows_with_trailing_unevaluated()));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap();

    let ids: Vec<&str> = c.cases().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["{c1}", "{c3}", "{c4}"]);
    assert_eq!(c.get("{c3}").unwrap().objective_function_value, 3.0);
    assert!(c.get("{nope}").is_none());
}

#[test]
fn test_best_case_is_highest_objective() {
    let t = table(&case_log(1, &rows_with_trailing_unevaluated()));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap();
    assert_eq!(c.best().unwrap().id, "{c4}");
}

#[test]
fn test_duplicate_case_ids_are_rejected() {
    let rows = vec![
        CaseRow::new("{c1}").var("{v}", "1"),
        CaseRow::new("{c1}").var("{v}", "2"),
    ];
    let t = table(&case_log(1, &rows));
    let err = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap_err();
    assert!(matches!(err, LogError::DuplicateCase(id) if id == "{c1}"));
}

#[test]
fn test_unresolved_identifier_rejects_only_its_row() {
    let rows = vec![
        CaseRow::new("{c1}").var("{v}", "1"),
        CaseRow::new("{c2}").var("{ghost}", "2"),
    ];
    let t = table(&case_log(1, &rows));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap();

    assert_eq!(c.len(), 1);
    assert_eq!(c.rejected().len(), 1);
    assert_eq!(c.rejected()[0].row, 2);
    assert!(c.rejected()[0].reason.contains("{ghost}"));
}

#[test]
fn test_bad_timestamp_keeps_neighbouring_cases() {
    let rows = vec![
        CaseRow::new("{c1}").objective(1.0).var("{v}", "1"),
        CaseRow::new("{c2}").objective(2.0).var("{v}", "2"),
        CaseRow::new("{c3}").objective(3.0).var("{v}", "3"),
    ];
    let text = case_log(1, &rows).replacen(
        "2017-04-03T12:00:00Z,{c2}",
        "garbage,{c2}",
        1,
    );
    let t = table(&text);
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap();

    let ids: Vec<&str> = c.cases().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["{c1}", "{c3}"]);
    assert_eq!(c.rejected().len(), 1);
    assert_eq!(c.rejected()[0].row, 2);
    assert!(c.rejected()[0].reason.contains("garbage"));
}

#[test]
fn test_short_rows_are_rejected_with_their_row_number() {
    let mut text = case_log(
        1,
        &[
            CaseRow::new("{c1}").var("{v}", "1"),
            CaseRow::new("{c2}").var("{v}", "2"),
        ],
    );
    text.push_str("2017-04-03T12:00:00Z,{c3},true\n");
    text.push_str(&CaseRow::new("{c4}").var("{v}", "4").line());
    text.push('\n');
    let c = CaseContainer::from_table(&table(&text), &name_map(), InclusionPolicy::Strict).unwrap();

    assert_eq!(c.len(), 3);
    assert!(c.get("{c4}").is_some());
    assert_eq!(c.rejected()[0].row, 3);
}

#[test]
fn test_unevaluated_rows_are_not_decoded_under_strict() {
    // The skipped row references an unknown id; strict mode never decodes it.
    let rows = vec![
        CaseRow::new("{c1}").var("{ghost}", "1").unevaluated(),
        CaseRow::new("{c2}").var("{v}", "2"),
    ];
    let t = table(&case_log(1, &rows));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Strict).unwrap();
    assert_eq!(c.len(), 1);
}

#[test]
fn test_empty_case_log() {
    let t = table(&case_log(1, &[]));
    let c = CaseContainer::from_table(&t, &name_map(), InclusionPolicy::Lenient).unwrap();
    assert!(c.is_empty());
    assert!(c.best().is_none());
}

#[rstest]
#[case("strict", InclusionPolicy::Strict)]
#[case("lenient", InclusionPolicy::Lenient)]
#[case("Lenient", InclusionPolicy::Lenient)]
fn test_policy_parses_from_text(#[case] text: &str, #[case] expected: InclusionPolicy) {
    assert_eq!(InclusionPolicy::from_str(text).unwrap(), expected);
}

#[test]
fn test_policy_display_round_trips() {
    assert_eq!(InclusionPolicy::Lenient.to_string(), "lenient");
    assert_eq!(InclusionPolicy::default(), InclusionPolicy::Strict);
    assert!(InclusionPolicy::from_str("loose").is_err());
}
