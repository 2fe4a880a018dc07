use super::common::*;
use crate::workflows::priorities::domain::{DocsStatus, Gender};
use crate::workflows::priorities::{GatedCategory, PriorityClassifier, PriorityThresholds, ReportKind};

fn batch() -> Vec<crate::workflows::priorities::WorkerRecord> {
    let mut paid = with_docs(mv_with_note("paid", "SUPER_ANGRY_CLIENT"), DocsStatus::Approved);
    paid.payment_added = Some(true);

    let mut old = with_docs(worker("old"), DocsStatus::Approved);
    old.days_in_table = Some(30.0);
    let mut fresh = with_docs(worker("fresh"), DocsStatus::Approved);
    fresh.days_in_table = Some(2.0);

    vec![
        paid,
        fresh,
        with_docs(worker("blank-days"), DocsStatus::Approved),
        old,
        with_gender(
            with_docs(mv_with_note("angry", "SUPER_ANGRY_CLIENT"), DocsStatus::Rejected),
            Gender::Female,
        ),
        with_docs(lawp(worker("lawp-eth")), DocsStatus::Rejected),
        with_docs(landed("kenyan", "Kenyan", false), DocsStatus::Approved),
        with_docs(landed("ethiopian", "Ethiopian", false), DocsStatus::Approved),
        with_docs(worker("unknown"), DocsStatus::Unknown),
    ]
}

fn ids(records: &[crate::workflows::priorities::WorkerRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.request_id.as_str())
        .collect()
}

#[test]
fn combined_report_emits_six_named_sheets() {
    let report = classifier().report(&batch(), ReportKind::Combined);

    let names: Vec<&str> = report.sheets.iter().map(|sheet| sheet.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Accepted",
            "Rejected",
            "Combined",
            "Accepted No-Africans",
            "Rejected No-Africans",
            "Combined No-Africans",
        ]
    );
}

#[test]
fn paid_and_unknown_rows_are_left_out() {
    let report = classifier().report(&batch(), ReportKind::Combined);
    let combined = report.sheet("Combined").expect("combined sheet");

    assert!(!ids(&combined.records).contains(&"paid"));
    assert!(!ids(&combined.records).contains(&"unknown"));
    assert_eq!(combined.records.len(), 7);
}

#[test]
fn blank_payment_cells_are_left_out() {
    let mut blank = with_docs(worker("blank-payment"), DocsStatus::Approved);
    blank.payment_added = None;
    let kept = with_docs(worker("unpaid"), DocsStatus::Approved);

    let report = classifier().report(&[blank, kept], ReportKind::Combined);

    assert_eq!(
        ids(&report.sheet("Combined").expect("combined sheet").records),
        vec!["unpaid"]
    );
}

#[test]
fn sheets_sort_by_priority_then_days_descending() {
    let report = classifier().report(&batch(), ReportKind::Combined);
    let accepted = report.sheet("Accepted").expect("accepted sheet");

    assert_eq!(
        ids(&accepted.records),
        vec!["kenyan", "ethiopian", "old", "fresh", "blank-days"]
    );
}

#[test]
fn non_african_views_keep_ethiopians() {
    let report = classifier().report(&batch(), ReportKind::Combined);
    let accepted = report
        .sheet("Accepted No-Africans")
        .expect("non african sheet");

    assert!(!ids(&accepted.records).contains(&"kenyan"));
    assert!(ids(&accepted.records).contains(&"ethiopian"));
}

#[test]
fn populations_use_independent_counter_passes() {
    let thresholds = PriorityThresholds::default().with_limit(GatedCategory::AfricanLiveIn, 1);
    let classifier = PriorityClassifier::new(thresholds, 5);
    let records = vec![
        with_docs(landed("a1", "Kenyan", false), DocsStatus::Approved),
        with_docs(landed("r1", "Kenyan", false), DocsStatus::Rejected),
    ];

    let report = classifier.report(&records, ReportKind::Combined);

    let accepted = report.sheet("Accepted").expect("accepted");
    let rejected = report.sheet("Rejected").expect("rejected");
    let combined = report.sheet("Combined").expect("combined");
    assert_eq!(accepted.records[0].priority_number, Some(7));
    assert_eq!(rejected.records[0].priority_number, Some(7));
    let combined_priorities: Vec<Option<u32>> = combined
        .records
        .iter()
        .map(|record| record.priority_number)
        .collect();
    assert_eq!(combined_priorities, vec![Some(7), Some(14)]);
}

#[test]
fn lawp_report_limits_accepted_and_rejected_but_not_combined() {
    let report = classifier().report(&batch(), ReportKind::Lawp);

    let rejected = report.sheet("Rejected LAWP").expect("rejected lawp");
    assert_eq!(ids(&rejected.records), vec!["lawp-eth"]);
    assert!(report
        .sheet("Accepted LAWP")
        .expect("accepted lawp")
        .records
        .is_empty());
    assert_eq!(
        report.sheet("Combined LAWP").expect("combined").records.len(),
        7
    );
    assert!(report.sheet("Combined No-Africans LAWP").is_some());
}

#[test]
fn top_priorities_keep_only_priorities_one_to_five() {
    let report = classifier().report(&batch(), ReportKind::TopPriorities);

    let rejected = report
        .sheet("Rejected Non-LAWP-Top")
        .expect("rejected top");
    assert_eq!(ids(&rejected.records), vec!["angry"]);
    assert!(report
        .sheet("Accepted Non-LAWP-Top")
        .expect("accepted top")
        .records
        .is_empty());
    assert!(report.sheet("Combined No-Afr Non-LAWP-Top").is_some());
}

#[test]
fn statistics_include_zero_rows_and_totals() {
    let report = classifier().report(&batch(), ReportKind::Combined);
    let stats = &report.statistics;

    assert_eq!(stats.accepted.rows.len(), 23);
    let angry = stats
        .rejected
        .get("MV with Super Angry Client")
        .expect("row present");
    assert_eq!((angry.males, angry.females, angry.total), (0, 1, 1));
    let other = stats.total.get("Other").expect("other row");
    assert_eq!(other.total, 3);
    assert_eq!(stats.total.total().total, 7);
}

#[test]
fn report_kind_parses_cli_spellings() {
    assert_eq!(ReportKind::parse("non-lawp"), Some(ReportKind::NonLawp));
    assert_eq!(ReportKind::parse("TOP_PRIORITIES"), Some(ReportKind::TopPriorities));
    assert_eq!(ReportKind::parse("weekly"), None);
}
