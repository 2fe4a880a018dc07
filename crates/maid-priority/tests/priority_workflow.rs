use maid_priority::workflows::intake::{read_workers, to_csv_string};
use maid_priority::workflows::priorities::{
    GatedCategory, PriorityClassifier, PriorityReport, PriorityThresholds, ReportKind,
    WorkerRecord, CATCH_ALL_PRIORITY,
};

const UPLOAD: &str = "\
Request ID,Housemaid Name,Housemaid Nationality,Housemaid Type,Gender,Docs status,Outcome,Live out,Housemaid Status,Been in the table for (in days),Flight in (days),Client Note,Payment added?
A,Amal,Kenyan,MV,Female,Approved,,,,,,SUPER_ANGRY_CLIENT,No
B,Bituin,Filipina,CC,Female,Approved,,,,,3,,No
C,Chandra,Nepali,CC,Female,Rejected,,,,,,,No
K-1,Kendi,Kenyan,CC,Female,Approved,,No,LANDED_IN_DUBAI,2,,,No
K-2,Kerubo,Kenyan,CC,Female,Approved,,No,LANDED_IN_DUBAI,9,,,No
L,Lemlem,Ethiopian,CC,Male,Rejected,LAWP,,,4,,,No
";

fn priorities(report: &PriorityReport, sheet: &str) -> Vec<(String, u32)> {
    report
        .sheet(sheet)
        .expect("sheet present")
        .records
        .iter()
        .map(|record| {
            (
                record.request_id.to_string(),
                record.priority_number.expect("classified"),
            )
        })
        .collect()
}

#[test]
fn uploaded_batch_is_classified_end_to_end() {
    let records = read_workers(UPLOAD.as_bytes()).expect("upload parses");
    let thresholds = PriorityThresholds::default().with_limit(GatedCategory::AfricanLiveIn, 1);
    let classifier = PriorityClassifier::new(thresholds, 5);

    let report = classifier.report(&records, ReportKind::Combined);

    let combined = priorities(&report, "Combined");
    assert_eq!(
        combined,
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 3),
            ("K-1".to_string(), 7),
            ("K-2".to_string(), 14),
            ("L".to_string(), 16),
            ("C".to_string(), u32::from(CATCH_ALL_PRIORITY)),
        ]
    );
    assert!(combined
        .iter()
        .all(|(_, priority)| (1..=u32::from(CATCH_ALL_PRIORITY)).contains(priority)));
}

#[test]
fn lawp_report_keeps_only_lawp_in_split_sheets() {
    let records = read_workers(UPLOAD.as_bytes()).expect("upload parses");
    let report = PriorityClassifier::default().report(&records, ReportKind::Lawp);

    assert_eq!(priorities(&report, "Rejected LAWP"), vec![("L".to_string(), 16)]);
    assert!(priorities(&report, "Accepted LAWP").is_empty());
    assert_eq!(priorities(&report, "Combined LAWP").len(), 6);
    assert!(priorities(&report, "Combined No-Africans LAWP")
        .iter()
        .all(|(id, _)| !id.starts_with('K') && id != "A"));
}

#[test]
fn classification_does_not_depend_on_input_order() {
    let forward = read_workers(UPLOAD.as_bytes()).expect("upload parses");
    let mut reversed = forward.clone();
    reversed.reverse();
    let classifier = PriorityClassifier::default();

    let mut left = forward.clone();
    classifier.classify_batch(&mut left);
    let mut right = reversed;
    classifier.classify_batch(&mut right);
    right.reverse();

    let numbers = |records: &[WorkerRecord]| {
        records
            .iter()
            .map(|record| record.priority_number)
            .collect::<Vec<_>>()
    };
    assert_eq!(numbers(&left), numbers(&right));
}

#[test]
fn report_sheets_render_as_csv() {
    let records = read_workers(UPLOAD.as_bytes()).expect("upload parses");
    let report = PriorityClassifier::default().report(&records, ReportKind::Combined);
    let accepted = report.sheet("Accepted").expect("accepted sheet");

    let csv = to_csv_string(&accepted.records).expect("csv renders");
    let header = csv.lines().next().expect("header row");

    assert!(header.starts_with("Priority number,Request ID,Housemaid Name"));
    assert_eq!(csv.lines().count(), accepted.records.len() + 1);
}
