use crate::workflows::priorities::domain::{DocsStatus, Gender, WorkerRecord, WorkerType};
use crate::workflows::priorities::{PriorityClassifier, PriorityThresholds};

pub(super) fn worker(id: &str) -> WorkerRecord {
    WorkerRecord::new(id, format!("Maid {id}"))
}

pub(super) fn mv_with_note(id: &str, note: &str) -> WorkerRecord {
    let mut record = worker(id);
    record.worker_type = Some(WorkerType::Mv);
    record.client_note = Some(note.to_string());
    record
}

pub(super) fn filipina_in_flight(id: &str, days: f64) -> WorkerRecord {
    let mut record = worker(id);
    record.nationality = "Filipina".to_string();
    record.flight_in_days = Some(days);
    record
}

/// Landed in Dubai with the live-out flag set as given.
pub(super) fn landed(id: &str, nationality: &str, live_out: bool) -> WorkerRecord {
    let mut record = worker(id);
    record.nationality = nationality.to_string();
    record.housemaid_status = Some("LANDED_IN_DUBAI".to_string());
    record.live_out = Some(live_out);
    record
}

pub(super) fn with_docs(mut record: WorkerRecord, status: DocsStatus) -> WorkerRecord {
    record.docs_status = status;
    record
}

pub(super) fn with_gender(mut record: WorkerRecord, gender: Gender) -> WorkerRecord {
    record.gender = Some(gender);
    record
}

pub(super) fn cc(mut record: WorkerRecord) -> WorkerRecord {
    record.worker_type = Some(WorkerType::Cc);
    record
}

pub(super) fn lawp(mut record: WorkerRecord) -> WorkerRecord {
    record.outcome = Some("LAWP".to_string());
    record
}

pub(super) fn classifier() -> PriorityClassifier {
    PriorityClassifier::new(PriorityThresholds::default(), 5)
}

pub(super) fn priorities(records: &[WorkerRecord]) -> Vec<(String, u32)> {
    records
        .iter()
        .map(|record| {
            (
                record.request_id.to_string(),
                record.priority_number.expect("classified"),
            )
        })
        .collect()
}
