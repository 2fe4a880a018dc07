use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::distribution::{SheetWriteError, SheetWriter};
use crate::workflows::operations::PriorityOperationsService;
use crate::workflows::priorities::PriorityClassifier;

pub(super) const WORKERS_CSV: &str = "\
Request ID,Housemaid Name,Housemaid Nationality,Housemaid Type,Gender,Docs status,Client Note,Flight in (days),Payment added?
R-1,Ana,Filipina,MV,Female,Approved,SUPER_ANGRY_CLIENT,,No
R-2,Bea,Filipina,CC,Female,Rejected,,3,No
R-3,Cai,Nepali,CC,Female,Approved,,,No
R-4,Dee,Filipina,CC,Female,Approved,,,Yes
R-5,Eve,Filipina,CC,Female,Approved,,,
";

pub(super) const PRIORITIZED_CSV: &str = "\
Priority number,Request ID,Housemaid Name,Housemaid Nationality,Gender,Docs status
3,W-3,Cai,Indian,Female,Approved
1,W-1,Ana,Filipina,Female,Approved
2,W-2,Bea,Kenyan,Female,Rejected
";

pub(super) const POOL_CSV: &str = "\
Cancelled Employee ID,Cancelled Employee Name,Cancelled Employee Nationality,Gender,Cancelled Work Permit Expiry Date
C-1,Old Eth,Ethiopian,Female,2025-06-01
C-2,Old Fil,Filipina,Female,2025-09-01
";

pub(super) const ACCEPTED_LEDGER_CSV: &str = "\
Priority number,Request ID,Housemaid Name,Priority Name
1,L-1,Lia,first
5,L-5,Lou,fifth
";

pub(super) const REJECTED_LEDGER_CSV: &str = "\
Priority number,Request ID,Housemaid Name,Priority Name
4,L-4,Lee,fourth
";

pub(super) const ALL_MAIDS_CSV: &str = "\
Request ID,Housemaid Name,Housemaid Type,Gender,Docs status,MB?
L-5,Lou,CC,Female,Approved,No
N-1,Nia,MV,Female,Rejected,No
N-2,Noa,CC,Female,Approved,Yes
";

pub(super) const NEW_MAIDS_CSV: &str = "\
Request ID,Housemaid Name,Housemaid Nationality
L-5,Lou,Filipina
N-1,Nia,Ethiopian
N-2,Noa,Filipina
N-3,Nox,Kenyan
";

/// Sheets kept in memory as header plus rows, keyed by sheet name.
#[derive(Default)]
pub(super) struct MemorySheets {
    sheets: Mutex<BTreeMap<String, (Vec<String>, Vec<Vec<String>>)>>,
}

impl MemorySheets {
    pub(super) fn rows(&self, name: &str) -> Option<Vec<Vec<String>>> {
        let guard = self.sheets.lock().expect("sheet mutex poisoned");
        guard.get(name).map(|(_, rows)| rows.clone())
    }

    pub(super) fn header(&self, name: &str) -> Option<Vec<String>> {
        let guard = self.sheets.lock().expect("sheet mutex poisoned");
        guard.get(name).map(|(header, _)| header.clone())
    }

    pub(super) fn names(&self) -> Vec<String> {
        let guard = self.sheets.lock().expect("sheet mutex poisoned");
        guard.keys().cloned().collect()
    }
}

impl SheetWriter for MemorySheets {
    fn write_sheet(
        &self,
        name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), SheetWriteError> {
        let mut guard = self.sheets.lock().expect("sheet mutex poisoned");
        guard.insert(
            name.to_string(),
            (
                header.iter().map(|cell| cell.to_string()).collect(),
                rows.to_vec(),
            ),
        );
        Ok(())
    }
}

pub(super) struct UnavailableSheets;

impl SheetWriter for UnavailableSheets {
    fn write_sheet(&self, _: &str, _: &[&str], _: &[Vec<String>]) -> Result<(), SheetWriteError> {
        Err(SheetWriteError::Backend("sheet service offline".to_string()))
    }
}

pub(super) fn build_service() -> (PriorityOperationsService<MemorySheets>, Arc<MemorySheets>) {
    let sheets = Arc::new(MemorySheets::default());
    let service = PriorityOperationsService::new(sheets.clone(), PriorityClassifier::default());
    (service, sheets)
}

pub(super) fn first_column(rows: &[Vec<String>]) -> Vec<&str> {
    rows.iter()
        .map(|row| row.first().map(String::as_str).unwrap_or_default())
        .collect()
}

pub(super) fn column<'a>(rows: &'a [Vec<String>], index: usize) -> Vec<&'a str> {
    rows.iter()
        .map(|row| row.get(index).map(String::as_str).unwrap_or_default())
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
