use std::io::Write;

use chrono::NaiveDate;

use crate::workflows::priorities::WorkerRecord;

/// A value that renders as one row of a fixed-column sheet.
pub trait SheetRow {
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Columns of the priority sheets and of the accepted/rejected ledgers.
pub const PRIORITY_SHEET_HEADER: &[&str] = &[
    "Priority number",
    "Request ID",
    "Housemaid Name",
    "Housemaid Nationality",
    "Housemaid Type",
    "Gender",
    "Priority Name",
    "Been in the table for (in days)",
    "Docs status",
];

impl SheetRow for WorkerRecord {
    const HEADER: &'static [&'static str] = PRIORITY_SHEET_HEADER;

    fn cells(&self) -> Vec<String> {
        vec![
            self.priority_number
                .map(|number| number.to_string())
                .unwrap_or_default(),
            self.request_id.to_string(),
            self.name.clone(),
            self.nationality.clone(),
            self.worker_type
                .map(|worker_type| worker_type.label().to_string())
                .unwrap_or_default(),
            self.gender
                .map(|gender| gender.label().to_string())
                .unwrap_or_default(),
            self.priority_name.clone().unwrap_or_default(),
            self.days_in_table.map(format_number).unwrap_or_default(),
            self.docs_status.label().to_string(),
        ]
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Whole numbers without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Header row then data rows, flushed before returning.
pub fn write_table<W: Write>(
    writer: W,
    header: &[&str],
    rows: &[Vec<String>],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_records<W: Write, T: SheetRow>(writer: W, rows: &[T]) -> Result<(), csv::Error> {
    let cells: Vec<Vec<String>> = rows.iter().map(SheetRow::cells).collect();
    write_table(writer, T::HEADER, &cells)
}

/// Render rows to an in-memory CSV string.
pub fn to_csv_string<T: SheetRow>(rows: &[T]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, rows)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::priorities::{DocsStatus, Gender, WorkerType};

    #[test]
    fn priority_sheet_renders_report_columns() {
        let mut record = WorkerRecord::new("R-9", "Ana");
        record.nationality = "Filipina".to_string();
        record.worker_type = Some(WorkerType::Cc);
        record.gender = Some(Gender::Female);
        record.docs_status = DocsStatus::Approved;
        record.priority_number = Some(3);
        record.priority_name = Some("Filipina with Flight in more than 2 days and Less Than 4 Days".to_string());
        record.days_in_table = Some(4.0);

        let csv = to_csv_string(&[record]).expect("render");

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Priority number,Request ID,Housemaid Name,Housemaid Nationality,Housemaid Type,Gender,Priority Name,Been in the table for (in days),Docs status")
        );
        assert_eq!(
            lines.next(),
            Some("3,R-9,Ana,Filipina,CC,Female,Filipina with Flight in more than 2 days and Less Than 4 Days,4,Approved")
        );
    }

    #[test]
    fn numbers_drop_trailing_zero_fraction() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(2.5), "2.5");
    }
}
