use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::round_robin::Distribution;
use crate::workflows::intake::writer::{write_table, SheetRow};

/// Destination for finished tables. Each write replaces whatever the sheet held
/// before: header in the first row, data rows below it.
pub trait SheetWriter: Send + Sync {
    fn write_sheet(
        &self,
        name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), SheetWriteError>;

    /// Replace several sheets as one update. Writers that can stage their output
    /// should leave every sheet untouched when any of them fails; the provided
    /// implementation writes them one after another.
    fn write_sheets(&self, sheets: &[SheetTable]) -> Result<(), SheetWriteError> {
        for sheet in sheets {
            self.write_sheet(&sheet.name, sheet.header, &sheet.rows)?;
        }
        Ok(())
    }
}

/// A rendered sheet: its name, header, and cell rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    pub name: String,
    pub header: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn of<T: SheetRow>(name: impl Into<String>, rows: &[T]) -> Self {
        Self {
            name: name.into(),
            header: T::HEADER,
            rows: rows.iter().map(SheetRow::cells).collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SheetWriteError {
    #[error("could not write sheet file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode sheet rows: {0}")]
    Csv(#[from] csv::Error),
    #[error("sheet backend rejected the write: {0}")]
    Backend(String),
}

/// Write every destination of a distribution as its own sheet, empty ones included.
pub fn write_distribution<W, T>(
    writer: &W,
    distribution: &Distribution<T>,
) -> Result<(), SheetWriteError>
where
    W: SheetWriter + ?Sized,
    T: SheetRow,
{
    for destination in &distribution.destinations {
        write_rows(writer, &destination.name, &destination.rows)?;
    }
    Ok(())
}

pub fn write_rows<W, T>(writer: &W, name: &str, rows: &[T]) -> Result<(), SheetWriteError>
where
    W: SheetWriter + ?Sized,
    T: SheetRow,
{
    let table = SheetTable::of(name, rows);
    writer.write_sheet(&table.name, table.header, &table.rows)
}

/// Writes each sheet to `<directory>/<name>.csv`, truncating any previous file.
#[derive(Debug, Clone)]
pub struct CsvDirectoryWriter {
    directory: PathBuf,
}

impl CsvDirectoryWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn sheet_path(&self, name: &str) -> PathBuf {
        let file_name: String = name
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' => '_',
                other => other,
            })
            .collect();
        self.directory.join(format!("{file_name}.csv"))
    }

    fn staging_path(&self, name: &str) -> PathBuf {
        let mut path = self.sheet_path(name).into_os_string();
        path.push(".partial");
        PathBuf::from(path)
    }

    fn stage(&self, sheet: &SheetTable) -> Result<PathBuf, SheetWriteError> {
        let path = self.staging_path(&sheet.name);
        let file = fs::File::create(&path)?;
        write_table(file, sheet.header, &sheet.rows)?;
        Ok(path)
    }
}

impl SheetWriter for CsvDirectoryWriter {
    fn write_sheet(
        &self,
        name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), SheetWriteError> {
        fs::create_dir_all(&self.directory)?;
        let path = self.sheet_path(name);
        let file = fs::File::create(&path)?;
        write_table(file, header, rows)?;
        info!(sheet = name, rows = rows.len(), path = %path.display(), "sheet written");
        Ok(())
    }

    /// Every sheet is staged next to its target first; targets are only replaced
    /// once all of them staged cleanly.
    fn write_sheets(&self, sheets: &[SheetTable]) -> Result<(), SheetWriteError> {
        fs::create_dir_all(&self.directory)?;

        let mut staged = Vec::with_capacity(sheets.len());
        for sheet in sheets {
            match self.stage(sheet) {
                Ok(path) => staged.push(path),
                Err(error) => {
                    for path in &staged {
                        let _ = fs::remove_file(path);
                    }
                    return Err(error);
                }
            }
        }

        for (sheet, staged_path) in sheets.iter().zip(&staged) {
            let path = self.sheet_path(&sheet.name);
            fs::rename(staged_path, &path)?;
            info!(sheet = %sheet.name, rows = sheet.rows.len(), path = %path.display(), "sheet written");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::distribution::flows::LinkRow;
    use crate::workflows::distribution::round_robin::{distribute, pc_names};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "maid-priority-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn csv_writer_replaces_previous_contents() {
        let dir = scratch_dir("replace");
        let writer = CsvDirectoryWriter::new(&dir);

        writer
            .write_sheet("PC_1", &["Links"], &[vec!["a".into()], vec!["b".into()]])
            .expect("first write");
        writer
            .write_sheet("PC_1", &["Links"], &[vec!["c".into()]])
            .expect("second write");

        let written = fs::read_to_string(writer.sheet_path("PC_1")).expect("read back");
        assert_eq!(written, "Links\nc\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_batch_leaves_earlier_sheets_untouched() {
        let dir = scratch_dir("batch");
        let writer = CsvDirectoryWriter::new(&dir);
        writer
            .write_sheet("Accepted", &["Links"], &[vec!["old".into()]])
            .expect("seed accepted");
        fs::create_dir_all(writer.staging_path("Rejected")).expect("block rejected staging");

        let sheets = [
            SheetTable::of("Accepted", &[LinkRow { link: "new".to_string() }]),
            SheetTable::of("Rejected", &[LinkRow { link: "new".to_string() }]),
        ];
        writer.write_sheets(&sheets).expect_err("rejected cannot stage");

        let accepted = fs::read_to_string(writer.sheet_path("Accepted")).expect("read back");
        assert_eq!(accepted, "Links\nold\n");
        assert!(!writer.staging_path("Accepted").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn batch_write_replaces_every_sheet() {
        let dir = scratch_dir("batch-ok");
        let writer = CsvDirectoryWriter::new(&dir);

        let sheets = [
            SheetTable::of("Accepted", &[LinkRow { link: "a".to_string() }]),
            SheetTable::of("Rejected", &[] as &[LinkRow]),
        ];
        writer.write_sheets(&sheets).expect("batch write");

        assert_eq!(
            fs::read_to_string(writer.sheet_path("Accepted")).expect("accepted"),
            "Links\na\n"
        );
        assert_eq!(
            fs::read_to_string(writer.sheet_path("Rejected")).expect("rejected"),
            "Links\n"
        );
        assert!(!writer.staging_path("Rejected").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn every_destination_gets_a_file() {
        let dir = scratch_dir("destinations");
        let writer = CsvDirectoryWriter::new(&dir);
        let links = vec![LinkRow {
            link: "https://example.test/login/1".to_string(),
        }];
        let distribution = distribute(links, pc_names(3)).expect("distribution");

        write_distribution(&writer, &distribution).expect("write");

        for name in ["PC_1", "PC_2", "PC_3"] {
            assert!(writer.sheet_path(name).exists(), "{name} missing");
        }
        let empty = fs::read_to_string(writer.sheet_path("PC_3")).expect("read");
        assert_eq!(empty, "Links\n");
        let _ = fs::remove_dir_all(&dir);
    }
}
