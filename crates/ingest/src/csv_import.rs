use std::fs::File;
use std::path::Path;

use ledgersift_core::{Dataset, FieldValue};
use tracing::info;

use crate::error::IngestError;

pub struct CsvImporter;

impl CsvImporter {
    /// Read a CSV file into a [`Dataset`], taking the first record as the header.
    ///
    /// Cells are trimmed. Empty cells become `Null`, numeric cells become
    /// `Number`, everything else stays `Text`. Timestamps are kept as text and
    /// parsed on demand by consumers.
    pub fn import(path: &Path) -> Result<Dataset, IngestError> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(IngestError::EmptyHeader);
        }

        let mut dataset = Dataset::new(headers.iter())?;
        for record in reader.records() {
            let record = record?;
            let values: Vec<FieldValue> = record.iter().map(infer_cell).collect();
            dataset.push_row(values)?;
        }

        info!(
            "Imported {} rows x {} columns from {}",
            dataset.len(),
            dataset.column_count(),
            path.display()
        );
        Ok(dataset)
    }
}

fn infer_cell(raw: &str) -> FieldValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return FieldValue::Number(n);
    }
    FieldValue::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use ledgersift_core::RowId;

    use super::*;

    fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (tmp, path)
    }

    #[test]
    fn import_infers_cell_types() {
        let (_tmp, path) = write_csv("name,amount,notes\nalice,42.5,\nbob,not-a-number,ok\n");
        let data = CsvImporter::import(&path).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(
            data.columns().collect::<Vec<_>>(),
            vec!["name", "amount", "notes"]
        );
        assert_eq!(
            data.value(RowId(0), "amount"),
            Some(&FieldValue::Number(42.5))
        );
        assert_eq!(data.value(RowId(0), "notes"), Some(&FieldValue::Null));
        assert_eq!(
            data.value(RowId(1), "amount"),
            Some(&FieldValue::Text("not-a-number".to_string()))
        );
    }

    #[test]
    fn import_trims_cells() {
        let (_tmp, path) = write_csv("method\n  Cash  \n");
        let data = CsvImporter::import(&path).unwrap();
        assert_eq!(
            data.value(RowId(0), "method"),
            Some(&FieldValue::Text("Cash".to_string()))
        );
    }

    #[test]
    fn import_rejects_duplicate_header() {
        let (_tmp, path) = write_csv("a,b,a\n1,2,3\n");
        assert!(matches!(
            CsvImporter::import(&path),
            Err(IngestError::Dataset(_))
        ));
    }

    #[test]
    fn import_empty_file_is_an_error() {
        let (_tmp, path) = write_csv("");
        assert!(matches!(
            CsvImporter::import(&path),
            Err(IngestError::EmptyHeader)
        ));
    }
}
