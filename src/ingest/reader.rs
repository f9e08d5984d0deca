//! CsvRows - lazy row source over delimited text with a header row.

use std::io::Read;

use super::{IngestError, IngestRow};

/// Header name of the name column (matched case-insensitively).
pub const NAME_COLUMN: &str = "name";

/// Header name of the salary column (matched case-insensitively).
pub const SALARY_COLUMN: &str = "salary";

/// Iterator of [`IngestRow`]s read from delimited text.
///
/// The header row is read on construction and must name both a `name` and
/// a `salary` column; other columns are ignored. Rows are pulled from the
/// underlying reader one at a time as the iterator advances.
pub struct CsvRows<R> {
    records: csv::StringRecordsIntoIter<R>,
    name_idx: usize,
    salary_idx: usize,
}

impl<R: Read> CsvRows<R> {
    pub fn new(reader: R, delimiter: u8) -> Result<Self, IngestError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?;
        let column = |wanted: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
                .ok_or(IngestError::MissingColumn(wanted))
        };
        let name_idx = column(NAME_COLUMN)?;
        let salary_idx = column(SALARY_COLUMN)?;

        Ok(Self {
            records: reader.into_records(),
            name_idx,
            salary_idx,
        })
    }
}

impl<R: Read> Iterator for CsvRows<R> {
    type Item = Result<IngestRow, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        Some(Ok(IngestRow::new(
            line,
            record.get(self.name_idx),
            record.get(self.salary_idx),
        )))
    }
}
