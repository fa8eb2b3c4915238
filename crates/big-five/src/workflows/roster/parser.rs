use std::io::Read;
use tracing::{debug, warn};

use super::RosterEntry;

/// Reads roster rows, dropping any row that cannot be read or carries no CNIC.
///
/// Columns are located by header name, so extra or reordered columns are fine. Cells
/// missing from a short row read as empty. Header problems still surface as errors
/// since no row could be read without them.
pub(crate) fn parse_entries<R: Read>(reader: R) -> Result<Vec<RosterEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = RosterColumns::locate(csv_reader.headers()?);
    let Some(cnic_column) = columns.cnic else {
        warn!("roster has no cnic column");
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                debug!(row = index + 1, error = %err, "skipping unreadable roster row");
                continue;
            }
        };

        let identifier = cell(&record, Some(cnic_column));
        if identifier.is_empty() {
            debug!(row = index + 1, "skipping roster row without cnic");
            continue;
        }

        entries.push(RosterEntry {
            identifier,
            name: cell(&record, columns.name),
            region: cell(&record, columns.region),
            dealership: cell(&record, columns.dealership),
        });
    }

    Ok(entries)
}

#[derive(Debug, Default)]
struct RosterColumns {
    cnic: Option<usize>,
    name: Option<usize>,
    region: Option<usize>,
    dealership: Option<usize>,
}

impl RosterColumns {
    fn locate(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|header| header == name);
        Self {
            cnic: position("cnic"),
            name: position("name"),
            region: position("region"),
            dealership: position("dealership"),
        }
    }
}

fn cell(record: &csv::StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|index| record.get(index))
        .unwrap_or_default()
        .to_string()
}
