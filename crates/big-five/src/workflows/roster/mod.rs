//! Participant allow-list loaded once at startup from a CSV export.

mod parser;

use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One allow-listed participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub identifier: String,
    pub name: String,
    pub region: String,
    pub dealership: String,
}

/// Immutable snapshot of the allow-list, keyed by CNIC.
#[derive(Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_identifier: HashMap<String, usize>,
}

impl Roster {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a roster from already-parsed entries. The first entry wins on duplicate CNICs.
    pub fn from_entries(entries: Vec<RosterEntry>) -> Self {
        let mut by_identifier = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            by_identifier
                .entry(entry.identifier.clone())
                .or_insert(index);
        }

        Self {
            entries,
            by_identifier,
        }
    }

    /// Exact, case-sensitive lookup on the stored identifier.
    pub fn find(&self, identifier: &str) -> Option<&RosterEntry> {
        self.by_identifier
            .get(identifier)
            .map(|&index| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Roster, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Roster, RosterImportError> {
        let entries = parser::parse_entries(reader)?;
        Ok(Roster::from_entries(entries))
    }

    /// Loads the roster, falling back to an empty one when the source is unusable.
    ///
    /// With an empty roster every identifier is rejected as unknown, so the service keeps
    /// running and refuses entry instead of crashing at startup.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Roster {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(roster) => {
                info!(path = %path.display(), participants = roster.len(), "roster loaded");
                roster
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "roster unavailable, refusing all participants");
                Roster::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ROSTER_CSV: &str = "cnic,name,region,dealership\n\
12345-1234567-1,Ayesha Khan,Lahore,Gulberg Motors\n\
12345-1234567-1,Duplicate Row,Multan,Elsewhere\n\
42101-7654321-3,Sana Malik,Karachi,Clifton Auto\n";

    #[test]
    fn importer_indexes_entries_and_keeps_first_duplicate() {
        let roster = RosterImporter::from_reader(Cursor::new(ROSTER_CSV)).expect("import");
        assert_eq!(roster.len(), 2);
        let entry = roster.find("12345-1234567-1").expect("present");
        assert_eq!(entry.name, "Ayesha Khan");
        assert_eq!(entry.region, "Lahore");
    }

    #[test]
    fn lookup_is_exact() {
        let roster = RosterImporter::from_reader(Cursor::new(ROSTER_CSV)).expect("import");
        assert!(roster.find("1234512345671").is_none());
        assert!(roster.find(" 12345-1234567-1").is_none());
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        match RosterImporter::from_path("./does-not-exist.csv") {
            Err(RosterImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn load_or_empty_degrades_to_empty_roster() {
        let roster = RosterImporter::load_or_empty("./does-not-exist.csv");
        assert!(roster.is_empty());
        assert!(roster.find("12345-1234567-1").is_none());
    }
}
