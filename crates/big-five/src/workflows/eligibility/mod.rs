//! Entry gate: only respondents on the roster may take the assessment.

mod cnic;

pub use cnic::Cnic;

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use super::roster::{Roster, RosterEntry};

/// Respondent details travelling with a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentProfile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cnic: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dealership: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("Invalid CNIC format. Use xxxxx-xxxxxxx-x")]
    Format { canonical: String },
    #[error("CNIC {cnic} does not match our records. Access denied.")]
    NotFound { cnic: String },
}

/// Validates identifiers against a roster snapshot.
#[derive(Debug, Clone)]
pub struct EligibilityGate {
    roster: Arc<Roster>,
}

impl EligibilityGate {
    pub fn new(roster: Arc<Roster>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Canonicalizes `identifier` and returns the roster entry it names.
    pub fn validate_and_enrich(&self, identifier: &str) -> Result<&RosterEntry, EligibilityError> {
        let cnic = Cnic::parse(identifier)?;
        self.roster
            .find(cnic.as_str())
            .ok_or_else(|| EligibilityError::NotFound {
                cnic: cnic.into_string(),
            })
    }

    /// Returns a copy of `profile` carrying the roster's name, region and dealership.
    ///
    /// Roster values replace whatever the respondent typed unless the roster cell is
    /// empty. The CNIC is rewritten to its canonical form; the input is never mutated.
    pub fn enrich(&self, profile: &RespondentProfile) -> Result<RespondentProfile, EligibilityError> {
        let entry = self.validate_and_enrich(&profile.cnic)?;
        Ok(RespondentProfile {
            cnic: entry.identifier.clone(),
            name: prefer_roster(&entry.name, &profile.name),
            city: prefer_roster(&entry.region, &profile.city),
            dealership: prefer_roster(&entry.dealership, &profile.dealership),
        })
    }
}

fn prefer_roster(roster_value: &str, typed: &str) -> String {
    if roster_value.is_empty() {
        typed.to_string()
    } else {
        roster_value.to_string()
    }
}
