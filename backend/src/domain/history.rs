//! Connection history records.
//!
//! Every successful connectivity check appends one record. Records are
//! immutable; the history of a pair is read back in creation order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ErrorMessages, OutcomeStatus};

/// Identifier tying a history record to its organisation matches.
///
/// Freshly generated for every save and unique across all records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new random transaction identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored check as returned to callers.
///
/// `organizations` is omitted from the serialised form when empty, which is
/// always the case for records that were not connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionHistoryEntry {
    /// Time the record was written.
    pub registered_at: DateTime<Utc>,
    /// Outcome of the check.
    pub connected: bool,
    /// Organisations shared at the time of the check.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<String>,
}

/// Body of a history read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryOutcome {
    /// Records in ascending creation order.
    Entries(Vec<ConnectionHistoryEntry>),
    /// Storage failure.
    Errors { errors: ErrorMessages },
}

/// History body plus status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryReport {
    /// Serialisable body.
    pub outcome: HistoryOutcome,
    /// 200 on success, 500 on storage failure.
    pub status: OutcomeStatus,
}

impl HistoryReport {
    /// Successful read.
    pub fn entries(entries: Vec<ConnectionHistoryEntry>) -> Self {
        Self {
            outcome: HistoryOutcome::Entries(entries),
            status: OutcomeStatus::OK,
        }
    }

    /// Failed read.
    pub fn errors(errors: ErrorMessages) -> Self {
        Self {
            outcome: HistoryOutcome::Errors { errors },
            status: OutcomeStatus::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorMessage;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn registered_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn organizations_are_omitted_when_empty() {
        let entry = ConnectionHistoryEntry {
            registered_at: registered_at(),
            connected: false,
            organizations: Vec::new(),
        };
        let value = serde_json::to_value(&entry).expect("serialises");
        assert_eq!(
            value,
            json!({"registered_at": "2024-03-01T12:00:00Z", "connected": false})
        );
    }

    #[rstest]
    fn organizations_are_listed_when_present() {
        let entry = ConnectionHistoryEntry {
            registered_at: registered_at(),
            connected: true,
            organizations: vec!["org1".to_owned()],
        };
        let value = serde_json::to_value(&entry).expect("serialises");
        assert_eq!(value["organizations"], json!(["org1"]));
    }

    #[rstest]
    fn failed_reads_report_internal_error() {
        let report = HistoryReport::errors(ErrorMessages::single(ErrorMessage::text("down")));
        assert_eq!(report.status, OutcomeStatus::INTERNAL_ERROR);
        let value = serde_json::to_value(report.outcome).expect("serialises");
        assert_eq!(value, json!({"errors": ["down"]}));
    }

    #[rstest]
    fn transaction_ids_are_fresh() {
        assert_ne!(TransactionId::random(), TransactionId::random());
    }
}
