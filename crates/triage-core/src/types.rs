//! Core data types for the complaint triage service.
//!
//! These types are shared between the model pipeline, the persistence
//! layer, and the HTTP API: the complaint record is the unit the ledger
//! stores, the training sample is the unit the trainer consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default status a complaint record starts in.
pub const STATUS_PENDING: &str = "Pending";

/// Short opaque identifier for a complaint.
///
/// The first 8 characters of a v4 UUID. Uniqueness is birthday-bound at
/// this scale, not guaranteed; the ledger re-rolls on collision within a
/// single file but makes no global promise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Generates a new random 8-character identifier.
    #[must_use]
    pub fn generate() -> Self {
        let full = Uuid::new_v4().to_string();
        Self(full[..8].to_string())
    }

    /// Wraps an existing identifier string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComplaintId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single department prediction with its softmax probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Department label, canonicalized (title-cased) at training time.
    pub department: String,
    /// Model probability in `[0, 1]`.
    pub score: f64,
}

/// A complaint as stored in the ledger.
///
/// Created on submission, mutated only by staff updates (status and
/// assigned departments), never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    /// PNR as provided by the passenger or heuristically extracted from
    /// the complaint text. May be empty; never validated.
    pub pnr: String,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
    /// Raw complaint text, stored verbatim.
    pub complaint: String,
    /// Model predictions, best first.
    pub predicted: Vec<Prediction>,
    /// Departments the complaint is routed to. Starts as the top
    /// prediction, staff may reassign.
    pub assigned_departments: Vec<String>,
    /// Free-form status, initially "Pending".
    pub status: String,
}

impl ComplaintRecord {
    /// Creates a new pending record from a submission and its predictions.
    ///
    /// The top prediction becomes the initially assigned department.
    pub fn new(pnr: String, complaint: String, predicted: Vec<Prediction>) -> Self {
        let assigned_departments = predicted
            .first()
            .map(|p| vec![p.department.clone()])
            .unwrap_or_default();

        Self {
            pnr,
            submitted_at: Utc::now(),
            complaint,
            predicted,
            assigned_departments,
            status: STATUS_PENDING.to_string(),
        }
    }
}

/// One labeled example for training: normalized complaint text and its
/// canonical department label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub complaint: String,
    pub department: String,
}

impl TrainingSample {
    pub fn new(complaint: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            complaint: complaint.into(),
            department: department.into(),
        }
    }
}
