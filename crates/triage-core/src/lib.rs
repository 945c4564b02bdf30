//! triage-core: Core types for the Railway Complaint Triage service
//!
//! This crate provides:
//! - Domain types shared across the workspace (complaint records,
//!   predictions, training samples)
//! - Text normalization for raw complaint text (URL/mention stripping,
//!   PNR extraction)
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

pub mod text;
pub mod types;

pub use text::{clean_text, extract_pnr};
pub use types::{ComplaintId, ComplaintRecord, Prediction, TrainingSample};
