//! triage-store: Persistence for the Railway Complaint Triage service
//!
//! This crate provides:
//! - A JSON-file-backed complaint ledger (create/get/update/list)
//! - A JSON-file-backed staff credential store with argon2 hashing
//!
//! # Architecture
//!
//! Both stores are whole-file read-modify-write: every mutation reads the
//! file, changes the in-memory map, and rewrites the file. An in-process
//! `tokio::sync::RwLock` serializes writers inside one process; there is
//! no cross-process isolation, which is an accepted limitation at this
//! scale.
//!
//! A corrupted file is surfaced as `StoreError::Corrupted`, never
//! silently treated as an empty store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use triage_store::ComplaintLedger;
//!
//! let ledger = ComplaintLedger::new("complaints.json");
//! let id = ledger.create(record).await?;
//! let record = ledger.get(&id).await?;
//! ```

pub mod error;
pub mod ledger;
pub mod users;

pub use error::{StoreError, StoreResult};
pub use ledger::ComplaintLedger;
pub use users::{hash_password, verify_password, StaffUser, UserStore};
