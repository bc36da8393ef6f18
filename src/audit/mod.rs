//! Audit logging system for tally-cli
//!
//! Records every create, update, and delete the services perform, with
//! before/after snapshots, in an append-only JSONL log.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
