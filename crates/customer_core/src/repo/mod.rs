//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every statement is parameterized; values are never spliced into SQL.
//! - Repository reads return `Option` for absent rows, never a placeholder
//!   record.

pub mod customer_repo;
