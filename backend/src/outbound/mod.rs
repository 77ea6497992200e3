//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing
//! concrete implementations of domain port traits:
//!
//! - **memory**: in-memory lunchbreak store with the unique indexes and
//!   explicit cascades the store port demands; serializes writers behind a
//!   single async mutex and backs the integration test suites,
//! - **tracing_audit**: audit-log sink emitting `tracing` events.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod tracing_audit;

pub use memory::MemoryLunchbreakStore;
pub use tracing_audit::TracingAuditLog;
