//! Core business logic - framework-agnostic operations over the entities.
//!
//! Every function here takes an explicit database connection (and, where a
//! permission or ownership decision is involved, an explicit [`crate::identity::Actor`])
//! so the rules are testable without a running HTTP server. Nothing in this
//! module knows about routes, headers, or response codes.

/// Approval state machine shared by confirmation letters and event reports
pub mod approval;
/// Budget targets, transactions, and the monthly overview
pub mod budget;
/// Approvable-document CRUD, list filters, and stored-file sequencing
pub mod document;
/// Inventory items and the append-only condition history
pub mod inventory;
/// Confirmation-letter assembly, preview, and generation
pub mod letter;
