//! Engine data model.
//!
//! # Responsibility
//! - Define the records owned by the citation manager and outline generator.
//! - Define the transient results returned by keyword and coherence analysis.
//!
//! # Invariants
//! - Every persisted record carries an id assigned by its owning component.
//! - Wire field names are camelCase so stored collections stay readable by
//!   the UI layer.

pub mod analysis;
pub mod citation;
pub mod outline;
