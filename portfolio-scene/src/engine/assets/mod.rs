//! Asset types consumed by the scene.
//!
//! The portfolio document is both a JSON asset (loaded from disk) and a
//! resource (the live copy the scene reacts to).

/// Portfolio document with optional section fields and intro text helpers.
pub mod portfolio_data;
