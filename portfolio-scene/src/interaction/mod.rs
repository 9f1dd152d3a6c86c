//! Door interaction: which doors exist, how they react to the pointer,
//! and how the pointer finds them.
//!
//! ## Event Flow
//!
//! ```text
//! pick_doors (cursor ray vs door OBBs)
//!   └─> DoorPointerEvent::{Enter, Leave, Click}
//!         └─> handle_door_pointer_events
//!               ├─> DoorInteraction hover target
//!               └─> SectionSelected (click only)
//! ```

/// Door components, interaction state and the events around them.
///
/// Hover drives an eased scale toward 1.1 and back to 1.0; clicks become `SectionSelected`.
pub mod door;

/// Cursor and touch picking against door bounding boxes.
///
/// Emits enter/leave on hover changes and click on press-release without drag.
pub mod picking;

/// Ray intersection utilities for oriented bounding box picking.
pub mod ray;

/// Portfolio-driven door visibility.
pub mod visibility;
