//! Bank slot filtering.
//!
//! Turns the selected group and the live slot list into one visibility
//! decision per slot.

pub mod visibility;

pub use visibility::{compute_visibility, restore_all, FilterMode, FilterOptions, SlotDecision};
