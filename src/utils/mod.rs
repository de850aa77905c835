//! Utility modules shared across the crate.

pub mod path;
pub mod plural;
pub mod slug;

pub use plural::plural_count;
