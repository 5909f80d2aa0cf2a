//! Command handlers for the pi-sync binary.

pub mod list;
pub mod status;
pub mod sync;
