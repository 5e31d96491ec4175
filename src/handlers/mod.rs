//! Event Handling Module
//!
//! Glue between raw terminal events and navigator state changes.
//!
//! - **`keys`**: keyboard mapping and quit detection

pub mod keys;
