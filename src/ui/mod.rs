//! User Interface Module
//!
//! Presentation of the navigator: the reusable [`pane::Pane`] selection list,
//! the three-column layout and syntax highlighting for artifact bodies.

pub mod highlight;
pub mod navigator;
pub mod pane;
