pub mod error;
pub mod fs;
pub mod language;
pub mod metadata;

pub use language::Language;
pub use metadata::{Artifact, Metadata};
