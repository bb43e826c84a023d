//! Page-level wiring: which elements get live formatting, how server values
//! are prepared, what is posted back and how date fields follow each other.

pub mod dates;
pub mod document;
pub mod pipeline;
pub mod policies;
pub mod registry;
pub mod submit;

pub use dates::{DateTriad, DateTriadIds};
pub use document::{Document, Element, MemoryDocument};
pub use pipeline::{InitPipeline, InitReport, PageMode};
pub use policies::{PolicyKind, PolicyReplicator};
pub use registry::{AttachedField, FieldRegistry};
pub use submit::clean_for_submit;
