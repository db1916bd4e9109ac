//! Intermediate document model.
//!
//! This module defines the data structures that represent the document being
//! generated, independent of the output format. The template transform builds
//! these structures from XML events, and the DOCX writer serializes them.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
