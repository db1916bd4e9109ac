//! DOCX (Word) package generation.
//!
//! This module serializes the intermediate document model to the Office Open
//! XML word-processing format (.docx).

mod writer;

pub use writer::{write_bytes, write_file, DocxWriter};
