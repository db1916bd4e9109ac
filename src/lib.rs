//! # endoc
//!
//! Declarative XML proposal templates to Word documents.
//!
//! This library reads a small declarative XML description of a document
//! (titles, section paragraphs, tables, page/line breaks, header/footer
//! text) and emits a formatted `.docx` file. It is a single-pass transpiler:
//! the template's XML event stream is mapped, one event at a time, onto an
//! in-memory document model, which is then serialized as an Office Open XML
//! package.
//!
//! ## Quick Start
//!
//! ```no_run
//! // One call: parse the template and write the document it names
//! let path = endoc::generate_file("proposal.xml")?;
//! println!("wrote {}", path.display());
//! # Ok::<(), endoc::Error>(())
//! ```
//!
//! ## Step-by-step API
//!
//! ```no_run
//! use endoc::TemplateParser;
//!
//! let proposal = TemplateParser::open("proposal.xml")?.parse()?;
//! println!("{} body blocks", proposal.document.len());
//!
//! let bytes = endoc::docx::write_bytes(&proposal.document)?;
//! std::fs::write(&proposal.doc_name, bytes)?;
//! # Ok::<(), endoc::Error>(())
//! ```
//!
//! ## Template vocabulary
//!
//! | Element | Required attributes | Optional attributes |
//! |---|---|---|
//! | `proposal` (root) | `docName` | `headerValue` |
//! | `title` / `sectiontitle` / `sectionparagraph` | `fontName`, `fontSize`, `fontStyle` | `alignment` |
//! | `section` | — | — |
//! | `sectiontable` | `rows`, `cols` | — |
//! | `pagebreak` / `linebreak` | — | — |
//!
//! Tag names are case-insensitive; unknown elements are ignored. Text-bearing
//! elements do not nest: opening one closes the previous.

pub mod docx;
pub mod error;
pub mod model;
pub mod template;

// Re-exports
pub use error::{Error, Result};
pub use model::{
    Block, Cell, Document, Paragraph, Row, StyleFlag, Table, TextAlignment, TextRun, TextStyle,
};
pub use template::{Proposal, TemplateParser};

use std::path::{Path, PathBuf};

/// Parse a proposal template file.
///
/// # Example
///
/// ```no_run
/// let proposal = endoc::parse_file("proposal.xml")?;
/// println!("output: {}", proposal.doc_name);
/// # Ok::<(), endoc::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Proposal> {
    TemplateParser::open(path)?.parse()
}

/// Parse a proposal template from an XML string.
pub fn parse_str(xml: &str) -> Result<Proposal> {
    TemplateParser::from_str(xml).parse()
}

/// Parse a template file and write the Word document it describes.
///
/// The output path comes from the template's `docName` attribute and is
/// returned on success.
///
/// # Example
///
/// ```no_run
/// let out = endoc::generate_file("proposal.xml")?;
/// assert!(out.exists());
/// # Ok::<(), endoc::Error>(())
/// ```
pub fn generate_file(path: impl AsRef<Path>) -> Result<PathBuf> {
    let proposal = parse_file(path)?;
    let out = PathBuf::from(&proposal.doc_name);
    docx::write_file(&proposal.document, &out)?;
    log::info!("wrote document to '{}'", out.display());
    Ok(out)
}
