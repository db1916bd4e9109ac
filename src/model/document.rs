//! Document model structures.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A block-level content item within the document body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table
    Table(Table),
    /// A page break
    PageBreak,
}

/// An in-memory word-processor document.
///
/// Holds an ordered sequence of body blocks plus at most one header and one
/// footer paragraph, repeated on every rendered page by the output backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Page header content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Paragraph>,

    /// Page footer content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Paragraph>,

    /// Body content blocks, in document order
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a content block, returning its index in the body.
    pub fn push_block(&mut self, block: Block) -> usize {
        self.content.push(block);
        self.content.len() - 1
    }

    /// Append a paragraph to the body.
    pub fn add_paragraph(&mut self, para: Paragraph) -> usize {
        self.push_block(Block::Paragraph(para))
    }

    /// Append a table to the body.
    pub fn add_table(&mut self, table: Table) -> usize {
        self.push_block(Block::Table(table))
    }

    /// Set the page header.
    pub fn set_header(&mut self, para: Paragraph) {
        self.header = Some(para);
    }

    /// Set the page footer.
    pub fn set_footer(&mut self, para: Paragraph) {
        self.footer = Some(para);
    }

    /// Get the number of body blocks.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the document body is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Extract all body text content as a single string.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for block in &self.content {
            match block {
                Block::Paragraph(para) => {
                    text.push_str(&para.plain_text());
                    text.push('\n');
                }
                Block::Table(table) => {
                    text.push_str(&table.plain_text());
                }
                Block::PageBreak => {}
            }
        }
        text.trim_end().to_string()
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to JSON string (compact).
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        let idx = doc.add_paragraph(Paragraph::with_text("Hello, World!"));
        assert_eq!(idx, 0);
        assert!(!doc.is_empty());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_push_block_indices() {
        let mut doc = Document::new();
        assert_eq!(doc.add_paragraph(Paragraph::new()), 0);
        assert_eq!(doc.push_block(Block::PageBreak), 1);
        assert_eq!(doc.add_table(Table::new()), 2);
    }

    #[test]
    fn test_header_footer() {
        let mut doc = Document::new();
        assert!(doc.header.is_none());
        assert!(doc.footer.is_none());

        doc.set_header(Paragraph::with_text("DRAFT"));
        doc.set_footer(Paragraph::with_text("page"));
        assert_eq!(doc.header.as_ref().unwrap().plain_text(), "DRAFT");
        assert_eq!(doc.footer.as_ref().unwrap().plain_text(), "page");
        // Header is not body content
        assert!(doc.is_empty());
    }

    #[test]
    fn test_plain_text_extraction() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("First"));
        doc.push_block(Block::PageBreak);
        doc.add_paragraph(Paragraph::with_text("Second"));

        assert_eq!(doc.plain_text(), "First\nSecond");
    }

    #[test]
    fn test_json_serialization() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Hello"));

        let json = doc.to_json().unwrap();
        assert!(json.contains("Hello"));
        assert!(json.contains("Paragraph"));
        // Unset header/footer should not be serialized
        assert!(!json.contains("header"));
        assert!(!json.contains("footer"));
    }
}
