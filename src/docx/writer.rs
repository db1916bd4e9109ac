//! DOCX package writer.
//!
//! Serializes a [`Document`] into an Office Open XML word-processing package:
//! a ZIP archive holding `[Content_Types].xml`, the package relationships,
//! `word/document.xml`, and header/footer parts when the document has them.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::model::{Block, Document, Paragraph, StyleFlag, Table, TextAlignment, TextRun};

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOC_RELS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const DOCUMENT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const HEADER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
const FOOTER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";

const HEADER_REL_ID: &str = "rId1";
const FOOTER_REL_ID: &str = "rId2";

/// Twentieths-of-a-point units per single line of spacing.
const LINE_UNITS: f64 = 240.0;

/// DOCX writer for generating packages from the document model.
pub struct DocxWriter {
    /// XML output buffer for the part being generated
    output: String,
}

impl DocxWriter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Serialize a document to DOCX bytes.
    pub fn generate(doc: &Document) -> Result<Vec<u8>> {
        let mut parts: Vec<(&str, String)> = vec![
            ("[Content_Types].xml", content_types(doc)),
            ("_rels/.rels", package_rels()),
            ("word/_rels/document.xml.rels", document_rels(doc)),
            ("word/document.xml", Self::document_part(doc)),
        ];
        if let Some(header) = &doc.header {
            parts.push(("word/header1.xml", Self::header_part(header)));
        }
        if let Some(footer) = &doc.footer {
            parts.push(("word/footer1.xml", Self::footer_part(footer)));
        }
        package(&parts)
    }

    /// Build `word/document.xml`.
    fn document_part(doc: &Document) -> String {
        let mut writer = Self::new();
        writer.output.push_str(XML_DECL);
        writer.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n<w:body>\n",
            WORDML_NS, DOC_RELS_NS
        ));

        for block in &doc.content {
            writer.generate_block(block);
        }

        writer.output.push_str("<w:sectPr>\n");
        if doc.header.is_some() {
            writer.output.push_str(&format!(
                "<w:headerReference w:type=\"default\" r:id=\"{}\"/>\n",
                HEADER_REL_ID
            ));
        }
        if doc.footer.is_some() {
            writer.output.push_str(&format!(
                "<w:footerReference w:type=\"default\" r:id=\"{}\"/>\n",
                FOOTER_REL_ID
            ));
        }
        writer.output.push_str("</w:sectPr>\n");
        writer.output.push_str("</w:body>\n</w:document>\n");
        writer.output
    }

    /// Build `word/header1.xml`.
    fn header_part(para: &Paragraph) -> String {
        let mut writer = Self::new();
        writer.output.push_str(XML_DECL);
        writer
            .output
            .push_str(&format!("<w:hdr xmlns:w=\"{}\">\n", WORDML_NS));
        writer.generate_paragraph(para);
        writer.output.push_str("</w:hdr>\n");
        writer.output
    }

    /// Build `word/footer1.xml`.
    fn footer_part(para: &Paragraph) -> String {
        let mut writer = Self::new();
        writer.output.push_str(XML_DECL);
        writer
            .output
            .push_str(&format!("<w:ftr xmlns:w=\"{}\">\n", WORDML_NS));
        writer.generate_paragraph(para);
        writer.output.push_str("</w:ftr>\n");
        writer.output
    }

    /// Generate XML for a body block.
    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => self.generate_paragraph(para),
            Block::Table(table) => self.generate_table(table),
            Block::PageBreak => {
                self.output
                    .push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>\n");
            }
        }
    }

    /// Generate XML for a paragraph.
    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>");

        let has_props = para.alignment != TextAlignment::Left || para.spacing.is_some();
        if has_props {
            self.output.push_str("<w:pPr>");
            if let Some(spacing) = para.spacing {
                let line = (spacing * LINE_UNITS).round() as u32;
                self.output.push_str(&format!(
                    "<w:spacing w:line=\"{}\" w:lineRule=\"auto\"/>",
                    line
                ));
            }
            if para.alignment != TextAlignment::Left {
                self.output.push_str(&format!(
                    "<w:jc w:val=\"{}\"/>",
                    para.alignment.as_str()
                ));
            }
            self.output.push_str("</w:pPr>");
        }

        for run in &para.runs {
            self.generate_run(run);
        }

        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a run. Carriage returns in the text become `w:cr`
    /// elements.
    fn generate_run(&mut self, run: &TextRun) {
        self.output.push_str("<w:r>");

        let style = &run.style;
        if style.has_formatting() {
            self.output.push_str("<w:rPr>");
            if let Some(font) = &style.font {
                let font = escape_xml(font);
                self.output.push_str(&format!(
                    "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\"/>",
                    font, font
                ));
            }
            match style.flag {
                StyleFlag::Bold => self.output.push_str("<w:b/>"),
                StyleFlag::Italic => self.output.push_str("<w:i/>"),
                _ => {}
            }
            if let Some(size) = style.size {
                // w:sz is in half-points
                let half_points = size * 2;
                self.output.push_str(&format!(
                    "<w:sz w:val=\"{}\"/><w:szCs w:val=\"{}\"/>",
                    half_points, half_points
                ));
            }
            // schema order places w:u after the size elements
            if style.flag == StyleFlag::Underline {
                self.output.push_str("<w:u w:val=\"dash\"/>");
            }
            self.output.push_str("</w:rPr>");
        }

        for (i, segment) in run.text.split('\r').enumerate() {
            if i > 0 {
                self.output.push_str("<w:cr/>");
            }
            if i == 0 || !segment.is_empty() {
                self.output.push_str(&format!(
                    "<w:t xml:space=\"preserve\">{}</w:t>",
                    escape_xml(segment)
                ));
            }
        }

        self.output.push_str("</w:r>");
    }

    /// Generate XML for a table.
    fn generate_table(&mut self, table: &Table) {
        self.output.push_str("<w:tbl>\n");

        self.output.push_str("<w:tblPr>");
        self.output.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/>");
        self.output.push_str("<w:tblBorders>");
        for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.output.push_str(&format!(
                "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                side
            ));
        }
        self.output.push_str("</w:tblBorders>");
        self.output.push_str("</w:tblPr>\n");

        self.output.push_str("<w:tblGrid>");
        for _ in 0..table.column_count() {
            self.output.push_str("<w:gridCol/>");
        }
        self.output.push_str("</w:tblGrid>\n");

        for row in &table.rows {
            self.output.push_str("<w:tr>");
            for cell in &row.cells {
                self.output.push_str("<w:tc>");
                for para in &cell.content {
                    self.generate_paragraph(para);
                }
                // A cell must contain at least one paragraph
                if cell.content.is_empty() {
                    self.output.push_str("<w:p/>");
                }
                self.output.push_str("</w:tc>");
            }
            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
    }
}

/// Serialize a document to DOCX bytes.
pub fn write_bytes(doc: &Document) -> Result<Vec<u8>> {
    DocxWriter::generate(doc)
}

/// Serialize a document to a DOCX file at the given path.
pub fn write_file(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let bytes = DocxWriter::generate(doc)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Build `[Content_Types].xml` for the parts present in the document.
fn content_types(doc: &Document) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<Types xmlns=\"{}\">\n", CONTENT_TYPES_NS));
    xml.push_str(
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\n",
    );
    xml.push_str("<Default Extension=\"xml\" ContentType=\"application/xml\"/>\n");
    xml.push_str(&format!(
        "<Override PartName=\"/word/document.xml\" ContentType=\"{}\"/>\n",
        DOCUMENT_CONTENT_TYPE
    ));
    if doc.header.is_some() {
        xml.push_str(&format!(
            "<Override PartName=\"/word/header1.xml\" ContentType=\"{}\"/>\n",
            HEADER_CONTENT_TYPE
        ));
    }
    if doc.footer.is_some() {
        xml.push_str(&format!(
            "<Override PartName=\"/word/footer1.xml\" ContentType=\"{}\"/>\n",
            FOOTER_CONTENT_TYPE
        ));
    }
    xml.push_str("</Types>\n");
    xml
}

/// Build the package-level `_rels/.rels`.
fn package_rels() -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<Relationships xmlns=\"{}\">\n", PKG_RELS_NS));
    xml.push_str(&format!(
        "<Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"word/document.xml\"/>\n",
        DOC_RELS_NS
    ));
    xml.push_str("</Relationships>\n");
    xml
}

/// Build `word/_rels/document.xml.rels`. Written even when empty.
fn document_rels(doc: &Document) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<Relationships xmlns=\"{}\">\n", PKG_RELS_NS));
    if doc.header.is_some() {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}/header\" Target=\"header1.xml\"/>\n",
            HEADER_REL_ID, DOC_RELS_NS
        ));
    }
    if doc.footer.is_some() {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}/footer\" Target=\"footer1.xml\"/>\n",
            FOOTER_REL_ID, DOC_RELS_NS
        ));
    }
    xml.push_str("</Relationships>\n");
    xml
}

/// Pack the generated parts into a ZIP archive.
fn package(parts: &[(&str, String)]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        for (name, content) in parts {
            zip.start_file(*name, options)?;
            zip.write_all(content.as_bytes())?;
        }
        zip.finish()?;
    }
    Ok(buffer)
}

/// Escape text for inclusion in XML content or attribute values.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row, TextStyle};

    fn render_paragraph(para: &Paragraph) -> String {
        let mut writer = DocxWriter::new();
        writer.generate_paragraph(para);
        writer.output
    }

    #[test]
    fn test_plain_paragraph() {
        let xml = render_paragraph(&Paragraph::with_text("Hello"));
        assert_eq!(
            xml,
            "<w:p><w:r><w:t xml:space=\"preserve\">Hello</w:t></w:r></w:p>\n"
        );
    }

    #[test]
    fn test_paragraph_properties() {
        let mut para = Paragraph::with_text("x");
        para.alignment = TextAlignment::Center;
        para.spacing = Some(2.0);
        let xml = render_paragraph(&para);
        assert!(xml.contains("<w:spacing w:line=\"480\" w:lineRule=\"auto\"/>"));
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
    }

    #[test]
    fn test_left_paragraph_has_no_properties() {
        let xml = render_paragraph(&Paragraph::with_text("x"));
        assert!(!xml.contains("<w:pPr>"));
    }

    #[test]
    fn test_run_styles() {
        for (flag, marker) in [
            (StyleFlag::Bold, "<w:b/>"),
            (StyleFlag::Italic, "<w:i/>"),
            (StyleFlag::Underline, "<w:u w:val=\"dash\"/>"),
        ] {
            let mut style = TextStyle::with_font("Arial", 14);
            style.flag = flag;
            let mut para = Paragraph::new();
            para.add_run(TextRun::styled("x", style));
            let xml = render_paragraph(&para);
            assert!(xml.contains(marker), "missing {} in {}", marker, xml);
            assert!(xml.contains("<w:rFonts w:ascii=\"Arial\" w:hAnsi=\"Arial\"/>"));
            assert!(xml.contains("<w:sz w:val=\"28\"/><w:szCs w:val=\"28\"/>"));
        }
    }

    #[test]
    fn test_carriage_return_becomes_cr() {
        let mut para = Paragraph::new();
        para.add_run(TextRun::plain("line one\rline two"));
        let xml = render_paragraph(&para);
        assert!(xml.contains(
            "<w:t xml:space=\"preserve\">line one</w:t><w:cr/><w:t xml:space=\"preserve\">line two</w:t>"
        ));
    }

    #[test]
    fn test_trailing_carriage_return() {
        let mut para = Paragraph::new();
        para.add_run(TextRun::plain("only\r"));
        let xml = render_paragraph(&para);
        assert!(xml.contains("<w:t xml:space=\"preserve\">only</w:t><w:cr/>"));
        assert!(!xml.contains("<w:cr/><w:t"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = render_paragraph(&Paragraph::with_text("a < b & c"));
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_table_structure() {
        let mut writer = DocxWriter::new();
        writer.generate_table(&Table::filled(2, 3, " cell template "));
        let xml = writer.output;
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:gridCol/>").count(), 3);
        assert_eq!(xml.matches(" cell template ").count(), 6);
        assert!(xml.contains("<w:tblBorders>"));
    }

    #[test]
    fn test_empty_cell_gets_paragraph() {
        let mut table = Table::new();
        let mut row = Row::new();
        row.add_cell(Cell::new());
        table.add_row(row);
        let mut writer = DocxWriter::new();
        writer.generate_table(&table);
        assert!(writer.output.contains("<w:tc><w:p/></w:tc>"));
    }

    #[test]
    fn test_page_break_block() {
        let mut writer = DocxWriter::new();
        writer.generate_block(&Block::PageBreak);
        assert_eq!(
            writer.output,
            "<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>\n"
        );
    }

    #[test]
    fn test_document_part_references_header_and_footer() {
        let mut doc = Document::new();
        doc.set_header(Paragraph::with_text("H"));
        doc.set_footer(Paragraph::with_text("F"));
        let xml = DocxWriter::document_part(&doc);
        assert!(xml.contains("<w:headerReference w:type=\"default\" r:id=\"rId1\"/>"));
        assert!(xml.contains("<w:footerReference w:type=\"default\" r:id=\"rId2\"/>"));
    }

    #[test]
    fn test_document_part_without_header_footer() {
        let xml = DocxWriter::document_part(&Document::new());
        assert!(!xml.contains("headerReference"));
        assert!(!xml.contains("footerReference"));
        assert!(xml.contains("<w:sectPr>"));
    }

    #[test]
    fn test_content_types_overrides() {
        let mut doc = Document::new();
        let xml = content_types(&doc);
        assert!(xml.contains("/word/document.xml"));
        assert!(!xml.contains("/word/header1.xml"));

        doc.set_header(Paragraph::new());
        doc.set_footer(Paragraph::new());
        let xml = content_types(&doc);
        assert!(xml.contains("/word/header1.xml"));
        assert!(xml.contains("/word/footer1.xml"));
    }

    #[test]
    fn test_generate_produces_zip() {
        let mut doc = Document::new();
        doc.set_header(Paragraph::with_text("H"));
        doc.add_paragraph(Paragraph::with_text("body"));
        let bytes = DocxWriter::generate(&doc).unwrap();
        // ZIP local file header magic
        assert_eq!(&bytes[..4], b"PK\x03\x04");

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(names.iter().any(|n| n == "[Content_Types].xml"));
        assert!(names.iter().any(|n| n == "word/document.xml"));
        assert!(names.iter().any(|n| n == "word/header1.xml"));
        assert!(!names.iter().any(|n| n == "word/footer1.xml"));

        let mut part = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("word/document.xml").unwrap(),
            &mut part,
        )
        .unwrap();
        assert!(part.contains("body"));
    }
}
