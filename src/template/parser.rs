//! Proposal template parser implementation.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::model::{
    Block, Document, Paragraph, StyleFlag, Table, TextAlignment, TextRun, TextStyle,
};

use super::element::{attr, positive_int_attr, require_attr, ElementKind};

/// Font family used for the generated page header.
pub const HEADER_FONT: &str = "Times New Roman";

/// Point size used for the generated page header.
pub const HEADER_FONT_SIZE: u32 = 7;

/// Fixed text placed in the page footer.
pub const FOOTER_TEXT: &str = "template text, replace with page nbr";

/// Placeholder text pre-filled into every generated table cell.
pub const CELL_TEMPLATE_TEXT: &str = " cell template ";

/// Line spacing multiplier applied to every text container.
const CONTAINER_SPACING: f64 = 2.0;

/// A parsed proposal template: the output document plus the file name it
/// should be written to.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Output file name, from the root element's `docName` attribute.
    pub doc_name: String,
    /// The document built from the template.
    pub document: Document,
}

/// Parser for proposal template XML.
pub struct TemplateParser {
    xml: String,
}

impl TemplateParser {
    /// Open a template file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Ok(Self { xml })
    }

    /// Create a parser from an XML string.
    pub fn from_str(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }

    /// Parse the template and return the resulting proposal.
    ///
    /// This is a single forward pass over the event stream: each event
    /// mutates the in-progress document and nothing is revisited.
    pub fn parse(&self) -> Result<Proposal> {
        let mut reader = quick_xml::Reader::from_str(&self.xml);
        reader.config_mut().trim_text(true);

        let mut session = Session::new();
        let mut buf = Vec::new();

        log::debug!("starting template parse");
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => session.handle_start(e)?,
                Ok(Event::Empty(ref e)) => session.handle_start(e)?,
                Ok(Event::Text(ref e)) => {
                    let text = e.unescape().unwrap_or_default();
                    session.handle_text(&text);
                }
                Ok(Event::End(ref e)) => {
                    log::debug!(
                        "element <{}> is going out of scope",
                        String::from_utf8_lossy(e.name().as_ref())
                    );
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        session.finish()
    }
}

/// Mutable state for one pass over the template.
///
/// `current` holds the index of the most recently opened text container in
/// the document body, or `None` before the first one. There is no container
/// stack: opening a new text container forgets the previous one, so nested
/// text-bearing elements are not supported.
struct Session {
    document: Document,
    doc_name: Option<String>,
    current: Option<usize>,
}

impl Session {
    fn new() -> Self {
        Self {
            document: Document::new(),
            doc_name: None,
            current: None,
        }
    }

    /// Dispatch one element-start (or self-closing element) event.
    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let kind = ElementKind::from_tag(e.local_name().as_ref());
        match kind {
            ElementKind::Proposal => self.handle_proposal(e),
            ElementKind::Title | ElementKind::SectionTitle | ElementKind::SectionParagraph => {
                self.open_text_container(e, kind)
            }
            ElementKind::Section => {
                log::info!("beginning new section");
                Ok(())
            }
            ElementKind::SectionTable => self.handle_table(e),
            ElementKind::PageBreak => {
                self.document.push_block(Block::PageBreak);
                Ok(())
            }
            ElementKind::LineBreak => {
                self.handle_line_break();
                Ok(())
            }
            ElementKind::Unknown => {
                log::debug!(
                    "ignoring unknown element <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                );
                Ok(())
            }
        }
    }

    /// Root element: record the output name and install header and footer
    /// before any body content exists.
    fn handle_proposal(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let doc_name = require_attr(e, ElementKind::Proposal, "docName")?;
        log::info!("generating document '{}'", doc_name);
        self.doc_name = Some(doc_name);

        let header_text = attr(e, "headerValue")?
            .map(|v| v.to_uppercase())
            .unwrap_or_default();
        let mut header = Paragraph::new();
        header.add_run(TextRun::styled(
            header_text,
            TextStyle::with_font(HEADER_FONT, HEADER_FONT_SIZE),
        ));
        self.document.set_header(header);

        let mut footer = Paragraph::with_text(FOOTER_TEXT);
        footer.alignment = TextAlignment::Center;
        self.document.set_footer(footer);

        Ok(())
    }

    /// Open a new text container paragraph, replacing whatever container was
    /// open before.
    fn open_text_container(&mut self, e: &BytesStart<'_>, kind: ElementKind) -> Result<()> {
        let mut para = Paragraph::new();
        para.alignment = attr(e, "alignment")?
            .map(|v| TextAlignment::parse(&v))
            .unwrap_or_default();
        para.spacing = Some(CONTAINER_SPACING);

        let style = TextStyle {
            font: Some(require_attr(e, kind, "fontName")?),
            size: Some(positive_int_attr(e, kind, "fontSize")?),
            flag: StyleFlag::parse(&require_attr(e, kind, "fontStyle")?),
        };
        para.add_run(TextRun::styled("", style));

        self.current = Some(self.document.add_paragraph(para));
        Ok(())
    }

    /// Create a rows × cols placeholder table. Leaves the current text
    /// container untouched.
    fn handle_table(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let rows = positive_int_attr(e, ElementKind::SectionTable, "rows")?;
        let cols = positive_int_attr(e, ElementKind::SectionTable, "cols")?;
        log::debug!("creating {}x{} placeholder table", rows, cols);
        self.document
            .add_table(Table::filled(rows, cols, CELL_TEMPLATE_TEXT));
        Ok(())
    }

    /// Append a carriage return to the open container's first run; a no-op
    /// when no container is open.
    fn handle_line_break(&mut self) {
        if let Some(run) = self.current_run() {
            run.text.push('\r');
        }
    }

    /// Text content overwrites the first run of the open container. Without
    /// an open container (or a run in it) the content is dropped.
    fn handle_text(&mut self, text: &str) {
        if let Some(run) = self.current_run() {
            run.text = text.to_string();
        }
    }

    /// The first run of the current text container, if any.
    fn current_run(&mut self) -> Option<&mut TextRun> {
        let idx = self.current?;
        match self.document.content.get_mut(idx) {
            Some(Block::Paragraph(para)) => para.runs.first_mut(),
            _ => None,
        }
    }

    /// End of stream: a template without a root element never recorded an
    /// output name and cannot be finalized.
    fn finish(self) -> Result<Proposal> {
        let doc_name = self.doc_name.ok_or(Error::MissingRoot)?;
        log::debug!(
            "template parse complete, {} body blocks",
            self.document.len()
        );
        Ok(Proposal {
            doc_name,
            document: self.document,
        })
    }
}
