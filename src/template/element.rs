//! Template element vocabulary and attribute access.

use quick_xml::events::BytesStart;

use crate::error::{Error, Result};

/// The closed set of element kinds a proposal template may contain.
///
/// Tag names are matched case-insensitively. Anything outside the vocabulary
/// maps to `Unknown` and is ignored by the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<proposal>` — the root element
    Proposal,
    /// `<title>` — a document title paragraph
    Title,
    /// `<sectiontitle>` — a section heading paragraph
    SectionTitle,
    /// `<sectionparagraph>` — a section body paragraph
    SectionParagraph,
    /// `<section>` — informational grouping, no content of its own
    Section,
    /// `<sectiontable>` — a placeholder table
    SectionTable,
    /// `<pagebreak>` — a forced page break
    PageBreak,
    /// `<linebreak>` — a carriage return within the current paragraph
    LineBreak,
    /// Any tag outside the vocabulary
    Unknown,
}

impl ElementKind {
    /// Classify a raw tag name, case-insensitively.
    pub fn from_tag(tag: &[u8]) -> Self {
        match tag.to_ascii_lowercase().as_slice() {
            b"proposal" => ElementKind::Proposal,
            b"title" => ElementKind::Title,
            b"sectiontitle" => ElementKind::SectionTitle,
            b"sectionparagraph" => ElementKind::SectionParagraph,
            b"section" => ElementKind::Section,
            b"sectiontable" => ElementKind::SectionTable,
            b"pagebreak" => ElementKind::PageBreak,
            b"linebreak" => ElementKind::LineBreak,
            _ => ElementKind::Unknown,
        }
    }

    /// The canonical tag name, used in diagnostics.
    pub fn tag_name(&self) -> &'static str {
        match self {
            ElementKind::Proposal => "proposal",
            ElementKind::Title => "title",
            ElementKind::SectionTitle => "sectiontitle",
            ElementKind::SectionParagraph => "sectionparagraph",
            ElementKind::Section => "section",
            ElementKind::SectionTable => "sectiontable",
            ElementKind::PageBreak => "pagebreak",
            ElementKind::LineBreak => "linebreak",
            ElementKind::Unknown => "unknown",
        }
    }

    /// Whether this element opens a text container (a paragraph that receives
    /// subsequent text and line breaks).
    pub fn is_text_container(&self) -> bool {
        matches!(
            self,
            ElementKind::Title | ElementKind::SectionTitle | ElementKind::SectionParagraph
        )
    }
}

/// Look up an attribute by exact name, unescaping its value.
pub fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::XmlParse(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Look up an attribute that must be present.
pub fn require_attr(e: &BytesStart<'_>, kind: ElementKind, name: &str) -> Result<String> {
    attr(e, name)?.ok_or_else(|| Error::MissingAttribute {
        element: kind.tag_name().to_string(),
        attribute: name.to_string(),
    })
}

/// Look up a required attribute that must parse as a base-10 positive integer.
pub fn positive_int_attr(e: &BytesStart<'_>, kind: ElementKind, name: &str) -> Result<u32> {
    let value = require_attr(e, kind, name)?;
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidAttribute {
            element: kind.tag_name().to_string(),
            attribute: name.to_string(),
            value,
            reason: "must be a positive integer".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_with(tag: &str, attrs: &[(&str, &str)]) -> BytesStart<'static> {
        let mut e = BytesStart::new(tag.to_string());
        for (k, v) in attrs.iter().copied() {
            // Push raw wire bytes so values are stored verbatim, mirroring how
            // the XML reader produces a BytesStart. The `(&str, &str)` overload
            // re-escapes values, which would double-escape entity fixtures.
            e.push_attribute((k.as_bytes(), v.as_bytes()));
        }
        e.into_owned()
    }

    #[test]
    fn test_from_tag_case_insensitive() {
        assert_eq!(ElementKind::from_tag(b"proposal"), ElementKind::Proposal);
        assert_eq!(ElementKind::from_tag(b"PROPOSAL"), ElementKind::Proposal);
        assert_eq!(ElementKind::from_tag(b"Title"), ElementKind::Title);
        assert_eq!(
            ElementKind::from_tag(b"SectionTitle"),
            ElementKind::SectionTitle
        );
        assert_eq!(
            ElementKind::from_tag(b"sectionparagraph"),
            ElementKind::SectionParagraph
        );
        assert_eq!(ElementKind::from_tag(b"PageBreak"), ElementKind::PageBreak);
        assert_eq!(ElementKind::from_tag(b"lineBREAK"), ElementKind::LineBreak);
    }

    #[test]
    fn test_from_tag_unknown() {
        assert_eq!(ElementKind::from_tag(b"toc"), ElementKind::Unknown);
        assert_eq!(ElementKind::from_tag(b""), ElementKind::Unknown);
        assert_eq!(ElementKind::from_tag(b"proposals"), ElementKind::Unknown);
    }

    #[test]
    fn test_is_text_container() {
        assert!(ElementKind::Title.is_text_container());
        assert!(ElementKind::SectionTitle.is_text_container());
        assert!(ElementKind::SectionParagraph.is_text_container());
        assert!(!ElementKind::Proposal.is_text_container());
        assert!(!ElementKind::SectionTable.is_text_container());
        assert!(!ElementKind::Unknown.is_text_container());
    }

    #[test]
    fn test_attr_lookup() {
        let e = start_with("proposal", &[("docName", "out.docx")]);
        assert_eq!(attr(&e, "docName").unwrap().as_deref(), Some("out.docx"));
        assert_eq!(attr(&e, "headerValue").unwrap(), None);
        // Attribute names are exact, not case-folded
        assert_eq!(attr(&e, "docname").unwrap(), None);
    }

    #[test]
    fn test_attr_unescapes_entities() {
        // Values are stored in their wire form; lookup unescapes them
        let e = start_with("proposal", &[("headerValue", "a &amp; b")]);
        assert_eq!(
            attr(&e, "headerValue").unwrap().as_deref(),
            Some("a & b")
        );
    }

    #[test]
    fn test_require_attr() {
        let e = start_with("proposal", &[("docName", "out.docx")]);
        assert_eq!(
            require_attr(&e, ElementKind::Proposal, "docName").unwrap(),
            "out.docx"
        );

        let err = require_attr(&e, ElementKind::Proposal, "headerValue").unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { .. }));
    }

    #[test]
    fn test_positive_int_attr() {
        let e = start_with("sectiontable", &[("rows", "3"), ("cols", "0"), ("bad", "x")]);
        assert_eq!(
            positive_int_attr(&e, ElementKind::SectionTable, "rows").unwrap(),
            3
        );
        assert!(matches!(
            positive_int_attr(&e, ElementKind::SectionTable, "cols"),
            Err(Error::InvalidAttribute { .. })
        ));
        assert!(matches!(
            positive_int_attr(&e, ElementKind::SectionTable, "bad"),
            Err(Error::InvalidAttribute { .. })
        ));
        assert!(matches!(
            positive_int_attr(&e, ElementKind::SectionTable, "missing"),
            Err(Error::MissingAttribute { .. })
        ));
    }
}
