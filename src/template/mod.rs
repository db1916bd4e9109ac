//! Proposal template parsing.
//!
//! This module consumes the template's XML event stream and builds a
//! [`crate::model::Document`], one event at a time, with no lookahead and no
//! backtracking. State is a single "current text container" slot: opening a
//! new text-bearing element forgets the previous one, so nesting text-bearing
//! elements is not supported.

mod element;
mod parser;

pub use element::ElementKind;
pub use parser::{
    Proposal, TemplateParser, CELL_TEMPLATE_TEXT, FOOTER_TEXT, HEADER_FONT, HEADER_FONT_SIZE,
};
