//! Heuristic menu-text extraction.
//!
//! Turns raw OCR output (multi-line text) into structured name/price
//! candidates. This is a best-effort parser, not a grammar: accuracy depends
//! entirely on upstream OCR quality, and it is insensitive to whatever image
//! pre-processing (grayscale conversion etc.) happened before the text
//! reached us. Unparseable input yields an empty list, never an error.
//!
//! The pipeline runs a fixed sequence of stages per line — trim, junk
//! filter, decoration strip, price match (with a one-line lookahead for
//! prices printed on their own line), name cleanup, validation. Each stage
//! lives in its own module so the individual heuristics stay testable.

mod extract;
mod filter;
mod price;

use rust_decimal::Decimal;
use serde::Serialize;

pub use extract::extract_items;

/// A structured menu-item candidate produced by [`extract_items`].
///
/// `description` is always empty today; the field exists so bulk insertion
/// into the menu store carries the same shape as manually-added items.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemCandidate {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}
