//! Markup text extraction for race result pages
//!
//! Turns the raw bytes of a result page into a [`RaceDocument`]: the page
//! title, the address-like metadata block and the preformatted results text.
//!
//! ## Architecture
//!
//! - [`tokens`] - depth-first start/end/text token stream over the parsed page
//! - [`collector`] - flag-driven accumulation of the three text regions

pub mod collector;
pub mod tokens;

#[cfg(test)]
pub mod tests;

pub use collector::TextCollector;
pub use tokens::MarkupToken;

use crate::Result;
use crate::app::models::RaceDocument;
use scraper::Html;
use tracing::debug;

/// Extract title, address and results text from raw page bytes
///
/// Invalid UTF-8 is replaced rather than rejected; vendor pages are frequently
/// served as Latin-1.
pub fn extract(raw: &[u8]) -> Result<RaceDocument> {
    let markup = String::from_utf8_lossy(raw);
    let document = Html::parse_document(&markup);

    let mut collector = TextCollector::new();
    tokens::walk_document(&document, &mut |token| collector.feed(token));

    let race_document = collector.finish()?;
    debug!(
        "Extracted page: title {} chars, address {} chars, results {} lines",
        race_document.title.len(),
        race_document.address_text.len(),
        race_document.results_text.lines().count()
    );

    Ok(race_document)
}
