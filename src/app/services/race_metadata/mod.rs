//! Race name and date resolution
//!
//! The race name comes from the page title; the race date from the address
//! block, or from the first results line for vendors that print it there.

pub mod date_patterns;

#[cfg(test)]
pub mod tests;

pub use date_patterns::{find_date, month_number};

use crate::app::models::{RaceDocument, RaceMetadata};
use crate::constants::TITLE_SEPARATOR;
use crate::{Error, Result};
use tracing::debug;

/// Resolve race name and date from extracted page text
pub fn resolve(title: &str, address_text: &str, first_results_line: &str) -> Result<RaceMetadata> {
    let name = race_name(title)?;

    let address = collapse_whitespace(address_text);
    let date = match find_date(&address) {
        Some(date) => date,
        None => {
            debug!("No date in address block, trying first results line");
            find_date(first_results_line).ok_or_else(|| {
                Error::date_not_found(format!(
                    "address '{}' and results line '{}'",
                    address,
                    first_results_line.trim()
                ))
            })?
        }
    };

    Ok(RaceMetadata { name, date })
}

/// Resolve metadata for a whole extracted document
pub fn resolve_document(document: &RaceDocument) -> Result<RaceMetadata> {
    resolve(
        &document.title,
        &document.address_text,
        document.first_results_line(),
    )
}

/// Last colon-delimited segment of the title, trimmed
pub fn race_name(title: &str) -> Result<String> {
    let name = title
        .rsplit(TITLE_SEPARATOR)
        .next()
        .map(str::trim)
        .unwrap_or("");

    if name.is_empty() {
        return Err(Error::TitleNotFound);
    }

    Ok(name.to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
