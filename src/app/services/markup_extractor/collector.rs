//! Flag-driven accumulation of title, address and results text

use super::tokens::MarkupToken;
use crate::app::models::RaceDocument;
use crate::constants::{ADDRESS_ELEMENT, RESULTS_ELEMENT, TITLE_ELEMENT};
use crate::{Error, Result};

/// Collects the text of the three page regions the pipeline cares about
///
/// Text is appended, never replaced: vendors split the results block across
/// several text nodes and sometimes several `<pre>` elements. While inside the
/// results block, nested start tags do not change state. Only the first
/// address element is collected.
#[derive(Debug, Default)]
pub struct TextCollector {
    in_results: bool,
    in_title: bool,
    in_address: bool,
    address_done: bool,
    document: RaceDocument,
}

impl TextCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next token
    pub fn feed(&mut self, token: MarkupToken<'_>) {
        match token {
            MarkupToken::Start(name) => self.on_start(name),
            MarkupToken::End(name) => self.on_end(name),
            MarkupToken::Text(text) => self.on_text(text),
        }
    }

    fn on_start(&mut self, name: &str) {
        if self.in_results {
            return;
        }

        if name.eq_ignore_ascii_case(RESULTS_ELEMENT) {
            self.in_results = true;
        } else if name.eq_ignore_ascii_case(TITLE_ELEMENT) {
            self.in_title = true;
        } else if name.eq_ignore_ascii_case(ADDRESS_ELEMENT) && !self.address_done {
            self.in_address = true;
        }
    }

    fn on_end(&mut self, name: &str) {
        if name.eq_ignore_ascii_case(RESULTS_ELEMENT) {
            self.in_results = false;
        } else if name.eq_ignore_ascii_case(TITLE_ELEMENT) {
            self.in_title = false;
        } else if name.eq_ignore_ascii_case(ADDRESS_ELEMENT) && self.in_address {
            self.in_address = false;
            self.address_done = true;
        }
    }

    fn on_text(&mut self, text: &str) {
        if self.in_results {
            self.document.results_text.push_str(text);
        }
        if self.in_title {
            self.document.title.push_str(text);
        }
        if self.in_address {
            self.document.address_text.push_str(text);
        }
    }

    /// Finish collection; fails when no results text was seen
    pub fn finish(self) -> Result<RaceDocument> {
        if self.document.results_text.trim().is_empty() {
            return Err(Error::NoResultsBlock);
        }
        Ok(self.document)
    }
}
