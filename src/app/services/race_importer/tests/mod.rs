//! Shared fixtures for race import tests


use crate::app::adapters::fetcher::RaceFetcher;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;

pub fn create_page(title: &str, date: &str, rows: &str) -> Vec<u8> {
    format!(
        "<html><head><title>{title}</title></head><body>\
         <address>Quidi Vidi Lake, St. John's<br>\n{date}</address>\
         <pre>\nPl.  Bib Name                 Sex/Pl  Cat/Pl   Time\n{rows}</pre>\
         </body></html>"
    )
    .into_bytes()
}

pub const APRIL_ROWS: &str = "\
  1.  201 JORDAN FEWER         M/1     20-29/1  15:45
  2.  214 PATRICK O'GRADY      M/2     U20/1    16:51
  3.  230 JOE DUNFORD          M/3     40-49/1  17:10
";

pub const LATE_APRIL_ROWS: &str = "\
  1.  214 PATRICK O'GRADY      M/1     U20/1    16:40
  2.  201 JORDAN FEWER         M/2     20-29/1  16:02
  3.  230 JOE DUNFORD          M/3     50-59/1  17:05
  4.  230 JOE DUNFORD          M/4     20-29/2  19:30
";

pub fn april_page() -> Vec<u8> {
    create_page("NLAA: Flat Out 5 km", "April 12th, 2015", APRIL_ROWS)
}

pub fn late_april_page() -> Vec<u8> {
    create_page("NLAA: Harbour Run", "April 26th, 2015", LATE_APRIL_ROWS)
}

/// Serves canned pages keyed by source
pub struct CannedFetcher {
    pages: HashMap<String, Vec<u8>>,
}

impl CannedFetcher {
    pub fn new(pages: &[(&str, Vec<u8>)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(source, page)| (source.to_string(), page.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl RaceFetcher for CannedFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        self.pages
            .get(source)
            .cloned()
            .ok_or_else(|| Error::fetch(source, "HTTP status 404 Not Found"))
    }
}
