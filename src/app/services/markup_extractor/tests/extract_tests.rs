//! Tests for page extraction over real markup

use super::*;
use crate::Error;
use crate::app::services::markup_extractor::extract;

#[test]
fn test_extract_page_regions() {
    let page = create_test_page(
        "NLAA Results: Flat Out 5 km Road Race",
        "Quidi Vidi Lake\nApril 12th, 2015",
        TEST_RESULTS,
    );

    let document = extract(page.as_bytes()).unwrap();

    assert_eq!(document.title, "NLAA Results: Flat Out 5 km Road Race");
    assert!(document.address_text.contains("April 12th, 2015"));
    assert!(document.results_text.contains("JORDAN FEWER"));
    assert!(document.first_results_line().starts_with("Pos"));
}

#[test]
fn test_extract_decodes_entities_in_results() {
    let page = create_test_page("Meet: Race", "May 3, 2015", "Pos Name\n1 &amp; 2\n");

    let document = extract(page.as_bytes()).unwrap();
    assert!(document.results_text.contains("1 & 2"));
}

#[test]
fn test_extract_keeps_text_of_links_inside_results() {
    let page = create_test_page(
        "Meet: Race",
        "May 3, 2015",
        "Pos Name\n1   101 <a href=\"/r/101\">JANE DOE</a>   17:02\n",
    );

    let document = extract(page.as_bytes()).unwrap();
    assert!(document.results_text.contains("1   101 JANE DOE   17:02"));
}

#[test]
fn test_extract_without_results_block() {
    let page = "<html><head><title>Meet: Race</title></head><body><p>none</p></body></html>";

    let result = extract(page.as_bytes());
    assert!(matches!(result, Err(Error::NoResultsBlock)));
}

#[test]
fn test_extract_tolerates_invalid_utf8() {
    let mut raw = create_test_page("Meet: Race", "May 3, 2015", TEST_RESULTS).into_bytes();
    raw.insert(10, 0xE9);

    let document = extract(&raw).unwrap();
    assert!(document.results_text.contains("JORDAN FEWER"));
}

#[test]
fn test_extract_survives_deeply_nested_markup() {
    let depth = 30_000;
    let page = format!(
        "<html><head><title>Meet: Deep Race</title></head><body>{}\
         <pre>Pos\n1 2 A B  15:45  M(1/2)  20-29  1\n</pre>{}</body></html>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );

    let document = extract(page.as_bytes()).unwrap();

    assert_eq!(document.title, "Meet: Deep Race");
    assert!(document.results_text.contains("15:45"));
}

#[test]
fn test_tokens_arrive_in_document_order() {
    use crate::app::services::markup_extractor::{MarkupToken, tokens::walk_document};
    use scraper::Html;

    let document = Html::parse_document(
        "<html><head><title>T</title></head><body><pre>a<b>b</b>c</pre></body></html>",
    );
    let mut seen = Vec::new();
    walk_document(&document, &mut |token| {
        if !matches!(token, MarkupToken::Text(text) if text.trim().is_empty()) {
            seen.push(token);
        }
    });

    assert_eq!(
        seen,
        vec![
            MarkupToken::Start("html"),
            MarkupToken::Start("head"),
            MarkupToken::Start("title"),
            MarkupToken::Text("T"),
            MarkupToken::End("title"),
            MarkupToken::End("head"),
            MarkupToken::Start("body"),
            MarkupToken::Start("pre"),
            MarkupToken::Text("a"),
            MarkupToken::Start("b"),
            MarkupToken::Text("b"),
            MarkupToken::End("b"),
            MarkupToken::Text("c"),
            MarkupToken::End("pre"),
            MarkupToken::End("body"),
            MarkupToken::End("html"),
        ]
    );
}
