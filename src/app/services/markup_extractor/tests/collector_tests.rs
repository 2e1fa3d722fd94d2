//! Tests for the token-driven text collector

use crate::Error;
use crate::app::services::markup_extractor::{MarkupToken, TextCollector};

fn collect(tokens: &[MarkupToken<'_>]) -> TextCollector {
    let mut collector = TextCollector::new();
    for token in tokens {
        collector.feed(*token);
    }
    collector
}

#[test]
fn test_results_text_is_appended_across_nodes() {
    let collector = collect(&[
        MarkupToken::Start("pre"),
        MarkupToken::Text("1  101 "),
        MarkupToken::Start("a"),
        MarkupToken::Text("JORDAN FEWER"),
        MarkupToken::End("a"),
        MarkupToken::Text("  15:45\n"),
        MarkupToken::End("pre"),
    ]);

    let document = collector.finish().unwrap();
    assert_eq!(document.results_text, "1  101 JORDAN FEWER  15:45\n");
}

#[test]
fn test_multiple_results_blocks_concatenate() {
    let collector = collect(&[
        MarkupToken::Start("pre"),
        MarkupToken::Text("first\n"),
        MarkupToken::End("pre"),
        MarkupToken::Start("p"),
        MarkupToken::Text("between"),
        MarkupToken::End("p"),
        MarkupToken::Start("pre"),
        MarkupToken::Text("second\n"),
        MarkupToken::End("pre"),
    ]);

    let document = collector.finish().unwrap();
    assert_eq!(document.results_text, "first\nsecond\n");
}

#[test]
fn test_nested_title_tag_inside_results_is_ignored() {
    let collector = collect(&[
        MarkupToken::Start("pre"),
        MarkupToken::Start("title"),
        MarkupToken::Text("not a title"),
        MarkupToken::End("title"),
        MarkupToken::End("pre"),
    ]);

    let document = collector.finish().unwrap();
    assert_eq!(document.title, "");
    assert_eq!(document.results_text, "not a title");
}

#[test]
fn test_only_first_address_is_collected() {
    let collector = collect(&[
        MarkupToken::Start("address"),
        MarkupToken::Text("St. John's, "),
        MarkupToken::Start("b"),
        MarkupToken::Text("April 12th, 2015"),
        MarkupToken::End("b"),
        MarkupToken::End("address"),
        MarkupToken::Start("address"),
        MarkupToken::Text("webmaster@example.org"),
        MarkupToken::End("address"),
        MarkupToken::Start("pre"),
        MarkupToken::Text("rows"),
        MarkupToken::End("pre"),
    ]);

    let document = collector.finish().unwrap();
    assert_eq!(document.address_text, "St. John's, April 12th, 2015");
}

#[test]
fn test_tag_names_match_case_insensitively() {
    let collector = collect(&[
        MarkupToken::Start("TITLE"),
        MarkupToken::Text("Meet: Race"),
        MarkupToken::End("TITLE"),
        MarkupToken::Start("PRE"),
        MarkupToken::Text("rows"),
        MarkupToken::End("PRE"),
    ]);

    let document = collector.finish().unwrap();
    assert_eq!(document.title, "Meet: Race");
    assert_eq!(document.results_text, "rows");
}

#[test]
fn test_missing_results_block_fails() {
    let collector = collect(&[
        MarkupToken::Start("title"),
        MarkupToken::Text("Meet: Race"),
        MarkupToken::End("title"),
    ]);

    assert!(matches!(collector.finish(), Err(Error::NoResultsBlock)));
}

#[test]
fn test_whitespace_only_results_block_fails() {
    let collector = collect(&[
        MarkupToken::Start("pre"),
        MarkupToken::Text("\n   \n"),
        MarkupToken::End("pre"),
    ]);

    assert!(matches!(collector.finish(), Err(Error::NoResultsBlock)));
}
