//! Line matchers, one per timing-vendor layout
//!
//! Each matcher recognizes the structural shape of a finisher line and hands
//! back the raw named fields. Matchers never validate field values; that is
//! left to [`super::field_parsers`].

use crate::app::services::age_categories::category_pattern;
use regex::Regex;
use std::sync::LazyLock;

const NAME: &str = r"(?P<name>\S+(?: \S+)*)";
const TIME: &str = r"\d{1,2}(?::\d{2}){1,2}(?:\.\d+)?";

/// Raw named fields captured from one finisher line (or line pair)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub position: &'a str,
    pub bib_number: &'a str,
    pub name: &'a str,
    pub time: &'a str,
    pub chip_time: Option<&'a str>,
    pub sex: &'a str,
    pub sex_position: Option<&'a str>,
    pub age_category: &'a str,
    pub age_category_position: &'a str,
}

/// Structural matcher for one vendor's finisher line layout
pub trait LineMatcher: Send + Sync {
    /// Short layout name used in statistics and logs
    fn name(&self) -> &'static str;

    /// Number of physical lines one record spans
    fn span(&self) -> usize {
        1
    }

    /// Try to decompose `text` into fields; multi-line records are joined by `\n`
    fn try_match<'a>(&self, text: &'a str) -> Option<RawFields<'a>>;
}

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("line pattern is valid")
}

fn capture_fields<'a>(regex: &Regex, text: &'a str) -> Option<RawFields<'a>> {
    let captures = regex.captures(text)?;
    let field = |name: &str| captures.name(name).map(|m| m.as_str());

    Some(RawFields {
        position: field("position")?,
        bib_number: field("bib").unwrap_or(""),
        name: field("name")?,
        time: field("time")?,
        chip_time: field("chip_time"),
        sex: field("sex")?,
        sex_position: field("sex_position"),
        age_category: field("category")?,
        age_category_position: field("category_position").unwrap_or(""),
    })
}

// =============================================================================
// Sex-bracket layout
// =============================================================================

//    1   101 JORDAN FEWER          15:45  M(1/52)  20-29  1/12
static SEX_BRACKET: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"^\s*(?P<position>\d+)\s+(?P<bib>\d+)\s+{NAME}\s{{2,}}(?P<time>{TIME})\s+(?P<sex>[A-Za-z])\(\s*(?P<sex_position>\d+)[^)]*\)\s+(?P<category>{cat})\s+(?P<category_position>\d+)\b.*$",
        cat = category_pattern()
    ))
});

/// Position, bib, name, time, `M(sexpos/total)`, category, category position
pub struct SexBracketMatcher;

impl LineMatcher for SexBracketMatcher {
    fn name(&self) -> &'static str {
        "sex-bracket"
    }

    fn try_match<'a>(&self, text: &'a str) -> Option<RawFields<'a>> {
        capture_fields(&SEX_BRACKET, text)
    }
}

// =============================================================================
// Chip-time layout
// =============================================================================

//   25  3662 MARY SMITH             49:31    49:25 F    22 30-39     8
static CHIP_TIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"^\s*(?P<position>\d+)\s+(?P<bib>\d+)\s+{NAME}\s{{2,}}(?P<time>{TIME})\s+(?:(?P<chip_time>{TIME})\s+)?(?P<sex>[A-Za-z])\s+(?P<sex_position>\d+)\s+(?P<category>{cat})\s+(?P<category_position>\d+)\s*$",
        cat = category_pattern()
    ))
});

/// Gun time followed by an optional chip time, then sex and category columns
pub struct ChipTimeMatcher;

impl LineMatcher for ChipTimeMatcher {
    fn name(&self) -> &'static str {
        "chip-time"
    }

    fn try_match<'a>(&self, text: &'a str) -> Option<RawFields<'a>> {
        capture_fields(&CHIP_TIME, text)
    }
}

// =============================================================================
// Slash-pairs layout
// =============================================================================

//   3.  214 PATRICK O'GRADY     M/3    U20/1     16:51
static SLASH_PAIRS: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"^\s*(?P<position>\d+)\.?\s+(?P<bib>\d+)\s+{NAME}\s{{2,}}(?P<sex>[A-Za-z])/(?P<sex_position>\d+)\s+(?P<category>{cat})/(?P<category_position>\d+)\s+(?P<time>{TIME})\s*$",
        cat = category_pattern()
    ))
});

/// Sex and category each paired with their positions as `X/n`, time last
pub struct SlashPairsMatcher;

impl LineMatcher for SlashPairsMatcher {
    fn name(&self) -> &'static str {
        "slash-pairs"
    }

    fn try_match<'a>(&self, text: &'a str) -> Option<RawFields<'a>> {
        capture_fields(&SLASH_PAIRS, text)
    }
}

// =============================================================================
// Pace layout
// =============================================================================

//    1 JOE DUNFORD              412 M 40-49    1   35:10  5:40/km
static PACE: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"^\s*(?P<position>\d+)\s+{NAME}\s{{2,}}(?P<bib>\d+)\s+(?P<sex>[A-Za-z])\s+(?P<category>{cat})\s+(?P<category_position>\d+)\s+(?P<time>{TIME})\s+\d{{1,2}}:\d{{2}}(?:/\w+)?\s*$",
        cat = category_pattern()
    ))
});

/// Name before bib, trailing pace column, no sex position
pub struct PaceMatcher;

impl LineMatcher for PaceMatcher {
    fn name(&self) -> &'static str {
        "pace"
    }

    fn try_match<'a>(&self, text: &'a str) -> Option<RawFields<'a>> {
        capture_fields(&PACE, text)
    }
}

// =============================================================================
// Two-line layout
// =============================================================================

//    1   57 ANDREA WEBB
//           18:22 F 1 30-39 1
static TWO_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"^\s*(?P<position>\d+)\s+(?P<bib>\d+)\s+{NAME}[ \t]*\n\s+(?P<time>{TIME})\s+(?P<sex>[A-Za-z])\s+(?P<sex_position>\d+)\s+(?P<category>{cat})\s+(?P<category_position>\d+)\s*$",
        cat = category_pattern()
    ))
});

/// Position, bib and name on one line; time, sex and category on the next
pub struct TwoLineMatcher;

impl LineMatcher for TwoLineMatcher {
    fn name(&self) -> &'static str {
        "two-line"
    }

    fn span(&self) -> usize {
        2
    }

    fn try_match<'a>(&self, text: &'a str) -> Option<RawFields<'a>> {
        capture_fields(&TWO_LINE, text)
    }
}

/// All matchers in priority order
pub fn default_matchers() -> Vec<Box<dyn LineMatcher>> {
    vec![
        Box::new(SexBracketMatcher),
        Box::new(ChipTimeMatcher),
        Box::new(SlashPairsMatcher),
        Box::new(PaceMatcher),
        Box::new(TwoLineMatcher),
    ]
}
