//! Classification of concrete path segments against wildcard kinds.
//!
//! A segment taken from a real URL may be compatible with several wildcard
//! slots at once: `42` could fill `{i}`, `{f}` or `{s}`. [`classify`] scans
//! the segment once and reports which of them remain possible. Matching a
//! registered literal child is handled by the trie itself and is not part of
//! the result.
//!
//! Rules, applied per character:
//!
//! - a letter (Unicode `L*`) rules out integer and float;
//! - punctuation (`P*`), symbols (`S*`) and whitespace rule out integer; a
//!   second `.` additionally rules out float;
//! - anything else that is not a number (`N*`) rules out integer and float.
//!   Combining marks, format and private-use characters fall here.
//!
//! String is always possible.

use unicode_general_category::{get_general_category, GeneralCategory};

use super::kind::ParamKind;

/// The wildcard kinds a segment is textually compatible with.
///
/// # Examples
///
/// ```
/// use quark_http::urls::classifier::classify;
/// use quark_http::urls::kind::ParamKind;
///
/// let kinds: Vec<ParamKind> = classify("123.5").iter().collect();
/// assert_eq!(kinds, vec![ParamKind::Float, ParamKind::String]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    integer: bool,
    float: bool,
}

impl Candidates {
    /// Returns `true` if the segment may fill a slot of `kind`.
    pub const fn contains(self, kind: ParamKind) -> bool {
        match kind {
            ParamKind::Integer => self.integer,
            ParamKind::Float => self.float,
            ParamKind::String => true,
        }
    }

    /// Iterates the compatible kinds in priority order: integer, float, string.
    pub fn iter(self) -> impl Iterator<Item = ParamKind> {
        ParamKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

/// Computes the wildcard kinds `segment` may match. Pure and total.
pub fn classify(segment: &str) -> Candidates {
    let mut candidates = Candidates {
        integer: true,
        float: true,
    };
    let mut dots = 0;

    for c in segment.chars() {
        if is_letter(c) {
            candidates.integer = false;
            candidates.float = false;
        } else if is_punctuation_or_symbol(c) {
            candidates.integer = false;
            if c == '.' {
                dots += 1;
                if dots > 1 {
                    candidates.float = false;
                }
            }
        } else if !c.is_numeric() {
            candidates.integer = false;
            candidates.float = false;
        }
    }

    candidates
}

fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Punctuation, symbol, or whitespace.
fn is_punctuation_or_symbol(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            get_general_category(c),
            GeneralCategory::ConnectorPunctuation
                | GeneralCategory::DashPunctuation
                | GeneralCategory::OpenPunctuation
                | GeneralCategory::ClosePunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
                | GeneralCategory::OtherPunctuation
                | GeneralCategory::MathSymbol
                | GeneralCategory::CurrencySymbol
                | GeneralCategory::ModifierSymbol
                | GeneralCategory::OtherSymbol
        )
}
