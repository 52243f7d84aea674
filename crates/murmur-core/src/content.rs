//! Content acceptance rules for submitted posts.
//!
//! `validate_content` is the authoritative check: it runs server-side on
//! every submission. Clients may run their own advisory pre-check to disable
//! a submit button early; the two are allowed to disagree and only this one
//! decides.

/// Inclusive lower bound on word count.
///
/// Unreachable today given the empty check, kept as an explicit floor so a
/// future threshold change is a one-line edit.
pub const MIN_WORDS: usize = 1;

/// Inclusive upper bound on word count
pub const MAX_WORDS: usize = 200;

/// Substrings that cause automatic rejection. Matched against the
/// lower-cased trimmed text; first match wins.
pub const DENYLIST: [&str; 5] = ["spam", "advertisement", "promotion", "buy now", "click here"];

/// Why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContentRejection {
    #[error("Content cannot be empty")]
    Empty,

    #[error("Minimum 1 word required")]
    TooFewWords,

    #[error("Maximum 200 words allowed")]
    TooManyWords,

    #[error("Content appears to be spam")]
    Spam,
}

impl ContentRejection {
    /// Stable code string for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY_CONTENT",
            Self::TooFewWords => "TOO_FEW_WORDS",
            Self::TooManyWords => "TOO_MANY_WORDS",
            Self::Spam => "SPAM_CONTENT",
        }
    }
}

/// Validate raw submitted text and produce its normalized stored form.
///
/// Trims surrounding whitespace, counts words on whitespace runs, applies
/// the word-count bounds and the denylist, and on acceptance returns the
/// trimmed text with all markup stripped.
pub fn validate_content(raw: &str) -> Result<String, ContentRejection> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ContentRejection::Empty);
    }

    let word_count = trimmed.split_whitespace().count();
    if word_count < MIN_WORDS {
        return Err(ContentRejection::TooFewWords);
    }
    if word_count > MAX_WORDS {
        return Err(ContentRejection::TooManyWords);
    }

    let lowered = trimmed.to_lowercase();
    if DENYLIST.iter().any(|needle| lowered.contains(needle)) {
        return Err(ContentRejection::Spam);
    }

    Ok(strip_markup(trimmed))
}

/// HTML-neutralizing transform applied to accepted content.
///
/// Contract: anything that parses as a tag (`<` followed by a letter, `/`,
/// or `!`, through the closing `>`) is removed along with its attributes;
/// text outside tags is kept verbatim. No entity decoding, no allowlist -
/// the stored form is plain text only. A `<` that does not open a tag is
/// kept as literal text; an unterminated tag is dropped through end of
/// input rather than leaking attribute text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        let (before, tail) = rest.split_at(lt);
        out.push_str(before);

        let opens_tag = tail[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');

        if !opens_tag {
            out.push('<');
            rest = &tail[1..];
            continue;
        }

        match tail.find('>') {
            Some(gt) => rest = &tail[gt + 1..],
            None => {
                // Unterminated tag: nothing left that is safely text
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_text() {
        let normalized = validate_content("  this is fine  ").unwrap();
        assert_eq!(normalized, "this is fine");
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(validate_content(""), Err(ContentRejection::Empty));
        assert_eq!(validate_content("   \n\t "), Err(ContentRejection::Empty));
    }

    #[test]
    fn test_rejects_too_many_words() {
        let long = "word ".repeat(MAX_WORDS + 1);
        assert_eq!(validate_content(&long), Err(ContentRejection::TooManyWords));
    }

    #[test]
    fn test_accepts_exactly_max_words() {
        let exact = "word ".repeat(MAX_WORDS);
        assert!(validate_content(&exact).is_ok());
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        assert_eq!(
            validate_content("Totally legit, BUY NOW while it lasts"),
            Err(ContentRejection::Spam)
        );
        assert_eq!(
            validate_content("this Advertisement pays my rent"),
            Err(ContentRejection::Spam)
        );
    }

    #[test]
    fn test_denylist_matches_substrings() {
        // "promotional" contains "promotion"
        assert_eq!(
            validate_content("got a promotional email today"),
            Err(ContentRejection::Spam)
        );
    }

    #[test]
    fn test_strips_markup_on_accept() {
        let normalized = validate_content("<b>hello</b> <img src=x onerror=alert(1)> world").unwrap();
        assert_eq!(normalized, "hello  world");
    }

    #[test]
    fn test_strip_markup_keeps_bare_angle_brackets() {
        assert_eq!(strip_markup("2 < 3 and 3 > 2"), "2 < 3 and 3 > 2");
        assert_eq!(strip_markup("a <b c"), "a ");
        assert_eq!(strip_markup("<!-- note -->kept"), "kept");
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(ContentRejection::Empty.to_string(), "Content cannot be empty");
        assert_eq!(ContentRejection::TooManyWords.to_string(), "Maximum 200 words allowed");
        assert_eq!(ContentRejection::Spam.to_string(), "Content appears to be spam");
    }
}
