use crate::bamboo::BambooString;
use crate::error::GrammarError;

/// An anchored regular expression usable in a grammar.
///
/// Author patterns are normalized at construction: a leading `^` is
/// stripped, and the compiled form is wrapped as `^(?:…)` so that matching
/// against the tail of the input anchors the pattern at the scanner
/// position. A pattern that can match the empty string is rejected — an
/// empty match would let a repetition loop without consuming input.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: BambooString,
    regex: regex::Regex,
}

impl Pattern {
    /// Compile an author pattern. The `src` is the bare pattern body, with
    /// or without a leading `^`.
    pub fn new(src: &str) -> Result<Self, GrammarError> {
        let body = src.strip_prefix('^').unwrap_or(src);
        let regex = regex::Regex::new(&format!("^(?:{body})")).map_err(|source| {
            GrammarError::InvalidPattern {
                pattern: src.to_string(),
                source,
            }
        })?;

        if regex.find("").is_some() {
            return Err(GrammarError::EmptyPattern {
                pattern: src.to_string(),
            });
        }

        Ok(Self {
            source: BambooString::new(src),
            regex,
        })
    }

    /// The author-supplied pattern text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length of the anchored match at the start of `rest`, if any.
    pub(crate) fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex.find(rest).map(|found| found.end())
    }
}

/// What the scanner knows how to match: a literal string or an anchored
/// [`Pattern`]. Everything else in a grammar bottoms out in these.
#[derive(Clone)]
pub enum Lexeme {
    Literal(BambooString),
    Pattern(Pattern),
}

impl Lexeme {
    pub(crate) fn match_len(&self, rest: &str) -> Option<usize> {
        match self {
            Lexeme::Literal(literal) => rest.starts_with(literal.as_str()).then(|| literal.len()),
            Lexeme::Pattern(pattern) => pattern.match_len(rest),
        }
    }

    /// Human-readable form, used when reporting expectations.
    pub fn display(&self) -> String {
        match self {
            Lexeme::Literal(literal) => format!("{literal:?}"),
            Lexeme::Pattern(pattern) => format!("/{}/", pattern.source()),
        }
    }
}

impl std::fmt::Debug for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for Lexeme {
    fn from(literal: &str) -> Self {
        assert!(!literal.is_empty(), "grammar literals must be non-empty");
        Lexeme::Literal(BambooString::new(literal))
    }
}

impl From<Pattern> for Lexeme {
    fn from(pattern: Pattern) -> Self {
        Lexeme::Pattern(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexeme, Pattern};
    use crate::error::GrammarError;

    #[test]
    fn anchors_at_the_start() {
        let pattern = Pattern::new(r"\d+").unwrap();
        assert_eq!(pattern.match_len("42abc"), Some(2));
        assert_eq!(pattern.match_len("a42"), None);
    }

    #[test]
    fn strips_leading_caret() {
        let pattern = Pattern::new(r"^[a-z]+").unwrap();
        assert_eq!(pattern.match_len("abc1"), Some(3));
    }

    #[test]
    fn rejects_empty_matches() {
        assert!(matches!(
            Pattern::new(r"\d*"),
            Err(GrammarError::EmptyPattern { .. })
        ));
        assert!(matches!(
            Pattern::new(r"(unclosed"),
            Err(GrammarError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn literal_matching() {
        let lexeme = Lexeme::from("let");
        assert_eq!(lexeme.match_len("lettuce"), Some(3));
        assert_eq!(lexeme.match_len("told"), None);
    }
}
