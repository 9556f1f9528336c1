//! Route patterns and the path matcher.
//!
//! A pattern is literal text with `:name` parameter markers. Matching is a
//! single forward scan over pattern and path at the same time: no regex, no
//! backtracking, O(pattern + path).
//!
//! ```text
//! pattern  /users/:id/posts/:post
//! path     /users/42/posts/hello
//! params   id = "42", post = "hello"
//! ```
//!
//! A parameter value is the longest run of path bytes up to the literal byte
//! that follows the name in the pattern (or the rest of the path when the
//! name ends the pattern). A pattern ending in `/` also matches every path
//! below it, so `/static/` serves `/static/css/site.css`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::params::Params;

pub(crate) const SEPARATOR: u8 = b'/';
pub(crate) const MARKER: u8 = b':';

/// A validated route pattern.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pattern {
    raw: String,
}

impl Pattern {
    /// Validates `raw`.
    ///
    /// Every `:` must be followed by a non-empty name (ASCII letters, digits,
    /// `_`), and a name must not be followed directly by another `:`: two
    /// adjacent parameters cannot be split without backtracking.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let bytes = raw.as_bytes();
        let mut j = 0;
        while j < bytes.len() {
            if bytes[j] != MARKER {
                j += 1;
                continue;
            }
            let end = name_end(bytes, j + 1);
            if end == j + 1 {
                return Err(Error::EmptyParamName { pattern: raw.to_owned(), offset: j });
            }
            if bytes.get(end) == Some(&MARKER) {
                return Err(Error::AdjacentParams {
                    pattern: raw.to_owned(),
                    name: raw[j + 1..end].to_owned(),
                });
            }
            j = end;
        }
        Ok(Self { raw: raw.to_owned() })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `true` when the pattern ends in `/` and so matches whole subtrees.
    /// The root pattern `/` is exact.
    pub fn is_subtree(&self) -> bool {
        self.raw.len() > 1 && self.raw.as_bytes().ends_with(&[SEPARATOR])
    }

    /// Matches `path` against the pattern, returning the captured parameters.
    ///
    /// Pure: the same inputs always give the same result.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let pat = self.raw.as_bytes();
        let bytes = path.as_bytes();
        let mut params = Params::new();
        let (mut i, mut j) = (0, 0);

        while i < bytes.len() {
            if j >= pat.len() {
                return self.is_subtree().then_some(params);
            }

            if pat[j] == MARKER {
                let end = name_end(pat, j + 1);
                let terminator = pat.get(end).copied();
                if terminator == Some(MARKER) {
                    return None;
                }
                let value_end = match terminator {
                    Some(t) => bytes[i..]
                        .iter()
                        .position(|&b| b == t)
                        .map_or(bytes.len(), |n| i + n),
                    None => bytes.len(),
                };
                params.push(&self.raw[j + 1..end], path.get(i..value_end)?);
                i = value_end;
                j = end;
            } else if bytes[i] == pat[j] {
                i += 1;
                j += 1;
            } else {
                return None;
            }
        }

        (j == pat.len()).then_some(params)
    }

    /// Names of the parameters in the pattern, left to right.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        let bytes = self.raw.as_bytes();
        let mut j = 0;
        std::iter::from_fn(move || {
            let start = j + bytes[j..].iter().position(|&b| b == MARKER)? + 1;
            j = name_end(bytes, start);
            Some(&self.raw[start..j])
        })
    }

    /// The pattern with its trailing `/` removed, for subtree patterns.
    pub(crate) fn without_trailing_separator(&self) -> Option<Pattern> {
        let stripped = self.raw.strip_suffix(SEPARATOR as char)?;
        Some(Pattern { raw: stripped.to_owned() })
    }
}

fn name_end(bytes: &[u8], from: usize) -> usize {
    let run = bytes
        .get(from..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    from + run
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(s: &str) -> Pattern {
        Pattern::parse(s).unwrap()
    }

    fn pairs(params: &Params) -> Vec<(&str, &str)> {
        params.iter().collect()
    }

    #[test]
    fn literal_matches_only_itself() {
        let p = pat("/about/team");
        assert!(p.matches("/about/team").unwrap().is_empty());
        assert!(p.matches("/about/tea").is_none());
        assert!(p.matches("/about/teams").is_none());
        assert!(p.matches("/about").is_none());
        assert!(p.matches("").is_none());
    }

    #[test]
    fn empty_pattern_matches_only_empty_path() {
        let p = pat("");
        assert!(p.matches("").is_some());
        assert!(p.matches("/").is_none());
        assert!(p.matches("x").is_none());
    }

    #[test]
    fn root_is_not_a_subtree() {
        let p = pat("/");
        assert!(!p.is_subtree());
        assert!(p.matches("/").is_some());
        assert!(p.matches("/anything").is_none());
    }

    #[test]
    fn captures_named_values() {
        let p = pat("/user/:id");
        assert_eq!(pairs(&p.matches("/user/42").unwrap()), [("id", "42")]);

        let p = pat("/users/:id/posts/:post_id");
        assert_eq!(
            pairs(&p.matches("/users/7/posts/hello-world").unwrap()),
            [("id", "7"), ("post_id", "hello-world")]
        );
    }

    #[test]
    fn value_stops_at_next_literal() {
        let p = pat("/files/:name.:ext");
        assert_eq!(
            pairs(&p.matches("/files/report.pdf").unwrap()),
            [("name", "report"), ("ext", "pdf")]
        );
        // the trailing param swallows everything left, separators included
        assert_eq!(
            pairs(&p.matches("/files/a.b/c").unwrap()),
            [("name", "a"), ("ext", "b/c")]
        );
    }

    #[test]
    fn value_past_segment_fails() {
        let p = pat("/user/:id/profile");
        assert!(p.matches("/user/42/settings").is_none());
        assert!(p.matches("/user/42").is_none());
    }

    #[test]
    fn zero_length_values() {
        // nothing left to scan: the marker is never reached
        assert!(pat("/user/:id").matches("/user/").is_none());
        // a terminator right away yields an empty value
        let p = pat("/a/:x/b");
        assert_eq!(pairs(&p.matches("/a//b").unwrap()), [("x", "")]);
    }

    #[test]
    fn subtree_match() {
        let p = pat("/static/");
        assert!(p.is_subtree());
        assert!(p.matches("/static/css/a.css").unwrap().is_empty());
        assert!(p.matches("/static/").is_some());
        assert!(p.matches("/static").is_none());

        assert!(pat("/static").matches("/static/css/a.css").is_none());
    }

    #[test]
    fn subtree_with_params() {
        let p = pat("/u/:name/");
        assert_eq!(pairs(&p.matches("/u/ann/files/x").unwrap()), [("name", "ann")]);
    }

    #[test]
    fn repeated_name_appends() {
        let p = pat("/:id/x/:id");
        let params = p.matches("/1/x/2").unwrap();
        assert_eq!(params.get_all("id").collect::<Vec<_>>(), ["1", "2"]);
    }

    #[test]
    fn matching_is_repeatable() {
        let p = pat("/user/:id");
        let first = p.matches("/user/9");
        assert_eq!(first, p.matches("/user/9"));
        assert_eq!(first, p.matches("/user/9"));
    }

    #[test]
    fn non_ascii_paths() {
        let p = pat("/wiki/:title/edit");
        assert_eq!(
            pairs(&p.matches("/wiki/café/edit").unwrap()),
            [("title", "café")]
        );
        assert!(pat("/wiki/é").matches("/wiki/è").is_none());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(
            Pattern::parse("/users/:/x"),
            Err(Error::EmptyParamName { offset: 7, .. })
        ));
        assert!(Pattern::parse("/trailing/:").is_err());
        assert!(Pattern::parse("/:-x").is_err());
    }

    #[test]
    fn rejects_adjacent_params() {
        assert!(matches!(
            Pattern::parse("/:a:b"),
            Err(Error::AdjacentParams { name, .. }) if name == "a"
        ));
    }

    #[test]
    fn lists_param_names() {
        let p = pat("/users/:id/posts/:post_id.json");
        assert_eq!(p.param_names().collect::<Vec<_>>(), ["id", "post_id"]);
        assert_eq!(pat("/plain").param_names().count(), 0);
    }

    #[test]
    fn strips_trailing_separator() {
        assert_eq!(pat("/foo/").without_trailing_separator().unwrap().as_str(), "/foo");
        assert_eq!(pat("/").without_trailing_separator().unwrap().as_str(), "");
        assert!(pat("/foo").without_trailing_separator().is_none());
    }
}
