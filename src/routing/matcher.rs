//! Pattern matching logic.
//!
//! # Responsibilities
//! - Match a concrete path against one pattern
//! - Extract placeholder values (`:name`) into [`Params`]
//! - Compute the unmatched tail of a path for trailing-slash patterns
//!
//! # Design Decisions
//! - Placeholders never span a `/`
//! - A placeholder value ends at the pattern byte that follows its name
//! - A pattern ending in `/` (other than `/` itself) matches any path it is a prefix of
//! - Matching is case-sensitive and byte-exact; malformed patterns just fail to match

use std::fmt;

use crate::routing::params::Params;
use crate::routing::segment::{is_name_byte, scan, value_until};

/// A registered path template such as `/users/:id/posts/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    raw: String,
}

impl Pattern {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True if the pattern's last byte is `/`.
    pub fn ends_with_slash(&self) -> bool {
        self.raw.ends_with('/')
    }

    /// Match `path` against this pattern.
    ///
    /// Returns the captured placeholder values keyed by `:name`, or `None`
    /// if the path does not satisfy the pattern.
    pub fn try_match(&self, path: &str) -> Option<Params> {
        let pat = self.raw.as_bytes();
        let bytes = path.as_bytes();
        let mut params = Params::new();
        let (mut i, mut j) = (0, 0);

        while i < bytes.len() {
            if j >= pat.len() {
                if self.raw != "/" && self.ends_with_slash() {
                    return Some(params);
                }
                return None;
            }

            if pat[j] == b':' {
                let name = scan(&self.raw, j + 1, is_name_byte);
                let value = scan(path, i, value_until(name.next));
                params.add(format!(":{}", name.value), value.value);
                j = name.end;
                i = value.end;
            } else if bytes[i] == pat[j] {
                i += 1;
                j += 1;
            } else {
                return None;
            }
        }

        (j == pat.len()).then_some(params)
    }

    /// See [`tail`].
    pub fn tail<'a>(&self, path: &'a str) -> &'a str {
        tail(&self.raw, path)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Pattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Pattern {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Return the part of `path` left over once `pattern` has been matched.
///
/// Only patterns ending in `/` have a tail: `tail("/:a/", "/x/y/z")` is
/// `"y/z"`. Anything else, including a mismatch or a path that the pattern
/// consumes completely, yields `""`.
pub fn tail<'a>(pattern: &str, path: &'a str) -> &'a str {
    let pat = pattern.as_bytes();
    let bytes = path.as_bytes();
    let (mut i, mut j) = (0, 0);

    while i < bytes.len() {
        if j >= pat.len() {
            return match pat.last() {
                Some(b'/') => &path[i..],
                _ => "",
            };
        }

        if pat[j] == b':' {
            let name = scan(pattern, j + 1, is_name_byte);
            j = name.end;
            i = scan(path, i, value_until(name.next)).end;
        } else if bytes[i] == pat[j] {
            i += 1;
            j += 1;
        } else {
            return "";
        }
    }

    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_match(pattern: &str, path: &str) -> Option<Params> {
        Pattern::new(pattern).try_match(path)
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_root() {
        assert_eq!(try_match("/", "/"), Some(Params::new()));
        assert_eq!(try_match("/", "/wrong_url"), None);
    }

    #[test]
    fn test_literal_pattern_matches_itself() {
        for p in ["/", "/foo", "/foo/bar", "/foo/bar/", "/a.b-c_d"] {
            assert_eq!(try_match(p, p), Some(Params::new()), "pattern {p}");
        }
    }

    #[test]
    fn test_single_placeholder() {
        assert_eq!(
            try_match("/foo/:name", "/foo/bar"),
            Some(params(&[(":name", "bar")]))
        );
    }

    #[test]
    fn test_missing_trailing_literal() {
        assert_eq!(try_match("/foo/:name/baz", "/foo/bar"), None);
        assert_eq!(try_match("/foo/:name/baz/:id", "/foo/bar/baz"), None);
    }

    #[test]
    fn test_trailing_slash_pattern_is_prefix() {
        let expected = Some(params(&[(":name", "keith")]));
        assert_eq!(try_match("/foo/:name/bar/", "/foo/keith/bar/baz"), expected);
        assert_eq!(try_match("/foo/:name/bar/", "/foo/keith/bar/"), expected);
        assert_eq!(try_match("/foo/:name/bar/", "/foo/keith/bar"), None);
    }

    #[test]
    fn test_multiple_placeholders() {
        assert_eq!(
            try_match("/foo/:name/baz", "/foo/bar/baz"),
            Some(params(&[(":name", "bar")]))
        );
        assert_eq!(
            try_match("/foo/:name/baz/:id", "/foo/bar/baz/123"),
            Some(params(&[(":name", "bar"), (":id", "123")]))
        );
    }

    #[test]
    fn test_repeated_name_accumulates() {
        let matched = try_match("/foo/:name/baz/:name", "/foo/bar/baz/123").unwrap();
        assert_eq!(matched.get_all(":name"), ["bar", "123"]);
    }

    #[test]
    fn test_placeholder_followed_by_literal() {
        assert_eq!(
            try_match("/foo/:name.txt", "/foo/bar.txt"),
            Some(params(&[(":name", "bar")]))
        );
        assert_eq!(try_match("/foo/:name.txt", "/foo/bar/baz.txt"), None);
    }

    #[test]
    fn test_colon_in_path_is_plain_text() {
        assert_eq!(
            try_match("/foo/:name", "/foo/:bar"),
            Some(params(&[(":name", ":bar")]))
        );
    }

    #[test]
    fn test_adjacent_placeholders() {
        assert_eq!(
            try_match("/foo/:a:b", "/foo/val1:val2"),
            Some(params(&[(":a", "val1"), (":b", ":val2")]))
        );
        assert_eq!(
            try_match("/foo/:a:b", "/foo/:bar"),
            Some(params(&[(":a", ""), (":b", ":bar")]))
        );
        assert_eq!(
            try_match("/foo/:a:b:c", "/foo/:bar"),
            Some(params(&[(":a", ""), (":b", ""), (":c", ":bar")]))
        );
    }

    #[test]
    fn test_empty_values_and_names() {
        assert_eq!(try_match("/foo/:a.", "/foo/."), Some(params(&[(":a", "")])));
        assert_eq!(
            try_match("/foo/::name", "/foo/val1:val2"),
            Some(params(&[(":", "val1"), (":name", ":val2")]))
        );
    }

    #[test]
    fn test_literal_prefix_before_placeholder() {
        assert_eq!(try_match("/foo/x:name", "/foo/bar"), None);
        assert_eq!(
            try_match("/foo/x:name", "/foo/xbar"),
            Some(params(&[(":name", "bar")]))
        );
    }

    #[test]
    fn test_underscore_in_name() {
        assert_eq!(
            try_match("/users/:user_id", "/users/42"),
            Some(params(&[(":user_id", "42")]))
        );
    }

    #[test]
    fn test_non_ascii_literals() {
        assert_eq!(
            try_match("/café/:item", "/café/crème"),
            Some(params(&[(":item", "crème")]))
        );
        assert_eq!(try_match("/café/:item", "/cafe/x"), None);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(try_match("", "/"), None);
    }

    #[test]
    fn test_tail() {
        let cases = [
            ("/:a/", "/x/y/z", "y/z"),
            ("/:a/", "/x", ""),
            ("/:a/", "/x/", ""),
            ("/:a", "/x/y/z", ""),
            ("/b/:a", "/x/y/z", ""),
            ("/hello/:title/", "/hello/mr/mizerany", "mizerany"),
            ("/static/", "/static/css/site.css", "css/site.css"),
            ("", "/x", ""),
        ];
        for (pat, path, expect) in cases {
            assert_eq!(tail(pat, path), expect, "tail({pat:?}, {path:?})");
        }
    }

    #[test]
    fn test_pattern_tail_delegates() {
        let pattern = Pattern::from("/files/:bucket/");
        assert_eq!(pattern.tail("/files/photos/2024/cat.png"), "2024/cat.png");
    }
}
