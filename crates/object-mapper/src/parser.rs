//! Path string parser.
//!
//! A path is a delimiter-separated list of tokens. Each token contributes an
//! optional key name and an optional bracketed index:
//!
//! - `abc`: key `abc`
//! - `abc?`: key `abc`, explicit `null` may be written
//! - `abc[]`: key `abc`, then every element
//! - `abc[3]`, `[-1]`: a single position
//! - `abc[]+`: append a new element
//! - `*`: every key
//!
//! A delimiter preceded by a backslash is a literal character. A doubled
//! backslash is kept as-is and does not escape what follows.

use crate::types::{Path, PathSegment};

/// The delimiter used when none is given.
pub const DEFAULT_DELIMITER: char = '.';

#[derive(Clone, Copy, PartialEq, Eq)]
enum SplitState {
    Normal,
    EscapePending,
}

/// Splits `path` on `delimiter`, honouring backslash escapes.
///
/// Empty tokens are kept, including a trailing one after a final delimiter.
/// A lone backslash at the very end of the input is dropped.
///
/// # Example
///
/// ```
/// use object_mapper::split_path;
///
/// assert_eq!(split_path("a.b", '.'), vec!["a", "b"]);
/// assert_eq!(split_path("a\\.b", '.'), vec!["a.b"]);
/// assert_eq!(split_path("a\\\\.b", '.'), vec!["a\\\\", "b"]);
/// assert_eq!(split_path("a..", '.'), vec!["a", "", ""]);
/// ```
pub fn split_path(path: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut state = SplitState::Normal;

    for c in path.chars() {
        match state {
            SplitState::Normal => {
                if c == delimiter {
                    tokens.push(std::mem::take(&mut token));
                } else if c == '\\' {
                    state = SplitState::EscapePending;
                } else {
                    token.push(c);
                }
            }
            SplitState::EscapePending => {
                if c == delimiter {
                    token.push(c);
                } else if c == '\\' {
                    token.push_str("\\\\");
                } else {
                    token.push('\\');
                    token.push(c);
                }
                state = SplitState::Normal;
            }
        }
    }
    tokens.push(token);
    tokens
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Name,
    Index,
    AfterIndex,
}

/// Scans one token into at most one name segment followed by at most one
/// index segment.
fn scan_token(token: &str, out: &mut Path) {
    let mut state = ScanState::Name;
    let mut name_end = 0;
    let mut nulls = false;
    let mut ix_begin = 0;
    let mut ix_span: Option<(usize, usize)> = None;
    let mut add = false;

    for (j, c) in token.char_indices() {
        match state {
            ScanState::Name => match c {
                '[' => {
                    ix_begin = j + 1;
                    state = ScanState::Index;
                }
                '?' => {
                    name_end = j;
                    nulls = true;
                }
                '+' => {}
                _ => name_end = j + c.len_utf8(),
            },
            ScanState::Index => match c {
                ']' => {
                    ix_span = Some((ix_begin, j));
                    add = false;
                    state = ScanState::AfterIndex;
                }
                '[' => ix_begin = j + 1,
                _ => {}
            },
            ScanState::AfterIndex => match c {
                // `+` only counts directly after the closing bracket.
                '+' if matches!(ix_span, Some((_, end)) if end + 1 == j) => add = true,
                // The name swallows everything up to a trailing `?`, brackets included.
                '?' => name_end = j,
                '[' => {
                    ix_begin = j + 1;
                    state = ScanState::Index;
                }
                _ => {}
            },
        }
    }

    if name_end > 0 {
        out.push(PathSegment::Name {
            name: token[..name_end].to_string(),
            nulls,
        });
    }
    if let Some((begin, end)) = ix_span {
        out.push(PathSegment::Index {
            ix: token[begin..end].to_string(),
            add,
        });
    }
}

/// Parses `path` using `delimiter` between tokens.
pub fn parse_path_with(path: &str, delimiter: char) -> Path {
    let mut segments = Vec::new();
    for token in split_path(path, delimiter) {
        scan_token(&token, &mut segments);
    }
    segments
}

/// Parses a `.`-delimited path.
///
/// # Example
///
/// ```
/// use object_mapper::{parse_path, PathSegment};
///
/// assert_eq!(
///     parse_path("abc[].def?"),
///     vec![
///         PathSegment::name("abc"),
///         PathSegment::index(""),
///         PathSegment::nullable("def"),
///     ]
/// );
/// assert!(parse_path("").is_empty());
/// ```
pub fn parse_path(path: &str) -> Path {
    parse_path_with(path, DEFAULT_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trailing_backslash_dropped() {
        assert_eq!(split_path("abc\\", '.'), vec!["abc"]);
    }

    #[test]
    fn test_split_backslash_before_plain_char_kept() {
        assert_eq!(split_path("a\\b.c", '.'), vec!["a\\b", "c"]);
    }

    #[test]
    fn test_split_custom_delimiter() {
        assert_eq!(split_path("a/b\\/c", '/'), vec!["a", "b/c"]);
    }

    #[test]
    fn test_scan_plus_not_adjacent() {
        assert_eq!(parse_path("a[1]x+"), vec![PathSegment::name("a"), PathSegment::index("1")]);
    }

    #[test]
    fn test_scan_question_mark_after_index() {
        assert_eq!(
            parse_path("abc[1]?"),
            vec![PathSegment::name("abc[1]"), PathSegment::index("1")]
        );
        assert_eq!(
            parse_path("abc[]+?"),
            vec![PathSegment::name("abc[]+"), PathSegment::append("")]
        );
    }

    #[test]
    fn test_scan_question_mark_inside_name() {
        assert_eq!(
            parse_path("a?b"),
            vec![PathSegment::Name {
                name: "a?b".to_string(),
                nulls: true
            }]
        );
    }

    #[test]
    fn test_scan_unclosed_bracket() {
        assert_eq!(parse_path("abc[1"), vec![PathSegment::name("abc")]);
    }

    #[test]
    fn test_scan_multibyte_name() {
        assert_eq!(
            parse_path("café[0]"),
            vec![PathSegment::name("café"), PathSegment::index("0")]
        );
    }
}
