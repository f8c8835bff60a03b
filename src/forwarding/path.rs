//! Lexical path manipulation.
//!
//! Paths are handled as slash-separated strings, never touching the
//! filesystem. `..` is resolved against the segments seen so far and can
//! never climb above the root of an absolute path.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Returns the shortest path equivalent to `path` by lexical processing.
///
/// - repeated slashes collapse into one
/// - `.` segments are removed
/// - `..` removes the segment before it; at the root it is dropped
/// - trailing slashes are removed, except for the root itself
///
/// An empty path cleans to `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // Relative paths keep leading `..`; absolute ones stop at `/`.
                _ if !rooted => segments.push(".."),
                _ => {}
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Joins `segment` onto `base` and cleans the result.
///
/// Empty inputs are ignored; joining two empty strings yields an empty
/// string.
pub fn join(base: &str, segment: &str) -> String {
    match (base.is_empty(), segment.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(segment),
        (false, true) => clean(base),
        (false, false) => clean(&format!("{}/{}", base, segment)),
    }
}

/// Cleans `path` as if it were rooted at `/`.
pub fn absolute(path: &str) -> String {
    clean(&format!("/{}", path))
}

/// Bytes escaped in a path. Unreserved characters, sub-delimiters, `:`,
/// `@` and the `/` separator pass through; non-ASCII is always escaped.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes plain text for use in a URL path.
///
/// Characters that are legal in a path segment are kept, so `@me` and
/// `x:batchGet` stay readable. `%` is escaped, so the input is always
/// treated as unescaped text.
pub fn escape(text: &str) -> Cow<'_, str> {
    utf8_percent_encode(text, PATH).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_resolves_dots_and_slashes() {
        assert_eq!(clean("/some/path"), "/some/path");
        assert_eq!(clean("/some//path/"), "/some/path");
        assert_eq!(clean("/some/./path"), "/some/path");
        assert_eq!(clean("/some/path/.."), "/some");
        assert_eq!(clean("/a/b/../../c"), "/c");
        assert_eq!(clean("/"), "/");
        assert_eq!(clean("//"), "/");
    }

    #[test]
    fn clean_never_escapes_root() {
        assert_eq!(clean("/.."), "/");
        assert_eq!(clean("/../../a"), "/a");
        assert_eq!(clean("/a/../../b"), "/b");
    }

    #[test]
    fn clean_relative_paths() {
        assert_eq!(clean(""), ".");
        assert_eq!(clean("."), ".");
        assert_eq!(clean("a/.."), ".");
        assert_eq!(clean("a/../.."), "..");
        assert_eq!(clean("../a/b"), "../a/b");
        assert_eq!(clean("a//b/./c/"), "a/b/c");
    }

    #[test]
    fn join_appends_relative_segment() {
        assert_eq!(join("/some/path", "new"), "/some/path/new");
        assert_eq!(join("/some/path", ".."), "/some");
        assert_eq!(join("/some/path", "."), "/some/path");
        assert_eq!(join("/some/path", ""), "/some/path");
        assert_eq!(join("/some/path", "../../../.."), "/");
        assert_eq!(join("/some/path", "/nested/"), "/some/path/nested");
    }

    #[test]
    fn join_ignores_empty_parts() {
        assert_eq!(join("", ""), "");
        assert_eq!(join("", "/some/path"), "/some/path");
        assert_eq!(join("/prefix", "/some/path"), "/prefix/some/path");
        assert_eq!(join("prefix", "/some/path"), "prefix/some/path");
    }

    #[test]
    fn absolute_roots_relative_input() {
        assert_eq!(absolute(""), "/");
        assert_eq!(absolute("."), "/");
        assert_eq!(absolute("some/new"), "/some/new");
        assert_eq!(absolute("/some/new/"), "/some/new");
        assert_eq!(absolute(".."), "/");
    }

    #[test]
    fn escape_keeps_separators() {
        assert!(matches!(escape("some/path-1_2.3~"), Cow::Borrowed(_)));
        assert_eq!(escape("hello world/x"), "hello%20world/x");
        assert_eq!(escape("100%"), "100%25");
        assert_eq!(escape("a?b#c"), "a%3Fb%23c");
        assert_eq!(escape("../.."), "../..");
        assert_eq!(escape("caf\u{e9}"), "caf%C3%A9");
    }

    #[test]
    fn escape_keeps_path_legal_characters() {
        assert!(matches!(escape("users/@me"), Cow::Borrowed(_)));
        assert_eq!(escape("x:batchGet"), "x:batchGet");
        assert_eq!(escape("a+b;c=d"), "a+b;c=d");
        assert_eq!(escape("!$&'()*,"), "!$&'()*,");
    }
}
