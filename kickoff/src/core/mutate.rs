//! Pure text transformations for the mutation engine.
//!
//! Every operation takes file content as a string and returns the transformed
//! content; the file-level wrappers live in [`crate::io::workspace`]. Anchor
//! and substitution operations use first-match semantics. The line-prefix
//! toggles are the one exception and apply to every matching line.
//!
//! A missing anchor is an error ([`KickoffError::AnchorNotFound`]) because a
//! skipped insertion would leave later steps operating on content they depend
//! on not existing. A missing substitution match is a silent no-op so a
//! re-run against an already-patched file stays safe.

use regex::{NoExpand, Regex};

use crate::error::KickoffError;

/// An insertion point or line matcher: literal text or a regex pattern.
#[derive(Debug, Clone, Copy)]
pub enum Anchor<'a> {
    /// Matched verbatim (regex metacharacters escaped).
    Literal(&'a str),
    /// Compiled as a regex.
    Pattern(&'a str),
}

impl<'a> Anchor<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Anchor::Literal(text) | Anchor::Pattern(text) => text,
        }
    }

    fn to_regex(self) -> Result<Regex, KickoffError> {
        let pattern = match self {
            Anchor::Literal(text) => regex::escape(text),
            Anchor::Pattern(pattern) => pattern.to_string(),
        };
        Regex::new(&pattern).map_err(KickoffError::BadPattern)
    }

    fn find_in(self, content: &str) -> Result<std::ops::Range<usize>, KickoffError> {
        let re = self.to_regex()?;
        re.find(content)
            .map(|m| m.range())
            .ok_or_else(|| KickoffError::AnchorNotFound {
                pattern: self.as_str().to_string(),
            })
    }
}

/// Insert `text` immediately after the line containing the first match of
/// `anchor`. Errors if the anchor is absent.
pub fn insert_after_anchor(
    content: &str,
    anchor: Anchor,
    text: &str,
) -> Result<String, KickoffError> {
    let matched = anchor.find_in(content)?;
    let at = line_end(content, matched.start);
    Ok(splice(content, at, text))
}

/// Insert `text` immediately before the first match of `anchor`. Errors if
/// the anchor is absent.
pub fn insert_before_anchor(
    content: &str,
    anchor: Anchor,
    text: &str,
) -> Result<String, KickoffError> {
    let matched = anchor.find_in(content)?;
    Ok(splice(content, matched.start, text))
}

/// Replace the first match of `pattern` with `replacement` (taken literally,
/// no capture-group expansion). No match is a silent no-op, not an error.
pub fn replace_first(
    content: &str,
    pattern: &str,
    replacement: &str,
) -> Result<String, KickoffError> {
    let re = Regex::new(pattern).map_err(KickoffError::BadPattern)?;
    Ok(re.replace(content, NoExpand(replacement)).into_owned())
}

/// Prefix every line matching `matcher` with `# `, preserving indentation.
///
/// Lines already carrying a comment prefix are left alone, so applying this
/// twice equals applying it once.
pub fn comment_lines(content: &str, matcher: Anchor) -> Result<String, KickoffError> {
    let re = matcher.to_regex()?;
    map_lines(content, |line| {
        if re.is_match(line) && !line.trim_start().starts_with('#') {
            let indent = line.len() - line.trim_start().len();
            format!("{}# {}", &line[..indent], &line[indent..])
        } else {
            line.to_string()
        }
    })
}

/// Strip one `#` comment prefix (and a single following space) from every
/// line matching `matcher`.
///
/// Lines without a prefix are left alone, so applying this twice equals
/// applying it once.
pub fn uncomment_lines(content: &str, matcher: Anchor) -> Result<String, KickoffError> {
    let re = matcher.to_regex()?;
    map_lines(content, |line| {
        let trimmed = line.trim_start();
        if re.is_match(line) && trimmed.starts_with('#') {
            let indent = line.len() - trimmed.len();
            let body = trimmed
                .strip_prefix("# ")
                .or_else(|| trimmed.strip_prefix('#'))
                .unwrap_or(trimmed);
            format!("{}{}", &line[..indent], body)
        } else {
            line.to_string()
        }
    })
}

fn map_lines(
    content: &str,
    transform: impl Fn(&str) -> String,
) -> Result<String, KickoffError> {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        out.push_str(&transform(body));
        out.push_str(newline);
    }
    Ok(out)
}

fn splice(content: &str, at: usize, text: &str) -> String {
    let mut out = String::with_capacity(content.len() + text.len());
    out.push_str(&content[..at]);
    out.push_str(text);
    out.push_str(&content[at..]);
    out
}

/// Byte offset just past the newline terminating the line containing `from`,
/// or the end of content for an unterminated final line.
fn line_end(content: &str, from: usize) -> usize {
    content[from..]
        .find('\n')
        .map(|i| from + i + 1)
        .unwrap_or(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_after_places_text_on_next_line() {
        let out = insert_after_anchor(
            "def change\nend\n",
            Anchor::Pattern("def change\n"),
            "  enable_extension \"x\"\n",
        )
        .expect("insert");
        assert_eq!(out, "def change\n  enable_extension \"x\"\nend\n");
    }

    #[test]
    fn insert_after_mid_line_anchor_still_inserts_after_the_line() {
        let out = insert_after_anchor(
            "class Application < Rails::Application\nend\n",
            Anchor::Literal("Rails::Application"),
            "  config.x = 1\n",
        )
        .expect("insert");
        assert_eq!(
            out,
            "class Application < Rails::Application\n  config.x = 1\nend\n"
        );
    }

    #[test]
    fn insert_before_places_text_at_match_start() {
        let out = insert_before_anchor(
            "a\nmodule.exports = env\n",
            Anchor::Pattern("module.exports"),
            "splice()\n",
        )
        .expect("insert");
        assert_eq!(out, "a\nsplice()\nmodule.exports = env\n");
    }

    #[test]
    fn insert_after_then_before_same_anchor_brackets_the_line() {
        let base = "head\nanchor line\ntail\n";
        let after = insert_after_anchor(base, Anchor::Literal("anchor line"), "post\n")
            .expect("insert after");
        let both = insert_before_anchor(&after, Anchor::Literal("anchor line"), "pre\n")
            .expect("insert before");
        assert_eq!(both, "head\npre\nanchor line\npost\ntail\n");
    }

    #[test]
    fn missing_anchor_is_fatal() {
        let err = insert_after_anchor("a\n", Anchor::Literal("missing"), "x\n")
            .expect_err("should fail");
        assert!(matches!(err, KickoffError::AnchorNotFound { .. }));
    }

    #[test]
    fn replace_first_touches_only_the_first_match() {
        let out = replace_first("localhost and localhost\n", "localhost", "0.0.0.0")
            .expect("replace");
        assert_eq!(out, "0.0.0.0 and localhost\n");
    }

    #[test]
    fn replace_first_without_match_is_noop() {
        let content = "config.log_level = :info\n";
        let out = replace_first(content, r"config\.log_level = :debug", "x").expect("replace");
        assert_eq!(out, content);
    }

    #[test]
    fn replace_first_changes_exactly_one_span() {
        let content = "before\nconfig.log_level = :debug\nafter\n";
        let out = replace_first(
            content,
            r"config\.log_level = :debug",
            "config.log_level = :info",
        )
        .expect("replace");
        assert_eq!(out, "before\nconfig.log_level = :info\nafter\n");
    }

    #[test]
    fn replacement_is_literal_not_expanded() {
        let out = replace_first("value\n", "value", "$HOME${x}").expect("replace");
        assert_eq!(out, "$HOME${x}\n");
    }

    #[test]
    fn comment_lines_hits_every_match_and_keeps_indent() {
        let out = comment_lines(
            "  gem 'jbuilder'\nkeep\n  gem 'jbuilder', '~> 2.7'\n",
            Anchor::Literal("jbuilder"),
        )
        .expect("comment");
        assert_eq!(out, "  # gem 'jbuilder'\nkeep\n  # gem 'jbuilder', '~> 2.7'\n");
    }

    #[test]
    fn comment_lines_is_idempotent() {
        let once = comment_lines("gem 'jbuilder'\n", Anchor::Literal("jbuilder")).expect("once");
        let twice = comment_lines(&once, Anchor::Literal("jbuilder")).expect("twice");
        assert_eq!(once, twice);
    }

    #[test]
    fn uncomment_lines_strips_one_prefix() {
        let out = uncomment_lines(
            "  # workers ENV.fetch(\"WEB_CONCURRENCY\") { 2 }\n",
            Anchor::Literal("workers ENV.fetch"),
        )
        .expect("uncomment");
        assert_eq!(out, "  workers ENV.fetch(\"WEB_CONCURRENCY\") { 2 }\n");
    }

    #[test]
    fn uncomment_lines_is_idempotent() {
        let content = "# preload_app!\n";
        let once = uncomment_lines(content, Anchor::Pattern("preload_app!$")).expect("once");
        let twice = uncomment_lines(&once, Anchor::Pattern("preload_app!$")).expect("twice");
        assert_eq!(once, "preload_app!\n");
        assert_eq!(once, twice);
    }

    #[test]
    fn final_line_without_newline_survives_line_toggles() {
        let out = comment_lines("a\nflagged", Anchor::Literal("flagged")).expect("comment");
        assert_eq!(out, "a\n# flagged");
    }
}
