//! Cross-reference parser: `[[Target Title]]`
//!
//! Tokens end at the first `]]`; nesting is not supported and the inner text
//! cannot contain `]`. Unterminated markup simply does not match.

use learnsphere_core::{BiDirectionalLink, LinkSource, LinkType};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches [[...]] pattern
pub(crate) static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Matches the spans produced by [`render_links`]
static RENDERED_LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span class="bi-link" data-link="([^"]*)">"#).unwrap());

/// Extract every cross-reference token, in order, duplicates included.
pub fn parse_links(content: &str) -> Vec<String> {
    LINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Find every reference to `target_title` across `documents`.
///
/// One record is produced per matching token, so a document mentioning the
/// target twice yields two records. Matching is exact and case-sensitive.
/// `target_id` is left empty; resolving it is the link graph's job.
pub fn find_backlinks<I>(target_title: &str, documents: I) -> Vec<BiDirectionalLink>
where
    I: IntoIterator,
    I::Item: LinkSource,
{
    let mut backlinks = Vec::new();

    for doc in documents {
        for token in parse_links(doc.content()) {
            if token == target_title {
                backlinks.push(BiDirectionalLink {
                    source_id: doc.id().to_string(),
                    target_id: String::new(),
                    source_text: token,
                    target_title: target_title.to_string(),
                    link_type: LinkType::Reference,
                });
            }
        }
    }

    backlinks
}

/// Replace each `[[Token]]` with a clickable span carrying the token.
///
/// `_on_link_click` is never invoked here: click dispatch is wired by the
/// caller against the `data-link` attribute (see [`rendered_link_targets`]).
pub fn render_links<F>(content: &str, _on_link_click: F) -> String
where
    F: Fn(&str),
{
    LINK_PATTERN
        .replace_all(content, |caps: &Captures| link_span(&caps[1]))
        .into_owned()
}

/// Recover the tokens embedded in markup produced by [`render_links`].
pub fn rendered_link_targets(markup: &str) -> Vec<String> {
    RENDERED_LINK_PATTERN
        .captures_iter(markup)
        .map(|caps| unescape_html(&caps[1]))
        .collect()
}

pub(crate) fn link_span(token: &str) -> String {
    let escaped = escape_html(token);
    format!(r#"<span class="bi-link" data-link="{escaped}">{escaped}</span>"#)
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
