//! HTML preview of a markdown body.
//!
//! CommonMark rendering is done by `pulldown-cmark`; cross-references in
//! ordinary text become the same clickable spans [`render_links`] produces.
//! References inside code blocks and inline code are left as written.
//!
//! [`render_links`]: crate::render_links

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};

use crate::parsers::links::{LINK_PATTERN, escape_html, link_span};

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render `content` to HTML.
pub fn render_preview(content: &str) -> String {
    let mut in_code_block = false;

    let events = TextMergeStream::new(Parser::new_ext(content, parser_options())).map(|event| {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                Event::Start(Tag::CodeBlock(kind))
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                Event::End(TagEnd::CodeBlock)
            }
            Event::Text(text) if !in_code_block && LINK_PATTERN.is_match(&text) => {
                Event::InlineHtml(CowStr::from(link_text_to_html(&text)))
            }
            other => other,
        }
    });

    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

/// Escape a text run, turning each `[[Token]]` into a link span.
fn link_text_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 64);
    let mut last = 0;
    for caps in LINK_PATTERN.captures_iter(text) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&escape_html(&text[last..whole.start()]));
        out.push_str(&link_span(token.as_str()));
        last = whole.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
