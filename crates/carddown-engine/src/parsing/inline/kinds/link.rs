use std::sync::OnceLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::hash::anchor_id;
use crate::node::{Element, Node};
use crate::parsing::inline::rule::{Guard, Pattern, TokenRule};
use crate::parsing::inline::types::{InlineToken, TokenKind};

/// `[label](url "title")`
pub struct Link;

impl Link {
    pub const PATTERN: &'static str = r#"\[([^\]]*)\]\(([^\s()]+)(?:\s+"([^"]*)")?\)"#;
    const URL_GROUP: usize = 2;
    const TITLE_GROUP: usize = 3;

    pub fn rule() -> TokenRule {
        let pattern = Pattern::guarded(
            Self::PATTERN,
            Guard {
                not_after: &['!'],
                ..Guard::default()
            },
        );
        TokenRule::wrapping(TokenKind::Link, vec![pattern], render_link).with_adjust(show_url)
    }
}

/// An empty label shows the URL itself, verbatim.
fn show_url(token: &mut InlineToken, line: &str) {
    if !token.content_str(line).trim().is_empty() {
        return;
    }
    if let Some(url) = token.groups.get(Link::URL_GROUP).copied().flatten() {
        token.content = url;
        token.parse_content = false;
    }
}

fn render_link(token: &InlineToken, line: &str, _ctx: &mut ParseContext) -> Node {
    let url = token.group(line, Link::URL_GROUP).unwrap_or_default();
    let mut a = Element::new("a").with_attr("href", resolve_href(url));
    if let Some(title) = token
        .group(line, Link::TITLE_GROUP)
        .filter(|t| !t.is_empty())
    {
        a.set_attr("title", title);
    }
    a.into()
}

/// `![alt](src "title")`
pub struct Image;

impl Image {
    pub const PATTERN: &'static str = r#"!\[([^\]]*)\]\(([^\s()]+)(?:\s+"([^"]*)")?\)"#;

    pub fn rule() -> TokenRule {
        TokenRule::opaque(TokenKind::Image, vec![Pattern::new(Self::PATTERN)], render_image)
    }
}

fn render_image(token: &InlineToken, line: &str, ctx: &mut ParseContext) -> Node {
    let mut img = Element::new("img")
        .with_attr("alt", token.group(line, 1).unwrap_or_default())
        .with_attr("src", token.group(line, 2).unwrap_or_default());
    if let Some(title) = token.group(line, 3).filter(|t| !t.is_empty()) {
        img.set_attr("title", title);
    }
    img.set_attr(
        "style",
        format!("max-width: {}", ctx.options.image_max_width),
    );
    img.self_closing()
}

/// A bare `http(s)://` URL.
pub struct AutoLink;

impl AutoLink {
    pub const PATTERN: &'static str = r#"https?://[^\s,<"]+"#;

    pub fn rule() -> TokenRule {
        let pattern = Pattern::guarded(
            Self::PATTERN,
            Guard {
                not_after: &['('],
                ..Guard::default()
            },
        );
        TokenRule::opaque(TokenKind::AutoLink, vec![pattern], render_autolink)
    }
}

fn render_autolink(token: &InlineToken, line: &str, _ctx: &mut ParseContext) -> Node {
    let url = token.group(line, 0).unwrap_or_default();
    Element::new("a")
        .with_attr("href", url)
        .with_child(url)
        .into()
}

/// Turns a link target into an `href`.
///
/// - `#fragment` points at the heading anchor derived from the fragment.
/// - Relative paths, absolute paths and anything with a scheme pass through.
/// - Anything else is taken to be a host name and gets `http://`.
pub fn resolve_href(url: &str) -> String {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    if let Some(fragment) = url.strip_prefix('#') {
        return format!("#{}", anchor_id(fragment));
    }
    let scheme =
        SCHEME.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+\-]*:").expect("Invalid URL scheme regex"));
    let passthrough = ["./", "../", "/"].iter().any(|p| url.starts_with(p)) || scheme.is_match(url);
    if passthrough {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
