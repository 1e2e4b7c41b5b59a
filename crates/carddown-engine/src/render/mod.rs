//! Node tree to HTML text.

pub mod html;
pub mod page;

pub use html::{inline_html, node_to_html, to_html};
pub use page::HtmlPage;
