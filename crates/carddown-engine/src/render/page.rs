use crate::node::{Element, Node};

use super::html::node_to_html;

/// A complete HTML document around converted content.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    pub title: String,
    pub lang: String,
    pub charset: String,
    /// Extra markup placed verbatim into `<head>` (styles, scripts).
    pub head_extra: Vec<String>,
    pub body_class: String,
    pub indent: usize,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self {
            title: String::new(),
            lang: "en".into(),
            charset: "UTF-8".into(),
            head_extra: Vec::new(),
            body_class: "markdown-body".into(),
            indent: 2,
        }
    }
}

impl HtmlPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = class.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_head(mut self, markup: impl Into<String>) -> Self {
        self.head_extra.push(markup.into());
        self
    }

    pub fn render(&self, content: Vec<Node>) -> String {
        let mut head = Element::new("head")
            .with_child(Element::new("meta").with_attr("charset", &self.charset).self_closing())
            .with_child(
                Element::new("meta")
                    .with_attr("name", "viewport")
                    .with_attr("content", "width=device-width, initial-scale=1")
                    .self_closing(),
            )
            .with_child(
                Element::new("title")
                    .with_child(html_escape::encode_text(&self.title).into_owned()),
            );
        head.extend(self.head_extra.iter().cloned().map(Node::Text));

        let body = Element::new("body")
            .with_class(&self.body_class)
            .with_children(content);
        let html = Element::new("html")
            .with_attr("lang", &self.lang)
            .with_child(head)
            .with_child(body);
        format!("<!DOCTYPE html>\n{}\n", node_to_html(&html.into(), 0, self.indent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn page_wraps_content() {
        let page = HtmlPage::new("Notes & Cards").with_lang("de");
        let html = page.render(vec![Element::new("p").with_child("hi").into()]);
        assert!(html.ends_with("</html>\n"));
        assert_snapshot!(html.trim_end(), @r#"
        <!DOCTYPE html>
        <html lang="de">
          <head>
            <meta charset="UTF-8"/>
            <meta name="viewport" content="width=device-width, initial-scale=1"/>
            <title>Notes &amp; Cards</title>
          </head>
          <body class="markdown-body">
            <p>hi</p>
          </body>
        </html>
        "#);
    }
}
