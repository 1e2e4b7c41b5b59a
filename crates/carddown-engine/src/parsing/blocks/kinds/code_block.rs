use crate::context::ParseContext;
use crate::escape;
use crate::node::{Element, Node};

/// The wrapper shared by fenced and indented code.
///
/// ```text
/// div.multiline#code-div_{h}
///   div.code-block-container > pre > code#code-block_{h}
///   div.copy-notification#copy-notification_{h}   (copy button enabled)
///   button.btn-copy#copy-button_{h}                (copy button enabled)
/// ```
pub fn code_block(code_lines: &[&str], lang: &str, ctx: &mut ParseContext) -> Node {
    let source = escape::restore_source(&code_lines.join("\n"));
    let hash = ctx.ids.unique_hash(&source);
    let code_id = format!("code-block_{hash}");

    let mut code = Element::new("code");
    if !lang.is_empty() {
        code.set_attr("class", format!("prettyprint lang-{lang}"));
    } else if ctx.options.prettyprint_multiline_code {
        code.set_attr("class", "prettyprint");
    }
    let code = code
        .with_attr("name", "multiline-code-block")
        .with_id(&code_id)
        .with_child(html_escape::encode_text(&source).into_owned());

    let container = Element::new("div")
        .with_class("code-block-container")
        .with_child(Element::new("pre").with_child(code));
    let mut div = Element::new("div")
        .with_class("multiline")
        .with_id(format!("code-div_{hash}"))
        .with_child(container);

    if ctx.options.codeblock_copy_btn {
        div.push(
            Element::new("div")
                .with_class("copy-notification")
                .with_id(format!("copy-notification_{hash}"))
                .with_child(ctx.options.labels.copied.as_str()),
        );
        div.push(
            Element::new("button")
                .with_class("btn-copy")
                .with_id(format!("copy-button_{hash}"))
                .with_attr("data-clipboard-target", format!("#{code_id}"))
                .with_child("Copy"),
        );
    }
    div.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::render::html::node_to_html;
    use insta::assert_snapshot;

    #[test]
    fn code_block_without_copy_button() {
        let options = Options {
            codeblock_copy_btn: false,
            ..Options::default()
        };
        let mut ctx = ParseContext::new(&options);
        let node = code_block(&["if a < b {", "    x()", "}"], "rust", &mut ctx);
        let hash = crate::hash::short_hash("if a < b {\n    x()\n}");
        let html = node_to_html(&node, 0, 2).replace(&hash, "H");
        assert_snapshot!(html, @r#"
        <div class="multiline" id="code-div_H">
          <div class="code-block-container">
            <pre><code class="prettyprint lang-rust" name="multiline-code-block" id="code-block_H">if a &lt; b {
            x()
        }</code></pre>
          </div>
        </div>
        "#);
    }

    #[test]
    fn identical_blocks_get_distinct_ids() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let a = code_block(&["x"], "", &mut ctx);
        let b = code_block(&["x"], "", &mut ctx);
        let id = |n: &Node| n.as_element().and_then(|e| e.attr("id")).map(str::to_string);
        assert_ne!(id(&a), id(&b));
    }

    #[test]
    fn copy_button_targets_the_code() {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let node = code_block(&["x"], "", &mut ctx);
        let div = node.as_element().expect("div");
        assert_eq!(div.children.len(), 3);
        let button = div.children[2].as_element().expect("button");
        let code_id = format!("#code-block_{}", crate::hash::short_hash("x"));
        assert_eq!(button.attr("data-clipboard-target"), Some(code_id.as_str()));
    }
}
