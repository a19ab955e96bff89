use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, html: &str) -> String;
}

/// Visible text of `<body>`, the way a browser's `innerText` roughly reads:
/// - `script`, `style`, `noscript`, `template` and `iframe` are skipped,
/// - block elements and `<br>` separate words,
/// - whitespace runs collapse to a single space and the result is trimmed.
///
/// Documents without a body element fall back to the whole tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct BodyTextExtractor;

impl TextExtractor for BodyTextExtractor {
    fn extract_text(&self, html: &str) -> String {
        let doc = Html::parse_document(html);
        let body = Selector::parse("body")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
            .unwrap_or_else(|| doc.root_element());

        element_text(body)
    }
}

/// Visible text under `root` with the same skipping and whitespace rules as
/// body extraction.
pub(crate) fn element_text(root: ElementRef<'_>) -> String {
    let mut out = TextBuffer::default();
    visit_element(root, &mut out);
    out.finish()
}

fn visit_node(node: NodeRef<'_, Node>, out: &mut TextBuffer) {
    match node.value() {
        Node::Text(text) => out.push_text(text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, out);
            }
        }
        _ => {}
    }
}

fn visit_element(element: ElementRef<'_>, out: &mut TextBuffer) {
    let name = element.value().name();
    if is_hidden(name) {
        return;
    }
    if name.eq_ignore_ascii_case("br") {
        out.push_break();
        return;
    }

    let block = is_block(name);
    if block {
        out.push_break();
    }
    for child in element.children() {
        visit_node(child, out);
    }
    if block {
        out.push_break();
    }
}

fn is_hidden(name: &str) -> bool {
    ["script", "style", "noscript", "template", "iframe", "head"]
        .iter()
        .any(|tag| name.eq_ignore_ascii_case(tag))
}

fn is_block(name: &str) -> bool {
    const BLOCKS: &[&str] = &[
        "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
        "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
        "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
    ];
    BLOCKS.iter().any(|tag| name.eq_ignore_ascii_case(tag))
}

#[derive(Default)]
struct TextBuffer {
    text: String,
    pending_space: bool,
}

impl TextBuffer {
    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.pending_space = true;
            } else {
                if self.pending_space && !self.text.is_empty() {
                    self.text.push(' ');
                }
                self.pending_space = false;
                self.text.push(ch);
            }
        }
    }

    fn push_break(&mut self) {
        self.pending_space = true;
    }

    fn finish(self) -> String {
        self.text
    }
}
