use scraper::Html;

use crate::extract::element_text;

/// Removes markup that survived text extraction.
///
/// Extracted text can still contain tags when the page escaped them
/// (`&lt;b&gt;` decodes to a literal `<b>`). The text is always parsed once
/// more as an HTML fragment, so entities are decoded the same way whether or
/// not a tag is present. Script and style contents are dropped like in the
/// first pass.
pub fn strip_residual_markup(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    element_text(fragment.root_element())
}
