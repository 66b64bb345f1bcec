//! Turning extracted article HTML into the plain text clients receive

use html2text::render::text_renderer::{TaggedLine, TextDecorator, TrivialDecorator};

use crate::error::{ExtractError, Result};

/// Upper bound on `textContent` length, in characters
pub const MAX_TEXT_CHARS: usize = 3000;

/// Render width large enough that paragraphs are never wrapped
const NO_WRAP_WIDTH: usize = 1 << 16;

/// Plain-text decorator that renders nothing for images
///
/// `TrivialDecorator` emits an image's title text; everything else is
/// delegated to it unchanged.
#[derive(Debug, Clone)]
struct ArticleDecorator(TrivialDecorator);

impl ArticleDecorator {
    fn new() -> Self {
        Self(TrivialDecorator::new())
    }
}

impl TextDecorator for ArticleDecorator {
    type Annotation = ();

    fn decorate_link_start(&mut self, url: &str) -> (String, ()) {
        self.0.decorate_link_start(url)
    }

    fn decorate_link_end(&mut self) -> String {
        self.0.decorate_link_end()
    }

    fn decorate_em_start(&self) -> (String, ()) {
        self.0.decorate_em_start()
    }

    fn decorate_em_end(&self) -> String {
        self.0.decorate_em_end()
    }

    fn decorate_strong_start(&self) -> (String, ()) {
        self.0.decorate_strong_start()
    }

    fn decorate_strong_end(&self) -> String {
        self.0.decorate_strong_end()
    }

    fn decorate_strikeout_start(&self) -> (String, ()) {
        self.0.decorate_strikeout_start()
    }

    fn decorate_strikeout_end(&self) -> String {
        self.0.decorate_strikeout_end()
    }

    fn decorate_code_start(&self) -> (String, ()) {
        self.0.decorate_code_start()
    }

    fn decorate_code_end(&self) -> String {
        self.0.decorate_code_end()
    }

    fn decorate_preformat_first(&self) {
        self.0.decorate_preformat_first();
    }

    fn decorate_preformat_cont(&self) {
        self.0.decorate_preformat_cont();
    }

    fn decorate_image(&mut self, _src: &str, _title: &str) -> (String, ()) {
        (String::new(), ())
    }

    fn header_prefix(&self, level: usize) -> String {
        self.0.header_prefix(level)
    }

    fn quote_prefix(&self) -> String {
        self.0.quote_prefix()
    }

    fn unordered_item_prefix(&self) -> String {
        self.0.unordered_item_prefix()
    }

    fn ordered_item_prefix(&self, i: i64) -> String {
        self.0.ordered_item_prefix(i)
    }

    fn make_subblock_decorator(&self) -> Self {
        Self(self.0.make_subblock_decorator())
    }

    fn finalise(&mut self, links: Vec<String>) -> Vec<TaggedLine<()>> {
        self.0.finalise(links)
    }
}

/// Render article HTML as plain text
///
/// Links keep their text but lose the target, images and horizontal rules
/// are dropped, tables have no borders, and headings keep their original
/// case with no markup prefix.
pub fn html_to_text(html: &str) -> Result<String> {
    html2text::config::with_decorator(ArticleDecorator::new())
        .no_table_borders()
        .string_from_read(html.as_bytes(), NO_WRAP_WIDTH)
        .map_err(|e| ExtractError::Render(e.to_string()))
}

/// Remove one leading occurrence of `title` and the whitespace after it
///
/// Matching ignores case and any whitespace before the title. Text that
/// does not start with the title is returned unchanged.
pub fn strip_leading_title<'a>(text: &'a str, title: &str) -> &'a str {
    let title = title.trim();
    if title.is_empty() {
        return text;
    }

    let mut rest = text.trim_start().chars();
    for expected in title.chars() {
        match rest.next() {
            Some(actual) if eq_ignore_case(actual, expected) => {}
            _ => return text,
        }
    }

    rest.as_str().trim_start()
}

/// Cut `text` to at most `max_chars` characters, ignoring word boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices().nth(max_chars).map_or(text, |(end, _)| &text[..end])
}

/// Strip the duplicate title, trim and truncate rendered article text
pub fn shape_text(text: &str, title: &str) -> String {
    truncate_chars(strip_leading_title(text, title).trim(), MAX_TEXT_CHARS).to_string()
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
