use serde::{Deserialize, Serialize};

/// Options for HTML rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap output in `<!DOCTYPE html>`, `<head>` and `<body>`
    pub full_page: bool,
    /// Page title; public pages fall back to the funnel name
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            full_page: true,
            title: None,
        }
    }
}

impl RenderOptions {
    /// Bare block markup, no page wrapper
    pub fn fragment() -> Self {
        Self {
            full_page: false,
            ..Self::default()
        }
    }
}

pub(crate) struct Context {
    pub(crate) options: RenderOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    pub(crate) fn new(options: RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub(crate) fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `open` on its own line, then indent
    pub(crate) fn open(&mut self, open: &str) {
        self.add_line(open);
        self.indent();
    }

    /// Dedent, then `close` on its own line
    pub(crate) fn close(&mut self, close: &str) {
        self.dedent();
        self.add_line(close);
    }

    pub(crate) fn into_output(self) -> String {
        self.buffer
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// ` name="value"` with the value escaped
pub(crate) fn attr(name: &str, value: &str) -> String {
    format!(" {}=\"{}\"", name, escape_html(value))
}

pub(crate) const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];
pub(crate) const MEDIA_SCHEMES: &[&str] = &["http", "https"];

/// `url` if it is relative or uses one of `schemes`
pub(crate) fn safe_url<'a>(url: &'a str, schemes: &[&str]) -> Option<&'a str> {
    let trimmed = url.trim();
    match trimmed.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(end) if trimmed[end..].starts_with(':') => {
            let scheme = &trimmed[..end];
            schemes
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
                .then_some(trimmed)
        }
        _ => Some(trimmed),
    }
}
