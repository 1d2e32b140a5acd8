//! Minimal indented XML writer for the HTML page and the SVG tooltip layer.
use std::{borrow::Cow, fmt::Write as _};

/// Escape text for use in XML content and attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Compact coordinate formatting: at most two decimals, no trailing zeros.
pub fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// One element with its attributes, written in insertion order.
#[derive(Clone, Debug)]
pub struct El {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl El {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// Numeric attribute, formatted with [`num`].
    pub fn at(self, name: &'static str, value: f64) -> Self {
        self.attr(name, num(value))
    }

    /// Boolean attribute, emitted bare when `on`.
    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        if on {
            self.attrs.push((name, String::new()));
        }
        self
    }

    fn write_start(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (k, v) in &self.attrs {
            if v.is_empty() {
                let _ = write!(out, " {k}");
            } else {
                let _ = write!(out, " {k}=\"{}\"", escape(v));
            }
        }
    }
}

/// Streaming writer with an open-element stack.
#[derive(Debug, Default)]
pub struct XmlWriter {
    out: String,
    stack: Vec<&'static str>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw line, indented at the current depth.
    pub fn raw(&mut self, line: &str) {
        self.indent();
        self.out.push_str(line);
        self.out.push('\n');
    }

    pub fn open(&mut self, el: El) {
        self.indent();
        el.write_start(&mut self.out);
        self.out.push_str(">\n");
        self.stack.push(el.tag);
    }

    pub fn close(&mut self) {
        if let Some(tag) = self.stack.pop() {
            self.indent();
            let _ = writeln!(self.out, "</{tag}>");
        }
    }

    /// Element with no children: `<tag .../>`.
    pub fn leaf(&mut self, el: El) {
        self.indent();
        el.write_start(&mut self.out);
        self.out.push_str("/>\n");
    }

    /// Element with escaped text content.
    pub fn text(&mut self, el: El, content: &str) {
        self.indent();
        el.write_start(&mut self.out);
        let _ = writeln!(self.out, ">{}</{}>", escape(content), el.tag);
    }

    /// Close everything still open and return the document.
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.close();
        }
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.out.push_str("  ");
        }
    }
}
