//! In-place region replacement for previously rendered documents.
//!
//! Each operation rewrites only the span its anchor matches. An anchor that
//! is not present leaves the text untouched.

use regex::{NoExpand, Regex};

/// Sentinel comment opening region `name`.
pub fn begin_marker(name: &str) -> String {
    format!("<!--BEGIN:{}-->", name)
}

/// Sentinel comment closing region `name`.
pub fn end_marker(name: &str) -> String {
    format!("<!--END:{}-->", name)
}

/// Wrap `body` in the sentinels for `name`, in the layout
/// [`Patcher::replace_section`] produces.
pub fn section(name: &str, body: &str) -> String {
    format!("{}\n{}{}", begin_marker(name), body, end_marker(name))
}

pub struct Patcher {
    text: String,
    missing: Vec<String>,
}

impl Patcher {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            missing: Vec::new(),
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section_range(name).is_some()
    }

    /// Replace the whole first match of `re` with `replacement`.
    pub fn replace_first(&mut self, anchor: &str, re: &Regex, replacement: &str) -> &mut Self {
        match re.find(&self.text) {
            Some(m) => self.text.replace_range(m.range(), replacement),
            None => self.skip(anchor),
        }
        self
    }

    /// Replace every match of `re` with `replacement`.
    pub fn replace_all(&mut self, anchor: &str, re: &Regex, replacement: &str) -> &mut Self {
        if re.is_match(&self.text) {
            self.text = re.replace_all(&self.text, NoExpand(replacement)).into_owned();
        } else {
            self.skip(anchor);
        }
        self
    }

    /// Replace capture group `group` of the first match of `re`.
    pub fn replace_group(&mut self, anchor: &str, re: &Regex, group: usize, replacement: &str) -> &mut Self {
        match re.captures(&self.text).and_then(|caps| caps.get(group)) {
            Some(m) => self.text.replace_range(m.range(), replacement),
            None => self.skip(anchor),
        }
        self
    }

    /// Replace capture group 1 of successive matches of `re` with
    /// `values[0]`, `values[1]`, ... Matches beyond `values` are left alone.
    pub fn replace_sequence(&mut self, anchor: &str, re: &Regex, values: &[String]) -> &mut Self {
        let ranges: Vec<_> = re
            .captures_iter(&self.text)
            .filter_map(|caps| caps.get(1).map(|m| m.range()))
            .take(values.len())
            .collect();
        if ranges.is_empty() {
            self.skip(anchor);
            return self;
        }
        // Back to front so earlier ranges stay valid.
        for (range, value) in ranges.into_iter().zip(values).rev() {
            self.text.replace_range(range, value);
        }
        self
    }

    /// Replace everything between the sentinels of `name` with `body`.
    pub fn replace_section(&mut self, name: &str, body: &str) -> &mut Self {
        match self.section_range(name) {
            Some(range) => self.text.replace_range(range, &format!("\n{}", body)),
            None => self.skip(name),
        }
        self
    }

    /// Replace section `name`, or adopt the first match of `legacy` as that
    /// section when the sentinels are absent. The line ending after the
    /// legacy match is kept.
    pub fn replace_section_or(&mut self, name: &str, legacy: &Regex, body: &str) -> &mut Self {
        if self.has_section(name) {
            return self.replace_section(name, body);
        }
        match legacy.find(&self.text) {
            Some(m) => {
                let eol = if m.as_str().ends_with("\r\n") {
                    "\r\n"
                } else if m.as_str().ends_with('\n') {
                    "\n"
                } else {
                    ""
                };
                let replacement = format!("{}{}", section(name, body), eol);
                self.text.replace_range(m.range(), &replacement);
            }
            None => self.skip(name),
        }
        self
    }

    /// Anchors that matched nothing so far.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn finish(self) -> String {
        self.text
    }

    fn section_range(&self, name: &str) -> Option<std::ops::Range<usize>> {
        let begin = begin_marker(name);
        let start = self.text.find(&begin)? + begin.len();
        let end = start + self.text[start..].find(&end_marker(name))?;
        Some(start..end)
    }

    fn skip(&mut self, anchor: &str) {
        self.missing.push(anchor.to_string());
    }
}
