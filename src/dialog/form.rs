//! Editable text fields and the forms built from them.

use crate::dialog::validate::{self, FieldRule};
use unicode_width::UnicodeWidthStr;

/// A single editable value. Multiline fields accept newlines and move the
/// cursor by line; single-line fields ignore both.
#[derive(Debug, Clone)]
pub struct TextField {
    pub name: &'static str,
    pub label: &'static str,
    pub text: String,
    /// Byte offset into `text`, always on a char boundary.
    pub cursor: usize,
    pub multiline: bool,
}

impl TextField {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            text: String::new(),
            cursor: 0,
            multiline: false,
        }
    }

    pub fn multiline(name: &'static str, label: &'static str, text: String) -> Self {
        Self {
            name,
            label,
            cursor: 0,
            text,
            multiline: true,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text. Line breaks are normalized to `\n`, or dropped
    /// for single-line fields.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        let cleaned: String = if self.multiline {
            normalized
        } else {
            normalized.chars().filter(|c| *c != '\n').collect()
        };
        self.text.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len())
    }

    /// Start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.line_start();
    }

    /// End of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.line_end();
    }

    fn column_chars(&self) -> usize {
        self.text[self.line_start()..self.cursor].chars().count()
    }

    fn offset_in_line(&self, start: usize, end: usize, col: usize) -> usize {
        self.text[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    pub fn move_up(&mut self) {
        let start = self.line_start();
        if start == 0 {
            return;
        }
        let col = self.column_chars();
        let prev_end = start - 1;
        let prev_start = self.text[..prev_end].rfind('\n').map(|i| i + 1).unwrap_or(0);
        self.cursor = self.offset_in_line(prev_start, prev_end, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end();
        if end == self.text.len() {
            return;
        }
        let col = self.column_chars();
        let next_start = end + 1;
        let next_end = self.text[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(self.text.len());
        self.cursor = self.offset_in_line(next_start, next_end, col);
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        while pos > 0 && !matches!(self.text.as_bytes().get(pos - 1), Some(b' ') | Some(b'\n')) {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }

    /// Zero-based (line, display column) of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[self.line_start()..].width();
        (line, col)
    }
}

/// An ordered set of fields with one focused field and an error flag.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
    pub form_error: bool,
    pub errors: Vec<String>,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            focus: 0,
            form_error: false,
            errors: Vec::new(),
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn field(&self, name: &str) -> Option<&TextField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut TextField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Trimmed value of a field; empty if the field does not exist.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.text.trim()).unwrap_or("")
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.value(name).parse().ok()
    }

    /// Run the rule set. Sets or clears `form_error` and returns whether
    /// the form may be submitted.
    pub fn validate(&mut self, rules: &[FieldRule]) -> bool {
        self.errors = validate::validate(rules, self);
        self.form_error = !self.errors.is_empty();
        !self.form_error
    }
}
