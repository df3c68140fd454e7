//! Code writer with automatic indentation tracking.
//!
//! Indentation is held in an `Rc<Cell<usize>>` so an [`IndentGuard`] can
//! outlive the `&mut` borrow that created it. Output goes to an owned
//! `String`, so writes cannot fail.
//!
//! ```
//! use shapegen_codegen::code_writer::CodeWriter;
//!
//! let mut w = CodeWriter::with_indent_spaces(4);
//! w.block("class Example", |w| {
//!     w.writeln("int value;");
//! });
//! assert_eq!(w.finish(), "class Example {\n    int value;\n}\n");
//! ```

use std::cell::Cell;
use std::rc::Rc;

/// Line-oriented writer that tracks the current indentation
pub struct CodeWriter {
    out: String,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new(indent_string: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            indent_level: Rc::new(Cell::new(0)),
            indent_string: indent_string.into(),
            at_line_start: true,
        }
    }

    pub fn with_indent_spaces(spaces: usize) -> Self {
        Self::new(" ".repeat(spaces))
    }

    /// Write text without a newline. Adds indentation if at line start.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.at_line_start && !text.trim().is_empty() {
            for _ in 0..self.indent_level.get() {
                self.out.push_str(&self.indent_string);
            }
            self.at_line_start = false;
        }

        self.out.push_str(text);
    }

    /// Write text followed by a newline. Multi-line text is indented per line.
    pub fn writeln(&mut self, text: &str) {
        for line in text.split('\n') {
            self.write(line);
            self.out.push('\n');
            self.at_line_start = true;
        }
    }

    pub fn blank_line(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// Indentation increases while the guard is alive.
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// Write each line of `text` behind a comment marker
    pub fn doc_comment(&mut self, comment_prefix: &str, text: &str) {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.writeln(comment_prefix);
            } else {
                self.writeln(&format!("{} {}", comment_prefix, line));
            }
        }
    }

    /// Write a complete brace-delimited block
    pub fn block<F>(&mut self, header: &str, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.writeln(&format!("{} {{", header));
        {
            let _indent = self.indent();
            body(self);
        }
        self.writeln("}");
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level.get()
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Decrements the indentation level on drop
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        self.indent_level
            .set(self.indent_level.get().saturating_sub(1));
    }
}
