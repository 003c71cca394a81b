//! Raw line storage for a schema file being patched.

/// The lines of a file, each kept with its original terminator.
///
/// Concatenating the lines reproduces the file byte for byte, so any line
/// not touched by an edit is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line content without its terminator.
    pub fn content(&self, idx: usize) -> &str {
        let line = &self.lines[idx];
        &line[..line.len() - ending_len(line)]
    }

    /// The terminator of a line (`"\n"`, `"\r\n"`, or `""` for a final unterminated line).
    pub fn ending(&self, idx: usize) -> &str {
        let line = &self.lines[idx];
        &line[line.len() - ending_len(line)..]
    }

    /// The first terminator used in the file, `"\n"` when there is none.
    pub fn newline(&self) -> &str {
        self.lines
            .iter()
            .map(|l| &l[l.len() - ending_len(l)..])
            .find(|e| !e.is_empty())
            .unwrap_or("\n")
    }

    /// Replace a line's content, keeping its terminator.
    pub fn replace(&mut self, idx: usize, content: &str) {
        let ending = self.ending(idx).to_string();
        self.lines[idx] = format!("{}{}", content, ending);
    }

    /// Insert a new line directly after `idx`.
    ///
    /// The new line takes the terminator of line `idx`. When `idx` is the
    /// unterminated last line, it gets the file's newline and the inserted
    /// line becomes the unterminated last line instead.
    pub fn insert_after(&mut self, idx: usize, content: &str) {
        let ending = self.ending(idx).to_string();
        if ending.is_empty() {
            let newline = self.newline().to_string();
            self.lines[idx].push_str(&newline);
        }
        self.lines.insert(idx + 1, format!("{}{}", content, ending));
    }

    /// Remove the lines in `start..end`.
    pub fn remove_range(&mut self, start: usize, end: usize) {
        self.lines.drain(start..end);
    }
}

fn ending_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        2
    } else if line.ends_with('\n') {
        1
    } else {
        0
    }
}
