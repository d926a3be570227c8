use ropey::Rope;

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

/// An open text document: rope-backed text plus the client's version.
///
/// All offsets are character offsets, the unit the parser's tokens use.
#[derive(Debug, Clone)]
pub struct LspDocument {
    pub uri: Url,
    pub text: Rope,
    pub version: i32,
}

impl LspDocument {
    pub fn new(uri: Url, version: i32, text: &str) -> Self {
        Self {
            uri,
            text: Rope::from_str(text),
            version,
        }
    }

    /// Returns the current text of the document as a string.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    /// Converts an LSP position to a character offset, clamped to its line and to the document.
    ///
    /// `position.character` counts UTF-16 code units.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.text.len_lines() {
            return self.text.len_chars();
        }
        let line_start = self.text.line_to_char(line);
        let slice = self.text.line(line);
        let line_units = slice.char_to_utf16_cu(self.line_len_without_eol(line));
        let units = (position.character as usize).min(line_units);
        line_start + slice.utf16_cu_to_char(units)
    }

    /// Converts a character offset to an LSP position (UTF-16 columns), clamping past-the-end offsets.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len_chars());
        let line = self.text.char_to_line(offset);
        let chars_into_line = offset - self.text.line_to_char(line);
        let character = self.text.line(line).char_to_utf16_cu(chars_into_line);
        Position::new(line as u32, character as u32)
    }

    fn line_len_without_eol(&self, line: usize) -> usize {
        let slice = self.text.line(line);
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    /// Applies a list of content changes, full snapshots or ranged edits.
    /// Returns the updated text if the version is newer, otherwise an error.
    pub fn apply(&mut self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) -> Result<String, String> {
        if version <= self.version {
            return Err(format!("Version {} not newer than {}", version, self.version));
        }
        for change in &changes {
            match change.range {
                Some(range) => {
                    let start = self.offset_at(range.start);
                    let end = self.offset_at(range.end).max(start);
                    self.text.remove(start..end);
                    self.text.insert(start, &change.text);
                }
                None => self.text = Rope::from_str(&change.text),
            }
        }
        self.version = version;
        Ok(self.text())
    }
}
