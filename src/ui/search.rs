use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Prefix drawn in front of the search input.
pub(crate) const SEARCH_PROMPT: &str = "Search: ";

/// Text input backing the dashboard search bar.
#[derive(Debug, Default, Clone)]
pub(crate) struct SearchInput {
    pub(crate) query: String,
}

impl SearchInput {
    pub(crate) fn with_query(query: &str) -> Self {
        Self {
            query: query.to_string(),
        }
    }

    /// Append a character, ignoring control characters. Returns `true` when
    /// the query changed.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.query.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub(crate) fn clear(&mut self) -> bool {
        if self.query.is_empty() {
            return false;
        }
        self.query.clear();
        true
    }

    /// Cursor column relative to the start of the prompt, in terminal cells.
    pub(crate) fn cursor_offset(&self) -> u16 {
        (SEARCH_PROMPT.width() + self.query.width()) as u16
    }

    /// Render the prompt, highlighting the query while it is being edited.
    pub(crate) fn build_line(query: &str, editing: bool) -> Line<'static> {
        let prompt_style = Style::default().fg(Color::Gray);
        let query_style = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = if query.is_empty() && !editing {
            Span::styled("press / to search", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(query.to_string(), query_style)
        };
        Line::from(vec![Span::styled(SEARCH_PROMPT, prompt_style), text])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_tracks_changes() {
        let mut input = SearchInput::default();
        assert!(input.push_char('b'));
        assert!(input.push_char('i'));
        assert!(!input.push_char('\n'));
        assert_eq!(input.query, "bi");
        assert!(input.backspace());
        assert_eq!(input.query, "b");
        assert!(input.clear());
        assert!(!input.clear());
        assert!(!input.backspace());
    }

    #[test]
    fn cursor_counts_characters_not_bytes() {
        let input = SearchInput::with_query("ü");
        assert_eq!(input.cursor_offset(), SEARCH_PROMPT.len() as u16 + 1);
    }

    #[test]
    fn cursor_skips_both_cells_of_wide_characters() {
        let input = SearchInput::with_query("数学");
        assert_eq!(input.cursor_offset(), SEARCH_PROMPT.len() as u16 + 4);

        let input = SearchInput::with_query("a😊");
        assert_eq!(input.cursor_offset(), SEARCH_PROMPT.len() as u16 + 3);
    }
}
