use ratatui::style::{Color, Modifier, Style};

use crate::editor::{FontSize, Style as TextStyle};

/// Theme configuration for the editor
#[derive(Clone, Debug)]
pub struct Theme {
    /// Background color for the editor
    pub background: Color,

    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Background color for the status bar
    pub status_bar_bg: Color,

    /// Foreground color for active selection
    pub selection_fg: Color,

    /// Background color for active selection
    pub selection_bg: Color,

    /// Text color for characters typed with the H1 toggle
    pub heading1_fg: Color,

    /// Text color for characters typed with the H2 toggle
    pub heading2_fg: Color,

    /// Color of the placeholder shown while the document is empty
    pub placeholder_fg: Color,

    /// Foreground color for inactive toolbar buttons
    pub toolbar_fg: Color,

    /// Background color for inactive toolbar buttons
    pub toolbar_bg: Color,

    /// Foreground color for active toolbar buttons
    pub toolbar_active_fg: Color,

    /// Background color for active toolbar buttons
    pub toolbar_active_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            selection_fg: Color::White,
            selection_bg: Color::LightBlue,
            heading1_fg: Color::LightYellow,
            heading2_fg: Color::LightCyan,
            placeholder_fg: Color::DarkGray,
            toolbar_fg: Color::White,
            toolbar_bg: Color::DarkGray,
            toolbar_active_fg: Color::Black,
            toolbar_active_bg: Color::LightMagenta,
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the style for the status bar
    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    /// Get the style for selected text
    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder_fg)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get the style for a toolbar button in the given state
    pub fn toolbar_button_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.toolbar_active_fg)
                .bg(self.toolbar_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.toolbar_fg).bg(self.toolbar_bg)
        }
    }

    /// Terminal style for a character style.
    ///
    /// Cells cannot change font size, so headings are told apart by color.
    pub fn text_style(&self, style: &TextStyle) -> Style {
        let mut terminal = Style::default().bg(self.background);
        if style.is_bold() {
            terminal = terminal.add_modifier(Modifier::BOLD);
        }
        if style.is_underlined() {
            terminal = terminal.add_modifier(Modifier::UNDERLINED);
        }
        match style.size {
            FontSize::H1 => terminal.fg(self.heading1_fg).add_modifier(Modifier::BOLD),
            FontSize::H2 => terminal.fg(self.heading2_fg),
            FontSize::Base => terminal,
        }
    }
}
