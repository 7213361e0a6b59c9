use crossterm::event::{KeyCode, KeyModifiers};
use unicode_width::UnicodeWidthStr;

use crate::editor::{FormatState, FormatToggle, Heading};

/// Columns between two buttons.
pub const BUTTON_GAP: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Bold,
    Underline,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Bold => "B",
            Icon::Underline => "U",
        }
    }
}

/// What a button shows: either an icon or a text label, never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonFace {
    Icon(Icon),
    Label(&'static str),
}

impl ButtonFace {
    pub fn text(&self) -> &'static str {
        match self {
            ButtonFace::Icon(icon) => icon.glyph(),
            ButtonFace::Label(label) => label,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarButton {
    pub face: ButtonFace,
    pub toggle: FormatToggle,
    shortcut: ButtonShortcut,
}

impl ToolbarButton {
    const fn new(face: ButtonFace, toggle: FormatToggle, shortcut: ButtonShortcut) -> Self {
        Self {
            face,
            toggle,
            shortcut,
        }
    }

    pub fn active_state(&self, format: &FormatState) -> bool {
        format.is_active(self.toggle)
    }

    /// Flips the one field this button controls. Existing text is unaffected.
    pub fn activate(&self, format: &mut FormatState) {
        format.apply(self.toggle);
    }

    /// Rendered text including padding, e.g. `" B "`.
    pub fn caption(&self) -> String {
        format!(" {} ", self.face.text())
    }

    pub fn width(&self) -> u16 {
        UnicodeWidthStr::width(self.caption().as_str()) as u16
    }

    pub fn shortcut_hint(&self) -> String {
        self.shortcut.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ButtonShortcut {
    key: char,
    modifiers: KeyModifiers,
}

impl ButtonShortcut {
    const fn ctrl(key: char) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    const fn alt(key: char) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::ALT,
        }
    }

    fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char(ch) => ch.eq_ignore_ascii_case(&self.key) && modifiers == self.modifiers,
            _ => false,
        }
    }
}

impl std::fmt::Display for ButtonShortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = if self.modifiers == KeyModifiers::ALT {
            "Alt"
        } else {
            "Ctrl"
        };
        write!(f, "{}-{}", prefix, self.key.to_ascii_uppercase())
    }
}

#[derive(Clone, Debug)]
pub struct Toolbar {
    buttons: Vec<ToolbarButton>,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            buttons: vec![
                ToolbarButton::new(
                    ButtonFace::Icon(Icon::Bold),
                    FormatToggle::Bold,
                    ButtonShortcut::ctrl('b'),
                ),
                ToolbarButton::new(
                    ButtonFace::Icon(Icon::Underline),
                    FormatToggle::Underline,
                    ButtonShortcut::ctrl('u'),
                ),
                ToolbarButton::new(
                    ButtonFace::Label("H1"),
                    FormatToggle::Heading(Heading::H1),
                    ButtonShortcut::alt('1'),
                ),
                ToolbarButton::new(
                    ButtonFace::Label("H2"),
                    FormatToggle::Heading(Heading::H2),
                    ButtonShortcut::alt('2'),
                ),
            ],
        }
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> &[ToolbarButton] {
        &self.buttons
    }

    /// Button under a column relative to the toolbar's left edge.
    pub fn button_at(&self, column: u16) -> Option<&ToolbarButton> {
        let mut x = 0u16;
        for button in &self.buttons {
            let width = button.width();
            if column >= x && column < x + width {
                return Some(button);
            }
            x += width + BUTTON_GAP;
        }
        None
    }

    pub fn shortcut_toggle(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<FormatToggle> {
        self.buttons
            .iter()
            .find(|button| button.shortcut.matches(code, modifiers))
            .map(|button| button.toggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toolbar_order() {
        let toolbar = Toolbar::default();
        let faces: Vec<&str> = toolbar.buttons().iter().map(|b| b.face.text()).collect();
        assert_eq!(faces, vec!["B", "U", "H1", "H2"]);
    }

    #[test]
    fn activation_flips_only_its_field() {
        let toolbar = Toolbar::default();
        let mut format = FormatState::new();

        toolbar.buttons()[0].activate(&mut format);
        assert!(format.bold());
        assert!(!format.underline());
        assert_eq!(format.heading(), Heading::None);
        assert!(toolbar.buttons()[0].active_state(&format));
        assert!(!toolbar.buttons()[1].active_state(&format));
    }

    #[test]
    fn heading_buttons_are_exclusive() {
        let toolbar = Toolbar::default();
        let mut format = FormatState::new();
        let h1 = toolbar.buttons()[2];
        let h2 = toolbar.buttons()[3];

        h1.activate(&mut format);
        assert!(h1.active_state(&format));
        h2.activate(&mut format);
        assert!(!h1.active_state(&format));
        assert!(h2.active_state(&format));
        h2.activate(&mut format);
        assert!(!h1.active_state(&format));
        assert!(!h2.active_state(&format));
    }

    #[test]
    fn hit_testing_follows_button_widths() {
        let toolbar = Toolbar::default();
        // " B " occupies 0..3, gap at 3, " U " at 4..7, gap, " H1 " at 8..12
        assert_eq!(toolbar.button_at(0).map(|b| b.toggle), Some(FormatToggle::Bold));
        assert_eq!(toolbar.button_at(2).map(|b| b.toggle), Some(FormatToggle::Bold));
        assert!(toolbar.button_at(3).is_none());
        assert_eq!(
            toolbar.button_at(4).map(|b| b.toggle),
            Some(FormatToggle::Underline)
        );
        assert_eq!(
            toolbar.button_at(11).map(|b| b.toggle),
            Some(FormatToggle::Heading(Heading::H1))
        );
        assert_eq!(
            toolbar.button_at(13).map(|b| b.toggle),
            Some(FormatToggle::Heading(Heading::H2))
        );
        assert!(toolbar.button_at(40).is_none());
    }

    #[test]
    fn shortcuts_map_to_toggles() {
        let toolbar = Toolbar::default();
        assert_eq!(
            toolbar.shortcut_toggle(KeyCode::Char('b'), KeyModifiers::CONTROL),
            Some(FormatToggle::Bold)
        );
        assert_eq!(
            toolbar.shortcut_toggle(KeyCode::Char('2'), KeyModifiers::ALT),
            Some(FormatToggle::Heading(Heading::H2))
        );
        assert_eq!(
            toolbar.shortcut_toggle(KeyCode::Char('b'), KeyModifiers::NONE),
            None
        );
        assert_eq!(toolbar.buttons()[2].shortcut_hint(), "Alt-1");
    }
}
