/// Heading level stamped onto newly typed characters.
///
/// H1 and H2 behave like radio buttons: selecting one clears the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heading {
    #[default]
    None,
    H1,
    H2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Decoration {
    #[default]
    None,
    Underline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSize {
    #[default]
    Base,
    H2,
    H1,
}

impl FontSize {
    /// Point size used by graphical renderers.
    pub fn points(self) -> f32 {
        match self {
            FontSize::H1 => 30.0,
            FontSize::H2 => 23.0,
            FontSize::Base => 18.0,
        }
    }
}

/// The formatting bound to a single character when it is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub weight: Weight,
    pub decoration: Decoration,
    pub size: FontSize,
}

impl Style {
    pub fn is_bold(&self) -> bool {
        self.weight == Weight::Bold
    }

    pub fn is_underlined(&self) -> bool {
        self.decoration == Decoration::Underline
    }
}

/// One toolbar-controllable field of [`FormatState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatToggle {
    Bold,
    Underline,
    Heading(Heading),
}

/// The toggles that apply to characters typed from now on.
///
/// Changing a toggle never restyles characters that already exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatState {
    bold: bool,
    underline: bool,
    heading: Heading,
}

impl FormatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn toggle_bold(&mut self) {
        self.bold = !self.bold;
    }

    pub fn toggle_underline(&mut self) {
        self.underline = !self.underline;
    }

    /// Selecting the active heading again turns headings off.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = if heading == self.heading {
            Heading::None
        } else {
            heading
        };
    }

    pub fn apply(&mut self, toggle: FormatToggle) {
        match toggle {
            FormatToggle::Bold => self.toggle_bold(),
            FormatToggle::Underline => self.toggle_underline(),
            FormatToggle::Heading(heading) => self.set_heading(heading),
        }
    }

    pub fn is_active(&self, toggle: FormatToggle) -> bool {
        match toggle {
            FormatToggle::Bold => self.bold,
            FormatToggle::Underline => self.underline,
            FormatToggle::Heading(Heading::None) => self.heading == Heading::None,
            FormatToggle::Heading(heading) => self.heading == heading,
        }
    }

    pub fn current_style(&self) -> Style {
        Style {
            weight: if self.bold {
                Weight::Bold
            } else {
                Weight::Normal
            },
            decoration: if self.underline {
                Decoration::Underline
            } else {
                Decoration::None
            },
            size: match self.heading {
                Heading::H1 => FontSize::H1,
                Heading::H2 => FontSize::H2,
                Heading::None => FontSize::Base,
            },
        }
    }
}

impl FormatToggle {
    pub fn label(self) -> &'static str {
        match self {
            FormatToggle::Bold => "Bold",
            FormatToggle::Underline => "Underline",
            FormatToggle::Heading(Heading::H1) => "Heading 1",
            FormatToggle::Heading(Heading::H2) => "Heading 2",
            FormatToggle::Heading(Heading::None) => "Body text",
        }
    }
}
