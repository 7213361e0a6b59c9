use super::*;

#[test]
fn default_format_is_plain_base_size() {
    let format = FormatState::new();
    assert_eq!(format.current_style(), Style::default());
    assert_eq!(format.current_style().size, FontSize::Base);
    assert!(!format.bold());
    assert!(!format.underline());
    assert_eq!(format.heading(), Heading::None);
}

#[test]
fn bold_and_underline_are_independent() {
    let mut format = FormatState::new();
    format.toggle_bold();
    format.toggle_underline();
    format.set_heading(Heading::H2);

    let style = format.current_style();
    assert_eq!(style.weight, Weight::Bold);
    assert_eq!(style.decoration, Decoration::Underline);
    assert_eq!(style.size, FontSize::H2);

    format.toggle_bold();
    let style = format.current_style();
    assert_eq!(style.weight, Weight::Normal);
    assert_eq!(style.decoration, Decoration::Underline);
    assert_eq!(style.size, FontSize::H2);
}

#[test]
fn headings_are_mutually_exclusive() {
    let mut format = FormatState::new();
    let sequence = [
        Heading::H1,
        Heading::H2,
        Heading::H2,
        Heading::H1,
        Heading::H1,
        Heading::H2,
        Heading::H1,
    ];

    for heading in sequence {
        format.set_heading(heading);
        let h1 = format.is_active(FormatToggle::Heading(Heading::H1));
        let h2 = format.is_active(FormatToggle::Heading(Heading::H2));
        assert!(!(h1 && h2), "H1 and H2 active together after {heading:?}");
    }
}

#[test]
fn selecting_active_heading_again_clears_it() {
    let mut format = FormatState::new();
    format.set_heading(Heading::H1);
    assert_eq!(format.heading(), Heading::H1);
    format.set_heading(Heading::H1);
    assert_eq!(format.heading(), Heading::None);

    format.set_heading(Heading::H1);
    format.set_heading(Heading::H2);
    assert_eq!(format.heading(), Heading::H2);

    format.set_heading(Heading::None);
    assert_eq!(format.heading(), Heading::None);
    format.set_heading(Heading::None);
    assert_eq!(format.heading(), Heading::None);
}

#[test]
fn apply_flips_exactly_one_field() {
    let mut format = FormatState::new();
    format.apply(FormatToggle::Underline);
    assert!(format.underline());
    assert!(!format.bold());
    assert_eq!(format.heading(), Heading::None);

    format.apply(FormatToggle::Heading(Heading::H1));
    assert!(format.underline());
    assert!(format.is_active(FormatToggle::Heading(Heading::H1)));
    assert!(!format.is_active(FormatToggle::Heading(Heading::None)));
}

#[test]
fn current_style_is_a_snapshot() {
    let mut format = FormatState::new();
    format.toggle_bold();
    let snapshot = format.current_style();
    format.toggle_bold();

    assert!(snapshot.is_bold());
    assert!(!format.current_style().is_bold());
}

#[test]
fn font_sizes_grow_with_heading_level() {
    assert_eq!(FontSize::Base.points(), 18.0);
    assert_eq!(FontSize::H2.points(), 23.0);
    assert_eq!(FontSize::H1.points(), 30.0);
}

#[test]
fn toggle_labels() {
    assert_eq!(FormatToggle::Bold.label(), "Bold");
    assert_eq!(FormatToggle::Heading(Heading::H2).label(), "Heading 2");
}
