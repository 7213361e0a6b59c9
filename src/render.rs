use std::ops::Range;

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::editor::{Selection, StyledDocument, StyledRun};
use crate::theme::Theme;

const TAB_WIDTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorVisualPosition {
    pub line: usize,
    pub column: u16,
}

#[derive(Debug)]
pub struct RenderResult {
    pub lines: Vec<Line<'static>>,
    pub cursor: Option<CursorVisualPosition>,
    pub total_lines: usize,
}

/// Lays out a document's runs as wrapped terminal lines.
///
/// The caret is taken from `selection.end`; a non-collapsed selection is
/// highlighted. The document is only read.
pub fn render_document(
    document: &StyledDocument,
    selection: Option<Selection>,
    width: usize,
    theme: &Theme,
) -> RenderResult {
    let runs = document.runs();
    let mut renderer = Renderer::new(width.max(1), theme);
    renderer.render_runs(&runs, selection);
    renderer.finish()
}

struct Renderer<'a> {
    wrap_width: usize,
    theme: &'a Theme,
    cursor: Option<CursorVisualPosition>,
    lines: Vec<Line<'static>>,
    current_line_index: usize,
}

impl<'a> Renderer<'a> {
    fn new(wrap_width: usize, theme: &'a Theme) -> Self {
        Self {
            wrap_width,
            theme,
            cursor: None,
            lines: Vec::new(),
            current_line_index: 0,
        }
    }

    fn render_runs(&mut self, runs: &[StyledRun], selection: Option<Selection>) {
        let caret = selection.map(|selection| selection.end);
        let highlighted = selection
            .filter(|selection| !selection.is_collapsed())
            .map(|selection| {
                let (start, end) = selection.ordered();
                start..end
            });
        let fragments = collect_fragments(runs, caret, highlighted, self.theme);
        let lines = wrap_fragments(&fragments, self.wrap_width);
        self.consume_lines(lines);
    }

    fn consume_lines(&mut self, outputs: Vec<LineOutput>) {
        for output in outputs {
            let mut spans: Vec<Span<'static>> = Vec::with_capacity(output.spans.len());
            for segment in output.spans {
                spans.push(Span::styled(segment.text, segment.style));
            }
            if let Some(event) = output.events.first() {
                self.cursor = Some(CursorVisualPosition {
                    line: self.current_line_index,
                    column: event.column,
                });
            }
            self.lines.push(Line::from(spans));
            self.current_line_index += 1;
        }
    }

    fn finish(mut self) -> RenderResult {
        if self.lines.is_empty() {
            self.lines.push(Line::from(""));
        }
        let total_lines = self.lines.len();
        RenderResult {
            lines: self.lines,
            cursor: self.cursor,
            total_lines,
        }
    }
}

#[derive(Clone)]
struct LineSegment {
    text: String,
    style: Style,
}

#[derive(Clone)]
struct LineOutput {
    spans: Vec<LineSegment>,
    events: Vec<LocatedEvent>,
}

#[derive(Clone, Copy)]
struct LocatedEvent {
    column: u16,
}

#[derive(Clone)]
struct Fragment {
    text: String,
    style: Style,
    kind: FragmentKind,
    width: usize,
    events: Vec<TextEvent>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    Word,
    Whitespace,
}

#[derive(Clone)]
enum FragmentItem {
    Token(Fragment),
    LineBreak,
}

/// Caret position inside a fragment, in display columns.
#[derive(Clone, Copy)]
struct TextEvent {
    offset: usize,
}

fn collect_fragments(
    runs: &[StyledRun],
    caret: Option<usize>,
    highlighted: Option<Range<usize>>,
    theme: &Theme,
) -> Vec<FragmentItem> {
    let mut tokenizer = Tokenizer::default();
    let mut end = 0;
    for run in runs {
        let base = theme.text_style(&run.style);
        for (offset, ch) in run.text.chars().enumerate() {
            let idx = run.range.start + offset;
            if caret == Some(idx) {
                tokenizer.mark_caret();
            }
            let style = if highlighted.as_ref().is_some_and(|range| range.contains(&idx)) {
                base.patch(theme.selection_style())
            } else {
                base
            };
            tokenizer.push(ch, style);
        }
        end = run.range.end;
    }
    if caret == Some(end) {
        tokenizer.mark_caret();
    }
    tokenizer.finish()
}

#[derive(Default)]
struct Tokenizer {
    builder: Option<TokenBuilder>,
    pending_events: Vec<TextEvent>,
    fragments: Vec<FragmentItem>,
}

impl Tokenizer {
    fn mark_caret(&mut self) {
        self.pending_events.push(TextEvent { offset: 0 });
    }

    fn push(&mut self, ch: char, style: Style) {
        match ch {
            '\r' => {}
            '\n' => {
                self.flush(style);
                self.fragments.push(FragmentItem::LineBreak);
            }
            '\t' => {
                for _ in 0..TAB_WIDTH {
                    self.push_visible(' ', style);
                }
            }
            _ => self.push_visible(ch, style),
        }
    }

    fn push_visible(&mut self, ch: char, style: Style) {
        let is_whitespace = ch.is_whitespace();
        if let Some(current) = self.builder.as_mut()
            && current.matches(is_whitespace, style)
        {
            current.add_events(&mut self.pending_events);
            current.push_char(ch);
            return;
        }
        // A caret before `ch` belongs to the token that starts with it.
        if let Some(existing) = self.builder.take() {
            self.fragments.push(FragmentItem::Token(existing.finish()));
        }
        let mut new_builder = TokenBuilder::new(style, is_whitespace);
        new_builder.add_events(&mut self.pending_events);
        new_builder.push_char(ch);
        self.builder = Some(new_builder);
    }

    fn flush(&mut self, style: Style) {
        if let Some(mut token) = self.builder.take() {
            token.add_events(&mut self.pending_events);
            self.fragments.push(FragmentItem::Token(token.finish()));
        } else if !self.pending_events.is_empty() {
            self.fragments.push(FragmentItem::Token(Fragment {
                text: String::new(),
                style,
                kind: FragmentKind::Word,
                width: 0,
                events: self.pending_events.drain(..).collect(),
            }));
        }
    }

    fn finish(mut self) -> Vec<FragmentItem> {
        self.flush(Style::default());
        self.fragments
    }
}

struct TokenBuilder {
    text: String,
    style: Style,
    kind: FragmentKind,
    width: usize,
    events: Vec<TextEvent>,
}

impl TokenBuilder {
    fn new(style: Style, is_whitespace: bool) -> Self {
        Self {
            text: String::new(),
            style,
            kind: if is_whitespace {
                FragmentKind::Whitespace
            } else {
                FragmentKind::Word
            },
            width: 0,
            events: Vec::new(),
        }
    }

    fn matches(&self, is_whitespace: bool, style: Style) -> bool {
        self.style == style
            && matches!(
                (self.kind, is_whitespace),
                (FragmentKind::Whitespace, true) | (FragmentKind::Word, false)
            )
    }

    fn add_events(&mut self, pending: &mut Vec<TextEvent>) {
        for mut event in pending.drain(..) {
            event.offset = self.width;
            self.events.push(event);
        }
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
        self.width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }

    fn finish(self) -> Fragment {
        Fragment {
            text: self.text,
            style: self.style,
            kind: self.kind,
            width: self.width,
            events: self.events,
        }
    }
}

fn wrap_fragments(fragments: &[FragmentItem], width: usize) -> Vec<LineOutput> {
    let mut outputs = Vec::new();
    let mut builder = LineBuilder::new();
    let mut pending_whitespace: Vec<Fragment> = Vec::new();

    for fragment in fragments {
        match fragment {
            FragmentItem::LineBreak => {
                builder.consume_pending(&mut pending_whitespace);
                outputs.push(builder.build_line());
                builder = LineBuilder::new();
            }
            FragmentItem::Token(token) => match token.kind {
                FragmentKind::Whitespace => {
                    pending_whitespace.push(token.clone());
                }
                FragmentKind::Word => {
                    let whitespace_width: usize =
                        pending_whitespace.iter().map(|item| item.width).sum();
                    if builder.current_width() > 0
                        && builder.current_width() + whitespace_width + token.width > width
                    {
                        builder.consume_pending(&mut pending_whitespace);
                        outputs.push(builder.build_line());
                        builder = LineBuilder::new();
                    }

                    builder.append_with_pending(token.clone(), &mut pending_whitespace);
                }
            },
        }
    }

    builder.consume_pending(&mut pending_whitespace);
    outputs.push(builder.build_line());
    outputs
}

struct LineBuilder {
    segments: Vec<LineSegment>,
    events: Vec<LocatedEvent>,
    width: usize,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
            events: Vec::new(),
            width: 0,
        }
    }

    fn current_width(&self) -> usize {
        self.width
    }

    fn append_with_pending(&mut self, token: Fragment, pending_whitespace: &mut Vec<Fragment>) {
        self.consume_pending(pending_whitespace);
        self.append_token(token);
    }

    fn consume_pending(&mut self, pending_whitespace: &mut Vec<Fragment>) {
        for fragment in pending_whitespace.drain(..) {
            self.append_token(fragment);
        }
    }

    fn append_token(&mut self, fragment: Fragment) {
        if !fragment.text.is_empty() {
            self.segments.push(LineSegment {
                text: fragment.text,
                style: fragment.style,
            });
            self.width += fragment.width;
        }

        for event in fragment.events {
            let column = self.width.saturating_sub(fragment.width) + event.offset;
            self.events.push(LocatedEvent {
                column: u16::try_from(column).unwrap_or(u16::MAX),
            });
        }
    }

    fn build_line(mut self) -> LineOutput {
        if self.segments.is_empty() {
            self.segments.push(LineSegment {
                text: String::new(),
                style: Style::default(),
            });
        }
        self.events.sort_by_key(|event| event.column);
        LineOutput {
            spans: self.segments,
            events: self.events,
        }
    }
}

pub fn line_text(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
