use std::{
    env,
    fs::File,
    io,
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rich_typing::editor::{EditEvent, EditOutcome, FormatToggle, RichTextEditor};
use rich_typing::input::TextField;
use rich_typing::render::{RenderResult, render_document};
use rich_typing::theme::Theme;
use rich_typing::toolbar::{BUTTON_GAP, Toolbar};

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);
const PLACEHOLDER: &str = "Type something here...";
const USAGE: &str = "Usage: rich-typing [--log <file>]";

#[derive(Debug, Default)]
struct Config {
    log_path: Option<PathBuf>,
    theme: Theme,
}

fn main() -> Result<()> {
    run()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Config>> {
    let mut config = Config::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log" => {
                let Some(path) = args.next() else {
                    bail!("--log requires a file path");
                };
                config.log_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(Some(config))
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run() -> Result<()> {
    let Some(config) = parse_args(env::args().skip(1))? else {
        eprintln!("{USAGE}");
        return Ok(());
    };
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }
    info!("starting rich-typing");

    let mut app = App::new(config.theme);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .ok();
    terminal.show_cursor().ok();

    info!("exiting rich-typing");
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt);
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct App {
    editor: RichTextEditor,
    field: TextField,
    toolbar: Toolbar,
    theme: Theme,
    scroll_top: usize,
    should_quit: bool,
    status_message: Option<(String, Instant)>,
    last_toolbar_area: Rect,
}

impl App {
    fn new(theme: Theme) -> Self {
        Self {
            editor: RichTextEditor::new(),
            field: TextField::new(),
            toolbar: Toolbar::new(),
            theme,
            scroll_top: 0,
            should_quit: false,
            status_message: None,
            last_toolbar_area: Rect::default(),
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let editor_area = vertical[0];
        let toolbar_area = vertical[1];
        let status_area = vertical[2];

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(editor_area);
        let text_area = horizontal[0];
        let scrollbar_area = horizontal[1];

        let render = render_document(
            self.editor.document(),
            Some(self.editor.selection()),
            text_area.width.max(1) as usize,
            &self.theme,
        );

        let viewport_height = text_area.height as usize;
        self.adjust_scroll(&render, viewport_height);

        let text = if self.editor.document().is_empty() {
            Text::from(Line::from(Span::styled(
                PLACEHOLDER,
                self.theme.placeholder_style(),
            )))
        } else {
            Text::from(render.lines.clone())
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::NONE))
            .scroll((self.scroll_top as u16, 0));
        frame.render_widget(paragraph, text_area);

        let mut scrollbar_state = ScrollbarState::new(render.total_lines).position(self.scroll_top);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);

        if let Some(cursor) = render.cursor
            && cursor.line >= self.scroll_top
            && cursor.line < self.scroll_top + viewport_height
            && text_area.width > 0
        {
            let cursor_y = text_area.y + (cursor.line - self.scroll_top) as u16;
            let cursor_x = text_area.x + cursor.column.min(text_area.width - 1);
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }

        self.render_toolbar(frame, toolbar_area);

        let status_text = self.status_line(render.total_lines);
        let status_widget = Paragraph::new(Line::from(Span::styled(
            status_text,
            self.theme.status_bar_style(),
        )))
        .style(self.theme.status_bar_style());
        frame.render_widget(status_widget, status_area);
    }

    fn render_toolbar(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.last_toolbar_area = inner;

        let gap = " ".repeat(BUTTON_GAP as usize);
        let mut spans = Vec::new();
        for (idx, button) in self.toolbar.buttons().iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(gap.clone()));
            }
            let active = button.active_state(self.editor.format());
            spans.push(Span::styled(
                button.caption(),
                self.theme.toolbar_button_style(active),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn status_line(&mut self, total_lines: usize) -> String {
        self.prune_status_message();
        let (start, end) = self.editor.selection().ordered();
        let position = if start == end {
            format!("{}", end)
        } else {
            format!("{}-{}", start, end)
        };
        if let Some((message, _)) = &self.status_message {
            return format!(" {position} | {message}");
        }

        let shortcuts = self
            .toolbar
            .buttons()
            .iter()
            .map(|button| format!("{} {}", button.shortcut_hint(), button.face.text()))
            .collect::<Vec<_>>()
            .join(" | ");
        format!(
            " {} | Chars: {} | Lines: {} | {} | Ctrl-Q quit",
            position,
            self.editor.document().len(),
            total_lines,
            shortcuts
        )
    }

    fn prune_status_message(&mut self) {
        if let Some((_, instant)) = &self.status_message
            && instant.elapsed() > STATUS_TIMEOUT
        {
            self.status_message = None;
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn adjust_scroll(&mut self, render: &RenderResult, viewport_height: usize) {
        let viewport = viewport_height.max(1);
        let max_scroll = render
            .total_lines
            .saturating_sub(viewport)
            .min(render.total_lines);
        if self.scroll_top > max_scroll {
            self.scroll_top = max_scroll;
        }
        if let Some(cursor) = &render.cursor {
            if cursor.line < self.scroll_top {
                self.scroll_top = cursor.line;
            } else if cursor.line >= self.scroll_top + viewport_height {
                let target = cursor.line.saturating_add(1);
                self.scroll_top = target.saturating_sub(viewport);
            }
        }
        if self.scroll_top > max_scroll {
            self.scroll_top = max_scroll;
        }
    }

    fn apply_toggle(&mut self, toggle: FormatToggle) {
        self.editor.apply_toggle(toggle);
        let state = if self.editor.format().is_active(toggle) {
            "on"
        } else {
            "off"
        };
        self.set_status(format!("{} {}", toggle.label(), state));
    }

    /// Feeds an event from the text field into the editor.
    ///
    /// A rejected event leaves the last good document on screen and puts the
    /// field back in sync with it.
    fn submit(&mut self, event: Option<EditEvent>) {
        let Some(event) = event else {
            return;
        };
        match self.editor.handle_edit(&event) {
            Ok(EditOutcome::Unchanged) => {}
            Ok(outcome) => {
                tracing::trace!(?outcome, "document updated");
            }
            Err(err) => {
                let caret = self.editor.selection().end;
                let text = self.editor.text().to_string();
                self.field.reset(&text, caret);
                self.set_status(format!("Edit rejected: {err}"));
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code, modifiers),
            Event::Paste(content) => {
                let event = self.field.insert_str(&content);
                self.submit(event);
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(toggle) = self.toolbar.shortcut_toggle(code, modifiers) {
            self.apply_toggle(toggle);
            return;
        }

        let extend = modifiers.contains(KeyModifiers::SHIFT);
        let word = modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(KeyModifiers::ALT);
        let event = match (code, modifiers) {
            (KeyCode::Char('q'), m) | (KeyCode::Char('c'), m)
                if m.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                None
            }
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.field.select_all()
            }
            (KeyCode::Char('w'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.field.delete_word_backward()
            }
            (KeyCode::Char(ch), m)
                if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
            {
                self.field.insert_char(ch)
            }
            (KeyCode::Tab, _) => self.field.insert_char('\t'),
            (KeyCode::Enter, _) => self.field.newline(),
            (KeyCode::Backspace, m) if m.contains(KeyModifiers::ALT) => {
                self.field.delete_word_backward()
            }
            (KeyCode::Backspace, _) => self.field.backspace(),
            (KeyCode::Delete, _) => self.field.delete_forward(),
            (KeyCode::Left, _) if word => self.field.move_word_left(extend),
            (KeyCode::Right, _) if word => self.field.move_word_right(extend),
            (KeyCode::Left, _) => self.field.move_left(extend),
            (KeyCode::Right, _) => self.field.move_right(extend),
            (KeyCode::Up, _) => self.field.move_vertical(-1, extend),
            (KeyCode::Down, _) => self.field.move_vertical(1, extend),
            (KeyCode::Home, _) => self.field.move_home(extend),
            (KeyCode::End, _) => self.field.move_end(extend),
            _ => None,
        };
        self.submit(event);
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_top = self.scroll_top.saturating_sub(1);
            }
            MouseEventKind::ScrollDown => {
                self.scroll_top = self.scroll_top.saturating_add(1);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.last_toolbar_area;
                if event.row != area.y || event.column < area.x {
                    return;
                }
                if let Some(button) = self.toolbar.button_at(event.column - area.x) {
                    let toggle = button.toggle;
                    self.apply_toggle(toggle);
                }
            }
            _ => {}
        }
    }

    fn on_tick(&mut self) {
        self.prune_status_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parse_args_accepts_log_path() {
        let config = parse_args(args(&["--log", "typing.log"]))
            .unwrap()
            .unwrap();
        assert_eq!(config.log_path, Some(PathBuf::from("typing.log")));
    }

    #[test]
    fn parse_args_rejects_unknown_and_incomplete() {
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--log"])).is_err());
        assert!(parse_args(args(&["--help"])).unwrap().is_none());
    }

    #[test]
    fn typing_through_app_stamps_current_format() {
        let mut app = App::new(Theme::default());
        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('b'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Char('B'), KeyModifiers::SHIFT);

        let document = app.editor.document();
        assert_eq!(document.text(), "aB");
        assert!(!document.as_slice()[0].style.is_bold());
        assert!(document.as_slice()[1].style.is_bold());
        assert_eq!(app.field.text(), app.editor.text());
    }

    #[test]
    fn paste_replaces_selection() {
        let mut app = App::new(Theme::default());
        app.handle_event(Event::Paste("hello".to_string()));
        app.handle_key(KeyCode::Char('a'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        app.handle_event(Event::Paste("bye".to_string()));

        let document = app.editor.document();
        assert_eq!(document.text(), "bye");
        assert!(document.iter().all(|styled| styled.style.is_underlined()));
    }
}
