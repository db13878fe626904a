// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive comparison shell (ratatui + crossterm). Opens in analysis mode; the side-by-side
//! view lays out both documents in columns and draws connectors in the gutter once each frame
//! has been laid out.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::{debug, warn};

use crate::layout::{layout_columns, ColumnsLayout, LayoutOptions, Unmounted, Viewport};
use crate::model::ComparisonSource;
use crate::render::{render_side_by_side_annotated, CanvasError, LineSpan, Overlay};
use crate::ui::ViewMode;
use crate::view::{analysis_summary, ComparisonController, FrameQueue};

mod chrome;
mod demo;
mod theme;

pub use demo::{demo_comparison, DEMO_LEFT, DEMO_RIGHT};

use chrome::{
    centered_rect, column_header, footer_line, help_lines, side_by_side_title, summary_lines,
    view_title,
};
use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(3);
const HELP_SIZE: (u16, u16) = (52, 11);
const WHEEL_STEP: isize = 3;

/// Startup settings for [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiOptions {
    pub mode: ViewMode,
    pub connectors: bool,
    pub gutter_width: usize,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            mode: ViewMode::Analysis,
            connectors: true,
            gutter_width: LayoutOptions::default().gutter_width,
        }
    }
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(source: Option<ComparisonSource>, options: TuiOptions) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(source, options, theme);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        // A changed overlay is only visible on the next frame; skip the wait.
        let timeout = if app.after_frame() { Duration::ZERO } else { POLL_INTERVAL };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse.kind),
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }
        }
        app.expire_toast(Instant::now());
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (main_area, footer_area) = (chunks[0], chunks[1]);

    match app.controller.state().mode() {
        ViewMode::Analysis => {
            app.layout = None;
            draw_analysis(frame, app, main_area);
        }
        ViewMode::SideBySide => draw_side_by_side(frame, app, main_area),
    }

    let footer = footer_line(
        app.controller.state().mode(),
        app.controller.state().connectors_enabled(),
        app.toast.as_ref().map(|toast| toast.message.as_str()),
        &app.theme,
    );
    frame.render_widget(Paragraph::new(footer), footer_area);

    if app.help_visible {
        let popup = centered_rect(HELP_SIZE.0, HELP_SIZE.1, area);
        let help = Paragraph::new(help_lines()).style(app.theme.base_style()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Help", '?', None))
                .border_style(app.theme.panel_border_style(true)),
        );
        frame.render_widget(Clear, popup);
        frame.render_widget(help, popup);
    }
}

fn draw_analysis(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Analysis", 'a', None))
        .border_style(app.theme.panel_border_style(true));

    let lines = match app.controller.source() {
        Some(source) => summary_lines(
            &analysis_summary(source),
            (source.left.label(), source.right.label()),
            &app.theme,
        ),
        None => vec![Line::from("No documents loaded.")],
    };
    frame.render_widget(Paragraph::new(lines).style(app.theme.base_style()).block(block), area);
}

fn draw_side_by_side(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let labels = app.controller.source().map(|source| (source.left.label(), source.right.label()));
    let title = side_by_side_title(
        labels,
        app.controller.state().connectors_enabled(),
        app.controller.overlay().len(),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(app.theme.panel_border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width == 0 {
        app.layout = None;
        return;
    }
    let header_area = Rect { height: 1, ..inner };
    let body_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };

    app.lay_out(body_area.width as usize, body_area.height as usize);
    let Some(layout) = app.layout.as_ref() else {
        frame.render_widget(Paragraph::new("No documents to compare."), body_area);
        return;
    };

    if let Some(source) = app.controller.source() {
        let header = column_header(
            (source.left.label(), source.right.label()),
            layout.options(),
            app.theme.base_style().add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Paragraph::new(header), header_area);
    }

    match side_by_side_text(layout, app.controller.overlay(), &app.theme, app.scroll, body_area.height)
    {
        Ok(text) => frame.render_widget(Paragraph::new(text), body_area),
        Err(err) => {
            warn!(error = %err, "side-by-side render failed");
            let message = Line::styled(format!("render failed: {err}"), app.theme.error_style());
            frame.render_widget(Paragraph::new(message), body_area);
        }
    }
}

/// Visible window of the side-by-side canvas with highlight, connector and placeholder styles.
fn side_by_side_text(
    layout: &ColumnsLayout,
    overlay: &Overlay,
    theme: &TuiTheme,
    scroll: usize,
    height: u16,
) -> Result<Text<'static>, CanvasError> {
    let render = render_side_by_side_annotated(layout, overlay)?;
    let lines = render.text.split('\n').collect::<Vec<_>>();
    let mut styles = lines
        .iter()
        .map(|line| vec![None::<Style>; line.chars().count()])
        .collect::<Vec<_>>();

    for (span_ref, runs) in &render.highlight_index {
        if let Some(span) = layout.span(*span_ref) {
            paint(&mut styles, runs, theme.highlight_style(span.category()));
        }
    }
    for (category, run) in &render.connector_runs {
        paint(&mut styles, std::slice::from_ref(run), theme.connector_style(*category));
    }
    paint(&mut styles, &render.unmatched_runs, theme.unmatched_style());

    let visible = lines
        .iter()
        .zip(&styles)
        .skip(scroll)
        .take(height as usize)
        .map(|(line, styles)| styled_line(line, styles, theme.base_style()))
        .collect::<Vec<_>>();
    Ok(Text::from(visible))
}

fn paint(styles: &mut [Vec<Option<Style>>], runs: &[LineSpan], style: Style) {
    for &(line, x0, x1) in runs {
        if let Some(row) = styles.get_mut(line) {
            for cell in row.iter_mut().take(x1.saturating_add(1)).skip(x0) {
                *cell = Some(style);
            }
        }
    }
}

/// Groups consecutive chars of equal style into spans.
fn styled_line(line: &str, styles: &[Option<Style>], base: Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_style = None::<Style>;

    for (idx, ch) in line.chars().enumerate() {
        let style = styles.get(idx).copied().flatten();
        if style != current_style && !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), current_style.unwrap_or(base)));
        }
        current_style = style;
        current.push(ch);
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, current_style.unwrap_or(base)));
    }
    Line::from(spans)
}

#[derive(Debug)]
struct Toast {
    message: String,
    shown_at: Instant,
}

struct App {
    controller: ComparisonController,
    theme: TuiTheme,
    gutter_width: usize,
    scroll: usize,
    /// Layout of the frame drawn last; `None` outside side-by-side.
    layout: Option<ColumnsLayout>,
    last_viewport: Option<Viewport>,
    help_visible: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(source: Option<ComparisonSource>, options: TuiOptions, theme: TuiTheme) -> Self {
        let mut controller = ComparisonController::new(source, FrameQueue::new());
        if !options.connectors {
            controller.on_connectors_toggle(false, &Unmounted);
        }
        if options.mode == ViewMode::SideBySide {
            controller.on_mode_change(ViewMode::SideBySide);
        }

        Self {
            controller,
            theme,
            gutter_width: options.gutter_width,
            scroll: 0,
            layout: None,
            last_viewport: None,
            help_visible: false,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        self.handle_key_code(key.code);
    }

    fn handle_mouse(&mut self, kind: MouseEventKind) {
        match kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            _ => {}
        }
    }

    /// Returns whether the key did anything.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.help_visible {
                    self.help_visible = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') => self.help_visible = !self.help_visible,
            KeyCode::Char('s') => self.set_mode(ViewMode::SideBySide),
            KeyCode::Char('a') => self.set_mode(ViewMode::Analysis),
            KeyCode::Tab => {
                let next = match self.controller.state().mode() {
                    ViewMode::Analysis => ViewMode::SideBySide,
                    ViewMode::SideBySide => ViewMode::Analysis,
                };
                self.set_mode(next);
            }
            KeyCode::Char('c') => self.toggle_connectors(),
            KeyCode::Char('r') => {
                if self.controller.state().mode() != ViewMode::SideBySide {
                    return false;
                }
                self.controller.refresh();
                self.set_toast("rows rebuilt");
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(self.page_size()),
            KeyCode::PageUp => self.scroll_by(-self.page_size()),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = usize::MAX,
            _ => return false,
        }
        true
    }

    fn set_mode(&mut self, mode: ViewMode) {
        self.controller.on_mode_change(mode);
        if mode == ViewMode::Analysis {
            self.layout = None;
            self.last_viewport = None;
        }
    }

    fn toggle_connectors(&mut self) {
        let enabled = !self.controller.state().connectors_enabled();
        match self.layout.as_ref() {
            Some(layout) => self.controller.on_connectors_toggle(enabled, layout),
            None => self.controller.on_connectors_toggle(enabled, &Unmounted),
        }
        self.set_toast(if enabled { "connectors on" } else { "connectors off" });
    }

    fn scroll_by(&mut self, delta: isize) {
        if self.controller.state().mode() != ViewMode::SideBySide {
            return;
        }
        self.scroll = self.scroll.saturating_add_signed(delta);
    }

    fn page_size(&self) -> isize {
        let height = self.last_viewport.map_or(10, |viewport| viewport.height);
        isize::try_from(height.saturating_sub(1).max(1)).unwrap_or(isize::MAX)
    }

    /// Lays out current rows for a `width`×`height` body, clamping the scroll offset.
    fn lay_out(&mut self, width: usize, height: usize) {
        let Some(rows) = self.controller.rows() else {
            self.layout = None;
            return;
        };

        let options = LayoutOptions {
            gutter_width: self.gutter_width,
            ..LayoutOptions::default()
        }
        .fit_width(width);
        let viewport = Viewport::new(width, height);
        let mut layout = layout_columns(rows, options, viewport.scrolled_to(self.scroll));
        if self.scroll > layout.max_scroll() {
            self.scroll = layout.max_scroll();
            layout = layout_columns(rows, options, viewport.scrolled_to(self.scroll));
        }
        self.layout = Some(layout);
    }

    /// Runs deferred work and viewport-driven redraws against the frame just drawn.
    ///
    /// Returns whether the overlay may have changed.
    fn after_frame(&mut self) -> bool {
        let Some(layout) = self.layout.as_ref() else {
            self.last_viewport = None;
            return false;
        };

        let viewport = layout.viewport();
        let deferred = self.controller.after_layout(layout);
        let moved = self.last_viewport.is_some_and(|last| last != viewport);
        if moved && deferred == 0 {
            self.controller.on_viewport_change(layout);
        }
        self.last_viewport = Some(viewport);
        deferred > 0 || moved
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= TOAST_TTL)
        {
            self.toast = None;
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
