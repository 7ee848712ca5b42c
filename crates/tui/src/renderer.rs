use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use magdock_core::session::{DockSession, DockSnapshot};
use magdock_core::views::{dock_origin, render_dock};
use magdock_protocol::{Point, RenderCommand, ThemeToken, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};

/// Dock units per terminal column.
const UNITS_PER_COL: f64 = 4.0;
/// Dock units per terminal row. Cells are roughly twice as tall as wide.
const UNITS_PER_ROW: f64 = 8.0;
const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::DockBackground => Color::Rgb(40, 40, 40),
        ThemeToken::DockBorder => Color::DarkGray,
        ThemeToken::IconBlue => Color::Rgb(61, 139, 253),
        ThemeToken::IconGreen => Color::Rgb(52, 199, 89),
        ThemeToken::IconRed => Color::Rgb(255, 69, 58),
        ThemeToken::IconPurple => Color::Rgb(191, 90, 242),
        ThemeToken::IconOrange => Color::Rgb(255, 159, 10),
        ThemeToken::IconGray => Color::Rgb(142, 142, 147),
        ThemeToken::IconBorder => Color::DarkGray,
        ThemeToken::ActiveIndicator => Color::White,
        ThemeToken::TooltipBackground => Color::Rgb(48, 48, 48),
        ThemeToken::TooltipText => Color::White,
    }
}

/// Maps dock units to cells inside `area`, following the command stream's
/// transforms.
struct Raster<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    stack: Vec<Point>,
}

impl Raster<'_> {
    fn offset(&self) -> Point {
        self.stack.last().copied().unwrap_or(Point::new(0.0, 0.0))
    }

    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let o = self.offset();
        let col = ((x + o.x) / UNITS_PER_COL).floor();
        let row = ((y + o.y) / UNITS_PER_ROW).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.area.width) || row >= f64::from(self.area.height)
        {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }

    /// Every cell whose center falls inside the rect.
    fn cells(&self, rect: &magdock_protocol::Rect) -> Vec<(u16, u16)> {
        let o = self.offset();
        let first_col = ((rect.x + o.x) / UNITS_PER_COL - 0.5).ceil().max(0.0) as i64;
        let last_col = ((rect.right() + o.x) / UNITS_PER_COL - 0.5).ceil() as i64;
        let first_row = ((rect.y + o.y) / UNITS_PER_ROW - 0.5).ceil().max(0.0) as i64;
        let last_row = ((rect.bottom() + o.y) / UNITS_PER_ROW - 0.5).ceil() as i64;
        let mut cells = Vec::new();
        for row in first_row..last_row.min(i64::from(self.area.height)) {
            for col in first_col..last_col.min(i64::from(self.area.width)) {
                cells.push((self.area.x + col as u16, self.area.y + row as u16));
            }
        }
        cells
    }

    fn fill(&mut self, rect: &magdock_protocol::Rect, ch: char, fg: Color, bg: Color) {
        for (x, y) in self.cells(rect) {
            self.buf[(x, y)].set_char(ch).set_fg(fg).set_bg(bg);
        }
    }

    /// Text centered on `position`, one character per column.
    fn text(&mut self, position: Point, text: &str, fg: Color, bg: Color) {
        let width = text.chars().count() as f64 * UNITS_PER_COL;
        let start_x = position.x - width / 2.0;
        for (i, ch) in text.chars().enumerate() {
            if let Some((x, y)) = self.cell(start_x + (i as f64 + 0.5) * UNITS_PER_COL, position.y) {
                self.buf[(x, y)].set_char(ch).set_fg(fg).set_bg(bg);
            }
        }
    }

    fn draw(&mut self, commands: &[RenderCommand]) {
        let bg = theme_to_color(ThemeToken::Background);
        for cmd in commands {
            match cmd {
                RenderCommand::DrawRect { rect, color, .. } => {
                    let fill = theme_to_color(*color);
                    if *color == ThemeToken::ActiveIndicator {
                        // Too small for a cell; mark the cell under its center.
                        if let Some((x, y)) = self.cell(rect.center_x(), rect.y) {
                            self.buf[(x, y)].set_char('•').set_fg(fill);
                        }
                    } else {
                        self.fill(rect, ' ', fill, fill);
                    }
                }
                RenderCommand::DrawIcon {
                    rect, label, color, ..
                } => {
                    let fill = theme_to_color(*color);
                    self.fill(rect, '█', fill, bg);
                    if let Some(initial) = label.initial()
                        && let Some((x, y)) = self.cell(rect.center_x(), rect.y + rect.h / 2.0)
                    {
                        self.buf[(x, y)].set_char(initial).set_fg(Color::Black).set_bg(fill);
                    }
                }
                RenderCommand::DrawText {
                    position,
                    text,
                    color,
                    ..
                } => {
                    let tooltip_bg = theme_to_color(ThemeToken::TooltipBackground);
                    self.text(*position, text, theme_to_color(*color), tooltip_bg);
                }
                RenderCommand::DrawTriangle { points, color } => {
                    let tip = points[2];
                    if let Some((x, y)) = self.cell(tip.x, tip.y - UNITS_PER_ROW / 2.0) {
                        self.buf[(x, y)].set_char('▼').set_fg(theme_to_color(*color));
                    }
                }
                RenderCommand::PushTransform { translate, .. } => {
                    let o = self.offset();
                    self.stack.push(Point::new(o.x + translate.x, o.y + translate.y));
                }
                RenderCommand::PopTransform => {
                    self.stack.pop();
                }
                RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
            }
        }
    }
}

/// Pointer position over the dock, or `None` when it is outside the area
/// the dock reacts to (its box plus the room magnified icons grow into).
fn container_x(
    snapshot: &DockSnapshot,
    viewport: &Viewport,
    max_scale: f64,
    col: f64,
    row: f64,
) -> Option<f64> {
    let origin = dock_origin(snapshot, viewport);
    let x = (col + 0.5) * UNITS_PER_COL - origin.x;
    let y = (row + 0.5) * UNITS_PER_ROW - origin.y;
    let headroom = snapshot.base_width * (max_scale - 1.0);
    let inside = x >= 0.0
        && x < snapshot.container_width
        && y >= -headroom
        && y < snapshot.container_height;
    inside.then_some(x)
}

/// Hand one mouse sample to the session. Every sample outside the dock is
/// a leave, even if the session has not applied an earlier inside move yet.
fn route_pointer(session: &mut DockSession, x: Option<f64>) {
    match x {
        Some(x) => session.pointer_move(Some(x)),
        None => session.pointer_leave(),
    }
}

pub fn render_tui(session: &mut DockSession) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session);
    session.teardown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut DockSession,
) -> Result<()> {
    let started = Instant::now();
    let max_scale = session.config().max_scale;
    let item_count = session.items().len();
    tracing::info!(items = item_count, "terminal dock started");

    loop {
        let now = started.elapsed();
        session.frame(now);
        let snapshot = session.snapshot(now);

        let term_size = terminal.size()?;
        let content = Rect::new(0, 1, term_size.width, term_size.height.saturating_sub(2));
        let viewport = Viewport::new(
            f64::from(content.width) * UNITS_PER_COL,
            f64::from(content.height) * UNITS_PER_ROW,
        );
        let cmds = render_dock(&snapshot, &viewport);

        terminal.draw(|frame| {
            let area = frame.area();

            let header = Block::default()
                .title(" magdock · hover to magnify | click or 1-9 to open | q quit ")
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, Rect::new(0, 0, area.width, 1));

            let background = Block::default()
                .borders(Borders::NONE)
                .style(Style::default().bg(theme_to_color(ThemeToken::Background)));
            frame.render_widget(background, content);

            let status = match snapshot.items.iter().find(|i| i.is_active) {
                Some(item) if item.is_jumping => format!(" opening {} …", item.label),
                Some(item) => format!(" {} is open", item.label),
                None => " nothing open".to_string(),
            };
            let status_bar = Block::default()
                .title(status)
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(
                status_bar,
                Rect::new(0, area.height.saturating_sub(1), area.width, 1),
            );

            let mut raster = Raster {
                buf: frame.buffer_mut(),
                area: content,
                stack: Vec::new(),
            };
            raster.draw(&cmds);
        })?;

        // Drain everything queued before the next frame; pointer moves
        // overwrite each other in the session.
        let mut timeout = FRAME_BUDGET;
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = (c as usize) - ('1' as usize);
                        if let Err(e) = session.click(index, started.elapsed()) {
                            tracing::info!("{e}");
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let col = f64::from(mouse.column) - f64::from(content.x);
                    let row = f64::from(mouse.row) - f64::from(content.y);
                    let x = container_x(&snapshot, &viewport, max_scale, col, row);
                    match (mouse.kind, x) {
                        (MouseEventKind::Moved | MouseEventKind::Drag(_), x) => {
                            route_pointer(session, x);
                        }
                        (MouseEventKind::Down(MouseButton::Left), Some(x)) => {
                            if let Some(index) = session.click_at(x, started.elapsed()) {
                                tracing::info!(index, "clicked");
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }
}
