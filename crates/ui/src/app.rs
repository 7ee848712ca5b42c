use std::time::Duration;

use eframe::egui;
use magdock_core::config::DockConfig;
use magdock_core::session::{DockSession, DockSnapshot};
use magdock_core::views::{dock_origin, render_dock};
use magdock_protocol::{ThemeToken, Viewport};

use crate::renderer;
use crate::theme::{self, ThemeMode};

/// Main application state.
pub struct DockApp {
    session: Option<DockSession>,
    theme_mode: ThemeMode,
    /// egui time at which the current session started.
    session_epoch: f64,
    /// Error message to display.
    error: Option<String>,
}

impl DockApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(cc, DockConfig::default())
    }

    pub fn with_config(cc: &eframe::CreationContext<'_>, config: DockConfig) -> Self {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme_mode.visuals());
        let mut app = Self {
            session: None,
            theme_mode,
            session_epoch: 0.0,
            error: None,
        };
        app.replace_session(config, cc.egui_ctx.input(|i| i.time));
        app
    }

    fn replace_session(&mut self, config: DockConfig, now: f64) {
        if let Some(old) = self.session.as_mut() {
            old.teardown();
        }
        match DockSession::new(config) {
            Ok(session) => {
                tracing::info!(items = session.items().len(), "dock session started");
                self.session = Some(session);
                self.session_epoch = now;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("Invalid dock config: {e}"));
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn open_config(&mut self, now: f64) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Dock config", &["toml", "json"])
            .pick_file()
        else {
            return;
        };
        let loaded = if path.extension().is_some_and(|e| e == "json") {
            std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|text| DockConfig::from_json_str(&text).map_err(|e| e.to_string()))
        } else {
            DockConfig::load(&path).map_err(|e| e.to_string())
        };
        match loaded {
            Ok(config) => self.replace_session(config, now),
            Err(e) => self.error = Some(format!("Failed to load config: {e}")),
        }
    }
}

/// Container-relative pointer x, or `None` when the pointer is outside the
/// box the dock reacts to: the shelf plus the headroom magnified icons
/// grow into.
fn dock_pointer(
    snapshot: &DockSnapshot,
    origin: egui::Pos2,
    max_scale: f64,
    pos: egui::Pos2,
) -> Option<f64> {
    let x = f64::from(pos.x - origin.x);
    let y = f64::from(pos.y - origin.y);
    let headroom = snapshot.base_width * (max_scale - 1.0);
    let inside = x >= 0.0
        && x < snapshot.container_width
        && y >= -headroom
        && y < snapshot.container_height;
    inside.then_some(x)
}

/// Every sample outside the dock is a leave, even if an earlier inside move
/// has not been applied yet.
fn route_pointer(session: &mut DockSession, x: Option<f64>) {
    match x {
        Some(x) => session.pointer_move(Some(x)),
        None => session.pointer_leave(),
    }
}

impl eframe::App for DockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let time = ctx.input(|i| i.time);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("magdock");
                ui.separator();

                if ui.button("📂 Open config").clicked() {
                    #[cfg(not(target_arch = "wasm32"))]
                    self.open_config(time);
                }
                if ui.button("⟲ Reset").clicked() {
                    let config = self
                        .session
                        .as_ref()
                        .map(|s| s.config().clone())
                        .unwrap_or_default();
                    self.replace_session(config, time);
                }

                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                } else if let Some(session) = &self.session {
                    let active = session
                        .activation()
                        .active
                        .and_then(|i| session.items().get(i))
                        .map_or("none", |item| item.label.as_str());
                    let hovered = session
                        .hovered()
                        .and_then(|i| session.items().get(i))
                        .map_or("none", |item| item.label.as_str());
                    ui.label(format!("Open: {active} | Hover: {hovered}"));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let now = Duration::from_secs_f64((time - self.session_epoch).max(0.0));

            let available = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(available, egui::Sense::click());
            let viewport = Viewport::new(
                f64::from(available.width()),
                f64::from(available.height()),
            );

            // Input is measured against the layout currently on screen.
            let before = session.snapshot(now);
            let origin = dock_origin(&before, &viewport);
            let origin = egui::pos2(
                available.left() + origin.x as f32,
                available.top() + origin.y as f32,
            );
            let max_scale = session.config().max_scale;

            let hover_x = ui
                .input(|i| i.pointer.hover_pos())
                .and_then(|pos| dock_pointer(&before, origin, max_scale, pos));
            route_pointer(session, hover_x);

            let clicked_x = response
                .clicked()
                .then(|| response.interact_pointer_pos())
                .flatten()
                .and_then(|pos| dock_pointer(&before, origin, max_scale, pos));
            if let Some(index) = clicked_x.and_then(|x| session.click_at(x, now)) {
                tracing::debug!(index, "clicked");
            }

            session.frame(now);
            let snapshot = session.snapshot(now);

            let painter = ui.painter_at(available);
            painter.rect_filled(
                available,
                egui::CornerRadius::ZERO,
                theme::resolve(ThemeToken::Background, self.theme_mode),
            );
            let cmds = render_dock(&snapshot, &viewport);
            let result = renderer::render_commands(&painter, &cmds, available.min, self.theme_mode);

            let over_icon = ui
                .input(|i| i.pointer.hover_pos())
                .is_some_and(|pos| result.hit_regions.iter().any(|hit| hit.rect.contains(pos)));
            if over_icon {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            if session.needs_frame() {
                ctx.request_repaint();
            } else if let Some(deadline) = session.next_deadline() {
                ctx.request_repaint_after(deadline.saturating_sub(now));
            }
        });
    }
}
