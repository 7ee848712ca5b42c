use magdock_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => dock_dark_visuals(),
            ThemeMode::Light => dock_light_visuals(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x1c, 0x1c, 0x1e),
        DockBackground => ResolvedColor::rgba(0x3a, 0x3a, 0x3c, 200), // frosted
        DockBorder => ResolvedColor::rgba(0xff, 0xff, 0xff, 30),

        IconBlue => ResolvedColor::rgb(0x0a, 0x84, 0xff),
        IconGreen => ResolvedColor::rgb(0x30, 0xd1, 0x58),
        IconRed => ResolvedColor::rgb(0xff, 0x45, 0x3a),
        IconPurple => ResolvedColor::rgb(0xbf, 0x5a, 0xf2),
        IconOrange => ResolvedColor::rgb(0xff, 0x9f, 0x0a),
        IconGray => ResolvedColor::rgb(0x8e, 0x8e, 0x93),
        IconBorder => ResolvedColor::rgba(0x00, 0x00, 0x00, 60),

        ActiveIndicator => ResolvedColor::rgb(0xf2, 0xf2, 0xf7),

        TooltipBackground => ResolvedColor::rgba(0x2c, 0x2c, 0x2e, 235),
        TooltipText => ResolvedColor::rgb(0xf2, 0xf2, 0xf7),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(242, 242, 247),
        DockBackground => ResolvedColor::rgba(255, 255, 255, 190),
        DockBorder => ResolvedColor::rgba(0, 0, 0, 25),

        IconBlue => ResolvedColor::rgb(0, 122, 255),
        IconGreen => ResolvedColor::rgb(40, 167, 69),
        IconRed => ResolvedColor::rgb(224, 53, 43),
        IconPurple => ResolvedColor::rgb(155, 69, 201),
        IconOrange => ResolvedColor::rgb(240, 140, 0),
        IconGray => ResolvedColor::rgb(108, 108, 112),
        IconBorder => ResolvedColor::rgba(0, 0, 0, 40),

        ActiveIndicator => ResolvedColor::rgb(28, 28, 30),

        TooltipBackground => ResolvedColor::rgba(229, 229, 234, 240),
        TooltipText => ResolvedColor::rgb(28, 28, 30),
    }
}

// ── egui visual presets ────────────────────────────────────────────────────

pub fn dock_dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x24, 0x24, 0x26);
    v.window_fill = egui::Color32::from_rgb(0x2c, 0x2c, 0x2e);
    v.extreme_bg_color = egui::Color32::from_rgb(0x1c, 0x1c, 0x1e);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x3a, 0x3a, 0x3c);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x48, 0x48, 0x4a);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x0a, 0x84, 0xff);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x0a, 0x84, 0xff, 60);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v.error_fg_color = egui::Color32::from_rgb(0xff, 0x45, 0x3a);
    v
}

pub fn dock_light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(250, 250, 252);
    v.window_fill = egui::Color32::from_rgb(255, 255, 255);
    v.extreme_bg_color = egui::Color32::from_rgb(242, 242, 247);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(230, 230, 235);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(220, 220, 228);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0, 122, 255);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0, 122, 255, 50);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v.error_fg_color = egui::Color32::from_rgb(211, 47, 47);
    v
}
