use magdock_protocol::{Point, Rect, RenderCommand, ThemeToken, Viewport};

use crate::session::{DockSnapshot, ItemView};

/// Space between the dock and the bottom of the viewport, at most.
const BOTTOM_MARGIN: f64 = 80.0;
const INDICATOR_SIZE: f64 = 4.0;
const INDICATOR_INSET: f64 = 2.0;
const TOOLTIP_FONT_SIZE: f64 = 14.0;
const TOOLTIP_HEIGHT: f64 = 22.0;
const TOOLTIP_PAD_X: f64 = 8.0;
const TOOLTIP_RADIUS: f64 = 6.0;
const TOOLTIP_ARROW: f64 = 4.0;
/// Rough advance of one proportional glyph, as a share of the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Top-left corner of the dock container inside `viewport`: centered
/// horizontally, resting near the bottom edge.
///
/// Hosts subtract this from raw pointer coordinates to get the
/// container-relative x the session expects.
pub fn dock_origin(snapshot: &DockSnapshot, viewport: &Viewport) -> Point {
    let margin = BOTTOM_MARGIN.min(viewport.height * 0.15);
    Point::new(
        (viewport.width - snapshot.container_width) / 2.0,
        viewport.height - margin - snapshot.container_height,
    )
}

/// Render the dock: shelf, icons (scaled and bouncing), active
/// indicators, and the hovered item's tooltip when tooltips are allowed.
pub fn render_dock(snapshot: &DockSnapshot, viewport: &Viewport) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(snapshot.items.len() * 4 + 12);
    commands.push(RenderCommand::BeginGroup {
        id: "dock".into(),
        label: Some("Dock".into()),
    });
    commands.push(RenderCommand::PushTransform {
        translate: dock_origin(snapshot, viewport),
        scale: Point::new(1.0, 1.0),
    });

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, snapshot.container_width, snapshot.container_height),
        color: ThemeToken::DockBackground,
        border_color: Some(ThemeToken::DockBorder),
        corner_radius: snapshot.corner_radius,
        item: None,
    });

    let shelf = snapshot.container_height - snapshot.container_padding;
    for item in &snapshot.items {
        render_item(&mut commands, snapshot, item, shelf);
    }

    if snapshot.tooltips_visible
        && let Some(hovered) = snapshot.hovered.and_then(|i| snapshot.items.get(i))
    {
        render_tooltip(&mut commands, snapshot, hovered, shelf);
    }

    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn render_item(
    commands: &mut Vec<RenderCommand>,
    snapshot: &DockSnapshot,
    item: &ItemView,
    shelf: f64,
) {
    commands.push(RenderCommand::BeginGroup {
        id: format!("item-{}", item.index).into(),
        label: Some(item.label.clone()),
    });

    // Icons grow upward from the shelf; the bounce lifts them further.
    let rect = Rect::new(item.offset, shelf - item.size - item.lift, item.size, item.size);
    commands.push(RenderCommand::DrawIcon {
        rect,
        asset: item.asset.clone(),
        label: item.label.clone(),
        color: ThemeToken::icon(item.index),
        corner_radius: snapshot.corner_radius * item.scale,
        item: item.index,
    });

    if item.is_active {
        let x = rect.center_x() - INDICATOR_SIZE / 2.0;
        let y = snapshot.container_height - INDICATOR_INSET - INDICATOR_SIZE;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, INDICATOR_SIZE, INDICATOR_SIZE),
            color: ThemeToken::ActiveIndicator,
            border_color: None,
            corner_radius: INDICATOR_SIZE / 2.0,
            item: Some(item.index),
        });
    }

    commands.push(RenderCommand::EndGroup);
}

/// Tooltip box with a downward pointer, floating `tooltip_offset` above the
/// item's rest top. It does not follow the icon as it grows.
fn render_tooltip(
    commands: &mut Vec<RenderCommand>,
    snapshot: &DockSnapshot,
    item: &ItemView,
    shelf: f64,
) {
    let center = item.offset + item.size / 2.0;
    let arrow_tip = shelf - snapshot.base_width - snapshot.tooltip_offset;
    let box_bottom = arrow_tip - TOOLTIP_ARROW;
    let text_width = item.label.chars().count() as f64 * TOOLTIP_FONT_SIZE * GLYPH_ASPECT;
    let box_width = text_width + 2.0 * TOOLTIP_PAD_X;
    let rect = Rect::new(
        center - box_width / 2.0,
        box_bottom - TOOLTIP_HEIGHT,
        box_width,
        TOOLTIP_HEIGHT,
    );

    commands.push(RenderCommand::BeginGroup {
        id: "tooltip".into(),
        label: Some(item.label.clone()),
    });
    commands.push(RenderCommand::DrawRect {
        rect,
        color: ThemeToken::TooltipBackground,
        border_color: None,
        corner_radius: TOOLTIP_RADIUS,
        item: None,
    });
    commands.push(RenderCommand::DrawTriangle {
        points: [
            Point::new(center - TOOLTIP_ARROW, box_bottom),
            Point::new(center + TOOLTIP_ARROW, box_bottom),
            Point::new(center, arrow_tip),
        ],
        color: ThemeToken::TooltipBackground,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(center, box_bottom - TOOLTIP_HEIGHT / 2.0),
        text: item.label.clone(),
        color: ThemeToken::TooltipText,
        font_size: TOOLTIP_FONT_SIZE,
    });
    commands.push(RenderCommand::EndGroup);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::DockConfig;
    use crate::session::DockSession;

    fn session() -> DockSession {
        DockSession::new(DockConfig::default()).unwrap_or_else(|e| panic!("{e}"))
    }

    fn icons(commands: &[RenderCommand]) -> Vec<(usize, Rect)> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawIcon { item, rect, .. } => Some((*item, *rect)),
                _ => None,
            })
            .collect()
    }

    fn has_tooltip(commands: &[RenderCommand]) -> bool {
        commands
            .iter()
            .any(|c| matches!(c, RenderCommand::BeginGroup { id, .. } if *id == "tooltip"))
    }

    #[test]
    fn centers_dock_at_the_bottom() {
        let s = session();
        let snap = s.snapshot(Duration::ZERO);
        let origin = dock_origin(&snap, &Viewport::new(1000.0, 800.0));
        assert_eq!(origin, Point::new(333.0, 800.0 - 80.0 - 64.0));
    }

    #[test]
    fn rest_icons_sit_on_the_shelf() {
        let s = session();
        let cmds = render_dock(&s.snapshot(Duration::ZERO), &Viewport::new(800.0, 600.0));
        let icons = icons(&cmds);
        assert_eq!(icons.len(), 6);
        for (i, rect) in &icons {
            assert_eq!(rect.y, 0.0, "item {i} should touch the container top at rest");
            assert_eq!(rect.w, 64.0);
        }
        assert!(matches!(cmds.first(), Some(RenderCommand::BeginGroup { .. })));
        assert!(matches!(cmds.last(), Some(RenderCommand::EndGroup)));
    }

    #[test]
    fn magnified_icon_grows_upward() {
        let mut s = session();
        s.pointer_move(Some(140.0));
        s.frame(Duration::from_millis(16));
        let cmds = render_dock(&s.snapshot(Duration::ZERO), &Viewport::new(800.0, 600.0));
        let (_, rect) = icons(&cmds)[2];
        assert_eq!(rect.w, 128.0);
        assert_eq!(rect.y, -64.0);
        assert!(has_tooltip(&cmds));
    }

    #[test]
    fn tooltip_label_is_centered_over_the_icon() {
        let mut s = session();
        s.pointer_move(Some(140.0));
        s.frame(Duration::from_millis(16));
        let cmds = render_dock(&s.snapshot(Duration::ZERO), &Viewport::new(800.0, 600.0));
        let (_, icon) = icons(&cmds)[2];
        let labels: Vec<(Point, &str)> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { position, text, .. } => Some((*position, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 1);
        let (position, text) = labels[0];
        assert_eq!(text, s.items()[2].label.as_str());
        assert!((position.x - (icon.x + icon.w / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn jumping_hides_tooltip_and_marks_active() {
        let mut s = session();
        s.pointer_move(Some(140.0));
        s.frame(Duration::from_millis(16));
        assert!(s.click(2, Duration::from_millis(20)).is_ok());
        let cmds = render_dock(
            &s.snapshot(Duration::from_millis(300)),
            &Viewport::new(800.0, 600.0),
        );
        assert!(!has_tooltip(&cmds));
        let indicators = cmds
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawRect {
                        color: ThemeToken::ActiveIndicator,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(indicators, 1);
        let (_, rect) = icons(&cmds)[2];
        assert!(rect.y < -64.0, "bouncing icon should be lifted, got {}", rect.y);
    }

    #[test]
    fn no_tooltip_without_hover() {
        let s = session();
        let cmds = render_dock(&s.snapshot(Duration::ZERO), &Viewport::new(800.0, 600.0));
        assert!(!has_tooltip(&cmds));
    }
}
