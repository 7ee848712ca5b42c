use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Shape, Stroke, StrokeKind};
use magdock_protocol::{RenderCommand, ThemeToken};

use crate::theme::{self, ThemeMode};

/// Transform state for PushTransform/PopTransform.
#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }

    fn apply_x(&self, x: f64) -> f32 {
        (x * self.sx + self.tx) as f32
    }

    fn apply_y(&self, y: f64) -> f32 {
        (y * self.sy + self.ty) as f32
    }

    fn scale_w(&self, w: f64) -> f32 {
        (w * self.sx) as f32
    }

    fn scale_h(&self, h: f64) -> f32 {
        (h * self.sy) as f32
    }

    fn rect(&self, rect: &magdock_protocol::Rect, offset: Pos2) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.apply_x(rect.x) + offset.x, self.apply_y(rect.y) + offset.y),
            egui::vec2(self.scale_w(rect.w), self.scale_h(rect.h)),
        )
    }

    fn point(&self, p: magdock_protocol::Point, offset: Pos2) -> Pos2 {
        Pos2::new(self.apply_x(p.x) + offset.x, self.apply_y(p.y) + offset.y)
    }
}

fn corner(radius: f64) -> CornerRadius {
    CornerRadius::same(radius.round().clamp(0.0, 255.0) as u8)
}

/// Screen area an icon was painted into.
pub struct HitRegion {
    pub rect: Rect,
}

/// Result of rendering a command list: includes hit regions for interaction.
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area.
/// Icons are drawn as rounded tiles in their fallback color with the
/// label's initial; remote artwork is not fetched.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let mut transform_stack: Vec<Transform> = vec![Transform::identity()];
    let mut hit_regions: Vec<HitRegion> = Vec::new();

    for cmd in commands {
        let tf = transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::identity());
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                corner_radius,
                ..
            } => {
                let egui_rect = tf.rect(rect, offset);
                if egui_rect.width() < 0.5 || egui_rect.height() < 0.5 {
                    continue;
                }
                let radius = corner(*corner_radius);
                painter.rect_filled(egui_rect, radius, theme::resolve(*color, mode));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        radius,
                        Stroke::new(1.0, theme::resolve(*bc, mode)),
                        StrokeKind::Outside,
                    );
                }
            }

            RenderCommand::DrawIcon {
                rect,
                label,
                color,
                corner_radius,
                ..
            } => {
                let egui_rect = tf.rect(rect, offset);
                if egui_rect.width() < 0.5 || egui_rect.height() < 0.5 {
                    continue;
                }
                let radius = corner(*corner_radius);
                painter.rect_filled(egui_rect, radius, theme::resolve(*color, mode));
                painter.rect_stroke(
                    egui_rect,
                    radius,
                    Stroke::new(1.0, theme::resolve(ThemeToken::IconBorder, mode)),
                    StrokeKind::Inside,
                );
                if let Some(initial) = label.initial() {
                    painter.text(
                        egui_rect.center(),
                        Align2::CENTER_CENTER,
                        initial,
                        FontId::proportional(egui_rect.height() * 0.5),
                        egui::Color32::WHITE,
                    );
                }
                hit_regions.push(HitRegion { rect: egui_rect });
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
            } => {
                let size = *font_size as f32;
                if size < 1.0 {
                    continue;
                }
                painter.text(
                    tf.point(*position, offset),
                    Align2::CENTER_CENTER,
                    text.as_str(),
                    FontId::proportional(size),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::DrawTriangle { points, color } => {
                let points = points.iter().map(|p| tf.point(*p, offset)).collect();
                painter.add(Shape::convex_polygon(
                    points,
                    theme::resolve(*color, mode),
                    Stroke::NONE,
                ));
            }

            RenderCommand::PushTransform { translate, scale } => {
                let parent = tf;
                transform_stack.push(Transform {
                    tx: parent.tx + translate.x * parent.sx,
                    ty: parent.ty + translate.y * parent.sy,
                    sx: parent.sx * scale.x,
                    sy: parent.sy * scale.y,
                });
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic; no visual effect in egui
            }
        }
    }

    RenderResult { hit_regions }
}
