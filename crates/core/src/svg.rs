//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use magdock_protocol::{Point, RenderCommand, ThemeToken};

#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    fn point(&self, p: Point) -> (f64, f64) {
        (p.x * self.sx + self.tx, p.y * self.sy + self.ty)
    }
}

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette. Icons reference their asset by URL;
/// a rounded rect in the fallback color sits underneath in case the image
/// does not load.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 200);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    ));

    let mut stack = vec![Transform::IDENTITY];
    for cmd in commands {
        let tf = stack.last().copied().unwrap_or(Transform::IDENTITY);
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                corner_radius,
                ..
            } => {
                let (x, y) = tf.point(Point::new(rect.x, rect.y));
                let stroke = border_color
                    .map(|bc| format!(r#" stroke="{}""#, resolve_color(bc, dark)))
                    .unwrap_or_default();
                svg.push_str(&format!(
                    r#"<rect x="{x}" y="{y}" width="{}" height="{}" rx="{corner_radius}" fill="{}"{stroke}/>"#,
                    rect.w * tf.sx,
                    rect.h * tf.sy,
                    resolve_color(*color, dark),
                ));
            }
            RenderCommand::DrawIcon {
                rect,
                asset,
                label,
                color,
                corner_radius,
                ..
            } => {
                let (x, y) = tf.point(Point::new(rect.x, rect.y));
                let (w, h) = (rect.w * tf.sx, rect.h * tf.sy);
                svg.push_str(&format!(
                    r#"<g><title>{}</title><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{corner_radius}" fill="{}"/>"#,
                    escape_xml(label),
                    resolve_color(*color, dark),
                ));
                if !asset.is_empty() {
                    svg.push_str(&format!(
                        r#"<image x="{x}" y="{y}" width="{w}" height="{h}" href="{}" preserveAspectRatio="xMidYMid slice"/>"#,
                        escape_xml(asset),
                    ));
                }
                svg.push_str("</g>");
            }
            RenderCommand::DrawTriangle { points, color } => {
                let coords: Vec<String> = points
                    .iter()
                    .map(|p| {
                        let (x, y) = tf.point(*p);
                        format!("{x},{y}")
                    })
                    .collect();
                svg.push_str(&format!(
                    r#"<polygon points="{}" fill="{}"/>"#,
                    coords.join(" "),
                    resolve_color(*color, dark),
                ));
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
            } => {
                let (x, y) = tf.point(*position);
                svg.push_str(&format!(
                    r#"<text x="{x}" y="{y}" fill="{}" font-size="{font_size}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    resolve_color(*color, dark),
                    escape_xml(text),
                ));
            }
            RenderCommand::PushTransform { translate, scale } => {
                stack.push(Transform {
                    tx: tf.tx + translate.x * tf.sx,
                    ty: tf.ty + translate.y * tf.sy,
                    sx: tf.sx * scale.x,
                    sy: tf.sy * scale.y,
                });
            }
            RenderCommand::PopTransform => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            // Groups carry no geometry
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#1c1c1c",
            ThemeToken::DockBackground => "#2a2a2a",
            ThemeToken::DockBorder => "#3a3a3a",
            ThemeToken::IconBlue => "#3d8bfd",
            ThemeToken::IconGreen => "#34c759",
            ThemeToken::IconRed => "#ff453a",
            ThemeToken::IconPurple => "#bf5af2",
            ThemeToken::IconOrange => "#ff9f0a",
            ThemeToken::IconGray => "#8e8e93",
            ThemeToken::IconBorder => "#4a4a4a",
            ThemeToken::ActiveIndicator => "#ffffff",
            ThemeToken::TooltipBackground => "#303030",
            ThemeToken::TooltipText => "#ffffff",
        }
    } else {
        match token {
            ThemeToken::Background => "#f2f2f7",
            ThemeToken::DockBackground => "#ffffff",
            ThemeToken::DockBorder => "#d1d1d6",
            ThemeToken::IconBlue => "#007aff",
            ThemeToken::IconGreen => "#28a745",
            ThemeToken::IconRed => "#e0352b",
            ThemeToken::IconPurple => "#9b45c9",
            ThemeToken::IconOrange => "#f08c00",
            ThemeToken::IconGray => "#6c6c70",
            ThemeToken::IconBorder => "#c7c7cc",
            ThemeToken::ActiveIndicator => "#1c1c1e",
            ThemeToken::TooltipBackground => "#e5e5ea",
            ThemeToken::TooltipText => "#1c1c1e",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
