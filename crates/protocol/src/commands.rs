use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` per dock frame. Renderers consume
/// the list in order, painting later commands over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled, optionally rounded rectangle. `item` ties the shape
    /// to a dock item for hit-testing.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        corner_radius: f64,
        item: Option<usize>,
    },

    /// Draw a dock icon. Renderers that can load `asset` draw the image;
    /// the rest fall back to a rounded rect in `color` with the label's
    /// first letter.
    DrawIcon {
        rect: Rect,
        asset: SharedStr,
        label: SharedStr,
        color: ThemeToken,
        corner_radius: f64,
        item: usize,
    },

    /// Draw a text string centered on a position.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
    },

    /// Draw a filled triangle (tooltip pointers).
    DrawTriangle { points: [Point; 3], color: ThemeToken },

    /// Push an affine transform applied to all subsequent commands until
    /// the matching `PopTransform`.
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (one dock item, the tooltip layer).
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_externally_tagged_json() {
        let cmd = RenderCommand::DrawIcon {
            rect: Rect::new(0.0, 0.0, 64.0, 64.0),
            asset: "finder.png".into(),
            label: "Finder".into(),
            color: ThemeToken::IconBlue,
            corner_radius: 16.0,
            item: 0,
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert!(json.starts_with(r#"{"DrawIcon":"#));
        assert!(json.contains(r#""label":"Finder""#));
        assert!(json.contains(r#""color":"IconBlue""#));
    }
}
