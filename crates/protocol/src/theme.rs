use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    DockBackground,
    DockBorder,

    // Icon fallbacks, cycled by item index
    IconBlue,
    IconGreen,
    IconRed,
    IconPurple,
    IconOrange,
    IconGray,

    IconBorder,
    ActiveIndicator,

    TooltipBackground,
    TooltipText,
}

impl ThemeToken {
    const ICON_CYCLE: [ThemeToken; 6] = [
        ThemeToken::IconBlue,
        ThemeToken::IconGreen,
        ThemeToken::IconRed,
        ThemeToken::IconPurple,
        ThemeToken::IconOrange,
        ThemeToken::IconGray,
    ];

    /// Fallback fill for the icon at `index`.
    pub fn icon(index: usize) -> Self {
        Self::ICON_CYCLE[index % Self::ICON_CYCLE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_tokens_cycle() {
        assert_eq!(ThemeToken::icon(0), ThemeToken::IconBlue);
        assert_eq!(ThemeToken::icon(5), ThemeToken::IconGray);
        assert_eq!(ThemeToken::icon(6), ThemeToken::IconBlue);
    }
}
