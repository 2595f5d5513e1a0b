use banktabs_core::Appearance;
use ratatui::style::Color;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const GRAYED_TEXT: Color = Color::DarkGray;
pub const CURSOR_BG: Color = Color::Blue;
pub const DROP_TARGET: Color = Color::Yellow;
pub const INPUT_BORDER: Color = Color::Cyan;
pub const ERROR_COLOR: Color = Color::Red;

/// Tab control colours resolved from the configured hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabPalette {
    pub inactive: Color,
    pub active: Color,
    pub hovered: Color,
}

impl TabPalette {
    pub fn from_appearance(appearance: &Appearance) -> Self {
        let fallback = Appearance::default();
        let resolve = |value: &str, default: &str| {
            parse_hex(value).unwrap_or_else(|| {
                tracing::warn!("Invalid colour '{}', using {}", value, default);
                parse_hex(default).unwrap_or(Color::Gray)
            })
        };
        Self {
            inactive: resolve(&appearance.inactive_color, &fallback.inactive_color),
            active: resolve(&appearance.active_color, &fallback.active_color),
            hovered: resolve(&appearance.hovered_color, &fallback.hovered_color),
        }
    }
}

impl Default for TabPalette {
    fn default() -> Self {
        Self::from_appearance(&Appearance::default())
    }
}

/// Parse `#rrggbb` or `#rrggbbaa`. Terminals have no alpha, so it is dropped.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
