use ratatui::style::Color;
use tracing::warn;

use crate::model::UiConfig;
use crate::model::task::Priority;

/// Colors by role. Every slot can be overridden from `[ui.colors]`.
#[derive(Debug, Clone)]
pub struct Theme {
    /// `Reset` keeps the terminal's own background
    pub background: Color,
    pub text: Color,
    pub bright: Color,
    pub dim: Color,
    /// Selection marker, help keys, dialog cursor
    pub accent: Color,
    pub title_fg: Color,
    pub title_bg: Color,
    pub selection_bg: Color,
    /// Row being repositioned
    pub moving_bg: Color,
    pub done: Color,
    /// Context names and dialog borders
    pub context: Color,
    pub error: Color,
    pub priority_low: Color,
    pub priority_medium: Color,
    pub priority_high: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xCD, 0xD6, 0xF4),
            bright: Color::Rgb(0xFF, 0xFD, 0xF5),
            dim: Color::Rgb(0x6C, 0x70, 0x86),
            accent: Color::Rgb(0xEE, 0x6F, 0xF8),
            title_fg: Color::Rgb(0xFF, 0xFD, 0xF5),
            title_bg: Color::Rgb(0x25, 0xA0, 0x65),
            selection_bg: Color::Rgb(0x31, 0x32, 0x44),
            moving_bg: Color::Rgb(0x45, 0x47, 0x5A),
            done: Color::Rgb(0xA6, 0xE3, 0xA1),
            context: Color::Rgb(0x89, 0xB4, 0xFA),
            error: Color::Rgb(0xF3, 0x8B, 0xA8),
            priority_low: Color::Rgb(0xF9, 0xE2, 0xAF),
            priority_medium: Color::Rgb(0xFA, 0xB3, 0x87),
            priority_high: Color::Rgb(0xF3, 0x8B, 0xA8),
        }
    }
}

/// `#RRGGBB`, `#RGB`, or `reset` for the terminal default
fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("reset") {
        return Some(Color::Reset);
    }
    let digits = value.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)),
        3 => {
            let expand = |n: u32| (n & 0xF) as u8 * 0x11;
            Some(Color::Rgb(expand(rgb >> 8), expand(rgb >> 4), expand(rgb)))
        }
        _ => None,
    }
}

impl Theme {
    /// Defaults with the `[ui.colors]` overrides applied. Bad entries are
    /// logged and skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (name, value) in &ui.colors {
            let Some(slot) = theme.slot_mut(name) else {
                warn!(name = %name, "unknown theme color");
                continue;
            };
            match parse_color(value) {
                Some(color) => *slot = color,
                None => warn!(name = %name, value = %value, "invalid color"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "bright" => &mut self.bright,
            "dim" => &mut self.dim,
            "accent" => &mut self.accent,
            "title_fg" => &mut self.title_fg,
            "title_bg" => &mut self.title_bg,
            "selection_bg" => &mut self.selection_bg,
            "moving_bg" => &mut self.moving_bg,
            "done" => &mut self.done,
            "context" => &mut self.context,
            "error" => &mut self.error,
            "priority_low" => &mut self.priority_low,
            "priority_medium" => &mut self.priority_medium,
            "priority_high" => &mut self.priority_high,
            _ => return None,
        };
        Some(slot)
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::None => self.text,
            Priority::Low => self.priority_low,
            Priority::Medium => self.priority_medium,
            Priority::High => self.priority_high,
        }
    }
}
