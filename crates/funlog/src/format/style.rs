//! Color markup tags (`<lvl>`, `<cyan>`, ...)

use crate::Level;
use nu_ansi_term::{Color, Style};

/// A recognized opening tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Markup {
    /// Color picked from the record's level at render time
    Level,
    Fixed(Style),
}

impl Markup {
    pub fn parse(tag: &str) -> Option<Self> {
        let style = match tag {
            "lvl" | "level" => return Some(Self::Level),
            "black" => Color::Black.normal(),
            "red" => Color::Red.normal(),
            "green" => Color::Green.normal(),
            "yellow" => Color::Yellow.normal(),
            "blue" => Color::Blue.normal(),
            "magenta" => Color::Magenta.normal(),
            "cyan" => Color::Cyan.normal(),
            "white" => Color::White.normal(),
            "bold" | "b" => Style::new().bold(),
            "dim" | "d" => Style::new().dimmed(),
            "italic" | "i" => Style::new().italic(),
            "underline" | "u" => Style::new().underline(),
            _ => return None,
        };
        Some(Self::Fixed(style))
    }

    pub fn resolve(self, level: Level) -> Style {
        match self {
            Self::Level => level_style(level),
            Self::Fixed(style) => style,
        }
    }
}

pub fn level_style(level: Level) -> Style {
    match level {
        Level::Trace => Color::Cyan.bold(),
        Level::Debug => Color::Blue.bold(),
        Level::Info => Style::new().bold(),
        Level::Warning => Color::Yellow.bold(),
        Level::Error => Color::Red.bold(),
    }
}
