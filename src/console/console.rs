use std::fmt::Display;

use colored::{Color, Colorize};
use supports_color::Stream;

/// User-facing output. Diagnostics go through `tracing` instead.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    /// Colors are used only when stdout supports them and they were not
    /// turned off explicitly.
    pub fn new(no_color: bool) -> Self {
        Self::with_color(!no_color && supports_color::on(Stream::Stdout).is_some())
    }

    pub fn with_color(color: bool) -> Self {
        Console { color }
    }

    pub fn success(&self, message: impl Display) {
        println!("{}", self.format_labelled("Success:", Color::BrightGreen, message));
    }

    pub fn warning(&self, message: impl Display) {
        eprintln!("{}", self.format_labelled("Warning:", Color::BrightYellow, message));
    }

    /// Prints one indented line per item.
    pub fn list<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for item in items {
            eprintln!("    {}", self.paint(item, Color::Yellow));
        }
    }

    fn format_labelled(&self, label: &str, color: Color, message: impl Display) -> String {
        let label = if self.color {
            label.color(color).bold().to_string()
        } else {
            label.to_string()
        };
        format!("{label} {message}")
    }

    fn paint(&self, text: impl Display, color: Color) -> String {
        if self.color {
            text.to_string().color(color).to_string()
        } else {
            text.to_string()
        }
    }
}
