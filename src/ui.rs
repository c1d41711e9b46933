use anstyle::{RgbColor, Style};
use is_terminal::IsTerminal;
use std::fmt::Display;
use std::io::{self, Write};

const STATUS_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Title,
    Section,
    Skip,
    Action,
    Error,
}

/// Style for each kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: Style,
    pub section: Style,
    pub skip: Style,
    pub action: Style,
    pub error: Style,
}

impl Default for Palette {
    fn default() -> Self {
        let fg = |r, g, b| Style::new().fg_color(Some(RgbColor(r, g, b).into()));
        Self {
            title: fg(0x97, 0x73, 0xf2).bold(),
            section: fg(0xff, 0x9e, 0x64),
            skip: fg(0x73, 0xda, 0xca),
            action: fg(0x6b, 0xce, 0x69),
            error: fg(0xdb, 0x4b, 0x4b).bold(),
        }
    }
}

impl Palette {
    fn style_for(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Title => self.title,
            StatusKind::Section => self.section,
            StatusKind::Skip => self.skip,
            StatusKind::Action => self.action,
            StatusKind::Error => self.error,
        }
    }
}

/// Console output. Errors go to stderr, everything else to stdout.
///
/// Colour is decided once, per stream, when the value is built.
#[derive(Debug, Clone)]
pub struct Ui {
    palette: Palette,
    stdout_color: bool,
    stderr_color: bool,
}

impl Ui {
    pub fn new(palette: Palette) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self {
            palette,
            stdout_color: !no_color && io::stdout().is_terminal(),
            stderr_color: !no_color && io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self {
            palette: Palette::default(),
            stdout_color: false,
            stderr_color: false,
        }
    }

    pub fn title(&self, label: &str, message: impl Display) {
        self.write(StatusKind::Title, label, &message.to_string());
    }

    pub fn section(&self, label: &str, message: impl Display) {
        self.write(StatusKind::Section, label, &message.to_string());
    }

    pub fn skip(&self, label: &str, message: impl Display) {
        self.write(StatusKind::Skip, label, &message.to_string());
    }

    pub fn action(&self, label: &str, message: impl Display) {
        self.write(StatusKind::Action, label, &message.to_string());
    }

    pub fn error(&self, message: impl Display) {
        self.write(StatusKind::Error, "Error", &message.to_string());
    }

    fn write(&self, kind: StatusKind, label: &str, message: &str) {
        let to_stderr = kind == StatusKind::Error;
        let use_color = if to_stderr {
            self.stderr_color
        } else {
            self.stdout_color
        };
        let style = use_color.then(|| self.palette.style_for(kind));
        let text = format_status(style, label, message);

        let mut handle: Box<dyn Write> = if to_stderr {
            Box::new(io::stderr().lock())
        } else {
            Box::new(io::stdout().lock())
        };
        let _ = handle.write_all(text.as_bytes());
        let _ = handle.flush();
    }
}

/// Right-align `label` in a fixed column; continuation lines of `message`
/// are indented to match.
fn format_status(style: Option<Style>, label: &str, message: &str) -> String {
    let padded_label = format!("{:>width$}", label, width = STATUS_WIDTH);
    let (prefix, suffix) = match style {
        Some(style) => (style.render().to_string(), style.render_reset().to_string()),
        None => (String::new(), String::new()),
    };

    let mut out = String::new();
    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 {
            out.push_str(&format!("{prefix}{padded_label}{suffix} {line}\n"));
        } else {
            out.push_str(&format!("{:>width$} {line}\n", "", width = STATUS_WIDTH));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_plain() {
        assert_eq!(
            format_status(None, "Update", "1.2.0 -> 1.3.0"),
            "      Update 1.2.0 -> 1.3.0\n"
        );
    }

    #[test]
    fn test_format_status_multiline() {
        assert_eq!(
            format_status(None, "Error", "first\nsecond"),
            "       Error first\n             second\n"
        );
    }

    #[test]
    fn test_format_status_colored_wraps_label_only() {
        let style = Palette::default().action;
        let text = format_status(Some(style), "Installing", "node@22.1.0");
        assert!(text.starts_with(&style.render().to_string()));
        assert!(text.ends_with(" node@22.1.0\n"));
        assert!(text.contains(&style.render_reset().to_string()));
    }

    #[test]
    fn test_palette_kinds_are_distinct() {
        let palette = Palette::default();
        assert_ne!(palette.style_for(StatusKind::Skip), palette.style_for(StatusKind::Action));
        assert_ne!(palette.style_for(StatusKind::Title), palette.style_for(StatusKind::Error));
    }
}
