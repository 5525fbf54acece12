//! Color theme and its `theme.conf` key=value file.
use std::path::Path;

use ratatui::style::Color;
use tracing::warn;

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub focus: Color,
    pub error: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            focus: Color::Green,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha palette; the default.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            focus: Color::Rgb(0xa6, 0xe3, 0xa1),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    fn slots(&mut self) -> [(&'static str, &mut Color); 12] {
        [
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("title", &mut self.title),
            ("border", &mut self.border),
            ("header_bg", &mut self.header_bg),
            ("header_fg", &mut self.header_fg),
            ("status_bg", &mut self.status_bg),
            ("status_fg", &mut self.status_fg),
            ("highlight_fg", &mut self.highlight_fg),
            ("highlight_bg", &mut self.highlight_bg),
            ("focus", &mut self.focus),
            ("error", &mut self.error),
        ]
    }

    /// Parse `key = color` lines on top of `mocha`. Unknown keys and bad colors are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let (key, val) = (key.trim(), val.trim());
            let Some(color) = parse_color(val) else { continue };
            if let Some((_, slot)) = theme.slots().into_iter().find(|(k, _)| *k == key) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Persist the theme in the same key=value format `parse` reads.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut copy = *self;
        for (key, color) in copy.slots() {
            let _ = writeln!(&mut buf, "{} = {}", key, color_to_str(*color));
        }
        std::fs::write(path, buf)
    }

    /// Load `path` if present, otherwise write the default theme there and use it.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        if let Err(e) = theme.write_file(path) {
            warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

/// Hex (`#RRGGBB` or `RRGGBB`) or `reset`.
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn color_to_str(c: Color) -> String {
    let (r, g, b) = match c {
        Color::Reset => return "reset".to_string(),
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0xff, 0x00, 0x00),
        Color::Green => (0x00, 0xff, 0x00),
        Color::Yellow => (0xff, 0xff, 0x00),
        Color::Blue => (0x00, 0x00, 0xff),
        Color::Magenta => (0xff, 0x00, 0xff),
        Color::Cyan => (0x00, 0xff, 0xff),
        Color::Gray => (0xb3, 0xb3, 0xb3),
        Color::DarkGray => (0x4d, 0x4d, 0x4d),
        Color::LightRed => (0xff, 0x66, 0x66),
        Color::LightGreen => (0x66, 0xff, 0x66),
        Color::LightYellow => (0xff, 0xff, 0x66),
        Color::LightBlue => (0x66, 0x66, 0xff),
        Color::LightMagenta => (0xff, 0x66, 0xff),
        Color::LightCyan => (0x66, 0xff, 0xff),
        Color::White => (0xff, 0xff, 0xff),
        Color::Indexed(_) => (0x80, 0x80, 0x80),
    };
    format!("#{r:02X}{g:02X}{b:02X}")
}
