use ktx_config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub fg: Color,
    pub title: Style,
    pub selection: Style,
    pub text_dim: Style,
    pub description: Style,
    pub status: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let color = |s: &str| parse_color(s).unwrap_or(Color::Reset);
        let accent = color(&config.accent);
        let fg = color(&config.fg);

        Self {
            accent,
            fg,
            title: Style::default().fg(color(&config.title_fg)).bg(color(&config.title_bg)),
            selection: Style::default()
                .fg(color(&config.selection_fg))
                .bg(color(&config.selection_bg))
                .add_modifier(Modifier::BOLD),
            text_dim: Style::default().fg(color(&config.text_dim)),
            description: Style::default().fg(color(&config.description)),
            status: Style::default().fg(color(&config.status)),
            error: Style::default().fg(color(&config.error)),
        }
    }
}

/// Parse a color string into a ratatui `Color`.
///
/// Accepts `#rrggbb`, `rgb(r,g,b)`, the basic named colors and `default` (terminal default).
pub fn parse_color(s: &str) -> anyhow::Result<Color> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("default") {
        return Ok(Color::Reset);
    }

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("invalid hex color \"{s}\": expected 6 hex digits after '#'");
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| anyhow::anyhow!("invalid hex color \"{s}\""))
        };
        return Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let parts = inner
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| anyhow::anyhow!("invalid rgb color \"{s}\": values must be 0-255"))?;
        let [r, g, b] = parts[..] else {
            anyhow::bail!("invalid rgb color \"{s}\": expected rgb(r,g,b)");
        };
        return Ok(Color::Rgb(r, g, b));
    }

    let named = match s.to_lowercase().replace('_', "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => anyhow::bail!(
            "unknown color \"{s}\": expected hex (#rrggbb), rgb(r,g,b), a named color (red, blue, ...), or \"default\""
        ),
    };
    Ok(named)
}
