use ratatui::style::{Color, Modifier, Style};

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Dracula,
    Gruvbox,
    Nord,
}

impl ThemeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dracula => "Dracula",
            Self::Gruvbox => "Gruvbox",
            Self::Nord    => "Nord",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::Dracula,
            "gruvbox" => Self::Gruvbox,
            "nord"    => Self::Nord,
            _         => Self::Default,
        }
    }
}

/// The handful of colors a variant is built from.
struct Palette {
    bar:    Color,
    fg:     Color,
    dim:    Color,
    accent: Color,
    ok:     Color,
    warn:   Color,
    hot:    Color,
    crit:   Color,
}

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Theme {
    pub border:       Style,
    pub title:        Style,
    pub text:         Style,
    pub text_dim:     Style,
    pub header:       Style,
    pub column:       Style,
    pub healing:      Style,
    pub spinner:      Style,
    pub util_low:     Style,
    pub util_mid:     Style,
    pub util_high:    Style,
    pub util_crit:    Style,
    pub status_bg:    Style,
    pub status_key:   Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        let p = match v {
            ThemeVariant::Default => Palette {
                bar: Color::DarkGray, fg: Color::White, dim: Color::Gray, accent: Color::Cyan,
                ok: Color::Green, warn: Color::Yellow, hot: Color::LightRed, crit: Color::Red,
            },
            // https://draculatheme.com/
            ThemeVariant::Dracula => Palette {
                bar: rgb(0x44475a), fg: rgb(0xf8f8f2), dim: rgb(0x6272a4), accent: rgb(0xbd93f9),
                ok: rgb(0x50fa7b), warn: rgb(0xf1fa8c), hot: rgb(0xffb86c), crit: rgb(0xff5555),
            },
            // https://github.com/morhetz/gruvbox
            ThemeVariant::Gruvbox => Palette {
                bar: rgb(0x3c3836), fg: rgb(0xebdbb2), dim: rgb(0xa89984), accent: rgb(0x83a598),
                ok: rgb(0xb8bb26), warn: rgb(0xfabd2f), hot: rgb(0xfe8019), crit: rgb(0xfb4934),
            },
            // https://www.nordtheme.com/
            ThemeVariant::Nord => Palette {
                bar: rgb(0x3b4252), fg: rgb(0xe5e9f0), dim: rgb(0x4c566a), accent: rgb(0x88c0d0),
                ok: rgb(0xa3be8c), warn: rgb(0xebcb8b), hot: rgb(0xd08770), crit: rgb(0xbf616a),
            },
        };
        Self::from_palette(&p)
    }

    fn from_palette(p: &Palette) -> Self {
        let bold = Modifier::BOLD;
        Self {
            border:     Style::default().fg(p.dim),
            title:      Style::default().fg(p.fg).add_modifier(bold),
            text:       Style::default().fg(p.fg),
            text_dim:   Style::default().fg(p.dim),
            header:     Style::default().fg(p.fg).bg(p.bar).add_modifier(bold),
            column:     Style::default().fg(p.accent).add_modifier(bold),
            healing:    Style::default().fg(p.warn),
            spinner:    Style::default().fg(p.accent),
            util_low:   Style::default().fg(p.ok),
            util_mid:   Style::default().fg(p.warn),
            util_high:  Style::default().fg(p.hot),
            util_crit:  Style::default().fg(p.crit).add_modifier(bold),
            status_bg:  Style::default().bg(p.bar).fg(p.fg),
            status_key: Style::default().bg(p.bar).fg(p.accent).add_modifier(bold),
        }
    }

    /// Pick a utilisation-gradient style for a 0–100 value.
    pub fn util_style(&self, pct: f64) -> Style {
        if      pct >= 95.0 { self.util_crit }
        else if pct >= 75.0 { self.util_high }
        else if pct >= 50.0 { self.util_mid  }
        else                { self.util_low  }
    }
}
