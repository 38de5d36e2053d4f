//! Parrot/neon theme tokens for the TickerGrid TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, headers, selected row)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses)
//! - **Warning**: Neon orange (alerts, malformed rows)
//! - **Neutral**: Cool purple (cursor row, secondary info)
//! - **Muted**: Steel blue (hints, placeholders)

use ratatui::style::{Color, Modifier, Style};

use tickergrid_core::StyleHint;

/// Parrot/neon theme for the TickerGrid TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (gains)
    pub positive: Color,
    /// Hot pink (losses)
    pub negative: Color,
    /// Neon orange (warnings, alerts)
    pub warning: Color,
    /// Cool purple (neutral info, secondary)
    pub neutral: Color,
    /// Steel blue (muted text, disabled)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    /// The default Parrot/neon theme
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Color for a profit/loss hint. Zero is a loss, matching the hint.
    pub fn hint_color(&self, hint: StyleHint) -> Color {
        match hint {
            StyleHint::Gain => self.positive,
            StyleHint::Loss => self.negative,
        }
    }
}

const PALETTE: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(PALETTE.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(PALETTE.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(PALETTE.neutral)
}

pub fn warning() -> Style {
    Style::default().fg(PALETTE.warning)
}

pub fn negative() -> Style {
    Style::default().fg(PALETTE.negative)
}

pub fn text() -> Style {
    Style::default().fg(PALETTE.text_primary)
}

pub fn hint_fg(hint: StyleHint) -> Style {
    Style::default().fg(PALETTE.hint_color(hint))
}

/// Bold gain/loss style for a profit/loss cell.
pub fn hint_style(hint: StyleHint) -> Style {
    hint_fg(hint).add_modifier(Modifier::BOLD)
}

/// Style of the row under the cursor.
pub fn cursor_row() -> Style {
    Style::default()
        .bg(PALETTE.neutral)
        .fg(PALETTE.text_primary)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
