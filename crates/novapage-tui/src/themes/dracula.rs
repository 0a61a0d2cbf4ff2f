//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Dracula default theme
pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x28, 0x2a, 0x36),
        bg_raised: Color::Rgb(0x34, 0x37, 0x46),
        header_bg: Color::Rgb(0x28, 0x2a, 0x36),
        header_scrolled_bg: Color::Rgb(0x44, 0x47, 0x5a), // current line
        fg: Color::Rgb(0xf8, 0xf8, 0xf2),
        muted: Color::Rgb(0x62, 0x72, 0xa4), // comment
        border: Color::Rgb(0x44, 0x47, 0x5a),
        accent: Color::Rgb(0xbd, 0x93, 0xf9), // purple
        link: Color::Rgb(0x8b, 0xe9, 0xfd),   // cyan
        active: Color::Rgb(0xff, 0x79, 0xc6), // pink
        focus: Color::Rgb(0xf1, 0xfa, 0x8c),  // yellow
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x50, 0xfa, 0x7b),
        particle: Color::Rgb(0x62, 0x72, 0xa4),
        cursor: Color::Rgb(0xff, 0xb8, 0x6c), // orange
    }
}
