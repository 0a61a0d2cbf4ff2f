use ratatui::style::Color;

/// Runtime theme for the page preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Background colors
    pub bg: Color,
    pub bg_raised: Color,
    pub header_bg: Color,
    /// Header background once the page is scrolled
    pub header_scrolled_bg: Color,

    // Foreground colors
    pub fg: Color,
    pub muted: Color,
    pub border: Color,

    // Semantic colors
    pub accent: Color,
    pub link: Color,
    pub active: Color,
    pub focus: Color,
    pub error: Color,
    pub success: Color,
    pub particle: Color,
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Nova dark: deep indigo with a violet accent
        Self {
            bg: Color::Rgb(0x0f, 0x0f, 0x1a),
            bg_raised: Color::Rgb(0x1a, 0x1a, 0x2e),
            header_bg: Color::Rgb(0x0f, 0x0f, 0x1a),
            header_scrolled_bg: Color::Rgb(0x1f, 0x1f, 0x38),
            fg: Color::Rgb(0xe6, 0xe6, 0xf0),
            muted: Color::Rgb(0x8a, 0x8a, 0xa3),
            border: Color::Rgb(0x3a, 0x3a, 0x5c),
            accent: Color::Rgb(0x8b, 0x5c, 0xf6),
            link: Color::Rgb(0x60, 0xa5, 0xfa),
            active: Color::Rgb(0xc0, 0x84, 0xfc),
            focus: Color::Rgb(0xfa, 0xcc, 0x15),
            error: Color::Rgb(0xef, 0x44, 0x44),
            success: Color::Rgb(0x22, 0xc5, 0x5e),
            particle: Color::Rgb(0x6d, 0x5d, 0xb0),
            cursor: Color::Rgb(0xec, 0x48, 0x99),
        }
    }
}
