use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use novapage_core::surface::states;

use crate::app::App;
use crate::layout::MenuBox;
use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HELP: &[(&str, &str)] = &[
    ("j / k", "scroll one line"),
    ("Ctrl-d / Ctrl-u", "half page"),
    ("Ctrl-f / Ctrl-b", "full page"),
    ("gg / G", "top / bottom"),
    ("Tab / S-Tab", "focus next / previous link"),
    ("Enter", "follow focused link"),
    ("m", "toggle menu"),
    ("i", "fill in the contact form"),
    ("Esc", "close menu / leave form"),
    ("mouse", "hover, click, wheel"),
    ("q", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Full-screen loading screen shown until the preloader is dismissed
    pub fn render_preloader(frame: &mut Frame, app: &App, theme: &Theme) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

        let spinner = SPINNER[(app.now() / 80) as usize % SPINNER.len()];
        let lines = vec![
            Line::styled(
                app.built.brand.as_str(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(format!("{} loading", spinner), Style::default().fg(theme.muted)),
        ];
        let rect = centered_rect(area.width.min(30), 3, area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
    }

    /// Dropdown menu under the header
    pub fn render_menu(frame: &mut Frame, app: &App, theme: &Theme) {
        let area = frame.area();
        let menu = MenuBox::new(&app.built.nav, area.width);
        let rect = Rect::new(menu.cols.start, menu.top, menu.cols.len() as u16, menu.rows)
            .intersection(area);

        let lines: Vec<Line> = app
            .built
            .nav
            .iter()
            .map(|entry| {
                let mut style = Style::default().fg(theme.fg);
                if app.surface.has_state(entry.element, states::ACTIVE) {
                    style = style.fg(theme.active).add_modifier(Modifier::BOLD);
                }
                if app.hovered() == Some(entry.element) {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if app.focused_link() == Some(entry.element) {
                    style = style.fg(theme.bg).bg(theme.focus);
                }
                Line::styled(format!(" {}", entry.label), style)
            })
            .collect();

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.bg_raised)),
            ),
            rect,
        );
    }

    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = (HELP.len() as u16 + 4).min(area.height.saturating_sub(2));
        let rect = centered_rect(width, height, area);

        let mut lines: Vec<Line> = HELP
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{:>16}  ", keys), Style::default().fg(theme.accent)),
                    Span::styled(*what, Style::default().fg(theme.fg)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::styled("press any key", Style::default().fg(theme.muted)).centered());

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.bg_raised)),
            ),
            rect,
        );
    }
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
