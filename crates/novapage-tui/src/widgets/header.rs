use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use novapage_core::surface::states;

use crate::app::App;
use crate::layout::{header_spans, toggle_span};
use crate::theme::Theme;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let landmarks = &app.built.landmarks;
        let scrolled = app.surface.has_state(landmarks.header, states::SCROLLED);
        let bg = if scrolled { theme.header_scrolled_bg } else { theme.header_bg };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(if scrolled { theme.accent } else { theme.border }))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let buf = frame.buffer_mut();
        let y = inner.y + inner.height / 2;
        buf.set_stringn(
            inner.x + 2,
            y,
            &app.built.brand,
            inner.width.saturating_sub(2) as usize,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        );

        for (element, span) in header_spans(&app.built.nav, &app.built.brand, area.width) {
            let Some(entry) = app.built.nav.iter().find(|e| e.element == element) else {
                continue;
            };
            let mut style = Style::default().fg(theme.muted).bg(bg);
            if app.surface.has_state(element, states::ACTIVE) {
                style = style.fg(theme.active).add_modifier(Modifier::BOLD);
            }
            if app.hovered() == Some(element) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if app.focused_link() == Some(element) {
                style = style.fg(theme.bg).bg(theme.focus);
            }
            buf.set_stringn(area.x + span.start, y, &entry.label, span.len(), style);
        }

        let toggle = toggle_span(area.width);
        let open = app.page.navigation().is_menu_open();
        let glyph = if open { "[×]" } else { "[≡]" };
        let style = if open || app.hovered() == Some(landmarks.toggle) {
            Style::default().fg(theme.active).bg(bg)
        } else {
            Style::default().fg(theme.fg).bg(bg)
        };
        buf.set_stringn(area.x + toggle.start + 1, y, glyph, toggle.len(), style);
    }
}
