use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use novapage_core::toast::{ToastKind, ToastPhase};

use crate::app::App;
use crate::theme::Theme;

const TOAST_ROWS: u16 = 3;
const MAX_WIDTH: u16 = 48;

pub struct ToastWidget;

impl ToastWidget {
    /// Stack toasts at the top right of `area`, oldest first
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let mut y = area.y;
        for toast in app.page.toasts().iter() {
            if y + TOAST_ROWS > area.bottom() {
                break;
            }
            let width = (toast.message.width() as u16 + 4)
                .min(MAX_WIDTH)
                .min(area.width);
            let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, TOAST_ROWS)
                .intersection(area);

            let color = match toast.kind {
                ToastKind::Error => theme.error,
                ToastKind::Success => theme.success,
            };
            let mut style = Style::default().fg(color);
            if toast.phase == ToastPhase::Leaving {
                style = style.add_modifier(Modifier::DIM);
            }

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::styled(
                    super::truncate_str(&toast.message, width.saturating_sub(4) as usize),
                    style,
                ))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(style)
                        .style(Style::default().bg(theme.bg_raised)),
                ),
                rect,
            );
            y += TOAST_ROWS;
        }
    }
}
