use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let mode_str = match app.mode {
            Mode::Browse => "BROWSE",
            Mode::Form { .. } => "FORM",
            Mode::Help => "HELP",
        };

        let max = app.max_scroll();
        let percent = if max == 0 {
            100
        } else {
            app.surface.scroll_row() as u32 * 100 / max as u32
        };
        let section = app
            .page
            .navigation()
            .highlighter()
            .active()
            .unwrap_or("-");

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(" {} | #{} | {}%", mode_str, section, percent)
        };

        let help_hint = match app.mode {
            Mode::Form { .. } => " Tab:next field Enter:send Esc:leave ",
            _ => " q:quit j/k:scroll Tab:links m:menu i:form ?:help ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let bar = Style::default().fg(theme.fg).bg(theme.bg_raised);
        let line = Line::from(vec![
            Span::styled(status_text, bar),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.bg_raised)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
