//! Frame composition for the page preview

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    Frame,
};

use novapage_core::surface::states;

use crate::app::{App, Mode};
use crate::layout::{HEADER_ROWS, STATUS_ROWS};
use crate::theme::Theme;
use crate::widgets::{HeaderWidget, PageViewWidget, PopupWidget, StatusBarWidget, ToastWidget};

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    if !app.page.preloader().is_loaded() {
        PopupWidget::render_preloader(frame, app, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(1),
            Constraint::Length(STATUS_ROWS),
        ])
        .split(area);

    PageViewWidget::render(frame, chunks[1], app, theme);
    HeaderWidget::render(frame, chunks[0], app, theme);
    StatusBarWidget::render(frame, chunks[2], app, theme);

    if app.page.navigation().is_menu_open() {
        PopupWidget::render_menu(frame, app, theme);
    }
    ToastWidget::render(frame, chunks[1], app, theme);
    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, theme);
    }

    render_cursor(frame, app, theme);
}

/// Custom cursor dot and its trailing follower, in terminal cells
fn render_cursor(frame: &mut Frame, app: &App, theme: &Theme) {
    if !app.page.cursor().is_enabled() {
        return;
    }
    let landmarks = &app.built.landmarks;
    let hover = app.surface.has_state(landmarks.follower, states::HOVER);
    let parts = [
        (landmarks.follower, if hover { '◎' } else { '○' }),
        (landmarks.cursor, '●'),
    ];

    let buf = frame.buffer_mut();
    for (element, glyph) in parts {
        let Some(cell) = app
            .surface
            .placement_cell(element)
            .and_then(|pos| buf.cell_mut(pos))
        else {
            continue;
        };
        cell.set_char(glyph).set_style(Style::default().fg(theme.cursor));
    }
}
