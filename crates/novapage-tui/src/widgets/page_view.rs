use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use novapage_core::reveal::REVEAL_ATTR;
use novapage_core::surface::states;
use novapage_core::ElementId;

use crate::app::App;
use crate::layout::RowBox;
use crate::manifest::{BlockKind, BuiltBlock, BuiltSection, FormParts};
use crate::theme::Theme;

pub struct PageViewWidget;

impl PageViewWidget {
    /// Draw the scrolled window of the page into `area`
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let page = render_page(app, theme);
        let scroll = app.surface.scroll_row();
        let buf = frame.buffer_mut();
        buf.set_style(area, Style::default().bg(theme.bg).fg(theme.fg));
        for y in 0..area.height {
            for x in 0..area.width {
                let Some(src) = page.cell((x, scroll.saturating_add(y))) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut((area.x + x, area.y + y)) {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// Whole document at document coordinates
fn render_page(app: &App, theme: &Theme) -> Buffer {
    let layout = app.surface.layout();
    let width = layout.width();
    let mut buf = Buffer::empty(Rect::new(0, 0, width, layout.total_rows()));
    buf.set_style(buf.area, Style::default().bg(theme.bg).fg(theme.fg));

    if let Some(hero) = app.built.sections.first() {
        if let Some(b) = layout.get(hero.element) {
            render_particles(&mut buf, app, theme, b);
        }
    }
    for section in &app.built.sections {
        render_section(&mut buf, app, theme, section);
    }
    buf
}

fn render_particles(buf: &mut Buffer, app: &App, theme: &Theme, hero: RowBox) {
    let surface = &app.surface;
    let elapsed_s = app.now() as f64 / 1000.0;
    let width_px = surface.cols_to_px(buf.area.width);
    let top_px = surface.rows_to_px(hero.top);
    let height_px = surface.rows_to_px(hero.height);

    for particle in app.page.particles() {
        let f = particle.frame_at(elapsed_s);
        let col = surface.px_to_cols(particle.x_pct / 100.0 * width_px + f.dx);
        let row = surface.px_to_rows(top_px + particle.y_pct / 100.0 * height_px + f.dy);
        if !hero.contains(row) {
            continue;
        }
        let glyph = match particle.size_px * f.scale {
            s if s < 2.0 => '·',
            s if s < 4.0 => '•',
            _ => '●',
        };
        let mut style = Style::default().fg(theme.particle);
        if particle.opacity * f.opacity < 0.3 {
            style = style.add_modifier(Modifier::DIM);
        }
        if let Some(cell) = buf.cell_mut((col, row)) {
            cell.set_char(glyph).set_style(style);
        }
    }
}

fn render_section(buf: &mut Buffer, app: &App, theme: &Theme, section: &BuiltSection) {
    let layout = app.surface.layout();
    let Some(b) = layout.get(section.element) else {
        return;
    };

    let active = app.page.navigation().highlighter().active() == Some(section.id.as_str());
    let marker = if active { "▸ " } else { "  " };
    let style = Style::default()
        .fg(if active { theme.active } else { theme.fg })
        .add_modifier(Modifier::BOLD);
    buf.set_stringn(0, b.top, format!("{}{}", marker, section.title), buf.area.width as usize, style);

    for block in &section.blocks {
        if let Some(rect) = layout.get(block.element).map(|r| inner_rect(buf.area, r)) {
            if is_hidden(app, block.element) {
                continue;
            }
            render_block(buf, rect, app, theme, block);
        }
    }
}

fn inner_rect(area: Rect, b: RowBox) -> Rect {
    Rect::new(2, b.top, area.width.saturating_sub(4).max(1), b.height).intersection(area)
}

/// Reveal targets stay blank until revealed
fn is_hidden(app: &App, element: ElementId) -> bool {
    let has_reveal = app
        .built
        .document
        .get(element)
        .is_some_and(|d| d.has_attr(REVEAL_ATTR));
    has_reveal && !app.surface.has_state(element, states::REVEALED)
}

fn render_block(buf: &mut Buffer, rect: Rect, app: &App, theme: &Theme, block: &BuiltBlock) {
    let hovered = app.hovered() == Some(block.element);
    let focused = app.focused_link() == Some(block.element);

    match &block.spec.kind {
        BlockKind::Heading { text } => {
            Paragraph::new(text.as_str())
                .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }
        BlockKind::Text { text } => {
            Paragraph::new(text.as_str())
                .style(Style::default().fg(theme.fg))
                .wrap(Wrap { trim: false })
                .render(rect, buf);
        }
        BlockKind::Typed { .. } => {
            let typed = app.surface.text(block.element).unwrap_or_default();
            Paragraph::new(Line::from(vec![
                Span::styled(typed.to_string(), Style::default().fg(theme.accent)),
                Span::styled("▌", Style::default().fg(theme.muted)),
            ]))
            .render(rect, buf);
        }
        BlockKind::Stat { label, .. } => {
            let value = app.surface.text(block.element).unwrap_or("0");
            Paragraph::new(vec![
                Line::styled(
                    value.to_string(),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Line::styled(label.as_str(), Style::default().fg(theme.muted)),
            ])
            .render(rect, buf);
        }
        BlockKind::Image { alt, .. } => {
            let border = if hovered { theme.accent } else { theme.border };
            let body = match app.surface.source(block.element) {
                Some(src) => vec![
                    Line::styled(format!("▣ {}", alt), Style::default().fg(theme.fg)),
                    Line::styled(src.to_string(), Style::default().fg(theme.muted)),
                ],
                None => vec![Line::styled("loading image…", Style::default().fg(theme.muted))],
            };
            Paragraph::new(body)
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)))
                .render(rect, buf);
        }
        BlockKind::Card { title, text } => {
            let border = if hovered { theme.accent } else { theme.border };
            Paragraph::new(text.as_str())
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(theme.fg).bg(theme.bg_raised))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border))
                        .title(Span::styled(
                            format!(" {} ", title),
                            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                        )),
                )
                .render(rect, buf);
        }
        BlockKind::Link { text, .. } => {
            let mut style = Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED);
            if focused {
                style = style.fg(theme.bg).bg(theme.focus);
            } else if hovered {
                style = style.add_modifier(Modifier::BOLD);
            }
            Paragraph::new(Line::styled(format!("→ {}", text), style)).render(rect, buf);
        }
        BlockKind::Form { .. } => {
            if let Some(form) = &block.form {
                render_form(buf, app, theme, form);
            }
        }
    }
}

fn render_form(buf: &mut Buffer, app: &App, theme: &Theme, form: &FormParts) {
    let layout = app.surface.layout();
    let active = app.active_field().map(|f| f.element);

    for field in &form.fields {
        let Some(rect) = layout.get(field.element).map(|r| inner_rect(buf.area, r)) else {
            continue;
        };
        let editing = active == Some(field.element);
        let label_style = if editing {
            Style::default().fg(theme.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        let value = app.surface.text(field.element).unwrap_or_default();
        let mut lines = vec![Line::styled(field.label, label_style)];
        let mut spans = vec![Span::raw(value.to_string())];
        if editing {
            spans.push(Span::styled("▌", Style::default().fg(theme.focus)));
        }
        lines.push(Line::from(spans));

        let input_bg = Rect {
            y: rect.y + 1,
            height: rect.height.saturating_sub(1),
            ..rect
        };
        buf.set_style(input_bg.intersection(buf.area), Style::default().bg(theme.bg_raised));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(rect, buf);
    }

    if let Some(rect) = layout.get(form.button).map(|r| inner_rect(buf.area, r)) {
        let button = form.button;
        let label = app.surface.text(button).unwrap_or("Send Message");
        let style = if app.surface.has_state(button, states::SENT) {
            Style::default().fg(theme.bg).bg(theme.success)
        } else if app.surface.has_state(button, states::DISABLED) {
            Style::default().fg(theme.muted).bg(theme.bg_raised)
        } else if app.hovered() == Some(button) {
            Style::default().fg(theme.bg).bg(theme.active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.bg).bg(theme.accent).add_modifier(Modifier::BOLD)
        };
        Paragraph::new(Line::styled(format!(" {} ", label), style)).render(rect, buf);
    }
}
