//! Row-based layout of a built page
//!
//! Every section and block gets a document-absolute box measured in terminal
//! rows. The surface converts rows to pixels for the page behavior.

use std::collections::HashMap;
use std::ops::Range;

use novapage_core::ElementId;
use unicode_width::UnicodeWidthStr;

use crate::manifest::{BlockKind, BuiltPage, NavEntry};

/// Rows taken by the fixed header
pub const HEADER_ROWS: u16 = 3;
/// Rows taken by the status bar
pub const STATUS_ROWS: u16 = 1;
/// Columns reserved for the menu toggle at the right of the header
pub const TOGGLE_COLS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBox {
    pub top: u16,
    pub height: u16,
}

impl RowBox {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, row: u16) -> bool {
        row >= self.top && row < self.bottom()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    boxes: HashMap<ElementId, RowBox>,
    total_rows: u16,
    width: u16,
}

impl PageLayout {
    pub fn compute(page: &BuiltPage, width: u16) -> Self {
        let mut layout = Self {
            width,
            ..Default::default()
        };
        let inner = width.saturating_sub(4).max(1);

        let mut row = 0u16;
        for section in &page.sections {
            let top = row;
            // Title line and a blank line under it
            row = row.saturating_add(2);
            for block in &section.blocks {
                let height = block.spec.rows.unwrap_or_else(|| block_rows(&block.spec.kind, inner));
                layout.boxes.insert(block.element, RowBox { top: row, height });
                if let Some(form) = &block.form {
                    let mut field_row = row;
                    for field in &form.fields {
                        layout.boxes.insert(
                            field.element,
                            RowBox {
                                top: field_row,
                                height: field.rows,
                            },
                        );
                        field_row = field_row.saturating_add(field.rows);
                    }
                    layout.boxes.insert(
                        form.button,
                        RowBox {
                            top: field_row,
                            height: 1,
                        },
                    );
                }
                row = row.saturating_add(height).saturating_add(1);
            }
            let height = (row - top).max(section.min_rows);
            layout.boxes.insert(section.element, RowBox { top, height });
            row = top.saturating_add(height);
        }
        layout.total_rows = row;
        layout
    }

    pub fn get(&self, element: ElementId) -> Option<RowBox> {
        self.boxes.get(&element).copied()
    }

    pub fn total_rows(&self) -> u16 {
        self.total_rows
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Furthest the page can scroll with `viewport_rows` visible
    pub fn max_scroll(&self, viewport_rows: u16) -> u16 {
        self.total_rows.saturating_sub(viewport_rows)
    }

    /// Innermost element whose box covers the document row
    pub fn hit(&self, row: u16) -> Option<ElementId> {
        self.boxes
            .iter()
            .filter(|(_, b)| b.contains(row))
            .min_by_key(|(id, b)| (b.height, **id))
            .map(|(id, _)| *id)
    }
}

/// Natural height of a block at `width` columns
pub fn block_rows(kind: &BlockKind, width: u16) -> u16 {
    match kind {
        BlockKind::Heading { text } => wrapped_lines(text, width),
        BlockKind::Text { text } => wrapped_lines(text, width),
        BlockKind::Typed { .. } => 1,
        BlockKind::Stat { .. } => 2,
        BlockKind::Image { .. } => 5,
        BlockKind::Card { text, .. } => wrapped_lines(text, width.saturating_sub(4).max(1)) + 3,
        BlockKind::Link { .. } => 1,
        BlockKind::Form { .. } => crate::manifest::FORM_FIELDS
            .iter()
            .map(|(_, _, rows)| *rows)
            .sum::<u16>()
            .saturating_add(1),
    }
}

/// Lines `text` takes when wrapped at `width` display columns
pub fn wrapped_lines(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let lines: usize = text
        .lines()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    lines.max(1).min(u16::MAX as usize) as u16
}

/// Column ranges of the header links, laid out right to left before the
/// toggle. Links that do not fit are left out.
pub fn header_spans(nav: &[NavEntry], brand: &str, width: u16) -> Vec<(ElementId, Range<u16>)> {
    let mut spans = Vec::new();
    let mut right = width.saturating_sub(TOGGLE_COLS + 1);
    let floor = (brand.width() as u16).saturating_add(4);
    for entry in nav.iter().rev() {
        let len = entry.label.width() as u16;
        let Some(start) = right.checked_sub(len) else {
            break;
        };
        if start < floor {
            break;
        }
        spans.push((entry.element, start..right));
        right = start.saturating_sub(2);
    }
    spans.reverse();
    spans
}

/// Column range of the menu toggle
pub fn toggle_span(width: u16) -> Range<u16> {
    width.saturating_sub(TOGGLE_COLS)..width
}

/// Dropdown menu box under the header, right-aligned. Entry `i` sits on
/// row `top + 1 + i` between the border rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBox {
    pub cols: Range<u16>,
    pub top: u16,
    pub rows: u16,
}

impl MenuBox {
    pub fn new(nav: &[NavEntry], width: u16) -> Self {
        let label = nav.iter().map(|e| e.label.width() as u16).max().unwrap_or(0);
        let cols = label.saturating_add(4).max(12).min(width);
        Self {
            cols: width - cols..width,
            top: HEADER_ROWS,
            rows: (nav.len() as u16).saturating_add(2),
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.cols.contains(&col) && row >= self.top && row < self.top.saturating_add(self.rows)
    }

    /// Index of the entry on `row`, if any
    pub fn entry_at(&self, row: u16) -> Option<usize> {
        let offset = row.checked_sub(self.top + 1)?;
        (offset < self.rows.saturating_sub(2)).then_some(offset as usize)
    }
}
