//! # Cell Grid Composition
//!
//! Partitions the fixed label content area into four independent row
//! groups, each with its own column count and alignment rules:
//!
//! | Group | Columns | Rows |
//! |-------|---------|------|
//! | Identity | logo, "ASSLY" header, assembly value | 1 |
//! | Key/value | header, value | PART NO, PART DESC |
//! | Quantity | header, value, QR (spanning) | PART PER VEH, TYPE, DATE |
//! | Location | header + four segment boxes | 1 |
//!
//! Column widths are ratios of one shared content width; row heights are
//! config constants, except variable-text rows which take
//! `max(minimum, measured)`. Composition is a pure function of its
//! inputs — no state crosses rows.

use std::sync::Arc;

use image::GrayImage;

use super::config::{LayoutConfig, TextStyle};
use super::fit::FitResult;
use super::measure::{self, GlyphMetrics};

/// Shared handle to a decoded grayscale raster (logo or QR).
pub type ImageHandle = Arc<GrayImage>;

/// Horizontal alignment of a cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
}

/// What a cell holds, dispatched explicitly by the rendering backend.
#[derive(Debug, Clone)]
pub enum CellContent {
    Text(String),
    Image { fit: FitResult, handle: ImageHandle },
    Empty,
}

/// One rectangle of the grid.
#[derive(Debug, Clone)]
pub struct Cell {
    pub content: CellContent,
    /// Width in centimeters (ratio × content width).
    pub width_cm: f32,
    /// Height in centimeters. Equals the row height unless the cell spans.
    pub height_cm: f32,
    pub align: CellAlign,
    pub style: TextStyle,
    /// Number of rows this cell covers downward (1 for normal cells).
    pub row_span: usize,
}

/// One row of cells. Cells lay out left to right from the row's origin;
/// a row whose widths sum below the content width leaves the remainder to
/// spanning cells from rows above.
#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub height_cm: f32,
}

/// Which of the four independent groups a set of rows belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Identity,
    KeyValue,
    Quantity,
    Location,
}

/// An independently-sized sub-grid of the label.
#[derive(Debug, Clone)]
pub struct RowGroup {
    pub kind: GroupKind,
    pub rows: Vec<Row>,
}

/// The full composed grid for one label.
#[derive(Debug, Clone)]
pub struct LabelGrid {
    pub groups: Vec<RowGroup>,
}

impl LabelGrid {
    /// All rows, top to bottom, across groups.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    /// Total grid height in centimeters.
    pub fn total_height_cm(&self) -> f32 {
        self.rows().map(|r| r.height_cm).sum()
    }
}

/// Per-label inputs to composition: field values, location segments, and
/// the already-fitted images.
pub struct LabelContent<'a> {
    pub assembly: &'a str,
    pub part_number: &'a str,
    pub description: &'a str,
    pub quantity: &'a str,
    pub part_type: &'a str,
    pub date: &'a str,
    pub location: [&'a str; 4],
    pub logo: Option<(FitResult, ImageHandle)>,
    pub qr: Option<(FitResult, ImageHandle)>,
}

/// Compose the four row groups for one label.
pub fn compose(
    config: &LayoutConfig,
    metrics: &dyn GlyphMetrics,
    content: &LabelContent<'_>,
) -> LabelGrid {
    LabelGrid {
        groups: vec![
            identity_group(config, metrics, content),
            key_value_group(config, metrics, content),
            quantity_group(config, content),
            location_group(config, content),
        ],
    }
}

fn text_cell(text: &str, width_cm: f32, height_cm: f32, align: CellAlign, style: TextStyle) -> Cell {
    Cell {
        content: CellContent::Text(text.to_string()),
        width_cm,
        height_cm,
        align,
        style,
        row_span: 1,
    }
}

fn header_cell(label: &str, width_cm: f32, height_cm: f32, config: &LayoutConfig) -> Cell {
    text_cell(label, width_cm, height_cm, CellAlign::Center, config.styles.header)
}

/// Inner width available to text once cell padding is taken off.
fn inner(width_cm: f32, config: &LayoutConfig) -> f32 {
    (width_cm - 2.0 * config.cell_padding_cm).max(0.0)
}

fn identity_group(
    config: &LayoutConfig,
    metrics: &dyn GlyphMetrics,
    content: &LabelContent<'_>,
) -> RowGroup {
    let cw = config.content_width();
    let widths = config.identity_ratios.map(|r| r * cw);

    let measured = measure::measure(
        content.assembly,
        &config.styles.assembly,
        inner(widths[2], config),
        metrics,
    );
    let height = config.identity_row_min_cm.max(measured);

    let logo = match &content.logo {
        Some((fit, handle)) => Cell {
            content: CellContent::Image {
                fit: *fit,
                handle: Arc::clone(handle),
            },
            width_cm: widths[0],
            height_cm: height,
            align: CellAlign::Center,
            style: config.styles.header,
            row_span: 1,
        },
        None => Cell {
            content: CellContent::Empty,
            width_cm: widths[0],
            height_cm: height,
            align: CellAlign::Center,
            style: config.styles.header,
            row_span: 1,
        },
    };

    RowGroup {
        kind: GroupKind::Identity,
        rows: vec![Row {
            cells: vec![
                logo,
                header_cell("ASSLY", widths[1], height, config),
                text_cell(
                    content.assembly,
                    widths[2],
                    height,
                    CellAlign::Left,
                    config.styles.assembly,
                ),
            ],
            height_cm: height,
        }],
    }
}

fn key_value_group(
    config: &LayoutConfig,
    metrics: &dyn GlyphMetrics,
    content: &LabelContent<'_>,
) -> RowGroup {
    let cw = config.content_width();
    let widths = config.key_value_ratios.map(|r| r * cw);
    let value_inner = inner(widths[1], config);

    let mut rows = Vec::with_capacity(2);
    for (label, value, style) in [
        ("PART NO", content.part_number, config.styles.part_number),
        ("PART DESC", content.description, config.styles.description),
    ] {
        let measured = measure::measure(value, &style, value_inner, metrics);
        let height = config.value_row_min_cm.max(measured);
        rows.push(Row {
            cells: vec![
                header_cell(label, widths[0], height, config),
                text_cell(value, widths[1], height, CellAlign::Left, style),
            ],
            height_cm: height,
        });
    }

    RowGroup {
        kind: GroupKind::KeyValue,
        rows,
    }
}

fn quantity_group(config: &LayoutConfig, content: &LabelContent<'_>) -> RowGroup {
    let cw = config.content_width();
    let widths = config.quantity_ratios.map(|r| r * cw);
    let row_h = config.quantity_row_cm;

    // QR column spans all three rows; the fallback placeholder mirrors a
    // failed encode in the upstream tool.
    let qr = match &content.qr {
        Some((fit, handle)) => Cell {
            content: CellContent::Image {
                fit: *fit,
                handle: Arc::clone(handle),
            },
            width_cm: widths[2],
            height_cm: row_h * 3.0,
            align: CellAlign::Center,
            style: config.styles.header,
            row_span: 3,
        },
        None => Cell {
            content: CellContent::Text("QR".to_string()),
            width_cm: widths[2],
            height_cm: row_h * 3.0,
            align: CellAlign::Center,
            style: config.styles.header,
            row_span: 3,
        },
    };

    let detail = config.styles.detail;
    let rows = vec![
        Row {
            cells: vec![
                header_cell("PART PER VEH", widths[0], row_h, config),
                text_cell(content.quantity, widths[1], row_h, CellAlign::Left, detail),
                qr,
            ],
            height_cm: row_h,
        },
        Row {
            cells: vec![
                header_cell("TYPE", widths[0], row_h, config),
                text_cell(content.part_type, widths[1], row_h, CellAlign::Left, detail),
            ],
            height_cm: row_h,
        },
        Row {
            cells: vec![
                header_cell("DATE", widths[0], row_h, config),
                text_cell(content.date, widths[1], row_h, CellAlign::Left, detail),
            ],
            height_cm: row_h,
        },
    ];

    RowGroup {
        kind: GroupKind::Quantity,
        rows,
    }
}

fn location_group(config: &LayoutConfig, content: &LabelContent<'_>) -> RowGroup {
    let cw = config.content_width();
    let widths = config.location_ratios.map(|r| r * cw);
    let row_h = config.location_row_cm;

    let mut cells = vec![header_cell("LINE LOCATION", widths[0], row_h, config)];
    for (i, segment) in content.location.iter().enumerate() {
        let width = widths[i + 1];
        if segment.is_empty() {
            cells.push(Cell {
                content: CellContent::Empty,
                width_cm: width,
                height_cm: row_h,
                align: CellAlign::Center,
                style: config.styles.location,
                row_span: 1,
            });
        } else {
            cells.push(text_cell(
                segment,
                width,
                row_h,
                CellAlign::Center,
                config.styles.location,
            ));
        }
    }

    RowGroup {
        kind: GroupKind::Location,
        rows: vec![Row {
            cells,
            height_cm: row_h,
        }],
    }
}
