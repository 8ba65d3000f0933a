//! The shared table renderer.
//!
//! Every table in the template has the same shape: a rounded purple header
//! band with white column labels, then one fixed-height band per row with
//! the background alternating by row index. Tables only differ in their
//! columns and in how a record turns into cells.

use log::debug;

use super::{LayoutEngine, LayoutState, SectionKind};
use crate::canvas::{Canvas, Rect, Tag};
use crate::style::{palette, Color, Paint, TextStyle};

const HEADER_HEIGHT: f64 = 10.0;
const HEADER_RADIUS: f64 = 3.0;
const ROW_HEIGHT: f64 = 10.0;
/// Space checked for before each row. A little more than the row itself.
const ROW_RESERVE: f64 = 12.0;
/// Offset from a band's top edge to its text baseline.
const TEXT_OFFSET: f64 = 6.0;
/// Cell text starts this far right of the column's left edge.
const CELL_PADDING: f64 = 5.0;

/// A labelled column of fixed width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub label: &'static str,
    pub width: f64,
}

const fn col(label: &'static str, width: f64) -> Column {
    Column { label, width }
}

/// Columns of one table type.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub section: SectionKind,
    pub columns: &'static [Column],
}

impl TableSpec {
    pub const HOTELS: TableSpec = TableSpec {
        section: SectionKind::Hotels,
        columns: &[
            col("City", 30.0),
            col("Check In", 30.0),
            col("Check Out", 30.0),
            col("Nights", 20.0),
            col("Hotel Name", 60.0),
        ],
    };

    pub const IMPORTANT_NOTES: TableSpec = TableSpec {
        section: SectionKind::ImportantNotes,
        columns: &[col("Point", 65.0), col("Details", 105.0)],
    };

    pub const SERVICE_SCOPE: TableSpec = TableSpec {
        section: SectionKind::ServiceScope,
        columns: &[col("Service", 65.0), col("Details", 105.0)],
    };

    pub const INCLUSIONS: TableSpec = TableSpec {
        section: SectionKind::Inclusions,
        columns: &[
            col("Category", 25.0),
            col("Count", 15.0),
            col("Details", 60.0),
            col("Status / Comments", 70.0),
        ],
    };

    pub const ACTIVITIES: TableSpec = TableSpec {
        section: SectionKind::Activities,
        columns: &[
            col("City", 30.0),
            col("Activity", 60.0),
            col("Type", 30.0),
            col("Time Required", 50.0),
        ],
    };

    pub const INSTALLMENTS: TableSpec = TableSpec {
        section: SectionKind::Installments,
        columns: &[
            col("Installment", 45.0),
            col("Amount", 45.0),
            col("Due Date", 80.0),
        ],
    };

    pub const ALL: [TableSpec; 6] = [
        Self::HOTELS,
        Self::IMPORTANT_NOTES,
        Self::SERVICE_SCOPE,
        Self::INCLUSIONS,
        Self::ACTIVITIES,
        Self::INSTALLMENTS,
    ];

    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Text x positions of each column, starting from `left`.
    pub fn column_positions(&self, left: f64) -> Vec<f64> {
        let mut x = left + CELL_PADDING;
        self.columns
            .iter()
            .map(|c| {
                let at = x;
                x += c.width;
                at
            })
            .collect()
    }
}

/// Background of body row `index`.
pub fn row_fill(index: usize) -> Color {
    if index % 2 == 0 {
        palette::ROW_EVEN
    } else {
        palette::ROW_ODD
    }
}

impl LayoutEngine {
    /// Draw a header band and one band per row. `cells` turns a record into
    /// one string per column.
    pub(super) fn table<C, R, F>(
        &self,
        spec: &TableSpec,
        rows: &[R],
        cells: F,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error>
    where
        C: Canvas,
        F: Fn(&R) -> Vec<String>,
    {
        let positions = spec.column_positions(self.config.left_margin);

        self.reserve(state, canvas, HEADER_HEIGHT)?;
        debug!(
            section:? = spec.section,
            rows = rows.len(),
            page = state.page_index,
            y = state.y;
            "Table start"
        );
        self.table_header(spec, &positions, state, canvas)?;

        for (index, row) in rows.iter().enumerate() {
            let broke = self.reserve(state, canvas, ROW_RESERVE)?;
            if broke && self.config.repeat_table_headers {
                self.table_header(spec, &positions, state, canvas)?;
            }

            canvas.mark(
                Tag::TableRow {
                    section: spec.section,
                    index,
                },
                state.y,
                ROW_HEIGHT,
            )?;
            canvas.rect(
                Rect::new(
                    self.config.left_margin,
                    state.y,
                    self.config.usable_width(),
                    ROW_HEIGHT,
                ),
                Paint::Fill(row_fill(index)),
            )?;
            let style = TextStyle::new(7.0, Color::BLACK);
            for (text, &x) in cells(row).iter().zip(&positions) {
                canvas.text(text, x, state.y + TEXT_OFFSET, &style)?;
            }
            self.advance(state, ROW_HEIGHT);
        }
        Ok(())
    }

    fn table_header<C: Canvas>(
        &self,
        spec: &TableSpec,
        positions: &[f64],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        canvas.mark(
            Tag::TableHeader {
                section: spec.section,
            },
            state.y,
            HEADER_HEIGHT,
        )?;
        canvas.rounded_rect(
            Rect::new(
                self.config.left_margin,
                state.y,
                self.config.usable_width(),
                HEADER_HEIGHT,
            ),
            HEADER_RADIUS,
            Paint::Fill(palette::BRAND_PURPLE),
        )?;
        let style = TextStyle::new(8.0, Color::WHITE);
        for (column, &x) in spec.columns.iter().zip(positions) {
            canvas.text(column.label, x, state.y + TEXT_OFFSET, &style)?;
        }
        self.advance(state, HEADER_HEIGHT);
        Ok(())
    }
}
