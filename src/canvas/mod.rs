//! # Canvas
//!
//! The drawing surface the layout engine talks to. A canvas owns pages and
//! accepts positioned drawing primitives; the engine never sees how they end
//! up on paper.
//!
//! Coordinates are in layout units with the origin at the top-left corner
//! of the page and y growing downward. Text is positioned by its baseline.
//!
//! [`RecordingCanvas`] is the built-in backend. It keeps every primitive as
//! a [`DrawCommand`] so the result can be inspected, replayed or handed to
//! the PDF writer.

mod recording;

pub use recording::{CanvasError, Document, Page, RecordingCanvas};

use serde::Serialize;

use crate::layout::SectionKind;
use crate::model::TimeSlot;
use crate::style::{Color, Paint, TextStyle};

/// A point in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrawCommand {
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        paint: Paint,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    Triangle {
        points: [Point; 3],
        paint: Paint,
    },
}

impl DrawCommand {
    /// Lowest y this primitive reaches. Text counts from its baseline.
    pub fn bottom(&self) -> f64 {
        match self {
            DrawCommand::Text { y, .. } => *y,
            DrawCommand::Rect { rect, .. } | DrawCommand::RoundedRect { rect, .. } => {
                rect.bottom()
            }
            DrawCommand::Line { from, to, .. } => from.y.max(to.y),
            DrawCommand::Circle { center, radius, .. } => center.y + radius,
            DrawCommand::Triangle { points, .. } => {
                points.iter().map(|p| p.y).fold(f64::MIN, f64::max)
            }
        }
    }

    /// The text content, for text commands.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// What a structural marker labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Tag {
    /// A section's heading, or the whole block for sections without one.
    Section { section: SectionKind },
    /// One day of the timeline.
    DayBlock { day: u32 },
    /// A non-empty time-of-day slot inside a day block.
    Slot { day: u32, slot: TimeSlot },
    TableHeader { section: SectionKind },
    TableRow { section: SectionKind, index: usize },
    FlightRow { index: usize },
    Footer,
}

/// A labelled vertical extent on a page, recorded alongside the drawing
/// commands of the block it describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub tag: Tag,
    pub page_index: usize,
    pub y: f64,
    pub height: f64,
    /// Index of the first command drawn after this mark on its page.
    pub command_index: usize,
}

impl Mark {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A paged drawing surface.
///
/// Every mutating call can fail; the engine passes backend errors through
/// untouched.
pub trait Canvas {
    type Error: std::error::Error + 'static;

    /// Page width and height in layout units.
    fn page_size(&self) -> (f64, f64);

    fn page_count(&self) -> usize;

    /// Zero-based index of the page drawing calls go to.
    fn current_page(&self) -> usize;

    /// Append a page and make it current.
    fn add_page(&mut self) -> Result<(), Self::Error>;

    /// Make an existing page current.
    fn set_page(&mut self, index: usize) -> Result<(), Self::Error>;

    fn text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<(), Self::Error>;

    fn rect(&mut self, rect: Rect, paint: Paint) -> Result<(), Self::Error>;

    fn rounded_rect(&mut self, rect: Rect, radius: f64, paint: Paint) -> Result<(), Self::Error>;

    fn line(&mut self, from: Point, to: Point, color: Color, width: f64)
        -> Result<(), Self::Error>;

    fn circle(&mut self, center: Point, radius: f64, paint: Paint) -> Result<(), Self::Error>;

    fn triangle(&mut self, points: [Point; 3], paint: Paint) -> Result<(), Self::Error>;

    /// Label the block about to be drawn. Backends that don't keep structure
    /// can ignore it.
    fn mark(&mut self, _tag: Tag, _y: f64, _height: f64) -> Result<(), Self::Error> {
        Ok(())
    }
}
