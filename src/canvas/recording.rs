//! The recording backend and the [`Document`] it produces.

use log::trace;
use serde::Serialize;
use thiserror::Error;

use super::{Canvas, DrawCommand, Mark, Point, Rect, Tag};
use crate::layout::SectionKind;
use crate::style::{Color, Paint, TextStyle};

/// Failures of the recording backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("page limit of {limit} reached")]
    PageLimit { limit: usize },
    #[error("page {index} does not exist (document has {count})")]
    PageOutOfRange { index: usize, count: usize },
}

/// Everything drawn on one page, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
    pub marks: Vec<Mark>,
}

impl Page {
    /// The commands belonging to `mark`: from its command index up to the
    /// next mark on the page.
    pub fn block(&self, mark: &Mark) -> &[DrawCommand] {
        let end = self
            .marks
            .iter()
            .map(|m| m.command_index)
            .filter(|&i| i > mark.command_index)
            .min()
            .unwrap_or(self.commands.len());
        &self.commands[mark.command_index..end]
    }
}

/// A rendered document: fixed-size pages of drawing commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All marks, page by page.
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.pages.iter().flat_map(|p| p.marks.iter())
    }

    /// Row marks of one table section, in drawing order.
    pub fn rows_of(&self, section: SectionKind) -> Vec<&Mark> {
        self.marks()
            .filter(|m| matches!(m.tag, Tag::TableRow { section: s, .. } if s == section))
            .collect()
    }

    /// Whether anything at all was drawn for `section`.
    pub fn has_section(&self, section: SectionKind) -> bool {
        self.marks().any(|m| match m.tag {
            Tag::Section { section: s }
            | Tag::TableHeader { section: s }
            | Tag::TableRow { section: s, .. } => s == section,
            _ => false,
        })
    }

    /// The commands drawn for `mark`.
    pub fn block(&self, mark: &Mark) -> &[DrawCommand] {
        self.pages
            .get(mark.page_index)
            .map(|p| p.block(mark))
            .unwrap_or(&[])
    }

    /// Every text run in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(DrawCommand::text)
    }
}

/// A [`Canvas`] that records commands into a [`Document`].
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    pages: Vec<Page>,
    current: usize,
    page_limit: Option<usize>,
}

impl RecordingCanvas {
    /// A canvas with one empty page.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: vec![Page::default()],
            current: 0,
            page_limit: None,
        }
    }

    /// Refuse to grow past `limit` pages.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn finish(self) -> Document {
        Document {
            width: self.width,
            height: self.height,
            pages: self.pages,
        }
    }

    fn push(&mut self, command: DrawCommand) -> Result<(), CanvasError> {
        let count = self.pages.len();
        let page = self
            .pages
            .get_mut(self.current)
            .ok_or(CanvasError::PageOutOfRange {
                index: self.current,
                count,
            })?;
        page.commands.push(command);
        Ok(())
    }
}

impl Canvas for RecordingCanvas {
    type Error = CanvasError;

    fn page_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn add_page(&mut self) -> Result<(), CanvasError> {
        if let Some(limit) = self.page_limit {
            if self.pages.len() >= limit {
                return Err(CanvasError::PageLimit { limit });
            }
        }
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
        trace!(page = self.current; "Page added");
        Ok(())
    }

    fn set_page(&mut self, index: usize) -> Result<(), CanvasError> {
        if index >= self.pages.len() {
            return Err(CanvasError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    fn text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<(), CanvasError> {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        })
    }

    fn rect(&mut self, rect: Rect, paint: Paint) -> Result<(), CanvasError> {
        self.push(DrawCommand::Rect { rect, paint })
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, paint: Paint) -> Result<(), CanvasError> {
        self.push(DrawCommand::RoundedRect {
            rect,
            radius,
            paint,
        })
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f64) -> Result<(), CanvasError> {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        })
    }

    fn circle(&mut self, center: Point, radius: f64, paint: Paint) -> Result<(), CanvasError> {
        self.push(DrawCommand::Circle {
            center,
            radius,
            paint,
        })
    }

    fn triangle(&mut self, points: [Point; 3], paint: Paint) -> Result<(), CanvasError> {
        self.push(DrawCommand::Triangle { points, paint })
    }

    fn mark(&mut self, tag: Tag, y: f64, height: f64) -> Result<(), CanvasError> {
        let page_index = self.current;
        let count = self.pages.len();
        let page = self
            .pages
            .get_mut(page_index)
            .ok_or(CanvasError::PageOutOfRange {
                index: page_index,
                count,
            })?;
        page.marks.push(Mark {
            tag,
            page_index,
            y,
            height,
            command_index: page.commands.len(),
        });
        Ok(())
    }
}
