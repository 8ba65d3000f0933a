//! # PDF Serializer
//!
//! Takes a rendered [`Document`] and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The itinerary only ever draws
//! Helvetica text and flat-coloured shapes, so the subset needed is small:
//! one standard Type1 font, one compressed content stream per page, and
//! the usual catalog, page tree, info dictionary and xref table.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog
//! 2 0 obj ... endobj  <- page tree
//! 3 0 obj ... endobj  <- font, then content/page pairs, then info
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Documents are laid out in millimetres from the top-left corner. PDF user
//! space is points from the bottom-left, so every coordinate is scaled and
//! the y axis flipped on the way out.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use log::debug;
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::canvas::{Document, DrawCommand, Point, Rect};
use crate::font::FontContext;
use crate::style::{Color, Paint, TextAlign, TextStyle};

/// Points per layout unit (millimetre).
const K: f64 = 72.0 / 25.4;

/// Bezier control point ratio for quarter circles.
const KAPPA: f64 = 0.5522847498;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

#[derive(Debug, Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<Vec<u8>>,
}

impl PdfBuilder {
    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write a document to a PDF byte vector.
    pub fn write(&self, document: &Document, metadata: &Metadata, fonts: &FontContext) -> Vec<u8> {
        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        let mut builder = PdfBuilder {
            objects: vec![Vec::new(), Vec::new(), Vec::new()],
        };

        let font_obj = builder.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                fonts.font().pdf_name()
            )
            .into_bytes(),
        );

        let media_w = document.width * K;
        let media_h = document.height * K;
        let mut page_obj_ids: Vec<usize> = Vec::with_capacity(document.pages.len());

        for page in &document.pages {
            let content = self.build_content_stream(&page.commands, document.height, fonts);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj = builder.push(content_data);

            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << /F0 {} 0 R >> >> >>",
                media_w, media_h, content_obj, font_obj
            );
            page_obj_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1] = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj = builder.push(Self::info_dict(metadata).into_bytes());

        let bytes = self.serialize(&builder, info_obj);
        debug!(pages = page_obj_ids.len(), bytes = bytes.len(); "PDF written");
        bytes
    }

    fn info_dict(metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", Self::encode_text(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", Self::encode_text(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", Self::encode_text(subject));
        }
        let creator = metadata.creator.as_deref().unwrap_or("Itinera");
        let _ = write!(
            info,
            "/Creator ({}) /Producer (Itinera {}) >>",
            Self::encode_text(creator),
            env!("CARGO_PKG_VERSION")
        );
        info
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(
        &self,
        commands: &[DrawCommand],
        page_height: f64,
        fonts: &FontContext,
    ) -> String {
        let mut stream = String::new();
        for command in commands {
            self.write_command(&mut stream, command, page_height, fonts);
        }
        stream
    }

    /// Write a single drawing command as PDF operators.
    fn write_command(
        &self,
        stream: &mut String,
        command: &DrawCommand,
        page_height: f64,
        fonts: &FontContext,
    ) {
        let flip = |y: f64| (page_height - y) * K;

        match command {
            DrawCommand::Text { text, x, y, style } => {
                self.write_text(stream, text, *x * K, flip(*y), style, fonts);
            }

            DrawCommand::Rect { rect, paint } => {
                Self::begin_paint(stream, paint);
                let (x, y, w, h) = Self::to_pdf_rect(rect, page_height);
                let _ = writeln!(stream, "{:.2} {:.2} {:.2} {:.2} re", x, y, w, h);
                Self::end_paint(stream, paint);
            }

            DrawCommand::RoundedRect {
                rect,
                radius,
                paint,
            } => {
                Self::begin_paint(stream, paint);
                let (x, y, w, h) = Self::to_pdf_rect(rect, page_height);
                Self::write_rounded_rect(stream, x, y, w, h, radius * K);
                Self::end_paint(stream, paint);
            }

            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                let _ = write!(
                    stream,
                    "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                    color.r,
                    color.g,
                    color.b,
                    width * K,
                    from.x * K,
                    flip(from.y),
                    to.x * K,
                    flip(to.y)
                );
            }

            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => {
                Self::begin_paint(stream, paint);
                Self::write_circle(stream, center.x * K, flip(center.y), radius * K);
                Self::end_paint(stream, paint);
            }

            DrawCommand::Triangle { points, paint } => {
                Self::begin_paint(stream, paint);
                let [a, b, c]: [Point; 3] = *points;
                let _ = write!(
                    stream,
                    "{:.2} {:.2} m\n{:.2} {:.2} l\n{:.2} {:.2} l\nh\n",
                    a.x * K,
                    flip(a.y),
                    b.x * K,
                    flip(b.y),
                    c.x * K,
                    flip(c.y)
                );
                Self::end_paint(stream, paint);
            }
        }
    }

    fn write_text(
        &self,
        stream: &mut String,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
        fonts: &FontContext,
    ) {
        if text.is_empty() {
            return;
        }
        let width = fonts.measure_string(text, style.size);
        let x = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let c = style.color;
        let _ = write!(
            stream,
            "BT\n{:.3} {:.3} {:.3} rg\n/F0 {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            c.r,
            c.g,
            c.b,
            style.size,
            x,
            y,
            Self::encode_text(text)
        );
    }

    fn begin_paint(stream: &mut String, paint: &Paint) {
        match paint {
            Paint::Fill(color) => {
                let _ = write!(stream, "q\n{}", Self::fill_color(color));
            }
            Paint::Stroke { color, width } => {
                let _ = write!(
                    stream,
                    "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n",
                    color.r,
                    color.g,
                    color.b,
                    width * K
                );
            }
        }
    }

    fn end_paint(stream: &mut String, paint: &Paint) {
        match paint {
            Paint::Fill(_) => stream.push_str("f\nQ\n"),
            Paint::Stroke { .. } => stream.push_str("S\nQ\n"),
        }
    }

    fn fill_color(color: &Color) -> String {
        format!("{:.3} {:.3} {:.3} rg\n", color.r, color.g, color.b)
    }

    /// Lower-left corner plus size, in points.
    fn to_pdf_rect(rect: &Rect, page_height: f64) -> (f64, f64, f64, f64) {
        (
            rect.x * K,
            (page_height - rect.y - rect.height) * K,
            rect.width * K,
            rect.height * K,
        )
    }

    fn write_rounded_rect(stream: &mut String, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        if r == 0.0 {
            let _ = writeln!(stream, "{:.2} {:.2} {:.2} {:.2} re", x, y, w, h);
            return;
        }
        let k = KAPPA * r;

        let _ = writeln!(stream, "{:.2} {:.2} m", x + r, y);
        let _ = writeln!(stream, "{:.2} {:.2} l", x + w - r, y);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + w - r + k,
            y,
            x + w,
            y + r - k,
            x + w,
            y + r
        );
        let _ = writeln!(stream, "{:.2} {:.2} l", x + w, y + h - r);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + w,
            y + h - r + k,
            x + w - r + k,
            y + h,
            x + w - r,
            y + h
        );
        let _ = writeln!(stream, "{:.2} {:.2} l", x + r, y + h);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + r - k,
            y + h,
            x,
            y + h - r + k,
            x,
            y + h - r
        );
        let _ = writeln!(stream, "{:.2} {:.2} l", x, y + r);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x,
            y + r - k,
            x + r - k,
            y,
            x + r,
            y
        );
        stream.push_str("h\n");
    }

    fn write_circle(stream: &mut String, cx: f64, cy: f64, r: f64) {
        let k = KAPPA * r;
        let _ = writeln!(stream, "{:.2} {:.2} m", cx + r, cy);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx + r,
            cy + k,
            cx + k,
            cy + r,
            cx,
            cy + r
        );
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx - k,
            cy + r,
            cx - r,
            cy + k,
            cx - r,
            cy
        );
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx - r,
            cy - k,
            cx - k,
            cy - r,
            cx,
            cy - r
        );
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx + k,
            cy - r,
            cx + r,
            cy - k,
            cx + r,
            cy
        );
        stream.push_str("h\n");
    }

    /// Encode text for a literal string under WinAnsiEncoding. Delimiters are
    /// escaped, bytes above ASCII are written as octal escapes, and anything
    /// WinAnsi can't represent becomes `?`.
    fn encode_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            match Self::unicode_to_winansi(ch) {
                Some(b'\\') => out.push_str("\\\\"),
                Some(b'(') => out.push_str("\\("),
                Some(b')') => out.push_str("\\)"),
                Some(b) if b < 0x80 => out.push(b as char),
                Some(b) => {
                    let _ = write!(out, "\\{:03o}", b);
                }
                None => out.push('?'),
            }
        }
        out
    }

    /// Map a Unicode character to its Windows-1252 byte.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // euro
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85), // ellipsis
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, data) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj,
            xref_offset
        );

        output
    }
}
