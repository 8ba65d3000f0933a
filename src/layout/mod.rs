//! # Layout Engine
//!
//! Lays one [`ItineraryData`] record out onto a paged [`Canvas`].
//!
//! The template is fixed. Sections always come in the same order, every
//! block has a known height before it's drawn, and nothing is ever split
//! across pages. What the engine does is bookkeeping: one vertical cursor
//! that only moves down, and a page-break check in front of every block.
//!
//! Rendering happens in two passes:
//!
//! 1. **Content.** The section plan is walked top to bottom. Before each
//!    block the engine asks [`page_break::decide_break`] whether the block
//!    still fits above the footer reserve, and starts a new page if not.
//! 2. **Footers.** Once the page count is final, the engine revisits every
//!    page and stamps the same footer band on each.
//!
//! Section renderers live in [`sections`], the shared table renderer in
//! [`table`].

pub mod page_break;
mod sections;
mod table;

pub use table::{Column, TableSpec};

use log::{debug, trace, warn};
use serde::Serialize;

use crate::canvas::{Canvas, Point, Tag};
use crate::config::TemplateConfig;
use crate::font::FontContext;
use crate::model::{
    ActivityTableEntry, DayItinerary, Flight, Hotel, ImportantNote, InclusionItem,
    ItineraryData, PaymentPlan, ServiceScope, TripDetails, VisaDetails,
};
use crate::style::{palette, Color, Paint, TextStyle};
use page_break::BreakDecision;

/// Points to layout units (millimetres).
const PT_TO_UNITS: f64 = 25.4 / 72.0;

/// The kinds of block the template knows, used to label marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Branding,
    TripSummary,
    DailyTimeline,
    Flights,
    Hotels,
    ImportantNotes,
    ServiceScope,
    Inclusions,
    Activities,
    Terms,
    PaymentPlan,
    Installments,
    Visa,
    CallToAction,
}

/// One entry of the section plan, borrowing the data it draws.
#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    Branding,
    TripSummary(&'a TripDetails),
    DailyTimeline {
        days: &'a [DayItinerary],
        destination: &'a str,
    },
    Flights(&'a [Flight]),
    Hotels(&'a [Hotel]),
    ImportantNotes(&'a [ImportantNote]),
    ServiceScope(&'a [ServiceScope]),
    Inclusions(&'a [InclusionItem]),
    Activities(&'a [ActivityTableEntry]),
    Terms,
    PaymentPlan {
        plan: &'a PaymentPlan,
        travelers: u32,
    },
    Visa(&'a VisaDetails),
    CallToAction,
}

impl Section<'_> {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Branding => SectionKind::Branding,
            Section::TripSummary(_) => SectionKind::TripSummary,
            Section::DailyTimeline { .. } => SectionKind::DailyTimeline,
            Section::Flights(_) => SectionKind::Flights,
            Section::Hotels(_) => SectionKind::Hotels,
            Section::ImportantNotes(_) => SectionKind::ImportantNotes,
            Section::ServiceScope(_) => SectionKind::ServiceScope,
            Section::Inclusions(_) => SectionKind::Inclusions,
            Section::Activities(_) => SectionKind::Activities,
            Section::Terms => SectionKind::Terms,
            Section::PaymentPlan { .. } => SectionKind::PaymentPlan,
            Section::Visa(_) => SectionKind::Visa,
            Section::CallToAction => SectionKind::CallToAction,
        }
    }
}

/// Resolve the fixed section order against the data. Optional list
/// sections are left out entirely when their list is empty.
pub fn plan_sections(data: &ItineraryData) -> Vec<Section<'_>> {
    let mut plan = vec![
        Section::Branding,
        Section::TripSummary(&data.trip_details),
        Section::DailyTimeline {
            days: &data.daily_itinerary,
            destination: &data.trip_details.destination,
        },
    ];

    if !data.flights.is_empty() {
        plan.push(Section::Flights(&data.flights));
    }
    if !data.hotels.is_empty() {
        plan.push(Section::Hotels(&data.hotels));
    }
    if !data.important_notes.is_empty() {
        plan.push(Section::ImportantNotes(&data.important_notes));
    }
    if !data.service_scope.is_empty() {
        plan.push(Section::ServiceScope(&data.service_scope));
    }
    if !data.inclusions.is_empty() {
        plan.push(Section::Inclusions(&data.inclusions));
    }
    if !data.activities.is_empty() {
        plan.push(Section::Activities(&data.activities));
    }

    plan.extend([
        Section::Terms,
        Section::PaymentPlan {
            plan: &data.payment_plan,
            travelers: data.trip_details.number_of_travelers,
        },
        Section::Visa(&data.visa_details),
        Section::CallToAction,
    ]);
    plan
}

/// Where the cursor is. Owned by one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Vertical offset of the next block's top edge on the current page.
    pub y: f64,
    pub page_index: usize,
}

/// Lays itineraries out according to a [`TemplateConfig`]. Holds no
/// per-render state and can be reused.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: TemplateConfig,
    fonts: FontContext,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(&TemplateConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: &TemplateConfig) -> Self {
        Self {
            config: config.clone(),
            fonts: FontContext::new(),
        }
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Run both passes against `canvas`. Backend errors are returned
    /// unchanged.
    pub fn render<C: Canvas>(&self, data: &ItineraryData, canvas: &mut C) -> Result<(), C::Error> {
        let state = self.layout_content(data, canvas)?;
        debug!(pages = state.page_index + 1, y = state.y; "Content laid out");
        self.stamp_footers(canvas)
    }

    /// First pass: every section, in plan order.
    pub fn layout_content<C: Canvas>(
        &self,
        data: &ItineraryData,
        canvas: &mut C,
    ) -> Result<LayoutState, C::Error> {
        let plan = plan_sections(data);
        debug!(sections = plan.len(); "Section plan resolved");

        let mut state = LayoutState {
            y: self.config.top_margin,
            page_index: canvas.current_page(),
        };
        for section in &plan {
            trace!(section:? = section.kind(), page = state.page_index, y = state.y; "Section start");
            self.layout_section(section, &mut state, canvas)?;
        }
        Ok(state)
    }

    /// Second pass: one footer band per page, once the page count is final.
    pub fn stamp_footers<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let pages = canvas.page_count();
        for index in 0..pages {
            canvas.set_page(index)?;
            self.draw_footer(canvas)?;
        }
        debug!(pages = pages; "Footers stamped");
        Ok(())
    }

    fn layout_section<C: Canvas>(
        &self,
        section: &Section<'_>,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        match *section {
            Section::Branding => self.branding(state, canvas),
            Section::TripSummary(trip) => self.trip_summary(trip, state, canvas),
            Section::DailyTimeline { days, destination } => {
                for day in days {
                    self.day_block(day, destination, state, canvas)?;
                }
                Ok(())
            }
            Section::Flights(flights) => self.flights(flights, state, canvas),
            Section::Hotels(hotels) => self.hotels(hotels, state, canvas),
            Section::ImportantNotes(notes) => self.important_notes(notes, state, canvas),
            Section::ServiceScope(scope) => self.service_scope(scope, state, canvas),
            Section::Inclusions(items) => self.inclusions(items, state, canvas),
            Section::Activities(rows) => self.activity_table(rows, state, canvas),
            Section::Terms => self.terms(state, canvas),
            Section::PaymentPlan { plan, travelers } => {
                self.payment_plan(plan, travelers, state, canvas)
            }
            Section::Visa(visa) => self.visa(visa, state, canvas),
            Section::CallToAction => self.call_to_action(state, canvas),
        }
    }

    // ─── Cursor ─────────────────────────────────────────────────────

    fn content_limit(&self) -> f64 {
        self.config.content_limit()
    }

    /// Make room for a block of `needed` height, starting a new page first
    /// if it wouldn't fit. Returns true when a page break happened.
    fn reserve<C: Canvas>(
        &self,
        state: &mut LayoutState,
        canvas: &mut C,
        needed: f64,
    ) -> Result<bool, C::Error> {
        let remaining = self.content_limit() - state.y;
        let at_top = state.y <= self.config.top_margin;
        match page_break::decide_break(remaining, needed, at_top) {
            BreakDecision::Place => Ok(false),
            BreakDecision::Oversized => {
                warn!(needed, available = remaining; "Block taller than a page, drawing it anyway");
                Ok(false)
            }
            BreakDecision::MoveToNextPage => {
                canvas.add_page()?;
                state.page_index = canvas.current_page();
                state.y = self.config.top_margin;
                debug!(page = state.page_index, needed; "Page break");
                Ok(true)
            }
        }
    }

    /// Move past a drawn block or blank space. Never draws and never
    /// breaks.
    fn advance(&self, state: &mut LayoutState, height: f64) {
        state.y += height;
    }

    // ─── Shared pieces ──────────────────────────────────────────────

    /// Width of `text` at `size` points, in layout units.
    fn text_width(&self, text: &str, size: f64) -> f64 {
        self.fonts.measure_string(text, size) * PT_TO_UNITS
    }

    fn center_x(&self) -> f64 {
        self.config.page.width / 2.0
    }

    /// A two-tone section heading: the lead word in black, the rest in the
    /// accent colour right after it. Keeps `keep_with_next` of room below
    /// so the heading never ends a page on its own.
    fn heading<C: Canvas>(
        &self,
        kind: SectionKind,
        lead: &str,
        accent: &str,
        keep_with_next: f64,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.reserve(state, canvas, HEADING_HEIGHT.max(keep_with_next))?;
        canvas.mark(Tag::Section { section: kind }, state.y, HEADING_HEIGHT)?;
        self.heading_text(lead, accent, state.y, canvas)?;
        self.advance(state, HEADING_HEIGHT);
        Ok(())
    }

    fn heading_text<C: Canvas>(
        &self,
        lead: &str,
        accent: &str,
        y: f64,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        let x = self.config.left_margin;
        canvas.text(lead, x, y, &TextStyle::new(HEADING_SIZE, Color::BLACK))?;
        canvas.text(
            accent,
            x + self.text_width(lead, HEADING_SIZE),
            y,
            &TextStyle::new(HEADING_SIZE, palette::ACCENT_PURPLE),
        )
    }

    fn draw_footer<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let (page_w, page_h) = canvas.page_size();
        let brand = &self.config.branding;
        let left = self.config.left_margin;
        let footer_y = page_h - self.config.footer_offset;
        let rule_y = footer_y - 5.0;

        let lines = 1 + brand.address.len();
        canvas.mark(Tag::Footer, rule_y, 5.0 + 4.0 * lines as f64)?;
        canvas.line(
            Point::new(left, rule_y),
            Point::new(page_w - left, rule_y),
            palette::RULE,
            Paint::HAIRLINE,
        )?;

        let small = TextStyle::new(8.0, palette::MUTED);
        canvas.text(&brand.company, left, footer_y, &small)?;
        for (i, line) in brand.address.iter().enumerate() {
            canvas.text(line, left, footer_y + 4.0 * (i + 1) as f64, &small)?;
        }

        let contact_x = page_w / 2.0 - 30.0;
        canvas.text(&format!("Phone: {}", brand.phone), contact_x, footer_y, &small)?;
        canvas.text(
            &format!("Email ID: {}", brand.email),
            contact_x,
            footer_y + 4.0,
            &small,
        )?;

        let logo_x = page_w - 50.0;
        canvas.text(
            &brand.name,
            logo_x,
            footer_y,
            &TextStyle::new(12.0, palette::BRAND_PURPLE),
        )?;
        canvas.text(
            &brand.tagline,
            logo_x,
            footer_y + 4.0,
            &TextStyle::new(6.0, palette::MUTED),
        )?;
        Ok(())
    }
}

const HEADING_SIZE: f64 = 14.0;
const HEADING_HEIGHT: f64 = 15.0;

/// Format an amount with thousands separators and at most three fraction
/// digits, dropping trailing zeros.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value.abs() * 1000.0).round() as u128;
    let whole = rounded / 1000;
    let frac = rounded % 1000;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && rounded != 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if frac != 0 {
        let frac = format!("{frac:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}
