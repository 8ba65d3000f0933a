//! Section renderers.
//!
//! Each renderer reserves room for its block, draws it relative to the
//! block's top edge, and advances the cursor by the block's height. All
//! offsets below are in layout units from that top edge.

use log::trace;

use super::table::TableSpec;
use super::{format_amount, LayoutEngine, LayoutState, SectionKind};
use crate::canvas::{Canvas, Point, Rect, Tag};
use crate::config::or_placeholder;
use crate::model::{
    ActivityTableEntry, DayItinerary, Flight, Hotel, ImportantNote, InclusionItem, PaymentPlan,
    ServiceScope, TimeSlot, TripDetails, VisaDetails,
};
use crate::style::{palette, Color, Paint, TextStyle};

const TABLE_KEEP: f64 = 80.0;
const AFTER_TABLE: f64 = 15.0;

const BAND_HEIGHT: f64 = 40.0;
const BAND_INSET: f64 = 40.0;
const ICONS: [&str; 5] = ["F", "H", "T", "C", "D"];
const ICON_SPACING: f64 = 15.0;

const DAY_KEEP: f64 = 80.0;
const DAY_MIN_HEIGHT: f64 = 70.0;
const TIMELINE_X: f64 = 60.0;
const SLOT_START: f64 = 35.0;

const HOTEL_NOTES: [&str; 4] = [
    "1. All Hotels Are Tentative And Can Be Replaced With Similar.",
    "2. Breakfast Included For All Hotel Stays",
    "3. All Hotels Will Be 4* And Above Category",
    "4. A maximum occupancy of 2 people/room is allowed in most hotels.",
];
const FLIGHT_NOTE: &str =
    "Note: All Flights Include Meals, Seat Choice (Excluding XL), And 20kg/25Kg Checked Baggage.";
const TRANSFER_POLICY: [&str; 2] = [
    "Transfer Policy(Refundable Upon Claim)",
    "If Any Transfer Is Delayed Beyond 15 Minutes, Customers May Book An App-Based Or Radio Taxi And Claim A Refund For That Specific Leg",
];

/// One non-empty slot of a day's timeline, positioned relative to the day
/// block's top edge.
struct SlotLines {
    slot: TimeSlot,
    /// Offset of the slot's dot and label.
    top: f64,
    /// Offset just below the slot's last line.
    bottom: f64,
    lines: Vec<(f64, String)>,
}

/// Position every timeline line of `day`. Returns the slots and the offset
/// where the timeline ends.
fn plan_timeline(day: &DayItinerary) -> (Vec<SlotLines>, f64) {
    let mut offset = SLOT_START;
    let mut slots = Vec::new();

    for slot in TimeSlot::ALL {
        let mut activities = day.activities_in(slot).peekable();
        if activities.peek().is_none() {
            continue;
        }
        let top = offset;
        let mut lines = Vec::new();
        for activity in activities {
            offset += 6.0;
            lines.push((offset, format!("\u{2022} {}", activity.name)));
            if !activity.description.is_empty() {
                offset += 4.0;
                lines.push((offset, format!("  {}", activity.description)));
            }
        }
        let bottom = offset;
        if slot.has_tail() {
            offset += 3.0;
        }
        slots.push(SlotLines {
            slot,
            top,
            bottom,
            lines,
        });
    }
    (slots, offset)
}

/// Height of a day block whose timeline ends at `timeline_end`.
fn day_height(timeline_end: f64) -> f64 {
    DAY_MIN_HEIGHT.max(timeline_end + 15.0)
}

impl LayoutEngine {
    // ─── Trip header ────────────────────────────────────────────────

    pub(super) fn branding<C: Canvas>(
        &self,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const HEIGHT: f64 = 26.0;
        let brand = &self.config.branding;
        let cx = self.center_x();

        self.reserve(state, canvas, HEIGHT)?;
        canvas.mark(
            Tag::Section {
                section: SectionKind::Branding,
            },
            state.y,
            HEIGHT,
        )?;
        canvas.text(
            &brand.name,
            cx,
            state.y,
            &TextStyle::new(20.0, palette::BRAND_PURPLE).centered(),
        )?;
        canvas.text(
            &brand.tagline,
            cx,
            state.y + 6.0,
            &TextStyle::new(8.0, palette::MUTED).centered(),
        )?;
        self.advance(state, HEIGHT);
        Ok(())
    }

    pub(super) fn trip_summary<C: Canvas>(
        &self,
        trip: &TripDetails,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const BAND_BLOCK: f64 = BAND_HEIGHT + 15.0;
        const GRID_HEIGHT: f64 = 20.0;
        const GRID_BLOCK: f64 = 35.0;

        let cx = self.center_x();
        let page_w = self.config.page.width;

        // Greeting band: blue base, then a strip per unit shading to purple.
        self.reserve(state, canvas, BAND_BLOCK)?;
        canvas.mark(
            Tag::Section {
                section: SectionKind::TripSummary,
            },
            state.y,
            BAND_BLOCK + GRID_BLOCK,
        )?;
        let band_w = page_w - 2.0 * BAND_INSET;
        canvas.rounded_rect(
            Rect::new(BAND_INSET, state.y, band_w, BAND_HEIGHT),
            8.0,
            Paint::Fill(palette::GRADIENT_BLUE),
        )?;
        let strips = BAND_HEIGHT as usize;
        for i in 0..strips {
            let ratio = i as f64 / BAND_HEIGHT;
            canvas.rect(
                Rect::new(BAND_INSET, state.y + i as f64, band_w, 1.0),
                Paint::Fill(palette::GRADIENT_BLUE.mix(palette::BRAND_PURPLE, ratio)),
            )?;
        }

        canvas.text(
            &format!("Hi, {}!", trip.customer_name),
            cx,
            state.y + 12.0,
            &TextStyle::new(16.0, Color::WHITE).centered(),
        )?;
        canvas.text(
            &format!("{} Itinerary", trip.destination),
            cx,
            state.y + 22.0,
            &TextStyle::new(14.0, Color::WHITE).centered(),
        )?;
        canvas.text(
            &format!("{} Days {} Nights", trip.days, trip.nights),
            cx,
            state.y + 30.0,
            &TextStyle::new(10.0, Color::WHITE).centered(),
        )?;
        let icon_style = TextStyle::new(12.0, Color::WHITE).centered();
        let first = cx - (ICONS.len() - 1) as f64 * ICON_SPACING / 2.0;
        for (i, icon) in ICONS.iter().enumerate() {
            canvas.text(
                icon,
                first + i as f64 * ICON_SPACING,
                state.y + 37.0,
                &icon_style,
            )?;
        }
        self.advance(state, BAND_BLOCK);

        // Five-column summary grid.
        self.reserve(state, canvas, GRID_BLOCK)?;
        let left = self.config.left_margin;
        let width = self.config.usable_width();
        let grid = Rect::new(left, state.y, width, GRID_HEIGHT);
        canvas.rounded_rect(grid, 3.0, Paint::Fill(palette::PANEL))?;
        canvas.rounded_rect(grid, 3.0, Paint::stroke(palette::RULE))?;

        let travelers = trip.number_of_travelers.to_string();
        let cells: [(&str, &str); 5] = [
            ("Departure From", trip.departure_from.as_str()),
            ("Departure", trip.departure_date.as_str()),
            ("Arrival", trip.arrival_date.as_str()),
            ("Destination", trip.destination.as_str()),
            ("No. Of Travellers", travelers.as_str()),
        ];
        let col_w = width / cells.len() as f64;
        let label = TextStyle::new(8.0, Color::BLACK);
        let value = TextStyle::new(9.0, Color::BLACK);
        for (i, (name, text)) in cells.iter().enumerate() {
            let x = left + 5.0 + i as f64 * col_w;
            canvas.text(name, x, state.y + 6.0, &label)?;
            canvas.text(text, x, state.y + 14.0, &value)?;
        }
        self.advance(state, GRID_BLOCK);
        Ok(())
    }

    // ─── Daily timeline ─────────────────────────────────────────────

    pub(super) fn day_block<C: Canvas>(
        &self,
        day: &DayItinerary,
        destination: &str,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        let (slots, end) = plan_timeline(day);
        let height = day_height(end);

        self.reserve(state, canvas, height.max(DAY_KEEP))?;
        trace!(day = day.day, height = height, page = state.page_index; "Day block");
        let top = state.y;
        canvas.mark(Tag::DayBlock { day: day.day }, top, height)?;

        // Badge
        let left = self.config.left_margin;
        canvas.rounded_rect(
            Rect::new(left, top, 30.0, 60.0),
            15.0,
            Paint::Fill(palette::BRAND_PURPLE),
        )?;
        let badge_x = left + 15.0;
        canvas.text(
            "Day",
            badge_x,
            top + 20.0,
            &TextStyle::new(8.0, Color::WHITE).centered(),
        )?;
        canvas.text(
            &day.day.to_string(),
            badge_x,
            top + 35.0,
            &TextStyle::new(14.0, Color::WHITE).centered(),
        )?;

        let date = or_placeholder(&day.date, self.config.placeholders.day_date.as_deref());
        canvas.text(
            date,
            TIMELINE_X,
            top + 15.0,
            &TextStyle::new(10.0, Color::BLACK),
        )?;
        let caption = TextStyle::new(8.0, Color::BLACK);
        canvas.text(
            &format!("Arrival In {destination} & City"),
            TIMELINE_X,
            top + 22.0,
            &caption,
        )?;
        canvas.text("Exploration", TIMELINE_X, top + 28.0, &caption)?;

        let item = TextStyle::new(7.0, Color::BLACK);
        for slot in &slots {
            let dot_y = top + slot.top;
            canvas.mark(
                Tag::Slot {
                    day: day.day,
                    slot: slot.slot,
                },
                dot_y,
                slot.bottom - slot.top,
            )?;
            canvas.circle(
                Point::new(TIMELINE_X, dot_y),
                1.5,
                Paint::Fill(palette::BRAND_PURPLE),
            )?;
            if slot.slot.has_tail() {
                canvas.line(
                    Point::new(TIMELINE_X, dot_y),
                    Point::new(TIMELINE_X, dot_y + 12.0),
                    palette::BRAND_PURPLE,
                    Paint::HAIRLINE,
                )?;
            }
            canvas.text(slot.slot.label(), TIMELINE_X + 5.0, dot_y + 1.0, &caption)?;
            for (offset, line) in &slot.lines {
                canvas.text(line, TIMELINE_X + 8.0, top + offset, &item)?;
            }
        }

        self.advance(state, height);
        Ok(())
    }

    // ─── Flights ────────────────────────────────────────────────────

    pub(super) fn flights<C: Canvas>(
        &self,
        flights: &[Flight],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const ROW_HEIGHT: f64 = 15.0;
        const ROW_RESERVE: f64 = 20.0;
        const ROW_ADVANCE: f64 = 18.0;
        const TAB_WIDTH: f64 = 60.0;
        const NOTE_BLOCK: f64 = 20.0;

        self.heading(SectionKind::Flights, "Flight ", "Summary", 60.0, state, canvas)?;

        let left = self.config.left_margin;
        let width = self.config.usable_width();
        let date_style = TextStyle::new(8.0, palette::BRAND_PURPLE);
        let detail_style = TextStyle::new(8.0, Color::BLACK);

        for (index, flight) in flights.iter().enumerate() {
            self.reserve(state, canvas, ROW_RESERVE)?;
            let y = state.y;
            canvas.mark(Tag::FlightRow { index }, y, ROW_HEIGHT)?;
            canvas.rounded_rect(
                Rect::new(left, y, width, ROW_HEIGHT),
                3.0,
                Paint::Fill(palette::BAND_LIGHT),
            )?;
            canvas.rounded_rect(
                Rect::new(left, y, TAB_WIDTH, ROW_HEIGHT),
                3.0,
                Paint::Fill(palette::BAND_TAB),
            )?;
            let tip = left + TAB_WIDTH;
            canvas.triangle(
                [
                    Point::new(tip, y),
                    Point::new(tip + 8.0, y + ROW_HEIGHT / 2.0),
                    Point::new(tip, y + ROW_HEIGHT),
                ],
                Paint::Fill(palette::BAND_TAB),
            )?;

            let date = or_placeholder(
                &flight.date,
                self.config.placeholders.flight_date.as_deref(),
            );
            canvas.text(date, left + 5.0, y + 9.0, &date_style)?;
            canvas.text(
                &format!("{} From {} To {}", flight.airline, flight.from, flight.to),
                left + 75.0,
                y + 9.0,
                &detail_style,
            )?;
            self.advance(state, ROW_ADVANCE);
        }

        self.reserve(state, canvas, NOTE_BLOCK)?;
        canvas.text(
            FLIGHT_NOTE,
            left,
            state.y + 5.0,
            &TextStyle::new(7.0, palette::MUTED),
        )?;
        self.advance(state, NOTE_BLOCK);
        Ok(())
    }

    // ─── Tables ─────────────────────────────────────────────────────

    pub(super) fn hotels<C: Canvas>(
        &self,
        hotels: &[Hotel],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.heading(SectionKind::Hotels, "Hotel ", "Bookings", TABLE_KEEP, state, canvas)?;
        self.table(
            &TableSpec::HOTELS,
            hotels,
            |h| {
                vec![
                    h.city.clone(),
                    h.check_in.clone(),
                    h.check_out.clone(),
                    h.nights.to_string(),
                    h.name.clone(),
                ]
            },
            state,
            canvas,
        )?;
        self.fine_print(&HOTEL_NOTES, palette::MUTED, 20.0, state, canvas)
    }

    pub(super) fn important_notes<C: Canvas>(
        &self,
        notes: &[ImportantNote],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.heading(SectionKind::ImportantNotes, "Important ", "Notes", TABLE_KEEP, state, canvas)?;
        self.table(
            &TableSpec::IMPORTANT_NOTES,
            notes,
            |n| vec![n.point.clone(), n.details.clone()],
            state,
            canvas,
        )?;
        self.advance(state, AFTER_TABLE);
        Ok(())
    }

    pub(super) fn service_scope<C: Canvas>(
        &self,
        scope: &[ServiceScope],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.heading(SectionKind::ServiceScope, "Scope Of ", "Service", TABLE_KEEP, state, canvas)?;
        self.table(
            &TableSpec::SERVICE_SCOPE,
            scope,
            |s| vec![s.service.clone(), s.details.clone()],
            state,
            canvas,
        )?;
        self.advance(state, AFTER_TABLE);
        Ok(())
    }

    pub(super) fn inclusions<C: Canvas>(
        &self,
        items: &[InclusionItem],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.heading(SectionKind::Inclusions, "Inclusion ", "Summary", TABLE_KEEP, state, canvas)?;
        self.table(
            &TableSpec::INCLUSIONS,
            items,
            |i| {
                vec![
                    i.category.clone(),
                    i.count.to_string(),
                    i.details.clone(),
                    i.status.to_string(),
                ]
            },
            state,
            canvas,
        )?;
        self.fine_print(&TRANSFER_POLICY, Color::BLACK, 15.0, state, canvas)
    }

    pub(super) fn activity_table<C: Canvas>(
        &self,
        rows: &[ActivityTableEntry],
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.heading(SectionKind::Activities, "Activity ", "Table", TABLE_KEEP, state, canvas)?;
        self.table(
            &TableSpec::ACTIVITIES,
            rows,
            |a| {
                vec![
                    a.city.clone(),
                    a.activity.clone(),
                    a.category.clone(),
                    a.time_required.clone(),
                ]
            },
            state,
            canvas,
        )?;
        self.advance(state, AFTER_TABLE);
        Ok(())
    }

    /// Small print under a table: lines 4 apart starting 8 below the table.
    /// The block is `trailing` taller than that first offset.
    fn fine_print<C: Canvas>(
        &self,
        lines: &[&str],
        color: Color,
        trailing: f64,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        let height = 8.0 + trailing;
        self.reserve(state, canvas, height)?;
        let style = TextStyle::new(7.0, color);
        for (i, line) in lines.iter().enumerate() {
            canvas.text(
                line,
                self.config.left_margin,
                state.y + 8.0 + 4.0 * i as f64,
                &style,
            )?;
        }
        self.advance(state, height);
        Ok(())
    }

    // ─── Closing sections ───────────────────────────────────────────

    pub(super) fn terms<C: Canvas>(
        &self,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const RESERVE: f64 = 25.0;
        const HEIGHT: f64 = 33.0;
        self.reserve(state, canvas, RESERVE)?;
        canvas.mark(
            Tag::Section {
                section: SectionKind::Terms,
            },
            state.y,
            RESERVE,
        )?;
        self.heading_text("Terms and ", "Conditions", state.y, canvas)?;
        canvas.text(
            "View all terms and conditions",
            self.config.left_margin,
            state.y + 8.0,
            &TextStyle::new(8.0, palette::LINK),
        )?;
        self.advance(state, HEIGHT);
        Ok(())
    }

    pub(super) fn payment_plan<C: Canvas>(
        &self,
        plan: &PaymentPlan,
        travelers: u32,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        self.heading(SectionKind::PaymentPlan, "Payment ", "Plan", 100.0, state, canvas)?;

        let currency = &self.config.currency_symbol;
        self.label_row(
            "Total Amount",
            &format!(
                "{currency} {} For {travelers} Pax (Inclusive of GST)",
                format_amount(plan.total_amount)
            ),
            15.0,
            state,
            canvas,
        )?;
        let tcs = if plan.tcs_collected {
            "Collected"
        } else {
            "Not Collected"
        };
        self.label_row("TCS", tcs, 20.0, state, canvas)?;

        if !plan.installments.is_empty() {
            self.table(
                &TableSpec::INSTALLMENTS,
                &plan.installments,
                |i| {
                    vec![
                        i.name.clone(),
                        format!("{currency}{}", format_amount(i.amount)),
                        i.description.clone(),
                    ]
                },
                state,
                canvas,
            )?;
        }
        self.advance(state, AFTER_TABLE);
        Ok(())
    }

    /// A light band with a darker label tab on its left.
    fn label_row<C: Canvas>(
        &self,
        label: &str,
        value: &str,
        advance: f64,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const HEIGHT: f64 = 12.0;
        const TAB_WIDTH: f64 = 80.0;

        self.reserve(state, canvas, HEIGHT.max(advance))?;
        let left = self.config.left_margin;
        let y = state.y;
        canvas.rounded_rect(
            Rect::new(left, y, self.config.usable_width(), HEIGHT),
            3.0,
            Paint::Fill(palette::BAND_LIGHT),
        )?;
        canvas.rounded_rect(
            Rect::new(left, y, TAB_WIDTH, HEIGHT),
            3.0,
            Paint::Fill(palette::BAND_TAB),
        )?;
        let style = TextStyle::new(8.0, Color::BLACK);
        canvas.text(label, left + 5.0, y + 7.0, &style)?;
        canvas.text(value, left + 90.0, y + 7.0, &style)?;
        self.advance(state, advance);
        Ok(())
    }

    pub(super) fn visa<C: Canvas>(
        &self,
        visa: &VisaDetails,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const BOX_HEIGHT: f64 = 20.0;
        const BLOCK: f64 = 35.0;

        self.heading(SectionKind::Visa, "Visa ", "Details", 40.0, state, canvas)?;
        self.reserve(state, canvas, BOX_HEIGHT)?;

        let left = self.config.left_margin;
        let y = state.y;
        let frame = Rect::new(left, y, self.config.usable_width(), BOX_HEIGHT);
        canvas.rounded_rect(frame, 3.0, Paint::Fill(palette::PANEL))?;
        canvas.rounded_rect(frame, 3.0, Paint::stroke(palette::RULE))?;

        let style = TextStyle::new(8.0, Color::BLACK);
        canvas.text(
            &format!("Visa Type : {}", visa.visa_type),
            left + 10.0,
            y + 8.0,
            &style,
        )?;
        canvas.text(
            &format!("Validity: {}", visa.validity),
            left + 80.0,
            y + 8.0,
            &style,
        )?;
        canvas.text(
            &format!("Processing Date : {}", visa.processing_date),
            left + 10.0,
            y + 15.0,
            &style,
        )?;
        self.advance(state, BLOCK);
        Ok(())
    }

    pub(super) fn call_to_action<C: Canvas>(
        &self,
        state: &mut LayoutState,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        const HEIGHT: f64 = 32.0;
        const KEEP: f64 = 50.0;
        const PILL_WIDTH: f64 = 50.0;

        self.reserve(state, canvas, KEEP)?;
        let cx = self.center_x();
        let y = state.y;
        canvas.mark(
            Tag::Section {
                section: SectionKind::CallToAction,
            },
            y,
            HEIGHT,
        )?;
        canvas.text(
            &format!("{}!", self.config.branding.tagline),
            cx,
            y + 10.0,
            &TextStyle::new(16.0, palette::BRAND_PURPLE).centered(),
        )?;
        canvas.rounded_rect(
            Rect::new(cx - PILL_WIDTH / 2.0, y + 20.0, PILL_WIDTH, 12.0),
            6.0,
            Paint::Fill(palette::BRAND_PURPLE),
        )?;
        canvas.text(
            "Book Now",
            cx,
            y + 28.0,
            &TextStyle::new(10.0, Color::WHITE).centered(),
        )?;
        self.advance(state, HEIGHT);
        Ok(())
    }
}
