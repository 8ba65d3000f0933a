//! Integration tests for the itinerary rendering pipeline.
//!
//! These tests exercise the full path from an itinerary record to PDF
//! output. They verify:
//! - optional sections appear only when they have rows
//! - every block stays above the footer band
//! - each page carries exactly one footer
//! - day, slot and activity order follows the input
//! - rendering is deterministic down to the PDF bytes

use itinera::canvas::{CanvasError, DrawCommand, Mark, Tag};
use itinera::layout::SectionKind;
use itinera::model::*;
use itinera::style::{palette, Paint};
use itinera::{render, render_json, render_pdf, render_with_config};
use itinera::{Document, FilenamePolicy, ItineraError, TemplateConfig};

use proptest::prelude::*;

// ─── Helpers ────────────────────────────────────────────────────

const CONTENT_LIMIT: f64 = 247.0;
const EPSILON: f64 = 1e-6;

fn trip(days: u32) -> ItineraryData {
    ItineraryData {
        trip_details: TripDetails {
            customer_name: "Rahul".to_string(),
            destination: "Singapore".to_string(),
            days,
            nights: days.saturating_sub(1),
            departure_from: "Mumbai".to_string(),
            departure_date: "09/06/2025".to_string(),
            arrival_date: "11/06/2025".to_string(),
            number_of_travelers: 2,
        },
        daily_itinerary: (1..=days).map(|d| day(d, vec![])).collect(),
        payment_plan: PaymentPlan {
            total_amount: 150_000.0,
            tcs_collected: false,
            installments: vec![],
        },
        ..Default::default()
    }
}

fn day(index: u32, activities: Vec<Activity>) -> DayItinerary {
    DayItinerary {
        day: index,
        date: format!("{index}th June"),
        activities,
        ..Default::default()
    }
}

fn activity(name: &str, description: &str, slot: TimeSlot) -> Activity {
    Activity {
        name: name.to_string(),
        description: description.to_string(),
        slot,
        ..Default::default()
    }
}

fn hotel(i: usize) -> Hotel {
    Hotel {
        city: "Singapore".to_string(),
        check_in: "09/06/2025".to_string(),
        check_out: "11/06/2025".to_string(),
        nights: 2,
        name: format!("Hotel {i}"),
        ..Default::default()
    }
}

fn note(i: usize) -> ImportantNote {
    ImportantNote {
        point: format!("Point {i}"),
        details: "Visa fees are non-refundable.".to_string(),
        ..Default::default()
    }
}

fn flight(i: usize) -> Flight {
    Flight {
        airline: format!("Airline {i}"),
        date: "Mon 09 Jun'25".to_string(),
        from: "Mumbai (BOM)".to_string(),
        to: "Singapore (SIN)".to_string(),
        ..Default::default()
    }
}

fn scope(i: usize) -> ServiceScope {
    ServiceScope {
        service: format!("Service {i}"),
        details: "Delivered 3 days post full payment".to_string(),
        ..Default::default()
    }
}

fn inclusion(i: usize) -> InclusionItem {
    InclusionItem {
        category: format!("Category {i}"),
        count: 2,
        details: "All flights mentioned".to_string(),
        status: InclusionStatus::Included,
        ..Default::default()
    }
}

fn table_entry(i: usize) -> ActivityTableEntry {
    ActivityTableEntry {
        city: "Singapore".to_string(),
        activity: format!("Activity {i}"),
        category: "Nature".to_string(),
        time_required: "3 Hours".to_string(),
        ..Default::default()
    }
}

fn installment(i: usize, amount: f64) -> Installment {
    Installment {
        name: format!("Installment {i}"),
        amount,
        due_date: "2025-05-20".to_string(),
        description: "Initial Payment".to_string(),
        ..Default::default()
    }
}

fn render_to_document(data: &ItineraryData) -> Document {
    render(data).expect("render failed")
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 50, "PDF too small to be valid");
    assert!(bytes.starts_with(b"%PDF-1.7"), "Missing PDF header");
    assert!(
        bytes.windows(5).any(|w| w == b"%%EOF"),
        "Missing %%EOF marker"
    );
    assert!(
        bytes.windows(4).any(|w| w == b"xref"),
        "Missing xref table"
    );
    assert!(
        bytes.windows(7).any(|w| w == b"trailer"),
        "Missing trailer"
    );
}

/// Fail if anything drawn before a page's footer reaches into the footer
/// band.
fn assert_content_above_footer(doc: &Document) {
    for (index, page) in doc.pages.iter().enumerate() {
        let footer = page
            .marks
            .iter()
            .find(|m| m.tag == Tag::Footer)
            .unwrap_or_else(|| panic!("page {index} has no footer"));
        for command in &page.commands[..footer.command_index] {
            assert!(
                command.bottom() <= CONTENT_LIMIT + EPSILON,
                "page {index}: {command:?} reaches {} past {CONTENT_LIMIT}",
                command.bottom()
            );
        }
        for mark in page.marks.iter().filter(|m| m.tag != Tag::Footer) {
            assert!(
                mark.bottom() <= CONTENT_LIMIT + EPSILON,
                "page {index}: {:?} ends at {}",
                mark.tag,
                mark.bottom()
            );
        }
    }
}

fn row_fill(doc: &Document, mark: &Mark) -> Option<Paint> {
    match doc.block(mark).first() {
        Some(DrawCommand::Rect { paint, .. }) => Some(*paint),
        _ => None,
    }
}

fn flight_rows(doc: &Document) -> Vec<usize> {
    doc.marks()
        .filter_map(|m| match m.tag {
            Tag::FlightRow { index } => Some(index),
            _ => None,
        })
        .collect()
}

/// Whether the visa box was drawn on the same page as its heading.
fn visa_box_follows_heading(doc: &Document) -> bool {
    doc.marks()
        .find(|m| {
            m.tag
                == Tag::Section {
                    section: SectionKind::Visa,
                }
        })
        .map(|heading| {
            doc.block(heading)
                .iter()
                .filter_map(DrawCommand::text)
                .any(|t| t.starts_with("Visa Type : "))
        })
        .unwrap_or(false)
}

fn position(doc: &Document, needle: &str) -> usize {
    doc.texts()
        .position(|t| t == needle)
        .unwrap_or_else(|| panic!("{needle:?} was not drawn"))
}

// ─── Pipeline Tests ─────────────────────────────────────────────

#[test]
fn test_minimal_trip_renders() {
    let doc = render_to_document(&trip(1));
    assert!(doc.page_count() >= 1);
    assert_content_above_footer(&doc);
    assert_eq!(doc.width, 210.0);
    assert_eq!(doc.height, 297.0);
}

#[test]
fn test_minimal_trip_to_pdf() {
    let bytes = render_pdf(&trip(1), &TemplateConfig::default()).unwrap();
    assert_valid_pdf(&bytes);
}

#[test]
fn test_two_day_trip_end_to_end() {
    let mut data = trip(2);
    data.daily_itinerary[0].activities = vec![
        activity("Gardens by the Bay", "", TimeSlot::Morning),
        activity("Night Safari", "Tram ride", TimeSlot::Evening),
    ];
    data.hotels = vec![hotel(0)];
    data.payment_plan.installments = vec![installment(1, 50_000.0)];

    let doc = render_to_document(&data);

    let days: Vec<u32> = doc
        .marks()
        .filter_map(|m| match m.tag {
            Tag::DayBlock { day } => Some(day),
            _ => None,
        })
        .collect();
    assert_eq!(days, vec![1, 2]);
    assert_eq!(doc.rows_of(SectionKind::Hotels).len(), 1);
    assert_eq!(doc.rows_of(SectionKind::Installments).len(), 1);

    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"Hi, Rahul!"));
    assert!(texts.contains(&"Singapore Itinerary"));
    assert!(texts.contains(&"2 Days 1 Nights"));
    assert!(texts.contains(&"Hotel 0"));
    assert!(texts.contains(&"Rs.50,000"));
    assert!(texts.contains(&"Initial Payment"));
    assert!(texts.contains(&"Rs. 150,000 For 2 Pax (Inclusive of GST)"));
    assert!(texts.contains(&"Not Collected"));

    let bytes = render_pdf(&data, &TemplateConfig::default()).unwrap();
    assert_valid_pdf(&bytes);
}

#[test]
fn test_render_json_parses_and_renders() {
    let bytes = render_json(itinera::cli::EXAMPLE_ITINERARY).unwrap();
    assert_valid_pdf(&bytes);
}

// ─── Section Tests ──────────────────────────────────────────────

#[test]
fn test_empty_optional_sections_are_omitted() {
    let doc = render_to_document(&trip(1));
    for kind in [
        SectionKind::Flights,
        SectionKind::Hotels,
        SectionKind::ImportantNotes,
        SectionKind::ServiceScope,
        SectionKind::Inclusions,
        SectionKind::Activities,
        SectionKind::Installments,
    ] {
        assert!(!doc.has_section(kind), "{kind:?} drawn without rows");
    }
    for kind in [
        SectionKind::Branding,
        SectionKind::TripSummary,
        SectionKind::Terms,
        SectionKind::PaymentPlan,
        SectionKind::Visa,
        SectionKind::CallToAction,
    ] {
        assert!(doc.has_section(kind), "{kind:?} missing");
    }
    let texts: Vec<&str> = doc.texts().collect();
    assert!(!texts.contains(&"Hotel "));
    assert!(!texts.contains(&"Flight "));
}

#[test]
fn test_sections_follow_template_order() {
    let mut data = trip(1);
    data.flights = vec![Flight {
        airline: "Air India".to_string(),
        from: "Mumbai".to_string(),
        to: "Singapore".to_string(),
        ..Default::default()
    }];
    data.hotels = vec![hotel(0)];
    data.important_notes = vec![note(0)];

    let doc = render_to_document(&data);
    let order: Vec<SectionKind> = doc
        .marks()
        .filter_map(|m| match m.tag {
            Tag::Section { section } => Some(section),
            _ => None,
        })
        .collect();
    assert_eq!(
        order,
        vec![
            SectionKind::Branding,
            SectionKind::TripSummary,
            SectionKind::Flights,
            SectionKind::Hotels,
            SectionKind::ImportantNotes,
            SectionKind::Terms,
            SectionKind::PaymentPlan,
            SectionKind::Visa,
            SectionKind::CallToAction,
        ]
    );
}

#[test]
fn test_trailing_notes_follow_their_sections() {
    let mut data = trip(1);
    data.flights = vec![flight(0), flight(1)];
    data.inclusions = vec![inclusion(0)];

    let doc = render_to_document(&data);
    assert_eq!(flight_rows(&doc), vec![0, 1]);
    let note = position(
        &doc,
        "Note: All Flights Include Meals, Seat Choice (Excluding XL), And 20kg/25Kg Checked Baggage.",
    );
    assert!(position(&doc, "Airline 1 From Mumbai (BOM) To Singapore (SIN)") < note);

    let policy = position(&doc, "Transfer Policy(Refundable Upon Claim)");
    assert!(position(&doc, "Category 0") < policy);
}

#[test]
fn test_visa_box_stays_with_heading() {
    for (days, hotels, installments) in [(1, 1, 1), (1, 0, 0), (2, 3, 2), (3, 1, 4)] {
        let mut data = trip(days);
        data.hotels = (0..hotels).map(hotel).collect();
        data.payment_plan.installments =
            (0..installments).map(|i| installment(i, 10_000.0)).collect();
        let doc = render_to_document(&data);
        assert!(
            visa_box_follows_heading(&doc),
            "visa heading left alone for {days} days, {hotels} hotels, {installments} installments"
        );
    }
}

#[test]
fn test_table_rows_alternate_fill() {
    let mut data = trip(1);
    data.important_notes = (0..7).map(note).collect();

    let doc = render_to_document(&data);
    let rows = doc.rows_of(SectionKind::ImportantNotes);
    assert_eq!(rows.len(), 7);
    for (i, mark) in rows.iter().enumerate() {
        assert!(matches!(mark.tag, Tag::TableRow { index, .. } if index == i));
        let expected = if i % 2 == 0 {
            palette::ROW_EVEN
        } else {
            palette::ROW_ODD
        };
        assert_eq!(row_fill(&doc, mark), Some(Paint::Fill(expected)));
    }
}

// ─── Page Overflow Tests ────────────────────────────────────────

#[test]
fn test_long_trip_spans_pages_and_stays_above_footer() {
    let mut data = trip(8);
    for d in &mut data.daily_itinerary {
        d.activities = vec![
            activity("Walk", "Old town", TimeSlot::Morning),
            activity("Museum", "", TimeSlot::Afternoon),
            activity("Dinner", "Harbour view", TimeSlot::Evening),
        ];
    }
    data.hotels = (0..30).map(hotel).collect();
    data.payment_plan.installments = (0..5).map(|i| installment(i, 30_000.0)).collect();

    let doc = render_to_document(&data);
    assert!(doc.page_count() > 3, "expected several pages");
    assert_eq!(doc.rows_of(SectionKind::Hotels).len(), 30);
    assert_content_above_footer(&doc);
}

#[test]
fn test_table_rows_keep_order_across_pages() {
    let mut data = trip(1);
    data.hotels = (0..40).map(hotel).collect();

    let doc = render_to_document(&data);
    let rows = doc.rows_of(SectionKind::Hotels);
    let pages: Vec<usize> = rows.iter().map(|m| m.page_index).collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
    assert!(pages.last() > pages.first(), "40 rows should break");
    for (i, mark) in rows.iter().enumerate() {
        assert!(matches!(mark.tag, Tag::TableRow { index, .. } if index == i));
    }
}

#[test]
fn test_table_header_not_repeated_by_default() {
    let mut data = trip(1);
    data.hotels = (0..40).map(hotel).collect();

    let doc = render_to_document(&data);
    let headers = doc
        .marks()
        .filter(|m| {
            m.tag
                == Tag::TableHeader {
                    section: SectionKind::Hotels,
                }
        })
        .count();
    assert_eq!(headers, 1);
}

#[test]
fn test_table_header_repeats_when_configured() {
    let mut data = trip(1);
    data.hotels = (0..40).map(hotel).collect();
    let config = TemplateConfig {
        repeat_table_headers: true,
        ..Default::default()
    };

    let doc = render_with_config(&data, &config).unwrap();
    let rows = doc.rows_of(SectionKind::Hotels);
    let first_page = rows[0].page_index;
    let last_page = rows[rows.len() - 1].page_index;
    for page in first_page..=last_page {
        let has_header = doc.pages[page].marks.iter().any(|m| {
            m.tag
                == Tag::TableHeader {
                    section: SectionKind::Hotels,
                }
        });
        assert!(has_header, "page {page} has hotel rows but no header");
    }
    assert_content_above_footer(&doc);
}

#[test]
fn test_page_limit_is_an_error() {
    let config = TemplateConfig {
        max_pages: Some(1),
        ..Default::default()
    };
    let err = render_with_config(&trip(10), &config).unwrap_err();
    assert!(matches!(
        err,
        ItineraError::Canvas(CanvasError::PageLimit { limit: 1 })
    ));
}

// ─── Footer Tests ───────────────────────────────────────────────

#[test]
fn test_one_footer_per_page() {
    let doc = render_to_document(&trip(6));
    assert!(doc.page_count() > 1);
    for page in &doc.pages {
        let footers: Vec<&Mark> = page.marks.iter().filter(|m| m.tag == Tag::Footer).collect();
        assert_eq!(footers.len(), 1);
        assert!((footers[0].y - 252.0).abs() < EPSILON);
    }
    let companies = doc.texts().filter(|t| *t == "Vigovia Tech Pvt. Ltd").count();
    assert_eq!(companies, doc.page_count());
}

#[test]
fn test_footer_uses_configured_branding() {
    let config = TemplateConfig::from_toml(
        r#"
        [branding]
        company = "Wayfarer Travels"
        phone = "+91-12345"
        "#,
    )
    .unwrap();
    let doc = render_with_config(&trip(1), &config).unwrap();
    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"Wayfarer Travels"));
    assert!(texts.contains(&"Phone: +91-12345"));
}

// ─── Ordering Tests ─────────────────────────────────────────────

#[test]
fn test_slots_render_in_fixed_order() {
    let mut data = trip(1);
    data.daily_itinerary[0].activities = vec![
        activity("Dinner", "", TimeSlot::Evening),
        activity("Breakfast", "", TimeSlot::Morning),
        activity("Lunch", "", TimeSlot::Afternoon),
        activity("Hike", "", TimeSlot::Morning),
    ];

    let doc = render_to_document(&data);
    let slots: Vec<TimeSlot> = doc
        .marks()
        .filter_map(|m| match m.tag {
            Tag::Slot { slot, .. } => Some(slot),
            _ => None,
        })
        .collect();
    assert_eq!(
        slots,
        vec![TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening]
    );

    assert!(position(&doc, "\u{2022} Breakfast") < position(&doc, "\u{2022} Hike"));
    assert!(position(&doc, "\u{2022} Hike") < position(&doc, "\u{2022} Lunch"));
    assert!(position(&doc, "\u{2022} Lunch") < position(&doc, "\u{2022} Dinner"));
}

#[test]
fn test_empty_slots_are_skipped() {
    let mut data = trip(1);
    data.daily_itinerary[0].activities = vec![activity("Dinner", "", TimeSlot::Evening)];

    let doc = render_to_document(&data);
    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"Evening"));
    assert!(!texts.contains(&"Morning"));
    assert!(!texts.contains(&"Afternoon"));
}

#[test]
fn test_days_render_in_input_order() {
    let doc = render_to_document(&trip(5));
    let marks: Vec<&Mark> = doc
        .marks()
        .filter(|m| matches!(m.tag, Tag::DayBlock { .. }))
        .collect();
    let days: Vec<Tag> = marks.iter().map(|m| m.tag).collect();
    assert_eq!(
        days,
        (1..=5).map(|day| Tag::DayBlock { day }).collect::<Vec<_>>()
    );
    for pair in marks.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            (a.page_index, a.y) < (b.page_index, b.y),
            "day blocks out of order"
        );
    }
}

// ─── Placeholder Tests ──────────────────────────────────────────

#[test]
fn test_blank_dates_get_placeholders() {
    let mut data = trip(1);
    data.daily_itinerary[0].date.clear();
    data.flights = vec![Flight {
        airline: "Air India".to_string(),
        from: "Mumbai".to_string(),
        to: "Singapore".to_string(),
        ..Default::default()
    }];

    let doc = render_to_document(&data);
    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"27th November"));
    assert!(texts.contains(&"Thu 10 Jan'24"));
    assert!(texts.contains(&"Air India From Mumbai To Singapore"));
}

#[test]
fn test_placeholders_can_be_switched_off() {
    let mut data = trip(1);
    data.daily_itinerary[0].date.clear();
    let config = TemplateConfig::from_toml(
        r#"
        [placeholders]
        day_date = "To be confirmed"
        "#,
    )
    .unwrap();

    let doc = render_with_config(&data, &config).unwrap();
    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"To be confirmed"));
    assert!(!texts.contains(&"27th November"));
}

// ─── JSON Tests ─────────────────────────────────────────────────

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = render_json("{ \"tripDetails\": ").unwrap_err();
    assert!(matches!(err, ItineraError::Parse { .. }));
    assert!(err.to_string().contains("truncated"));
}

#[test]
fn test_wrong_shape_json_is_a_parse_error() {
    let err = render_json(r#"{ "tripDetails": { "days": "three" } }"#).unwrap_err();
    assert!(matches!(err, ItineraError::Parse { .. }));
    assert!(err.to_string().contains("schema"));
}

#[test]
fn test_unknown_slot_is_rejected() {
    let json = r#"{
        "tripDetails": { "customerName": "A", "destination": "B", "days": 1, "nights": 0 },
        "dailyItinerary": [
            { "day": 1, "activities": [ { "name": "X", "type": "midnight" } ] }
        ]
    }"#;
    assert!(matches!(
        render_json(json),
        Err(ItineraError::Parse { .. })
    ));
}

// ─── Determinism Tests ──────────────────────────────────────────

#[test]
fn test_rendering_is_deterministic() {
    let data = itinera::parse_itinerary(itinera::cli::EXAMPLE_ITINERARY).unwrap();
    assert_eq!(render_to_document(&data), render_to_document(&data));

    let config = TemplateConfig::default();
    assert_eq!(
        render_pdf(&data, &config).unwrap(),
        render_pdf(&data, &config).unwrap()
    );
}

// ─── Export Tests ───────────────────────────────────────────────

#[test]
fn test_export_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = trip(2);
    let bytes = render_pdf(&data, &TemplateConfig::default()).unwrap();

    let path = itinera::export::save(
        dir.path(),
        &data.trip_details.destination,
        &bytes,
        FilenamePolicy::Sanitize,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "Singapore_Itinerary.pdf");
    assert_valid_pdf(&std::fs::read(&path).unwrap());
}

// ─── Properties ─────────────────────────────────────────────────

fn slot_strategy() -> impl Strategy<Value = TimeSlot> {
    prop_oneof![
        Just(TimeSlot::Morning),
        Just(TimeSlot::Afternoon),
        Just(TimeSlot::Evening),
    ]
}

fn activities_strategy() -> impl Strategy<Value = Vec<Activity>> {
    prop::collection::vec(
        (slot_strategy(), any::<bool>()).prop_map(|(slot, described)| {
            activity("Stop", if described { "Details" } else { "" }, slot)
        }),
        0..9,
    )
}

fn itinerary_strategy() -> impl Strategy<Value = ItineraryData> {
    (
        prop::collection::vec(activities_strategy(), 1..8),
        (
            0..8usize,
            0..25usize,
            0..15usize,
            0..15usize,
            0..15usize,
            0..15usize,
            0..6usize,
        ),
    )
        .prop_map(|(days, counts)| {
            let (flights, hotels, notes, scopes, inclusions, entries, installments) = counts;
            let mut data = trip(days.len() as u32);
            for (d, activities) in data.daily_itinerary.iter_mut().zip(days) {
                d.activities = activities;
            }
            data.flights = (0..flights).map(flight).collect();
            data.hotels = (0..hotels).map(hotel).collect();
            data.important_notes = (0..notes).map(note).collect();
            data.service_scope = (0..scopes).map(scope).collect();
            data.inclusions = (0..inclusions).map(inclusion).collect();
            data.activities = (0..entries).map(table_entry).collect();
            data.payment_plan.installments =
                (0..installments).map(|i| installment(i, 10_000.0)).collect();
            data
        })
}

/// Row counts of every table section, paired with the input length.
fn table_lengths(data: &ItineraryData) -> [(SectionKind, usize); 6] {
    [
        (SectionKind::Hotels, data.hotels.len()),
        (SectionKind::ImportantNotes, data.important_notes.len()),
        (SectionKind::ServiceScope, data.service_scope.len()),
        (SectionKind::Inclusions, data.inclusions.len()),
        (SectionKind::Activities, data.activities.len()),
        (SectionKind::Installments, data.payment_plan.installments.len()),
    ]
}

fn check_row_counts_match_input(data: &ItineraryData) -> Result<(), TestCaseError> {
    let doc = render_to_document(data);
    for (section, len) in table_lengths(data) {
        let rows = doc.rows_of(section);
        prop_assert_eq!(rows.len(), len, "{:?}", section);
        prop_assert_eq!(doc.has_section(section), len > 0, "{:?}", section);
        for (position, mark) in rows.into_iter().enumerate() {
            let Tag::TableRow { index, .. } = mark.tag else {
                unreachable!()
            };
            prop_assert_eq!(index, position);
            let expected = if index % 2 == 0 {
                palette::ROW_EVEN
            } else {
                palette::ROW_ODD
            };
            prop_assert_eq!(row_fill(&doc, mark), Some(Paint::Fill(expected)));
        }
    }
    prop_assert_eq!(
        flight_rows(&doc),
        (0..data.flights.len()).collect::<Vec<_>>()
    );
    prop_assert_eq!(doc.has_section(SectionKind::Flights), !data.flights.is_empty());
    Ok(())
}

fn check_pagination_and_footers(data: &ItineraryData) -> Result<(), TestCaseError> {
    let doc = render_to_document(data);
    assert_content_above_footer(&doc);
    for page in &doc.pages {
        let footers = page.marks.iter().filter(|m| m.tag == Tag::Footer).count();
        prop_assert_eq!(footers, 1);
    }
    prop_assert!(visa_box_follows_heading(&doc));
    Ok(())
}

fn check_determinism(data: &ItineraryData) -> Result<(), TestCaseError> {
    let config = TemplateConfig::default();
    prop_assert_eq!(render_to_document(data), render_to_document(data));
    prop_assert_eq!(
        render_pdf(data, &config).unwrap(),
        render_pdf(data, &config).unwrap()
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn row_counts_match_input(data in itinerary_strategy()) {
        check_row_counts_match_input(&data)?;
    }

    #[test]
    fn content_never_reaches_footer(data in itinerary_strategy()) {
        check_pagination_and_footers(&data)?;
    }

    #[test]
    fn same_input_same_output(data in itinerary_strategy()) {
        check_determinism(&data)?;
    }
}
