//! CLI logic for the `itinera` binary.
//!
//! Stands in for the trip-planning form: reads the record as JSON, runs the
//! form's completeness checks, renders, and saves the PDF under the
//! destination-derived filename.

mod args;
pub mod config;

pub use args::Args;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use log::{info, warn};

use crate::error::ItineraError;
use crate::export::{self, FilenamePolicy};

/// Run the CLI. Returns the path written, or `None` when only the example
/// was printed.
///
/// # Errors
///
/// Returns `ItineraError` for I/O failures, configuration problems, invalid
/// JSON, an incomplete record (unless `--no-validate`), and canvas limits.
/// Nothing is written when an error is returned.
pub fn run(args: &Args) -> Result<Option<PathBuf>, ItineraError> {
    if args.example {
        print!("{}", EXAMPLE_ITINERARY);
        return Ok(None);
    }

    let config = config::load_config(args.config.as_deref())?;

    let source = match &args.input {
        Some(path) => {
            info!(input_path = path.display().to_string(); "Reading itinerary");
            fs::read_to_string(path)?
        }
        None => {
            info!("Reading itinerary from stdin");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let data = crate::parse_itinerary(&source)?;
    if args.no_validate {
        warn!("Skipping itinerary validation");
    } else {
        data.validate()?;
    }

    let pdf = crate::render_pdf(&data, &config)?;

    let path = match &args.output {
        Some(path) => {
            fs::write(path, &pdf)?;
            info!(path = path.display().to_string(), bytes = pdf.len(); "Itinerary saved");
            path.clone()
        }
        None => {
            let policy = if args.verbatim_filename {
                FilenamePolicy::Verbatim
            } else {
                FilenamePolicy::Sanitize
            };
            export::save(&args.dir, &data.trip_details.destination, &pdf, policy)?
        }
    };
    Ok(Some(path))
}

/// A complete sample record, printed by `--example`.
pub const EXAMPLE_ITINERARY: &str = r##"{
  "tripDetails": {
    "customerName": "Rahul",
    "destination": "Singapore",
    "days": 3,
    "nights": 2,
    "departureFrom": "Mumbai",
    "departureDate": "09/06/2025",
    "arrivalDate": "11/06/2025",
    "numberOfTravelers": 2
  },
  "dailyItinerary": [
    {
      "day": 1,
      "date": "9th June",
      "activities": [
        { "id": "a1", "name": "Arrive in Singapore", "description": "Airport pickup and hotel check-in", "price": 0, "duration": "2h", "type": "morning" },
        { "id": "a2", "name": "Gardens by the Bay", "description": "", "price": 35, "duration": "3h", "type": "afternoon" },
        { "id": "a3", "name": "Marina Bay Light Show", "description": "Spectra at the Event Plaza", "price": 0, "duration": "1h", "type": "evening" }
      ],
      "transfers": [
        { "id": "t1", "type": "Airport Transfer", "timing": "10:00 AM", "price": 40, "capacity": 4, "description": "Private sedan" }
      ]
    },
    {
      "day": 2,
      "date": "10th June",
      "activities": [
        { "id": "a4", "name": "Sentosa Island", "description": "Cable car and beaches", "price": 60, "duration": "5h", "type": "morning" },
        { "id": "a5", "name": "Night Safari", "description": "", "price": 55, "duration": "3h", "type": "evening" }
      ],
      "transfers": []
    },
    {
      "day": 3,
      "date": "11th June",
      "activities": [
        { "id": "a6", "name": "Chinatown Walk", "description": "", "price": 0, "duration": "2h", "type": "morning" }
      ],
      "transfers": []
    }
  ],
  "flights": [
    { "id": "f1", "airline": "Air India", "date": "Mon 09 Jun'25", "from": "Mumbai (BOM)", "to": "Singapore (SIN)", "flightNumber": "AI 342" },
    { "id": "f2", "airline": "Air India", "date": "Wed 11 Jun'25", "from": "Singapore (SIN)", "to": "Mumbai (BOM)", "flightNumber": "AI 343" }
  ],
  "hotels": [
    { "id": "h1", "city": "Singapore", "checkIn": "09/06/2025", "checkOut": "11/06/2025", "nights": 2, "name": "Marina Bay Hotel" }
  ],
  "activities": [
    { "id": "x1", "city": "Singapore", "activity": "Night Safari", "type": "Nature", "timeRequired": "3 Hours" },
    { "id": "x2", "city": "Singapore", "activity": "Sentosa Island", "type": "Leisure", "timeRequired": "5 Hours" }
  ],
  "paymentPlan": {
    "totalAmount": 185000,
    "tcsCollected": false,
    "installments": [
      { "id": "p1", "name": "Installment 1", "amount": 92500, "dueDate": "2025-05-20", "description": "Initial Payment" },
      { "id": "p2", "name": "Installment 2", "amount": 92500, "dueDate": "2025-05-30", "description": "Post Visa Approval" }
    ]
  },
  "visaDetails": {
    "visaType": "Tourist",
    "validity": "30 Days",
    "processingDate": "14/05/2025"
  },
  "importantNotes": [
    { "id": "n1", "point": "Airlines Standard Policy", "details": "In case of visa rejection, visa fees are non-refundable." }
  ],
  "serviceScope": [
    { "id": "s1", "service": "Flight Tickets And Hotel Vouchers", "details": "Delivered 3 days post full payment" }
  ],
  "inclusions": [
    { "id": "i1", "category": "Flight", "count": 2, "details": "All flights mentioned", "status": "Awaiting Confirmation" },
    { "id": "i2", "category": "Hotel", "count": 2, "details": "Marina Bay Hotel", "status": "Included" }
  ]
}
"##;
