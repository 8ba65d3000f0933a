//! # Itinerary Model
//!
//! The input representation for the renderer: one aggregate record,
//! [`ItineraryData`], assembled by the trip-planning form and handed to the
//! layout engine whole. The engine only ever borrows it.
//!
//! Field names follow the form's JSON (camelCase). List fields default to
//! empty so a partially-filled form still deserializes; whether the record
//! is complete enough to render is a question for [`ItineraryData::validate`],
//! which the engine itself never asks.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The complete trip record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryData {
    pub trip_details: TripDetails,
    #[serde(default)]
    pub daily_itinerary: Vec<DayItinerary>,
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    /// Flat activity summary rows (distinct from the per-day activities).
    #[serde(default)]
    pub activities: Vec<ActivityTableEntry>,
    #[serde(default)]
    pub payment_plan: PaymentPlan,
    #[serde(default)]
    pub visa_details: VisaDetails,
    #[serde(default)]
    pub important_notes: Vec<ImportantNote>,
    #[serde(default)]
    pub service_scope: Vec<ServiceScope>,
    #[serde(default)]
    pub inclusions: Vec<InclusionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub customer_name: String,
    pub destination: String,
    pub days: u32,
    pub nights: u32,
    #[serde(default)]
    pub departure_from: String,
    #[serde(default)]
    pub departure_date: String,
    #[serde(default)]
    pub arrival_date: String,
    #[serde(default = "default_travelers")]
    pub number_of_travelers: u32,
}

fn default_travelers() -> u32 {
    1
}

/// One day of the trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    /// 1-based day index.
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    /// Picture chosen in the form. Accepted, never drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl DayItinerary {
    /// Activities in `slot`, in input order.
    pub fn activities_in(&self, slot: TimeSlot) -> impl Iterator<Item = &Activity> {
        self.activities.iter().filter(move |a| a.slot == slot)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(rename = "type")]
    pub slot: TimeSlot,
}

/// Time-of-day bucket for an activity. Declaration order is render order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }

    /// Whether the timeline continues below this slot's dot. The evening
    /// slot closes the day.
    pub fn has_tail(self) -> bool {
        !matches!(self, TimeSlot::Evening)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timing: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default)]
    pub id: String,
    pub airline: String,
    #[serde(default)]
    pub date: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub flight_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default)]
    pub id: String,
    pub city: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default)]
    pub nights: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTableEntry {
    #[serde(default)]
    pub id: String,
    pub city: String,
    pub activity: String,
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub time_required: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlan {
    pub total_amount: f64,
    #[serde(default)]
    pub tcs_collected: bool,
    #[serde(default)]
    pub installments: Vec<Installment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Calendar date from the form's date picker. Not drawn.
    #[serde(default)]
    pub due_date: String,
    /// Payment milestone, shown in the table's "Due Date" column.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDetails {
    #[serde(default)]
    pub visa_type: String,
    #[serde(default)]
    pub validity: String,
    #[serde(default)]
    pub processing_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportantNote {
    #[serde(default)]
    pub id: String,
    pub point: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceScope {
    #[serde(default)]
    pub id: String,
    pub service: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionItem {
    #[serde(default)]
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub status: InclusionStatus,
}

/// Booking status of an inclusion row. The form submits the empty string
/// when no status was picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InclusionStatus {
    #[serde(rename = "Awaiting Confirmation")]
    AwaitingConfirmation,
    #[serde(rename = "Included")]
    Included,
    #[serde(rename = "Optional")]
    Optional,
    #[serde(rename = "Not Included")]
    NotIncluded,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl InclusionStatus {
    pub fn label(self) -> &'static str {
        match self {
            InclusionStatus::AwaitingConfirmation => "Awaiting Confirmation",
            InclusionStatus::Included => "Included",
            InclusionStatus::Optional => "Optional",
            InclusionStatus::NotIncluded => "Not Included",
            InclusionStatus::Unspecified => "",
        }
    }
}

impl fmt::Display for InclusionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reason the record is not ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingCustomerName,
    #[error("destination is required")]
    MissingDestination,
    #[error("trip must last at least one day")]
    NoDays,
    #[error("daily itinerary is empty")]
    EmptyItinerary,
    #[error("day entry {position} has index {found}, expected {expected}")]
    DaySequence {
        position: usize,
        expected: u32,
        found: u32,
    },
}

impl ItineraryData {
    /// Check the record the way the form does before it enables document
    /// generation. Returns every problem found, in field order.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut problems = Vec::new();
        let trip = &self.trip_details;

        if trip.customer_name.trim().is_empty() {
            problems.push(ValidationError::MissingCustomerName);
        }
        if trip.destination.trim().is_empty() {
            problems.push(ValidationError::MissingDestination);
        }
        if trip.days == 0 {
            problems.push(ValidationError::NoDays);
        }
        if self.daily_itinerary.is_empty() {
            problems.push(ValidationError::EmptyItinerary);
        }
        for (position, day) in self.daily_itinerary.iter().enumerate() {
            let expected = position as u32 + 1;
            if day.day != expected {
                problems.push(ValidationError::DaySequence {
                    position,
                    expected,
                    found: day.day,
                });
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
