//! Event model
//!
//! The field set mirrors the backend event document (title, description,
//! date, time, location, category, status, attendee counts, organizer,
//! image), so a persistence adapter can be added without remodeling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Scheduled for a future date
    Upcoming,
    /// Currently taking place
    Ongoing,
    /// Finished
    Completed,
    /// Called off
    Cancelled,
}

impl EventStatus {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a school event (open house, conference, ceremony, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique record id
    pub id: String,

    /// Event title
    pub title: String,

    /// Longer description shown on the event page
    pub description: String,

    /// Calendar date of the event
    pub date: NaiveDate,

    /// Start time as displayed (e.g., "18:30")
    pub time: String,

    /// Venue or room
    pub location: String,

    /// Event category (e.g., "Portes ouvertes")
    pub category: String,

    /// Lifecycle status
    pub status: EventStatus,

    /// Number of attendees expected by the organizer
    pub expected_attendees: u32,

    /// Number of attendees registered so far
    pub registered_attendees: u32,

    /// Organizer display name
    pub organizer: String,

    /// Optional banner image URL
    pub image_url: Option<String>,
}

impl Event {
    /// Create a new upcoming event
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `title` - Event title
    /// * `date` - Calendar date
    /// * `location` - Venue or room
    #[must_use]
    pub const fn new(id: String, title: String, date: NaiveDate, location: String) -> Self {
        Self {
            id,
            title,
            description: String::new(),
            date,
            time: String::new(),
            location,
            category: String::new(),
            status: EventStatus::Upcoming,
            expected_attendees: 0,
            registered_attendees: 0,
            organizer: String::new(),
            image_url: None,
        }
    }

    /// Whether registrations have reached the expected headcount
    #[must_use]
    pub const fn is_at_capacity(&self) -> bool {
        self.expected_attendees > 0 && self.registered_attendees >= self.expected_attendees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event::new(
            "e-1".to_string(),
            "Portes ouvertes".to_string(),
            NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
            "Campus principal".to_string(),
        )
    }

    #[test]
    fn test_event_creation() {
        let event = sample();

        assert_eq!(event.id, "e-1");
        assert_eq!(event.title, "Portes ouvertes");
        assert_eq!(event.location, "Campus principal");
        assert_eq!(event.status, EventStatus::Upcoming);
        assert_eq!(event.registered_attendees, 0);
        assert!(event.image_url.is_none());
    }

    #[test]
    fn test_capacity_check() {
        let mut event = sample();

        // No expected headcount means never at capacity
        assert!(!event.is_at_capacity());

        event.expected_attendees = 100;
        event.registered_attendees = 99;
        assert!(!event.is_at_capacity());

        event.registered_attendees = 100;
        assert!(event.is_at_capacity());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(EventStatus::Upcoming.as_str(), "upcoming");
        assert_eq!(EventStatus::Cancelled.to_string(), "cancelled");
    }
}
