//! Request and response bodies for the HTTP endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use text_classifier::Label;

pub const DEFAULT_SCHEDULE_TENSITY: i64 = 3;
pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_TRANSPORT: &str = "MTR";
pub const DEFAULT_DURATION_HOURS: i64 = 1;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub descriptions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<Label>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateItineraryRequest {
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub attractions: Option<Vec<Attraction>>,
}

/// Scheduling preferences.
///
/// Each known field records whether its key was sent at all: `None` when
/// absent, `Some(None)` when sent as `null`. Either way the default applies,
/// but only an object with no keys counts as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preferences {
    /// Accepted for compatibility, does not affect scheduling
    #[serde(default, deserialize_with = "present")]
    pub schedule_tensity: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub start_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub mode_of_transport: Option<Option<String>>,
    /// Unrecognised keys, kept so `{"foo": 1}` is not mistaken for `{}`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.schedule_tensity.is_none()
            && self.start_time.is_none()
            && self.mode_of_transport.is_none()
            && self.extra.is_empty()
    }

    pub fn schedule_tensity(&self) -> i64 {
        self.schedule_tensity
            .flatten()
            .unwrap_or(DEFAULT_SCHEDULE_TENSITY)
    }

    pub fn start_time(&self) -> &str {
        self.start_time
            .as_ref()
            .and_then(Option::as_deref)
            .unwrap_or(DEFAULT_START_TIME)
    }

    pub fn mode_of_transport(&self) -> &str {
        self.mode_of_transport
            .as_ref()
            .and_then(Option::as_deref)
            .unwrap_or(DEFAULT_TRANSPORT)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attraction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Whole hours. May be omitted, but `null` is rejected.
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<i64>,
}

impl Attraction {
    pub fn duration(&self) -> i64 {
        self.duration.unwrap_or(DEFAULT_DURATION_HOURS)
    }
}

/// One scheduled visit. `name` / `location` are copied as-is, null when absent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItineraryEntry {
    pub name: Option<String>,
    pub location: Option<String>,
    pub start_time: String,
    pub duration: String,
    pub transport: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResponse {
    pub itinerary: Vec<ItineraryEntry>,
}

/// Wraps whatever the key holds in `Some`; paired with `#[serde(default)]`
/// so that only an absent key yields `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
