/// Itinerary Scheduler
///
/// Assigns start times to attractions in the order given, one after another,
/// starting from the preferred start time. No reordering or travel-time
/// estimation happens here.
///
/// Clock arithmetic works on whole hours only:
/// - the first entry keeps the start time verbatim (minutes included)
/// - every later entry starts at `"<hour>:00"`, minutes dropped
/// - hours are not wrapped at 24 and are not zero-padded (`"8:00"`, `"29:00"`)
use crate::error::{AppError, Result, MISSING_ITINERARY_INPUT};
use crate::models::{Attraction, GenerateItineraryRequest, ItineraryEntry, Preferences};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Validate a request body and schedule it.
///
/// Absent, null or empty `preferences` / `attractions` are all rejected.
pub fn generate_for(request: GenerateItineraryRequest) -> Result<Vec<ItineraryEntry>> {
    match (request.preferences, request.attractions) {
        (Some(preferences), Some(attractions))
            if !preferences.is_empty() && !attractions.is_empty() =>
        {
            generate(&preferences, &attractions)
        }
        _ => Err(AppError::MissingInput(MISSING_ITINERARY_INPUT)),
    }
}

/// Build the schedule. All-or-nothing: any clock error fails the whole request.
pub fn generate(preferences: &Preferences, attractions: &[Attraction]) -> Result<Vec<ItineraryEntry>> {
    let transport = preferences.mode_of_transport();
    debug!(
        schedule_tensity = preferences.schedule_tensity(),
        start_time = preferences.start_time(),
        transport,
        attractions = attractions.len(),
        "Generating itinerary"
    );

    let mut current_time = preferences.start_time().to_string();
    let mut itinerary = Vec::with_capacity(attractions.len());

    for attraction in attractions {
        let duration = attraction.duration();

        itinerary.push(ItineraryEntry {
            name: attraction.name.clone(),
            location: attraction.location.clone(),
            start_time: current_time.clone(),
            duration: format!("{} hour(s)", duration),
            transport: transport.to_string(),
        });

        current_time = advance_clock(&current_time, duration)?;
    }

    Ok(itinerary)
}

/// Next start time: hour component of `current` plus `hours`, minutes reset.
///
/// The hour is an unbounded integer, so `"99999999999999999999:00"` still
/// advances rather than overflowing.
pub fn advance_clock(current: &str, hours: i64) -> Result<String> {
    let hour_text = current.split(':').next().unwrap_or_default();

    let hour = Hour::parse(hour_text.trim()).ok_or_else(|| {
        AppError::ItineraryFailure(format!("invalid literal for hour: '{}'", hour_text))
    })?;

    Ok(format!("{}:00", hour.plus(&Hour::from(hours))))
}

/// Signed decimal integer of any length. Digits are stored least significant
/// first with no leading zeros; zero has no digits and is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hour {
    negative: bool,
    digits: Vec<u8>,
}

impl Hour {
    /// Optional sign, then ASCII digits with single underscores between them.
    fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
            return None;
        }

        let mut digits = Vec::with_capacity(body.len());
        for c in body.bytes().rev() {
            match c {
                b'0'..=b'9' => digits.push(c - b'0'),
                b'_' => {}
                _ => return None,
            }
        }

        Some(Self::normalized(negative, digits))
    }

    fn normalized(negative: bool, mut digits: Vec<u8>) -> Self {
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Self {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }

    fn plus(&self, other: &Self) -> Self {
        if self.negative == other.negative {
            return Self::normalized(self.negative, add_magnitudes(&self.digits, &other.digits));
        }

        match compare_magnitudes(&self.digits, &other.digits) {
            Ordering::Less => {
                Self::normalized(other.negative, sub_magnitudes(&other.digits, &self.digits))
            }
            _ => Self::normalized(self.negative, sub_magnitudes(&self.digits, &other.digits)),
        }
    }
}

impl From<i64> for Hour {
    fn from(value: i64) -> Self {
        let mut magnitude = value.unsigned_abs();
        let mut digits = Vec::new();
        while magnitude > 0 {
            digits.push((magnitude % 10) as u8);
            magnitude /= 10;
        }
        Self::normalized(value < 0, digits)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        for digit in self.digits.iter().rev() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

fn compare_magnitudes(a: &[u8], b: &[u8]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

fn add_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut sum = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0;
    for i in 0..a.len().max(b.len()) {
        let total = a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0) + carry;
        sum.push(total % 10);
        carry = total / 10;
    }
    if carry > 0 {
        sum.push(carry);
    }
    sum
}

/// `a - b`, requires `a >= b`.
fn sub_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut difference = Vec::with_capacity(a.len());
    let mut borrow = 0;
    for (i, &digit) in a.iter().enumerate() {
        let subtrahend = b.get(i).copied().unwrap_or(0) + borrow;
        if digit >= subtrahend {
            difference.push(digit - subtrahend);
            borrow = 0;
        } else {
            difference.push(digit + 10 - subtrahend);
            borrow = 1;
        }
    }
    difference
}
