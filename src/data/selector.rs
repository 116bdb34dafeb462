use chrono::{Local, TimeZone, Utc};
use thiserror::Error;

use super::criteria::FilterCriteria;
use super::model::{FeedPayload, RawEventRecord, SelectionResult};

/// Display format for event times, e.g. `03-14-24 09:26:53`.
pub const TIME_FORMAT: &str = "%m-%d-%y %H:%M:%S";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionErrorKind {
    MissingField,
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// A feed record lacks a required field; the whole pass is discarded.
    #[error("record {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },
    #[error("no earthquakes in the selected range")]
    NoMatches,
}

impl SelectionError {
    pub fn kind(&self) -> SelectionErrorKind {
        match self {
            SelectionError::MissingField { .. } => SelectionErrorKind::MissingField,
            SelectionError::NoMatches => SelectionErrorKind::NoMatches,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Format an epoch-millisecond timestamp in the given time zone.
pub fn format_event_time<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => dt.format(TIME_FORMAT).to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format(TIME_FORMAT).to_string(),
        chrono::LocalResult::None => "invalid".to_string(),
    }
}

/// Apply `criteria` to every record of `payload`, using `now_millis` as the
/// reference time for the whole pass.
///
/// All-or-nothing: the first record with a missing field aborts the pass.
/// An empty selection is reported as [`SelectionError::NoMatches`].
pub fn select(
    payload: &FeedPayload,
    criteria: &FilterCriteria,
    now_millis: i64,
) -> Result<SelectionResult, SelectionError> {
    select_in(payload, criteria, now_millis, &Local)
}

/// [`select`] against the current wall clock.
pub fn select_now(payload: &FeedPayload, criteria: &FilterCriteria) -> Result<SelectionResult, SelectionError> {
    select(payload, criteria, Utc::now().timestamp_millis())
}

fn select_in<Tz>(
    payload: &FeedPayload,
    criteria: &FilterCriteria,
    now_millis: i64,
    tz: &Tz,
) -> Result<SelectionResult, SelectionError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let pass = criteria.to_predicate();
    let mut result = SelectionResult::default();

    for (index, feature) in payload.records.iter().enumerate() {
        let record = RawEventRecord::from_feature(index, feature)?;
        if pass(&record, now_millis) {
            let time = format_event_time(record.timestamp_millis, tz);
            result.push(record, time);
        }
    }

    log::debug!(
        "selected {} of {} events ({criteria})",
        result.len(),
        payload.records.len()
    );

    if result.is_empty() {
        return Err(SelectionError::NoMatches);
    }
    Ok(result)
}
