//! Resolution service: the public contract of the engine.
//!
//! [`ResolutionService`] owns the orchestration: validate the request,
//! fetch the store's calendar, resolve the cutoff, enumerate slots, and
//! shape the result envelope. Resolution is a pure query; it never
//! creates, updates, or reserves anything.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::clock::Clock;
use crate::cutoff;
use crate::provider::{StoreCalendarProvider, UnknownStoreError};
use crate::slots::{DEFAULT_MAX_RESULTS, DeliverySlot, SlotIter};

/// Malformed or missing request input, named by field.
///
/// Carries 4xx semantics at the transport boundary, unlike
/// [`UnknownStoreError`] which is surfaced as data in the envelope.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// `store_code` was missing or blank.
    #[error("store_code must not be empty")]
    EmptyStoreCode,
    /// `order_date` did not parse as a date-time.
    #[error("order_date is not a valid date-time: {value:?}")]
    MalformedOrderDate {
        /// The rejected input.
        value: String,
    },
}

/// A stable, serializable error for the result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorInfo {
    /// Create an error with a stable code and descriptive message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<UnknownStoreError> for ErrorInfo {
    fn from(err: UnknownStoreError) -> Self {
        Self::new("unknown_store", err.to_string())
    }
}

impl From<InvalidRequestError> for ErrorInfo {
    fn from(err: InvalidRequestError) -> Self {
        Self::new("invalid_request", err.to_string())
    }
}

/// The result envelope returned for every resolution.
///
/// Exactly one of a non-empty `dates` list or a non-null `error` is
/// meaningful; an empty `dates` with no error means no slots were found
/// within the search horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// Delivery slots, chronological, at most one per date.
    pub dates: Vec<DeliverySlot>,
    /// Populated when resolution failed; serialized as `null` on success.
    pub error: Option<ErrorInfo>,
}

impl ResolutionResult {
    /// A successful result carrying `dates`.
    #[must_use]
    pub fn ok(dates: Vec<DeliverySlot>) -> Self {
        Self { dates, error: None }
    }

    /// A failed result carrying `error` and no dates.
    #[must_use]
    pub fn failed(error: impl Into<ErrorInfo>) -> Self {
        Self {
            dates: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Orchestrates calendar lookup, cutoff resolution, and slot generation.
pub struct ResolutionService<P, C> {
    provider: P,
    clock: C,
    max_results: usize,
}

impl<P, C> ResolutionService<P, C>
where
    P: StoreCalendarProvider,
    C: Clock,
{
    /// Create a service over the given provider and clock, offering
    /// [`DEFAULT_MAX_RESULTS`] delivery dates per request.
    pub fn new(provider: P, clock: C) -> Self {
        Self {
            provider,
            clock,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Override how many delivery dates a resolution offers.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Resolve the available delivery slots for a store.
    ///
    /// When `order_timestamp` is absent, the current instant from the
    /// injected clock is substituted and the cutoff rule applies to it
    /// unchanged.
    ///
    /// The generator emits one slot per time window per qualifying day;
    /// the result keeps the first slot per date in declared-window order,
    /// so `dates` is strictly ascending with no duplicate dates.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if `store_code` is blank. An
    /// unregistered store is not an `Err`: it resolves to an envelope
    /// with an `unknown_store` error, matching the response contract.
    pub fn resolve(
        &self,
        store_code: &str,
        order_timestamp: Option<NaiveDateTime>,
    ) -> Result<ResolutionResult, InvalidRequestError> {
        if store_code.trim().is_empty() {
            return Err(InvalidRequestError::EmptyStoreCode);
        }

        let calendar = match self.provider.lookup(store_code) {
            Ok(calendar) => calendar,
            Err(err) => {
                tracing::debug!(store_code, "store lookup failed");
                return Ok(ResolutionResult::failed(err));
            }
        };

        let order_timestamp = order_timestamp.unwrap_or_else(|| self.clock.now());
        let earliest = cutoff::earliest_eligible_date(order_timestamp, &calendar);

        let mut dates: Vec<DeliverySlot> = Vec::with_capacity(self.max_results);
        for slot in SlotIter::new(earliest, &calendar) {
            if dates.last().is_some_and(|prev| prev.date() == slot.date()) {
                continue;
            }
            dates.push(slot);
            if dates.len() >= self.max_results {
                break;
            }
        }

        Ok(ResolutionResult::ok(dates))
    }
}
