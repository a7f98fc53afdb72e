//! Slotwise Core - Delivery-window resolution engine.
//!
//! Given a store's delivery rules and an order timestamp, this crate
//! answers which delivery dates and time windows are available. It is the
//! only part of Slotwise with real logic; HTTP routing, query parsing, and
//! JSON plumbing live in the `server` crate.
//!
//! # Architecture
//!
//! The engine is pure: no I/O, no HTTP, and no wall-clock reads outside
//! the injected [`Clock`]. Resolution is deterministic and idempotent,
//! and all forward scanning is bounded by a fixed search horizon.
//!
//! # Modules
//!
//! - [`calendar`] - Store delivery rules: operating days, windows, cutoff,
//!   lead time, blackouts, per-date overrides
//! - [`clock`] - Injectable time source
//! - [`cutoff`] - Order timestamp to earliest eligible delivery date
//! - [`slots`] - Lazy, horizon-bounded slot enumeration
//! - [`format`] - Canonical slot rendering
//! - [`provider`] - Read-only calendar lookup behind a swappable trait
//! - [`resolve`] - The public resolution contract and result envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calendar;
pub mod clock;
pub mod cutoff;
pub mod format;
pub mod provider;
pub mod resolve;
pub mod slots;

pub use calendar::{CalendarError, StoreCalendar, TimeWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use provider::{StaticCalendarProvider, StoreCalendarProvider, UnknownStoreError};
pub use resolve::{ErrorInfo, InvalidRequestError, ResolutionResult, ResolutionService};
pub use slots::{DEFAULT_MAX_RESULTS, DeliverySlot, SEARCH_HORIZON_DAYS, SlotIter};
