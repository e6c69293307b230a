//! Error types used by the station and its delivery passes.
//!
//! This module defines two main error enums:
//!
//! - [`StationError`] — usage errors raised by the station itself.
//! - [`NotifyError`] — per-listener failures recorded during a delivery
//!   pass.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. Note that a [`NotifyError`] never aborts a pass: the
//! station isolates the failing listener, keeps delivering to the rest,
//! and returns the collected failures in
//! [`Delivery::failures`](crate::Delivery::failures).

use thiserror::Error;

/// # Usage errors raised by the station.
///
/// None of these are fatal: the station remains fully usable after any
/// of them.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StationError {
    /// The station was queried before any reading was ever stored.
    #[error("no reading has been recorded yet")]
    NoReading,
}

impl StationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use weathercast::StationError;
    ///
    /// assert_eq!(StationError::NoReading.as_label(), "station_no_reading");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StationError::NoReading => "station_no_reading",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StationError::NoReading => "queried before the first reading was stored".to_string(),
        }
    }
}

/// # Per-listener failures captured during a delivery pass.
///
/// A failing listener only affects its own slot in the pass; the station
/// continues with the remaining listeners and aggregates these records
/// in the returned [`Delivery`](crate::Delivery).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NotifyError {
    /// A listener panicked while handling a reading.
    #[error("listener '{listener}' panicked during delivery: {info}")]
    ListenerPanicked {
        /// Name of the listener, as reported by [`Listen::name`](crate::Listen::name).
        listener: &'static str,
        /// Panic payload, downcast to a message where possible.
        info: String,
    },
}

impl NotifyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use weathercast::NotifyError;
    ///
    /// let err = NotifyError::ListenerPanicked { listener: "phone", info: "boom".into() };
    /// assert_eq!(err.as_label(), "listener_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::ListenerPanicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            NotifyError::ListenerPanicked { listener, info } => {
                format!("listener={listener} panic={info}")
            }
        }
    }

    /// Returns the name of the listener this failure belongs to.
    pub fn listener(&self) -> &'static str {
        match self {
            NotifyError::ListenerPanicked { listener, .. } => listener,
        }
    }
}
