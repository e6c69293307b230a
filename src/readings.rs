//! # Weather readings broadcast by the station.
//!
//! [`Reading`] is the immutable payload delivered to listeners: one
//! snapshot of temperature, humidity and pressure. A station stores the
//! most recent reading and hands every listener a reference to that
//! exact value, never a partially updated one.
//!
//! ## Example
//! ```rust
//! use weathercast::Reading;
//!
//! let reading = Reading::new(22.5, 65.0, 1013.2);
//! assert_eq!(reading.temperature, 22.5);
//!
//! // Adjust a single field without touching the others.
//! let cooler = reading.with_temperature(19.0);
//! assert_eq!(cooler.humidity, 65.0);
//! ```

/// One immutable weather snapshot.
///
/// Values are plain `f64`s in conventional units:
/// - `temperature` — degrees Celsius
/// - `humidity` — relative humidity, percent
/// - `pressure` — hectopascals
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
}

impl Reading {
    /// Creates a reading from the three measurements.
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }

    /// Returns a copy with the temperature replaced.
    #[inline]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns a copy with the humidity replaced.
    #[inline]
    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = humidity;
        self
    }

    /// Returns a copy with the pressure replaced.
    #[inline]
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }
}
