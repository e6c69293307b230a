//! # Simple display listeners for debugging and demos.
//!
//! [`PhoneDisplay`] and [`DesktopDisplay`] print readings to stdout in
//! two independent human-readable formats. They are primarily useful for
//! development, debugging, and the bundled demos.
//!
//! ## Output format
//! ```text
//! [phone] temp=22.5°C humidity=65% pressure=1013.2hPa
//! [desktop] weather update: 22.5°C / 65% RH / 1013.2 hPa
//! ```
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use weathercast::{PhoneDisplay, Station};
//! # async fn demo() {
//! let station = Station::new();
//! station.add_listener(Arc::new(PhoneDisplay)).await;
//! // Every stored reading is now printed in the phone format.
//! # }
//! ```

use async_trait::async_trait;

use crate::listeners::listener::Listen;
use crate::readings::Reading;

/// Compact single-line stdout rendering.
///
/// Enabled via the `displays` feature. Not intended for production use -
/// implement a custom [`Listen`] for structured logging or metrics.
pub struct PhoneDisplay;

#[async_trait]
impl Listen for PhoneDisplay {
    async fn on_reading(&self, r: &Reading) {
        println!(
            "[phone] temp={}°C humidity={}% pressure={}hPa",
            r.temperature, r.humidity, r.pressure
        );
    }

    fn name(&self) -> &'static str {
        "phone"
    }
}

/// Verbose stdout rendering.
///
/// Enabled via the `displays` feature. Renders the same reading as
/// [`PhoneDisplay`] but in a different format, which makes delivery
/// order visible when both are registered.
pub struct DesktopDisplay;

#[async_trait]
impl Listen for DesktopDisplay {
    async fn on_reading(&self, r: &Reading) {
        println!(
            "[desktop] weather update: {}°C / {}% RH / {} hPa",
            r.temperature, r.humidity, r.pressure
        );
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}
