//! # Demo: weather_displays
//!
//! The classic two-display scenario: a phone and a desktop display both
//! follow the station, one is unplugged, and the next reading reaches
//! only the survivor.
//!
//! Shows how to:
//! - Register the built-in [`PhoneDisplay`] / [`DesktopDisplay`] listeners.
//! - Push readings with [`Station::set_reading`].
//! - Remove a listener by handle and observe it stops receiving updates.
//!
//! ## Flow
//! ```text
//! Station::new()
//!     ├─► add_listener(phone)
//!     ├─► add_listener(desktop)
//!     ├─► set_reading(22.5, 65.0, 1013.2)   → phone, then desktop
//!     ├─► set_reading(23.0, 60.0, 1012.8)   → phone, then desktop
//!     ├─► remove_listener(desktop)
//!     └─► set_reading(24.5, 55.0, 1010.0)   → phone only
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example weather_displays --features displays
//! ```

use std::sync::Arc;

use weathercast::{DesktopDisplay, ListenerRef, PhoneDisplay, Reading, Station};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let station = Station::new();

    let phone: ListenerRef = Arc::new(PhoneDisplay);
    let desktop: ListenerRef = Arc::new(DesktopDisplay);

    station.add_listener(phone).await;
    station.add_listener(desktop.clone()).await;

    station.set_reading(Reading::new(22.5, 65.0, 1013.2)).await;
    station.set_reading(Reading::new(23.0, 60.0, 1012.8)).await;

    println!("-- unplugging the desktop display --");
    station.remove_listener(&desktop).await;

    let delivery = station.set_reading(Reading::new(24.5, 55.0, 1010.0)).await;
    println!(
        "last pass: seq={} delivered={} (desktop got nothing)",
        delivery.seq, delivery.delivered
    );

    Ok(())
}
