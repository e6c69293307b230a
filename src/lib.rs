//! # weathercast
//!
//! **Weathercast** is a lightweight broadcast-subject library for Rust.
//!
//! It provides a [`Station`] that owns an ordered registry of listeners
//! and the latest weather [`Reading`], and synchronously fans every state
//! change out to all registered listeners. The crate is designed as a
//! building block for in-process notification plumbing: displays,
//! alerts, recorders.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    caller    │   │    caller    │   │    caller    │
//!     │ set_reading  │   │ add_listener │   │ rebroadcast  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Station (broadcast subject)                                      │
//! │  - registry: ordered Vec of listener handles                      │
//! │  - current:  latest stored Reading                                │
//! │  - pass_seq: monotonic pass counter                               │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        │ on_reading       │ on_reading       │ on_reading
//!        │ (1st registered) │ (2nd registered) │ (last registered)
//!        ▼                  ▼                  ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ PhoneDisplay │   │ DesktopDisp. │   │    custom    │
//! └──────────────┘   └──────────────┘   └──────────────┘
//!        └──────────────────┴──────────────────┘
//!                           ▼
//!                  Delivery (per-pass report:
//!                  seq, delivered, skipped, failures)
//! ```
//!
//! ### Delivery pass
//! ```text
//! set_reading(r)
//!   ├─► store r (listeners and latest() always see a fully stored value)
//!   ├─► snapshot the registry (stable against concurrent add/remove)
//!   └─► for each occurrence, in registration order:
//!         ├─► removed since the snapshot? → skipped
//!         ├─► await on_reading(&r)
//!         └─► panic? → captured in Delivery::failures, pass continues
//! ```
//!
//! ## Guarantees
//! | Guarantee        | Meaning                                                               |
//! |------------------|-----------------------------------------------------------------------|
//! | **Ordering**     | Delivery order is registration order, every pass.                     |
//! | **Exactly once** | One `on_reading` call per registered occurrence per pass.             |
//! | **Synchronous**  | The whole pass completes before `set_reading` returns.               |
//! | **Isolation**    | A panicking listener never denies delivery to the listeners after it. |
//! | **No ownership** | The station holds shared handles; callers own listener lifetimes.     |
//!
//! ## Optional features
//! - `displays`: exports the built-in stdout displays
//!   [`PhoneDisplay`] / [`DesktopDisplay`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use weathercast::{Listen, Reading, Station};
//!
//! struct HeatAlert;
//!
//! #[async_trait]
//! impl Listen for HeatAlert {
//!     async fn on_reading(&self, reading: &Reading) {
//!         if reading.temperature > 30.0 {
//!             println!("heat warning: {}°C", reading.temperature);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "heat-alert" }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let station = Station::new();
//!     station.add_listener(Arc::new(HeatAlert)).await;
//!
//!     let delivery = station.set_reading(Reading::new(31.5, 40.0, 1008.0)).await;
//!     assert_eq!(delivery.delivered, 1);
//!     assert!(delivery.is_clean());
//!
//!     assert_eq!(station.latest().await?.temperature, 31.5);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod listeners;
mod readings;

// ---- Public re-exports ----

pub use core::{Delivery, Station};
pub use error::{NotifyError, StationError};
pub use listeners::{Listen, ListenerRef};
pub use readings::Reading;

// Optional: expose the built-in stdout displays (demo/reference).
// Enable with: `--features displays`
#[cfg(feature = "displays")]
pub use listeners::{DesktopDisplay, PhoneDisplay};
