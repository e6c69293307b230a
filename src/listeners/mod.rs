//! # Reading listeners.
//!
//! This module provides the [`Listen`] trait and built-in display
//! implementations for consuming readings broadcast by a
//! [`Station`](crate::Station).
//!
//! ## Architecture
//! ```text
//! Reading flow:
//!   caller ── set_reading(Reading) ──► Station ──► deliver to all listeners
//!                                                      │
//!                                                      ├──► Listen::on_reading(&Reading)
//!                                                      │         │
//!                                                      │    ┌────┴─────┬──────────┬───────┐
//!                                                      │    ▼          ▼          ▼       ▼
//!                                                      │  PhoneDisplay DesktopD.  Custom  ...
//!                                                      │
//!                                                      └──► Delivery (per-pass report)
//! ```
//!
//! ## Listener types
//! - **Built-in displays** - render readings to stdout (`displays` feature)
//! - **Custom listeners** - anything implementing [`Listen`] (alerts,
//!   metrics, recorders)

#[cfg(feature = "displays")]
mod displays;
mod listener;

#[cfg(feature = "displays")]
pub use displays::{DesktopDisplay, PhoneDisplay};
pub use listener::{Listen, ListenerRef};
