//! # Broadcast subject.
//!
//! [`Station`] holds the latest reading and the ordered listener
//! registry, and performs fan-out delivery on every state change.
//! [`Delivery`] is the per-pass report it returns.

mod delivery;
mod station;

pub use delivery::Delivery;
pub use station::Station;
