//! # Listener trait.
//!
//! Provides [`Listen`], the extension point for plugging reading
//! consumers into a [`Station`](crate::Station).
//!
//! Each registered listener gets:
//! - **Its turn in every pass** (delivery order = registration order)
//! - **Exactly one call per pass** with the reading that triggered it
//! - **Panic isolation** (a panic is caught and recorded in the pass
//!   [`Delivery`](crate::Delivery); later listeners still run)
//!
//! ## Rules
//! - The station holds a shared handle ([`ListenerRef`]) but never owns
//!   the listener: the registering caller keeps its own handle and
//!   controls the listener's lifetime.
//! - Identity is reference equality. Removing a listener means passing
//!   back the same handle that was registered, not an equal-looking one.
//! - A reading reaching `on_reading` is always the fully stored value;
//!   listeners never observe a partial update.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use weathercast::{Listen, Reading};
//!
//! struct FrostAlert;
//!
//! #[async_trait]
//! impl Listen for FrostAlert {
//!     async fn on_reading(&self, reading: &Reading) {
//!         if reading.temperature < 0.0 {
//!             // raise an alert, export a metric, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "frost-alert" }  // prefer short, descriptive names
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::readings::Reading;

/// Shared handle to a registered listener.
///
/// The station clones this handle into its registry; the caller keeps
/// the original for later removal (removal matches by reference).
pub type ListenerRef = Arc<dyn Listen>;

/// Consumer of weather readings.
///
/// Implementations are substitutable: the station treats every listener
/// identically regardless of what it does with the reading.
///
/// ### Implementation requirements
/// - Handle errors internally; do not panic. A panic is caught and
///   reported in the pass [`Delivery`](crate::Delivery), and delivery
///   continues with the remaining listeners.
/// - `on_reading` is awaited before the next listener's turn, so slow
///   work delays the rest of the pass; keep it short or hand off.
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Consumes a single reading.
    ///
    /// Called once per delivery pass, on the caller's task, in
    /// registration order. No return value is consumed.
    async fn on_reading(&self, reading: &Reading);

    /// Returns the listener name used in delivery reports and failure records.
    ///
    /// Prefer short, descriptive names (e.g., "phone", "desktop", "audit").
    /// The default uses `type_name::<Self>()`, which can be verbose -
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
