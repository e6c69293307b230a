//! # Broadcast station - ordered fan-out of readings to listeners.
//!
//! [`Station`] owns the listener registry and the latest stored reading.
//! Every state change triggers one delivery pass over the registry.
//!
//! ## Architecture
//! ```text
//! set_reading(r)
//!     ├─► store r as the latest reading
//!     └─► snapshot registry ──► for each occurrence, in registration order:
//!             ├─ still registered? ── no ──► counted as skipped
//!             └─ yes ─► await on_reading(&r)
//!                           └─ panic? ──► captured in Delivery::failures,
//!                                         pass continues with the rest
//! ```
//!
//! ## Rules
//! - **Registration order is delivery order**: the registry is an ordered
//!   sequence, new listeners append at the end and are delivered last.
//! - **Exactly one call per occurrence per pass**: each occurrence in the
//!   snapshot is invoked once with the stored reading, sequentially; a
//!   listener invocation completes before the next one starts.
//! - **Stable snapshot**: a pass iterates a copy of the registry, so
//!   concurrent `add_listener`/`remove_listener` calls can never skip,
//!   duplicate, or invalidate the iteration.
//! - **Mid-pass removal wins before the turn**: an occurrence removed
//!   after the snapshot but before its turn is skipped; once delivered,
//!   delivery cannot be retracted. Listeners added mid-pass wait for the
//!   next pass.
//! - **Failure isolation**: a panicking listener is recorded in the pass
//!   [`Delivery`] and never denies delivery to the listeners after it.
//! - **No locks across listener calls**: a listener may freely call back
//!   into the same station (`add_listener`, `remove_listener`, `latest`)
//!   from inside `on_reading`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::core::delivery::Delivery;
use crate::error::{NotifyError, StationError};
use crate::listeners::ListenerRef;
use crate::readings::Reading;

/// Broadcast subject for weather readings.
///
/// Holds a non-owning registry of listeners (insertion order significant,
/// duplicates accepted) and the last stored [`Reading`]. Callers own
/// their listeners; the station only keeps shared handles and matches
/// removals by reference.
///
/// ### Lifecycle
/// Created empty (no listeners, no reading). Listeners are added and
/// removed at any time; there is no shutdown protocol beyond dropping
/// the station, which releases the registry.
pub struct Station {
    /// Ordered registry. Insertion order is the delivery order.
    listeners: RwLock<Vec<ListenerRef>>,
    /// Latest stored reading, `None` until the first `set_reading`.
    current: RwLock<Option<Reading>>,
    /// Pass counter stamped onto each [`Delivery`].
    pass_seq: AtomicU64,
}

impl Station {
    /// Creates an empty station.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            pass_seq: AtomicU64::new(0),
        }
    }

    /// Appends a listener at the end of the registry.
    ///
    /// No precondition: duplicates and previously removed handles may be
    /// re-added. The new listener is delivered last on subsequent passes
    /// and is **not** retroactively notified of the current reading.
    pub async fn add_listener(&self, listener: ListenerRef) {
        let mut listeners = self.listeners.write().await;
        listeners.push(listener);
    }

    /// Removes **all** occurrences of the listener from the registry.
    ///
    /// Matches by reference (`Arc::ptr_eq`): only the handle that was
    /// registered matches, never an equal-looking one. Removing a
    /// listener that is not registered is a no-op. Relative order of the
    /// remaining listeners is preserved.
    pub async fn remove_listener(&self, listener: &ListenerRef) {
        let mut listeners = self.listeners.write().await;
        listeners.retain(|registered| !Arc::ptr_eq(registered, listener));
    }

    /// Stores the reading, then delivers it to every registered listener.
    ///
    /// The reading is stored **before** delivery begins, so listeners
    /// (and concurrent callers of [`latest`](Self::latest)) always
    /// observe the fully stored value. Delivery is synchronous: every
    /// occurrence in the registry at the moment the pass snapshot is
    /// taken gets exactly one `on_reading` call with this exact reading,
    /// in registration order, before this method returns.
    ///
    /// ### Failure policy
    /// A panicking listener is isolated: the panic is captured as a
    /// [`NotifyError`] in the returned [`Delivery`] and the pass
    /// continues with the remaining listeners.
    pub async fn set_reading(&self, reading: Reading) -> Delivery {
        {
            let mut current = self.current.write().await;
            *current = Some(reading);
        }
        self.notify(reading).await
    }

    /// Re-delivers the latest stored reading without changing it.
    ///
    /// Fails with [`StationError::NoReading`] if no reading was ever
    /// stored.
    pub async fn rebroadcast(&self) -> Result<Delivery, StationError> {
        let reading = self.latest().await?;
        Ok(self.notify(reading).await)
    }

    /// Returns the latest stored reading.
    ///
    /// Fails with [`StationError::NoReading`] before the first
    /// [`set_reading`](Self::set_reading); the station never hands out a
    /// garbage value.
    pub async fn latest(&self) -> Result<Reading, StationError> {
        let current = self.current.read().await;
        (*current).ok_or(StationError::NoReading)
    }

    /// Returns listener names in registration (delivery) order.
    ///
    /// Duplicate occurrences appear once per registration.
    pub async fn listener_names(&self) -> Vec<&'static str> {
        let listeners = self.listeners.read().await;
        listeners.iter().map(|l| l.name()).collect()
    }

    /// Returns the number of registered listener occurrences.
    pub async fn listener_count(&self) -> usize {
        self.listeners.read().await.len()
    }

    /// Returns true if no listener is registered.
    pub async fn is_empty(&self) -> bool {
        self.listeners.read().await.is_empty()
    }

    /// Runs one delivery pass over a snapshot of the registry.
    async fn notify(&self, reading: Reading) -> Delivery {
        let snapshot: Vec<ListenerRef> = {
            let listeners = self.listeners.read().await;
            listeners.clone()
        };

        let seq = self.pass_seq.fetch_add(1, AtomicOrdering::Relaxed);
        let mut delivery = Delivery::new(seq, snapshot.len());

        for listener in snapshot {
            // Honor removals that landed after the snapshot was taken.
            if !self.is_registered(&listener).await {
                delivery.skipped += 1;
                continue;
            }

            let fut = listener.on_reading(&reading);
            match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                Ok(()) => delivery.delivered += 1,
                Err(panic_err) => {
                    let info = {
                        let any = &*panic_err;
                        if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        }
                    };
                    delivery.failures.push(NotifyError::ListenerPanicked {
                        listener: listener.name(),
                        info,
                    });
                }
            }
        }

        delivery
    }

    /// Returns true if the handle is currently in the registry.
    async fn is_registered(&self, listener: &ListenerRef) -> bool {
        let listeners = self.listeners.read().await;
        listeners.iter().any(|l| Arc::ptr_eq(l, listener))
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Listen;

    use std::sync::Mutex;

    use async_trait::async_trait;

    type Log = Arc<Mutex<Vec<(&'static str, Reading)>>>;

    fn new_log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// Test double that records every reading it receives.
    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl Recorder {
        fn arc(label: &'static str, log: Log) -> ListenerRef {
            Arc::new(Self { label, log })
        }
    }

    #[async_trait]
    impl Listen for Recorder {
        async fn on_reading(&self, reading: &Reading) {
            self.log.lock().unwrap().push((self.label, *reading));
        }

        fn name(&self) -> &'static str {
            self.label
        }
    }

    /// Panics on every delivery.
    struct Panicker;

    #[async_trait]
    impl Listen for Panicker {
        async fn on_reading(&self, _reading: &Reading) {
            panic!("boom");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    /// Removes `target` from the station when invoked.
    struct RemovesOther {
        station: Arc<Station>,
        target: ListenerRef,
    }

    #[async_trait]
    impl Listen for RemovesOther {
        async fn on_reading(&self, _reading: &Reading) {
            self.station.remove_listener(&self.target).await;
        }

        fn name(&self) -> &'static str {
            "remover"
        }
    }

    /// Registers `extra` on the station when invoked.
    struct AddsOther {
        station: Arc<Station>,
        extra: ListenerRef,
    }

    #[async_trait]
    impl Listen for AddsOther {
        async fn on_reading(&self, _reading: &Reading) {
            self.station.add_listener(self.extra.clone()).await;
        }

        fn name(&self) -> &'static str {
            "adder"
        }
    }

    fn entries_for(log: &Log, label: &'static str) -> Vec<Reading> {
        log.lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == label)
            .map(|(_, r)| *r)
            .collect()
    }

    #[tokio::test]
    async fn test_registry_order_matches_add_order() {
        let station = Station::new();
        let log = new_log();

        station.add_listener(Recorder::arc("a", log.clone())).await;
        station.add_listener(Recorder::arc("b", log.clone())).await;
        station.add_listener(Recorder::arc("c", log.clone())).await;

        assert_eq!(station.listener_names().await, vec!["a", "b", "c"]);
        assert_eq!(station.listener_count().await, 3);
        assert!(!station.is_empty().await);
    }

    #[tokio::test]
    async fn test_delivery_in_registration_order_exactly_once() {
        let station = Station::new();
        let log = new_log();

        station.add_listener(Recorder::arc("a", log.clone())).await;
        station.add_listener(Recorder::arc("b", log.clone())).await;

        let reading = Reading::new(22.5, 65.0, 1013.2);
        let delivery = station.set_reading(reading).await;

        assert_eq!(delivery.attempted, 2);
        assert_eq!(delivery.delivered, 2);
        assert!(delivery.is_clean());
        assert_eq!(
            *log.lock().unwrap(),
            vec![("a", reading), ("b", reading)],
            "delivery order must match registration order"
        );
    }

    #[tokio::test]
    async fn test_remove_then_set_skips_removed_listener() {
        // The classic two-display scenario.
        let station = Station::new();
        let log = new_log();

        let a = Recorder::arc("a", log.clone());
        let b = Recorder::arc("b", log.clone());
        station.add_listener(a.clone()).await;
        station.add_listener(b.clone()).await;

        let first = Reading::new(22.5, 65.0, 1013.2);
        station.set_reading(first).await;

        station.remove_listener(&b).await;

        let second = Reading::new(24.5, 55.0, 1010.0);
        let delivery = station.set_reading(second).await;

        assert_eq!(delivery.attempted, 1);
        assert_eq!(entries_for(&log, "a"), vec![first, second]);
        assert_eq!(entries_for(&log, "b"), vec![first], "b must not see the second reading");
    }

    #[tokio::test]
    async fn test_remove_unregistered_listener_is_noop() {
        let station = Station::new();
        let log = new_log();

        station.add_listener(Recorder::arc("a", log.clone())).await;
        let stranger = Recorder::arc("stranger", log.clone());

        station.remove_listener(&stranger).await;
        // Repeating the removal stays a no-op.
        station.remove_listener(&stranger).await;

        assert_eq!(station.listener_names().await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_removal_matches_by_reference_not_by_looks() {
        let station = Station::new();
        let log = new_log();

        let registered = Recorder::arc("twin", log.clone());
        let lookalike = Recorder::arc("twin", log.clone());
        station.add_listener(registered).await;

        station.remove_listener(&lookalike).await;

        assert_eq!(station.listener_count().await, 1, "a distinct allocation must not match");
    }

    #[tokio::test]
    async fn test_readd_restores_delivery_prospectively() {
        let station = Station::new();
        let log = new_log();

        let a = Recorder::arc("a", log.clone());
        station.add_listener(a.clone()).await;

        let first = Reading::new(1.0, 2.0, 3.0);
        station.set_reading(first).await;

        station.remove_listener(&a).await;
        let second = first.with_temperature(10.0);
        station.set_reading(second).await;

        station.add_listener(a.clone()).await;
        let third = first.with_temperature(20.0);
        station.set_reading(third).await;

        // The missed reading is not replayed on re-registration.
        assert_eq!(entries_for(&log, "a"), vec![first, third]);
    }

    #[tokio::test]
    async fn test_duplicate_registration_delivers_per_occurrence() {
        let station = Station::new();
        let log = new_log();

        let a = Recorder::arc("a", log.clone());
        station.add_listener(a.clone()).await;
        station.add_listener(a.clone()).await;

        let reading = Reading::new(5.0, 50.0, 1000.0);
        let delivery = station.set_reading(reading).await;

        assert_eq!(delivery.delivered, 2);
        assert_eq!(entries_for(&log, "a"), vec![reading, reading]);

        // A single removal drops every occurrence at once.
        station.remove_listener(&a).await;
        assert!(station.is_empty().await);

        let delivery = station.set_reading(reading.with_humidity(40.0)).await;
        assert_eq!(delivery.attempted, 0);
    }

    #[tokio::test]
    async fn test_set_reading_without_listeners_updates_latest() {
        let station = Station::new();

        let first = Reading::new(1.0, 1.0, 1.0);
        let second = Reading::new(2.0, 2.0, 2.0);
        let d1 = station.set_reading(first).await;
        let d2 = station.set_reading(second).await;

        assert_eq!(d1.attempted, 0);
        assert_eq!(d2.attempted, 0);
        assert_eq!(station.latest().await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_latest_before_first_reading_is_explicit_error() {
        let station = Station::new();

        let err = station.latest().await.unwrap_err();
        assert!(matches!(err, StationError::NoReading));
        assert_eq!(err.as_label(), "station_no_reading");
    }

    #[tokio::test]
    async fn test_panicking_listener_does_not_deny_delivery_to_others() {
        let station = Station::new();
        let log = new_log();

        station.add_listener(Recorder::arc("a", log.clone())).await;
        station.add_listener(Arc::new(Panicker)).await;
        station.add_listener(Recorder::arc("b", log.clone())).await;

        let reading = Reading::new(9.0, 90.0, 990.0);
        let delivery = station.set_reading(reading).await;

        assert_eq!(delivery.attempted, 3);
        assert_eq!(delivery.delivered, 2);
        assert_eq!(delivery.failed(), 1);
        assert!(!delivery.is_clean());

        let failure = &delivery.failures[0];
        assert_eq!(failure.as_label(), "listener_panicked");
        assert_eq!(failure.listener(), "panicker");
        assert!(failure.as_message().contains("boom"));

        // Both healthy listeners still received the pass.
        assert_eq!(entries_for(&log, "a"), vec![reading]);
        assert_eq!(entries_for(&log, "b"), vec![reading]);

        // The station stays usable after a dirty pass.
        let delivery = station.set_reading(reading.with_pressure(980.0)).await;
        assert_eq!(delivery.delivered, 2);
    }

    #[tokio::test]
    async fn test_listener_removed_mid_pass_before_its_turn_is_skipped() {
        let station = Arc::new(Station::new());
        let log = new_log();

        let b = Recorder::arc("b", log.clone());
        let remover: ListenerRef = Arc::new(RemovesOther {
            station: station.clone(),
            target: b.clone(),
        });
        station.add_listener(remover).await;
        station.add_listener(b).await;

        let delivery = station.set_reading(Reading::new(3.0, 30.0, 930.0)).await;

        assert_eq!(delivery.attempted, 2);
        assert_eq!(delivery.delivered, 1, "only the remover ran");
        assert_eq!(delivery.skipped, 1, "b was removed before its turn");
        assert!(entries_for(&log, "b").is_empty());
    }

    #[tokio::test]
    async fn test_listener_added_mid_pass_waits_for_next_pass() {
        let station = Arc::new(Station::new());
        let log = new_log();

        let late = Recorder::arc("late", log.clone());
        let adder: ListenerRef = Arc::new(AddsOther {
            station: station.clone(),
            extra: late,
        });
        station.add_listener(adder).await;

        let first = Reading::new(1.0, 10.0, 910.0);
        let delivery = station.set_reading(first).await;
        assert_eq!(delivery.attempted, 1);
        assert!(entries_for(&log, "late").is_empty(), "not part of the in-flight pass");

        let second = first.with_temperature(2.0);
        station.set_reading(second).await;
        assert_eq!(entries_for(&log, "late"), vec![second]);
    }

    #[tokio::test]
    async fn test_rebroadcast_redelivers_latest() {
        let station = Station::new();
        let log = new_log();

        assert!(matches!(
            station.rebroadcast().await,
            Err(StationError::NoReading)
        ));

        let reading = Reading::new(7.0, 70.0, 970.0);
        station.set_reading(reading).await;
        station.add_listener(Recorder::arc("a", log.clone())).await;

        let delivery = station.rebroadcast().await.unwrap();
        assert_eq!(delivery.delivered, 1);
        assert_eq!(entries_for(&log, "a"), vec![reading]);
        assert_eq!(station.latest().await.unwrap(), reading);
    }

    #[tokio::test]
    async fn test_pass_seq_increases_per_pass() {
        let station = Station::new();

        let d0 = station.set_reading(Reading::new(0.0, 0.0, 0.0)).await;
        let d1 = station.set_reading(Reading::new(1.0, 1.0, 1.0)).await;
        let d2 = station.rebroadcast().await.unwrap();

        assert_eq!(d0.seq, 0);
        assert_eq!(d1.seq, 1);
        assert_eq!(d2.seq, 2);
    }

    #[tokio::test]
    async fn test_listener_sees_already_stored_reading() {
        /// Asserts the station already reports the reading it is delivering.
        struct ChecksLatest {
            station: Arc<Station>,
        }

        #[async_trait]
        impl Listen for ChecksLatest {
            async fn on_reading(&self, reading: &Reading) {
                let latest = self.station.latest().await.unwrap();
                assert_eq!(latest, *reading);
            }

            fn name(&self) -> &'static str {
                "checks-latest"
            }
        }

        let station = Arc::new(Station::new());
        station
            .add_listener(Arc::new(ChecksLatest {
                station: station.clone(),
            }))
            .await;

        let delivery = station.set_reading(Reading::new(4.0, 40.0, 940.0)).await;
        assert!(delivery.is_clean());
        assert_eq!(delivery.delivered, 1);
    }
}
