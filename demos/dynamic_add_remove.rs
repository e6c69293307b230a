//! # Demo: dynamic_add_remove
//!
//! Demonstrates registry churn at runtime: listeners joining and leaving
//! between passes, a custom listener next to the built-in displays, and
//! re-delivery of the stored reading via [`Station::rebroadcast`].
//!
//! Shows how to:
//! - Implement the [`Listen`] trait for a custom listener.
//! - Mix custom listeners with the built-in displays.
//! - Inspect the [`Delivery`] report returned by each pass.
//!
//! ## Run
//! ```bash
//! cargo run --example dynamic_add_remove --features displays
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use weathercast::{Delivery, Listen, ListenerRef, PhoneDisplay, Reading, Station};

/// A simple console listener that only speaks up on pressure drops.
/// In real life, you could export metrics, ship logs, or trigger alerts.
struct StormWatch;

#[async_trait]
impl Listen for StormWatch {
    async fn on_reading(&self, reading: &Reading) {
        if reading.pressure < 1000.0 {
            println!("[storm-watch] low pressure: {} hPa", reading.pressure);
        }
    }

    fn name(&self) -> &'static str {
        "storm-watch"
    }
}

fn report(tag: &str, delivery: &Delivery) {
    println!(
        "[pass {}] {tag}: attempted={} delivered={} skipped={} failed={}",
        delivery.seq,
        delivery.attempted,
        delivery.delivered,
        delivery.skipped,
        delivery.failed()
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let station = Station::new();

    let phone: ListenerRef = Arc::new(PhoneDisplay);
    station.add_listener(phone.clone()).await;

    let delivery = station.set_reading(Reading::new(21.0, 70.0, 1015.0)).await;
    report("phone only", &delivery);

    // StormWatch joins late; it missed the reading above and is not
    // retroactively notified.
    station.add_listener(Arc::new(StormWatch)).await;
    println!("listeners: {:?}", station.listener_names().await);

    let delivery = station.set_reading(Reading::new(18.5, 85.0, 996.0)).await;
    report("phone + storm-watch", &delivery);

    // Re-deliver the stored reading to the current registry.
    let delivery = station.rebroadcast().await?;
    report("rebroadcast", &delivery);

    // The phone leaves; only storm-watch remains.
    station.remove_listener(&phone).await;
    let delivery = station.set_reading(Reading::new(17.0, 90.0, 989.5)).await;
    report("storm-watch only", &delivery);

    println!("latest: {:?}", station.latest().await?);
    Ok(())
}
