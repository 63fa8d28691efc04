use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobboard_engine::PollTimer;
use tokio::runtime::Handle;

#[tokio::test(start_paused = true)]
async fn timer_ticks_every_period_until_cancelled() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let timer = PollTimer::spawn(&Handle::current(), Duration::from_secs(1), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0, "no tick before the first period");

    tokio::time::sleep(Duration::from_millis(3_000)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);

    timer.cancel();
    assert!(timer.is_cancelled());
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn dropping_timer_stops_ticks() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let timer = PollTimer::spawn(&Handle::current(), Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(250)).await;
    drop(timer);
    let seen = ticks.load(Ordering::SeqCst);
    assert_eq!(seen, 2);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen);
}
