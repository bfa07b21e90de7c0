//! Countdown for Take Mode and the one-second cadence that drives it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Remaining time is "urgent" at or below this share of the total.
const URGENT_PERCENT: u64 = 30;

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running(u32),
    /// The countdown just reached zero. Reported exactly once.
    Expired,
    /// The countdown was already at zero; nothing changed.
    Stopped,
}

/// Seconds-remaining counter. Zero is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
}

impl Countdown {
    pub fn from_minutes(minutes: u32) -> Self {
        let total_secs = minutes.saturating_mul(60);
        Self {
            total_secs,
            remaining_secs: total_secs,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining_secs {
            0 => TickOutcome::Stopped,
            1 => {
                self.remaining_secs = 0;
                TickOutcome::Expired
            }
            n => {
                self.remaining_secs = n - 1;
                TickOutcome::Running(self.remaining_secs)
            }
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn is_urgent(&self) -> bool {
        u64::from(self.remaining_secs) * 100 <= u64::from(self.total_secs) * URGENT_PERCENT
    }

    /// `MM:SS`, zero padded.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Handle to the running one-second cadence.
///
/// Each tick sends `make_event()` on the given channel. Dropping the handle
/// stops the cadence; no tick is sent afterwards.
pub struct Ticker {
    task: JoinHandle<()>,
}

impl Ticker {
    pub fn start<E, F>(events: mpsc::UnboundedSender<E>, make_event: F) -> Self
    where
        E: Send + 'static,
        F: Fn() -> E + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            // Catch up after a stall rather than stretching the exam.
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if events.send(make_event()).is_err() {
                    break;
                }
            }
        });
        tracing::debug!("Countdown cadence started");
        Self { task }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Countdown cadence stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_formatting() {
        assert_eq!(format_clock(125), "02:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(59), "00:59");
    }

    #[test]
    fn test_expired_reported_once() {
        let mut countdown = Countdown::from_minutes(1);
        for expected in (1..60).rev() {
            assert_eq!(countdown.tick(), TickOutcome::Running(expected));
        }
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.tick(), TickOutcome::Stopped);
        assert_eq!(countdown.tick(), TickOutcome::Stopped);
        assert_eq!(countdown.display(), "00:00");
        assert!(countdown.is_expired());
    }

    #[test]
    fn test_urgent_threshold_is_thirty_percent() {
        let mut countdown = Countdown::from_minutes(10);
        while countdown.remaining_secs() > 181 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining_secs(), 181);
        assert!(!countdown.is_urgent());
        countdown.tick();
        assert_eq!(countdown.remaining_secs(), 180);
        assert!(countdown.is_urgent());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_fires_every_second() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        let _ticker = Ticker::start(tx, || ());

        for _ in 0..3 {
            rx.recv().await.unwrap();
        }
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ticker_stops_sending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(tx, || ());
        rx.recv().await.unwrap();

        ticker.cancel();
        assert!(rx.recv().await.is_none());
    }
}
