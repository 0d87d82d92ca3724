//! Stdin Sensor Feed
//!
//! Reads JSON-formatted readings from stdin for integration testing, one per
//! line:
//!
//! ```text
//! {"light_level": 12, "accel": {"x": 0.0, "y": 0.01, "z": 0.99}}
//! ```
//!
//! A background task parses lines into a `watch` channel. The sensor side
//! only ever looks at the latest value, so sampling never blocks the tick
//! loop. When the feed ends the last reading stays in place.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{LightSource, MotionSource};
use crate::types::{Acceleration, Reading};

/// Sensor pair backed by the latest fed reading. Clone it to get the second
/// channel of the pair.
#[derive(Debug, Clone)]
pub struct FeedSensors {
    rx: watch::Receiver<Reading>,
}

impl FeedSensors {
    pub const fn new(rx: watch::Receiver<Reading>) -> Self {
        Self { rx }
    }

    /// Spawn the stdin reader task and return the sensor feed.
    pub fn from_stdin() -> (Self, JoinHandle<u64>) {
        Self::spawn(BufReader::new(tokio::io::stdin()))
    }

    /// Spawn a reader task over any line-oriented input.
    pub fn spawn<R>(reader: R) -> (Self, JoinHandle<u64>)
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = watch::channel(Reading::default());
        let handle = tokio::spawn(feed_lines(reader, tx));
        (Self::new(rx), handle)
    }

    fn latest(&self) -> Reading {
        *self.rx.borrow()
    }
}

impl MotionSource for FeedSensors {
    fn acceleration(&mut self) -> Acceleration {
        self.latest().accel
    }
}

impl LightSource for FeedSensors {
    fn light_level(&mut self) -> u16 {
        self.latest().light_level
    }
}

/// Parse readings line by line until EOF. Returns the number of readings
/// accepted.
async fn feed_lines<R>(mut reader: R, tx: watch::Sender<Reading>) -> u64
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::with_capacity(256);
    let mut accepted = 0u64;
    let mut rejected = 0u64;

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("[FeedSensors] Read error: {}", e);
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<Reading>(trimmed) {
            Ok(reading) => {
                accepted += 1;
                debug!(light = reading.light_level, "[FeedSensors] reading");
                // Receivers dropped means the node is gone.
                if tx.send(reading).is_err() {
                    break;
                }
            }
            Err(e) => {
                rejected += 1;
                warn!("[FeedSensors] Failed to parse reading: {}", e);
            }
        }
    }

    info!(accepted, rejected, "[FeedSensors] Input ended, holding last reading");
    accepted
}
