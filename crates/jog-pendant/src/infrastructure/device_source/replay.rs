//! Line-oriented replay device.
//!
//! Reads pendant events from any [`BufRead`] source (stdin in the binary, a
//! script file or an in-memory buffer in tests) on a background thread and
//! surfaces them through the normal poll/drain interface.
//!
//! # Line format
//!
//! ```text
//! # select X, then turn the wheel one tick forward
//! button 7 1
//! button 7 0
//! axis x 1.05
//! ```
//!
//! Blank lines and `#` comments are ignored.  Malformed lines are logged and
//! skipped.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use jog_core::input::UnknownAxisName;
use jog_core::{AxisId, ButtonId, RawEvent};
use thiserror::Error;
use tracing::{info, warn};

use super::{DeviceError, InputDevice};

/// Error type for a single malformed replay line.
#[derive(Debug, Error, PartialEq)]
pub enum ReplayParseError {
    #[error("unknown event kind {0:?}, expected \"button\" or \"axis\"")]
    UnknownKind(String),
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid button id {0:?}")]
    InvalidButtonId(String),
    #[error(transparent)]
    UnknownAxis(#[from] UnknownAxisName),
    #[error("invalid value {0:?}")]
    InvalidValue(String),
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),
}

/// Parses one replay line.  Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a [`ReplayParseError`] describing the first problem on the line.
pub fn parse_event_line(line: &str) -> Result<Option<RawEvent>, ReplayParseError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let kind = fields.next().ok_or(ReplayParseError::MissingField("event kind"))?;
    let id = fields.next().ok_or(ReplayParseError::MissingField("id"))?;
    let value = fields.next().ok_or(ReplayParseError::MissingField("value"))?;
    if let Some(extra) = fields.next() {
        return Err(ReplayParseError::TrailingInput(extra.to_string()));
    }

    let value: f32 = value
        .parse()
        .map_err(|_| ReplayParseError::InvalidValue(value.to_string()))?;

    let event = match kind.to_ascii_lowercase().as_str() {
        "button" => {
            let id: ButtonId = id
                .parse()
                .map_err(|_| ReplayParseError::InvalidButtonId(id.to_string()))?;
            RawEvent::Button { id, value }
        }
        "axis" => RawEvent::Axis {
            id: id.parse::<AxisId>()?,
            value,
        },
        other => return Err(ReplayParseError::UnknownKind(other.to_string())),
    };
    Ok(Some(event))
}

/// An [`InputDevice`] fed from a line reader.
pub struct ReplayDevice {
    name: String,
    rx: Receiver<std::io::Result<RawEvent>>,
    queued: Vec<RawEvent>,
    exhausted: bool,
}

impl ReplayDevice {
    /// Spawns the reader thread and returns the device.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the reader thread cannot be spawned.
    pub fn spawn<R>(name: &str, reader: R) -> std::io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::Builder::new()
            .name("jog-replay".to_string())
            .spawn(move || {
                for (index, line) in reader.lines().enumerate() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            // Surfaced by the next poll; nothing more will arrive.
                            let _ = tx.send(Err(e));
                            break;
                        }
                    };
                    match parse_event_line(&line) {
                        Ok(Some(event)) => {
                            if tx.send(Ok(event)).is_err() {
                                // Device dropped – session is gone.
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!(line = index + 1, "skipping replay line: {e}"),
                    }
                }
            })?;

        Ok(Self {
            name: name.to_string(),
            rx,
            queued: Vec::new(),
            exhausted: false,
        })
    }
}

impl InputDevice for ReplayDevice {
    fn name(&self) -> &str {
        &self.name
    }

    /// Moves everything the reader thread has produced into the queue.
    ///
    /// A read error is reported once as [`DeviceError::Io`]; events received
    /// before it stay queued for the next drain.
    fn poll(&mut self) -> Result<(), DeviceError> {
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => self.queued.push(event),
                Ok(Err(e)) => {
                    self.exhausted = true;
                    return Err(DeviceError::Io(e));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.exhausted {
                        info!(device = %self.name, "replay input exhausted");
                        self.exhausted = true;
                    }
                    break;
                }
            }
        }
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut self.queued)
    }
}
