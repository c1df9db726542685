//! Raw input events as reported by a pendant.
//!
//! Events are transient: produced by a device source, consumed immediately by
//! the interpreter, never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical button number as enumerated by the device driver.
pub type ButtonId = u16;

/// Physical axis channel as enumerated by the device driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisId {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Slider,
    Dial,
}

impl AxisId {
    pub const ALL: [AxisId; 8] = [
        AxisId::X,
        AxisId::Y,
        AxisId::Z,
        AxisId::Rx,
        AxisId::Ry,
        AxisId::Rz,
        AxisId::Slider,
        AxisId::Dial,
    ];

    fn as_str(self) -> &'static str {
        match self {
            AxisId::X => "x",
            AxisId::Y => "y",
            AxisId::Z => "z",
            AxisId::Rx => "rx",
            AxisId::Ry => "ry",
            AxisId::Rz => "rz",
            AxisId::Slider => "slider",
            AxisId::Dial => "dial",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an axis name is not one of the known channels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown axis name: {0:?}")]
pub struct UnknownAxisName(pub String);

impl FromStr for AxisId {
    type Err = UnknownAxisName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        AxisId::ALL
            .into_iter()
            .find(|axis| axis.as_str() == lower)
            .ok_or_else(|| UnknownAxisName(s.to_string()))
    }
}

/// A raw event from a pendant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// A button changed state.  `value` is `1.0` when pressed and `0.0` when
    /// released; drivers occasionally report other values.
    Button { id: ButtonId, value: f32 },
    /// An axis moved.  For rotary channels `value` is a signed tick delta.
    Axis { id: AxisId, value: f32 },
}
