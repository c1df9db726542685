//! Wheel-tick quantization.
//!
//! Rotary pendant axes report a signed float that counts ticks since the
//! previous event, not a normalised position.  This module turns that float
//! into a direction and a whole repeat count.
//!
//! Two rules apply:
//!
//! - **Dead zone.**  Values strictly inside `(-0.5, 0.5)` are dropped.  The
//!   pendant emits small values such as `-0.0078` on every axis at boot.
//! - **Biased truncation.**  The repeat count is `trunc(|v| + 0.1)`, so a
//!   reported `2.95` counts as three ticks rather than two.  Any value outside
//!   the dead zone yields at least one tick.

/// Lower bound (exclusive) of the magnitude that counts as real input.
pub const DEAD_ZONE: f32 = 0.5;

/// Bias added before truncation to absorb float error in the tick count.
/// Added in `f64`, so a reported `1.9` stays one tick.
pub const ROUNDING_BIAS: f64 = 0.1;

/// Direction of a wheel movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

/// A quantized wheel movement: a direction and how many ticks to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDelta {
    pub direction: Direction,
    /// Always at least 1.
    pub count: u32,
}

impl TickDelta {
    /// Quantizes a raw axis value.
    ///
    /// Returns `None` for values inside the dead zone and for non-finite
    /// values, which the pendant never legitimately produces.
    pub fn from_axis_value(value: f32) -> Option<TickDelta> {
        if !value.is_finite() || (value > -DEAD_ZONE && value < DEAD_ZONE) {
            return None;
        }

        let direction = if value > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        };
        // `as` saturates for huge magnitudes; the cast cannot wrap.
        let count = ((f64::from(value.abs()) + ROUNDING_BIAS).trunc() as u32).max(1);

        Some(TickDelta { direction, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_inside_dead_zone_are_dropped() {
        for v in [0.0, 0.49, -0.49, -0.007_827_878, 0.25, -0.499_9] {
            assert_eq!(TickDelta::from_axis_value(v), None, "value {v}");
        }
    }

    #[test]
    fn test_dead_zone_boundaries_count_as_input() {
        assert_eq!(
            TickDelta::from_axis_value(0.5),
            Some(TickDelta { direction: Direction::Positive, count: 1 })
        );
        assert_eq!(
            TickDelta::from_axis_value(-0.5),
            Some(TickDelta { direction: Direction::Negative, count: 1 })
        );
    }

    #[test]
    fn test_biased_truncation_of_positive_values() {
        let cases = [(1.0, 1), (1.05, 1), (1.89, 1), (1.95, 2), (2.0, 2), (2.95, 3), (10.0, 10)];
        for (v, expected) in cases {
            let delta = TickDelta::from_axis_value(v).expect("outside dead zone");
            assert_eq!(delta.direction, Direction::Positive);
            assert_eq!(delta.count, expected, "value {v}");
        }
    }

    #[test]
    fn test_biased_truncation_of_negative_values() {
        let cases = [(-1.0, 1), (-2.6, 2), (-2.95, 3), (-4.0, 4)];
        for (v, expected) in cases {
            let delta = TickDelta::from_axis_value(v).expect("outside dead zone");
            assert_eq!(delta.direction, Direction::Negative);
            assert_eq!(delta.count, expected, "value {v}");
        }
    }

    #[test]
    fn test_bias_is_applied_at_double_precision() {
        // 1.9f32 is just below 1.9, so 1.9 + 0.1 stays below 2 in f64.
        for (v, expected) in [(1.9_f32, 1), (-1.9, 1), (0.9, 1)] {
            assert_eq!(
                TickDelta::from_axis_value(v).map(|d| d.count),
                Some(expected),
                "value {v}"
            );
        }
    }

    #[test]
    fn test_values_between_half_and_point_nine_count_as_one_tick() {
        for v in [0.5, 0.6, 0.75, 0.89] {
            assert_eq!(TickDelta::from_axis_value(v).map(|d| d.count), Some(1));
            assert_eq!(TickDelta::from_axis_value(-v).map(|d| d.count), Some(1));
        }
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        assert_eq!(TickDelta::from_axis_value(f32::NAN), None);
        assert_eq!(TickDelta::from_axis_value(f32::INFINITY), None);
        assert_eq!(TickDelta::from_axis_value(f32::NEG_INFINITY), None);
    }
}
