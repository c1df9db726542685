//! Default tables for the "MUHI" USB jog pendant.
//!
//! Button numbers are the ids the HID driver enumerates for this device.
//! The pendant has a latching 1/10 step switch, two momentary step buttons,
//! four axis buttons and a row of machine buttons; some buttons are not wired
//! to anything yet and are kept as reserved so presses show up in the log
//! instead of as unknown input.

use super::{AxisBinding, AxisRole, ButtonBinding, ButtonRole};
use crate::input::AxisId;

/// Device name the pendant reports to the driver.
pub const DEVICE_NAME: &str = "MUHI";

pub fn button_bindings() -> Vec<ButtonBinding> {
    vec![
        ButtonBinding::labelled(12, ButtonRole::Start, "start"),
        ButtonBinding::labelled(10, ButtonRole::Stop, "stop"),
        ButtonBinding::labelled(14, ButtonRole::Pause, "pause"),
        ButtonBinding::labelled(13, ButtonRole::Reset, "reset"),
        ButtonBinding::labelled(8, ButtonRole::Home, "home"),
        ButtonBinding::labelled(22, ButtonRole::FeedOverrideReset, "feed reset"),
        ButtonBinding::labelled(5, ButtonRole::StepToggle, "step 1/10"),
        ButtonBinding::labelled(6, ButtonRole::StepOneTenth, "step 0.1"),
        ButtonBinding::labelled(3, ButtonRole::StepOneHundredth, "step 0.01"),
        ButtonBinding::labelled(7, ButtonRole::SelectX, "axis X"),
        ButtonBinding::labelled(2, ButtonRole::SelectY, "axis Y"),
        ButtonBinding::labelled(1, ButtonRole::SelectZ, "axis Z"),
        ButtonBinding::labelled(4, ButtonRole::SelectA, "axis A"),
        ButtonBinding::labelled(11, ButtonRole::Reserved, "jog mode"),
        ButtonBinding::labelled(21, ButtonRole::Reserved, "spindle"),
        ButtonBinding::labelled(0, ButtonRole::Reserved, "axis 000"),
        ButtonBinding::labelled(9, ButtonRole::Reserved, "axes 000"),
    ]
}

/// X is the hand wheel, Y the feed-override knob.  Z (spindle speed) and the
/// slider are left unbound.
pub fn axis_bindings() -> Vec<AxisBinding> {
    vec![
        AxisBinding {
            axis: AxisId::X,
            role: AxisRole::Wheel,
        },
        AxisBinding {
            axis: AxisId::Y,
            role: AxisRole::FeedOverride,
        },
    ]
}
