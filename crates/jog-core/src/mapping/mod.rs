//! Declarative tables from physical input ids to semantic roles.
//!
//! The interpreter never matches on device-specific numbers.  It asks a
//! [`ButtonMap`] or [`AxisMap`] what an id means and dispatches on the role.
//! Swapping the table is all it takes to support a pendant with a different
//! id layout; the default table for the "MUHI" pendant lives in [`muhi`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::command::CommandRole;
use crate::domain::selection::{SelectedAxis, StepSize};
use crate::input::{AxisId, ButtonId};

pub mod muhi;

/// Error raised when building a mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("button {0} is bound more than once")]
    DuplicateButton(ButtonId),
    #[error("axis {0} is bound more than once")]
    DuplicateAxis(AxisId),
}

/// What a physical button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonRole {
    Home,
    Pause,
    Start,
    Reset,
    Stop,
    FeedOverrideReset,
    StepTen,
    StepOne,
    StepOneTenth,
    StepOneHundredth,
    /// Latching switch: pressed selects step 1, released selects step 10.
    StepToggle,
    SelectX,
    SelectY,
    SelectZ,
    SelectA,
    /// Known button with no behaviour yet; a press is only logged.
    Reserved,
}

/// How a role reacts to button values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Acts on `1.0`, ignores `0.0`, warns on anything else.
    Edge,
    /// Acts on both `1.0` and `0.0`, warns on anything else.
    Toggle,
}

/// The effect a button role has once its trigger condition is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Invoke(CommandRole),
    SelectStep(StepSize),
    SelectAxis(SelectedAxis),
    Log,
}

impl ButtonRole {
    pub fn trigger(self) -> Trigger {
        match self {
            ButtonRole::StepToggle => Trigger::Toggle,
            _ => Trigger::Edge,
        }
    }

    /// The effect of this role for a recognised button value.
    ///
    /// `pressed` is `true` for `1.0` and `false` for `0.0`.  Edge-triggered
    /// roles have no effect on release and return `None`.
    pub fn action(self, pressed: bool) -> Option<ButtonAction> {
        if !pressed && self.trigger() == Trigger::Edge {
            return None;
        }
        let action = match self {
            ButtonRole::Home => ButtonAction::Invoke(CommandRole::Home),
            ButtonRole::Pause => ButtonAction::Invoke(CommandRole::Pause),
            ButtonRole::Start => ButtonAction::Invoke(CommandRole::Start),
            ButtonRole::Reset => ButtonAction::Invoke(CommandRole::Reset),
            ButtonRole::Stop => ButtonAction::Invoke(CommandRole::Stop),
            ButtonRole::FeedOverrideReset => ButtonAction::Invoke(CommandRole::FeedOverrideReset),
            ButtonRole::StepTen => ButtonAction::SelectStep(StepSize::Ten),
            ButtonRole::StepOne => ButtonAction::SelectStep(StepSize::One),
            ButtonRole::StepOneTenth => ButtonAction::SelectStep(StepSize::OneTenth),
            ButtonRole::StepOneHundredth => ButtonAction::SelectStep(StepSize::OneHundredth),
            ButtonRole::StepToggle if pressed => ButtonAction::SelectStep(StepSize::One),
            ButtonRole::StepToggle => ButtonAction::SelectStep(StepSize::Ten),
            ButtonRole::SelectX => ButtonAction::SelectAxis(SelectedAxis::X),
            ButtonRole::SelectY => ButtonAction::SelectAxis(SelectedAxis::Y),
            ButtonRole::SelectZ => ButtonAction::SelectAxis(SelectedAxis::Z),
            ButtonRole::SelectA => ButtonAction::SelectAxis(SelectedAxis::A),
            ButtonRole::Reserved => ButtonAction::Log,
        };
        Some(action)
    }
}

/// One row of a button table, as stored in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBinding {
    pub id: ButtonId,
    pub role: ButtonRole,
    /// Free-form name used in log lines, e.g. the label printed on the pendant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ButtonBinding {
    pub fn new(id: ButtonId, role: ButtonRole) -> Self {
        Self { id, role, label: None }
    }

    pub fn labelled(id: ButtonId, role: ButtonRole, label: &str) -> Self {
        Self {
            id,
            role,
            label: Some(label.to_string()),
        }
    }
}

/// Resolved entry in a [`ButtonMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEntry {
    pub role: ButtonRole,
    pub label: Option<String>,
}

/// Lookup table from button id to role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonMap {
    entries: HashMap<ButtonId, ButtonEntry>,
}

impl ButtonMap {
    /// Builds a table, rejecting ids bound more than once.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateButton`] for the first repeated id.
    pub fn from_bindings<I>(bindings: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = ButtonBinding>,
    {
        let mut entries = HashMap::new();
        for binding in bindings {
            let entry = ButtonEntry {
                role: binding.role,
                label: binding.label,
            };
            if entries.insert(binding.id, entry).is_some() {
                return Err(MappingError::DuplicateButton(binding.id));
            }
        }
        Ok(Self { entries })
    }

    /// The default table for the MUHI pendant.
    pub fn muhi() -> Self {
        // The built-in table has unique ids (covered by tests).
        Self::from_bindings(muhi::button_bindings()).unwrap_or_default()
    }

    pub fn get(&self, id: ButtonId) -> Option<&ButtonEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows of the table sorted by id, suitable for writing back to config.
    pub fn bindings(&self) -> Vec<ButtonBinding> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .map(|(id, entry)| ButtonBinding {
                id: *id,
                role: entry.role,
                label: entry.label.clone(),
            })
            .collect();
        rows.sort_by_key(|b| b.id);
        rows
    }
}

/// What a physical axis channel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisRole {
    /// The hand wheel; jogs the selected axis.
    Wheel,
    /// The feed-override knob; independent of axis selection.
    FeedOverride,
}

/// One row of an axis table, as stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    pub axis: AxisId,
    pub role: AxisRole,
}

/// Lookup table from axis channel to role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisMap {
    entries: HashMap<AxisId, AxisRole>,
}

impl AxisMap {
    /// Builds a table, rejecting channels bound more than once.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateAxis`] for the first repeated channel.
    pub fn from_bindings<I>(bindings: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = AxisBinding>,
    {
        let mut entries = HashMap::new();
        for binding in bindings {
            if entries.insert(binding.axis, binding.role).is_some() {
                return Err(MappingError::DuplicateAxis(binding.axis));
            }
        }
        Ok(Self { entries })
    }

    /// The default table for the MUHI pendant.
    pub fn muhi() -> Self {
        Self::from_bindings(muhi::axis_bindings()).unwrap_or_default()
    }

    pub fn get(&self, axis: AxisId) -> Option<AxisRole> {
        self.entries.get(&axis).copied()
    }

    pub fn bindings(&self) -> Vec<AxisBinding> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .map(|(axis, role)| AxisBinding { axis: *axis, role: *role })
            .collect();
        rows.sort_by_key(|b| b.axis);
        rows
    }
}
