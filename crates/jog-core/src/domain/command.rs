//! Command roles: the logical front-end commands a pendant can trigger.
//!
//! Each role resolves once, at session start, to an action handle in the
//! front end's action directory.  The directory is keyed by string ids; the
//! canonical id for every role is returned by [`CommandRole::action_id`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical command the interpreter can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandRole {
    Home,
    Pause,
    Start,
    Reset,
    Stop,
    StepSizeTen,
    StepSizeOne,
    StepSizeOneTenth,
    StepSizeOneHundredth,
    JogXPlus,
    JogXMinus,
    JogYPlus,
    JogYMinus,
    JogZPlus,
    JogZMinus,
    FeedOverrideFinePlus,
    FeedOverrideFineMinus,
    FeedOverrideReset,
}

impl CommandRole {
    /// Number of roles; the size of a fully resolved command table.
    pub const COUNT: usize = 18;

    /// Every role, in declaration order (`ALL[i].index() == i`).
    pub const ALL: [CommandRole; Self::COUNT] = [
        CommandRole::Home,
        CommandRole::Pause,
        CommandRole::Start,
        CommandRole::Reset,
        CommandRole::Stop,
        CommandRole::StepSizeTen,
        CommandRole::StepSizeOne,
        CommandRole::StepSizeOneTenth,
        CommandRole::StepSizeOneHundredth,
        CommandRole::JogXPlus,
        CommandRole::JogXMinus,
        CommandRole::JogYPlus,
        CommandRole::JogYMinus,
        CommandRole::JogZPlus,
        CommandRole::JogZMinus,
        CommandRole::FeedOverrideFinePlus,
        CommandRole::FeedOverrideFineMinus,
        CommandRole::FeedOverrideReset,
    ];

    /// Dense index in `0..COUNT`, used for array-backed tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical action-directory id of the motion front end for this role.
    pub fn action_id(self) -> &'static str {
        match self {
            CommandRole::Home => "Actions/Machine/com-willwinder-ugs-nbp-core-actions-HomeAction.instance",
            CommandRole::Pause => "Actions/Machine/com-willwinder-ugs-nbp-core-actions-PauseAction.instance",
            CommandRole::Start => "Actions/Machine/com-willwinder-ugs-nbp-core-actions-StartAction.instance",
            CommandRole::Reset => "Actions/Machine/com-willwinder-ugs-nbp-core-actions-SoftResetAction.instance",
            CommandRole::Stop => "Actions/Machine/com-willwinder-ugs-nbp-core-actions-StopAction.instance",
            CommandRole::StepSizeTen => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.JogSizeActionxy.10.instance",
            CommandRole::StepSizeOne => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.JogSizeActionxy.1.instance",
            CommandRole::StepSizeOneTenth => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.JogSizeActionxy.01.instance",
            CommandRole::StepSizeOneHundredth => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.JogSizeActionxy.001.instance",
            CommandRole::JogXPlus => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.xPlus.instance",
            CommandRole::JogXMinus => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.xMinus.instance",
            CommandRole::JogYPlus => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.yPlus.instance",
            CommandRole::JogYMinus => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.yMinus.instance",
            CommandRole::JogZPlus => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.zPlus.instance",
            CommandRole::JogZMinus => "Actions/Machine/com.willwinder.ugs.nbp.core.services.JogActionService.zMinus.instance",
            CommandRole::FeedOverrideFinePlus => "Actions/Overrides/com.willwinder.ugs.nbp.core.services.OverrideAction.feedOvrFinePlus.instance",
            CommandRole::FeedOverrideFineMinus => "Actions/Overrides/com.willwinder.ugs.nbp.core.services.OverrideAction.feedOvrFineMinus.instance",
            CommandRole::FeedOverrideReset => "Actions/Overrides/com.willwinder.ugs.nbp.core.services.OverrideAction.feedOvrReset.instance",
        }
    }

    /// Looks a role up by its action-directory id.
    pub fn from_action_id(id: &str) -> Option<CommandRole> {
        Self::ALL.into_iter().find(|role| role.action_id() == id)
    }
}

impl fmt::Display for CommandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CommandRole::Home => "home",
            CommandRole::Pause => "pause",
            CommandRole::Start => "start",
            CommandRole::Reset => "reset",
            CommandRole::Stop => "stop",
            CommandRole::StepSizeTen => "step-size-10",
            CommandRole::StepSizeOne => "step-size-1",
            CommandRole::StepSizeOneTenth => "step-size-0.1",
            CommandRole::StepSizeOneHundredth => "step-size-0.01",
            CommandRole::JogXPlus => "jog-x-plus",
            CommandRole::JogXMinus => "jog-x-minus",
            CommandRole::JogYPlus => "jog-y-plus",
            CommandRole::JogYMinus => "jog-y-minus",
            CommandRole::JogZPlus => "jog-z-plus",
            CommandRole::JogZMinus => "jog-z-minus",
            CommandRole::FeedOverrideFinePlus => "feed-override-fine-plus",
            CommandRole::FeedOverrideFineMinus => "feed-override-fine-minus",
            CommandRole::FeedOverrideReset => "feed-override-reset",
        };
        f.write_str(s)
    }
}
