//! Control conditions and character play modes

use serde::{Deserialize, Serialize};

/// Kind of control a `control` effect imposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlType {
    Stun,
    Sleep,
    Daze,
    Fear,
    Charm,
    Root,
    Silence,
}

impl ControlType {
    /// Controls that stop every gated action unless an ability says otherwise
    pub const DEFAULT_BLOCKING: [ControlType; 3] = [Self::Stun, Self::Sleep, Self::Daze];

    /// Adjective used in narrative ("You are stunned")
    pub fn condition_name(&self) -> &'static str {
        match self {
            Self::Stun => "stunned",
            Self::Sleep => "asleep",
            Self::Daze => "dazed",
            Self::Fear => "feared",
            Self::Charm => "charmed",
            Self::Root => "rooted",
            Self::Silence => "silenced",
        }
    }
}

/// Whether the player is currently playing the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    #[default]
    InCharacter,
    Afk,
    OutOfCharacter,
}

impl PlayMode {
    pub fn allows_actions(&self) -> bool {
        !matches!(self, Self::OutOfCharacter)
    }
}
