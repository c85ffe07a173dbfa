use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::banner::BannerId;
use crate::colour::Colour;
use crate::config::SIGN_TEXT_MAX_LENGTH;
use crate::coords::CoordsXYZD;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum GameAction {
    SignSetName {
        banner_id: BannerId,
        name: String,
    },
    /// Both colours are always sent together; `is_large` selects whether the
    /// banner's large-scenery or wall element receives them.
    SignSetStyle {
        banner_id: BannerId,
        main_colour: Colour,
        text_colour: Colour,
        is_large: bool,
    },
    LargeSceneryPlace {
        origin: CoordsXYZD,
        entry: u16,
        primary: Colour,
        secondary: Colour,
    },
    LargeSceneryRemove {
        location: CoordsXYZD,
        sequence: u8,
    },
    WallPlace {
        location: CoordsXYZD,
        entry: u16,
        primary: Colour,
        secondary: Colour,
    },
    WallRemove {
        location: CoordsXYZD,
    },
    SetParkEntranceFee {
        fee: i64,
    },
}

impl GameAction {
    /// Cosmetic and financial edits may run while the game is paused;
    /// construction and demolition may not.
    pub fn allowed_while_paused(&self) -> bool {
        matches!(
            self,
            GameAction::SignSetName { .. }
                | GameAction::SignSetStyle { .. }
                | GameAction::SetParkEntranceFee { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameAction::SignSetName { .. } => "SignSetName",
            GameAction::SignSetStyle { .. } => "SignSetStyle",
            GameAction::LargeSceneryPlace { .. } => "LargeSceneryPlace",
            GameAction::LargeSceneryRemove { .. } => "LargeSceneryRemove",
            GameAction::WallPlace { .. } => "WallPlace",
            GameAction::WallRemove { .. } => "WallRemove",
            GameAction::SetParkEntranceFee { .. } => "SetParkEntranceFee",
        }
    }
}

/// Sign text as the player entered it, trimmed and capped at
/// [`SIGN_TEXT_MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignName(String);

impl SignName {
    /// Returns `None` for input that is empty after trimming. Longer input is
    /// truncated at a character boundary.
    pub fn new(text: &str) -> Option<SignName> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let capped: String = trimmed.chars().take(SIGN_TEXT_MAX_LENGTH).collect();
        Some(SignName(capped.trim_end().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_action(self, banner_id: BannerId) -> GameAction {
        GameAction::SignSetName {
            banner_id,
            name: self.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_name_trims_and_rejects_blank() {
        assert_eq!(SignName::new("  Entrance "), Some(SignName("Entrance".to_string())));
        assert_eq!(SignName::new(""), None);
        assert_eq!(SignName::new("   \t"), None);
    }

    #[test]
    fn test_sign_name_keeps_exactly_max_length() {
        let text = "a".repeat(SIGN_TEXT_MAX_LENGTH);
        let name = SignName::new(&text).unwrap();
        assert_eq!(name.as_str(), text);
    }

    #[test]
    fn test_sign_name_truncates_over_max_length() {
        let text = "b".repeat(SIGN_TEXT_MAX_LENGTH + 1);
        let name = SignName::new(&text).unwrap();
        assert_eq!(name.as_str().chars().count(), SIGN_TEXT_MAX_LENGTH);
    }

    #[test]
    fn test_sign_name_truncates_on_char_boundary() {
        let text = "é".repeat(40);
        let name = SignName::new(&text).unwrap();
        assert_eq!(name.as_str().chars().count(), SIGN_TEXT_MAX_LENGTH);
    }

    #[test]
    fn test_paused_permissions() {
        assert!(GameAction::SetParkEntranceFee { fee: 5 }.allowed_while_paused());
        assert!(!GameAction::WallRemove {
            location: CoordsXYZD::default()
        }
        .allowed_while_paused());
    }
}
