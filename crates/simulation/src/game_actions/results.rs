use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionResult {
    /// Applied. `cost` was charged to the park; negative values are refunds.
    Success { cost: i64 },
    Error(ActionError),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success { .. })
    }

    pub fn cost(&self) -> Option<i64> {
        match self {
            ActionResult::Success { cost } => Some(*cost),
            ActionResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Error(error) => Some(error),
            ActionResult::Success { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<i64, ActionError> {
        match self {
            ActionResult::Success { cost } => Ok(cost),
            ActionResult::Error(error) => Err(error),
        }
    }
}

/// Why the dispatcher refused an action. The world is untouched whenever one
/// of these is returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionError {
    /// A game-wide rule forbids the action right now.
    Disallowed,
    InsufficientFunds,
    InvalidParameters(String),
    /// The element the action targets is no longer where it was expected.
    ElementNotFound,
    OutOfBounds,
    NotOwned,
    BannerLimitReached,
    Occupied,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Disallowed => write!(f, "action is not allowed right now"),
            ActionError::InsufficientFunds => write!(f, "not enough cash"),
            ActionError::InvalidParameters(msg) => write!(f, "invalid parameters: {msg}"),
            ActionError::ElementNotFound => write!(f, "target element not found"),
            ActionError::OutOfBounds => write!(f, "location is off the map"),
            ActionError::NotOwned => write!(f, "land not owned by park"),
            ActionError::BannerLimitReached => write!(f, "too many banners in park"),
            ActionError::Occupied => write!(f, "location is already occupied"),
        }
    }
}

impl std::error::Error for ActionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(ActionResult::Success { cost: -5 }.into_result(), Ok(-5));
        assert_eq!(
            ActionResult::Error(ActionError::NotOwned).into_result(),
            Err(ActionError::NotOwned)
        );
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", ActionError::InvalidParameters("empty name".to_string()));
        assert!(msg.contains("empty name"), "got: {msg}");
        assert_eq!(format!("{}", ActionError::NotOwned), "land not owned by park");
    }
}
