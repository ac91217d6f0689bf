use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::GameError;

/// One of the two players, stored as 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);

    /// Index usable for per-player arrays such as the scores.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn other(self) -> PlayerId {
        PlayerId(1 - self.0)
    }
}

impl TryFrom<usize> for PlayerId {
    type Error = GameError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PlayerId::FIRST),
            1 => Ok(PlayerId::SECOND),
            _ => Err(GameError::InvalidPlayer(id)),
        }
    }
}

impl From<PlayerId> for usize {
    fn from(player: PlayerId) -> usize {
        player.index()
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_flips_between_players() {
        assert_eq!(PlayerId::FIRST.other(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.other(), PlayerId::FIRST);
        assert_eq!(PlayerId::FIRST.other().other(), PlayerId::FIRST);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(PlayerId::try_from(0), Ok(PlayerId::FIRST));
        assert_eq!(PlayerId::try_from(1), Ok(PlayerId::SECOND));
        assert_eq!(PlayerId::try_from(2), Err(GameError::InvalidPlayer(2)));
    }

    #[test]
    fn test_serde_uses_plain_index() {
        let json = serde_json::to_string(&PlayerId::SECOND).unwrap();
        assert_eq!(json, "1");
        let back: PlayerId = serde_json::from_str("0").unwrap();
        assert_eq!(back, PlayerId::FIRST);
        assert!(serde_json::from_str::<PlayerId>("5").is_err());
    }
}
