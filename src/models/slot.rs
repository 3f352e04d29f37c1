//! Player identifiers and the slots they occupy in a match.

use crate::models::game::MatchLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a player (gamer tag), unique within a tournament.
pub type PlayerId = String;

/// Which result of an upstream match feeds a pending slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner,
    Loser,
}

/// Reference to the upstream match that will decide a slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub outcome: Outcome,
    pub from: MatchLocation,
}

/// One side of a match.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Slot {
    /// A concrete player.
    Player(PlayerId),
    /// Capacity not yet filled by a real player.
    Open,
    /// Round-robin padding for an odd player count.
    Bye,
    /// Not decided yet; filled in when the upstream match resolves.
    Pending(Feed),
}

impl Slot {
    pub fn player(id: impl Into<PlayerId>) -> Self {
        Slot::Player(id.into())
    }

    pub fn winner_of(from: MatchLocation) -> Self {
        Slot::Pending(Feed {
            outcome: Outcome::Winner,
            from,
        })
    }

    pub fn loser_of(from: MatchLocation) -> Self {
        Slot::Pending(Feed {
            outcome: Outcome::Loser,
            from,
        })
    }

    /// The player id if this slot holds a concrete player.
    pub fn player_id(&self) -> Option<&str> {
        match self {
            Slot::Player(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Slot::Open)
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Player(id) => write!(f, "{}", id),
            Slot::Open => write!(f, "Open Slot"),
            Slot::Bye => write!(f, "BYE"),
            Slot::Pending(feed) => {
                let outcome = match feed.outcome {
                    Outcome::Winner => "Winner",
                    Outcome::Loser => "Loser",
                };
                write!(
                    f,
                    "{} of {} Round {} Match {}",
                    outcome,
                    feed.from.side.abbreviation(),
                    feed.from.round + 1,
                    feed.from.index + 1
                )
            }
        }
    }
}
