//! Match, Round, and the coordinates used to address a match.

use crate::models::slot::{PlayerId, Slot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which round sequence a match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    /// Winners bracket; also the flat round list of round robin.
    #[default]
    Winners,
    Losers,
    GrandFinals,
}

impl BracketSide {
    /// Short label used on the kiosk display.
    pub fn abbreviation(self) -> &'static str {
        match self {
            BracketSide::Winners => "WB",
            BracketSide::Losers => "LB",
            BracketSide::GrandFinals => "GF",
        }
    }
}

/// 0-based coordinates of a match. Grand finals round 1 is the reset match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct MatchLocation {
    pub side: BracketSide,
    pub round: usize,
    pub index: usize,
}

impl MatchLocation {
    pub const fn new(side: BracketSide, round: usize, index: usize) -> Self {
        Self { side, round, index }
    }

    pub const fn winners(round: usize, index: usize) -> Self {
        Self::new(BracketSide::Winners, round, index)
    }

    pub const fn losers(round: usize, index: usize) -> Self {
        Self::new(BracketSide::Losers, round, index)
    }

    pub const fn grand_finals(round: usize) -> Self {
        Self::new(BracketSide::GrandFinals, round, 0)
    }
}

impl fmt::Display for MatchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} round {} match {}",
            self.side.abbreviation(),
            self.round + 1,
            self.index + 1
        )
    }
}

/// Which of the two slots of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    #[default]
    P1,
    P2,
}

impl SlotPosition {
    /// Even upstream indices feed `p1`, odd ones feed `p2`.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            SlotPosition::P1
        } else {
            SlotPosition::P2
        }
    }
}

/// A single match between two slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub round: usize,
    pub index: usize,
    pub p1: Slot,
    pub p2: Slot,
    /// None until reported.
    pub winner: Option<PlayerId>,
    pub loser: Option<PlayerId>,
    /// Venue table (round robin only).
    pub table: Option<u32>,
}

impl Match {
    pub fn new(round: usize, index: usize, p1: Slot, p2: Slot) -> Self {
        Self {
            round,
            index,
            p1,
            p2,
            winner: None,
            loser: None,
            table: None,
        }
    }

    pub fn with_table(mut self, table: u32) -> Self {
        self.table = Some(table);
        self
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Both player ids, if both slots hold concrete players.
    pub fn contestants(&self) -> Option<(&str, &str)> {
        Some((self.p1.player_id()?, self.p2.player_id()?))
    }

    /// True when either side is a Bye; such a match has no real outcome.
    pub fn has_bye(&self) -> bool {
        self.p1.is_bye() || self.p2.is_bye()
    }

    pub fn slot(&self, position: SlotPosition) -> &Slot {
        match position {
            SlotPosition::P1 => &self.p1,
            SlotPosition::P2 => &self.p2,
        }
    }

    pub fn slot_mut(&mut self, position: SlotPosition) -> &mut Slot {
        match position {
            SlotPosition::P1 => &mut self.p1,
            SlotPosition::P2 => &mut self.p2,
        }
    }
}

/// Ordered matches of one round of one bracket side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub side: BracketSide,
    pub index: usize,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(side: BracketSide, index: usize, matches: Vec<Match>) -> Self {
        Self {
            side,
            index,
            matches,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }
}
