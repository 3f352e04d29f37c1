//! Bracket (elimination) and Schedule (either format family).

use crate::models::game::{BracketSide, Match, MatchLocation, Round};
use serde::{Deserialize, Serialize};

/// Winners and losers round sequences plus grand finals.
///
/// Single elimination only fills `winners`. Double elimination tracks the two
/// brackets as separate sequences; interleaving them is left to
/// [`Bracket::presentation_rounds`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub winners: Vec<Round>,
    /// Two rounds per stage: a feeder round, then a drop-in round taking
    /// losers from the matching winners round.
    pub losers: Vec<Round>,
    /// Winners champion (p1) vs losers champion (p2). None for single elimination.
    pub grand_finals: Option<Match>,
    /// Second grand-finals match, created once `reset_required` is set.
    pub reset_match: Option<Match>,
    pub reset_required: bool,
}

impl Bracket {
    pub fn is_double(&self) -> bool {
        self.grand_finals.is_some()
    }

    /// Number of losers-bracket stages, `log2(capacity) - 1` for double elimination.
    pub fn losers_stage_count(&self) -> usize {
        self.losers.len() / 2
    }

    pub fn match_at(&self, at: MatchLocation) -> Option<&Match> {
        match at.side {
            BracketSide::Winners => self.winners.get(at.round)?.matches.get(at.index),
            BracketSide::Losers => self.losers.get(at.round)?.matches.get(at.index),
            BracketSide::GrandFinals => match (at.round, at.index) {
                (0, 0) => self.grand_finals.as_ref(),
                (1, 0) => self.reset_match.as_ref(),
                _ => None,
            },
        }
    }

    pub fn match_at_mut(&mut self, at: MatchLocation) -> Option<&mut Match> {
        match at.side {
            BracketSide::Winners => self.winners.get_mut(at.round)?.matches.get_mut(at.index),
            BracketSide::Losers => self.losers.get_mut(at.round)?.matches.get_mut(at.index),
            BracketSide::GrandFinals => match (at.round, at.index) {
                (0, 0) => self.grand_finals.as_mut(),
                (1, 0) => self.reset_match.as_mut(),
                _ => None,
            },
        }
    }

    /// Rounds in display order: each winners round followed by the losers
    /// rounds that become playable once it finishes, then grand finals.
    pub fn presentation_rounds(&self) -> Vec<Round> {
        let mut rounds = Vec::with_capacity(self.winners.len() + self.losers.len() + 2);
        for (r, round) in self.winners.iter().enumerate() {
            rounds.push(round.clone());
            let following = if r == 0 { 0..1 } else { 2 * r - 1..2 * r + 1 };
            rounds.extend(following.filter_map(|j| self.losers.get(j)).cloned());
        }
        if let Some(gf) = &self.grand_finals {
            rounds.push(Round::new(BracketSide::GrandFinals, 0, vec![gf.clone()]));
        }
        if let Some(reset) = &self.reset_match {
            rounds.push(Round::new(BracketSide::GrandFinals, 1, vec![reset.clone()]));
        }
        rounds
    }
}

/// Generated structure of a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    Elimination(Bracket),
    RoundRobin { rounds: Vec<Round> },
}

impl Schedule {
    pub fn match_at(&self, at: MatchLocation) -> Option<&Match> {
        match self {
            Schedule::Elimination(bracket) => bracket.match_at(at),
            Schedule::RoundRobin { rounds } if at.side == BracketSide::Winners => {
                rounds.get(at.round)?.matches.get(at.index)
            }
            Schedule::RoundRobin { .. } => None,
        }
    }

    pub fn match_at_mut(&mut self, at: MatchLocation) -> Option<&mut Match> {
        match self {
            Schedule::Elimination(bracket) => bracket.match_at_mut(at),
            Schedule::RoundRobin { rounds } if at.side == BracketSide::Winners => {
                rounds.get_mut(at.round)?.matches.get_mut(at.index)
            }
            Schedule::RoundRobin { .. } => None,
        }
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        match self {
            Schedule::Elimination(bracket) => Some(bracket),
            Schedule::RoundRobin { .. } => None,
        }
    }

    /// Rounds in the order the kiosk shows them.
    pub fn presentation_rounds(&self) -> Vec<Round> {
        match self {
            Schedule::Elimination(bracket) => bracket.presentation_rounds(),
            Schedule::RoundRobin { rounds } => rounds.clone(),
        }
    }
}
