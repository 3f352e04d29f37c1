//! Schedule generation for all three formats.
//!
//! Every builder is a pure function of the roster: building twice from the same
//! roster yields identical rounds.

use crate::logic::roster::pad_for_pairing;
use crate::models::{
    Bracket, BracketSide, Match, MatchLocation, Round, Schedule, Slot, SlotPosition,
    TournamentError, TournamentFormat,
};

/// Build the full schedule for `format` from a normalized roster.
pub fn build_schedule(format: TournamentFormat, roster: &[Slot]) -> Result<Schedule, TournamentError> {
    match format {
        TournamentFormat::SingleElimination => {
            require_bracket_size(format, roster)?;
            Ok(Schedule::Elimination(build_single_elimination(roster)))
        }
        TournamentFormat::DoubleElimination => {
            require_bracket_size(format, roster)?;
            Ok(Schedule::Elimination(build_double_elimination(roster)))
        }
        TournamentFormat::RoundRobin => {
            if roster.len() < 2 {
                return Err(TournamentError::Configuration {
                    format,
                    capacity: roster.len(),
                });
            }
            Ok(Schedule::RoundRobin {
                rounds: build_round_robin(roster),
            })
        }
    }
}

fn require_bracket_size(format: TournamentFormat, roster: &[Slot]) -> Result<(), TournamentError> {
    if roster.len() < 2 || !roster.len().is_power_of_two() {
        return Err(TournamentError::Configuration {
            format,
            capacity: roster.len(),
        });
    }
    Ok(())
}

/// Winners rounds only: pairs `(2i, 2i+1)` in round 1, then halves down to the final.
pub fn build_single_elimination(roster: &[Slot]) -> Bracket {
    Bracket {
        winners: winners_rounds(roster),
        ..Bracket::default()
    }
}

/// Winners rounds, losers rounds, and a grand-finals match.
pub fn build_double_elimination(roster: &[Slot]) -> Bracket {
    let winners = winners_rounds(roster);
    let losers = losers_rounds(&winners);

    let final_round = winners.len() - 1;
    let wb_champion = Slot::winner_of(MatchLocation::winners(final_round, 0));
    let lb_champion = match losers.last() {
        Some(round) => Slot::winner_of(MatchLocation::losers(round.index, 0)),
        // Two players: the only loser goes straight to grand finals.
        None => Slot::loser_of(MatchLocation::winners(final_round, 0)),
    };

    Bracket {
        winners,
        losers,
        grand_finals: Some(Match::new(0, 0, wb_champion, lb_champion)),
        reset_match: None,
        reset_required: false,
    }
}

fn winners_rounds(roster: &[Slot]) -> Vec<Round> {
    let first: Vec<Match> = roster
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Match::new(0, i, pair[0].clone(), pair[1].clone()))
        .collect();
    let mut rounds = vec![Round::new(BracketSide::Winners, 0, first)];

    while let Some(prev) = rounds.last().filter(|r| r.matches.len() > 1) {
        let r = prev.index + 1;
        let count = prev.matches.len() / 2;
        let matches = (0..count)
            .map(|k| {
                Match::new(
                    r,
                    k,
                    Slot::winner_of(MatchLocation::winners(r - 1, 2 * k)),
                    Slot::winner_of(MatchLocation::winners(r - 1, 2 * k + 1)),
                )
            })
            .collect();
        rounds.push(Round::new(BracketSide::Winners, r, matches));
    }
    rounds
}

/// Losers bracket in `winners.len() - 1` stages of two rounds each.
///
/// Stage `s` (0-based) plays `capacity / 2^(s+2)` matches per round. Its feeder
/// round pairs winners-round-1 losers (stage 0) or the previous stage's
/// survivors; its drop-in round meets those survivors against the losers of
/// winners round `s + 1`, in reversed order.
fn losers_rounds(winners: &[Round]) -> Vec<Round> {
    let stages = winners.len().saturating_sub(1);
    let mut rounds = Vec::with_capacity(stages * 2);

    for s in 0..stages {
        let count = winners[s + 1].matches.len();
        let feeder = 2 * s;
        let drop_in = feeder + 1;

        let feeder_matches = (0..count)
            .map(|k| {
                let (a, b) = if s == 0 {
                    (
                        Slot::loser_of(MatchLocation::winners(0, 2 * k)),
                        Slot::loser_of(MatchLocation::winners(0, 2 * k + 1)),
                    )
                } else {
                    (
                        Slot::winner_of(MatchLocation::losers(feeder - 1, 2 * k)),
                        Slot::winner_of(MatchLocation::losers(feeder - 1, 2 * k + 1)),
                    )
                };
                Match::new(feeder, k, a, b)
            })
            .collect();
        rounds.push(Round::new(BracketSide::Losers, feeder, feeder_matches));

        let drop_in_matches = (0..count)
            .map(|k| {
                Match::new(
                    drop_in,
                    k,
                    Slot::winner_of(MatchLocation::losers(feeder, k)),
                    Slot::loser_of(MatchLocation::winners(s + 1, count - 1 - k)),
                )
            })
            .collect();
        rounds.push(Round::new(BracketSide::Losers, drop_in, drop_in_matches));
    }
    rounds
}

/// Circle method: `n - 1` rounds of `n / 2` matches over the Bye-padded roster.
///
/// Round `r` pairs `p[k]` with `p[n-1-k]`; then the last entry moves to index 1
/// while index 0 stays anchored.
pub fn build_round_robin(roster: &[Slot]) -> Vec<Round> {
    let mut players = pad_for_pairing(roster);
    let n = players.len();
    if n < 2 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(n - 1);
    for r in 0..n - 1 {
        let matches = (0..n / 2)
            .map(|k| {
                Match::new(r, k, players[k].clone(), players[n - 1 - k].clone())
                    .with_table((k % 2) as u32 + 1)
            })
            .collect();
        rounds.push(Round::new(BracketSide::Winners, r, matches));

        if let Some(last) = players.pop() {
            players.insert(1, last);
        }
    }
    rounds
}

/// Write a newly seated player into the first-round slot matching roster index `slot`.
///
/// Only meaningful before any result: the first-round position of a roster
/// index never changes, so the rest of the bracket stays valid.
pub fn seat_entrant(bracket: &mut Bracket, slot: usize, entrant: Slot) -> Result<(), TournamentError> {
    let at = MatchLocation::winners(0, slot / 2);
    let m = bracket
        .match_at_mut(at)
        .ok_or(TournamentError::OutOfRange(at))?;
    *m.slot_mut(SlotPosition::for_index(slot)) = entrant;
    Ok(())
}
