//! Result reporting: record a winner and propagate it (and the loser) downstream.
//!
//! Results only move forward. A decided match rejects any further report, and a
//! match is only playable once both of its slots hold concrete players.

use crate::models::{
    Bracket, BracketSide, Match, MatchLocation, PlayerId, Round, Schedule, Slot, SlotPosition,
    TournamentError,
};
use log::{debug, warn};

/// What a reported result did to the tournament as a whole.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Progress {
    /// More matches remain.
    Continuing,
    /// The losers-bracket champion took the first grand-finals match; a reset match is now open.
    ResetRequired,
    /// The final match is decided.
    Champion(PlayerId),
    /// Every playable round-robin match is decided.
    Finished,
}

/// Where a result goes once a match is decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Destination {
    Slot(MatchLocation, SlotPosition),
    /// The winner of this match wins the tournament.
    Champion,
    /// Loser is out (single elimination, losers bracket, grand finals).
    Eliminated,
}

/// Record `winner` for the match at `at` and propagate the result.
pub fn report_result(
    schedule: &mut Schedule,
    at: MatchLocation,
    winner: &str,
) -> Result<Progress, TournamentError> {
    match schedule {
        Schedule::RoundRobin { rounds } => report_round_robin(rounds, at, winner),
        Schedule::Elimination(bracket) => report_elimination(bracket, at, winner),
    }
}

fn report_round_robin(
    rounds: &mut [Round],
    at: MatchLocation,
    winner: &str,
) -> Result<Progress, TournamentError> {
    let m = match at.side {
        BracketSide::Winners => rounds
            .get_mut(at.round)
            .and_then(|r| r.matches.get_mut(at.index)),
        _ => None,
    }
    .ok_or(TournamentError::OutOfRange(at))?;
    decide(m, at, winner)?;

    let finished = rounds
        .iter()
        .flat_map(|r| &r.matches)
        .filter(|m| m.contestants().is_some())
        .all(Match::is_decided);
    Ok(if finished {
        Progress::Finished
    } else {
        Progress::Continuing
    })
}

fn report_elimination(
    bracket: &mut Bracket,
    at: MatchLocation,
    winner: &str,
) -> Result<Progress, TournamentError> {
    let m = bracket
        .match_at_mut(at)
        .ok_or(TournamentError::OutOfRange(at))?;
    let (winner, loser) = decide(m, at, winner)?;

    if at.side == BracketSide::GrandFinals {
        return Ok(finish_grand_finals(bracket, at, winner, loser));
    }

    if let Destination::Slot(dest, pos) = loser_destination(bracket, at) {
        place(bracket, dest, pos, loser)?;
    }
    match winner_destination(bracket, at) {
        Destination::Slot(dest, pos) => {
            place(bracket, dest, pos, winner)?;
            Ok(Progress::Continuing)
        }
        Destination::Champion => Ok(Progress::Champion(winner)),
        Destination::Eliminated => Ok(Progress::Continuing),
    }
}

fn finish_grand_finals(
    bracket: &mut Bracket,
    at: MatchLocation,
    winner: PlayerId,
    loser: PlayerId,
) -> Progress {
    // p1 is the winners-bracket champion; they only need one grand-finals win.
    let wb_champion_won = bracket
        .match_at(at)
        .map_or(false, |m| m.p1.player_id() == Some(winner.as_str()));

    if at.round == 0 && !wb_champion_won {
        warn!("Grand finals reset: {} must be beaten a second time", loser);
        bracket.reset_required = true;
        bracket.reset_match = Some(Match::new(
            1,
            0,
            Slot::Player(loser),
            Slot::Player(winner),
        ));
        return Progress::ResetRequired;
    }
    Progress::Champion(winner)
}

/// Validate and record a result. Returns `(winner, loser)`.
fn decide(
    m: &mut Match,
    at: MatchLocation,
    winner: &str,
) -> Result<(PlayerId, PlayerId), TournamentError> {
    if m.is_decided() {
        return Err(TournamentError::AlreadyDecided(at));
    }
    let invalid = || TournamentError::InvalidWinner {
        at,
        winner: winner.to_string(),
    };
    let (p1, p2) = m.contestants().ok_or_else(invalid)?;
    let loser = if winner == p1 {
        p2
    } else if winner == p2 {
        p1
    } else {
        return Err(invalid());
    };
    let (winner, loser) = (winner.to_string(), loser.to_string());
    m.winner = Some(winner.clone());
    m.loser = Some(loser.clone());
    Ok((winner, loser))
}

fn place(
    bracket: &mut Bracket,
    dest: MatchLocation,
    pos: SlotPosition,
    player: PlayerId,
) -> Result<(), TournamentError> {
    let m = bracket
        .match_at_mut(dest)
        .ok_or(TournamentError::OutOfRange(dest))?;
    debug!("{} advances to {} ({:?})", player, dest, pos);
    *m.slot_mut(pos) = Slot::Player(player);
    Ok(())
}

/// Where the winner of the match at `from` goes.
///
/// Winners round `r` match `m` feeds round `r+1` match `m/2`, slot by parity of `m`.
/// In the losers bracket a feeder round passes straight across to the drop-in
/// round (same index, `p1`); a drop-in round halves into the next feeder round.
pub fn winner_destination(bracket: &Bracket, from: MatchLocation) -> Destination {
    match from.side {
        BracketSide::Winners if from.round + 1 < bracket.winners.len() => Destination::Slot(
            MatchLocation::winners(from.round + 1, from.index / 2),
            SlotPosition::for_index(from.index),
        ),
        BracketSide::Winners if bracket.is_double() => {
            Destination::Slot(MatchLocation::grand_finals(0), SlotPosition::P1)
        }
        BracketSide::Winners => Destination::Champion,
        BracketSide::Losers if from.round + 1 < bracket.losers.len() => {
            if from.round % 2 == 0 {
                Destination::Slot(
                    MatchLocation::losers(from.round + 1, from.index),
                    SlotPosition::P1,
                )
            } else {
                Destination::Slot(
                    MatchLocation::losers(from.round + 1, from.index / 2),
                    SlotPosition::for_index(from.index),
                )
            }
        }
        BracketSide::Losers => Destination::Slot(MatchLocation::grand_finals(0), SlotPosition::P2),
        BracketSide::GrandFinals => Destination::Champion,
    }
}

/// Where the loser of the match at `from` goes. Only winners-bracket losers of a
/// double-elimination bracket get a second chance.
pub fn loser_destination(bracket: &Bracket, from: MatchLocation) -> Destination {
    if from.side != BracketSide::Winners || !bracket.is_double() {
        return Destination::Eliminated;
    }
    if bracket.losers.is_empty() {
        return Destination::Slot(MatchLocation::grand_finals(0), SlotPosition::P2);
    }
    if from.round == 0 {
        return Destination::Slot(
            MatchLocation::losers(0, from.index / 2),
            SlotPosition::for_index(from.index),
        );
    }
    let count = bracket
        .winners
        .get(from.round)
        .map_or(0, |r| r.matches.len());
    Destination::Slot(
        MatchLocation::losers(2 * from.round - 1, count.saturating_sub(1 + from.index)),
        SlotPosition::P2,
    )
}
