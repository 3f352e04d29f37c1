//! Data structures for the kiosk tournament engine: slots, matches, brackets, tournament state.

mod game;
mod schedule;
mod slot;
mod tournament;

pub use game::{BracketSide, Match, MatchLocation, Round, SlotPosition};
pub use schedule::{Bracket, Schedule};
pub use slot::{Feed, Outcome, PlayerId, Slot};
pub use tournament::{
    Tournament, TournamentError, TournamentFormat, TournamentId, TournamentState,
};
