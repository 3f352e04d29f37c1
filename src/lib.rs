//! Venue kiosk tournament engine: library with models, bracket logic and the engine facade.

pub mod engine;
pub mod logic;
pub mod models;

pub use engine::TournamentEngine;
pub use logic::{
    build_schedule, normalize_roster, pad_for_pairing, read_signups, report_result, Progress,
};
pub use models::{
    Bracket, BracketSide, Match, MatchLocation, PlayerId, Round, Schedule, Slot, SlotPosition,
    Tournament, TournamentError, TournamentFormat, TournamentId, TournamentState,
};
