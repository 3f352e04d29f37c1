//! Tournament, TournamentFormat and TournamentState.

use crate::models::game::MatchLocation;
use crate::models::schedule::Schedule;
use crate::models::slot::{PlayerId, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Capacity is not valid for the format (elimination needs a power of two >= 2).
    Configuration {
        format: TournamentFormat,
        capacity: usize,
    },
    /// More players supplied than the tournament can seat.
    CapacityExceeded { capacity: usize, players: usize },
    /// No open slot left for a new player.
    TournamentFull,
    /// No match at these coordinates.
    OutOfRange(MatchLocation),
    /// Winner is not one of the match's two players, or the match is not playable yet.
    InvalidWinner { at: MatchLocation, winner: String },
    /// The match already has a result; results only move forward.
    AlreadyDecided(MatchLocation),
    /// A champion has been decided; no more results are accepted.
    TournamentCompleted,
    /// The tournament is not in a state that allows this action.
    InvalidState(TournamentState),
    /// Format tag not recognised.
    UnknownFormat(String),
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::Configuration { format, capacity } => {
                write!(f, "Capacity {} is not valid for {}", capacity, format)
            }
            TournamentError::CapacityExceeded { capacity, players } => {
                write!(f, "{} players do not fit a tournament of {}", players, capacity)
            }
            TournamentError::TournamentFull => write!(f, "Tournament is full"),
            TournamentError::OutOfRange(at) => write!(f, "No match at {}", at),
            TournamentError::InvalidWinner { at, winner } => {
                write!(f, "{} cannot win {}", winner, at)
            }
            TournamentError::AlreadyDecided(at) => write!(f, "{} has already been decided", at),
            TournamentError::TournamentCompleted => write!(f, "Tournament is already completed"),
            TournamentError::InvalidState(state) => {
                write!(f, "Not allowed while the tournament is {}", state)
            }
            TournamentError::UnknownFormat(tag) => write!(f, "Unknown tournament format: {}", tag),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competitive format, as tagged in the event catalog.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
}

impl TournamentFormat {
    pub fn is_elimination(self) -> bool {
        !matches!(self, TournamentFormat::RoundRobin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TournamentFormat::SingleElimination => "single_elimination",
            TournamentFormat::DoubleElimination => "double_elimination",
            TournamentFormat::RoundRobin => "round_robin",
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentFormat {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_elimination" => Ok(TournamentFormat::SingleElimination),
            "double_elimination" => Ok(TournamentFormat::DoubleElimination),
            "round_robin" => Ok(TournamentFormat::RoundRobin),
            _ => Err(TournamentError::UnknownFormat(s.to_string())),
        }
    }
}

/// Lifecycle of a tournament's schedule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Roster known, no schedule yet.
    #[default]
    Created,
    /// Schedule built; roster may still change.
    RoundsGenerated,
    /// At least one result reported.
    InProgress,
    /// Final match decided. Terminal.
    Completed,
}

impl fmt::Display for TournamentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TournamentState::Created => "created",
            TournamentState::RoundsGenerated => "rounds generated",
            TournamentState::InProgress => "in progress",
            TournamentState::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Full tournament state: roster, schedule, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub capacity: usize,
    /// Always `capacity` long; unfilled positions are `Slot::Open`.
    pub roster: Vec<Slot>,
    /// None until the first build.
    pub schedule: Option<Schedule>,
    pub state: TournamentState,
    /// Set once the final match is decided (elimination formats only).
    pub champion: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament in Created state around an already normalized roster.
    pub fn new(
        name: impl Into<String>,
        format: TournamentFormat,
        capacity: usize,
        roster: Vec<Slot>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            capacity,
            roster,
            schedule: None,
            state: TournamentState::Created,
            champion: None,
            created_at: Utc::now(),
        }
    }

    /// Concrete players currently seated, in roster order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.roster.iter().filter_map(Slot::player_id)
    }

    pub fn open_slots(&self) -> usize {
        self.roster.iter().filter(|s| s.is_open()).count()
    }

    /// True while the schedule may still be regenerated.
    pub fn accepts_roster_changes(&self) -> bool {
        matches!(
            self.state,
            TournamentState::Created | TournamentState::RoundsGenerated
        )
    }
}
