//! TournamentEngine: one tournament's roster, schedule and lifecycle behind a single facade.
//!
//! Every mutating method takes `&mut self`. A service sharing an engine between
//! request handlers must wrap each engine in its own lock; distinct engines share
//! nothing.

use crate::logic::{
    build_schedule, fill_open_slot, normalize_roster, report_result, seat_entrant,
    validate_capacity, Progress,
};
use crate::models::{
    MatchLocation, PlayerId, Round, Schedule, Slot, Tournament, TournamentError,
    TournamentFormat, TournamentState,
};
use log::info;

#[derive(Clone, Debug)]
pub struct TournamentEngine {
    tournament: Tournament,
}

impl TournamentEngine {
    /// Validate capacity, normalize the roster, and build the initial schedule.
    pub fn create(
        name: impl Into<String>,
        format: TournamentFormat,
        capacity: usize,
        players: &[PlayerId],
    ) -> Result<Self, TournamentError> {
        validate_capacity(format, capacity)?;
        let roster = normalize_roster(players, capacity)?;
        let mut engine = Self {
            tournament: Tournament::new(name, format, capacity, roster),
        };
        engine.build()?;
        info!(
            "Created {} tournament {} ({}/{} players)",
            format,
            engine.tournament.name,
            players.len(),
            capacity
        );
        Ok(engine)
    }

    /// Wrap an existing tournament (e.g. one restored by the host application).
    pub fn from_tournament(tournament: Tournament) -> Self {
        Self { tournament }
    }

    /// (Re)generate the schedule from the current roster. Only before any result.
    pub fn build(&mut self) -> Result<(), TournamentError> {
        if !self.tournament.accepts_roster_changes() {
            return Err(TournamentError::InvalidState(self.tournament.state));
        }
        let schedule = build_schedule(self.tournament.format, &self.tournament.roster)?;
        self.tournament.schedule = Some(schedule);
        self.tournament.state = TournamentState::RoundsGenerated;
        info!("Generated rounds for {}", self.tournament.name);
        Ok(())
    }

    /// Seat a player in the first open slot. Returns the roster index used.
    ///
    /// Round robin is rebuilt from the roster; elimination brackets keep their
    /// seeding and only the first-round slot for that index changes.
    pub fn add_player(&mut self, id: impl Into<PlayerId>) -> Result<usize, TournamentError> {
        if !self.tournament.accepts_roster_changes() {
            return Err(TournamentError::InvalidState(self.tournament.state));
        }
        let id = id.into();
        let idx = fill_open_slot(&mut self.tournament.roster, id.clone())?;
        info!("Seated {} at slot {} of {}", id, idx, self.tournament.name);

        if self.tournament.format == TournamentFormat::RoundRobin {
            if self.tournament.schedule.is_some() {
                self.build()?;
            }
        } else if let Some(Schedule::Elimination(bracket)) = self.tournament.schedule.as_mut() {
            seat_entrant(bracket, idx, Slot::Player(id))?;
        }
        Ok(idx)
    }

    /// Record the winner of the match at `at` and advance the tournament.
    pub fn report_result(&mut self, at: MatchLocation, winner: &str) -> Result<(), TournamentError> {
        match self.tournament.state {
            TournamentState::Completed => return Err(TournamentError::TournamentCompleted),
            TournamentState::Created => {
                return Err(TournamentError::InvalidState(TournamentState::Created))
            }
            TournamentState::RoundsGenerated | TournamentState::InProgress => {}
        }
        let schedule = self
            .tournament
            .schedule
            .as_mut()
            .ok_or(TournamentError::InvalidState(self.tournament.state))?;

        let progress = report_result(schedule, at, winner)?;
        self.tournament.state = TournamentState::InProgress;
        match progress {
            Progress::Champion(champion) => {
                info!("{} wins {}", champion, self.tournament.name);
                self.tournament.champion = Some(champion);
                self.tournament.state = TournamentState::Completed;
            }
            Progress::Finished => {
                info!("All matches of {} decided", self.tournament.name);
                self.tournament.state = TournamentState::Completed;
            }
            Progress::ResetRequired | Progress::Continuing => {}
        }
        Ok(())
    }

    /// Current schedule (read-only view for display).
    pub fn bracket(&self) -> Option<&Schedule> {
        self.tournament.schedule.as_ref()
    }

    /// Rounds in display order; empty before the first build.
    pub fn presentation_rounds(&self) -> Vec<Round> {
        self.bracket()
            .map(Schedule::presentation_rounds)
            .unwrap_or_default()
    }

    pub fn champion(&self) -> Option<&str> {
        self.tournament.champion.as_deref()
    }

    pub fn state(&self) -> TournamentState {
        self.tournament.state
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn into_tournament(self) -> Tournament {
        self.tournament
    }
}
