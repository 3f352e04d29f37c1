//! Roster normalization: pad the sign-up list to capacity with open slots.

use crate::models::{PlayerId, Slot, TournamentError, TournamentFormat};

/// Check that `capacity` is usable for `format`.
///
/// Elimination brackets need a power of two >= 2. Round robin needs at least two seats.
pub fn validate_capacity(format: TournamentFormat, capacity: usize) -> Result<(), TournamentError> {
    let valid = if format.is_elimination() {
        capacity >= 2 && capacity.is_power_of_two()
    } else {
        capacity >= 2
    };
    if !valid {
        return Err(TournamentError::Configuration { format, capacity });
    }
    Ok(())
}

/// Pad `players` on the right with `Slot::Open` until the roster is `capacity` long.
pub fn normalize_roster(players: &[PlayerId], capacity: usize) -> Result<Vec<Slot>, TournamentError> {
    if players.len() > capacity {
        return Err(TournamentError::CapacityExceeded {
            capacity,
            players: players.len(),
        });
    }
    let mut roster: Vec<Slot> = players.iter().cloned().map(Slot::Player).collect();
    roster.resize(capacity, Slot::Open);
    Ok(roster)
}

/// Round robin pairing list: the roster plus one `Bye` if the count is odd.
pub fn pad_for_pairing(roster: &[Slot]) -> Vec<Slot> {
    let mut padded = roster.to_vec();
    if padded.len() % 2 == 1 {
        padded.push(Slot::Bye);
    }
    padded
}

/// Seat `player` in the first open slot. Returns the roster index used.
pub fn fill_open_slot(roster: &mut [Slot], player: PlayerId) -> Result<usize, TournamentError> {
    let idx = roster
        .iter()
        .position(Slot::is_open)
        .ok_or(TournamentError::TournamentFull)?;
    roster[idx] = Slot::Player(player);
    Ok(idx)
}
