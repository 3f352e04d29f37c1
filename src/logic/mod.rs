//! Tournament business logic: roster normalization, schedule generation, result propagation.

mod advance;
mod bracket;
mod roster;
mod signup;

pub use advance::{loser_destination, report_result, winner_destination, Destination, Progress};
pub use bracket::{
    build_double_elimination, build_round_robin, build_schedule, build_single_elimination,
    seat_entrant,
};
pub use roster::{fill_open_slot, normalize_roster, pad_for_pairing, validate_capacity};
pub use signup::read_signups;
