//! Sign-up sheet import: turn `event_name,gamertag` CSV records into a roster.

use crate::models::PlayerId;
use serde::Deserialize;
use std::io;

#[derive(Debug, Deserialize)]
struct SignupRecord {
    event_name: String,
    gamertag: String,
}

/// Gamer tags signed up for `event_name`, in sheet order, first occurrence only.
///
/// Headers are required; surrounding whitespace is trimmed and blank tags are skipped.
pub fn read_signups<R: io::Read>(reader: R, event_name: &str) -> Result<Vec<PlayerId>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut tags: Vec<PlayerId> = Vec::new();
    for record in rdr.deserialize() {
        let record: SignupRecord = record?;
        if record.event_name != event_name || record.gamertag.is_empty() {
            continue;
        }
        if !tags.contains(&record.gamertag) {
            tags.push(record.gamertag);
        }
    }
    log::debug!("Read {} sign-ups for {}", tags.len(), event_name);
    Ok(tags)
}
