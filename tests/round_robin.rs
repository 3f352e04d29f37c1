//! Integration tests for round robin: circle-method schedule, byes, completion.

use bracket_kiosk::{
    MatchLocation, PlayerId, Round, Schedule, Slot, TournamentEngine, TournamentError,
    TournamentFormat, TournamentState,
};
use std::collections::BTreeSet;

fn ids(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|s| s.to_string()).collect()
}

fn engine(names: &[&str], capacity: usize) -> TournamentEngine {
    TournamentEngine::create("Blitz Night", TournamentFormat::RoundRobin, capacity, &ids(names))
        .unwrap()
}

fn rounds(engine: &TournamentEngine) -> &[Round] {
    match engine.bracket().unwrap() {
        Schedule::RoundRobin { rounds } => rounds,
        Schedule::Elimination(_) => panic!("expected round robin"),
    }
}

fn pair(a: &Slot, b: &Slot) -> (String, String) {
    let (a, b) = (a.to_string(), b.to_string());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[test]
fn four_players_meet_everyone_once() {
    let t = engine(&["A", "B", "C", "D"], 4);
    let rounds = rounds(&t);
    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r.matches.len() == 2));

    let pairs: Vec<(String, String)> = rounds
        .iter()
        .flat_map(|r| &r.matches)
        .map(|m| pair(&m.p1, &m.p2))
        .collect();
    let unique: BTreeSet<_> = pairs.iter().cloned().collect();
    assert_eq!(pairs.len(), 6);
    let expected: BTreeSet<(String, String)> = [
        ("A", "B"),
        ("A", "C"),
        ("A", "D"),
        ("B", "C"),
        ("B", "D"),
        ("C", "D"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    assert_eq!(unique, expected);
}

#[test]
fn odd_roster_is_padded_with_a_bye() {
    let t = engine(&["A", "B", "C"], 3);
    let rounds = rounds(&t);
    assert_eq!(rounds.len(), 3);
    for round in rounds {
        assert_eq!(round.matches.len(), 2);
        assert_eq!(round.matches.iter().filter(|m| m.has_bye()).count(), 1);
    }
}

#[test]
fn bye_match_has_no_outcome() {
    let mut t = engine(&["A", "B", "C"], 3);
    let (r, m) = rounds(&t)
        .iter()
        .enumerate()
        .find_map(|(r, round)| round.matches.iter().find(|m| m.has_bye()).map(|m| (r, m.index)))
        .unwrap();
    let bye = &rounds(&t)[r].matches[m];
    let player = bye.p1.player_id().or(bye.p2.player_id()).unwrap().to_string();
    assert!(matches!(
        t.report_result(MatchLocation::winners(r, m), &player),
        Err(TournamentError::InvalidWinner { .. })
    ));
}

#[test]
fn completes_when_every_real_match_is_decided() {
    let mut t = engine(&["A", "B", "C"], 3);
    let playable: Vec<(MatchLocation, String)> = rounds(&t)
        .iter()
        .enumerate()
        .flat_map(|(r, round)| {
            round.matches.iter().filter_map(move |m| {
                let (p1, _) = m.contestants()?;
                Some((MatchLocation::winners(r, m.index), p1.to_string()))
            })
        })
        .collect();
    assert_eq!(playable.len(), 3);

    for (i, (at, winner)) in playable.iter().enumerate() {
        assert_ne!(t.state(), TournamentState::Completed, "completed after {i} results");
        t.report_result(*at, winner).unwrap();
    }
    assert_eq!(t.state(), TournamentState::Completed);
    assert_eq!(t.champion(), None);
    assert_eq!(
        t.report_result(playable[0].0, &playable[0].1),
        Err(TournamentError::TournamentCompleted)
    );
}

#[test]
fn results_record_winner_and_loser_only() {
    let mut t = engine(&["A", "B", "C", "D"], 4);
    t.report_result(MatchLocation::winners(0, 0), "D").unwrap();
    let m = &rounds(&t)[0].matches[0];
    assert_eq!(m.winner.as_deref(), Some("D"));
    assert_eq!(m.loser.as_deref(), Some("A"));
    assert!(rounds(&t)[1].matches.iter().all(|m| !m.is_decided()));
}

#[test]
fn add_player_rebuilds_schedule() {
    let mut t = engine(&["A", "B"], 4);
    let with_open = rounds(&t).to_vec();
    assert!(with_open
        .iter()
        .flat_map(|r| &r.matches)
        .any(|m| m.p1.is_open() || m.p2.is_open()));

    t.add_player("C").unwrap();
    t.add_player("D").unwrap();
    let full = engine(&["A", "B", "C", "D"], 4);
    assert_eq!(rounds(&t), rounds(&full));
    assert_eq!(t.state(), TournamentState::RoundsGenerated);
}

#[test]
fn tables_follow_match_position() {
    let t = engine(&["A", "B", "C", "D", "E", "F"], 6);
    for round in rounds(&t) {
        let tables: Vec<u32> = round.matches.iter().filter_map(|m| m.table).collect();
        assert_eq!(tables, vec![1, 2, 1]);
    }
}

#[test]
fn round_robin_needs_two_seats() {
    assert!(matches!(
        TournamentEngine::create("Solo", TournamentFormat::RoundRobin, 1, &ids(&["A"])),
        Err(TournamentError::Configuration { capacity: 1, .. })
    ));
}

#[test]
fn losers_side_is_out_of_range() {
    let mut t = engine(&["A", "B"], 2);
    let at = MatchLocation::losers(0, 0);
    assert_eq!(t.report_result(at, "A"), Err(TournamentError::OutOfRange(at)));
}
