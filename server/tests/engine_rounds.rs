//! Scenario tests for the game engine: rotation, finishing, restart, and
//! role persistence across disconnects.

use std::time::SystemTime;

use fishy_server::game::{Game, Player};
use fishy_shared::{GameStatus, PlayerId, Role};

fn game_with(names: &[&str]) -> Game {
    let mut g = Game::new();
    for name in names {
        let id = g.next_player_id();
        g.add_player(Player::new(id, name.to_string()));
    }
    g
}

fn guesser_id(g: &Game) -> PlayerId {
    g.current_guesser().map(|p| p.id).unwrap()
}

fn truth_teller_id(g: &Game) -> PlayerId {
    g.players
        .iter()
        .find(|p| p.role == Some(Role::TruthTeller))
        .map(|p| p.id)
        .unwrap()
}

#[test]
fn guesser_rotates_in_join_order_and_game_finishes_after_a_full_cycle() {
    let mut g = game_with(&["Alice", "Bob", "Carol"]);
    g.start_game().unwrap();
    assert_eq!(guesser_id(&g), PlayerId(1));

    // ending each round by naming the truth-teller walks the rotation
    let tt = truth_teller_id(&g);
    g.process_guess(PlayerId(1), tt).unwrap();
    assert_eq!(g.state.current_round, 2);
    assert_eq!(guesser_id(&g), PlayerId(2));

    let tt = truth_teller_id(&g);
    g.process_guess(PlayerId(2), tt).unwrap();
    assert_eq!(g.state.current_round, 3);
    assert_eq!(guesser_id(&g), PlayerId(3));

    let tt = truth_teller_id(&g);
    g.process_guess(PlayerId(3), tt).unwrap();
    assert_eq!(g.state.status, GameStatus::Finished);

    // one full cycle: everyone played every round
    for p in &g.players {
        assert_eq!(p.stats.rounds_played, 3);
    }
}

#[test]
fn final_results_rank_by_points_and_name_award_winners() {
    let mut g = game_with(&["Alice", "Bob", "Carol", "Dave"]);
    g.start_game().unwrap();

    while g.state.status == GameStatus::Playing {
        let guesser = guesser_id(&g);
        // catch every liar, then close the round on the truth-teller
        let liars: Vec<PlayerId> = g
            .players
            .iter()
            .filter(|p| p.role == Some(Role::Liar))
            .map(|p| p.id)
            .collect();
        for liar in liars {
            g.process_guess(guesser, liar).unwrap();
        }
    }

    let results = g.final_results();
    assert_eq!(results.rankings.len(), 4);
    assert_eq!(results.rankings[0].rank, 1);
    for w in results.rankings.windows(2) {
        assert!(w[0].points >= w[1].points);
    }
    // every guesser swept their round, so the top score is also best guesser
    assert_eq!(
        results.awards.best_guesser.correct_guesses,
        results
            .stats
            .values()
            .map(|s| s.correct_guesses)
            .max()
            .unwrap()
    );
    assert!(results
        .rankings
        .iter()
        .any(|r| r.awards.as_deref().is_some_and(|a| a.contains("Best Guesser"))));
}

#[test]
fn snapshots_hide_roles_and_answers_from_the_wrong_eyes() {
    let mut g = game_with(&["Alice", "Bob", "Carol"]);
    g.start_game().unwrap();

    let guesser = guesser_id(&g);
    let teller = truth_teller_id(&g);

    let guesser_view = g.player_state(guesser);
    assert_eq!(guesser_view.players[&guesser].role, Some(Role::Guesser));
    assert_eq!(guesser_view.players[&teller].role, None);
    assert!(guesser_view.question.is_some());
    assert!(guesser_view.answer.is_none());

    let teller_view = g.player_state(teller);
    assert_eq!(teller_view.players[&teller].role, Some(Role::TruthTeller));
    assert!(teller_view.answer.is_some());
}

#[test]
fn disconnect_preserves_round_position() {
    let mut g = game_with(&["Alice", "Bob", "Carol"]);
    g.start_game().unwrap();

    let teller = truth_teller_id(&g);
    g.mark_disconnected(teller, SystemTime::now());
    assert_eq!(g.connected_count(), 2);
    assert_eq!(g.disconnected_names().len(), 1);

    g.mark_reconnected(teller);
    // the role survived the disconnect untouched
    assert_eq!(
        g.player(teller).unwrap().role,
        Some(Role::TruthTeller)
    );
    assert_eq!(g.connected_count(), 3);
}

#[test]
fn restart_keeps_the_roster_and_wipes_the_rest() {
    let mut g = game_with(&["Alice", "Bob", "Carol"]);
    g.start_game().unwrap();
    let guesser = guesser_id(&g);
    let tt = truth_teller_id(&g);
    let liar = g
        .players
        .iter()
        .find(|p| p.role == Some(Role::Liar))
        .map(|p| p.id)
        .unwrap();
    g.process_guess(guesser, liar).unwrap();
    g.process_guess(guesser, tt).unwrap();

    g.reset_for_restart();
    assert_eq!(g.state.status, GameStatus::Waiting);
    assert_eq!(g.state.current_round, 0);
    assert_eq!(g.players.len(), 3);
    for p in &g.players {
        assert_eq!(p.points, 0);
        assert_eq!(p.role, None);
        assert_eq!(p.stats.rounds_played, 0);
    }
}
