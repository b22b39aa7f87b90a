//! Round flow: starting the game, role rotation and the question deck.

use std::time::Duration;

use fishy_shared::{GameStatus, QuestionSkipped, Role};
use rand::seq::IndexedRandom;

use super::{Game, GameError, MIN_PLAYERS};

/// Pause between a round ending and the `new_round` state going out, so
/// clients can finish the reveal animation.
pub const ROUND_INTERMISSION: Duration = Duration::from_millis(1500);

#[derive(Debug)]
pub(crate) struct QuestionCard {
    pub text: &'static str,
    pub answer: &'static str,
}

// One shared deck; per-round draws are uniform, a skip redraws excluding the
// current card.
const QUESTION_DECK: &[QuestionCard] = &[
    QuestionCard {
        text: "What is the tallest mountain on Earth?",
        answer: "Mount Everest",
    },
    QuestionCard {
        text: "Which planet is known as the Red Planet?",
        answer: "Mars",
    },
    QuestionCard {
        text: "What is the largest ocean?",
        answer: "The Pacific Ocean",
    },
    QuestionCard {
        text: "Which animal is the fastest on land?",
        answer: "The cheetah",
    },
    QuestionCard {
        text: "What is the capital of Australia?",
        answer: "Canberra",
    },
    QuestionCard {
        text: "How many legs does a spider have?",
        answer: "Eight",
    },
    QuestionCard {
        text: "What is the chemical symbol for gold?",
        answer: "Au",
    },
    QuestionCard {
        text: "Which country invented pizza?",
        answer: "Italy",
    },
    QuestionCard {
        text: "What is the longest river in the world?",
        answer: "The Nile",
    },
    QuestionCard {
        text: "How many strings does a violin have?",
        answer: "Four",
    },
    QuestionCard {
        text: "Which sea creature has three hearts?",
        answer: "The octopus",
    },
    QuestionCard {
        text: "What is the smallest country in the world?",
        answer: "Vatican City",
    },
];

impl Game {
    /// Begin round one. One guesser, one truth-teller, everyone else lies.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.state.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        self.state.status = GameStatus::Playing;
        self.state.current_round = 1;
        self.assign_roles(0);
        self.deal_question();
        Ok(())
    }

    /// Rotate roles for the round whose guesser sits at `guesser_idx` in
    /// join order. The truth-teller is drawn uniformly from the rest.
    pub(crate) fn assign_roles(&mut self, guesser_idx: usize) {
        let guesser_id = self.players[guesser_idx].id;
        let candidates: Vec<_> = self
            .players
            .iter()
            .filter(|p| p.id != guesser_id)
            .map(|p| p.id)
            .collect();
        let truth_teller = candidates.choose(&mut rand::rng()).copied();

        for p in &mut self.players {
            p.has_been_guessed = false;
            p.role = Some(if p.id == guesser_id {
                Role::Guesser
            } else if Some(p.id) == truth_teller {
                Role::TruthTeller
            } else {
                Role::Liar
            });
            p.stats.rounds_played += 1;
            if p.role == Some(Role::Liar) {
                p.stats.times_as_liar += 1;
            }
        }
    }

    pub(crate) fn deal_question(&mut self) {
        self.question = QUESTION_DECK.choose(&mut rand::rng());
    }

    /// Replace the current question. A no-op outside an active round.
    pub fn skip_question(&mut self) -> QuestionSkipped {
        if self.state.status == GameStatus::Playing {
            let current = self.question.map(|q| q.text);
            let fresh: Vec<&'static QuestionCard> = QUESTION_DECK
                .iter()
                .filter(|q| Some(q.text) != current)
                .collect();
            self.question = fresh.choose(&mut rand::rng()).copied();
        }
        let (question, answer) = self
            .question
            .map(|q| (q.text.to_string(), q.answer.to_string()))
            .unwrap_or_default();
        QuestionSkipped { question, answer }
    }

    /// Close out the current round: credit surviving liars, then either
    /// rotate the guesser or finish the game once everyone has had the seat.
    pub(crate) fn end_round(&mut self) {
        for p in &mut self.players {
            if p.role == Some(Role::Liar) && !p.has_been_guessed {
                p.stats.times_survived += 1;
            }
        }

        let total_rounds = self.players.len() as u32;
        if self.state.current_round >= total_rounds {
            self.state.status = GameStatus::Finished;
            self.question = None;
            for p in &mut self.players {
                p.role = None;
            }
        } else {
            self.state.current_round += 1;
            let guesser_idx = (self.state.current_round as usize - 1) % self.players.len();
            self.assign_roles(guesser_idx);
            self.deal_question();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use fishy_shared::PlayerId;

    fn game_with(n: usize) -> Game {
        let mut g = Game::new();
        for i in 0..n {
            let id = g.next_player_id();
            g.add_player(Player::new(id, format!("Player {}", i + 1)));
        }
        g
    }

    #[test]
    fn start_requires_three_players() {
        let mut g = game_with(2);
        assert_eq!(g.start_game(), Err(GameError::NotEnoughPlayers));
        g.add_player(Player::new(PlayerId(3), "Carol".into()));
        assert!(g.start_game().is_ok());
        assert_eq!(g.state.status, GameStatus::Playing);
        assert_eq!(g.state.current_round, 1);
    }

    #[test]
    fn roles_are_one_guesser_one_truth_teller_rest_liars() {
        let mut g = game_with(5);
        g.start_game().unwrap();
        let guessers = g.players.iter().filter(|p| p.role == Some(Role::Guesser)).count();
        let tellers = g
            .players
            .iter()
            .filter(|p| p.role == Some(Role::TruthTeller))
            .count();
        let liars = g.players.iter().filter(|p| p.role == Some(Role::Liar)).count();
        assert_eq!((guessers, tellers, liars), (1, 1, 3));
        assert!(g.question.is_some());
    }

    #[test]
    fn skip_replaces_question_only_while_playing() {
        let mut g = game_with(3);
        let skipped = g.skip_question();
        assert!(skipped.question.is_empty());

        g.start_game().unwrap();
        let before = g.question.map(|q| q.text);
        let skipped = g.skip_question();
        assert_ne!(Some(skipped.question.as_str()), before);
        assert!(!skipped.answer.is_empty());
    }
}
