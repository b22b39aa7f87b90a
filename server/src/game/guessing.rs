//! Guess resolution and scoring.

use fishy_shared::{GameStatus, GuessResult, PlayerId, Role};

use super::{Game, GameError};

impl Game {
    /// Resolve one guess by the current guesser. Catching a liar scores a
    /// point (plus a bonus when it was the last one); naming the
    /// truth-teller ends the round scoreless. Either way a finished round
    /// immediately advances the rotation.
    pub fn process_guess(
        &mut self,
        guesser: PlayerId,
        target: PlayerId,
    ) -> Result<GuessResult, GameError> {
        if self.state.status != GameStatus::Playing {
            return Err(GameError::NotInProgress);
        }
        let guesser_role = self.player(guesser).ok_or(GameError::UnknownPlayer)?.role;
        if guesser_role != Some(Role::Guesser) {
            return Err(GameError::NotGuesser);
        }
        if guesser == target {
            return Err(GameError::SelfGuess);
        }
        let (target_name, target_role, already_guessed) = {
            let t = self.player(target).ok_or(GameError::UnknownPlayer)?;
            (t.name.clone(), t.role, t.has_been_guessed)
        };
        if already_guessed {
            return Err(GameError::AlreadyGuessed(target_name));
        }

        if let Some(g) = self.player_mut(guesser) {
            g.stats.total_guesses += 1;
        }

        let was_truth_teller = target_role == Some(Role::TruthTeller);
        let mut points_earned = 0;
        let mut found_all_liars = false;
        if !was_truth_teller {
            points_earned = 1;
            if let Some(t) = self.player_mut(target) {
                t.has_been_guessed = true;
                t.stats.times_caught += 1;
            }
            found_all_liars = self
                .players
                .iter()
                .filter(|p| p.role == Some(Role::Liar))
                .all(|p| p.has_been_guessed);
            if found_all_liars {
                // sweep bonus
                points_earned += 1;
            }
            if let Some(g) = self.player_mut(guesser) {
                g.stats.correct_guesses += 1;
                g.points += points_earned;
            }
        }

        let round_ended = was_truth_teller || found_all_liars;
        if round_ended {
            self.end_round();
        }

        Ok(GuessResult {
            guessed_player_id: target,
            guessed_player: target_name,
            was_truth_teller,
            points_earned,
            found_all_liars,
            round_ended,
        })
    }
}
