//! End-of-game rankings, statistics and awards.

use std::collections::BTreeMap;

use fishy_shared::{Awards, BestGuesser, BestLiar, FinalResults, PlayerId, PlayerRanking, PlayerStats};

use super::Game;

impl Game {
    pub fn final_results(&self) -> FinalResults {
        let best_guesser = self.players.iter().max_by_key(|p| p.stats.correct_guesses);
        let best_liar = self.players.iter().max_by_key(|p| p.stats.times_survived);

        let mut ranked: Vec<_> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points).then(a.id.cmp(&b.id)));

        let rankings = ranked
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let accuracy = if p.stats.total_guesses > 0 {
                    f64::from(p.stats.correct_guesses) / f64::from(p.stats.total_guesses) * 100.0
                } else {
                    0.0
                };
                let mut titles = Vec::new();
                if best_guesser.map(|b| b.id) == Some(p.id) {
                    titles.push("Best Guesser");
                }
                if best_liar.map(|b| b.id) == Some(p.id) {
                    titles.push("Best Liar");
                }
                PlayerRanking {
                    rank: i + 1,
                    name: p.name.clone(),
                    points: p.points,
                    accuracy,
                    awards: if titles.is_empty() {
                        None
                    } else {
                        Some(titles.join(", "))
                    },
                }
            })
            .collect();

        let stats: BTreeMap<PlayerId, PlayerStats> = self
            .players
            .iter()
            .map(|p| (p.id, p.stats.clone()))
            .collect();

        FinalResults {
            rankings,
            stats,
            awards: Awards {
                best_guesser: best_guesser
                    .map(|p| BestGuesser {
                        name: p.name.clone(),
                        correct_guesses: p.stats.correct_guesses,
                    })
                    .unwrap_or_default(),
                best_liar: best_liar
                    .map(|p| BestLiar {
                        name: p.name.clone(),
                        successful_escapes: p.stats.times_survived,
                    })
                    .unwrap_or_default(),
            },
        }
    }
}
