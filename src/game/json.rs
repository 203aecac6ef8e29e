use super::{Game, Phase};
use serde_json::{json, Value};

impl Game {
    pub fn get_board_json(&self) -> Value {
        json!({
            "players": self.get_players_json(),
            "state": self.get_board_state_json(),
            "round": self.round,
            "winner": self.winner.map(|team| team.to_string()),
        })
    }

    /// Gets the view of the game for a single player: their card, but nobody's role.
    pub fn get_player_json(&self, player: usize) -> Value {
        let Ok(card) = self.reveal_card(player) else {
            return Value::Null;
        };
        let player = &self.players[player];
        json!({
            "name": player.name,
            "card": card,
            "players": self.get_players_json(),
            "isEliminated": player.eliminated,
            "hasVoted": player.has_voted,
            "votedFor": player.voted_for,
        })
    }

    fn get_players_json(&self) -> Value {
        self.players
            .iter()
            .map(|player| {
                // Roles become public once a player is out
                json!({
                    "name": player.name,
                    "isEliminated": player.eliminated,
                    "role": player.eliminated.then_some(player.role),
                })
            })
            .collect()
    }

    fn get_board_state_json(&self) -> Value {
        match self.phase {
            Phase::Reveal => json!({
                "type": "reveal",
                "revealIndex": self.reveal_index,
                "player": self.players[self.reveal_index].name,
            }),
            Phase::Play => json!({
                "type": "play",
                "currentPlayer": self.players[self.current_player].name,
            }),
            Phase::Vote => json!({
                "type": "vote",
                "votes": self
                    .votes
                    .iter()
                    .map(|(name, count)| json!({ "name": name, "count": count }))
                    .collect::<Value>(),
                "nextVoter": self.next_voter().map(|p| &p.name),
                "pendingGuess": self.pending_guess().map(|p| &p.name),
            }),
            Phase::Finished => json!({ "type": "finished" }),
        }
    }

    /// Gets the full record of a finished game, including every role and both words.
    pub fn get_outcome_json(&self) -> Value {
        let Some(winner) = self.winner else {
            return json!({ "finished": false });
        };
        json!({
            "finished": true,
            "winner": winner.to_string(),
            "words": self.words,
            "rounds": self.round,
            "mrWhiteGuess": self.mr_white_guess,
            "players": self
                .players
                .iter()
                .map(|player| json!({
                    "name": player.name,
                    "role": player.role,
                    "team": player.team,
                    "word": player.word,
                    "isEliminated": player.eliminated,
                }))
                .collect::<Value>(),
        })
    }
}
