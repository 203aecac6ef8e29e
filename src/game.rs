pub use self::options::{
    check_names, normalize_name, recommended_undercovers, RoleConfig, RoleSlot, MIN_PLAYERS,
};
pub use self::player::{assign_roles, Player};
pub use self::role::{Ability, Role, RoleInfo, Team, WordType};
pub use self::victory::evaluate;
pub use self::votes::Votes;
pub use self::words::WordPair;
use crate::error::GameError;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

mod json;
mod options;
mod player;
mod role;
mod victory;
mod votes;
mod words;

/// A game of Undercover.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Game {
    /// The players in turn order.
    players: Vec<Player>,
    words: WordPair,
    current_player: usize,
    round: usize,
    phase: Phase,
    reveal_index: usize,
    votes: Votes,
    /// A Mr. White voted out this round, who may still guess the main word.
    pending_guess: Option<usize>,
    winner: Option<Team>,
    mr_white_guess: Option<String>,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players are privately shown their words, one at a time.
    Reveal,
    /// Players take turns giving clues.
    Play,
    /// Players vote to eliminate a suspect.
    Vote,
    Finished,
}

/// The outcome of the vote at the end of a round.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Nobody was eliminated.
    Skipped,
    /// A player was eliminated, possibly ending the game.
    Eliminated { player: String, winner: Option<Team> },
    /// Mr. White was voted out and gets one guess at the main word.
    GuessPending { player: String },
}

/// What a player is shown when they look at their card; never their role.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RevealCard {
    pub name: String,
    pub word: Option<String>,
    /// The player must give their clues without speaking.
    pub must_mime: bool,
    /// The player has no word and must bluff.
    pub no_word: bool,
}

impl Game {
    /// Deals roles to the named players and creates a new game of Undercover.
    pub fn new<S: AsRef<str>>(
        config: RoleConfig,
        player_names: &[S],
        words: WordPair,
        seed: u64,
    ) -> Result<Self, GameError> {
        let names = player_names
            .iter()
            .map(|name| normalize_name(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        check_names(&names)?;
        config.validate(names.len())?;

        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let players = assign_roles(&names, &config, &words, &mut rng)?;
        Self::start(players, words)
    }

    /// Starts a game with players who have already been dealt their roles.
    pub fn start(mut players: Vec<Player>, words: WordPair) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::TooFewPlayers {
                required: MIN_PLAYERS,
                actual: 0,
            });
        }
        for player in players.iter_mut() {
            player.name = normalize_name(&player.name)?;
        }
        let names = players.iter().map(|p| &p.name[..]).collect::<Vec<_>>();
        check_names(&names)?;

        log::info!("Starting game with {} players", players.len());
        Ok(Game {
            players,
            words,
            current_player: 0,
            round: 1,
            phase: Phase::Reveal,
            reveal_index: 0,
            votes: Votes::new(),
            pending_guess: None,
            winner: None,
            mr_white_guess: None,
        })
    }

    /// Gets the player names, in turn order.
    pub fn player_names(&self) -> impl Iterator<Item = &'_ str> {
        self.players.iter().map(|p| &p.name[..])
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Finds a player with the given name.
    pub fn find_player(&self, name: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .ok_or(GameError::PlayerNotFound)
    }

    pub fn words(&self) -> &WordPair {
        &self.words
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    pub fn votes(&self) -> &Votes {
        &self.votes
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn mr_white_guess(&self) -> Option<&str> {
        self.mr_white_guess.as_deref()
    }

    /// Gets the Mr. White who has been voted out and has yet to make their guess.
    pub fn pending_guess(&self) -> Option<&Player> {
        self.pending_guess.map(|idx| &self.players[idx])
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive()).count()
    }

    /// Iterates over the players still in the game, in turn order.
    pub fn alive_players(&self) -> impl Iterator<Item = &'_ Player> {
        self.players.iter().filter(|p| p.alive())
    }

    /// Gets the player whose turn it is to give a clue.
    pub fn current_player(&self) -> Option<&Player> {
        (self.phase == Phase::Play).then(|| &self.players[self.current_player])
    }

    /// Gets the player who is next to look at their card.
    pub fn player_to_reveal(&self) -> Option<&Player> {
        (self.phase == Phase::Reveal).then(|| &self.players[self.reveal_index])
    }

    /// Returns whether every living player has voted this round.
    pub fn all_players_voted(&self) -> bool {
        self.alive_players().all(|p| p.has_voted)
    }

    /// Gets the first living player, in turn order, who has not voted yet.
    pub fn next_voter(&self) -> Option<&Player> {
        if self.phase != Phase::Vote {
            return None;
        }
        self.alive_players().find(|p| !p.has_voted)
    }

    /// Gets the player with the most votes this round, if any votes were cast.
    pub fn plurality_target(&self) -> Option<&str> {
        self.votes.tally()
    }

    /// Gets what the given player is shown during the reveal.
    pub fn reveal_card(&self, player: usize) -> Result<RevealCard, GameError> {
        self.check_player_index(player)?;
        let player = &self.players[player];
        Ok(RevealCard {
            name: player.name.clone(),
            word: player.word.clone(),
            must_mime: !player.role.can_speak(),
            no_word: !player.role.has_word(),
        })
    }

    /// Called once the current player has seen their card.
    pub fn advance_reveal(&mut self) -> Result<(), GameError> {
        self.check_phase(Phase::Reveal)?;
        self.reveal_index += 1;
        if self.reveal_index >= self.num_players() {
            log::info!("All players have seen their cards");
            self.phase = Phase::Play;
            self.current_player = self.first_alive();
        }
        Ok(())
    }

    /// Called when the current player has given their clue, or has run out of time.
    ///
    /// Once every living player has had a turn, voting begins.
    pub fn advance_turn(&mut self) -> Result<(), GameError> {
        self.check_phase(Phase::Play)?;
        let next = self.next_player(self.current_player);
        self.current_player = next;
        log::debug!("Turn passes to {}", self.players[next].name);
        if next == self.first_alive() {
            self.start_vote();
        }
        Ok(())
    }

    /// Ends the round of clues early and begins voting.
    pub fn call_vote(&mut self) -> Result<(), GameError> {
        self.check_phase(Phase::Play)?;
        self.start_vote();
        Ok(())
    }

    /// Called when a player casts their vote.
    pub fn cast_vote(&mut self, voter: &str, target: &str) -> Result<(), GameError> {
        self.check_phase(Phase::Vote)?;
        if self.pending_guess.is_some() {
            return Err(GameError::InvalidAction);
        }
        let voter = self.find_player(voter)?;
        self.find_player(target)?;

        let player = &mut self.players[voter];
        if !player.alive() {
            return Err(GameError::PlayerEliminated);
        }
        if player.has_voted {
            log::warn!("{} tried to vote twice", player.name);
            return Err(GameError::AlreadyVoted);
        }
        player.has_voted = true;
        player.voted_for = Some(target.to_string());
        self.votes.vote(target);
        log::debug!("{} voted for {}", self.players[voter].name, target);
        Ok(())
    }

    /// Ends the vote by eliminating the given player, or nobody if `None`.
    pub fn resolve_vote(&mut self, target: Option<&str>) -> Result<Resolution, GameError> {
        self.check_phase(Phase::Vote)?;
        if self.pending_guess.is_some() {
            return Err(GameError::InvalidAction);
        }

        let Some(target) = target else {
            log::info!("Nobody was eliminated in round {}", self.round);
            self.next_round();
            return Ok(Resolution::Skipped);
        };

        let idx = self.find_player(target)?;
        let player = &self.players[idx];
        if !player.alive() {
            return Err(GameError::PlayerEliminated);
        }
        if !player.role.has_word() {
            log::info!("{} was voted out and may guess the word", player.name);
            self.pending_guess = Some(idx);
            return Ok(Resolution::GuessPending {
                player: player.name.clone(),
            });
        }

        let winner = self.eliminate(idx);
        Ok(Resolution::Eliminated {
            player: self.players[idx].name.clone(),
            winner,
        })
    }

    /// Called when a voted out Mr. White makes their guess, or passes with `None`.
    /// Returns whether the guess was correct.
    pub fn submit_guess(&mut self, guess: Option<&str>) -> Result<bool, GameError> {
        self.check_not_over()?;
        let Some(idx) = self.pending_guess.take() else {
            return Err(GameError::InvalidAction);
        };

        // A blank guess is a pass
        if let Some(guess) = guess.map(str::trim).filter(|guess| !guess.is_empty()) {
            self.mr_white_guess = Some(guess.to_string());
            if self.words.matches_main(guess) {
                log::info!("{} guessed the word", self.players[idx].name);
                self.finish(self.players[idx].team);
                return Ok(true);
            }
        }

        self.eliminate(idx);
        Ok(false)
    }

    /// Called when the seer chooses a player whose role they wish to see.
    pub fn use_seer(&mut self, seer: &str, target: &str) -> Result<Role, GameError> {
        self.check_phase(Phase::Play)?;
        let seer = self.find_player(seer)?;
        let target = self.find_player(target)?;

        let player = &self.players[seer];
        if player.role.ability() != Ability::SeeRole || player.ability_used {
            return Err(GameError::AbilityUnavailable);
        }
        if !player.alive() || !self.players[target].alive() {
            return Err(GameError::PlayerEliminated);
        }
        if seer == target {
            return Err(GameError::InvalidPlayerChoice);
        }

        self.players[seer].ability_used = true;
        Ok(self.players[target].role)
    }

    /// Determines which team has won, if any.
    pub fn evaluate_winner(&self) -> Option<Team> {
        evaluate(&self.players)
    }

    /// Ends the game in favour of the given team.
    pub fn end_game(&mut self, winner: Team) -> Result<(), GameError> {
        self.check_not_over()?;
        self.finish(winner);
        Ok(())
    }

    fn start_vote(&mut self) {
        log::info!("Voting begins for round {}", self.round);
        self.phase = Phase::Vote;
        self.votes.clear();
        for player in self.players.iter_mut() {
            player.reset_vote();
        }
    }

    /// Eliminates a player, then either ends the game or starts the next round.
    fn eliminate(&mut self, idx: usize) -> Option<Team> {
        self.players[idx].eliminated = true;
        log::info!("{} was eliminated", self.players[idx].name);

        self.switch_chameleons();
        let winner = self.evaluate_winner();
        match winner {
            Some(team) => self.finish(team),
            None => self.next_round(),
        }
        winner
    }

    /// Once half the players are gone, any surviving chameleon joins the undercovers.
    fn switch_chameleons(&mut self) {
        if self.num_players_alive() > self.num_players() / 2 {
            return;
        }
        for player in self.players.iter_mut() {
            let switches = player.role.ability() == Ability::ChangeTeam;
            if switches && player.alive() && player.team != Team::Undercover {
                log::info!("{} switches to the undercover team", player.name);
                player.team = Team::Undercover;
            }
        }
    }

    fn next_round(&mut self) {
        self.phase = Phase::Play;
        self.round += 1;
        self.current_player = self.first_alive();
    }

    fn finish(&mut self, winner: Team) {
        log::info!("Game over, {} team wins", winner.to_string());
        self.winner = Some(winner);
        self.phase = Phase::Finished;
        self.pending_guess = None;
    }

    /// Returns `Ok` if the game is still in progress.
    fn check_not_over(&self) -> Result<(), GameError> {
        if self.game_over() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Returns `Ok` if the game is in the given phase.
    fn check_phase(&self, phase: Phase) -> Result<(), GameError> {
        self.check_not_over()?;
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidAction)
        }
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: usize) -> Result<(), GameError> {
        if player < self.num_players() {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerIndex)
        }
    }

    /// Finds the first alive player in turn order.
    fn first_alive(&self) -> usize {
        self.players.iter().position(|p| p.alive()).unwrap_or(0)
    }

    /// Finds the next alive player, or the given player if nobody else is alive.
    fn next_player(&self, player: usize) -> usize {
        (player + 1..self.num_players())
            .chain(0..player)
            .find(|idx| self.players[*idx].alive())
            .unwrap_or(player)
    }
}
