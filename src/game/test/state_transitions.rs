//! Reveal and turn order tests

use super::test_utils::*;
use crate::error::GameError;
use crate::game::Role::*;
use crate::game::{Phase, RoleConfig, Team};

#[test]
fn new_game_starts_with_the_reveal() {
    let game = create_test_game(5, RoleConfig::default(), 0);
    assert_eq!(game.phase(), Phase::Reveal);
    assert_eq!(game.round(), 1);
    assert_eq!(game.reveal_index(), 0);
    assert_eq!(game.current_player_index(), 0);
    assert_eq!(game.winner(), None);
    assert_eq!(game.player_to_reveal().unwrap().name, game.players()[0].name);
}

#[test]
fn each_player_is_revealed_once_in_order() {
    let mut game = create_test_game(5, RoleConfig::default(), 0);
    let names = game.player_names().map(str::to_string).collect::<Vec<_>>();

    for name in names.iter() {
        assert_eq!(game.phase(), Phase::Reveal);
        assert_eq!(&game.player_to_reveal().unwrap().name, name);
        game.advance_reveal().unwrap();
    }

    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.current_player_index(), 0);
    assert!(game.player_to_reveal().is_none());
    assert_eq!(game.advance_reveal(), Err(GameError::InvalidAction));
}

#[test]
fn turns_cannot_start_during_the_reveal() {
    let mut game = create_test_game(4, RoleConfig::default(), 0);
    assert_eq!(game.advance_turn(), Err(GameError::InvalidAction));
    assert_eq!(game.call_vote(), Err(GameError::InvalidAction));
    assert!(game.current_player().is_none());
}

#[test]
fn full_round_of_turns_leads_to_the_vote() {
    let mut game = create_test_game(6, RoleConfig::default(), 4);
    skip_reveal(&mut game);

    for expected in 1..6 {
        game.advance_turn().unwrap();
        assert_eq!(game.phase(), Phase::Play);
        assert_eq!(game.current_player_index(), expected);
    }

    game.advance_turn().unwrap();
    assert_eq!(game.phase(), Phase::Vote);
    assert_eq!(game.current_player_index(), 0);
}

#[test]
fn turns_skip_eliminated_players() {
    let mut game = game_with_roles(&[Undercover, Civil, Civil, Civil, Civil]);
    game.players[1].eliminated = true;
    game.players[3].eliminated = true;

    game.advance_turn().unwrap();
    assert_eq!(game.current_player_index(), 2);
    game.advance_turn().unwrap();
    assert_eq!(game.current_player_index(), 4);
    game.advance_turn().unwrap();
    assert_eq!(game.current_player_index(), 0);
    assert_eq!(game.phase(), Phase::Vote);
}

#[test]
fn turn_order_never_selects_an_eliminated_player() {
    let mut game = game_with_roles(&[Civil, Undercover, Civil, Civil, Civil, Civil]);
    game.players[0].eliminated = true;
    game.players[4].eliminated = true;
    game.current_player = 1;

    let mut seen = vec![];
    while game.phase() == Phase::Play {
        game.advance_turn().unwrap();
        seen.push(game.current_player_index());
    }
    assert_eq!(seen, [2, 3, 5, 1]);
}

#[test]
fn lone_survivor_goes_straight_to_the_vote() {
    let mut game = game_with_roles(&[Civil, Civil, Undercover]);
    game.players[0].eliminated = true;
    game.players[1].eliminated = true;
    game.current_player = 2;

    game.advance_turn().unwrap();
    assert_eq!(game.current_player_index(), 2);
    assert_eq!(game.phase(), Phase::Vote);
}

#[test]
fn calling_a_vote_resets_last_round_votes() {
    let mut game = game_with_roles(&[Undercover, Civil, Civil, Civil]);
    game.players[2].has_voted = true;
    game.players[2].voted_for = Some("Player0".into());
    game.votes.vote("Player0");

    game.advance_turn().unwrap();
    game.call_vote().unwrap();

    assert_eq!(game.phase(), Phase::Vote);
    assert!(game.votes().is_empty());
    assert!(game.players().iter().all(|p| !p.has_voted && p.voted_for.is_none()));
}

#[test]
fn skipped_vote_starts_the_next_round_at_the_first_living_player() {
    let mut game = game_with_roles(&[Civil, Undercover, Civil, Civil, Civil]);
    game.players[0].eliminated = true;
    game.current_player = 1;
    game.call_vote().unwrap();

    game.resolve_vote(None).unwrap();
    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.round(), 2);
    assert_eq!(game.current_player_index(), 1);
}

#[test]
fn finished_game_accepts_no_transitions() {
    let mut game = game_with_roles(&[Undercover, Civil, Civil, Civil]);
    game.end_game(Team::Civil).unwrap();

    assert!(game.game_over());
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.winner(), Some(Team::Civil));
    assert_eq!(game.advance_turn(), Err(GameError::GameOver));
    assert_eq!(game.advance_reveal(), Err(GameError::GameOver));
    assert_eq!(game.cast_vote("Player1", "Player0"), Err(GameError::GameOver));
    assert_eq!(game.resolve_vote(None), Err(GameError::GameOver));
    assert_eq!(game.submit_guess(Some("Cat")), Err(GameError::GameOver));
    assert_eq!(game.end_game(Team::Undercover), Err(GameError::GameOver));
    assert_eq!(game.winner(), Some(Team::Civil));
}

#[test]
fn reveal_card_shows_the_word_but_not_the_role() {
    let game = game_with_roles(&[Undercover, MrWhite, MrMime, Civil]);

    let card = game.reveal_card(0).unwrap();
    assert_eq!(card.word.as_deref(), Some("Dog"));
    assert!(!card.must_mime && !card.no_word);

    let card = game.reveal_card(1).unwrap();
    assert_eq!(card.word, None);
    assert!(card.no_word);

    let card = game.reveal_card(2).unwrap();
    assert_eq!(card.word.as_deref(), Some("Cat"));
    assert!(card.must_mime);

    let json = serde_json::to_value(game.reveal_card(3).unwrap()).unwrap();
    assert!(json.get("role").is_none());
    assert_eq!(json["word"], "Cat");

    assert_eq!(game.reveal_card(4), Err(GameError::InvalidPlayerIndex));
}
