use super::player::Player;
use super::role::Team;

/// Determines which team has won, given the current players, or `None` if play should continue.
///
/// Only living players count. The undercovers win as soon as they match everyone
/// else combined. The civils win once the undercovers are gone, unless a
/// Mr. White is still in hiding with more than one other player left.
pub fn evaluate(players: &[Player]) -> Option<Team> {
    let alive = || players.iter().filter(|p| p.alive());
    let undercovers = alive().filter(|p| p.team == Team::Undercover).count();
    let civils = alive().filter(|p| p.team == Team::Civil).count();
    let mr_whites = alive().filter(|p| !p.role.has_word()).count();

    if undercovers >= civils + mr_whites {
        return Some(Team::Undercover);
    }

    if undercovers == 0 {
        if mr_whites == 0 {
            return Some(Team::Civil);
        }
        // A lone Mr. White cannot win a one-on-one
        if alive().count() <= 2 {
            return Some(Team::Civil);
        }
    }

    None
}
