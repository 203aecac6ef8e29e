//! Setup validation tests

use crate::error::GameError;
use crate::game::{check_names, recommended_undercovers, Role, RoleConfig, RoleSlot};

#[test]
fn four_players_is_the_minimum() {
    let config = RoleConfig::default();
    assert_eq!(
        config.validate(3),
        Err(GameError::TooFewPlayers { required: 4, actual: 3 })
    );
    assert_eq!(config.validate(4), Ok(()));
}

#[test]
fn too_many_special_roles_leaves_too_few_civils() {
    let config = RoleConfig {
        undercover: RoleSlot::enabled(3),
        mr_white: RoleSlot::enabled(2),
        ..Default::default()
    };
    assert_eq!(config.validate(4), Err(GameError::TooManySpecialRoles));
}

#[test]
fn seer_and_chameleon_count_as_special_roles() {
    let config = RoleConfig {
        seer: RoleSlot::enabled(1),
        chameleon: RoleSlot::enabled(1),
        ..Default::default()
    };
    assert_eq!(config.num_special_roles(), 3);
    assert_eq!(config.validate(4), Err(GameError::TooManySpecialRoles));
    assert_eq!(config.validate(5), Ok(()));
}

#[test]
fn min_players_grows_with_the_config() {
    let with = |undercover, mr_white, mr_mime| RoleConfig {
        undercover: RoleSlot::enabled(undercover),
        mr_white: RoleSlot { enabled: mr_white > 0, count: mr_white },
        mr_mime: RoleSlot { enabled: mr_mime > 0, count: mr_mime },
        ..Default::default()
    };
    assert_eq!(with(1, 0, 0).min_players(), 4);
    assert_eq!(with(2, 0, 0).min_players(), 5);
    assert_eq!(with(3, 0, 0).min_players(), 6);
    assert_eq!(with(1, 1, 0).min_players(), 5);
    assert_eq!(with(1, 2, 1).min_players(), 7);
    assert_eq!(with(2, 1, 1).min_players(), 7);
}

#[test]
fn config_minimum_is_enforced() {
    let config = RoleConfig {
        undercover: RoleSlot::enabled(3),
        ..Default::default()
    };
    assert_eq!(
        config.validate(5),
        Err(GameError::TooFewPlayers { required: 6, actual: 5 })
    );
    assert_eq!(config.validate(6), Ok(()));
}

#[test]
fn role_counts_are_bounded() {
    let config = RoleConfig {
        undercover: RoleSlot::enabled(4),
        ..Default::default()
    };
    assert_eq!(
        config.validate(12),
        Err(GameError::InvalidRoleCount { role: "undercover", max: 3 })
    );

    let config = RoleConfig {
        seer: RoleSlot::enabled(2),
        ..Default::default()
    };
    assert_eq!(
        config.validate(12),
        Err(GameError::InvalidRoleCount { role: "seer", max: 1 })
    );
}

#[test]
fn disabled_roles_are_not_counted() {
    let config = RoleConfig {
        mr_white: RoleSlot { enabled: false, count: 9 },
        ..Default::default()
    };
    assert_eq!(config.count(Role::MrWhite), 0);
    assert_eq!(config.validate(4), Ok(()));
}

#[test]
fn enabled_roles_deal_at_least_one() {
    let config = RoleConfig {
        undercover: RoleSlot { enabled: false, count: 0 },
        mr_white: RoleSlot::enabled(0),
        ..Default::default()
    };
    assert_eq!(config.count(Role::Undercover), 1);
    assert_eq!(config.count(Role::MrWhite), 1);
}

#[test]
fn recommended_undercover_count() {
    assert_eq!(recommended_undercovers(4), 1);
    assert_eq!(recommended_undercovers(5), 1);
    assert_eq!(recommended_undercovers(6), 2);
    assert_eq!(recommended_undercovers(8), 2);
    assert_eq!(recommended_undercovers(9), 3);
    assert_eq!(RoleConfig::recommended(7).count(Role::Undercover), 2);
}

#[test]
fn names_are_compared_after_trimming() {
    assert_eq!(check_names(&["Alex", "Bob"]), Ok(()));
    assert_eq!(
        check_names(&["Alex", " Alex "]),
        Err(GameError::DuplicatePlayerName("Alex".into()))
    );
    assert_eq!(check_names(&["Alex", ""]), Err(GameError::InvalidPlayerName));
}

#[test]
fn missing_config_fields_take_defaults() {
    let config: RoleConfig =
        serde_json::from_str(r#"{ "mr_white": { "enabled": true, "count": 2 } }"#).unwrap();
    assert_eq!(config.count(Role::Undercover), 1);
    assert_eq!(config.count(Role::MrWhite), 2);
    assert_eq!(config.count(Role::Seer), 0);
}
