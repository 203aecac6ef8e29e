use serde::{Deserialize, Serialize};

/// The three teams that can win a game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Civil,
    Undercover,
    MrWhite,
}

impl ToString for Team {
    fn to_string(&self) -> String {
        match self {
            Team::Civil => "civil",
            Team::Undercover => "undercover",
            Team::MrWhite => "mr_white",
        }
        .to_string()
    }
}

/// Which word of the pair a role is dealt.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum WordType {
    Main,
    Similar,
    None,
}

/// A role's once-per-game special ability, if any.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    None,
    SeeRole,
    ChangeTeam,
}

/// The six roles a player can be dealt.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Civil,
    Undercover,
    MrWhite,
    MrMime,
    Seer,
    Chameleon,
}

/// Static attributes of a role.
#[derive(Debug)]
pub struct RoleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub team: Team,
    pub word_type: WordType,
    pub can_speak: bool,
    pub ability: Ability,
}

static CATALOG: [RoleInfo; 6] = [
    RoleInfo {
        id: "civil",
        name: "Civil",
        team: Team::Civil,
        word_type: WordType::Main,
        can_speak: true,
        ability: Ability::None,
    },
    RoleInfo {
        id: "undercover",
        name: "Undercover",
        team: Team::Undercover,
        word_type: WordType::Similar,
        can_speak: true,
        ability: Ability::None,
    },
    RoleInfo {
        id: "mr_white",
        name: "Mr. White",
        team: Team::MrWhite,
        word_type: WordType::None,
        can_speak: true,
        ability: Ability::None,
    },
    RoleInfo {
        id: "mr_mime",
        name: "Mr. Mime",
        team: Team::Civil,
        word_type: WordType::Main,
        can_speak: false,
        ability: Ability::None,
    },
    RoleInfo {
        id: "seer",
        name: "Seer",
        team: Team::Civil,
        word_type: WordType::Main,
        can_speak: true,
        ability: Ability::SeeRole,
    },
    // Starts on the civil team; may switch to the undercover team mid-game.
    RoleInfo {
        id: "chameleon",
        name: "Chameleon",
        team: Team::Civil,
        word_type: WordType::Main,
        can_speak: true,
        ability: Ability::ChangeTeam,
    },
];

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Civil,
        Role::Undercover,
        Role::MrWhite,
        Role::MrMime,
        Role::Seer,
        Role::Chameleon,
    ];

    /// Gets the catalog entry for this role.
    pub fn info(self) -> &'static RoleInfo {
        &CATALOG[self as usize]
    }

    /// Looks up a role by its identifier.
    pub fn from_id(id: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.info().id == id)
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// The team this role starts the game on.
    pub fn team(self) -> Team {
        self.info().team
    }

    pub fn word_type(self) -> WordType {
        self.info().word_type
    }

    pub fn has_word(self) -> bool {
        self.word_type() != WordType::None
    }

    pub fn can_speak(self) -> bool {
        self.info().can_speak
    }

    pub fn ability(self) -> Ability {
        self.info().ability
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        self.info().name.to_string()
    }
}
