use anyhow::{bail, Context};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::io::{self, BufRead, Write};
use undercover::game::{
    recommended_undercovers, Game, Phase, Resolution, RoleConfig, RoleSlot, WordPair,
};
use undercover::session::{Session, SessionStore};

fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    if let Err(err) = run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "undercover.db".to_string());
    let store = SessionStore::open(&db_path)
        .with_context(|| format!("could not open session store at {}", db_path))?;
    let mut prompt = Prompt::new();

    let mut session = store.load()?.unwrap_or_default();
    if !(session.has_active_game() && prompt.yes("A game is in progress. Resume it?")?) {
        session.reset_game();
        setup(&mut session, &mut prompt)?;
        let words = pick_words(&mut prompt)?;
        session.start_game(words, rand::thread_rng().next_u64())?;
        store.save(&mut session)?;
    }

    loop {
        let Some(game) = session.game() else {
            bail!("no game in progress");
        };
        if game.phase() == Phase::Finished {
            show_outcome(game);
            return Ok(());
        }
        step(&mut session, &mut prompt)?;
        store.save(&mut session)?;
    }
}

/// Collects the players and roles for a new game.
fn setup(session: &mut Session, prompt: &mut Prompt) -> anyhow::Result<()> {
    if !session.player_names().is_empty() {
        println!("Players: {}", session.player_names().join(", "));
        if !prompt.yes("Keep these players?")? {
            session.clear_players();
        }
    }
    if session.player_names().is_empty() {
        println!("Enter player names, then a blank line to finish.");
        loop {
            let name = prompt.line("Name")?;
            if name.is_empty() {
                break;
            }
            if !session.add_player(&name) {
                println!("That name is already taken.");
            }
        }
    }

    loop {
        let recommended = recommended_undercovers(session.player_names().len());
        let config = RoleConfig {
            undercover: RoleSlot::enabled(prompt.number("Undercovers", recommended)?),
            mr_white: optional_slot(prompt.number("Mr. Whites", 0)?),
            mr_mime: optional_slot(prompt.number("Mr. Mimes", 0)?),
            seer: optional_slot(prompt.yes("Include the seer?")? as usize),
            chameleon: optional_slot(prompt.yes("Include the chameleon?")? as usize),
        };
        session.set_config(config);
        match session.validate() {
            Ok(()) => return Ok(()),
            Err(err) => println!("Cannot start: {}", err),
        }
    }
}

fn optional_slot(count: usize) -> RoleSlot {
    if count == 0 {
        RoleSlot::disabled()
    } else {
        RoleSlot::enabled(count)
    }
}

/// Chooses the word pair, from `WORDS_FILE` if set, or from the host otherwise.
fn pick_words(prompt: &mut Prompt) -> anyhow::Result<WordPair> {
    if let Ok(path) = std::env::var("WORDS_FILE") {
        let contents =
            std::fs::read_to_string(&path).with_context(|| format!("could not read {}", path))?;
        let pairs = contents
            .lines()
            .filter_map(|line| line.split_once(','))
            .map(|(main, similar)| WordPair::new(main.trim(), similar.trim()))
            .collect::<Vec<_>>();
        let Some(words) = pairs.choose(&mut rand::thread_rng()) else {
            bail!("{} contains no word pairs", path);
        };
        return Ok(words.clone());
    }
    println!("The host picks the words, and should not play.");
    let main = prompt.line("Civil word")?;
    let similar = prompt.line("Undercover word")?;
    clear_screen();
    Ok(WordPair::new(main, similar))
}

/// Plays the next step of the game.
fn step(session: &mut Session, prompt: &mut Prompt) -> anyhow::Result<()> {
    let Some(game) = session.game() else {
        bail!("no game in progress");
    };

    match game.phase() {
        Phase::Reveal => {
            let card = game.reveal_card(game.reveal_index())?;
            prompt.line(&format!("Pass the device to {}, then press enter", card.name))?;
            match &card.word {
                Some(word) => println!("Your word is: {}", word),
                None => println!("You have no word. Blend in!"),
            }
            if card.must_mime {
                println!("You may not speak. Mime your clues.");
            }
            prompt.line("Press enter to hide your card")?;
            clear_screen();
            session.mutate_game(|game| game.advance_reveal())?;
        }
        Phase::Play => {
            let Some(player) = game.current_player() else {
                bail!("no current player");
            };
            println!("Round {}: {}, give your clue.", game.round(), player.name);
            let choice = prompt.line("[enter] next player, [v] go to vote, [s] use the seer")?;
            match choice.as_str() {
                "v" => session.mutate_game(|game| game.call_vote())?,
                "s" => {
                    let seer = prompt.line("Seer's name")?;
                    let target = prompt.line("Whose role?")?;
                    match session.mutate_game(|game| game.use_seer(&seer, &target)) {
                        Ok(role) => {
                            println!("{} is {}", target, role.to_string());
                            prompt.line("Press enter to hide")?;
                            clear_screen();
                        }
                        Err(err) => println!("{}", err),
                    }
                }
                _ => session.mutate_game(|game| game.advance_turn())?,
            }
        }
        Phase::Vote if game.pending_guess().is_some() => {
            let guess = prompt.line("Mr. White, guess the civil word (blank to pass)")?;
            let guess = (!guess.is_empty()).then_some(guess);
            let correct = session.mutate_game(|game| game.submit_guess(guess.as_deref()))?;
            if !correct {
                println!("Wrong!");
            }
        }
        Phase::Vote => {
            if let Some(voter) = game.next_voter() {
                let voter = voter.name.clone();
                let target = prompt.line(&format!("{}, who do you vote for?", voter))?;
                if let Err(err) = session.mutate_game(|game| game.cast_vote(&voter, &target)) {
                    println!("{}", err);
                }
                return Ok(());
            }
            for (name, count) in game.votes().iter() {
                println!("{}: {}", name, count);
            }
            let target = game.plurality_target().map(str::to_string);
            let choice = match &target {
                Some(target) => prompt.line(&format!(
                    "Eliminate {}? [enter] yes, [-] nobody, or another name",
                    target
                ))?,
                None => prompt.line("Eliminate whom? [-] nobody")?,
            };
            let target = match choice.as_str() {
                "-" => None,
                "" => target,
                name => Some(name.to_string()),
            };
            match session.mutate_game(|game| game.resolve_vote(target.as_deref())) {
                Ok(Resolution::Skipped) => println!("Nobody was eliminated."),
                Ok(Resolution::Eliminated { player, .. }) => println!("{} was eliminated.", player),
                Ok(Resolution::GuessPending { player }) => println!("{} is Mr. White!", player),
                Err(err) => println!("{}", err),
            }
        }
        Phase::Finished => {}
    }
    Ok(())
}

fn show_outcome(game: &Game) {
    if let Some(winner) = game.winner() {
        println!("The {} team wins!", winner.to_string());
    }
    println!("The words were {} and {}.", game.words().main, game.words().similar);
    for player in game.players() {
        println!("{}: {}", player.name, player.role.to_string());
    }
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().ok();
}

/// Reads answers from standard input.
struct Prompt {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    fn line(&mut self, question: &str) -> anyhow::Result<String> {
        print!("{}: ", question);
        io::stdout().flush()?;
        match self.lines.next() {
            Some(line) => Ok(line?.trim().to_string()),
            None => bail!("input closed"),
        }
    }

    fn yes(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.line(&format!("{} [y/n]", question))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    fn number(&mut self, question: &str, default: usize) -> anyhow::Result<usize> {
        loop {
            let answer = self.line(&format!("{} [{}]", question, default))?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse() {
                Ok(n) => return Ok(n),
                Err(_) => println!("Please enter a number."),
            }
        }
    }
}
