//! Line commands typed at the dashboard prompt.

use crate::state::Action;

pub const HELP: &str = "\
Commands:
  <city>            search for a city
  search <city>     search for a city
  locate            weather for your current location
  unit              switch between °C and °F
  theme             switch between light and dark
  fav               add or remove the current city from favorites
  open <n>          show favorite n
  unfav <n>         remove favorite n
  popular <n>       show popular city n
  dismiss           close the current message
  help              show this help
  quit              exit";

#[derive(Debug)]
pub enum Command {
    Dispatch(Action),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word.to_ascii_lowercase().as_str(), rest) {
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        ("locate", "") => Command::Dispatch(Action::Locate),
        ("unit", "") => Command::Dispatch(Action::ToggleUnit),
        ("theme", "") => Command::Dispatch(Action::ToggleTheme),
        ("fav", "") => Command::Dispatch(Action::ToggleFavorite),
        ("dismiss", "") => Command::Dispatch(Action::DismissNotice),
        ("search", "") => Command::Unknown("search needs a city name".to_string()),
        ("search", city) => Command::Dispatch(Action::Search(city.to_string())),
        ("open", n) => indexed(n, "open", Action::OpenFavorite),
        ("unfav", n) => indexed(n, "unfav", Action::RemoveFavorite),
        ("popular", n) => indexed(n, "popular", Action::OpenPopular),
        _ => Command::Dispatch(Action::Search(line.to_string())),
    }
}

/// Convert a 1-based index argument.
fn indexed(arg: &str, name: &str, action: fn(usize) -> Action) -> Command {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Command::Dispatch(action(n - 1)),
        _ => Command::Unknown(format!("{} needs a number starting at 1", name)),
    }
}
