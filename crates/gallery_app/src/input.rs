//! Line commands typed at the prompt.

/// Default scroll step, roughly half a screen.
pub const SCROLL_STEP_PX: i64 = 360;

pub const HELP: &str = "commands: down [px] | up [px] | end | fav <n> | all | favs | show | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Scroll(i64),
    ScrollToEnd,
    /// Toggle the n-th tile of the current view, 1-based.
    Toggle(usize),
    ShowAll,
    ShowFavorites,
    Show,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    let step = |arg: Option<&str>| match arg {
        Some(raw) => raw.parse::<u32>().ok().map(i64::from),
        None => Some(SCROLL_STEP_PX),
    };

    match (head.to_ascii_lowercase().as_str(), arg) {
        ("down" | "d", arg) => step(arg).map(Command::Scroll),
        ("up" | "u", arg) => step(arg).map(|px| Command::Scroll(-px)),
        ("end", None) => Some(Command::ScrollToEnd),
        ("fav" | "f", Some(raw)) => raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(Command::Toggle),
        ("all", None) => Some(Command::ShowAll),
        ("favs" | "favorites", None) => Some(Command::ShowFavorites),
        ("show" | "s", None) => Some(Command::Show),
        ("help" | "h" | "?", None) => Some(Command::Help),
        ("quit" | "q" | "exit", None) => Some(Command::Quit),
        _ => None,
    }
}
