use core::str::FromStr;
use minesweep_core::Coord;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord, Coord),
    Flag(Coord, Coord),
    /// Same difficulty, fresh board
    Reset,
    /// Back to difficulty selection, optionally straight into a new preset
    New(Option<String>),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("Expected `{0} X Y`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    BadCoord(String),
}

pub const HELP: &str = "\
commands:
  r X Y     reveal the cell at column X, row Y
  f X Y     toggle a flag on the cell at column X, row Y
  reset     new board at the same difficulty
  new [D]   choose a difficulty again (Beginner, Intermediate, Expert, Custom)
  help      show this text
  q         quit";

fn coords<'a>(
    name: &'static str,
    mut parts: impl Iterator<Item = &'a str>,
) -> Result<(Coord, Coord), CommandError> {
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Err(CommandError::MissingCoords(name));
    };
    let parse = |part: &str| {
        part.parse::<Coord>()
            .map_err(|_| CommandError::BadCoord(part.to_string()))
    };
    Ok((parse(x)?, parse(y)?))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(CommandError::Empty)?;

        Ok(match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let (x, y) = coords("r", parts)?;
                Command::Reveal(x, y)
            }
            "f" | "flag" => {
                let (x, y) = coords("f", parts)?;
                Command::Flag(x, y)
            }
            "reset" => Command::Reset,
            "new" => Command::New(parts.next().map(str::to_string)),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse(), Ok(Command::Reveal(3, 4)));
        assert_eq!("  FLAG 0 7 ".parse(), Ok(Command::Flag(0, 7)));
    }

    #[test]
    fn parses_lifecycle_commands() {
        assert_eq!("reset".parse(), Ok(Command::Reset));
        assert_eq!("new".parse(), Ok(Command::New(None)));
        assert_eq!(
            "new expert".parse(),
            Ok(Command::New(Some("expert".to_string())))
        );
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("r 3".parse::<Command>(), Err(CommandError::MissingCoords("r")));
        assert_eq!(
            "f 3 -1".parse::<Command>(),
            Err(CommandError::BadCoord("-1".to_string()))
        );
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_string()))
        );
    }
}
