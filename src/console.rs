//! Line protocol for driving a session from stdin.
//!
//! One event per line, whitespace separated:
//!
//! ```text
//! key <name> [ctrl] [shift] [alt] [meta]
//! down <x> <y> [shift]
//! move <x> <y>
//! up <x> <y>
//! button rect|circle|delete
//! dump
//! quit
//! ```

use std::str::FromStr;

use canvas::doc::Point;
use canvas::input::{Key, Modifiers};
use canvas::shortcuts::Command;

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    Key { key: Key, modifiers: Modifiers },
    PointerDown { at: Point, modifiers: Modifiers },
    PointerMove(Point),
    PointerUp(Point),
    /// A toolbar button press.
    Button(Command),
    /// Print the scene snapshot.
    Dump,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{command}: missing {what}")]
    Missing { command: &'static str, what: &'static str },
    #[error("not a number: {0:?}")]
    BadNumber(String),
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
    #[error("unknown button {0:?} (expected rect, circle or delete)")]
    UnknownButton(String),
    #[error("unexpected argument {0:?}")]
    Unexpected(String),
}

impl FromStr for ConsoleEvent {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ParseError::Empty);
        };

        let event = match command {
            "key" => {
                let name = words.next().ok_or(ParseError::Missing { command: "key", what: "key name" })?;
                let modifiers = modifiers(&mut words)?;
                Self::Key { key: Key::new(name), modifiers }
            }
            "down" => {
                let at = point("down", &mut words)?;
                let modifiers = modifiers(&mut words)?;
                Self::PointerDown { at, modifiers }
            }
            "move" => Self::PointerMove(point("move", &mut words)?),
            "up" => Self::PointerUp(point("up", &mut words)?),
            "button" => {
                let name = words.next().ok_or(ParseError::Missing { command: "button", what: "button name" })?;
                Self::Button(button(name)?)
            }
            "dump" => Self::Dump,
            "quit" => Self::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseError::Unexpected(extra.to_string())),
            None => Ok(event),
        }
    }
}

fn point<'a>(command: &'static str, words: &mut impl Iterator<Item = &'a str>) -> Result<Point, ParseError> {
    let x = number(words.next().ok_or(ParseError::Missing { command, what: "x" })?)?;
    let y = number(words.next().ok_or(ParseError::Missing { command, what: "y" })?)?;
    Ok(Point::new(x, y))
}

fn number(word: &str) -> Result<f64, ParseError> {
    match word.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ParseError::BadNumber(word.to_string())),
    }
}

/// Consume every remaining word as a modifier flag.
fn modifiers<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Modifiers, ParseError> {
    let mut mods = Modifiers::default();
    for word in words {
        match word {
            "ctrl" => mods.ctrl = true,
            "shift" => mods.shift = true,
            "alt" => mods.alt = true,
            "meta" => mods.meta = true,
            other => return Err(ParseError::UnknownModifier(other.to_string())),
        }
    }
    Ok(mods)
}

fn button(name: &str) -> Result<Command, ParseError> {
    match name {
        "rect" => Ok(Command::AddRectangle),
        "circle" => Ok(Command::AddCircle),
        "delete" => Ok(Command::DeleteSelection),
        other => Err(ParseError::UnknownButton(other.to_string())),
    }
}
