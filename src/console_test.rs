use super::*;

fn parse(line: &str) -> Result<ConsoleEvent, ParseError> {
    line.parse()
}

#[test]
fn key_without_modifiers() {
    assert_eq!(
        parse("key r"),
        Ok(ConsoleEvent::Key { key: Key::new("r"), modifiers: Modifiers::default() })
    );
}

#[test]
fn key_with_modifiers_in_any_order() {
    let expected = Modifiers { ctrl: true, shift: true, ..Default::default() };
    assert_eq!(parse("key A shift ctrl"), Ok(ConsoleEvent::Key { key: Key::new("A"), modifiers: expected }));
    assert_eq!(parse("  key   A ctrl shift "), Ok(ConsoleEvent::Key { key: Key::new("A"), modifiers: expected }));
}

#[test]
fn key_keeps_name_case() {
    let Ok(ConsoleEvent::Key { key, .. }) = parse("key Delete") else {
        panic!("expected key event");
    };
    assert_eq!(key, Key::new("Delete"));
}

#[test]
fn pointer_events() {
    assert_eq!(
        parse("down 10 20.5"),
        Ok(ConsoleEvent::PointerDown { at: Point::new(10.0, 20.5), modifiers: Modifiers::default() })
    );
    assert_eq!(
        parse("down 1 2 shift"),
        Ok(ConsoleEvent::PointerDown {
            at: Point::new(1.0, 2.0),
            modifiers: Modifiers { shift: true, ..Default::default() },
        })
    );
    assert_eq!(parse("move -5 3"), Ok(ConsoleEvent::PointerMove(Point::new(-5.0, 3.0))));
    assert_eq!(parse("up 0 0"), Ok(ConsoleEvent::PointerUp(Point::new(0.0, 0.0))));
}

#[test]
fn buttons_map_to_commands() {
    assert_eq!(parse("button rect"), Ok(ConsoleEvent::Button(Command::AddRectangle)));
    assert_eq!(parse("button circle"), Ok(ConsoleEvent::Button(Command::AddCircle)));
    assert_eq!(parse("button delete"), Ok(ConsoleEvent::Button(Command::DeleteSelection)));
}

#[test]
fn bare_commands() {
    assert_eq!(parse("dump"), Ok(ConsoleEvent::Dump));
    assert_eq!(parse("quit"), Ok(ConsoleEvent::Quit));
}

#[test]
fn blank_line_is_empty() {
    assert_eq!(parse("   "), Err(ParseError::Empty));
}

#[test]
fn unknown_command() {
    assert_eq!(parse("jump 1"), Err(ParseError::UnknownCommand("jump".into())));
}

#[test]
fn missing_arguments() {
    assert_eq!(parse("key"), Err(ParseError::Missing { command: "key", what: "key name" }));
    assert_eq!(parse("down 3"), Err(ParseError::Missing { command: "down", what: "y" }));
    assert_eq!(parse("button"), Err(ParseError::Missing { command: "button", what: "button name" }));
}

#[test]
fn bad_numbers() {
    assert_eq!(parse("move x 1"), Err(ParseError::BadNumber("x".into())));
    assert_eq!(parse("up 1 inf"), Err(ParseError::BadNumber("inf".into())));
}

#[test]
fn unknown_modifier_and_button() {
    assert_eq!(parse("key a hyper"), Err(ParseError::UnknownModifier("hyper".into())));
    assert_eq!(parse("button star"), Err(ParseError::UnknownButton("star".into())));
}

#[test]
fn trailing_words_are_rejected() {
    assert_eq!(parse("dump now"), Err(ParseError::Unexpected("now".into())));
    assert_eq!(parse("move 1 2 shift"), Err(ParseError::Unexpected("shift".into())));
}
