use mqchat::chat::{Command, CommandParser, SendTarget, ViewTarget};

#[test]
fn test_send_todos() {
    let parser = CommandParser::new();
    match parser.parse("send todos hello world") {
        Command::Send {
            target: SendTarget::All,
            message,
        } => assert_eq!(message, "hello world"),
        other => panic!("Expected broadcast send, got {:?}", other),
    }
}

#[test]
fn test_send_pair() {
    let parser = CommandParser::new();
    match parser.parse("send a/b hi") {
        Command::Send {
            target: SendTarget::Pair { from, to },
            message,
        } => {
            assert_eq!(from, "a");
            assert_eq!(to, "b");
            assert_eq!(message, "hi");
        }
        other => panic!("Expected pair send, got {:?}", other),
    }
}

#[test]
fn test_chat_todos() {
    let parser = CommandParser::new();
    match parser.parse("chat todos") {
        Command::View {
            target: ViewTarget::All,
        } => {}
        other => panic!("Expected broadcast view, got {:?}", other),
    }
}

#[test]
fn test_chat_subpath() {
    let parser = CommandParser::new();
    match parser.parse("chat cesar/ana") {
        Command::View {
            target: ViewTarget::Topic(t),
        } => assert_eq!(t, "cesar/ana"),
        other => panic!("Expected topic view, got {:?}", other),
    }
}

#[test]
fn test_single_token_is_invalid() {
    let parser = CommandParser::new();
    match parser.parse("bogus") {
        Command::Invalid => {}
        other => panic!("Expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_unknown_verb_is_invalid() {
    let parser = CommandParser::new();
    match parser.parse("yell todos hi") {
        Command::Invalid => {}
        other => panic!("Expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_malformed_pair_is_invalid() {
    let parser = CommandParser::new();
    for input in ["send a/b/c hi", "send a/ hi", "send /b hi", "send a//b hi"] {
        match parser.parse(input) {
            Command::Invalid => {}
            other => panic!("Expected Invalid for {:?}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_case_insensitive_verbs_and_todos() {
    let parser = CommandParser::new();
    match parser.parse("SEND Todos shouting") {
        Command::Send {
            target: SendTarget::All,
            message,
        } => assert_eq!(message, "shouting"),
        other => panic!("Expected broadcast send, got {:?}", other),
    }
    match parser.parse("CHAT TODOS") {
        Command::View {
            target: ViewTarget::All,
        } => {}
        other => panic!("Expected broadcast view, got {:?}", other),
    }
}

#[test]
fn test_message_may_be_empty() {
    let parser = CommandParser::new();
    match parser.parse("send todos") {
        Command::Send {
            target: SendTarget::All,
            message,
        } => assert_eq!(message, ""),
        other => panic!("Expected send with empty message, got {:?}", other),
    }
}
