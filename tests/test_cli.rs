use edgepad::cli::args::{Args, Command};
use clap::Parser;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["edgepad", "abc"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_serve_command_when_parsing_then_defaults_are_unset() {
    // Arrange
    let args = vec!["edgepad", "serve"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Serve { bind, memory } => {
            assert_eq!(bind, None);
            assert!(!memory);
        }
        _ => panic!("Expected Serve command"),
    }
    assert_eq!(parsed.config, None);
    assert_eq!(parsed.database, None);
}

#[test]
fn given_serve_with_bind_and_memory_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["edgepad", "serve", "--bind", "0.0.0.0:9000", "--memory"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Serve { bind, memory } => {
            assert_eq!(bind.as_deref(), Some("0.0.0.0:9000"));
            assert!(memory);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn given_show_command_with_json_when_parsing_then_json_is_true() {
    // Arrange
    let args = vec!["edgepad", "show", "--json", "k3x"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Show { pad_id, json } => {
            assert_eq!(pad_id, "k3x");
            assert!(json);
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn given_global_database_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange - global flags work anywhere when marked as global
    let args = vec!["edgepad", "delete", "-d", "/tmp/pads.db", "k3x"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Delete { pad_id } => assert_eq!(pad_id, "k3x"),
        _ => panic!("Expected Delete command"),
    }
    assert_eq!(parsed.database, Some(std::path::PathBuf::from("/tmp/pads.db")));
}

#[test]
fn given_list_command_with_search_when_parsing_then_captures_term() {
    // Arrange
    let args = vec!["edgepad", "-c", "/etc/edgepad.toml", "list", "groceries"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { search } => assert_eq!(search.as_deref(), Some("groceries")),
        _ => panic!("Expected List command"),
    }
    assert_eq!(parsed.config, Some(std::path::PathBuf::from("/etc/edgepad.toml")));
}

#[test]
fn given_verbose_flag_when_parsing_then_increments_count() {
    // Arrange
    let args = vec!["edgepad", "-vv", "serve"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}
