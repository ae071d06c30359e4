use clap::Parser;
use notelog::cli::args::{Args, Command};

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["notelog", "-v"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_serve_command_when_parsing_then_bind_defaults_to_config() {
    // Arrange
    let args = vec!["notelog", "serve"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Serve { bind } => assert_eq!(bind, None),
        _ => panic!("Expected Serve command"),
    }
    assert_eq!(parsed.config, None);
    assert_eq!(parsed.verbose, 0);
}

#[test]
fn given_serve_with_bind_when_parsing_then_succeeds() {
    let args = vec!["notelog", "serve", "--bind", "0.0.0.0:3000"];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Serve { bind } => assert_eq!(bind.as_deref(), Some("0.0.0.0:3000")),
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn given_list_flags_when_parsing_then_succeeds() {
    let args = vec!["notelog", "list", "--all", "--json"];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::List { all, json } => {
            assert!(all);
            assert!(json);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn given_add_command_when_parsing_then_reads_title_and_comment() {
    let args = vec!["notelog", "add", "--title", "Bug A", "--comment", "steps..."];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Add { title, comment } => {
            assert_eq!(title, "Bug A");
            assert_eq!(comment, "steps...");
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn given_add_without_comment_when_parsing_then_comment_is_empty() {
    // Validation happens when submitting, not when parsing
    let args = vec!["notelog", "add", "--title", "Bug A"];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Add { comment, .. } => assert_eq!(comment, ""),
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn given_global_config_flag_after_subcommand_when_parsing_then_succeeds() {
    let args = vec!["notelog", "list", "-c", "/etc/notelog.toml", "-vv"];

    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(
        parsed.config,
        Some(std::path::PathBuf::from("/etc/notelog.toml"))
    );
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_init_with_config_when_parsing_then_reads_path_and_force() {
    let args = vec!["notelog", "init", "-c", "/tmp/notelog.toml", "--force"];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Init { force } => assert!(force),
        _ => panic!("Expected Init command"),
    }
    assert_eq!(
        parsed.config.as_deref(),
        Some(std::path::Path::new("/tmp/notelog.toml"))
    );
}
