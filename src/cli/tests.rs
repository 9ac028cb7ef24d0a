//! Unit tests for CLI parsing

use crate::cli::{Cli, Commands};
use crate::generator::DEFAULT_DISCOVERY_URL;
use crate::runtime_config::RuntimeConfig;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_all_command_defaults() {
    let cli = Cli::try_parse_from(["apigen", "all"]).unwrap();
    match cli.command {
        Commands::All {
            url,
            include_private,
            ..
        } => {
            assert_eq!(url, DEFAULT_DISCOVERY_URL);
            assert!(!include_private);
        }
        _ => panic!("Expected All command"),
    }
    assert!(!cli.debug);
}

#[test]
fn test_all_command_with_flags() {
    let cli = Cli::try_parse_from([
        "apigen",
        "all",
        "--url",
        "http://localhost:9000/apis",
        "--ignore",
        "skip.json",
        "--include-private",
        "--output",
        "out/apis",
        "--debug",
    ])
    .unwrap();

    match &cli.command {
        Commands::All {
            url,
            ignore,
            include_private,
        } => {
            assert_eq!(url, "http://localhost:9000/apis");
            assert_eq!(ignore, &PathBuf::from("skip.json"));
            assert!(include_private);
        }
        _ => panic!("Expected All command"),
    }
    assert_eq!(cli.output, PathBuf::from("out/apis"));
    assert!(cli.debug);

    let options = cli.generator_options(&RuntimeConfig::default());
    assert!(options.include_private);
    assert_eq!(options.root_index_path(), PathBuf::from("out/index.ts"));
}

#[test]
fn test_api_command_requires_sources() {
    assert!(Cli::try_parse_from(["apigen", "api"]).is_err());

    let cli = Cli::try_parse_from(["apigen", "api", "a.json", "https://x/rest"]).unwrap();
    match cli.command {
        Commands::Api { sources } => assert_eq!(sources, vec!["a.json", "https://x/rest"]),
        _ => panic!("Expected Api command"),
    }
}

#[test]
fn test_concurrency_flags_override_runtime_config() {
    let runtime = RuntimeConfig {
        request_concurrency: 7,
        api_concurrency: 3,
    };
    let cli = Cli::try_parse_from(["apigen", "index", "--api-concurrency", "4"]).unwrap();
    let options = cli.generator_options(&runtime);
    assert_eq!(options.request_concurrency, 7);
    assert_eq!(options.api_concurrency, 4);

    let zero = Cli::try_parse_from(["apigen", "index", "--request-concurrency", "0"]).unwrap();
    assert_eq!(zero.generator_options(&runtime).request_concurrency, 7);
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["apigen", "all"],
        vec!["apigen", "api", "drive.json"],
        vec!["apigen", "index"],
        vec!["apigen", "index", "--url", "http://localhost/apis"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}
