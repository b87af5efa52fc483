use super::*;

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["sov", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Run { ref keywords, dry_run: false } if keywords.is_empty()
    ));
}

#[test]
fn parses_repeated_keywords() {
    let cli = Cli::try_parse_from([
        "sov",
        "run",
        "--keyword",
        "smart fan",
        "-k",
        "bldc fan",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run { ref keywords, .. } if keywords == &["smart fan", "bldc fan"]
    ));
}

#[test]
fn parses_run_dry_run() {
    let cli = Cli::try_parse_from(["sov", "run", "--dry-run"]).unwrap();
    assert!(matches!(cli.command, Commands::Run { dry_run: true, .. }));
}

#[test]
fn parses_summarize_details_path() {
    let cli =
        Cli::try_parse_from(["sov", "summarize", "--details", "out/sov_multi_details.csv"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Summarize { ref details } if details == std::path::Path::new("out/sov_multi_details.csv")
    ));
}

#[test]
fn summarize_requires_details() {
    assert!(Cli::try_parse_from(["sov", "summarize"]).is_err());
}

#[test]
fn parses_show() {
    let cli = Cli::try_parse_from(["sov", "show"]).unwrap();
    assert!(matches!(cli.command, Commands::Show));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["sov"]).is_err());
}
