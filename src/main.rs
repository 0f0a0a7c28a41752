//! # Hochschulkompass CLI Application
//!
//! Command-line access to the study program search.
//!
//! ## Subcommands
//!
//! - `search`: Run a search and print the results as text or JSON
//! - `payload`: Print the form fields a search would send, without sending it

mod logging;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hochschulkompass::search::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, SearchClient, SearchFilters, StudyType,
    build_payload,
};
use tracing::instrument;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Search study programs on hochschulkompass.de",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search study programs and print the results
    Search(SearchArgs),

    /// Print the form payload for the given filters
    Payload(FilterArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Base URL of the site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Program name
    #[arg(long)]
    fach: Option<String>,

    /// Study type: 1/undergraduate, 2/postgraduate, 3/both
    #[arg(short = 's', long)]
    study_type: Option<StudyType>,

    /// Exclude teacher training programs
    #[arg(long)]
    ohne_lehramt: bool,

    /// Admission mode (repeatable)
    #[arg(long)]
    zubesch: Vec<String>,

    /// Start semester
    #[arg(long)]
    zusemester: Option<String>,

    /// Vocational qualification route 1
    #[arg(long)]
    berufliche_qualifikation_1: bool,

    /// Vocational qualification route 2
    #[arg(long)]
    berufliche_qualifikation_2: bool,

    /// Vocational qualification route 3
    #[arg(long)]
    berufliche_qualifikation_3: bool,

    /// Degree code (repeatable)
    #[arg(short, long)]
    abschluss: Vec<String>,

    /// Teacher training type
    #[arg(long)]
    lehramt: Option<String>,

    /// Language of instruction
    #[arg(long)]
    sprache: Option<String>,

    /// Study form code (repeatable)
    #[arg(long = "studienform")]
    studienformen: Vec<String>,

    /// Only special study forms
    #[arg(long)]
    besand: bool,

    /// Master type (repeatable)
    #[arg(long)]
    mastertyp: Vec<String>,

    /// International double degree only
    #[arg(long)]
    intdop: bool,

    /// Subject area code (repeatable)
    #[arg(long = "sachgebiet")]
    sachgebiete: Vec<String>,

    /// Combine subject areas with AND
    #[arg(long)]
    sachgrand: bool,

    /// Institution name
    #[arg(short, long)]
    name: Option<String>,

    /// Institution postal code
    #[arg(long)]
    plz: Option<String>,

    /// Institution location
    #[arg(long)]
    ort: Option<String>,

    /// Institution type code to include (repeatable)
    #[arg(long)]
    hstype: Vec<u32>,

    /// Institutions with doctorate rights
    #[arg(long)]
    prom: bool,

    /// Institution networks
    #[arg(long)]
    verbund: bool,

    /// Sponsorship
    #[arg(long)]
    traegerschaft: Option<String>,

    /// Federal state code (repeatable)
    #[arg(long = "bundesland")]
    bundeslaender: Vec<String>,

    /// Radius around the postal code in km
    #[arg(long)]
    plzdist: Option<u32>,
}

impl From<FilterArgs> for SearchFilters {
    fn from(args: FilterArgs) -> Self {
        SearchFilters {
            fach: args.fach,
            study_type: args.study_type,
            ohne_lehramt: args.ohne_lehramt,
            zubesch: args.zubesch,
            zusemester: args.zusemester,
            berufliche_qualifikation_1: args.berufliche_qualifikation_1,
            berufliche_qualifikation_2: args.berufliche_qualifikation_2,
            berufliche_qualifikation_3: args.berufliche_qualifikation_3,
            abschluss: args.abschluss,
            lehramt: args.lehramt,
            sprache: args.sprache,
            studienformen: args.studienformen,
            besand: args.besand,
            mastertyp: args.mastertyp,
            intdop: args.intdop,
            sachgebiete: args.sachgebiete,
            sachgrand: args.sachgrand,
            name: args.name,
            plz: args.plz,
            ort: args.ort,
            hstype: args.hstype.into_iter().map(|code| (code, true)).collect(),
            prom: args.prom,
            verbund: args.verbund,
            traegerschaft: args.traegerschaft,
            bundeslaender: args.bundeslaender,
            plzdist: args.plzdist,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::setup_logging()?;

    match cli.command {
        Some(Commands::Search(args)) => {
            search_command(args).await?;
        }
        Some(Commands::Payload(args)) => {
            payload_command(args);
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["hochschulkompass", "--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn search_command(args: SearchArgs) -> anyhow::Result<()> {
    let config = ClientConfig::builder()
        .base_url(args.base_url)
        .timeout_secs(args.timeout)
        .build();
    let filters = SearchFilters::from(args.filters);

    let programs = SearchClient::new(config)
        .search(&filters)
        .await
        .context("study program search failed")?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&programs)?);
        return Ok(());
    }

    if programs.is_empty() {
        println!("No study programs found.");
        return Ok(());
    }

    for program in &programs {
        println!(
            "{} - {} - {}",
            program.title,
            program.institution().unwrap_or("-"),
            program.detail_url.as_deref().unwrap_or("-")
        );
    }
    println!("\nFound {} study programs", programs.len());

    Ok(())
}

fn payload_command(args: FilterArgs) {
    let payload = build_payload(&SearchFilters::from(args));
    for (key, value) in payload.to_pairs() {
        println!("{}={}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_map_to_filters() {
        let cli = Cli::parse_from([
            "hochschulkompass",
            "search",
            "--fach",
            "Design",
            "--study-type",
            "beides",
            "--studienform",
            "v",
            "--sachgebiet",
            "S230",
            "--sachgebiet",
            "S100",
            "--hstype",
            "2",
            "--prom",
            "--plzdist",
            "50",
        ]);

        let Some(Commands::Search(args)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.format, "text");
        assert_eq!(args.timeout, DEFAULT_TIMEOUT_SECS);

        let filters = SearchFilters::from(args.filters);
        assert_eq!(filters.fach.as_deref(), Some("Design"));
        assert_eq!(filters.study_type, Some(StudyType::Both));
        assert_eq!(filters.studienformen, vec!["v"]);
        assert_eq!(filters.sachgebiete, vec!["S230", "S100"]);
        assert_eq!(filters.hstype.get(&2), Some(&true));
        assert!(filters.prom);
        assert!(!filters.verbund);
        assert_eq!(filters.plzdist, Some(50));
    }

    #[test]
    fn test_no_flags_means_no_filters() {
        assert_eq!(SearchFilters::from(FilterArgs::default()), SearchFilters::default());
    }

    #[test]
    fn test_invalid_study_type_is_rejected() {
        let result = Cli::try_parse_from(["hochschulkompass", "payload", "--study-type", "7"]);

        assert!(result.is_err());
    }
}
