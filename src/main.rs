use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use pbp_scrape::collect::Collector;
use pbp_scrape::config::{self, FetchConfig, PlayerConfig, RetryPolicy, SeasonSchedule};
use pbp_scrape::dataset;
use pbp_scrape::fetch::PageFetcher;
use pbp_scrape::normalize::{self, NormalizeConfig};
use pbp_scrape::plot;
use pbp_scrape::xlsx;

#[derive(Parser)]
#[command(name = "pbp-scrape")]
#[command(about = "Scrape a player's play-by-play shots and analyze them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every regular-season shot and free throw into a raw table
    Collect {
        /// Raw CSV output (input of `analyze`)
        #[arg(short, long, default_value = "pbp_raw.csv")]
        output: PathBuf,

        /// Also write the raw table as an Excel workbook (for viewing only; `analyze` reads the CSV)
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Site player id
        #[arg(long, default_value = config::DEFAULT_PLAYER_ID)]
        player_id: String,

        /// Player name as printed in play-by-play tables
        #[arg(long, default_value = config::DEFAULT_PLAYER_NAME)]
        player_name: String,

        /// First season to scrape
        #[arg(long, default_value_t = config::DEFAULT_MIN_SEASON)]
        min_season: u16,

        /// CSV with `Season,Games` regular-season game counts (built-in table if omitted)
        #[arg(long)]
        schedule: Option<PathBuf>,

        /// Game pages fetched at once
        #[arg(short, long, default_value = "1", env = "PBP_THREADS")]
        threads: usize,

        /// Attempts per page before giving up
        #[arg(long, default_value = "5")]
        max_attempts: u32,

        /// Delay before each request in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Normalize a raw table and draw the summary charts
    Analyze {
        /// Raw CSV written by `collect`
        #[arg(short, long, default_value = "pbp_raw.csv")]
        input: PathBuf,

        /// Normalized CSV output
        #[arg(short, long, default_value = "pbp_normalized.csv")]
        output: PathBuf,

        /// Also write the normalized table as an Excel workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Team whose games count as home games
        #[arg(long, default_value = config::DEFAULT_HOME_TEAM)]
        home_team: String,

        /// Drop rows from seasons before this one
        #[arg(long)]
        min_season: Option<u16>,

        /// Season shown in the box plot (end year, e.g. 2006 for 2005-06)
        #[arg(long, default_value = "2006", value_parser = clap::value_parser!(u16).range(1..))]
        season: u16,

        /// Player name used in chart titles
        #[arg(long, default_value = "Kobe Bryant")]
        title_name: String,

        /// Box plot output (SVG)
        #[arg(long, default_value = "boxplot.svg")]
        boxplot: PathBuf,

        /// Heatmap output (SVG)
        #[arg(long, default_value = "heatmap.svg")]
        heatmap: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collect {
            output,
            xlsx,
            player_id,
            player_name,
            min_season,
            schedule,
            threads,
            max_attempts,
            delay_ms,
            timeout_secs,
        } => {
            let schedule = match schedule {
                Some(path) => SeasonSchedule::from_csv_path(&path)
                    .with_context(|| format!("Failed to read schedule {}", path.display()))?,
                None => SeasonSchedule::default(),
            };
            let player = PlayerConfig {
                player_id,
                display_name: player_name,
                min_season,
                schedule,
                ..PlayerConfig::default()
            };
            let fetch = FetchConfig {
                retry: RetryPolicy {
                    max_attempts,
                    ..RetryPolicy::default()
                },
                timeout: Duration::from_secs(timeout_secs),
                delay: Duration::from_millis(delay_ms),
                ..FetchConfig::default()
            };
            collect(&player, fetch, threads, &output, xlsx.as_ref())?;
        }
        Commands::Analyze {
            input,
            output,
            xlsx,
            home_team,
            min_season,
            season,
            title_name,
            boxplot,
            heatmap,
        } => {
            let config = NormalizeConfig {
                home_team,
                min_season,
            };
            let charts = Charts {
                season,
                title_name,
                boxplot,
                heatmap,
            };
            analyze(&input, &output, xlsx.as_ref(), &config, &charts)?;
        }
    }

    Ok(())
}

fn collect(
    player: &PlayerConfig,
    fetch: FetchConfig,
    threads: usize,
    output: &PathBuf,
    xlsx_path: Option<&PathBuf>,
) -> Result<()> {
    let fetcher = PageFetcher::with_config(fetch).context("Failed to create HTTP client")?;

    println!("Scraping {} from {}", player.display_name, player.overview_url());
    let (events, summary) = Collector::new(&fetcher, player)
        .with_threads(threads)
        .run()
        .context("Scrape failed")?;

    println!(
        "Found {} plays in {} games over {} seasons ({} games skipped)",
        summary.events,
        summary.games - summary.skipped_games,
        summary.seasons,
        summary.skipped_games
    );

    println!("Writing CSV file: {}", output.display());
    dataset::write_raw_csv(&events, output).context("Failed to write raw CSV")?;

    if let Some(path) = xlsx_path {
        println!("Writing Excel file: {}", path.display());
        xlsx::write_raw_events_to_xlsx(&events, path).context("Failed to write Excel file")?;
    }

    println!("Done!");
    Ok(())
}

struct Charts {
    season: u16,
    title_name: String,
    boxplot: PathBuf,
    heatmap: PathBuf,
}

fn analyze(
    input: &PathBuf,
    output: &PathBuf,
    xlsx_path: Option<&PathBuf>,
    config: &NormalizeConfig,
    charts: &Charts,
) -> Result<()> {
    println!("Reading CSV file: {}", input.display());
    let raw = dataset::read_raw_csv(input).context("Failed to read raw CSV")?;
    println!("Found {} raw plays", raw.len());

    let events = normalize::fill_missing(raw);
    let rows = normalize::normalize_events(&events, config).context("Failed to normalize plays")?;

    println!("Writing CSV file: {}", output.display());
    dataset::write_normalized_csv(&rows, output).context("Failed to write normalized CSV")?;

    if let Some(path) = xlsx_path {
        println!("Writing Excel file: {}", path.display());
        xlsx::write_normalized_to_xlsx(&rows, path).context("Failed to write Excel file")?;
    }

    let box_title = format!(
        "{} - {} Season Scoring by Month",
        charts.title_name,
        plot::season_label(charts.season)
    );
    plot::render_box_plot(&rows, charts.season, &box_title, &charts.boxplot)
        .context("Failed to draw box plot")?;
    println!("Box plot saved to {}", charts.boxplot.display());

    let heat_title = format!(
        "{} Heatmap - Shot Attempts by Location (excluding shots at the rim)",
        charts.title_name
    );
    plot::render_heatmap(&rows, &heat_title, &charts.heatmap).context("Failed to draw heatmap")?;
    println!("Heatmap saved to {}", charts.heatmap.display());

    println!("Done!");
    Ok(())
}
