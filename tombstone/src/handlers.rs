use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tombstone_core::SelectorTable;
use tombstone_core::config::SiteConfig;
use tombstone_core::extract::{ExtractOptions, execute_extract};
use tombstone_core::harvest::{HarvestOptions, TransportErrorPolicy, execute_harvest};
use tombstone_core::report::{generate_extract_report, generate_harvest_report};
use url::Url;

// Helper functions shared by the stage handlers

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Load the selector table from JSON, or fall back to the built-in one
pub fn load_selector_table(path: Option<&PathBuf>) -> anyhow::Result<SelectorTable> {
    match path {
        Some(path) => SelectorTable::from_file(path)
            .with_context(|| format!("Failed to load selector table {}", path.display())),
        None => Ok(SelectorTable::default()),
    }
}

pub fn parse_transport_policy(name: &str, retries: u32) -> Result<TransportErrorPolicy, String> {
    name.parse::<TransportErrorPolicy>()
        .map(|policy| policy.with_attempts(retries))
}

fn site_from_args(args: &ArgMatches) -> SiteConfig {
    match args.get_one::<Url>("base-url") {
        Some(url) => SiteConfig::default().with_base_url(url.as_str()),
        None => SiteConfig::default(),
    }
}

fn path_arg(args: &ArgMatches, name: &str) -> anyhow::Result<PathBuf> {
    args.get_one::<String>(name)
        .map(|raw| expand_path(raw))
        .with_context(|| format!("Missing --{}", name))
}

pub fn harvest_options_from_args(args: &ArgMatches) -> anyhow::Result<HarvestOptions> {
    let manifest_path = path_arg(args, "output")?;
    let policy_name = args
        .get_one::<String>("on-error")
        .map(String::as_str)
        .unwrap_or("exhaust");
    let retries = *args.get_one::<u32>("retries").unwrap_or(&3);

    let mut options = HarvestOptions::new(manifest_path);
    options.site = site_from_args(args);
    options.on_transport_error =
        parse_transport_policy(policy_name, retries).map_err(anyhow::Error::msg)?;
    options.show_progress_bars = true;
    Ok(options)
}

pub fn extract_options_from_args(args: &ArgMatches) -> anyhow::Result<ExtractOptions> {
    let manifest_path = path_arg(args, "input")?;
    let data_path = path_arg(args, "output")?;

    let mut options = ExtractOptions::new(manifest_path, data_path);
    options.site = site_from_args(args);
    options.selectors = load_selector_table(args.get_one::<PathBuf>("selectors"))?;
    options.show_progress_bars = true;
    Ok(options)
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), msg);
    std::process::exit(1);
}

fn print_target(label: &str, path: &Path) {
    println!(
        "{} {}: {}",
        "→".blue(),
        label,
        path.display().to_string().bright_white()
    );
}

pub async fn handle_harvest(sub_matches: &ArgMatches) {
    init_logging();

    let options = harvest_options_from_args(sub_matches).unwrap_or_else(|e| fail(format!("{:#}", e)));

    println!("\n{}  Harvesting {}", "🕷️".bold(), options.site.base_url);
    print_target("Manifest", &options.manifest_path);
    println!("{} On transport error: {:?}\n", "→".blue(), options.on_transport_error);

    let progress_callback = Arc::new(|msg: String| {
        tracing::debug!("{}", msg);
    });

    let summary = match execute_harvest(options, Some(progress_callback)).await {
        Ok(summary) => summary,
        Err(e) => fail(format!("Harvest failed: {}", e)),
    };

    println!("\n{} Harvest complete!\n", "✓".green().bold());
    print!("{}", generate_harvest_report(&summary));
}

pub async fn handle_extract(sub_matches: &ArgMatches) {
    init_logging();

    let options = extract_options_from_args(sub_matches).unwrap_or_else(|e| fail(format!("{:#}", e)));

    println!("\n{}  Extracting reviews from {}", "🕷️".bold(), options.site.base_url);
    print_target("Manifest", &options.manifest_path);
    print_target("Data file", &options.data_path);
    println!();

    let progress_callback = Arc::new(|msg: String| {
        tracing::debug!("{}", msg);
    });

    let summary = match execute_extract(options, Some(progress_callback)).await {
        Ok(summary) => summary,
        Err(e) => fail(format!("Extraction failed: {}", e)),
    };

    println!("\n{} Extraction complete!\n", "✓".green().bold());
    print!("{}", generate_extract_report(&summary));
}
