pub mod config;
pub mod extract;
pub mod harvest;
pub mod manifest;
pub mod report;

use colored::Colorize;

pub use tombstone_scanner::{Result, ScanError, SelectorTable};

pub fn print_banner() {
    println!(
        "{}",
        r#"
  _                 _         _
 | |_ ___  _ __ ___ | |__  ___| |_ ___  _ __   ___
 | __/ _ \| '_ ` _ \| '_ \/ __| __/ _ \| '_ \ / _ \
 | || (_) | | | | | | |_) \__ \ || (_) | | | |  __/
  \__\___/|_| |_| |_|_.__/|___/\__\___/|_| |_|\___|
"#
        .bright_cyan()
        .bold()
    );
    println!(
        "  {} {}\n",
        "album review harvester".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
