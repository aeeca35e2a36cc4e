use clap::{arg, command};
use tombstone_core::config::{DEFAULT_BASE_URL, DEFAULT_DATA_FILE, DEFAULT_MANIFEST_FILE};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("tombstone")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("tombstone")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("harvest")
                .about(
                    "Page through the review listing and write every review URL to a \
                manifest file.",
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Manifest file to (re)write")
                        .default_value(DEFAULT_MANIFEST_FILE),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Origin of the review site")
                        .value_parser(clap::value_parser!(Url))
                        .default_value(DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(--"on-error" <POLICY>)
                        .required(false)
                        .help("What a failed listing page means: exhaust (stop), abort, or retry")
                        .value_parser(["exhaust", "abort", "retry"])
                        .default_value("exhaust"),
                )
                .arg(
                    arg!(--"retries" <NUM>)
                        .required(false)
                        .help("Attempts per page when --on-error is retry")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("3"),
                ),
        )
        .subcommand(
            command!("extract")
                .about("Visit every URL in the manifest and write one CSV row per review.")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Manifest file produced by harvest")
                        .default_value(DEFAULT_MANIFEST_FILE),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("CSV data file to (re)write")
                        .default_value(DEFAULT_DATA_FILE),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Origin that manifest paths are resolved against")
                        .value_parser(clap::value_parser!(Url))
                        .default_value(DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(-s --"selectors" <PATH>)
                        .required(false)
                        .help("JSON file overriding the field selector table")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
