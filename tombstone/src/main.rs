use tombstone::commands::command_argument_builder;
use tombstone::handlers::{handle_extract, handle_harvest};
use tombstone_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("harvest", primary_command)) => handle_harvest(primary_command).await,
        Some(("extract", primary_command)) => handle_extract(primary_command).await,
        None => {
            // No subcommand provided, just show the banner
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
