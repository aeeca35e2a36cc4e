pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    expand_path, extract_options_from_args, harvest_options_from_args, load_selector_table,
    parse_transport_policy,
};
