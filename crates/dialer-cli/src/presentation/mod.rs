//! Terminal output for CLI commands.

mod tables;

pub use tables::{
    format_optional, print_gateway_table, print_separator, print_user_table,
    print_voip_app_table, truncate_string,
};
