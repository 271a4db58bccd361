//! Table formatting utilities for CLI output.

use dialer_core::utils::timestamp::format_datetime;
use dialer_core::{Gateway, User, VoipApp};

/// Truncates a string to a maximum length, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use dialer_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

pub fn print_user_table(users: &[User]) {
    println!("{:<6} {:<24} {:<10} {:<19}", "ID", "Username", "Superuser", "Last login");
    print_separator(62);
    for user in users {
        let last_login = user.last_login.as_ref().map(format_datetime);
        println!(
            "{:<6} {:<24} {:<10} {:<19}",
            user.id,
            truncate_string(&user.username, 24),
            if user.is_superuser { "yes" } else { "no" },
            format_optional(last_login.as_ref(), "never"),
        );
    }
}

pub fn print_gateway_table(gateways: &[Gateway]) {
    println!("{:<6} {:<20} {:<36} {:<8}", "ID", "Name", "Dial strings", "Max");
    print_separator(72);
    for gateway in gateways {
        println!(
            "{:<6} {:<20} {:<36} {:<8}",
            gateway.id,
            truncate_string(&gateway.name, 20),
            truncate_string(&gateway.gateways, 36),
            format_optional(gateway.maximum_call.as_ref(), "-"),
        );
    }
}

pub fn print_voip_app_table(apps: &[VoipApp]) {
    println!("{:<6} {:<20} {:<6} {:<36}", "ID", "Name", "Type", "Data");
    print_separator(70);
    for app in apps {
        println!(
            "{:<6} {:<20} {:<6} {:<36}",
            app.id,
            truncate_string(&app.name, 20),
            u8::from(app.app_type),
            truncate_string(&app.data, 36),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_string("héllo wörld", 8), "héllo...");
        assert_eq!(truncate_string("short", 5), "short");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(&30), "-"), "30");
        assert_eq!(format_optional::<u32>(None, "-"), "-");
    }
}
