use std::env::var;

/// Get the value of ENV var, or a default
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var_or_else<F>(var_name: &'static str, or_else: F) -> String
where
    F: FnOnce() -> String,
{
    env_var(var_name).unwrap_or_else(or_else)
}

/// Get the value of an optional ENV var
///
/// Empty values are treated as not set
pub fn env_var(var_name: &'static str) -> Option<String> {
    var(var_name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Local time formatted the way templates and links show their creation moment
pub fn format_timestamp(timestamp: &chrono::NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}
