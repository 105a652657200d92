//! Process-wide switch for per-candidate diagnostics.

/// Environment variable holding the diagnostic switch.
pub const DEBUG_ENV_VAR: &str = "ENABLE_DEBUG";

/// Whether a textual switch value means "on".
///
/// Non-zero integers and `true`/`yes`/`on` (any case) are truthy.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        return number != 0;
    }
    ["true", "yes", "on"]
        .iter()
        .any(|word| value.eq_ignore_ascii_case(word))
}

/// Read [`DEBUG_ENV_VAR`]; absent or unreadable means off.
pub fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV_VAR)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}
