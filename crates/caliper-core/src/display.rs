//! Small text helpers shared by analyzers and formatters.

/// Render a measurement without a trailing `.0` for whole numbers.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Turn a snake_case or kebab-case key into lower-case words.
pub fn humanize(key: &str) -> String {
    key.trim().replace(['_', '-'], " ")
}

/// Normalize an activity or joint name into a lookup key.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}
