//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a star rating as filled and empty stars, e.g. `★★★★☆`.
///
/// Usage in templates: `{{ product.full_stars|stars }}`
#[askama::filter_fn]
pub fn stars(filled: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let filled = filled.to_string().parse::<usize>().unwrap_or(0);
    Ok(star_string(filled))
}

fn star_string(filled: usize) -> String {
    let filled = filled.min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::star_string;

    #[test]
    fn test_star_string() {
        assert_eq!(star_string(0), "☆☆☆☆☆");
        assert_eq!(star_string(4), "★★★★☆");
        assert_eq!(star_string(9), "★★★★★");
    }
}
