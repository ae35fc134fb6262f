//! URL-safe slug generation.
//!
//! Slugs are deterministic: the same input always yields the same output,
//! which is the routing layer's only requirement. Uniqueness is NOT
//! enforced — two same-named stores in the same city and province collide,
//! a known limitation carried over from the routing contract.

/// Generate a URL-safe slug: lowercase, ASCII alphanumerics and hyphens
/// only, whitespace collapsed to single hyphens, no leading or trailing
/// hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Store-level slug: name, city, and province joined so stores with the
/// same name in different places route to different pages.
#[must_use]
pub fn store_slug(name: &str, city: &str, province: &str) -> String {
    let parts: Vec<String> = [name, city, province]
        .iter()
        .map(|part| slugify(part))
        .filter(|s| !s.is_empty())
        .collect();
    parts.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_simple_name() {
        assert_eq!(slugify("Bellwoods Books"), "bellwoods-books");
    }

    #[test]
    fn slugify_apostrophes_stripped() {
        assert_eq!(slugify("Munro's Books"), "munros-books");
    }

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("The   Paper  Hound"), "the-paper-hound");
    }

    #[test]
    fn slugify_trims_leading_and_trailing_hyphens() {
        assert_eq!(slugify("  -Type Books- "), "type-books");
    }

    #[test]
    fn slugify_non_ascii_stripped_without_dash() {
        // Accented characters are dropped; no dash inserted between
        // adjacent ASCII chars.
        assert_eq!(slugify("Librairie Québécoise"), "librairie-qubcoise");
    }

    #[test]
    fn slugify_is_deterministic() {
        assert_eq!(slugify("Bellwoods Books"), slugify("Bellwoods Books"));
    }

    #[test]
    fn slugify_output_charset() {
        let slug = slugify("  A & B: the 2nd-hand shop!  ");
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn store_slug_joins_name_city_province() {
        assert_eq!(
            store_slug("Bellwoods Books", "Toronto", "Ontario"),
            "bellwoods-books-toronto-ontario"
        );
    }

    #[test]
    fn store_slug_skips_empty_parts() {
        assert_eq!(store_slug("Bellwoods Books", "", "Ontario"), "bellwoods-books-ontario");
    }
}
