//! Article slug rules

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Lowercase alphanumeric words joined by single hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Derive a slug from a title
pub fn slug_from_title(title: &str) -> String {
    slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("hello"));
        assert!(is_valid_slug("hello-world-2024"));
        assert!(is_valid_slug("a1-b2"));
    }

    #[test]
    fn test_invalid_slugs() {
        for slug in ["", "Hello", "hello_world", "-hello", "hello-", "a--b", "a b", "../etc"] {
            assert!(!is_valid_slug(slug), "{slug:?} should be rejected");
        }
    }

    #[test]
    fn test_slug_from_title() {
        let slug = slug_from_title("Hello, World! Rust & GitHub");
        assert_eq!(slug, "hello-world-rust-github");
        assert!(is_valid_slug(&slug));
    }
}
