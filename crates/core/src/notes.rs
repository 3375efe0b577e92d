//! Category and note constants, validation functions, and the default
//! category set inserted when a day is first opened.

use validator::{ValidateEmail, ValidateUrl};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;

/// Maximum length of an icon value (symbol name or emoji sequence).
pub const MAX_ICON_LENGTH: usize = 64;

/// Maximum length of note text in characters.
pub const MAX_NOTE_TEXT_LENGTH: usize = 10_000;

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Icon used when a category is created without choosing one.
pub const DEFAULT_ICON: &str = "Home";

/// A category inserted by day seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCategory {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Starter categories for a day that has none yet, in insertion order.
pub const PREDEFINED_CATEGORIES: &[SeedCategory] = &[
    SeedCategory { name: "Movies", icon: "🎬" },
    SeedCategory { name: "Shopping", icon: "🛍️" },
    SeedCategory { name: "Home", icon: "🏠" },
    SeedCategory { name: "Other", icon: "✏️" },
    SeedCategory { name: "Bills", icon: "🧾" },
    SeedCategory { name: "Income", icon: "💰" },
    SeedCategory { name: "Food & Drinks", icon: "🍔" },
];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a category name: non-blank and within the length limit.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Category name is required".to_string());
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a category icon: non-blank and within the length limit.
pub fn validate_icon(icon: &str) -> Result<(), String> {
    let trimmed = icon.trim();
    if trimmed.is_empty() {
        return Err("Icon is required".to_string());
    }
    if trimmed.chars().count() > MAX_ICON_LENGTH {
        return Err(format!(
            "Icon exceeds maximum length of {MAX_ICON_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate note text: non-blank and within the length limit.
pub fn validate_note_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Note text cannot be empty".to_string());
    }
    if text.chars().count() > MAX_NOTE_TEXT_LENGTH {
        return Err(format!(
            "Note text exceeds maximum length of {MAX_NOTE_TEXT_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Normalize an optional image URL.
///
/// A missing or blank value means "no image". Anything else must be an
/// absolute `http` or `https` URL.
pub fn normalize_image_url(url: Option<&str>) -> Result<Option<String>, String> {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    let has_web_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_web_scheme || !url.validate_url() {
        return Err(format!("Invalid image URL '{url}'"));
    }
    Ok(Some(url.to_string()))
}

/// Validate a sign-up email address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(format!("Invalid email address '{email}'"))
    }
}

/// Validate that a password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_name_bounds() {
        assert!(validate_category_name("Bills").is_ok());
        assert!(validate_category_name(&"x".repeat(MAX_CATEGORY_NAME_LENGTH)).is_ok());
        assert!(validate_category_name(&"x".repeat(MAX_CATEGORY_NAME_LENGTH + 1)).is_err());
        assert!(validate_category_name("   ").is_err());
    }

    #[test]
    fn emoji_names_count_characters_not_bytes() {
        let name = "🍔".repeat(MAX_CATEGORY_NAME_LENGTH);
        assert!(validate_category_name(&name).is_ok());
    }

    #[test]
    fn icon_required() {
        assert!(validate_icon("🧾").is_ok());
        assert!(validate_icon("ShoppingCart").is_ok());
        assert!(validate_icon("").is_err());
    }

    #[test]
    fn note_text_required() {
        assert!(validate_note_text("Buy milk").is_ok());
        let err = validate_note_text(" \n").unwrap_err();
        assert!(err.contains("cannot be empty"));
        assert!(validate_note_text(&"a".repeat(MAX_NOTE_TEXT_LENGTH + 1)).is_err());
    }

    #[test]
    fn blank_image_url_means_none() {
        assert_eq!(normalize_image_url(None).unwrap(), None);
        assert_eq!(normalize_image_url(Some("")).unwrap(), None);
        assert_eq!(normalize_image_url(Some("  ")).unwrap(), None);
    }

    #[test]
    fn image_url_must_be_web_url() {
        assert_eq!(
            normalize_image_url(Some("https://example.com/a.png")).unwrap(),
            Some("https://example.com/a.png".to_string())
        );
        assert!(normalize_image_url(Some("example.com/a.png")).is_err());
        assert!(normalize_image_url(Some("ftp://example.com/a.png")).is_err());
    }

    #[test]
    fn seed_set_is_distinct_and_valid() {
        assert_eq!(PREDEFINED_CATEGORIES.len(), 7);
        for seed in PREDEFINED_CATEGORIES {
            assert!(validate_category_name(seed.name).is_ok());
            assert!(validate_icon(seed.icon).is_ok());
        }
        let mut names: Vec<_> = PREDEFINED_CATEGORIES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PREDEFINED_CATEGORIES.len());
    }

    #[test]
    fn credentials() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength("long-enough").is_ok());
    }
}
