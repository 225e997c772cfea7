//! Site settings model

use serde::{Deserialize, Serialize};

/// Singleton branding and theme record for the whole site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// School display name
    pub school_name: String,

    /// Tagline shown under the name
    pub tagline: String,

    /// Logo image URL
    pub logo_url: String,

    /// Public contact email
    pub contact_email: String,

    /// Public contact phone number
    pub contact_phone: String,

    /// Postal address shown in the footer
    pub address: String,

    /// Primary theme color (CSS value)
    pub primary_color: String,

    /// Secondary theme color (CSS value)
    pub secondary_color: String,

    /// Default UI language (BCP 47 tag)
    pub default_language: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            school_name: "ESST".to_string(),
            tagline: String::new(),
            logo_url: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: String::new(),
            primary_color: "#1a3c6e".to_string(),
            secondary_color: "#e8b23a".to_string(),
            default_language: "fr".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SiteSettings::default();

        assert_eq!(settings.school_name, "ESST");
        assert_eq!(settings.default_language, "fr");
        assert!(!settings.primary_color.is_empty());
    }
}
