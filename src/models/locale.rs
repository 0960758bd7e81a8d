//! Supported UI locales.
//!
//! The set matches the web client's path-prefix routing; the API only
//! stores a user's preference and rejects codes outside the set.

use serde::{Deserialize, Serialize};

/// Locale codes the product ships translations for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Hi,
    Zh,
    Pt,
    Ar,
    Fr,
    De,
}

impl Locale {
    pub const ALL: [Locale; 8] = [
        Locale::En,
        Locale::Es,
        Locale::Hi,
        Locale::Zh,
        Locale::Pt,
        Locale::Ar,
        Locale::Fr,
        Locale::De,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Hi => "hi",
            Locale::Zh => "zh",
            Locale::Pt => "pt",
            Locale::Ar => "ar",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .iter()
            .copied()
            .find(|locale| locale.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip() {
        for locale in Locale::ALL {
            let json = serde_json::to_string(&locale).unwrap();
            assert_eq!(json, format!("\"{}\"", locale.as_str()));
            let parsed: Locale = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, locale);
        }
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!("ja".parse::<Locale>().is_err());
        let parsed: Result<Locale, _> = serde_json::from_str("\"ja\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Locale::default(), Locale::En);
    }
}
