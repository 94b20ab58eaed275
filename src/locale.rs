//! Supported locales.
//!
//! The site is published in a fixed set of languages. Every page exists once
//! per enabled locale under `/<tag>/…`, and English is the default: content
//! missing in another language falls back to the English file.
//!
//! Locales are a closed enum. Once a tag has parsed, URL building
//! ([`crate::urls::href`]) has no "unsupported locale" case.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown locale: {0}")]
pub struct UnknownLocale(pub String);

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    En,
    Ar,
    De,
    Es,
    Fa,
    Fi,
    Fr,
    He,
    Hi,
    It,
    Ja,
    Ko,
    Pt,
    Ru,
    Tr,
    Zh,
}

/// Text direction of a locale's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl Locale {
    /// The locale every other locale falls back to.
    pub const DEFAULT: Locale = Locale::En;

    /// Every supported locale, default first, then alphabetical by tag.
    pub const ALL: [Locale; 16] = [
        Locale::En,
        Locale::Ar,
        Locale::De,
        Locale::Es,
        Locale::Fa,
        Locale::Fi,
        Locale::Fr,
        Locale::He,
        Locale::Hi,
        Locale::It,
        Locale::Ja,
        Locale::Ko,
        Locale::Pt,
        Locale::Ru,
        Locale::Tr,
        Locale::Zh,
    ];

    /// The tag used in URLs, directory names, and `lang` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::De => "de",
            Locale::Es => "es",
            Locale::Fa => "fa",
            Locale::Fi => "fi",
            Locale::Fr => "fr",
            Locale::He => "he",
            Locale::Hi => "hi",
            Locale::It => "it",
            Locale::Ja => "ja",
            Locale::Ko => "ko",
            Locale::Pt => "pt",
            Locale::Ru => "ru",
            Locale::Tr => "tr",
            Locale::Zh => "zh",
        }
    }

    /// Name of the language in that language, for the language switcher.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ar => "العربية",
            Locale::De => "Deutsch",
            Locale::Es => "Español",
            Locale::Fa => "فارسی",
            Locale::Fi => "Suomi",
            Locale::Fr => "Français",
            Locale::He => "עברית",
            Locale::Hi => "हिन्दी",
            Locale::It => "Italiano",
            Locale::Ja => "日本語",
            Locale::Ko => "한국어",
            Locale::Pt => "Português",
            Locale::Ru => "Русский",
            Locale::Tr => "Türkçe",
            Locale::Zh => "中文",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Locale::Ar | Locale::Fa | Locale::He => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a language tag.
///
/// Case-insensitive; a region suffix is ignored (`pt-BR` and `pt_br` are both
/// `pt`).
impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|l| l.as_str() == lang)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
