//! User preferences (theme, language, currency) and the translation lookup.

mod i18n;

use std::fmt;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::db::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub(crate) fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Name shown in the settings overlay, in the language itself.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "hi" | "hindi" => Some(Language::Hi),
            _ => None,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" | "$" => Some(Currency::Usd),
            "INR" | "₹" => Some(Currency::Inr),
            _ => None,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Currency::Usd => Currency::Inr,
            Currency::Inr => Currency::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const THEME_KEY: &str = "theme";
const LANGUAGE_KEY: &str = "language";
const CURRENCY_KEY: &str = "currency";

/// Keys accepted by [`Settings::apply`].
pub(crate) const SETTING_KEYS: &[&str] = &[THEME_KEY, LANGUAGE_KEY, CURRENCY_KEY];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Settings {
    pub(crate) theme: Theme,
    pub(crate) language: Language,
    pub(crate) currency: Currency,
}

impl Settings {
    /// Read persisted preferences. Missing or unrecognized values keep their defaults.
    pub(crate) fn load(db: &Database) -> Result<Self> {
        let mut settings = Settings::default();
        if let Some(raw) = db.get_setting(THEME_KEY)? {
            match Theme::parse(&raw) {
                Some(theme) => settings.theme = theme,
                None => warn!(value = %raw, "ignoring unknown stored theme"),
            }
        }
        if let Some(raw) = db.get_setting(LANGUAGE_KEY)? {
            match Language::parse(&raw) {
                Some(language) => settings.language = language,
                None => warn!(value = %raw, "ignoring unknown stored language"),
            }
        }
        if let Some(raw) = db.get_setting(CURRENCY_KEY)? {
            match Currency::parse(&raw) {
                Some(currency) => settings.currency = currency,
                None => warn!(value = %raw, "ignoring unknown stored currency"),
            }
        }
        Ok(settings)
    }

    pub(crate) fn set_theme(&mut self, db: &Database, theme: Theme) -> Result<()> {
        db.set_setting(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        info!(%theme, "theme changed");
        Ok(())
    }

    pub(crate) fn set_language(&mut self, db: &Database, language: Language) -> Result<()> {
        db.set_setting(LANGUAGE_KEY, language.as_str())?;
        self.language = language;
        info!(%language, "language changed");
        Ok(())
    }

    pub(crate) fn set_currency(&mut self, db: &Database, currency: Currency) -> Result<()> {
        db.set_setting(CURRENCY_KEY, currency.code())?;
        self.currency = currency;
        info!(%currency, "currency changed");
        Ok(())
    }

    /// Set one preference from its textual key and value, as typed on the command line.
    pub(crate) fn apply(&mut self, db: &Database, key: &str, value: &str) -> Result<()> {
        match key.trim().to_ascii_lowercase().as_str() {
            "theme" => match Theme::parse(value) {
                Some(theme) => self.set_theme(db, theme),
                None => bail!("Unknown theme '{value}'. Use light or dark."),
            },
            "language" | "lang" => match Language::parse(value) {
                Some(language) => self.set_language(db, language),
                None => bail!("Unknown language '{value}'. Use en or hi."),
            },
            "currency" => match Currency::parse(value) {
                Some(currency) => self.set_currency(db, currency),
                None => bail!("Unknown currency '{value}'. Use USD or INR."),
            },
            other => bail!("Unknown setting '{other}'. Use theme, language or currency."),
        }
    }

    /// Translate `key` into the current language, falling back to the key itself.
    pub(crate) fn t<'a>(&self, key: &'a str) -> &'a str {
        i18n::translate(self.language, key).unwrap_or(key)
    }

    /// Display name for a category. Seeded names are translated; user-created ones pass through.
    pub(crate) fn category_name(&self, name: &str) -> String {
        i18n::translate(self.language, &name.to_lowercase())
            .map(str::to_string)
            .unwrap_or_else(|| name.to_string())
    }
}

#[cfg(test)]
mod tests;
