#![allow(clippy::unwrap_used)]

use super::i18n;
use super::*;

#[test]
fn test_defaults() {
    let s = Settings::default();
    assert_eq!(s.theme, Theme::Light);
    assert_eq!(s.language, Language::En);
    assert_eq!(s.currency, Currency::Usd);
}

#[test]
fn test_parse_variants() {
    assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
    assert_eq!(Theme::parse(" light "), Some(Theme::Light));
    assert_eq!(Theme::parse("blue"), None);
    assert_eq!(Language::parse("Hindi"), Some(Language::Hi));
    assert_eq!(Language::parse("en"), Some(Language::En));
    assert_eq!(Language::parse("fr"), None);
    assert_eq!(Currency::parse("inr"), Some(Currency::Inr));
    assert_eq!(Currency::parse("$"), Some(Currency::Usd));
    assert_eq!(Currency::parse("EUR"), None);
}

#[test]
fn test_toggle_and_cycle() {
    assert_eq!(Theme::Light.toggle(), Theme::Dark);
    assert_eq!(Theme::Dark.toggle(), Theme::Light);
    assert_eq!(Language::En.next(), Language::Hi);
    assert_eq!(Currency::Inr.next(), Currency::Usd);
}

#[test]
fn test_currency_symbols() {
    assert_eq!(Currency::Usd.symbol(), "$");
    assert_eq!(Currency::Inr.symbol(), "₹");
    assert_eq!(Currency::Inr.to_string(), "INR");
}

#[test]
fn test_load_fresh_database_uses_defaults() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(Settings::load(&db).unwrap(), Settings::default());
}

#[test]
fn test_settings_persist() {
    let db = Database::open_in_memory().unwrap();
    let mut s = Settings::load(&db).unwrap();
    s.set_theme(&db, Theme::Dark).unwrap();
    s.set_language(&db, Language::Hi).unwrap();
    s.set_currency(&db, Currency::Inr).unwrap();

    let reloaded = Settings::load(&db).unwrap();
    assert_eq!(reloaded.theme, Theme::Dark);
    assert_eq!(reloaded.language, Language::Hi);
    assert_eq!(reloaded.currency, Currency::Inr);
}

#[test]
fn test_load_ignores_garbage() {
    let db = Database::open_in_memory().unwrap();
    db.set_setting("theme", "neon").unwrap();
    db.set_setting("currency", "INR").unwrap();
    let s = Settings::load(&db).unwrap();
    assert_eq!(s.theme, Theme::Light);
    assert_eq!(s.currency, Currency::Inr);
}

#[test]
fn test_apply_by_key() {
    let db = Database::open_in_memory().unwrap();
    let mut s = Settings::default();
    s.apply(&db, "lang", "hi").unwrap();
    s.apply(&db, "Currency", "inr").unwrap();
    assert_eq!(s.language, Language::Hi);
    assert_eq!(s.currency, Currency::Inr);
    assert_eq!(db.get_setting("language").unwrap().as_deref(), Some("hi"));
}

#[test]
fn test_apply_rejects_unknown() {
    let db = Database::open_in_memory().unwrap();
    let mut s = Settings::default();
    assert!(s.apply(&db, "theme", "purple").is_err());
    assert!(s.apply(&db, "font", "mono").is_err());
    assert_eq!(s, Settings::default());
    assert_eq!(db.get_setting("theme").unwrap(), None);
}

#[test]
fn test_translate() {
    let mut s = Settings::default();
    assert_eq!(s.t("totalSpent"), "Total Spent");
    s.language = Language::Hi;
    assert_eq!(s.t("totalSpent"), "कुल खर्च");
}

#[test]
fn test_translate_falls_back_to_key() {
    let s = Settings {
        language: Language::Hi,
        ..Settings::default()
    };
    assert_eq!(s.t("noSuchKey"), "noSuchKey");
}

#[test]
fn test_category_name() {
    let mut s = Settings::default();
    assert_eq!(s.category_name("Food"), "Food");
    s.language = Language::Hi;
    assert_eq!(s.category_name("Food"), "भोजन");
    assert_eq!(s.category_name("Pets"), "Pets");
}

#[test]
fn test_tables_have_same_keys() {
    let mut en = i18n::keys(Language::En);
    let mut hi = i18n::keys(Language::Hi);
    en.sort_unstable();
    hi.sort_unstable();
    assert_eq!(en, hi);
}
