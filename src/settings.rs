//! User-facing display settings stored alongside the reminder preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Italian,
        Language::Spanish,
        Language::French,
    ];

    /// Two-letter code consumed by the string lookup.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Italian => "it",
            Language::Spanish => "es",
            Language::French => "fr",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Italian => "Italian",
            Language::Spanish => "Spanish",
            Language::French => "French",
        }
    }

    /// Picks the language from a locale tag such as `it_IT.UTF-8` or
    /// `fr-CA`, falling back to English.
    pub fn from_locale(locale: &str) -> Self {
        let prefix: String = locale.chars().take(2).collect();
        prefix.parse().unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == code || l.display_name().eq_ignore_ascii_case(&code))
            .ok_or_else(|| StoreError::InvalidLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    #[default]
    Meters,
    Feet,
    Yards,
}

impl LengthUnit {
    pub fn convert_meters(self, meters: f64) -> f64 {
        match self {
            LengthUnit::Meters => meters,
            LengthUnit::Feet => meters * 3.280_84,
            LengthUnit::Yards => meters * 1.093_61,
        }
    }
}

/// Display and case-insensitive `FromStr` over the variant names.
macro_rules! named_units {
    ($($ty:ident { $($variant:ident),+ $(,)? })*) => {
        $(
            impl $ty {
                pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

                pub fn name(self) -> &'static str {
                    match self {
                        $($ty::$variant => stringify!($variant),)+
                    }
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $ty {
                type Err = StoreError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let needle = s.trim();
                    $ty::ALL
                        .iter()
                        .copied()
                        .find(|unit| unit.name().eq_ignore_ascii_case(needle))
                        .ok_or_else(|| StoreError::InvalidUnit(s.to_string()))
                }
            }
        )*
    };
}

named_units! {
    TemperatureUnit { Celsius, Fahrenheit }
    LengthUnit { Meters, Feet, Yards }
}

/// The settings page as one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: Language,
    pub temperature_unit: TemperatureUnit,
    pub length_unit: LengthUnit,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            temperature_unit: TemperatureUnit::default(),
            length_unit: LengthUnit::default(),
            notifications_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!("it".parse::<Language>().unwrap(), Language::Italian);
        assert_eq!("French".parse::<Language>().unwrap(), Language::French);
        assert!(matches!(
            "de".parse::<Language>(),
            Err(StoreError::InvalidLanguage(_))
        ));
        assert_eq!(serde_json::to_string(&Language::Spanish).unwrap(), "\"es\"");
    }

    #[test]
    fn test_language_from_locale() {
        assert_eq!(Language::from_locale("it_IT.UTF-8"), Language::Italian);
        assert_eq!(Language::from_locale("de-DE"), Language::English);
        assert_eq!(Language::from_locale(""), Language::English);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(TemperatureUnit::Fahrenheit.to_string(), "Fahrenheit");
        assert!((LengthUnit::Feet.convert_meters(1.0) - 3.28084).abs() < 1e-9);
        assert_eq!(LengthUnit::Meters.to_string(), "Meters");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("fahrenheit".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(" YARDS ".parse::<LengthUnit>().unwrap(), LengthUnit::Yards);
        assert!(matches!("kelvin".parse::<TemperatureUnit>(), Err(StoreError::InvalidUnit(_))));
        for unit in LengthUnit::ALL {
            assert_eq!(unit.to_string().parse::<LengthUnit>().unwrap(), *unit);
        }
    }
}
