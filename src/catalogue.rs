//! The fixed flower catalogue.
//!
//! Older plant documents stored the kind as its display label and used an
//! empty string for "no kind chosen"; both forms are still accepted when
//! decoding, see [`optional_kind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowerKind {
    #[serde(alias = "Garofano")]
    Carnation,
    #[serde(alias = "Crisantemo")]
    Chrysanthemum,
    #[serde(alias = "Gerbera")]
    Gerbera,
    #[serde(alias = "Green Trick")]
    GreenTrick,
    #[serde(alias = "Peonia", alias = "peonie")]
    Peony,
    #[serde(alias = "Rosa")]
    Rose,
    #[serde(alias = "Statice")]
    Statice,
    #[serde(alias = "Girasole")]
    Sunflower,
    #[serde(alias = "Tulipano")]
    Tulip,
    #[serde(alias = "Violaciocca")]
    Wallflower,
}

impl FlowerKind {
    pub const ALL: [FlowerKind; 10] = [
        FlowerKind::Carnation,
        FlowerKind::Chrysanthemum,
        FlowerKind::Gerbera,
        FlowerKind::GreenTrick,
        FlowerKind::Peony,
        FlowerKind::Rose,
        FlowerKind::Statice,
        FlowerKind::Sunflower,
        FlowerKind::Tulip,
        FlowerKind::Wallflower,
    ];

    /// Display label shown in the garden list.
    pub fn label(self) -> &'static str {
        match self {
            FlowerKind::Carnation => "Garofano",
            FlowerKind::Chrysanthemum => "Crisantemo",
            FlowerKind::Gerbera => "Gerbera",
            FlowerKind::GreenTrick => "Green Trick",
            FlowerKind::Peony => "Peonia",
            FlowerKind::Rose => "Rosa",
            FlowerKind::Statice => "Statice",
            FlowerKind::Sunflower => "Girasole",
            FlowerKind::Tulip => "Tulipano",
            FlowerKind::Wallflower => "Violaciocca",
        }
    }

    /// Stable identifier, identical to the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            FlowerKind::Carnation => "carnation",
            FlowerKind::Chrysanthemum => "chrysanthemum",
            FlowerKind::Gerbera => "gerbera",
            FlowerKind::GreenTrick => "greenTrick",
            FlowerKind::Peony => "peony",
            FlowerKind::Rose => "rose",
            FlowerKind::Statice => "statice",
            FlowerKind::Sunflower => "sunflower",
            FlowerKind::Tulip => "tulip",
            FlowerKind::Wallflower => "wallflower",
        }
    }
}

impl fmt::Display for FlowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlowerKind {
    type Err = StoreError;

    /// Accepts the key or the display label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FlowerKind::ALL
            .into_iter()
            .find(|kind| {
                kind.key().eq_ignore_ascii_case(needle) || kind.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| StoreError::InvalidFlowerKind(s.to_string()))
    }
}

/// Deserializes an optional kind where `null`, a missing field and the
/// legacy empty string all mean "no kind chosen".
pub fn optional_kind<'de, D>(deserializer: D) -> Result<Option<FlowerKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let quoted = serde_json::Value::String(value.to_string());
            FlowerKind::deserialize(quoted)
                .map(Some)
                .map_err(<D::Error as serde::de::Error>::custom)
        }
    }
}
