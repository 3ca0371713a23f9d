//! Relic catalog: quality/rarity tiers, relics and their drop tables.
//!
//! The catalog is a static JSON document loaded once at startup.
//! Tier names are validated at this boundary; an unknown quality or
//! rarity anywhere in the document is a fatal error rather than a
//! silent default at query time.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::error::ConfigError;

/// Relic condition; changes drop probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Intact,
    Exceptional,
    Flawless,
    Radiant,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Intact,
        QualityTier::Exceptional,
        QualityTier::Flawless,
        QualityTier::Radiant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Intact => "intact",
            QualityTier::Exceptional => "exceptional",
            QualityTier::Flawless => "flawless",
            QualityTier::Radiant => "radiant",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown tier '{0}'")]
pub struct ParseTierError(String);

impl FromStr for QualityTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intact" => Ok(QualityTier::Intact),
            "exceptional" => Ok(QualityTier::Exceptional),
            "flawless" => Ok(QualityTier::Flawless),
            "radiant" => Ok(QualityTier::Radiant),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

/// Drop classification used to look up a probability weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RarityTier::Common => "common",
            RarityTier::Uncommon => "uncommon",
            RarityTier::Rare => "rare",
        };
        f.write_str(name)
    }
}

/// One possible reward from a relic.
#[derive(Debug, Clone, Deserialize)]
pub struct RelicDrop {
    pub name: String,
    pub rarity: RarityTier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relic {
    pub name: String,
    pub drops: Vec<RelicDrop>,
}

/// The full static catalog: probability tables plus the relic list.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub probabilities: HashMap<QualityTier, HashMap<RarityTier, f64>>,
    pub relics: Vec<Relic>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let catalog: Catalog = serde_json::from_str(&content).map_err(ConfigError::Catalog)?;
        catalog.validate()?;

        Ok(catalog)
    }

    /// Every quality tier must have a table, every weight must be a
    /// probability, and every rarity referenced by a drop must have a
    /// weight under every quality tier.
    fn validate(&self) -> Result<(), ConfigError> {
        for quality in QualityTier::ALL {
            let table = self.probabilities.get(&quality).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: "probabilities",
                    reason: format!("missing table for quality '{quality}'"),
                }
            })?;

            for (rarity, weight) in table {
                if !(0.0..=1.0).contains(weight) {
                    return Err(ConfigError::InvalidValue {
                        field: "probabilities",
                        reason: format!("weight {weight} for {quality}/{rarity} is not in 0..=1"),
                    });
                }
            }

            for relic in &self.relics {
                for drop in &relic.drops {
                    if !table.contains_key(&drop.rarity) {
                        return Err(ConfigError::InvalidValue {
                            field: "relics",
                            reason: format!(
                                "drop '{}' of '{}' has rarity '{}' with no weight under '{quality}'",
                                drop.name, relic.name, drop.rarity
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Find a relic by name, case-insensitively.
    pub fn find_relic(&self, name: &str) -> Option<&Relic> {
        self.relics.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Probability weight for a rarity under a quality tier.
    pub fn weight(&self, quality: QualityTier, rarity: RarityTier) -> f64 {
        // Guaranteed present by validate().
        self.probabilities
            .get(&quality)
            .and_then(|table| table.get(&rarity))
            .copied()
            .unwrap_or(0.0)
    }
}
