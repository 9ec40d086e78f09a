//! Protection factor selections.
//!
//! Both factors divide airborne concentration, and every variant carries a
//! factor of at least 1, so they are always safe denominators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Respiratory protection factor (PFR) for the prescribed respirator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespiratoryProtection {
    #[default]
    None,
    /// Air-purifying respirator.
    Apr,
    /// Powered air-purifying respirator.
    Papr,
}

impl RespiratoryProtection {
    pub const ALL: [RespiratoryProtection; 3] = [
        RespiratoryProtection::None,
        RespiratoryProtection::Apr,
        RespiratoryProtection::Papr,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            RespiratoryProtection::None => 1.0,
            RespiratoryProtection::Apr => 50.0,
            RespiratoryProtection::Papr => 1000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RespiratoryProtection::None => "none",
            RespiratoryProtection::Apr => "apr",
            RespiratoryProtection::Papr => "papr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RespiratoryProtection::None => "None",
            RespiratoryProtection::Apr => "APR (Air-Purifying Respirator)",
            RespiratoryProtection::Papr => "PAPR (Powered Air-Purifying Respirator)",
        }
    }

    /// Resolve a selection from its numeric factor.
    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.factor() == factor)
    }
}

impl fmt::Display for RespiratoryProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RespiratoryProtection {
    type Err = ModelError;

    /// Accepts the short name (`none`, `apr`, `papr`) or the factor (`50`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_choice(s);
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .or_else(|| normalized.parse::<f64>().ok().and_then(Self::from_factor))
            .ok_or_else(|| ModelError::UnknownChoice {
                kind: "respiratory protection",
                value: s.to_string(),
            })
    }
}

/// Engineering protection factor (PFE) for the containment in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineeringProtection {
    /// Open bench or tabletop; no effective engineering control.
    #[default]
    TypeI,
    /// Fume hood.
    TypeII,
    /// Glove box or hot cell.
    TypeIII,
}

impl EngineeringProtection {
    pub const ALL: [EngineeringProtection; 3] = [
        EngineeringProtection::TypeI,
        EngineeringProtection::TypeII,
        EngineeringProtection::TypeIII,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            EngineeringProtection::TypeI => 1.0,
            EngineeringProtection::TypeII => 1000.0,
            EngineeringProtection::TypeIII => 100_000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineeringProtection::TypeI => "type-i",
            EngineeringProtection::TypeII => "type-ii",
            EngineeringProtection::TypeIII => "type-iii",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EngineeringProtection::TypeI => "Type I (Open Bench/Tabletop)",
            EngineeringProtection::TypeII => "Type II (Fume Hood)",
            EngineeringProtection::TypeIII => "Type III (Glove Box/Hot Cell)",
        }
    }

    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.factor() == factor)
    }
}

impl fmt::Display for EngineeringProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EngineeringProtection {
    type Err = ModelError;

    /// Accepts `type-i`, `type_ii`, `III`, or the factor (`1000`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_choice(s);
        let roman = normalized.strip_prefix("type").unwrap_or(&normalized);
        let by_name = match roman {
            "i" => Some(EngineeringProtection::TypeI),
            "ii" => Some(EngineeringProtection::TypeII),
            "iii" => Some(EngineeringProtection::TypeIII),
            _ => None,
        };
        by_name
            .or_else(|| normalized.parse::<f64>().ok().and_then(Self::from_factor))
            .ok_or_else(|| ModelError::UnknownChoice {
                kind: "engineering protection",
                value: s.to_string(),
            })
    }
}

fn normalize_choice(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_at_least_one() {
        for p in RespiratoryProtection::ALL {
            assert!(p.factor() >= 1.0);
        }
        for p in EngineeringProtection::ALL {
            assert!(p.factor() >= 1.0);
        }
    }

    #[test]
    fn parses_names_and_factors() {
        assert_eq!("APR".parse(), Ok(RespiratoryProtection::Apr));
        assert_eq!("1000".parse(), Ok(RespiratoryProtection::Papr));
        assert_eq!("type-ii".parse(), Ok(EngineeringProtection::TypeII));
        assert_eq!("Type III".parse(), Ok(EngineeringProtection::TypeIII));
        assert_eq!("1e5".parse(), Ok(EngineeringProtection::TypeIII));
        assert!("hood".parse::<EngineeringProtection>().is_err());
        assert!("25".parse::<RespiratoryProtection>().is_err());
    }
}
