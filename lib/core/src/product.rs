use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single catalog row as read from a tier table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRow {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category label, `None` when the column is null
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductRow {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.map(str::to_string),
        }
    }

    /// Category label with null coerced to the empty string
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}

/// Catalog tier. Each tier is backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Star,
    #[default]
    Mainstream,
    #[serde(rename = "highend")]
    HighEnd,
    Flagship,
}

impl Tier {
    /// Tiers in selection order; a tier index points into this list.
    pub const ALL: [Tier; 4] = [Tier::Star, Tier::Mainstream, Tier::HighEnd, Tier::Flagship];

    /// Resolve a selection index, rejecting anything out of range
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or(Error::InvalidTier {
            index,
            count: Self::ALL.len(),
        })
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Tier::Star => 0,
            Tier::Mainstream => 1,
            Tier::HighEnd => 2,
            Tier::Flagship => 3,
        }
    }

    /// Name of the backing table
    #[must_use]
    pub fn table_name(self) -> &'static str {
        match self {
            Tier::Star => "star",
            Tier::Mainstream => "mainstream",
            Tier::HighEnd => "highend",
            Tier::Flagship => "flagship",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.table_name() == lower)
            .ok_or_else(|| Error::UnknownTier(s.to_string()))
    }
}
