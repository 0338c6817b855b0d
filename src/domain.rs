use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarvardError;

/// A curatorial category ("Paintings", "Coins", ...) used to scope which
/// records are fetched from the object endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification(String);

impl Classification {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Classification {
    type Err = HarvardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        if normalized.is_empty() {
            return Err(HarvardError::InvalidClassification(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// One catalog entry: a classification name and how many objects carry it.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationEntry {
    pub name: String,
    pub object_count: i64,
}

/// One row of the `artifact_metadata` relation. Every attribute except the
/// primary key survives as `Option` so a sparse upstream record never fails
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRow {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub culture: Option<String>,
    pub period: Option<String>,
    pub century: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub classification: Option<String>,
    pub accessionyear: Option<i64>,
    pub accessionmethod: Option<String>,
}

/// One row of the `artifact_media` relation, 1:1 with metadata by convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRow {
    pub objectid: Option<i64>,
    pub imagecount: Option<i64>,
    pub mediacount: Option<i64>,
    pub colorcount: Option<i64>,
    pub rank: Option<i64>,
    pub datebegin: Option<i64>,
    pub dateend: Option<i64>,
}

/// One row of the `artifact_colors` relation; zero or more per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRow {
    pub objectid: Option<i64>,
    pub color: Option<String>,
    pub spectrum: Option<String>,
    pub hue: Option<String>,
    pub percent: Option<f64>,
    pub css3: Option<String>,
}

/// The explicit per-run result of fetch + normalize, passed by the caller
/// into persistence. Replaces the ambient session state of the original tool.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactCollections {
    pub classification: Classification,
    pub collected_at: String,
    pub metadata: Vec<MetadataRow>,
    pub media: Vec<MediaRow>,
    pub colors: Vec<ColorRow>,
}

impl ArtifactCollections {
    pub fn record_count(&self) -> usize {
        self.metadata.len()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_classification_trims() {
        let c: Classification = "  Paintings ".parse().unwrap();
        assert_eq!(c.as_str(), "Paintings");
    }

    #[test]
    fn parse_classification_rejects_empty() {
        let err = "   ".parse::<Classification>().unwrap_err();
        assert_matches!(err, HarvardError::InvalidClassification(_));
    }
}
