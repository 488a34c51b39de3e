//! Domain types shared by the scorer, the places client, and the CLI.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Formats the pair as `"<lat>,<lon>"`, the shape the places search expects.
    #[must_use]
    pub fn to_ll(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A nearby point of interest, already filtered and normalized.
///
/// `primary_category_name` is never empty: records without a usable first
/// category are dropped during normalization. The position is optional; a
/// place without one still counts toward the vibe but gets no map marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub primary_category_name: String,
    pub address: String,
    pub locality: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Descriptive bands for a final vibe score, highest threshold first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibeBand {
    EnergeticAndThriving,
    LivelyAndHappening,
    RelaxedAndCasual,
    CalmAndSerene,
    QuietAndProfessional,
}

impl VibeBand {
    /// Selects the band for a final score. Scores are expected in `[1, 10]`.
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        match score {
            9.. => Self::EnergeticAndThriving,
            7..=8 => Self::LivelyAndHappening,
            5..=6 => Self::RelaxedAndCasual,
            3..=4 => Self::CalmAndSerene,
            _ => Self::QuietAndProfessional,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EnergeticAndThriving => "Energetic & Thriving",
            Self::LivelyAndHappening => "Lively & Happening",
            Self::RelaxedAndCasual => "Relaxed & Casual",
            Self::CalmAndSerene => "Calm & Serene",
            Self::QuietAndProfessional => "Quiet & Professional",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::EnergeticAndThriving => "\u{1f389}",
            Self::LivelyAndHappening => "\u{1f973}",
            Self::RelaxedAndCasual => "\u{1f60e}",
            Self::CalmAndSerene => "\u{1f60c}",
            Self::QuietAndProfessional => "\u{1f92b}",
        }
    }
}

impl std::fmt::Display for VibeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The banded outcome of scoring a list of places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeResult {
    /// Final score, always in `[1, 10]`.
    pub score: u8,
    pub label: String,
    pub emoji: String,
}

impl VibeResult {
    /// Builds the result for an already-banded score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        let band = VibeBand::for_score(score);
        Self {
            score,
            label: band.label().to_string(),
            emoji: band.emoji().to_string(),
        }
    }

    #[must_use]
    pub fn band(&self) -> VibeBand {
        VibeBand::for_score(self.score)
    }
}
