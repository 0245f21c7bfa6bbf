//! Ranking and counter statistics.

use serde::{Deserialize, Serialize};

/// Rank bracket the ranking endpoint can be filtered by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RankFilter {
    /// Every rank
    #[default]
    All,
    /// Epic
    Epic,
    /// Legend
    Legend,
    /// Mythic
    Mythic,
    /// Mythical Honor
    Honor,
    /// Mythical Glory
    Glory,
}

impl RankFilter {
    /// Parse user input, falling back to [`RankFilter::All`] for anything unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlbb_api::RankFilter;
    ///
    /// assert_eq!(RankFilter::parse_lenient("MYTHIC"), RankFilter::Mythic);
    /// assert_eq!(RankFilter::parse_lenient("grandmaster"), RankFilter::All);
    /// ```
    pub fn parse_lenient(input: &str) -> Self {
        input.trim().parse().unwrap_or_default()
    }

    /// Heading used when presenting rankings.
    pub fn title(&self) -> String {
        match self {
            RankFilter::All => "All Ranks".to_string(),
            other => {
                let raw = other.as_ref();
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Time window the ranking endpoint aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DaysWindow {
    /// Last seven days
    #[default]
    Week,
    /// Last thirty days
    Month,
}

impl DaysWindow {
    /// Map a day count onto a supported window; unsupported values become a week.
    pub fn from_days(days: u32) -> Self {
        match days {
            30 => DaysWindow::Month,
            _ => DaysWindow::Week,
        }
    }

    /// Number of days in the window.
    pub fn days(&self) -> u32 {
        match self {
            DaysWindow::Week => 7,
            DaysWindow::Month => 30,
        }
    }
}

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroRanking {
    /// Hero display name
    pub name: String,
    /// Win rate as a fraction (0.0 - 1.0)
    pub win_rate: Option<f64>,
    /// Pick (appearance) rate as a fraction
    pub pick_rate: Option<f64>,
    /// Ban rate as a fraction
    pub ban_rate: Option<f64>,
}

/// A hero that performs well against the queried hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterPick {
    /// Counter hero display name
    pub name: String,
    /// Win-rate swing reported by the upstream, as a fraction
    pub increase_win_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_title_capitalises() {
        assert_eq!(RankFilter::Glory.title(), "Glory");
        assert_eq!(RankFilter::All.title(), "All Ranks");
    }

    #[test]
    fn days_window_defaults_to_week() {
        assert_eq!(DaysWindow::from_days(30).days(), 30);
        assert_eq!(DaysWindow::from_days(14).days(), 7);
    }
}
