use std::fmt;

use serde::Serialize;

use super::{aggregate::SuperGenreCounts, genre::SuperGenre};

const DIVERSITY_WEIGHT: f64 = 0.45;
const DEPTH_WEIGHT: f64 = 0.35;
const ACTIVITY_WEIGHT: f64 = 0.20;

/// Unique artists at which depth is (almost) saturated.
const DEPTH_SATURATION: f64 = 100.0;
/// Total weighted genre hits at which activity saturates.
const ACTIVITY_SATURATION: f64 = 200.0;

/// Description of [`ListenerRating::insufficient`].
pub const INSUFFICIENT_DATA_DESCRIPTION: &str =
    "Not enough listening data yet - listen to some more music and check back soon!";

/// Letter grade of a listener, best first.
///
/// Serializes as its display form (`"S+"`, `"B-"`, `"F"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ListenerGrade {
    #[serde(rename = "S+")]
    SPlus,
    S,
    #[serde(rename = "S-")]
    SMinus,
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    F,
}

/// Minimum score per grade, best first.
const THRESHOLDS: [(f64, ListenerGrade); 15] = [
    (98.0, ListenerGrade::SPlus),
    (95.0, ListenerGrade::S),
    (92.0, ListenerGrade::SMinus),
    (88.0, ListenerGrade::APlus),
    (84.0, ListenerGrade::A),
    (80.0, ListenerGrade::AMinus),
    (76.0, ListenerGrade::BPlus),
    (73.0, ListenerGrade::B),
    (70.0, ListenerGrade::BMinus),
    (68.0, ListenerGrade::CPlus),
    (65.0, ListenerGrade::C),
    (62.0, ListenerGrade::CMinus),
    (59.0, ListenerGrade::DPlus),
    (56.0, ListenerGrade::D),
    (53.0, ListenerGrade::DMinus),
];

impl ListenerGrade {
    /// Maps a composite score in [0, 100] to a grade.
    ///
    /// Each grade starts at its threshold: `98.0` is S+, `97.99` is S, and
    /// anything below `53.0` is F.
    ///
    /// # Example
    ///
    /// ```
    /// assert_eq!(ListenerGrade::from_score(84.0), ListenerGrade::A);
    /// assert_eq!(ListenerGrade::from_score(12.5), ListenerGrade::F);
    /// ```
    pub fn from_score(score: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(ListenerGrade::F)
    }

    /// Short form shown on the menu page.
    pub fn as_str(self) -> &'static str {
        match self {
            ListenerGrade::SPlus => "S+",
            ListenerGrade::S => "S",
            ListenerGrade::SMinus => "S-",
            ListenerGrade::APlus => "A+",
            ListenerGrade::A => "A",
            ListenerGrade::AMinus => "A-",
            ListenerGrade::BPlus => "B+",
            ListenerGrade::B => "B",
            ListenerGrade::BMinus => "B-",
            ListenerGrade::CPlus => "C+",
            ListenerGrade::C => "C",
            ListenerGrade::CMinus => "C-",
            ListenerGrade::DPlus => "D+",
            ListenerGrade::D => "D",
            ListenerGrade::DMinus => "D-",
            ListenerGrade::F => "F",
        }
    }

    /// One-sentence verdict shown under the grade.
    pub fn description(self) -> &'static str {
        match self {
            ListenerGrade::SPlus => {
                "Legendary Music Explorer - You're a true music connoisseur with exceptional taste and depth!"
            }
            ListenerGrade::S => {
                "Elite Music Enthusiast - Your musical knowledge and diversity are outstanding!"
            }
            ListenerGrade::SMinus => {
                "Superior Music Lover - You have excellent taste and explore music actively!"
            }
            ListenerGrade::APlus => {
                "Excellent Music Explorer - You're very well-rounded with great listening habits!"
            }
            ListenerGrade::A => {
                "Great Music Listener - You have diverse taste and listen to music regularly!"
            }
            ListenerGrade::AMinus => {
                "Very Good Music Fan - You explore music actively and have good variety!"
            }
            ListenerGrade::BPlus => {
                "Good Music Listener - You have solid musical taste and decent variety!"
            }
            ListenerGrade::B => "Decent Music Fan - You're on the right track with room to grow!",
            ListenerGrade::BMinus => {
                "Okay Music Listener - You have potential but need to explore more!"
            }
            ListenerGrade::CPlus => {
                "Average Music Fan - You listen to music but could diversify more!"
            }
            ListenerGrade::C => "Basic Music Listener - Time to expand your musical horizons!",
            ListenerGrade::CMinus => "Limited Music Fan - Try branching out to new genres!",
            ListenerGrade::DPlus => "Casual Listener - Music could be more important in your life!",
            ListenerGrade::D => "Occasional Listener - Time to discover the world of music!",
            ListenerGrade::DMinus => "Music Newcomer - Welcome to the wonderful world of music!",
            ListenerGrade::F => "Music Beginner - Start your musical journey today!",
        }
    }
}

impl fmt::Display for ListenerGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-scores behind a rating, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub diversity: f64,
    pub depth: f64,
    pub activity: f64,
}

impl ScoreBreakdown {
    /// Weighted blend `100 × (0.45 diversity + 0.35 depth + 0.20 activity)`,
    /// clamped to [0, 100].
    pub fn composite(&self) -> f64 {
        let blended = DIVERSITY_WEIGHT * self.diversity
            + DEPTH_WEIGHT * self.depth
            + ACTIVITY_WEIGHT * self.activity;
        (100.0 * blended).clamp(0.0, 100.0)
    }
}

/// Grade, composite score and description shown on the menu page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListenerRating {
    pub grade: ListenerGrade,
    pub score: f64,
    pub description: &'static str,
}

impl ListenerRating {
    /// Rating for a user without any listening history.
    pub fn insufficient() -> Self {
        ListenerRating {
            grade: ListenerGrade::F,
            score: 0.0,
            description: INSUFFICIENT_DATA_DESCRIPTION,
        }
    }

    /// `true` for the rating of a user without listening data, as opposed to
    /// a computed F.
    pub fn is_insufficient(&self) -> bool {
        self.description == INSUFFICIENT_DATA_DESCRIPTION
    }
}

/// Rates a listener from their super-genre counts and distinct artist count.
///
/// Without any weighted genre hits the result is [`ListenerRating::insufficient`].
///
/// # Arguments
///
/// * `counts` - Weighted super-genre counts from [`collect`](super::collect)
/// * `unique_artist_count` - Distinct artists seen while collecting
///
/// # Example
///
/// ```
/// let (counts, unique_artists) = collect(&client, settings.http_timeout).await;
/// let rating = grade(&counts, unique_artists);
/// println!("{} ({:.1}): {}", rating.grade, rating.score, rating.description);
/// ```
pub fn grade(counts: &SuperGenreCounts, unique_artist_count: usize) -> ListenerRating {
    match breakdown(counts, unique_artist_count) {
        Some(parts) => {
            let score = parts.composite();
            let grade = ListenerGrade::from_score(score);
            ListenerRating {
                grade,
                score,
                description: grade.description(),
            }
        }
        None => ListenerRating::insufficient(),
    }
}

/// Computes the sub-scores, or `None` when there is nothing to rate.
pub fn breakdown(counts: &SuperGenreCounts, unique_artist_count: usize) -> Option<ScoreBreakdown> {
    let total = counts.total();
    if total <= 0.0 {
        return None;
    }

    Some(ScoreBreakdown {
        diversity: diversity(counts, total),
        depth: depth(unique_artist_count),
        activity: (total / ACTIVITY_SATURATION).min(1.0),
    })
}

/// Shannon entropy of the bucket distribution, normalized by the entropy of
/// a uniform spread over every super-genre.
fn diversity(counts: &SuperGenreCounts, total: f64) -> f64 {
    let entropy: f64 = counts
        .iter()
        .map(|(_, c)| c / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.ln())
        .sum();

    let buckets = SuperGenre::ALL.len();
    let max_entropy = if buckets > 1 { (buckets as f64).ln() } else { 1.0 };

    (entropy / max_entropy).clamp(0.0, 1.0)
}

fn depth(unique_artist_count: usize) -> f64 {
    ((1.0 + unique_artist_count as f64).ln() / (1.0 + DEPTH_SATURATION).ln()).min(1.0)
}
