use serde::Serialize;

use super::{aggregate::SuperGenreCounts, genre::SuperGenre};

/// Number of named axes on the menu radar.
pub const DEFAULT_TOP_K: usize = 8;

/// Label of the axis that sums up every bucket beyond `top_k`.
pub const OTHER_LABEL: &str = "Other";
/// Value of an axis with a zero count.
pub const MIN_VALUE: f64 = 5.0;
/// Value of the largest axis.
pub const MAX_VALUE: f64 = 100.0;

/// Axes of the genre radar chart.
///
/// `labels` and `values` always have the same length; `labels[i]` is drawn
/// with magnitude `values[i]`. Every value lies in [`MIN_VALUE`, `MAX_VALUE`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarProfile {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl RadarProfile {
    /// Number of axes, including a trailing "Other" axis.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `true` for a user without any genre data.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn push(&mut self, label: &str, value: f64) {
        self.labels.push(label.to_string());
        self.values.push(value);
    }
}

/// Builds the radar axes from super-genre counts.
///
/// Keeps the `top_k` largest buckets (equal counts keep declaration order) and
/// folds the rest into a trailing "Other" axis when that remainder is
/// positive. Values are square-root scaled into [5, 100] against the largest
/// axis so that small buckets stay visible.
///
/// # Arguments
///
/// * `counts` - Weighted super-genre counts from [`collect`](super::collect)
/// * `top_k` - Number of named axes; `0` leaves only "Other"
///
/// # Example
///
/// ```
/// let counts: SuperGenreCounts = [(SuperGenre::Rock, 100.0), (SuperGenre::Pop, 25.0)]
///     .into_iter()
///     .collect();
/// let radar = build_radar(&counts, DEFAULT_TOP_K);
/// assert_eq!(radar.labels, vec!["Rock", "Pop"]);
/// assert_eq!(radar.values, vec![100.0, 52.5]);
/// ```
pub fn build_radar(counts: &SuperGenreCounts, top_k: usize) -> RadarProfile {
    let mut ranked: Vec<(SuperGenre, f64)> = counts.iter().collect();
    // stable: ties stay in declaration order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let split = top_k.min(ranked.len());
    let (selected, rest) = ranked.split_at(split);
    let other: f64 = rest.iter().map(|(_, c)| *c).sum();

    let max_val = selected
        .iter()
        .map(|(_, c)| *c)
        .chain(std::iter::once(other))
        .fold(0.0_f64, f64::max);
    let max_val = if max_val > 0.0 { max_val } else { 1.0 };

    let mut radar = RadarProfile::default();
    for (genre, count) in selected {
        radar.push(genre.label(), scale(*count, max_val));
    }
    if other > 0.0 {
        radar.push(OTHER_LABEL, scale(other, max_val));
    }

    radar
}

fn scale(count: f64, max_val: f64) -> f64 {
    let ratio = (count / max_val).clamp(0.0, 1.0);
    MIN_VALUE + (MAX_VALUE - MIN_VALUE) * ratio.sqrt()
}
