use std::{
    collections::{BTreeMap, HashSet},
    time::Duration,
};

use crate::{
    info,
    spotify::{ListeningSource, bounded},
    types::RecencyWindow,
    warning,
};

use super::genre::{SuperGenre, classify};

/// Top items requested per window and pass.
pub const TOP_ITEMS_LIMIT: u32 = 50;

/// Genres of artists only known through their tracks count for less.
pub const TRACK_ARTIST_FACTOR: f64 = 0.6;

/// Weighted number of genre hits per super-genre.
///
/// Values only ever grow. Keys are [`SuperGenre`] variants, and iteration
/// follows their declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuperGenreCounts {
    counts: BTreeMap<SuperGenre, f64>,
}

impl SuperGenreCounts {
    /// Empty counts; every bucket reads as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to `genre`. Negative or non-finite weights are ignored.
    pub fn add(&mut self, genre: SuperGenre, weight: f64) -> &mut Self {
        if weight.is_finite() && weight >= 0.0 {
            *self.counts.entry(genre).or_insert(0.0) += weight;
        }
        self
    }

    /// Classifies every tag and adds `weight` to its bucket.
    ///
    /// A tag listed twice counts twice.
    ///
    /// # Arguments
    ///
    /// * `tags` - Raw Spotify genre tags, e.g. an artist's `genres`
    /// * `weight` - Amount added per tag
    ///
    /// # Example
    ///
    /// ```
    /// let mut counts = SuperGenreCounts::new();
    /// counts.add_tags(["jazz", "bebop", "rock"], 0.8);
    /// assert_eq!(counts.get(SuperGenre::JazzBlues), 1.6);
    /// ```
    pub fn add_tags<I, S>(&mut self, tags: I, weight: f64) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.add(classify(tag.as_ref()), weight);
        }
        self
    }

    /// Accumulated weight of `genre`, zero if it never received any.
    pub fn get(&self, genre: SuperGenre) -> f64 {
        self.counts.get(&genre).copied().unwrap_or(0.0)
    }

    /// Sum over all buckets. Empty counts total `0.0`.
    pub fn total(&self) -> f64 {
        // folded from +0.0: an empty `sum()` yields -0.0
        self.counts.values().fold(0.0, |acc, c| acc + c)
    }

    /// `true` when no bucket received an addition, not even a zero one.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of buckets that received at least one addition.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Buckets that received at least one addition, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SuperGenre, f64)> + '_ {
        self.counts.iter().map(|(g, c)| (*g, *c))
    }
}

impl FromIterator<(SuperGenre, f64)> for SuperGenreCounts {
    fn from_iter<I: IntoIterator<Item = (SuperGenre, f64)>>(iter: I) -> Self {
        let mut counts = SuperGenreCounts::new();
        for (genre, weight) in iter {
            counts.add(genre, weight);
        }
        counts
    }
}

/// Collects weighted super-genre counts over all recency windows.
///
/// For every window (short, medium, long) the user's top artists contribute
/// the window weight per genre tag. Artists that only show up on top tracks
/// are looked up one by one and contribute `0.6 × weight` per tag. Every
/// artist id is looked up at most once per run.
///
/// Failed calls are logged and skipped: a window whose listing fails adds
/// nothing, an artist whose lookup fails adds nothing but stays marked as seen.
/// Every call is cut off after `call_timeout` (see [`bounded`]); a call that
/// runs over counts as failed.
///
/// # Arguments
///
/// * `api` - Listening history of the logged-in user
/// * `call_timeout` - Deadline per listing or lookup, back-off included
///
/// # Example
///
/// ```
/// let (counts, unique_artists) = collect(&client, settings.http_timeout).await;
/// let radar = build_radar(&counts, DEFAULT_TOP_K);
/// ```
///
/// Returns the counts and the number of distinct artists seen.
pub async fn collect<A>(api: &A, call_timeout: Duration) -> (SuperGenreCounts, usize)
where
    A: ListeningSource + Sync,
{
    let mut counts = SuperGenreCounts::new();
    let mut seen: HashSet<String> = HashSet::new();

    for window in RecencyWindow::ALL {
        let weight = window.weight();

        match bounded(call_timeout, api.top_artists(window, TOP_ITEMS_LIMIT)).await {
            Ok(artists) => {
                for artist in &artists {
                    seen.insert(artist.id.clone());
                    counts.add_tags(&artist.genres, weight);
                }
            }
            Err(e) => warning!("Top artists for {} unavailable, skipping: {}", window, e),
        }

        let tracks = match bounded(call_timeout, api.top_tracks(window, TOP_ITEMS_LIMIT)).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("Top tracks for {} unavailable, skipping: {}", window, e);
                continue;
            }
        };

        for track in &tracks {
            for track_artist in &track.artists {
                let Some(id) = track_artist.id.as_deref() else {
                    continue;
                };
                if !seen.insert(id.to_string()) {
                    continue;
                }

                match bounded(call_timeout, api.artist(id)).await {
                    Ok(artist) => {
                        counts.add_tags(&artist.genres, TRACK_ARTIST_FACTOR * weight);
                    }
                    Err(e) => warning!("Artist lookup for {} failed, skipping: {}", id, e),
                }
            }
        }
    }

    info!(
        "Collected {:.1} weighted genre hits from {} unique artists",
        counts.total(),
        seen.len()
    );

    (counts, seen.len())
}
