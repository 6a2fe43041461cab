use crate::types::{Artist, GenreCard};

use super::genre::genre_icon;

/// Number of genres listed on the top genres page.
pub const TOP_GENRES_LIMIT: usize = 10;
/// Number of top artists the genre ranking is computed from.
pub const TOP_GENRES_ARTIST_LIMIT: u32 = 20;

/// Counts raw genre tags across `artists`, most frequent first.
///
/// Tags with equal counts keep the order in which they were first seen.
pub fn count_genres(artists: &[Artist]) -> Vec<(String, usize)> {
    let mut counted: Vec<(String, usize)> = Vec::new();

    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        match counted.iter_mut().find(|(name, _)| name == genre) {
            Some((_, count)) => *count += 1,
            None => counted.push((genre.clone(), 1)),
        }
    }

    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted
}

/// The `limit` most frequent genre tags with their icons.
pub fn rank_genres(artists: &[Artist], limit: usize) -> Vec<GenreCard> {
    count_genres(artists)
        .into_iter()
        .take(limit)
        .map(|(name, _)| GenreCard {
            icon: genre_icon(&name),
            name,
        })
        .collect()
}
