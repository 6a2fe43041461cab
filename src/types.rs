use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw body of the Spotify token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Artist as embedded in a track; local files carry no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub display_name: String,
    pub profile_pic: Option<String>,
    pub radar_labels: Vec<String>,
    pub radar_values: Vec<f64>,
    pub listener_grade: String,
    pub listener_score: f64,
    pub rating_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistCard {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackCard {
    pub name: String,
    pub artist: String,
    pub album_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCard {
    pub name: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopArtistsView {
    pub artists: Vec<ArtistCard>,
    pub time_range: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopTracksView {
    pub tracks: Vec<TrackCard>,
    pub time_range: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopGenresView {
    pub genres: Vec<GenreCard>,
    pub time_range: String,
}

impl From<&Artist> for ArtistCard {
    fn from(artist: &Artist) -> Self {
        ArtistCard {
            name: artist.name.clone(),
            image: artist.images.first().map(|i| i.url.clone()),
        }
    }
}

impl From<&Track> for TrackCard {
    fn from(track: &Track) -> Self {
        TrackCard {
            name: track.name.clone(),
            artist: track
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            album_image: track.album.images.first().map(|i| i.url.clone()),
        }
    }
}

/// Listening horizon of the Spotify "top items" endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecencyWindow {
    /// Roughly the last four weeks.
    #[default]
    Short,
    /// Roughly the last six months.
    Medium,
    /// All time.
    Long,
}

impl RecencyWindow {
    /// Collection order of the aggregation passes.
    pub const ALL: [RecencyWindow; 3] = [
        RecencyWindow::Short,
        RecencyWindow::Medium,
        RecencyWindow::Long,
    ];

    pub fn weight(self) -> f64 {
        match self {
            RecencyWindow::Short => 1.0,
            RecencyWindow::Medium => 0.8,
            RecencyWindow::Long => 0.6,
        }
    }

    /// Value of the `time_range` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            RecencyWindow::Short => "short_term",
            RecencyWindow::Medium => "medium_term",
            RecencyWindow::Long => "long_term",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "short_term" => Some(RecencyWindow::Short),
            "medium_term" => Some(RecencyWindow::Medium),
            "long_term" => Some(RecencyWindow::Long),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
