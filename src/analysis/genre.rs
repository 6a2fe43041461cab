use std::fmt;

use serde::Serialize;

/// Broad genre bucket that free-text Spotify genre tags roll up into.
///
/// Declaration order matters: it is the order of [`SuperGenre::ALL`], of the
/// derived `Ord`, and therefore the tie-break order of the radar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SuperGenre {
    Pop,
    HipHopRap,
    RnbSoul,
    Rock,
    Metal,
    IndieAlt,
    Electronic,
    Latin,
    ReggaeDancehall,
    CountryFolk,
    JazzBlues,
    ClassicalScore,
    WorldGlobal,
}

impl SuperGenre {
    pub const ALL: [SuperGenre; 13] = [
        SuperGenre::Pop,
        SuperGenre::HipHopRap,
        SuperGenre::RnbSoul,
        SuperGenre::Rock,
        SuperGenre::Metal,
        SuperGenre::IndieAlt,
        SuperGenre::Electronic,
        SuperGenre::Latin,
        SuperGenre::ReggaeDancehall,
        SuperGenre::CountryFolk,
        SuperGenre::JazzBlues,
        SuperGenre::ClassicalScore,
        SuperGenre::WorldGlobal,
    ];

    /// Display name used as radar label.
    pub fn label(self) -> &'static str {
        match self {
            SuperGenre::Pop => "Pop",
            SuperGenre::HipHopRap => "Hip-Hop/Rap",
            SuperGenre::RnbSoul => "R&B/Soul",
            SuperGenre::Rock => "Rock",
            SuperGenre::Metal => "Metal",
            SuperGenre::IndieAlt => "Indie/Alt",
            SuperGenre::Electronic => "Electronic",
            SuperGenre::Latin => "Latin",
            SuperGenre::ReggaeDancehall => "Reggae/Dancehall",
            SuperGenre::CountryFolk => "Country/Folk",
            SuperGenre::JazzBlues => "Jazz/Blues",
            SuperGenre::ClassicalScore => "Classical/Score",
            SuperGenre::WorldGlobal => "World/Global",
        }
    }
}

impl fmt::Display for SuperGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket for tags no rule recognizes.
// Indie/Alt is a placeholder; a dedicated "Unclassified" bucket would be more honest.
pub const DEFAULT_BUCKET: SuperGenre = SuperGenre::IndieAlt;

/// Ordered keyword rules. The first rule with a keyword contained in the
/// lower-cased tag wins, so more specific buckets come first.
const RULES: &[(SuperGenre, &[&str])] = &[
    (
        SuperGenre::Latin,
        &[
            "latin", "reggaeton", "salsa", "bachata", "cumbia", "merengue", "bossa nova",
            "samba", "tango", "mpb", "sertanejo", "corrido", "mariachi", "norteno", "urbano",
            "flamenco", "vallenato",
        ],
    ),
    (
        SuperGenre::ReggaeDancehall,
        &[
            "reggae", "dancehall", "ska", "rocksteady", "soca", "calypso", "lovers rock",
        ],
    ),
    (
        SuperGenre::Metal,
        &[
            "metal", "deathcore", "djent", "grindcore", "doom", "sludge", "thrash",
        ],
    ),
    (
        SuperGenre::HipHopRap,
        &[
            "hip hop", "hip-hop", "rap", "trap", "drill", "grime", "boom bap", "phonk",
        ],
    ),
    (
        SuperGenre::RnbSoul,
        &[
            "r&b", "rnb", "neo soul", "motown", "funk", "new jack swing", "quiet storm",
        ],
    ),
    (
        SuperGenre::IndieAlt,
        &[
            "indie", "alternative", "alt ", "shoegaze", "dream pop", "dreampop", "bedroom pop",
            "lo-fi", "lofi", "emo", "post-punk", "new wave", "art pop", "chamber pop",
            "slowcore", "math rock", "post-rock", "grunge",
        ],
    ),
    (
        SuperGenre::Electronic,
        &[
            "electronic", "edm", "house", "techno", "trance", "dubstep", "drum and bass",
            "dnb", "ambient", "idm", "electro house", "electroclash", "synthwave",
            "uk garage", "breakbeat", "jungle", "hardstyle", "disco", "downtempo",
            "chillwave", "vaporwave", "future bass", "big room", "eurodance",
        ],
    ),
    (
        SuperGenre::Rock,
        &["rock", "punk", "garage", "psychedelic", "britpop"],
    ),
    (
        SuperGenre::CountryFolk,
        &[
            "country", "folk", "bluegrass", "americana", "singer-songwriter", "honky tonk",
            "appalachian",
        ],
    ),
    (
        SuperGenre::JazzBlues,
        &["jazz", "blues", "bebop", "swing", "big band", "bop", "boogie"],
    ),
    (
        SuperGenre::ClassicalScore,
        &[
            "classical", "orchestra", "symphon", "baroque", "opera", "soundtrack", "score",
            "compos", "choral", "chamber", "minimalism",
        ],
    ),
    (
        SuperGenre::WorldGlobal,
        &[
            "world", "afro", "amapiano", "highlife", "bhangra", "bollywood", "filmi", "desi",
            "celtic", "fado", "arabic", "turkish", "gqom", "soukous", "qawwali",
        ],
    ),
    (
        SuperGenre::Pop,
        &["pop", "boy band", "girl group", "idol"],
    ),
];

/// Maps a free-text genre tag to its super-genre.
///
/// Total and deterministic: every input yields a bucket, the same input always
/// yields the same bucket.
///
/// # Example
///
/// ```
/// assert_eq!(classify("Dream Pop"), SuperGenre::IndieAlt);
/// assert_eq!(classify("latin pop"), SuperGenre::Latin);
/// assert_eq!(classify("southern soul"), SuperGenre::RnbSoul);
/// assert_eq!(classify("xyz"), DEFAULT_BUCKET);
/// ```
pub fn classify(tag: &str) -> SuperGenre {
    let tag = tag.to_lowercase();

    for (bucket, keywords) in RULES {
        if keywords.iter().any(|k| tag.contains(k)) {
            return *bucket;
        }
    }

    if tag.contains("r&b") || tag.contains("soul") {
        return SuperGenre::RnbSoul;
    }
    if tag.contains("hip") && tag.contains("hop") {
        return SuperGenre::HipHopRap;
    }

    DEFAULT_BUCKET
}

const ICON_RULES: &[(&str, &[&str])] = &[
    ("🤘", &["rock", "metal", "punk", "grunge", "hardcore"]),
    (
        "⚡",
        &[
            "electronic", "edm", "house", "techno", "trance", "dubstep", "ambient", "synthwave",
        ],
    ),
    ("🎤", &["hip hop", "rap", "trap", "r&b", "soul"]),
    ("💫", &["pop"]),
    ("🎷", &["jazz", "blues", "bebop"]),
    (
        "🎼",
        &["classical", "orchestral", "symphonic", "baroque", "romantic"],
    ),
    ("🌾", &["country", "folk", "bluegrass", "americana"]),
    ("🌍", &["reggae", "ska", "dub", "world music", "latin"]),
    ("🕺", &["funk", "disco", "groove"]),
    ("🎭", &["alternative", "indie", "experimental"]),
];

pub const DEFAULT_ICON: &str = "🎵";

/// Emoji shown next to a raw genre tag on the top genres page.
pub fn genre_icon(tag: &str) -> &'static str {
    let tag = tag.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| tag.contains(w)))
        .map(|(icon, _)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
