//! # Genre Analysis
//!
//! Turns a user's listening history into the two artifacts shown on the menu
//! page:
//!
//! - a genre **radar**: the strongest super-genres, square-root scaled into
//!   [5, 100] for a multi-axis chart ([`radar::build_radar`])
//! - a **listener rating**: a composite of genre diversity, artist depth and
//!   overall activity mapped onto sixteen letter grades ([`grade::grade`])
//!
//! Both are computed from [`aggregate::SuperGenreCounts`], which
//! [`aggregate::collect`] builds by classifying every genre tag of the user's
//! top artists (and of artists known only from top tracks) into a fixed set of
//! super-genres ([`genre::classify`]), weighted by recency.
//!
//! ```text
//! ListeningSource ──collect──→ (SuperGenreCounts, unique artists)
//!                                   │                 │
//!                              build_radar          grade
//!                                   ↓                 ↓
//!                              RadarProfile     ListenerRating
//! ```
//!
//! Everything here except `collect` is pure.

pub mod aggregate;
pub mod genre;
pub mod grade;
pub mod radar;
pub mod ranking;

pub use aggregate::{SuperGenreCounts, collect};
pub use genre::{SuperGenre, classify, genre_icon};
pub use grade::{ListenerGrade, ListenerRating, grade};
pub use radar::{RadarProfile, build_radar};
pub use ranking::rank_genres;
