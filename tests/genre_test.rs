use spotirate::analysis::genre::*;

#[test]
fn test_classify_reference_tags() {
    assert_eq!(classify("dream pop"), SuperGenre::IndieAlt);
    assert_eq!(classify("totally-unknown-xyz"), DEFAULT_BUCKET);
    assert_eq!(DEFAULT_BUCKET, SuperGenre::IndieAlt);
}

#[test]
fn test_classify_common_tags() {
    let cases = [
        ("pop", SuperGenre::Pop),
        ("dance pop", SuperGenre::Pop),
        ("k-pop", SuperGenre::Pop),
        ("rock", SuperGenre::Rock),
        ("classic rock", SuperGenre::Rock),
        ("heavy metal", SuperGenre::Metal),
        ("metalcore", SuperGenre::Metal),
        ("hip hop", SuperGenre::HipHopRap),
        ("uk drill", SuperGenre::HipHopRap),
        ("pop rap", SuperGenre::HipHopRap),
        ("neo soul", SuperGenre::RnbSoul),
        ("alternative r&b", SuperGenre::RnbSoul),
        ("indie rock", SuperGenre::IndieAlt),
        ("shoegaze", SuperGenre::IndieAlt),
        ("deep house", SuperGenre::Electronic),
        ("techno", SuperGenre::Electronic),
        ("reggaeton", SuperGenre::Latin),
        ("latin pop", SuperGenre::Latin),
        ("roots reggae", SuperGenre::ReggaeDancehall),
        ("dancehall", SuperGenre::ReggaeDancehall),
        ("country", SuperGenre::CountryFolk),
        ("bluegrass", SuperGenre::CountryFolk),
        ("bebop", SuperGenre::JazzBlues),
        ("delta blues", SuperGenre::JazzBlues),
        ("classical", SuperGenre::ClassicalScore),
        ("soundtrack", SuperGenre::ClassicalScore),
        ("afrobeats", SuperGenre::WorldGlobal),
        ("bhangra", SuperGenre::WorldGlobal),
    ];

    for (tag, expected) in cases {
        assert_eq!(classify(tag), expected, "tag '{}'", tag);
    }
}

#[test]
fn test_classify_is_case_insensitive() {
    assert_eq!(classify("Dream Pop"), classify("dream pop"));
    assert_eq!(classify("HEAVY METAL"), SuperGenre::Metal);
}

#[test]
fn test_classify_rule_order_breaks_ties() {
    // matches both Metal and Rock keywords; Metal is declared first
    assert_eq!(classify("metal rock"), SuperGenre::Metal);
    // matches Latin and Pop; Latin is declared first
    assert_eq!(classify("latin pop"), SuperGenre::Latin);
    // matches Indie/Alt and Pop
    assert_eq!(classify("indie pop"), SuperGenre::IndieAlt);
}

#[test]
fn test_classify_fallback_checks() {
    // no table keyword, caught by the soul fallback
    assert_eq!(classify("southern soul"), SuperGenre::RnbSoul);
    // neither "hip hop" nor "hip-hop", caught by the hip/hop fallback
    assert_eq!(classify("hiphop"), SuperGenre::HipHopRap);
    assert_eq!(classify(""), DEFAULT_BUCKET);
}

#[test]
fn test_classify_is_deterministic() {
    for tag in ["dream pop", "rock", "xyz", "R&B", "vapor soul"] {
        let first = classify(tag);
        for _ in 0..10 {
            assert_eq!(classify(tag), first);
        }
    }
}

#[test]
fn test_super_genre_all_is_declaration_order() {
    let mut sorted = SuperGenre::ALL;
    sorted.sort();
    assert_eq!(sorted, SuperGenre::ALL);
    assert_eq!(SuperGenre::ALL.len(), 13);
    assert_eq!(SuperGenre::ALL[0], SuperGenre::Pop);
    assert_eq!(SuperGenre::ALL[12], SuperGenre::WorldGlobal);
}

#[test]
fn test_super_genre_labels() {
    assert_eq!(SuperGenre::HipHopRap.label(), "Hip-Hop/Rap");
    assert_eq!(SuperGenre::RnbSoul.to_string(), "R&B/Soul");
    assert_eq!(SuperGenre::ClassicalScore.label(), "Classical/Score");
}

#[test]
fn test_genre_icon() {
    assert_eq!(genre_icon("punk rock"), "🤘");
    assert_eq!(genre_icon("deep house"), "⚡");
    assert_eq!(genre_icon("Trap"), "🎤");
    assert_eq!(genre_icon("indie pop"), "💫");
    assert_eq!(genre_icon("cool jazz"), "🎷");
    assert_eq!(genre_icon("baroque"), "🎼");
    assert_eq!(genre_icon("americana"), "🌾");
    assert_eq!(genre_icon("reggaeton"), "🌍");
    assert_eq!(genre_icon("nu disco"), "🕺");
    assert_eq!(genre_icon("experimental"), "🎭");
    assert_eq!(genre_icon("gregorian chant"), DEFAULT_ICON);
}
