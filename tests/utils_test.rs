use chrono::NaiveDate;
use songlist::error::CatalogError;
use songlist::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA256 digest encoded as URL-safe base64 without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_artist_id_from_url() {
    // Plain link
    assert_eq!(
        artist_id_from_url("https://open.spotify.com/artist/38WbKH6oKAZskBhqDFA8Uj"),
        Some("38WbKH6oKAZskBhqDFA8Uj".to_string())
    );

    // Share link with tracking query
    assert_eq!(
        artist_id_from_url("https://open.spotify.com/artist/38WbKH6oKAZskBhqDFA8Uj?si=abc123"),
        Some("38WbKH6oKAZskBhqDFA8Uj".to_string())
    );

    // Trailing slash and surrounding whitespace
    assert_eq!(
        artist_id_from_url("  https://open.spotify.com/artist/38WbKH6oKAZskBhqDFA8Uj/ "),
        Some("38WbKH6oKAZskBhqDFA8Uj".to_string())
    );
}

#[test]
fn test_artist_id_from_url_rejects_other_input() {
    // Free-text names are searched instead
    assert_eq!(artist_id_from_url("Tove Lo"), None);

    // Other entity links are not artists
    assert_eq!(
        artist_id_from_url("https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy"),
        None
    );

    // Link without an id
    assert_eq!(artist_id_from_url("https://open.spotify.com/artist/"), None);
    assert_eq!(artist_id_from_url("https://open.spotify.com/artist/?si=x"), None);
}

#[test]
fn test_parse_release_date_day_precision() {
    let date = parse_release_date("2020-03-14", "day").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2020, 3, 14).unwrap());
}

#[test]
fn test_parse_release_date_coarse_precision() {
    // Month precision falls on the first of the month
    let date = parse_release_date("2009-07", "month").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2009, 7, 1).unwrap());

    // Year precision falls on January 1st
    let date = parse_release_date("1998", "year").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(1998, 1, 1).unwrap());
}

#[test]
fn test_parse_release_date_invalid_inputs() {
    // Precision and value disagree
    assert!(matches!(
        parse_release_date("2020", "day"),
        Err(CatalogError::InvalidReleaseDate { .. })
    ));

    // Out of range month
    assert!(parse_release_date("2020-13", "month").is_err());

    // Unknown precision
    let err = parse_release_date("2020-01-01", "week").unwrap_err();
    assert!(err.to_string().contains("week"));
}

#[test]
fn test_track_uri() {
    assert_eq!(track_uri("6rqhFgbbKwnb9MLmUQDhG6"), "spotify:track:6rqhFgbbKwnb9MLmUQDhG6");
}
