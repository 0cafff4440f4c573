//! Serde serialization tests
//!
//! Run with: cargo test --features serde --test serde_tests

#![cfg(feature = "serde")]

use pointless::{GaloisField, Poly, PrimeField, SearchConfig};

#[test]
fn prime_poly_serializes_as_coefficients() {
    let f = PrimeField::new(17).unwrap();
    // 3 + 2x + x^2
    let p = Poly::new(&f, vec![3, 2, 1]);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[3,2,1]");
}

#[test]
fn zero_poly_serializes_empty() {
    let p = Poly::<PrimeField>::zero();
    assert_eq!(serde_json::to_string(&p).unwrap(), "[]");
}

#[test]
fn extension_poly_restores_from_encoding() {
    let f = GaloisField::new(25).unwrap();
    let p = Poly::new(&f, vec![7, 0, 24, 13]);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[7,0,24,13]");

    let values: Vec<u64> = serde_json::from_str(&json).unwrap();
    let q = Poly::from_encoding(&f, &values).unwrap();
    assert_eq!(p, q);
}

#[test]
fn out_of_range_encoding_rejected() {
    let f = GaloisField::new(9).unwrap();
    let values: Vec<u64> = serde_json::from_str("[1,9]").unwrap();
    assert!(Poly::from_encoding(&f, &values).is_none());
}

#[test]
fn config_defaults_from_toml() {
    let config: SearchConfig = toml::from_str("exponent = 2\ngenus = 2\n").unwrap();
    assert_eq!(config, SearchConfig::new(2, 2));
}

#[test]
fn config_full_toml() {
    let raw = r#"
        exponent = 3
        genus = 4
        q_start = 7
        max_trials = 5000
        seed = 42
    "#;
    let config: SearchConfig = toml::from_str(raw).unwrap();
    assert_eq!(
        config,
        SearchConfig::new(3, 4)
            .with_q_start(7)
            .with_max_trials(5000)
            .with_seed(42)
    );
}

#[test]
fn config_missing_genus_fails() {
    let result: Result<SearchConfig, _> = toml::from_str("exponent = 2\n");
    assert!(result.is_err());
}

#[test]
fn config_json_roundtrip() {
    let config = SearchConfig::new(2, 3).with_seed(9);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"seed\":9"));
    let back: SearchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}
