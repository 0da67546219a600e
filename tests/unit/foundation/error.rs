use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FukuwaraiError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FukuwaraiError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        FukuwaraiError::restore("x")
            .to_string()
            .contains("restore error:")
    );
    assert!(
        FukuwaraiError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FukuwaraiError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
