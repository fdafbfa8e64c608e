use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TrailError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TrailError::source_unavailable("x")
            .to_string()
            .contains("source unavailable:")
    );
    assert!(
        TrailError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(TrailError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TrailError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
