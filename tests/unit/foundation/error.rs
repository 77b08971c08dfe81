use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramescrubError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FramescrubError::asset("x")
            .to_string()
            .contains("asset error:")
    );
    assert!(
        FramescrubError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        FramescrubError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramescrubError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
