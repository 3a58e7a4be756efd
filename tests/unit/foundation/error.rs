use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SplitshotError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SplitshotError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        SplitshotError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        SplitshotError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn timeout_message_is_actionable() {
    let msg = SplitshotError::EncoderTimeout { secs: 60 }.to_string();
    assert!(msg.contains("60s"));
    assert!(msg.contains("failed to initialize"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SplitshotError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
