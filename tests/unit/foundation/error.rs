use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ReelError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: ReelError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn with_prefix_keeps_variant_and_single_label() {
    let err = ReelError::validation("unknown brand color 'teal'").with_prefix("element 'title'");
    assert!(matches!(err, ReelError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "validation error: element 'title': unknown brand color 'teal'"
    );
    let err = ReelError::animation("bad").with_prefix("x");
    assert!(matches!(err, ReelError::Animation(_)));
}
