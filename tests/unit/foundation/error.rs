use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(SceneError::load("x").to_string().contains("load error:"));
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SceneError::navigation("x")
            .to_string()
            .contains("navigation error:")
    );
    assert!(SceneError::render("x").to_string().contains("render error:"));
    assert!(
        SceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: SceneError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, SceneError::Serde(_)));
}
