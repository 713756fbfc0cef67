use super::*;

#[test]
fn normalizes_separators_and_dot_segments() {
    assert_eq!(
        normalize_rel_path(r"photos\.\team//ahmed.jpg").unwrap(),
        "photos/team/ahmed.jpg"
    );
    assert_eq!(normalize_rel_path("./world.json").unwrap(), "world.json");
}

#[test]
fn rejects_absolute_parent_and_empty_paths() {
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path(r"\abs\file.png").is_err());
    assert!(normalize_rel_path("photos/../../secret.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn catalog_resolves_known_keys_only() {
    let mut c = AssetCatalog::default();
    c.insert("hero", "photos/hero.jpg");
    assert!(c.validate().is_ok());
    assert_eq!(c.path("hero").unwrap(), "photos/hero.jpg");
    assert!(c.path("missing").is_err());

    c.insert("bad", "../outside.png");
    let err = c.validate().unwrap_err().to_string();
    assert!(err.contains("asset 'bad'"), "{err}");
}

#[test]
fn catalog_is_a_plain_json_map() {
    let c: AssetCatalog = serde_json::from_str(r#"{"map": "geo/countries-110m.json"}"#).unwrap();
    assert!(c.contains("map"));
}
