use super::*;

fn brand() -> Brand {
    serde_json::from_str(
        r##"{
            "font_family": "Inter",
            "colors": {
                "henkelRed": "#E1000F",
                "countryActiveBorder": "rgba(225, 0, 15, 0.4)"
            },
            "typography": {
                "hero": {"font_size": 84, "font_weight": 700, "letter_spacing": -1.5, "line_height": 1.1},
                "caption": {"font_size": 18, "font_weight": 400}
            },
            "spacing": {"safeMargin": 80}
        }"##,
    )
    .unwrap()
}

#[test]
fn lookups_resolve_known_names() {
    let b = brand();
    assert!(b.validate().is_ok());
    assert_eq!(b.color("henkelRed").unwrap(), Rgba8::rgb(0xE1, 0x00, 0x0F));
    assert_eq!(b.color("countryActiveBorder").unwrap().a, 102);
    assert_eq!(b.style("hero").unwrap().font_weight, 700);
    assert_eq!(b.style("caption").unwrap().line_height, 1.2);
    assert_eq!(b.spacing("safeMargin").unwrap(), 80.0);
}

#[test]
fn unknown_names_are_validation_errors() {
    let b = brand();
    assert!(matches!(b.color("teal"), Err(ReelError::Validation(_))));
    assert!(b.style("display").is_err());
    assert!(b.spacing("gutter").is_err());
}

#[test]
fn invalid_type_styles_are_rejected() {
    let mut b = brand();
    b.typography.insert(
        "broken".to_string(),
        TypeStyle {
            font_size: 0.0,
            font_weight: 400,
            letter_spacing: 0.0,
            line_height: 1.0,
        },
    );
    assert!(b.validate().is_err());
}
