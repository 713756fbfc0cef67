use super::*;

fn member(name: &str, row: u32, col: u32, order: u32) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: "Role".to_string(),
        nationality: "Egypt".to_string(),
        flag: "EG".to_string(),
        headshot: format!("headshot_{order}"),
        grid_row: row,
        grid_col: col,
        reveal_order: order,
        spotlight: false,
    }
}

fn content() -> Content {
    Content {
        countries: vec![Country {
            order: 1,
            name: "Saudi Arabia".to_string(),
            code: "KSA".to_string(),
            flag: "SA".to_string(),
            sob_percent: 54.0,
            population: "35.3M".to_string(),
            ppp_capita: "55 T€".to_string(),
        }],
        team: vec![member("B", 1, 1, 1), member("A", 1, 2, 0)],
        pins: vec![NationalityPin {
            country: "Egypt".to_string(),
            lat: 30.04,
            lng: 31.24,
        }],
        stats: BTreeMap::from([(
            "overlay1".to_string(),
            vec![SummaryStat {
                value: 60.0,
                suffix: "M".to_string(),
                label: "Population".to_string(),
            }],
        )]),
        texts: BTreeMap::from([("title".to_string(), "This is the GCC.".to_string())]),
        hub: Some(LatLng::new(24.0, 48.0)),
    }
}

#[test]
fn lookups_and_reveal_order() {
    let c = content();
    assert!(c.validate().is_ok());
    assert_eq!(c.country("KSA").unwrap().sob_percent, 54.0);
    assert_eq!(c.pin("Egypt").unwrap().lat_lng(), LatLng::new(30.04, 31.24));
    assert_eq!(c.stat("overlay1", 0).unwrap().suffix, "M");
    assert!(c.stat("overlay1", 1).is_err());
    assert_eq!(c.text("title").unwrap(), "This is the GCC.");
    let names: Vec<&str> = c.reveal_sequence().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert!(c.member("Nobody").is_err());
}

#[test]
fn duplicate_keys_and_cells_are_rejected() {
    let mut c = content();
    c.countries.push(c.countries[0].clone());
    assert!(c.validate().is_err());

    let mut c = content();
    c.team.push(member("C", 1, 1, 5));
    let err = c.validate().unwrap_err().to_string();
    assert!(err.contains("grid cell"), "{err}");

    let mut c = content();
    c.team.push(member("C", 2, 1, 0));
    assert!(c.validate().is_err());
}

#[test]
fn pins_must_be_on_the_globe() {
    let mut c = content();
    c.pins.push(NationalityPin {
        country: "Nowhere".to_string(),
        lat: 95.0,
        lng: 0.0,
    });
    let err = c.validate().unwrap_err().to_string();
    assert!(err.contains("Nowhere"), "{err}");
}
