use super::*;

#[test]
fn nothing_is_alive_before_start() {
    let field = ParticleField::default();
    assert!(field.sample(99.0, 100.0, 7).is_empty());
}

#[test]
fn sampling_is_deterministic_per_seed() {
    let field = ParticleField::default();
    let a = field.sample(400.0, 0.0, 7);
    let b = field.sample(400.0, 0.0, 7);
    assert_eq!(a, b);
    let c = field.sample(400.0, 0.0, 8);
    assert_ne!(a, c);
}

#[test]
fn particles_stay_within_their_envelopes() {
    let field = ParticleField {
        count: 40,
        max_opacity: 0.4,
        duration: 300.0,
    };
    for frame in (0..900).step_by(7) {
        for p in field.sample(frame as f64, 0.0, 42) {
            assert!(p.index < 40);
            assert!((0.0..100.0).contains(&p.x_percent));
            assert!((3.0..=6.0).contains(&p.size));
            assert!((0.0..=0.4).contains(&p.opacity));
            assert!(p.translate.y <= 0.0 && p.translate.y >= -200.0);
            assert!(p.translate.x.abs() <= 15.0);
        }
    }
}

#[test]
fn every_particle_appears_once_all_delays_pass() {
    let field = ParticleField {
        count: 10,
        max_opacity: 0.4,
        duration: 100.0,
    };
    let mut seen = std::collections::BTreeSet::new();
    for frame in 0..400 {
        for p in field.sample(f64::from(frame), 0.0, 3) {
            seen.insert(p.index);
        }
    }
    assert_eq!(seen.len(), 10);
}
