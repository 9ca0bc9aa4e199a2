use super::*;

#[test]
fn default_config_is_valid() {
    assert_eq!(FieldConfig::default().validate(), Ok(()));
}

#[test]
fn defaults_match_constants() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.count, 70);
    assert!((cfg.connection_distance - 130.0).abs() < f64::EPSILON);
    assert!((cfg.repulsion_radius - 160.0).abs() < f64::EPSILON);
    assert!((cfg.damping - 0.998).abs() < f64::EPSILON);
    assert_eq!(cfg.color, Rgba::rgb(99, 102, 241));
}

#[test]
fn zero_connection_distance_rejected() {
    let cfg = FieldConfig { connection_distance: 0.0, ..FieldConfig::default() };
    assert!(matches!(cfg.validate(), Err(FieldConfigError::NotPositive { name: "connection_distance", .. })));
}

#[test]
fn nan_repulsion_radius_rejected() {
    let cfg = FieldConfig { repulsion_radius: f64::NAN, ..FieldConfig::default() };
    assert!(matches!(cfg.validate(), Err(FieldConfigError::NotPositive { name: "repulsion_radius", .. })));
}

#[test]
fn damping_above_one_rejected() {
    let cfg = FieldConfig { damping: 1.01, ..FieldConfig::default() };
    assert_eq!(cfg.validate(), Err(FieldConfigError::Damping(1.01)));
}

#[test]
fn damping_of_one_allowed() {
    let cfg = FieldConfig { damping: 1.0, ..FieldConfig::default() };
    assert!(cfg.validate().is_ok());
}

#[test]
fn inverted_radius_range_rejected() {
    let cfg = FieldConfig { radius_range: (3.0, 1.0), ..FieldConfig::default() };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("radius range is empty"));
}

#[test]
fn zero_strength_disables_repulsion_but_is_valid() {
    let cfg = FieldConfig { repulsion_strength: 0.0, ..FieldConfig::default() };
    assert!(cfg.validate().is_ok());
}
