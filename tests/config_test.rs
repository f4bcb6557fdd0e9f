//! Flower description files and layering.
//!
//! Run: cargo test --test config_test

#![allow(clippy::unwrap_used)]

use std::io::Write;

use phyllo_viz::config::{FlowerConfig, Layout, ShapeValue};
use phyllo_viz::prelude::*;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_a_file_from_disk() {
    let file = write_config(
        "pattern:\n  points: 120\n  angle_degrees: 13\nstyle:\n  color: magenta4\n  shape: open_circle\n",
    );
    let config = FlowerConfig::load(file.path()).unwrap();

    assert_eq!(config.pattern.points, 120);
    assert!((config.pattern.step().to_degrees() - 13.0).abs() < 1e-9);
    assert_eq!(config.style.shape.as_ref().unwrap().resolve().unwrap(), PointShape::OpenCircle);

    let scene = config.to_plot().unwrap().build().unwrap().scene().unwrap();
    assert_eq!(scene.markers.len(), 120);
    assert!(scene.markers.iter().all(|m| m.color == Rgba::rgb(0x8B, 0x00, 0x8B)));
}

#[test]
fn file_overrides_preset_field_by_field() {
    let file = write_config("pattern:\n  points: 42\nstyle:\n  color: red\n");
    let config = FlowerConfig::load_over(&Preset::Sunflower.config(), file.path()).unwrap();

    assert_eq!(config.pattern.points, 42);
    assert_eq!(config.style.color.as_deref(), Some("red"));
    // Untouched preset fields survive.
    assert_eq!(config.style.shape, Some(ShapeValue::Code(17)));
    assert_eq!(config.style.size_by.as_deref(), Some("t"));
    assert_eq!(config.theme.panel_background.as_deref(), Some("darkmagenta"));
    assert!(config.theme.blank);
}

#[test]
fn empty_file_keeps_the_base() {
    let file = write_config("");
    let base = Preset::Final.config();
    assert_eq!(FlowerConfig::load_over(&base, file.path()).unwrap(), base);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");
    assert!(matches!(FlowerConfig::load(&path), Err(Error::ConfigNotFound(_))));
    assert_eq!(FlowerConfig::load_or_default(&path), FlowerConfig::default());
}

#[test]
fn unknown_fields_are_rejected() {
    let file = write_config("style:\n  colour: red\n");
    assert!(matches!(FlowerConfig::load(file.path()), Err(Error::ConfigParse { .. })));
}

#[test]
fn dumped_config_reloads() {
    let config = Preset::Circle.config();
    let file = write_config(&config.to_yaml().unwrap());
    let loaded = FlowerConfig::load(file.path()).unwrap();

    assert_eq!(loaded.pattern.layout, Layout::Circle);
    assert_eq!(loaded, config);
}

#[test]
fn bad_values_fail_at_build() {
    let file = write_config("style:\n  alpha: 1.5\n");
    let plot = FlowerConfig::load(file.path()).unwrap().to_plot().unwrap();
    assert!(matches!(plot.build(), Err(Error::InvalidStyle { aesthetic: "alpha", .. })));

    let file = write_config("style:\n  color: notacolor\n");
    assert!(matches!(
        FlowerConfig::load(file.path()).unwrap().to_plot(),
        Err(Error::InvalidColor(_))
    ));
}

#[test]
fn file_angle_degrees_replace_preset_angle() {
    let file = write_config("pattern:\n  angle_degrees: 20\n");
    let config = FlowerConfig::load_over(&Preset::Final.config(), file.path()).unwrap();
    assert_eq!(config.pattern.angle, None);
    assert!((config.pattern.step().to_degrees() - 20.0).abs() < 1e-9);

    let base = FlowerConfig::parse("pattern:\n  angle_degrees: 20\n").unwrap();
    let config = FlowerConfig::parse_over(&base, "pattern:\n  angle: 2.0\n").unwrap();
    assert_eq!(config.pattern.angle_degrees, None);
    assert!((config.pattern.step() - 2.0).abs() < 1e-12);
}

#[test]
fn file_without_angle_keeps_preset_angle() {
    let config = FlowerConfig::parse_over(&Preset::Angle2.config(), "pattern:\n  points: 10\n").unwrap();
    assert_eq!(config.pattern.angle, Some(2.0));
    assert_eq!(config.pattern.points, 10);
}

#[test]
fn oversized_start_is_an_error() {
    let config = FlowerConfig::parse("pattern:\n  points: 2\n  start: 18446744073709551615\n").unwrap();
    assert!(matches!(config.to_plot(), Err(Error::InvalidParameter { name: "start", .. })));
}
