//! End-to-end rendering checks on real flowers.
//!
//! Run: cargo test --test flower_render_test

#![allow(clippy::unwrap_used)]

use phyllo_viz::grammar::Scene;
use phyllo_viz::prelude::*;
use phyllo_viz::render::Glyph;

fn single_point(color: Rgba, alpha: f32, copies: usize) -> BuiltGGPlot {
    let xs = vec![0.0; copies];
    GGPlot::new()
        .data_xy(&xs, &xs)
        .aes(Aes::new().color_value(color).alpha_value(alpha).size_value(6.0))
        .geom(Geom::point())
        .theme(Theme::void())
        .dimensions(64, 64)
        .build()
        .unwrap()
}

fn center_pixel(fb: &Framebuffer, scene: &Scene) -> Rgba {
    let c = scene.markers[0].center;
    fb.get_pixel(c.x as u32, c.y as u32).unwrap()
}

fn close(a: u8, b: u8) -> bool {
    (i32::from(a) - i32::from(b)).abs() <= 3
}

#[test]
fn translucent_marker_blends_over_white() {
    let plot = single_point(Rgba::from_name("darkgreen").unwrap(), 0.5, 1);
    let fb = plot.to_framebuffer().unwrap();
    let px = center_pixel(&fb, &plot.scene().unwrap());

    assert!(close(px.r, 127), "{px:?}");
    assert!(close(px.g, 177), "{px:?}");
    assert!(close(px.b, 127), "{px:?}");
}

#[test]
fn stacked_markers_accumulate_opacity() {
    let once = single_point(Rgba::BLACK, 0.5, 1);
    let twice = single_point(Rgba::BLACK, 0.5, 2);
    let a = center_pixel(&once.to_framebuffer().unwrap(), &once.scene().unwrap());
    let b = center_pixel(&twice.to_framebuffer().unwrap(), &twice.scene().unwrap());

    assert!(close(a.r, 127), "{a:?}");
    assert!(close(b.r, 64), "{b:?}");
}

#[test]
fn blank_flower_draws_only_markers() {
    let plot = Preset::Minimal.plot().unwrap().dimensions(240, 240).build().unwrap();
    let scene = plot.scene().unwrap();
    let fb = plot.to_framebuffer().unwrap();

    let reach: Vec<(Point, f32)> = scene
        .markers
        .iter()
        .map(|m| (m.center, Glyph::new(m.shape, m.size, m.stroke).reach() + 1.5))
        .collect();

    assert!(fb.count_differing(Rgba::WHITE) > 0);
    for y in (0..240).step_by(3) {
        for x in (0..240).step_by(3) {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if reach.iter().all(|(c, r)| c.distance(p) > *r) {
                assert_eq!(fb.get_pixel(x, y), Some(Rgba::WHITE), "stray ink at ({x}, {y})");
            }
        }
    }
}

#[test]
fn golden_preset_keeps_ggplot_decoration() {
    let plot = Preset::Golden.plot().unwrap().dimensions(400, 400).build().unwrap();
    let scene = plot.scene().unwrap();

    assert!(scene.x_breaks.len() >= 3);
    assert!(!scene.x_minor.is_empty());
    assert_eq!(scene.x_title.as_deref(), Some("px"));
    assert_eq!(scene.y_title.as_deref(), Some("py"));

    // The grey panel is visible between the markers and the outer margin is white.
    let fb = plot.to_framebuffer().unwrap();
    let panel = scene.panel;
    assert_eq!(fb.get_pixel(2, 2), Some(Rgba::WHITE));
    let inside = fb.get_pixel((panel.x + 2.0) as u32, (panel.y + 2.0) as u32).unwrap();
    assert_eq!(inside, Rgba::rgb(235, 235, 235));
}

#[test]
fn equal_aspect_has_square_units() {
    let scene = Preset::Golden.plot().unwrap().dimensions(600, 300).build().unwrap().scene().unwrap();
    let x_unit = scene.x_px(1.0) - scene.x_px(0.0);
    let y_unit = scene.y_px(0.0) - scene.y_px(1.0);
    assert!((x_unit - y_unit).abs() < 1e-3 * x_unit, "{x_unit} vs {y_unit}");
}

#[test]
fn non_finite_rows_are_dropped() {
    let mut data = DataFrame::new();
    data.add_column_f32("x", &[0.0, 1.0, f32::NAN, 3.0]);
    data.add_column_f32("y", &[0.0, f32::INFINITY, 2.0, 3.0]);
    let scene = GGPlot::new()
        .data(data)
        .aes(Aes::new().x("x").y("y"))
        .geom(Geom::point())
        .build()
        .unwrap()
        .scene()
        .unwrap();

    assert_eq!(scene.markers.len(), 2);
    assert_eq!(scene.dropped, 2);
}

#[test]
fn size_legend_lists_increasing_breaks() {
    let frame = Spiral::golden(500).to_frame().unwrap();
    let scene = GGPlot::new()
        .data(frame)
        .aes(Aes::new().x("px").y("py").size("t"))
        .geom(Geom::point())
        .coord(Coord::equal())
        .dimensions(600, 500)
        .build()
        .unwrap()
        .scene()
        .unwrap();

    assert_eq!(scene.legends.len(), 1);
    let legend = &scene.legends[0];
    assert_eq!(legend.title, "t");
    let values: Vec<f32> = legend.keys.iter().map(|k| k.label.parse().unwrap()).collect();
    assert!(values.windows(2).all(|w| w[0] < w[1]), "{values:?}");
    let sizes: Vec<f32> = legend.keys.iter().map(|k| k.marker.size).collect();
    assert!(sizes.windows(2).all(|w| w[0] < w[1]), "{sizes:?}");
    // The legend sits to the right of the panel.
    assert!(legend.keys.iter().all(|k| k.key.x >= scene.panel.right()));
}

#[test]
fn aesthetics_on_one_column_share_a_legend() {
    let frame = Spiral::golden(200).to_frame().unwrap();
    let scene = GGPlot::new()
        .data(frame)
        .aes(Aes::new().x("px").y("py").size("t").color("t").alpha("r"))
        .geom(Geom::point())
        .build()
        .unwrap()
        .scene()
        .unwrap();

    let titles: Vec<&str> = scene.legends.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["t", "r"]);
}

#[test]
fn hidden_legend_frees_the_right_strip() {
    let with = Preset::Dandelion.config();
    let mut shown = with.clone();
    shown.theme.legend = true;

    let hidden_panel = with.to_plot().unwrap().build().unwrap().scene().unwrap().panel;
    let shown_scene = shown.to_plot().unwrap().build().unwrap().scene().unwrap();
    assert_eq!(shown_scene.legends.len(), 1);
    assert!(hidden_panel.width >= shown_scene.panel.width);
}

#[test]
fn svg_and_raster_share_geometry() {
    let plot = Preset::Dandelion.plot().unwrap().dimensions(300, 300).build().unwrap();
    let scene = plot.scene().unwrap();
    let svg = plot.to_svg().unwrap().render();

    // Asterisks are stroked paths, one per marker.
    assert_eq!(svg.matches("<path").count(), scene.markers.len());
    assert!(svg.contains("stroke-opacity=\"0.502\""));
}

#[test]
fn every_preset_renders_to_every_backend() {
    let dir = tempfile::tempdir().unwrap();
    for preset in Preset::all() {
        let plot = preset.plot().unwrap().dimensions(160, 160).build().unwrap();
        let fb = plot.to_framebuffer().unwrap();
        assert!(fb.count_differing(fb.get_pixel(0, 0).unwrap()) > 0, "{preset} is empty");

        plot.save(dir.path().join(format!("{preset}.png"))).unwrap();
        plot.save(dir.path().join(format!("{preset}.svg"))).unwrap();

        let preview = TerminalEncoder::new().mode(TerminalMode::Ascii).width(40).render(&fb);
        assert!(preview.lines().count() >= 10, "{preset}");
    }
}

#[test]
fn sunflower_is_darker_than_minimal() {
    let mean = |preset: Preset| {
        let fb = preset.plot().unwrap().dimensions(200, 200).build().unwrap().to_framebuffer().unwrap();
        fb.luminance_stats().2
    };
    assert!(mean(Preset::Sunflower) < mean(Preset::Minimal));
}
