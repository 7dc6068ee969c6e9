use chart_flow::api::{
    AxisBinding, BarPlot, ChartConfig, ChartEngine, LinePlot, PlotConfig, SharedHost,
};
use chart_flow::core::{DataPoint, Viewport};
use chart_flow::error::ChartError;
use chart_flow::render::{Color, NullRenderer, TextHAlign};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(offset)
}

fn three_points() -> Vec<DataPoint> {
    vec![
        DataPoint::new(day(0)).with_field("val", 10.0),
        DataPoint::new(day(1)).with_field("val", 30.0),
        DataPoint::new(day(2)).with_field("val", 20.0),
    ]
}

fn bar_config() -> ChartConfig {
    ChartConfig::new(day(0), day(2)).with_left_axis(AxisBinding::new(["val"]))
}

fn bars() -> Box<BarPlot> {
    Box::new(BarPlot::new(PlotConfig::new(
        "bars",
        "val",
        Color::from_rgb8(0x5b, 0x8d, 0xef),
    )))
}

#[test]
fn picking_second_bar_drives_legend() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine = ChartEngine::with_raster(host, &three_points(), bar_config()).expect("engine");
    engine.add_plot(bars()).expect("add plot");
    engine.draw().expect("draw");

    assert_eq!(engine.legend_text("bars"), Some("20"));

    let view = engine.view();
    let x = view.x_point(day(1));
    let y = (view.y_point(30.0, false) + view.offset()) / 2.0;
    let figure = engine.pick(x, y).expect("second bar");
    assert_eq!(figure.index, 1);

    assert_eq!(engine.pointer_move(x, y).expect("hover"), Some(1));
    assert_eq!(engine.legend_text("bars"), Some("30"));

    engine.pointer_leave().expect("leave");
    assert_eq!(engine.legend_text("bars"), Some("20"));
}

#[test]
fn axis_domain_follows_data_max() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine =
        ChartEngine::new(host, NullRenderer::default(), &three_points(), bar_config())
            .expect("engine");
    engine.draw().expect("draw");
    let (_, max) = engine.left_scale().domain();
    assert!((max - 33.0).abs() < 1e-9);
    let (_, right_max) = engine.right_scale().domain();
    assert!((right_max - 110.0).abs() < 1e-9);
}

#[test]
fn redraw_without_changes_is_pixel_identical() {
    let host = SharedHost::new(Viewport::new(500, 300));
    let mut engine = ChartEngine::with_raster(host, &three_points(), bar_config()).expect("engine");
    engine.add_plot(bars()).expect("add bars");
    engine
        .add_plot(Box::new(
            LinePlot::new(PlotConfig::new("line", "val", Color::BLACK).with_labels())
                .with_line_width(3.0),
        ))
        .expect("add line");

    engine.draw().expect("first draw");
    let visible = engine.renderer().pixels().to_vec();
    let picking = engine.interaction_surface().pixels().to_vec();

    engine.draw().expect("second draw");
    assert_eq!(engine.renderer().pixels(), visible.as_slice());
    assert_eq!(engine.interaction_surface().pixels(), picking.as_slice());
    assert_eq!(engine.draw_count(), 2);
}

#[test]
fn missing_or_empty_host_is_invalid_surface() {
    let detached = ChartEngine::with_raster(SharedHost::detached(), &three_points(), bar_config());
    assert!(matches!(detached, Err(ChartError::InvalidSurface(_))));

    let zero = ChartEngine::new(
        SharedHost::new(Viewport::new(0, 300)),
        NullRenderer::default(),
        &three_points(),
        bar_config(),
    );
    assert!(matches!(zero, Err(ChartError::InvalidSurface(_))));
}

#[test]
fn closure_hosts_and_size_override_work() {
    let host = || Some(Viewport::new(320, 200));
    let config = bar_config().with_size(Viewport::new(640, 480));
    let engine =
        ChartEngine::new(host, NullRenderer::default(), &three_points(), config).expect("engine");
    assert_eq!(engine.viewport(), Viewport::new(640, 480));
}

#[test]
fn empty_data_becomes_one_synthetic_point() {
    let host = SharedHost::new(Viewport::new(400, 300));
    let mut engine =
        ChartEngine::new(host, NullRenderer::default(), &[], bar_config()).expect("engine");
    engine.add_plot(bars()).expect("add plot");
    engine.draw().expect("draw");
    assert_eq!(engine.data().len(), 1);
    assert_eq!(engine.legend_text("bars"), Some("0"));
    assert!((engine.left_scale().domain().1 - 110.0).abs() < 1e-9);
}

#[test]
fn engine_keeps_a_private_sorted_copy() {
    let mut data = three_points();
    data.reverse();
    let host = SharedHost::new(Viewport::new(400, 300));
    let engine =
        ChartEngine::new(host, NullRenderer::default(), &data, bar_config()).expect("engine");
    data.clear();
    let dates: Vec<_> = engine.data().iter().map(|point| point.date).collect();
    assert_eq!(dates, vec![day(0), day(1), day(2)]);
}

#[test]
fn hover_over_empty_space_clears_crosshair() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine = ChartEngine::with_raster(host, &three_points(), bar_config()).expect("engine");
    engine.add_plot(bars()).expect("add plot");
    engine.draw().expect("draw");
    let baseline_lines = engine.visible_frame().lines().count();

    let view = engine.view();
    let x = view.x_point(day(1));
    let y = (view.y_point(30.0, false) + view.offset()) / 2.0;
    engine.pointer_move(x, y).expect("hover bar");
    assert_eq!(engine.visible_frame().lines().count(), baseline_lines + 2);

    assert_eq!(engine.pointer_move(5.0, 5.0).expect("hover empty"), None);
    assert_eq!(engine.hover().and_then(|hover| hover.index), None);
    assert_eq!(engine.visible_frame().lines().count(), baseline_lines);
    assert_eq!(engine.legend_text("bars"), Some("20"));
}

#[test]
fn plot_registry_management() {
    let host = SharedHost::new(Viewport::new(400, 300));
    let mut engine =
        ChartEngine::new(host, NullRenderer::default(), &three_points(), bar_config())
            .expect("engine");
    engine.add_plot(bars()).expect("add plot");
    assert!(matches!(
        engine.add_plot(bars()),
        Err(ChartError::InvalidConfig(_))
    ));
    let empty_id = Box::new(BarPlot::new(PlotConfig::new("", "val", Color::BLACK)));
    assert!(engine.add_plot(empty_id).is_err());

    engine
        .add_plot(Box::new(LinePlot::new(PlotConfig::new(
            "line",
            "val",
            Color::BLACK,
        ))))
        .expect("add line");
    assert_eq!(engine.plot_ids().collect::<Vec<_>>(), vec!["bars", "line"]);
    assert!(engine.remove_plot("bars"));
    assert!(!engine.remove_plot("bars"));
    assert!(!engine.has_plot("bars"));
    assert_eq!(engine.plot_count(), 1);

    engine.draw().expect("draw");
    assert_eq!(engine.legend().len(), 1);
    assert_eq!(engine.legend()[0].id, "line");
}

#[test]
fn snapshot_serializes_engine_state() {
    let host = SharedHost::new(Viewport::new(400, 300));
    let mut engine =
        ChartEngine::new(host, NullRenderer::default(), &three_points(), bar_config())
            .expect("engine");
    engine.add_plot(bars()).expect("add plot");
    engine.draw().expect("draw");

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.points_len, 3);
    assert_eq!(snapshot.plot_ids, vec!["bars".to_owned()]);
    assert_eq!(snapshot.hover_index, None);
    assert_eq!(snapshot.figure_count, 3);

    let json = engine.snapshot_json_pretty().expect("json");
    assert!(json.contains("\"plot_ids\""));
    assert!(json.contains("\"bars\""));
}

#[test]
fn right_axis_margin_requires_right_keys() {
    let host = SharedHost::new(Viewport::new(400, 300));
    let engine =
        ChartEngine::new(host, NullRenderer::default(), &three_points(), bar_config())
            .expect("engine");
    assert_eq!(engine.config().margin.right, 0.0);
    assert_eq!(engine.time_scale().range(), (50.0, 400.0));
}

#[test]
fn bar_highlight_follows_the_picked_bar() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine = ChartEngine::with_raster(host, &three_points(), bar_config()).expect("engine");
    engine.add_plot(bars()).expect("add plot");
    engine.draw().expect("draw");

    let view = engine.view();
    let bar_center = view.x_point(day(1));
    let bar_left = bar_center - view.tick_width_px() * 0.7 / 2.0;
    // Left half of the centred bar, before the point's own date.
    let (x, y) = (bar_center - 10.0, view.offset() - 5.0);
    assert_eq!(engine.pointer_move(x, y).expect("hover"), Some(1));

    let config = PlotConfig::new("bars", "val", Color::from_rgb8(0x5b, 0x8d, 0xef));
    let highlighted: Vec<f64> = engine
        .visible_frame()
        .rects()
        .filter(|rect| rect.fill_color == config.highlight_color)
        .map(|rect| rect.x)
        .collect();
    assert_eq!(highlighted.len(), 1);
    assert!((highlighted[0] - bar_left).abs() < 1e-9);

    let label = engine
        .visible_frame()
        .texts()
        .find(|text| text.text == "30" && (text.x - bar_center).abs() < 1e-9)
        .expect("hovered bar label");
    assert_eq!(label.color, config.highlight_text_color);
}

fn volume_points() -> Vec<DataPoint> {
    three_points()
        .into_iter()
        .zip([100.0, 400.0, 250.0])
        .map(|(point, volume)| point.with_field("vol", volume))
        .collect()
}

fn dual_axis_config() -> ChartConfig {
    bar_config().with_right_axis(AxisBinding::new(["vol"]))
}

#[test]
fn right_axis_plot_uses_the_right_scale() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine =
        ChartEngine::with_raster(host, &volume_points(), dual_axis_config()).expect("engine");
    engine
        .add_plot(Box::new(LinePlot::new(
            PlotConfig::new("volume", "vol", Color::BLACK).on_right_axis(),
        )))
        .expect("add line");
    engine.draw().expect("draw");

    assert!(engine.config().margin.right > 0.0);
    assert!((engine.right_scale().domain().1 - 440.0).abs() < 1e-9);
    assert!((engine.left_scale().domain().1 - 33.0).abs() < 1e-9);

    let view = engine.view();
    let expected: Vec<(f64, f64)> = volume_points()
        .iter()
        .map(|point| {
            (
                view.x_point(point.date),
                view.y_point(point.value_or_zero("vol"), true),
            )
        })
        .collect();
    let path = engine.visible_frame().paths().next().expect("line path");
    assert_eq!(path.points, expected);
    assert!((view.y_point(400.0, true) - view.y_point(400.0, false)).abs() > 1.0);
}

#[test]
fn crosshair_labels_right_axis_keys_on_the_right() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine =
        ChartEngine::with_raster(host, &volume_points(), dual_axis_config()).expect("engine");
    engine.add_plot(bars()).expect("add plot");
    engine.draw().expect("draw");
    let baseline_lines = engine.visible_frame().lines().count();

    let view = engine.view();
    let x = view.x_point(day(1));
    let y = (view.y_point(30.0, false) + view.offset()) / 2.0;
    let plot_right = view.plot_right();
    let label_color = view.style.crosshair_label_text;
    let right_guide_y = view.y_point(400.0, true);
    assert_eq!(engine.pointer_move(x, y).expect("hover"), Some(1));

    // Vertical guide plus one horizontal guide per axis key.
    assert_eq!(engine.visible_frame().lines().count(), baseline_lines + 3);
    assert!(engine.visible_frame().lines().any(|line| {
        (line.y1 - right_guide_y).abs() < 1e-9 && (line.y2 - right_guide_y).abs() < 1e-9
    }));

    let label = engine
        .visible_frame()
        .texts()
        .find(|text| text.text == "400" && text.color == label_color)
        .expect("right axis crosshair label");
    assert_eq!(label.h_align, TextHAlign::Left);
    assert!(label.x >= plot_right);
    assert!((label.y - right_guide_y).abs() < 1e-9);
}
