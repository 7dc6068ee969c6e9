use std::time::{Duration, Instant};

use chart_flow::api::{AxisBinding, BarPlot, ChartConfig, ChartEngine, PlotConfig, SharedHost};
use chart_flow::core::{DataPoint, Viewport};
use chart_flow::flow::{FlowData, FlowDiagram, FlowDiagramConfig};
use chart_flow::interaction::ResizeConfig;
use chart_flow::render::{Color, NullRenderer};
use chrono::{TimeDelta, TimeZone, Utc};

fn chart(host: &SharedHost) -> ChartEngine<NullRenderer> {
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let data = vec![
        DataPoint::new(from).with_field("val", 10.0),
        DataPoint::new(from + TimeDelta::days(1)).with_field("val", 30.0),
    ];
    let config = ChartConfig::new(from, from + TimeDelta::days(1))
        .with_left_axis(AxisBinding::new(["val"]))
        .with_resize(ResizeConfig {
            poll_interval_ms: 200,
        });
    let mut engine =
        ChartEngine::new(host.clone(), NullRenderer::default(), &data, config).expect("engine");
    engine
        .add_plot(Box::new(BarPlot::new(PlotConfig::new(
            "bars",
            "val",
            Color::BLACK,
        ))))
        .expect("add plot");
    engine
}

#[test]
fn poll_resizes_only_on_measured_change() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine = chart(&host);
    engine.draw().expect("draw");
    assert_eq!(engine.renderer().render_count, 1);

    let start = Instant::now();
    assert!(!engine.poll_resize(start).expect("poll"));
    assert_eq!(engine.renderer().render_count, 1);

    host.set_size(Viewport::new(800, 400));
    assert!(!engine.poll_resize(start + Duration::from_millis(50)).expect("early poll"));
    assert!(engine.poll_resize(start + Duration::from_millis(200)).expect("due poll"));
    assert_eq!(engine.renderer().render_count, 2);
    assert_eq!(engine.viewport(), Viewport::new(800, 400));
    assert_eq!(engine.time_scale().range().1, 800.0);
    assert_eq!(engine.interaction_surface().viewport(), Viewport::new(800, 400));

    assert!(!engine.poll_resize(start + Duration::from_millis(400)).expect("unchanged"));
    assert_eq!(engine.renderer().render_count, 2);
}

#[test]
fn window_resize_always_redraws_while_attached() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine = chart(&host);
    host.set_size(Viewport::new(600, 500));
    assert!(engine.on_window_resize().expect("window resize"));
    assert_eq!(engine.viewport(), Viewport::new(600, 500));
    assert!((engine.left_scale().height_px() - 450.0).abs() < 1e-9);
    assert_eq!(engine.renderer().render_count, 1);
}

#[test]
fn disposed_chart_ignores_every_trigger() {
    let host = SharedHost::new(Viewport::new(600, 400));
    let mut engine = chart(&host);
    engine.draw().expect("draw");
    engine.dispose();
    assert!(engine.is_disposed());

    host.set_size(Viewport::new(900, 500));
    let start = Instant::now();
    assert!(!engine.poll_resize(start).expect("poll"));
    assert!(!engine.poll_resize(start + Duration::from_secs(1)).expect("poll"));
    assert!(!engine.on_window_resize().expect("window"));
    assert_eq!(engine.pointer_move(10.0, 10.0).expect("pointer"), None);
    engine.pointer_leave().expect("leave");

    assert_eq!(engine.renderer().render_count, 1);
    assert_eq!(engine.viewport(), Viewport::new(600, 400));
}

#[test]
fn disposed_flow_diagram_ignores_every_trigger() {
    let host = SharedHost::new(Viewport::new(600, 300));
    let data = vec![FlowData::new("a", "a").with_amount(100.0, 200.0)];
    let mut diagram = FlowDiagram::new(
        host.clone(),
        NullRenderer::default(),
        &data,
        FlowDiagramConfig::default(),
    )
    .expect("diagram");
    diagram.draw().expect("draw");
    diagram.dispose();

    host.set_size(Viewport::new(700, 300));
    assert!(!diagram.poll_resize(Instant::now()).expect("poll"));
    assert!(!diagram.on_window_resize().expect("window"));
    assert_eq!(diagram.pointer_move(5.0, 30.0).expect("pointer"), None);
    assert_eq!(diagram.click(5.0, 30.0), None);
    assert_eq!(diagram.renderer().render_count, 1);
}
