#![cfg(feature = "cairo-backend")]

use chart_flow::api::{AxisBinding, BarPlot, ChartConfig, ChartEngine, PlotConfig, SharedHost};
use chart_flow::core::{DataPoint, Viewport};
use chart_flow::flow::{FlowData, FlowDiagram, FlowDiagramConfig};
use chart_flow::render::{CairoRenderer, Color};
use chrono::{TimeDelta, TimeZone, Utc};

#[test]
fn chart_draws_through_cairo() {
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let data = vec![
        DataPoint::new(from).with_field("val", 10.0),
        DataPoint::new(from + TimeDelta::days(1)).with_field("val", 30.0),
    ];
    let config = ChartConfig::new(from, from + TimeDelta::days(1))
        .with_left_axis(AxisBinding::new(["val"]));
    let renderer = CairoRenderer::new(400, 300).expect("cairo surface");
    let mut engine = ChartEngine::new(
        SharedHost::new(Viewport::new(400, 300)),
        renderer,
        &data,
        config,
    )
    .expect("engine");
    engine
        .add_plot(Box::new(BarPlot::new(
            PlotConfig::new("bars", "val", Color::BLACK).with_labels(),
        )))
        .expect("add plot");
    engine.draw().expect("draw");

    let stats = engine.renderer().last_stats();
    assert_eq!(stats.rects_drawn, 2);
    assert!(stats.texts_drawn > 0);
}

#[test]
fn flow_diagram_resizes_cairo_surface() {
    let host = SharedHost::new(Viewport::new(300, 200));
    let data = vec![FlowData::new("a", "a").with_amount(5.0, 10.0)];
    let renderer = CairoRenderer::new(10, 10).expect("cairo surface");
    let mut diagram =
        FlowDiagram::new(host, renderer, &data, FlowDiagramConfig::default()).expect("diagram");
    diagram.draw().expect("draw");
    assert_eq!(diagram.renderer().surface().width(), 300);
    assert_eq!(diagram.renderer().surface().height(), 200);
}
