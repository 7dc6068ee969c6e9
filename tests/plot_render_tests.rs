use chart_flow::api::{
    AreaPlot, ChartEvent, ChartFigure, ChartStyle, ChartView, EDGE_BUFFER_HOURS, EventsPlot, Plot,
    PlotConfig, PlotContext,
};
use chart_flow::core::{DataPoint, Margin, TimeScale, ValueScale, Viewport};
use chart_flow::interaction::FigureRegistry;
use chart_flow::render::{Color, Fill, RenderFrame};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + TimeDelta::days(offset)
}

fn points() -> Vec<DataPoint> {
    vec![
        DataPoint::new(day(0)).with_field("val", 10.0),
        DataPoint::new(day(1)).with_field("val", 30.0),
        DataPoint::new(day(2)).with_field("val", 20.0),
    ]
}

struct Surfaces {
    visible: RenderFrame,
    interaction: RenderFrame,
    figures: FigureRegistry<ChartFigure>,
}

impl Surfaces {
    fn new(viewport: Viewport) -> Self {
        Self {
            visible: RenderFrame::new(viewport),
            interaction: RenderFrame::new(viewport),
            figures: FigureRegistry::new(),
        }
    }
}

fn draw_plot(plot: &mut dyn Plot, data: &[DataPoint], viewport: Viewport) -> Surfaces {
    let style = ChartStyle::default();
    let margin = Margin::new(20.0, 0.0, 30.0, 50.0);
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height) - margin.top - margin.bottom;
    let mut left_scale = ValueScale::new(height, 1.1).expect("left scale");
    left_scale.fit_to_data(data, "val").expect("fit");
    let view = ChartView {
        data,
        viewport,
        margin,
        time_scale: TimeScale::new(day(0), day(2), (margin.left, width)).expect("time scale"),
        left_scale,
        right_scale: ValueScale::new(height, 1.1).expect("right scale"),
        tick: TimeDelta::days(1),
        hover: None,
        style: &style,
    };

    let mut surfaces = Surfaces::new(viewport);
    let mut ctx = PlotContext {
        view,
        visible: &mut surfaces.visible,
        interaction: &mut surfaces.interaction,
        figures: &mut surfaces.figures,
    };
    plot.draw(&mut ctx).expect("draw");
    surfaces
}

#[test]
fn edge_buffer_extends_area_without_touching_data() {
    let data = points();
    let viewport = Viewport::new(500, 300);
    let config = PlotConfig::new("area", "val", Color::from_rgb8(0x3f, 0xb9, 0x8c));

    let mut plain = AreaPlot::new(config.clone());
    let plain_frame = draw_plot(&mut plain, &data, viewport).visible;
    let mut buffered = AreaPlot::new(config).with_edge_buffer(true);
    let buffered_frame = draw_plot(&mut buffered, &data, viewport).visible;

    let plain_outline = &plain_frame.paths().nth(1).expect("outline").points;
    let buffered_outline = &buffered_frame.paths().nth(1).expect("outline").points;
    assert_eq!(plain_outline.len(), 3);
    assert_eq!(buffered_outline.len(), 5);

    let time_scale = TimeScale::new(day(0), day(2), (50.0, 500.0)).expect("time scale");
    let expected_left = time_scale.map(day(0) - TimeDelta::hours(EDGE_BUFFER_HOURS));
    assert!((buffered_outline[0].0 - expected_left).abs() < 1e-9);
    assert!((buffered_outline[0].1 - buffered_outline[1].1).abs() < 1e-9);
    assert_eq!(data.len(), 3);
}

#[test]
fn gradient_area_uses_two_stop_fill() {
    let data = points();
    let mut plot = AreaPlot::new(PlotConfig::new("area", "val", Color::BLACK))
        .with_gradient(Color::from_rgb8(0, 128, 255), Color::WHITE);
    let frame = draw_plot(&mut plot, &data, Viewport::new(400, 300)).visible;
    let polygon = frame.paths().next().expect("filled area");
    assert!(matches!(polygon.fill, Some(Fill::VerticalGradient { .. })));
}

#[test]
fn area_plots_are_not_pickable() {
    let data = points();
    let mut plot = AreaPlot::new(PlotConfig::new("area", "val", Color::BLACK));
    let surfaces = draw_plot(&mut plot, &data, Viewport::new(400, 300));
    assert!(surfaces.interaction.is_empty());
    assert!(surfaces.figures.is_empty());
}

#[test]
fn events_relayout_only_when_viewport_changes() {
    let data = points();
    let events = vec![
        ChartEvent::new(day(1), "deploy", "Deploy"),
        ChartEvent::new(day(1), "alert", "Alert"),
        ChartEvent::new(day(2), "note", "Note"),
    ];
    let mut plot = EventsPlot::new(PlotConfig::new("events", "val", Color::BLACK), events);

    draw_plot(&mut plot, &data, Viewport::new(500, 300));
    assert_eq!(plot.layout_revision(), 1);
    draw_plot(&mut plot, &data, Viewport::new(500, 300));
    assert_eq!(plot.layout_revision(), 1);
    draw_plot(&mut plot, &data, Viewport::new(640, 300));
    assert_eq!(plot.layout_revision(), 2);

    let clusters = plot.clusters();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].events.len(), 2);
    let markers = clusters[0].marker_positions();
    assert_eq!(markers.len(), 2);
    assert!(((markers[0].0 + markers[1].0) / 2.0 - clusters[0].x).abs() < 1e-9);
}

#[test]
fn events_legend_lists_labels_in_bucket() {
    let data = points();
    let events = vec![
        ChartEvent::new(day(1) + TimeDelta::hours(3), "deploy", "Deploy"),
        ChartEvent::new(day(1) + TimeDelta::hours(9), "alert", "Alert"),
    ];
    let mut plot = EventsPlot::new(PlotConfig::new("events", "val", Color::BLACK), events);
    let style = ChartStyle::default();
    let view = ChartView {
        data: &data,
        viewport: Viewport::new(400, 300),
        margin: Margin::zero(),
        time_scale: TimeScale::new(day(0), day(2), (0.0, 400.0)).expect("time scale"),
        left_scale: ValueScale::new(300.0, 1.1).expect("scale"),
        right_scale: ValueScale::new(300.0, 1.1).expect("scale"),
        tick: TimeDelta::days(1),
        hover: None,
        style: &style,
    };
    assert_eq!(plot.legend_text(&view, 1), "Deploy, Alert");
    assert_eq!(plot.legend_text(&view, 2), "");
    draw_plot(&mut plot, &data, Viewport::new(400, 300));
    assert_eq!(plot.event_clusters().len(), 2);
}
