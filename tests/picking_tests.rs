use std::collections::HashSet;

use chart_flow::api::{AxisBinding, BarPlot, ChartConfig, ChartEngine, PlotConfig, SharedHost};
use chart_flow::core::{DataPoint, Viewport};
use chart_flow::interaction::{FigureRegistry, MAX_PICK_ID, decode_pick_rgba, encode_pick_id};
use chart_flow::render::Color;
use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pick_id_encoding_round_trips(id in 1u32..=MAX_PICK_ID) {
        let [red, green, blue] = encode_pick_id(id);
        prop_assert_eq!(decode_pick_rgba([red, green, blue, 255]), id);
        prop_assert_eq!(red, (id & 0xFF) as u8);
    }

    #[test]
    fn registry_colors_are_unique_within_a_pass(count in 1usize..2_000) {
        let mut registry = FigureRegistry::new();
        let mut seen = HashSet::new();
        for index in 0..count {
            let color = registry.register(index).expect("register");
            prop_assert!(seen.insert(color.to_rgba8()));
        }
        prop_assert_eq!(registry.len(), count);
    }
}

#[test]
fn every_bar_center_resolves_to_its_index() {
    let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let data: Vec<DataPoint> = (0..30)
        .map(|day| {
            DataPoint::new(from + TimeDelta::days(day)).with_field("val", 5.0 + (day % 7) as f64)
        })
        .collect();
    let config = ChartConfig::new(from, from + TimeDelta::days(29))
        .with_left_axis(AxisBinding::new(["val"]));
    let host = SharedHost::new(Viewport::new(1200, 400));
    let mut engine = ChartEngine::with_raster(host, &data, config).expect("engine");
    engine
        .add_plot(Box::new(BarPlot::new(PlotConfig::new(
            "bars",
            "val",
            Color::from_rgb8(0x5b, 0x8d, 0xef),
        ))))
        .expect("add plot");
    engine.draw().expect("draw");

    assert_eq!(engine.figures().len(), data.len());
    let colors: HashSet<_> = engine
        .figures()
        .iter()
        .map(|(id, _)| encode_pick_id(id))
        .collect();
    assert_eq!(colors.len(), data.len());

    let view = engine.view();
    for (index, point) in data.iter().enumerate().skip(1).take(28) {
        let x = view.x_point(point.date);
        let y = (view.y_point(point.value_or_zero("val"), false) + view.offset()) / 2.0;
        let figure = engine.pick(x, y).expect("bar under its center");
        assert_eq!(figure.plot_id, "bars");
        assert_eq!(figure.index, index);
    }
}
