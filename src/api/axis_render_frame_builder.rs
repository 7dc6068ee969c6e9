use crate::core::TimeTickPolicy;
use crate::render::{LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{ChartView, TimeLabelFormatter, format_value};

const TICK_LENGTH_PX: f64 = 4.0;
const LABEL_GAP_PX: f64 = 6.0;

pub(super) fn push_time_axis(
    frame: &mut RenderFrame,
    view: &ChartView<'_>,
    policy: TimeTickPolicy,
    formatter: &dyn TimeLabelFormatter,
) {
    let style = view.style;
    let baseline = view.offset();
    let (left, right) = (view.plot_left(), view.plot_right());
    if right <= left {
        return;
    }
    frame.push_line(LinePrimitive::new(
        left,
        baseline,
        right,
        baseline,
        1.0,
        style.axis_color,
    ));

    for tick in view.time_scale.ticks(policy) {
        let x = view.x_point(tick);
        frame.push_line(LinePrimitive::new(
            x,
            baseline,
            x,
            baseline + TICK_LENGTH_PX,
            1.0,
            style.axis_color,
        ));
        let label = formatter.format(tick);
        if !label.is_empty() {
            frame.push_text(TextPrimitive::new(
                label,
                x,
                baseline + TICK_LENGTH_PX + style.font_size_px,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
    }
}

pub(super) fn push_value_axes(
    frame: &mut RenderFrame,
    view: &ChartView<'_>,
    left_visible: bool,
    right_visible: bool,
    tick_count: usize,
) {
    let style = view.style;
    let (top, baseline) = (view.plot_top(), view.offset());
    let (left, right) = (view.plot_left(), view.plot_right());

    // Grid follows the left axis, or the right one when only that exists.
    let grid_axis_is_right = !left_visible && right_visible;
    if left_visible || right_visible {
        for value in view.value_scale(grid_axis_is_right).ticks(tick_count) {
            let y = view.y_point(value, grid_axis_is_right);
            frame.push_line(LinePrimitive::new(left, y, right, y, 1.0, style.grid_color));
        }
    }

    for (visible, is_right) in [(left_visible, false), (right_visible, true)] {
        if !visible {
            continue;
        }
        let x = if is_right { right } else { left };
        frame.push_line(LinePrimitive::new(x, top, x, baseline, 1.0, style.axis_color));

        let (tick_end, label_x, align) = if is_right {
            (x + TICK_LENGTH_PX, x + LABEL_GAP_PX, TextHAlign::Left)
        } else {
            (x - TICK_LENGTH_PX, x - LABEL_GAP_PX, TextHAlign::Right)
        };
        for value in view.value_scale(is_right).ticks(tick_count) {
            let y = view.y_point(value, is_right);
            frame.push_line(LinePrimitive::new(x, y, tick_end, y, 1.0, style.axis_color));
            frame.push_text(TextPrimitive::new(
                format_value(value),
                label_x,
                y,
                style.font_size_px,
                style.text_color,
                align,
            ));
        }
    }
}
