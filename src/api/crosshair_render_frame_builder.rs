use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{ChartView, format_value};

const LABEL_PADDING_PX: f64 = 4.0;
/// Rough glyph advance used to size label boxes without a font backend.
const CHAR_WIDTH_RATIO: f64 = 0.62;

/// Vertical guide at data point `index` plus one horizontal guide and
/// floating label per axis key with a non-zero value there.
pub(super) fn push_crosshair(
    frame: &mut RenderFrame,
    view: &ChartView<'_>,
    index: usize,
    left_keys: &[String],
    right_keys: &[String],
) {
    let Some(point) = view.data.get(index) else {
        return;
    };
    let style = view.style;
    let x = view.x_point(point.date);
    frame.push_line(LinePrimitive::new(
        x,
        view.plot_top(),
        x,
        view.offset(),
        1.0,
        style.crosshair_color,
    ));

    let keys = left_keys
        .iter()
        .map(|key| (key, false))
        .chain(right_keys.iter().map(|key| (key, true)));
    for (key, is_right) in keys {
        let value = point.value_or_zero(key);
        if value == 0.0 {
            continue;
        }
        let y = view.y_point(value, is_right);
        frame.push_line(LinePrimitive::new(
            view.plot_left(),
            y,
            view.plot_right(),
            y,
            1.0,
            style.crosshair_color,
        ));

        let text = format_value(value);
        let box_width = text.chars().count() as f64 * style.font_size_px * CHAR_WIDTH_RATIO
            + 2.0 * LABEL_PADDING_PX;
        let box_height = style.font_size_px + 2.0 * LABEL_PADDING_PX;
        let (box_x, text_x, align) = if is_right {
            (
                view.plot_right(),
                view.plot_right() + LABEL_PADDING_PX,
                TextHAlign::Left,
            )
        } else {
            (
                view.plot_left() - box_width,
                view.plot_left() - LABEL_PADDING_PX,
                TextHAlign::Right,
            )
        };
        frame.push_rect(RectPrimitive::new(
            box_x,
            y - box_height / 2.0,
            box_width,
            box_height,
            style.crosshair_label_background,
        ));
        frame.push_text(TextPrimitive::new(
            text,
            text_x,
            y,
            style.font_size_px,
            style.crosshair_label_text,
            align,
        ));
    }
}
