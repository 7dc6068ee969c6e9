use tracing::trace;

use crate::api::format_value;
use crate::error::ChartResult;
use crate::interaction::FigureRegistry;
use crate::render::{
    Color, PathPrimitive, RectPrimitive, RenderFrame, Renderer, Stroke, TextHAlign, TextPrimitive,
};

use super::{
    FlowDiagram, FlowDiagramState, FlowDiagramStyle, FlowDirection, FlowFigure, FlowLayout,
    FlowNode, FlowNodeLayout,
};

impl<R: Renderer> FlowDiagram<R> {
    /// Full synchronous redraw: re-aggregates, re-lays out and repaints both
    /// surfaces with the current hover state.
    pub fn draw(&mut self) -> ChartResult<()> {
        self.visible_frame.clear(self.viewport);
        self.interaction_frame.clear(self.viewport);
        self.figures.reset();

        self.state = FlowDiagramState::compute(
            &self.data,
            self.config.metric,
            self.config.small_channel_ratio,
        );
        self.layout = FlowLayout::compute(&self.state, self.viewport, &self.config)?;

        let mut targets = PaintTargets {
            visible: &mut self.visible_frame,
            interaction: &mut self.interaction_frame,
            figures: &mut self.figures,
            style: &self.config.style,
            connector_width: self.config.connector_width,
        };
        for direction in FlowDirection::ALL {
            let nodes = self.state.nodes(direction);
            for (node, geometry) in nodes.iter().zip(self.layout.nodes(direction)) {
                let highlighted = self.hovered
                    == Some(FlowFigure {
                        index: geometry.index,
                        direction,
                    });
                targets.paint_node(node, geometry, highlighted)?;
            }
            targets.paint_total(&self.state, &self.layout, direction);
        }

        self.renderer.render(&self.visible_frame)?;
        self.interaction_surface.render(&self.interaction_frame)?;
        self.draw_count += 1;

        trace!(
            figures = self.figures.len(),
            hovered = ?self.hovered,
            draw = self.draw_count,
            "flow draw pass complete"
        );
        Ok(())
    }
}

struct PaintTargets<'a> {
    visible: &'a mut RenderFrame,
    interaction: &'a mut RenderFrame,
    figures: &'a mut FigureRegistry<FlowFigure>,
    style: &'a FlowDiagramStyle,
    connector_width: f64,
}

impl PaintTargets<'_> {
    /// Paints one node twice: real colors on the visible frame, one unique
    /// picking color on the interaction frame.
    fn paint_node(
        &mut self,
        node: &FlowNode,
        geometry: &FlowNodeLayout,
        highlighted: bool,
    ) -> ChartResult<()> {
        let direction = geometry.direction;
        let (fill, stroke) = if highlighted {
            (self.style.highlight_fill, self.style.highlight_stroke)
        } else if node.is_aggregate() {
            (self.style.aggregate_fill, self.style.stroke(direction))
        } else {
            (self.style.fill(direction), self.style.stroke(direction))
        };
        paint_shapes(self.visible, geometry, fill, stroke, self.connector_width);

        let pick = self.figures.register(FlowFigure {
            index: geometry.index,
            direction,
        })?;
        paint_shapes(self.interaction, geometry, pick, pick, self.connector_width);

        let align = match direction {
            FlowDirection::Outbound => TextHAlign::Left,
            FlowDirection::Inbound => TextHAlign::Right,
        };
        let text_color = if highlighted {
            self.style.highlight_stroke
        } else {
            self.style.text_color
        };
        self.visible.push_text(TextPrimitive::new(
            format!("{} {}", node.name(), format_value(node.value)),
            geometry.label_anchor.0,
            geometry.label_anchor.1,
            self.style.font_size_px,
            text_color,
            align,
        ));
        Ok(())
    }

    fn paint_total(
        &mut self,
        state: &FlowDiagramState,
        layout: &FlowLayout,
        direction: FlowDirection,
    ) {
        let (x, y) = layout.total_anchor(direction);
        self.visible.push_text(TextPrimitive::new(
            format_value(state.total(direction)),
            x,
            y,
            self.style.font_size_px,
            self.style.total_text_color,
            TextHAlign::Center,
        ));
    }
}

fn paint_shapes(
    frame: &mut RenderFrame,
    geometry: &FlowNodeLayout,
    fill: Color,
    stroke: Color,
    connector_width: f64,
) {
    for bar in [geometry.stagger, geometry.total] {
        frame.push_rect(RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, fill));
    }
    frame.push_path(PathPrimitive::polyline(
        geometry.connector.clone(),
        Stroke::new(connector_width, stroke),
    ));
}
