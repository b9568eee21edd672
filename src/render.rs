//! Declarative crosshair overlay for one view.
//!
//! The layer is a pure function of its inputs: given the crosshair canvas
//! position and the canvas extents it produces a list of draw primitives
//! for the host's 2D renderer. The only local state is the hover highlight,
//! which is cosmetic and never participates in hit-testing.
//!
//! The line colors are a fixed clinical convention: each line is tinted
//! with the color identifying the view whose position it cross-references.
//! They must not be changed.

use crate::enums::{CrosshairElement, Orientation};

/// Fixed per-view color scheme (hex, as consumed by the host renderer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewColors {
    pub vertical: &'static str,
    pub horizontal: &'static str,
    pub center: &'static str,
}

pub fn view_colors(orientation: Orientation) -> ViewColors {
    match orientation {
        Orientation::Axial => ViewColors {
            vertical: "#00D4FF",
            horizontal: "#FF6B6B",
            center: "#FFFFFF",
        },
        Orientation::Coronal => ViewColors {
            vertical: "#A855F7",
            horizontal: "#FF6B6B",
            center: "#FFFFFF",
        },
        Orientation::Sagittal => ViewColors {
            vertical: "#A855F7",
            horizontal: "#00D4FF",
            center: "#FFFFFF",
        },
    }
}

const SHADOW_DEFAULT: &str = "rgba(0, 0, 0, 0.5)";
const GRID_COLOR: &str = "#444444";
const GRID_SPACING: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: &'static str,
    pub blur: f32,
    pub offset: (f32, f32),
}

/// Draw primitive handed to the external graphics layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        /// `[x1, y1, x2, y2]`
        points: [f32; 4],
        stroke: &'static str,
        stroke_width: f32,
        opacity: f32,
        dash: Option<[f32; 2]>,
        shadow: Option<Shadow>,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        stroke: Option<&'static str>,
        fill: Option<&'static str>,
        stroke_width: f32,
        opacity: f32,
        shadow: Option<Shadow>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        fill: &'static str,
        font_size: f32,
        opacity: f32,
    },
}

/// Crosshair overlay for one view.
#[derive(Clone, Debug)]
pub struct CrosshairLayer {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub view: Orientation,
    pub show_coordinates: bool,
    pub show_grid_lines: bool,
    pub opacity: f32,
    pub interactive: bool,
    hovered: Option<CrosshairElement>,
}

impl CrosshairLayer {
    pub fn new(view: Orientation, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            view,
            show_coordinates: true,
            show_grid_lines: false,
            opacity: 0.7,
            interactive: true,
            hovered: None,
        }
    }

    /// Update the hover highlight. Ignored on non-interactive layers.
    pub fn set_hover(&mut self, element: Option<CrosshairElement>) {
        if self.interactive {
            self.hovered = element;
        }
    }

    pub fn hovered(&self) -> Option<CrosshairElement> {
        self.hovered
    }

    fn is_hovered(&self, element: CrosshairElement) -> bool {
        self.hovered == Some(element)
    }

    fn line_style(&self, element: CrosshairElement, color: &'static str) -> (f32, f32, Shadow) {
        let hovered = self.is_hovered(element);
        let stroke_width = if hovered { 2.5 } else { 1.5 };
        let opacity = if hovered {
            (self.opacity + 0.3).min(1.0)
        } else {
            self.opacity
        };
        let shadow = Shadow {
            color: if hovered { color } else { SHADOW_DEFAULT },
            blur: if hovered { 8.0 } else { 2.0 },
            offset: (1.0, 1.0),
        };
        (stroke_width, opacity, shadow)
    }

    fn center_style(&self, color: &'static str) -> (f32, Shadow) {
        let hovered = self.is_hovered(CrosshairElement::Center);
        let opacity = if hovered {
            (self.opacity + 0.3).min(1.0)
        } else {
            self.opacity
        };
        let shadow = Shadow {
            color: if hovered { color } else { SHADOW_DEFAULT },
            blur: if hovered { 12.0 } else { 2.0 },
            offset: (1.0, 1.0),
        };
        (opacity, shadow)
    }

    /// Build the draw list: optional grid, both lines, center marker.
    pub fn shapes(&self) -> Vec<Shape> {
        let colors = view_colors(self.view);
        let mut shapes = Vec::new();

        if self.show_grid_lines {
            self.push_grid(&mut shapes);
        }

        let (stroke_width, opacity, shadow) =
            self.line_style(CrosshairElement::Vertical, colors.vertical);
        shapes.push(Shape::Line {
            points: [self.x, 0.0, self.x, self.height],
            stroke: colors.vertical,
            stroke_width,
            opacity,
            dash: None,
            shadow: Some(shadow),
        });

        let (stroke_width, opacity, shadow) =
            self.line_style(CrosshairElement::Horizontal, colors.horizontal);
        shapes.push(Shape::Line {
            points: [0.0, self.y, self.width, self.y],
            stroke: colors.horizontal,
            stroke_width,
            opacity,
            dash: None,
            shadow: Some(shadow),
        });

        self.push_center_marker(&mut shapes, colors.center);

        if self.show_coordinates {
            shapes.push(Shape::Text {
                x: self.x + 12.0,
                y: self.y - 18.0,
                text: format!("x: {:.1}, y: {:.1}", self.x, self.y),
                fill: colors.center,
                font_size: 10.0,
                opacity: self.opacity,
            });
        }

        shapes
    }

    fn push_grid(&self, shapes: &mut Vec<Shape>) {
        let grid_line = |points: [f32; 4]| Shape::Line {
            points,
            stroke: GRID_COLOR,
            stroke_width: 0.5,
            opacity: 0.3,
            dash: Some([2.0, 4.0]),
            shadow: None,
        };

        let vertical_count = (self.width / GRID_SPACING).floor() as usize;
        for i in 0..vertical_count {
            let x = i as f32 * GRID_SPACING;
            shapes.push(grid_line([x, 0.0, x, self.height]));
        }

        let horizontal_count = (self.height / GRID_SPACING).floor() as usize;
        for i in 0..horizontal_count {
            let y = i as f32 * GRID_SPACING;
            shapes.push(grid_line([0.0, y, self.width, y]));
        }
    }

    fn push_center_marker(&self, shapes: &mut Vec<Shape>, color: &'static str) {
        let (opacity, shadow) = self.center_style(color);

        // Outer ring.
        shapes.push(Shape::Circle {
            x: self.x,
            y: self.y,
            radius: 8.0,
            stroke: Some(color),
            fill: None,
            stroke_width: 1.5,
            opacity: opacity * 0.8,
            shadow: Some(shadow),
        });

        // Inner dot.
        shapes.push(Shape::Circle {
            x: self.x,
            y: self.y,
            radius: 2.0,
            stroke: None,
            fill: Some(color),
            stroke_width: 0.0,
            opacity,
            shadow: None,
        });

        // Short cross ticks through the center.
        shapes.push(Shape::Line {
            points: [self.x - 6.0, self.y, self.x + 6.0, self.y],
            stroke: color,
            stroke_width: 1.0,
            opacity,
            dash: None,
            shadow: None,
        });
        shapes.push(Shape::Line {
            points: [self.x, self.y - 6.0, self.x, self.y + 6.0],
            stroke: color,
            stroke_width: 1.0,
            opacity,
            dash: None,
            shadow: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crosshair_lines(layer: &CrosshairLayer) -> Vec<Shape> {
        layer
            .shapes()
            .into_iter()
            .filter(|shape| matches!(shape, Shape::Line { dash: None, shadow: Some(_), .. }))
            .collect()
    }

    #[test]
    fn color_convention_is_fixed_per_view() {
        assert_eq!(view_colors(Orientation::Axial).vertical, "#00D4FF");
        assert_eq!(view_colors(Orientation::Axial).horizontal, "#FF6B6B");
        assert_eq!(view_colors(Orientation::Coronal).vertical, "#A855F7");
        assert_eq!(view_colors(Orientation::Coronal).horizontal, "#FF6B6B");
        assert_eq!(view_colors(Orientation::Sagittal).vertical, "#A855F7");
        assert_eq!(view_colors(Orientation::Sagittal).horizontal, "#00D4FF");
        for orientation in Orientation::ALL {
            assert_eq!(view_colors(orientation).center, "#FFFFFF");
        }
    }

    #[test]
    fn lines_span_the_full_canvas() {
        let layer = CrosshairLayer::new(Orientation::Axial, 120.0, 80.0, 400.0, 300.0);
        let lines = crosshair_lines(&layer);
        assert_eq!(lines.len(), 2);

        match &lines[0] {
            Shape::Line { points, .. } => assert_eq!(*points, [120.0, 0.0, 120.0, 300.0]),
            other => panic!("expected vertical line, got {other:?}"),
        }
        match &lines[1] {
            Shape::Line { points, .. } => assert_eq!(*points, [0.0, 80.0, 400.0, 80.0]),
            other => panic!("expected horizontal line, got {other:?}"),
        }
    }

    #[test]
    fn hover_thickens_line_and_caps_opacity() {
        let mut layer = CrosshairLayer::new(Orientation::Axial, 50.0, 50.0, 200.0, 200.0);
        layer.opacity = 0.9;
        layer.set_hover(Some(CrosshairElement::Vertical));

        let lines = crosshair_lines(&layer);
        match &lines[0] {
            Shape::Line {
                stroke_width,
                opacity,
                shadow,
                ..
            } => {
                assert_eq!(*stroke_width, 2.5);
                // 0.9 + 0.3 capped at 1.0.
                assert_eq!(*opacity, 1.0);
                let shadow = shadow.expect("hovered line has a shadow");
                assert_eq!(shadow.blur, 8.0);
                assert_eq!(shadow.color, "#00D4FF");
            }
            other => panic!("expected vertical line, got {other:?}"),
        }
        // The horizontal line keeps the idle style.
        match &lines[1] {
            Shape::Line {
                stroke_width,
                opacity,
                ..
            } => {
                assert_eq!(*stroke_width, 1.5);
                assert_eq!(*opacity, 0.9);
            }
            other => panic!("expected horizontal line, got {other:?}"),
        }
    }

    #[test]
    fn center_hover_boosts_shadow_blur() {
        let mut layer = CrosshairLayer::new(Orientation::Sagittal, 10.0, 10.0, 100.0, 100.0);
        layer.set_hover(Some(CrosshairElement::Center));

        let ring = layer
            .shapes()
            .into_iter()
            .find_map(|shape| match shape {
                Shape::Circle {
                    radius,
                    shadow: Some(shadow),
                    ..
                } if radius == 8.0 => Some(shadow),
                _ => None,
            })
            .expect("center ring present");
        assert_eq!(ring.blur, 12.0);
        assert_eq!(ring.color, "#FFFFFF");
    }

    #[test]
    fn non_interactive_layer_ignores_hover() {
        let mut layer = CrosshairLayer::new(Orientation::Axial, 10.0, 10.0, 100.0, 100.0);
        layer.interactive = false;
        layer.set_hover(Some(CrosshairElement::Center));
        assert_eq!(layer.hovered(), None);
    }

    #[test]
    fn grid_draws_dashed_lines_every_50px() {
        let mut layer = CrosshairLayer::new(Orientation::Coronal, 10.0, 10.0, 250.0, 100.0);
        layer.show_grid_lines = true;

        let grid: Vec<_> = layer
            .shapes()
            .into_iter()
            .filter(|shape| matches!(shape, Shape::Line { dash: Some(_), .. }))
            .collect();
        // floor(250/50) = 5 vertical plus floor(100/50) = 2 horizontal.
        assert_eq!(grid.len(), 7);
        for shape in &grid {
            match shape {
                Shape::Line {
                    stroke,
                    stroke_width,
                    opacity,
                    dash,
                    ..
                } => {
                    assert_eq!(*stroke, "#444444");
                    assert_eq!(*stroke_width, 0.5);
                    assert_eq!(*opacity, 0.3);
                    assert_eq!(*dash, Some([2.0, 4.0]));
                }
                other => panic!("expected grid line, got {other:?}"),
            }
        }
    }

    #[test]
    fn coordinate_label_follows_toggle() {
        let mut layer = CrosshairLayer::new(Orientation::Axial, 30.0, 40.0, 100.0, 100.0);
        let has_text = |layer: &CrosshairLayer| {
            layer
                .shapes()
                .iter()
                .any(|shape| matches!(shape, Shape::Text { .. }))
        };
        assert!(has_text(&layer));

        layer.show_coordinates = false;
        assert!(!has_text(&layer));
    }
}
