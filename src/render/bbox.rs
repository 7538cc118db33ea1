//! Defines a renderer that does not draw anything but computes the "real bbox", the one that encloses all areas actually drawn to.
//! To determine the area a formula covers on screen, e.g. to centre it, you can perform a render with the backend defined in this module.

use crate::dimensions::{units::Px, Unit};
use crate::font::GlyphMetrics;
use crate::geometry::BBox;

use super::{Backend, Cursor};


/// A rendering backend that does not draw but simply records the bounding box being drawn to
#[derive(Debug, Clone, Default)]
pub struct BBoxBackend {
    /// The current bounding box
    /// Is None when nothing has been drawn yet
    bbox : Option<BBox<Px>>,
}

impl BBoxBackend {
    /// Creates a new bbox rendering backend.
    pub fn new() -> Self {
        Self {
            bbox : None,
        }
    }

    /// Returns the bounding box computed by the backend.
    /// Return None when nothing has been drawn
    pub fn finish(self) -> Option<BBox<Px>> {
        self.bbox
    }

    fn enclose(&mut self, mut bbox : BBox<Px>) {
        if let Some(other) = self.bbox.as_ref() {
            bbox = bbox.union(other);
        }
        self.bbox = Some(bbox)
    }
}

impl Backend for BBoxBackend {
    fn glyph(&mut self, pos : Cursor, _glyph : &str, _font_size : f64, metrics : GlyphMetrics) {
        self.enclose(BBox::from_dims(
            Unit::new(pos.x), Unit::new(pos.y) - metrics.height,
            metrics.width, metrics.total_height(),
        ));
    }

    fn rule(&mut self, pos : Cursor, width : f64, height : f64) {
        self.enclose(BBox::from_dims(
            Unit::new(pos.x), Unit::new(pos.y),
            Unit::new(width), Unit::new(height),
        ));
    }

    fn polyline(&mut self, points : &[Cursor], thickness : f64) {
        let half = Unit::<Px>::new(thickness * 0.5);
        for point in points {
            let (x, y) = (Unit::new(point.x), Unit::new(point.y));
            self.enclose(BBox::new(x - half, y - half, x + half, y + half));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::approx::ApproxMetrics;
    use crate::layout::{layout, LayoutSettings};
    use crate::parser::parse;
    use crate::render::Renderer;

    const ERROR_TOLERANCE : f64 = 1e-9;

    fn bbox_of(source : &str) -> (crate::layout::LayoutNode, BBox<Px>) {
        let parsed = parse(source);
        let node = layout(&parsed.root, LayoutSettings::new(&ApproxMetrics::new(), 10.)).unwrap();
        let mut backend = BBoxBackend::new();
        Renderer::new().render(&node, &mut backend);
        let bbox = backend.finish().expect("nothing drawn");
        (node, bbox)
    }

    #[test]
    fn nothing_drawn() {
        assert_eq!(BBoxBackend::default().finish(), None);
    }

    #[test]
    fn text_bbox_matches_layout() {
        let (node, bbox) = bbox_of("xg");
        let expected = BBox::<Px>::from_dims(Unit::ZERO, -node.height, node.width, node.total_height());
        assert!(
            bbox.close_to(&expected, ERROR_TOLERANCE),
            "expected: {:#?}, found: {:#?}",
            expected,
            bbox,
        );
    }

    #[test]
    fn ink_stays_within_the_boxes() {
        let cases = [
            r"\frac{a}{b}",
            r"x_i^2 + y",
            r"\sqrt[3]{x+1}",
            r"\left(\frac{1}{2}\right)",
            r"\overline{ab} \underline{g}",
            r"\begin{bmatrix}1 & 2 \\ 3 & 4\end{bmatrix}",
            r"\begin{Vmatrix}a\\b\\c\\d\end{Vmatrix}",
            r"\begin{cases}x & y\end{cases}",
        ];
        for case in cases {
            eprintln!("{}", case);
            let (node, bbox) = bbox_of(case);
            let slack = 1e-6;
            assert!(bbox.x_min.to_unitless() >= -slack);
            assert!(bbox.x_max <= node.width + Unit::new(slack));
            assert!(bbox.y_min >= -node.height - Unit::new(slack));
            assert!(bbox.y_max <= node.depth + Unit::new(slack));
        }
    }

    #[test]
    fn matrix_cells_stay_within_the_grid() {
        let (node, bbox) = bbox_of(r"\begin{matrix}a & b \\ c & d\end{matrix}");
        assert!(bbox.x_min.to_unitless() >= 0.);
        assert!(bbox.x_max <= node.width);
        assert!(bbox.total_height() <= node.total_height() + Unit::new(1e-9));
    }
}
