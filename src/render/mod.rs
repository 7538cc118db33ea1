//! Draw boxes laid out in space (as defined in the `layout` module) onto a `Backend`, such as a screen, a PNG image, etc.
//!
//! To do this, a `Renderer` must first be created using the `Renderer::new` function
//! and then `Renderer::render` must be called on the box tree and the desired `Backend`.
//!
//! ## Backends
//!
//! The [`Backend`] trait represents all graphical operations that are needed to render a formula:
//!
//!   - drawing a glyph at a given size: [`Backend::glyph`]
//!   - drawing a filled rectangle: [`Backend::rule`]
//!   - stroking a line through a few points, for radical signs: [`Backend::polyline`]
//!
//! The crate ships [`BBoxBackend`](bbox::BBoxBackend), which draws nothing and records the area drawn to.
//!
//! ## Caveat on coordinate systems
//!
//! The top is oriented along -Y. So in particular, the Y coordinate of the position of a superscript is less than the Y coordinate of its base.
//! A box raised by a positive [`shift`](crate::layout::LayoutNode::shift) therefore sits at `parent baseline - shift`.

pub mod bbox;

use crate::dimensions::units::Px;
use crate::font::GlyphMetrics;
use crate::layout::{FractionBox, LayoutNode, LayoutVariant, MatrixBox, SqrtBox};

/// Context used for rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    /// When set to true, the renderer additionally calls [`Backend::bbox`] to draw boxes
    /// around every glyph, horizontal and vertical boxes and matrices of the layout.
    pub debug : bool,
}

/// Position of the cursor in space. The unit used in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cursor {
    /// x-coordinate
    pub x : f64,
    /// y-coordinate (NB: `cursor1.y` < `cursor2.y`  means `cursor1` is above `cursor2` on the screen)
    pub y : f64,
}

impl Cursor {
    /// Adds `dx` and `dy` to the x- and y- coordinates resp. of the cursor
    pub fn translate(self, dx : f64, dy : f64) -> Cursor {
        Cursor {
            x : self.x + dx,
            y : self.y + dy,
        }
    }

    /// Moves cursor by `dx` in the direction +X
    pub fn right(self, dx : f64) -> Cursor {
        self.translate(dx, 0.)
    }

    /// Moves cursor by `dy` in the direction -Y
    pub fn up(self, dy : f64) -> Cursor {
        self.translate(0., -dy)
    }

    /// Moves cursor by `dy` in the direction +Y
    pub fn down(self, dy : f64) -> Cursor {
        self.translate(0., dy)
    }
}

/// The graphical operations needed to paint a box tree.
///
/// Implementing the function [`Backend::bbox`] is optional (if not implemented, this function does nothing).
/// This function is only used in the debug mode of [`Renderer`] to draw rectangles around glyphs and boxes.
pub trait Backend {
    /// Draws `glyph` at `font_size` pixels per em, with its baseline origin at `pos`.
    /// `metrics` are the extents the layout engine measured for the glyph.
    fn glyph(&mut self, pos : Cursor, glyph : &str, font_size : f64, metrics : GlyphMetrics);
    /// Draws a filled rectangle whose top-left corner is at `pos`. Used to draw fraction bars and lines.
    fn rule(&mut self, pos : Cursor, width : f64, height : f64);
    /// Strokes a line through `points` with the given thickness. Used to draw radical signs.
    fn polyline(&mut self, points : &[Cursor], thickness : f64);
    /// Only called by [`Renderer`] when [`Renderer::debug`] is true (debug mode).
    /// Draws a rectangle whose top-left corner is at `_pos` with the dimensions specified by `_width` and `_height`.
    /// The parameter `_role` specifies the type of objects that the rectangle encloses.
    fn bbox(&mut self, _pos : Cursor, _width : f64, _height : f64, _role : Role) {}
}

impl<B : Backend + ?Sized> Backend for &mut B {
    fn glyph(&mut self, pos : Cursor, glyph : &str, font_size : f64, metrics : GlyphMetrics) {
        (**self).glyph(pos, glyph, font_size, metrics)
    }
    fn rule(&mut self, pos : Cursor, width : f64, height : f64) {
        (**self).rule(pos, width, height)
    }
    fn polyline(&mut self, points : &[Cursor], thickness : f64) {
        (**self).polyline(points, thickness)
    }
    fn bbox(&mut self, pos : Cursor, width : f64, height : f64, role : Role) {
        (**self).bbox(pos, width, height, role)
    }
}


/// The type of things enclosed by a debug rectangle (cf [`Renderer::debug`] for debug mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// glyph
    Glyph,
    /// vertical box
    VBox,
    /// horizontal box
    HBox,
    /// matrix
    Matrix,
}

impl Renderer {
    /// Creates new renderer.
    pub fn new() -> Self {
        Renderer {
            debug : false,
        }
    }

    /// Creates a renderer in debug mode
    pub fn debug() -> Self {
        Renderer {
            debug : true,
        }
    }

    /// Renders the given box tree onto `out`, the provided backend, with its baseline origin at (0, 0).
    pub fn render(&self, node : &LayoutNode, out : &mut impl Backend) {
        self.render_at(node, Cursor::default(), out)
    }

    /// Renders the given box tree onto `out`, with its baseline origin at `pos`.
    pub fn render_at(&self, node : &LayoutNode, pos : Cursor, out : &mut impl Backend) {
        self.render_node(out, pos, node)
    }

    /// `pos` is the origin of the parent's baseline; the node's own shift is applied here.
    fn render_node(&self, out : &mut impl Backend, pos : Cursor, node : &LayoutNode) {
        let pos = pos.up(node.shift.unitless(Px));
        let width  = node.width.unitless(Px);
        let height = node.height.unitless(Px);
        let total  = node.total_height().unitless(Px);

        match node.node {
            LayoutVariant::Char(ref gly) => {
                if self.debug {
                    out.bbox(pos.up(height), width, total, Role::Glyph);
                }
                let metrics = GlyphMetrics::new(node.width, node.height, node.depth);
                out.glyph(pos, &gly.glyph, gly.font_size, metrics);
            },

            LayoutVariant::HBox(ref contents) => {
                if self.debug {
                    out.bbox(pos.up(height), width, total, Role::HBox);
                }
                let mut cursor = pos;
                for child in contents {
                    self.render_node(out, cursor, child);
                    cursor.x += child.width.unitless(Px);
                }
            },

            LayoutVariant::VBox(ref contents) => {
                if self.debug {
                    out.bbox(pos.up(height), width, total, Role::VBox);
                }
                let mut top = pos.up(height);
                for child in contents {
                    self.render_node(out, top.down(child.height.unitless(Px)), child);
                    top.y += child.total_height().unitless(Px);
                }
            },

            LayoutVariant::Fraction(ref frac) => self.render_fraction(out, pos, width, frac),

            LayoutVariant::Script(ref script) => {
                self.render_node(out, pos, &script.base);
                let after_base = pos.right(script.base.width.unitless(Px));
                for script in script.subscript.iter().chain(script.superscript.iter()) {
                    self.render_node(out, after_base, script);
                }
            },

            LayoutVariant::Sqrt(ref sqrt) => self.render_sqrt(out, pos, node, sqrt),

            LayoutVariant::Matrix(ref matrix) => {
                if self.debug {
                    out.bbox(pos.up(height), width, total, Role::Matrix);
                }
                self.render_matrix(out, pos, node, matrix)
            },

            LayoutVariant::Rule => out.rule(pos.up(height), width, total),

            LayoutVariant::Space => { /* NOOP */ },
        }
    }

    fn render_fraction(&self, out : &mut impl Backend, pos : Cursor, width : f64, frac : &FractionBox) {
        let half_rule = frac.rule_thickness.unitless(Px) * 0.5;
        let centred = |child : &LayoutNode| pos.right((width - child.width.unitless(Px)) * 0.5);

        let numerator = &frac.numerator;
        let numerator_pos = centred(numerator)
            .up(half_rule + frac.numerator_spacing.unitless(Px) + numerator.depth.unitless(Px));
        self.render_node(out, numerator_pos, numerator);

        out.rule(pos.up(half_rule), width, frac.rule_thickness.unitless(Px));

        let denominator = &frac.denominator;
        let denominator_pos = centred(denominator)
            .down(half_rule + frac.denominator_spacing.unitless(Px) + denominator.height.unitless(Px));
        self.render_node(out, denominator_pos, denominator);
    }

    fn render_sqrt(&self, out : &mut impl Backend, pos : Cursor, node : &LayoutNode, sqrt : &SqrtBox) {
        let overhang     = sqrt.index_overhang().unitless(Px);
        let symbol_width = sqrt.symbol_width.unitless(Px);
        let rule         = sqrt.rule_thickness.unitless(Px);

        if let Some(ref index) = sqrt.index {
            let x = overhang + symbol_width * 0.5 - index.width.unitless(Px);
            self.render_node(out, pos.right(x), index);
        }

        // points are inset by half the stroke, so that the ink stays within the box
        let start  = pos.right(overhang);
        let half   = rule * 0.5;
        let bar    = (sqrt.content.height + sqrt.padding).unitless(Px) + half;
        let bottom = node.depth.unitless(Px) - half;
        let middle = (bottom - bar) * 0.5;
        let end    = symbol_width + (sqrt.content.width + sqrt.padding).unitless(Px) - half;
        out.polyline(&[
            start.translate(half, middle),
            start.translate(symbol_width * 0.25, middle - rule),
            start.translate(symbol_width * 0.5, bottom),
            start.translate(symbol_width, -bar),
            start.translate(end, -bar),
        ], rule);

        self.render_node(out, start.right(symbol_width), &sqrt.content);
    }

    fn render_matrix(&self, out : &mut impl Backend, pos : Cursor, node : &LayoutNode, matrix : &MatrixBox) {
        if let Some(ref left) = matrix.left {
            self.render_node(out, pos, left);
        }

        let top = pos.up(matrix.grid_top.unitless(Px));
        let x_offsets = matrix.x_offsets();
        let baselines = matrix.baselines();
        for (row, baseline) in matrix.cells.iter().zip(&baselines) {
            for ((cell, x), column_width) in row.iter().zip(&x_offsets).zip(&matrix.column_widths) {
                let centring = (*column_width - cell.width).scale(0.5);
                self.render_node(out, top.translate((*x + centring).unitless(Px), baseline.unitless(Px)), cell);
            }
        }

        if let Some(ref right) = matrix.right {
            let x = (node.width - matrix.right_room()).unitless(Px);
            self.render_node(out, pos.right(x), right);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::approx::ApproxMetrics;
    use crate::layout::{layout, LayoutSettings};
    use crate::parser::parse;

    #[derive(Default)]
    struct Recorder {
        glyphs : Vec<(String, Cursor)>,
        widths : Vec<f64>,
        rules  : Vec<(Cursor, f64, f64)>,
        lines  : usize,
        boxes  : Vec<Role>,
    }

    impl Backend for Recorder {
        fn glyph(&mut self, pos : Cursor, glyph : &str, _font_size : f64, metrics : GlyphMetrics) {
            self.glyphs.push((glyph.to_string(), pos));
            self.widths.push(metrics.width.to_unitless());
        }
        fn rule(&mut self, pos : Cursor, width : f64, height : f64) {
            self.rules.push((pos, width, height));
        }
        fn polyline(&mut self, _points : &[Cursor], _thickness : f64) {
            self.lines += 1;
        }
        fn bbox(&mut self, _pos : Cursor, _width : f64, _height : f64, role : Role) {
            self.boxes.push(role);
        }
    }

    fn paint(source : &str, renderer : Renderer) -> Recorder {
        let parsed = parse(source);
        let node = layout(&parsed.root, LayoutSettings::new(&ApproxMetrics::new(), 10.)).unwrap();
        let mut recorder = Recorder::default();
        renderer.render(&node, &mut recorder);
        recorder
    }

    #[test]
    fn glyphs_advance_along_the_baseline() {
        let recorder = paint("ab", Renderer::new());
        assert_eq!(recorder.glyphs.len(), 2);
        assert_eq!(recorder.glyphs[0].1, Cursor { x : 0., y : 0. });
        assert!((recorder.glyphs[1].1.x - 4.8).abs() < 1e-9);
        assert_eq!(recorder.glyphs[1].1.y, 0.);
        assert!(recorder.boxes.is_empty());
    }

    #[test]
    fn superscripts_are_above_subscripts() {
        let recorder = paint("x_i^2", Renderer::new());
        let y = |glyph : &str| recorder.glyphs.iter().find(|(g, _)| g == glyph).map(|(_, pos)| pos.y).unwrap();
        assert!(y("2") < y("x"));
        assert!(y("i") > y("x"));
    }

    #[test]
    fn fraction_has_a_bar_between_its_parts() {
        let recorder = paint(r"\frac{a}{b}", Renderer::new());
        assert_eq!(recorder.rules.len(), 1);
        let (bar, _, thickness) = recorder.rules[0];
        assert!((bar.y + thickness * 0.5).abs() < 1e-9);
        assert!(recorder.glyphs[0].1.y < bar.y);
        assert!(recorder.glyphs[1].1.y > bar.y + thickness);
    }

    #[test]
    fn radical_is_stroked() {
        let recorder = paint(r"\sqrt{x}", Renderer::new());
        assert_eq!(recorder.lines, 1);
        assert_eq!(recorder.glyphs.len(), 1);
    }

    #[test]
    fn matrix_delimiters_stay_clear_of_the_cells() {
        let source = r"\begin{bmatrix}a\\b\\c\\d\end{bmatrix}x";
        let recorder = paint(source, Renderer::new());
        let extent = |glyph : &str| {
            let idx = recorder.glyphs.iter().position(|(g, _)| g == glyph).unwrap();
            let x = recorder.glyphs[idx].1.x;
            (x, x + recorder.widths[idx])
        };

        let (_, left_end) = extent("[");
        let (right_start, right_end) = extent("]");
        for cell in ["a", "b", "c", "d"] {
            let (start, end) = extent(cell);
            assert!(left_end <= start, "[ overlaps {}", cell);
            assert!(end <= right_start, "] overlaps {}", cell);
        }
        // what follows the matrix starts after its right delimiter
        assert!(right_end <= extent("x").0 + 1e-9);
    }

    #[test]
    fn debug_mode_outlines_boxes() {
        let recorder = paint(r"a\begin{pmatrix}1\end{pmatrix}", Renderer::debug());
        assert!(recorder.boxes.contains(&Role::Glyph));
        assert!(recorder.boxes.contains(&Role::HBox));
        assert!(recorder.boxes.contains(&Role::Matrix));
    }
}
