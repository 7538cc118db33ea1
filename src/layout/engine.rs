//! This module defines the main layout function that places the parse nodes in space, given the measurements provided
//! by some [`FontMetrics`].
//! The most important function here is [`layout`](crate::layout::engine::layout).
//! Given a [`ParseNode`] and some [`LayoutSettings`], it returns a box tree, which can then be cached
//! or sent to the renderer (cf [`render`](crate::render)).

use super::constants::*;
use super::spacing::Spacing;
use super::{FractionBox, LayoutGlyph, LayoutNode, LayoutVariant, MatrixBox, ScriptBox, SqrtBox};

use crate::dimensions::Unit;
use crate::dimensions::units::{Em, Px};
use crate::error::LayoutResult;
use crate::font::FontMetrics;
use crate::parser::environments::MatrixKind;
use crate::parser::nodes::ParseNode;
use crate::parser::symbols::SymbolRegistry;


/// Defines the metrics provider, the symbol registry and the font size a node is laid out with.
///
/// The settings are bound to one font size; nested constructs derive new settings, cf
/// [`LayoutSettings::fraction_variant`] and [`LayoutSettings::script_variant`].
pub struct LayoutSettings<'a, M : ?Sized> {
    /// Glyph measurements and typographic parameters
    pub metrics   : &'a M,
    /// Glyphs of symbol commands
    pub symbols   : &'a SymbolRegistry,
    /// Font size in pixels per em
    pub font_size : f64,
}

// NOTE: derive(Clone, Copy) would require `M : Copy`.
impl<'a, M : ?Sized> Clone for LayoutSettings<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, M : ?Sized> Copy for LayoutSettings<'a, M> {}

impl<'a, M : FontMetrics + ?Sized> LayoutSettings<'a, M> {
    /// Creates new settings using the built-in symbol registry
    pub fn new(metrics : &'a M, font_size : f64) -> Self {
        LayoutSettings {
            metrics,
            symbols : SymbolRegistry::builtin(),
            font_size,
        }
    }

    /// Replaces the symbol registry
    pub fn with_symbols(self, symbols : &'a SymbolRegistry) -> Self {
        LayoutSettings { symbols, ..self }
    }

    /// Settings for the numerator and denominator of a fraction
    pub fn fraction_variant(self) -> Self {
        LayoutSettings {
            font_size : self.font_size * FRACTION_SIZE_FACTOR,
            ..self
        }
    }

    /// Settings for sub- and superscripts
    pub fn script_variant(self) -> Self {
        LayoutSettings {
            font_size : self.metrics.script_size(self.font_size),
            ..self
        }
    }

    /// Converts a length in em at the current font size
    pub fn to_px(self, length : Unit<Em>) -> Unit<Px> {
        length.scaled(self.font_size)
    }
}


/// Entry point to our recursive algorithm. The returned box is never shifted.
pub fn layout<M : FontMetrics + ?Sized>(node : &ParseNode, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    match *node {
        ParseNode::Text(ref text)   => text_run(text, settings),
        ParseNode::Symbol(ref name) => symbol(name, settings),
        ParseNode::Fraction { ref numerator, ref denominator } => fraction(numerator, denominator, settings),
        ParseNode::Script { ref base, ref subscript, ref superscript } =>
            scripts(base, subscript.as_deref(), superscript.as_deref(), settings),
        ParseNode::Group(ref children) => group(children, settings),
        ParseNode::Sqrt { ref content, ref index } => radical(content, index.as_deref(), settings),
        ParseNode::Delimiter { ref left, ref content, ref right } => delimited(left, content, right, settings),
        ParseNode::Space(width) => Ok(kern!(horz: settings.to_px(Unit::new(width)))),
        ParseNode::TextMode(ref content) => layout(content, settings),
        ParseNode::Mathbb(ref content) => mathbb(content, settings),
        ParseNode::Matrix { ref rows, kind } => matrix(rows, kind, settings),
        ParseNode::Overline(ref content)  => overline(content, settings),
        ParseNode::Underline(ref content) => underline(content, settings),
    }
}


/// A single [`LayoutVariant::Char`] box, measured at the current size
fn glyph<M : FontMetrics + ?Sized>(text : &str, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let metrics = settings.metrics.measure_char(text, settings.font_size)?;
    Ok(LayoutNode {
        width  : metrics.width,
        height : metrics.height,
        depth  : metrics.depth,
        shift  : Unit::ZERO,
        node   : LayoutVariant::Char(LayoutGlyph {
            glyph     : text.to_string(),
            font_size : settings.font_size,
        }),
    })
}

fn text_run<M : FontMetrics + ?Sized>(text : &str, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let mut hbox = super::builders::HBox::new();
    let mut buffer = [0u8; 4];
    for (idx, c) in text.chars().enumerate() {
        let spacing = Spacing::of_char(c);
        if idx > 0 && spacing != Spacing::None {
            hbox.add_node(kern!(horz: settings.to_px(spacing.to_length())));
        }
        hbox.add_node(glyph(c.encode_utf8(&mut buffer), settings)?);
    }
    Ok(hbox.build())
}

fn symbol<M : FontMetrics + ?Sized>(name : &str, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    match settings.symbols.get(name) {
        Some(text) => glyph(text, settings),
        None => {
            debug!("no glyph for \\{}, laying out its name", name);
            text_run(name, settings)
        }
    }
}

fn fraction<M : FontMetrics + ?Sized>(numerator : &ParseNode, denominator : &ParseNode, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let numerator   = layout(numerator,   settings.fraction_variant())?;
    let denominator = layout(denominator, settings.fraction_variant())?;

    let rule_thickness      = settings.metrics.fraction_rule_thickness(settings.font_size);
    let numerator_spacing   = settings.metrics.fraction_numerator_shift(settings.font_size);
    let denominator_spacing = settings.metrics.fraction_denominator_shift(settings.font_size);
    let half_rule = rule_thickness.scale(0.5);

    Ok(LayoutNode {
        width  : numerator.width.max(denominator.width) + FRACTION_EXTRA_WIDTH,
        height : numerator.total_height() + numerator_spacing + half_rule,
        depth  : denominator.total_height() + denominator_spacing + half_rule,
        shift  : Unit::ZERO,
        node   : LayoutVariant::Fraction(FractionBox {
            numerator   : Box::new(numerator),
            denominator : Box::new(denominator),
            rule_thickness,
            numerator_spacing,
            denominator_spacing,
        }),
    })
}

fn scripts<M : FontMetrics + ?Sized>(
    base        : &ParseNode,
    subscript   : Option<&ParseNode>,
    superscript : Option<&ParseNode>,
    settings    : LayoutSettings<M>,
) -> LayoutResult<LayoutNode> {
    let base = layout(base, settings)?;
    let subscript = match subscript {
        Some(sub) => Some(layout(sub, settings.script_variant())?
            .shifted(-settings.metrics.script_shift_down(settings.font_size))),
        None => None,
    };
    let superscript = match superscript {
        Some(sup) => Some(layout(sup, settings.script_variant())?
            .shifted(settings.metrics.script_shift_up(settings.font_size))),
        None => None,
    };

    let mut width  = Unit::<Px>::ZERO;
    let mut height = base.height;
    let mut depth  = base.depth;
    for script in subscript.iter().chain(superscript.iter()) {
        width  = width.max(script.width);
        height = height.max(script.height + script.shift);
        depth  = depth.max(script.depth - script.shift);
    }

    Ok(LayoutNode {
        width  : base.width + width,
        height : height.max(Unit::ZERO),
        depth  : depth.max(Unit::ZERO),
        shift  : Unit::ZERO,
        node   : LayoutVariant::Script(ScriptBox {
            base        : Box::new(base),
            subscript   : subscript.map(Box::new),
            superscript : superscript.map(Box::new),
        }),
    })
}

/// First (`leading`) or last character of a child, if it decides the spacing around that child
fn boundary_char(node : &ParseNode, symbols : &SymbolRegistry, leading : bool) -> Option<char> {
    let text = match *node {
        ParseNode::Text(ref text)   => text.as_str(),
        ParseNode::Symbol(ref name) => symbols.get(name)?,
        _ => return None,
    };
    if leading { text.chars().next() } else { text.chars().next_back() }
}

fn group<M : FontMetrics + ?Sized>(children : &[ParseNode], settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    if let [ref child] = *children {
        return layout(child, settings);
    }

    let mut hbox = super::builders::HBox::new();
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            let next = boundary_char(child, settings.symbols, true).map(Spacing::of_char);
            let prev = boundary_char(&children[idx - 1], settings.symbols, false).map(Spacing::of_char);
            let spacing = match (next, prev) {
                (Some(next), _) if next != Spacing::None => next,
                (_, Some(prev)) => prev,
                _ => Spacing::None,
            };
            if spacing != Spacing::None {
                hbox.add_node(kern!(horz: settings.to_px(spacing.to_length())));
            }
        }
        hbox.add_node(layout(child, settings)?);
    }
    Ok(hbox.build())
}

fn radical<M : FontMetrics + ?Sized>(content : &ParseNode, index : Option<&ParseNode>, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let content = layout(content, settings)?;
    let symbol_width   = settings.metrics.sqrt_symbol_width(settings.font_size);
    let rule_thickness = settings.metrics.sqrt_rule_thickness(settings.font_size);
    let padding        = settings.metrics.sqrt_padding(settings.font_size);

    let mut height = content.height + padding + rule_thickness;
    let depth = content.depth + settings.to_px(SQRT_DEPTH_BUFFER);

    let index = match index {
        Some(index) => {
            let index = layout(index, settings.script_variant().script_variant())?;
            let raise = (height + depth).scale(SQRT_INDEX_RAISE) - depth + index.depth;
            let index = index.shifted(raise);
            height = height.max(index.height + index.shift);
            Some(Box::new(index))
        },
        None => None,
    };

    let sqrt = SqrtBox {
        content : Box::new(content),
        index,
        symbol_width,
        rule_thickness,
        padding,
    };

    Ok(LayoutNode {
        width : sqrt.index_overhang() + symbol_width + sqrt.content.width + padding,
        height,
        depth,
        shift : Unit::ZERO,
        node  : LayoutVariant::Sqrt(sqrt),
    })
}

/// A delimiter covering `target_height`, centred on `target_centre` (measured from the baseline, upwards).
/// Delimiters are never shrunk below their nominal size.
fn delimiter<M : FontMetrics + ?Sized>(
    text          : &str,
    target_height : Unit<Px>,
    target_centre : Unit<Px>,
    settings      : LayoutSettings<M>,
) -> LayoutResult<LayoutNode> {
    if text.is_empty() {
        return Ok(kern!(horz: settings.to_px(NULL_DELIMITER_SPACE)));
    }

    let nominal = glyph(text, settings)?;
    let nominal_height = nominal.total_height().to_unitless();
    if nominal_height <= 0. {
        return Ok(nominal);
    }
    let scale = (target_height.to_unitless() / nominal_height).max(1.);
    if scale <= 1. {
        return Ok(nominal);
    }

    trace!("stretching delimiter {} by {:.3}", text, scale);
    let settings = LayoutSettings { font_size : settings.font_size * scale, ..settings };
    let stretched = glyph(text, settings)?;
    let centre = (stretched.height - stretched.depth).scale(0.5);
    Ok(stretched.shifted(target_centre - centre))
}

fn delimited<M : FontMetrics + ?Sized>(left : &str, content : &ParseNode, right : &str, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let content = layout(content, settings)?;
    let centre = (content.height - content.depth).scale(0.5);
    let left  = delimiter(left,  content.total_height(), centre, settings)?;
    let right = delimiter(right, content.total_height(), centre, settings)?;
    Ok(hbox!(left, content, right))
}

fn mathbb<M : FontMetrics + ?Sized>(content : &ParseNode, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    if let ParseNode::Text(ref text) = *content {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(double_struck) = settings.symbols.get(&format!("mathbb{{{}}}", c)) {
                return glyph(double_struck, settings);
            }
        }
    }
    layout(content, settings)
}

fn matrix<M : FontMetrics + ?Sized>(rows : &[Vec<ParseNode>], kind : MatrixKind, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut cells = Vec::with_capacity(rows.len());
    let mut column_widths = vec![Unit::<Px>::ZERO; columns];
    let mut row_heights   = Vec::with_capacity(rows.len());
    let mut row_depths    = Vec::with_capacity(rows.len());
    for row in rows {
        let mut laid_out = Vec::with_capacity(columns);
        for cell in row {
            laid_out.push(layout(cell, settings)?);
        }
        // ragged rows are padded with empty cells
        while laid_out.len() < columns {
            laid_out.push(hbox!());
        }

        let mut height = Unit::<Px>::ZERO;
        let mut depth  = Unit::<Px>::ZERO;
        for (width, cell) in column_widths.iter_mut().zip(&laid_out) {
            *width = width.max(cell.width);
            height = height.max(cell.height);
            depth  = depth.max(cell.depth);
        }
        row_heights.push(height);
        row_depths.push(depth);
        cells.push(laid_out);
    }

    let mut matrix = MatrixBox {
        cells,
        kind,
        column_widths,
        row_heights,
        row_depths,
        cell_padding        : settings.to_px(MATRIX_CELL_PADDING),
        row_spacing         : settings.to_px(MATRIX_ROW_SPACING),
        delimiter_allowance : settings.to_px(MATRIX_DELIMITER_ALLOWANCE),
        grid_top            : Unit::ZERO,
        left  : None,
        right : None,
    };

    // the grid is centred on the math axis
    let grid_height = matrix.grid_height();
    let axis = settings.to_px(AXIS_HEIGHT);
    matrix.grid_top = grid_height.scale(0.5) + axis;
    let mut height = matrix.grid_top;
    let mut depth  = (grid_height - matrix.grid_top).max(Unit::ZERO);
    let centre = axis;

    if let Some(left) = kind.left_delimiter() {
        matrix.left = Some(Box::new(delimiter(left, grid_height, centre, settings)?));
    }
    if let Some(right) = kind.right_delimiter() {
        matrix.right = Some(Box::new(delimiter(right, grid_height, centre, settings)?));
    }
    for delimiter in matrix.left.iter().chain(matrix.right.iter()) {
        height = height.max(delimiter.height + delimiter.shift);
        depth  = depth.max(delimiter.depth - delimiter.shift);
    }

    let width = matrix.column_widths.iter().copied().sum::<Unit<Px>>()
        + matrix.cell_padding.scale(2. * columns as f64)
        + matrix.left_room()
        + matrix.right_room();

    Ok(LayoutNode {
        width,
        height,
        depth,
        shift : Unit::ZERO,
        node  : LayoutVariant::Matrix(matrix),
    })
}

fn overline<M : FontMetrics + ?Sized>(content : &ParseNode, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let content = layout(content, settings)?;
    let thickness = settings.metrics.fraction_rule_thickness(settings.font_size);
    let gap = settings.to_px(LINE_GAP);
    let lowered_by = content.depth;
    let line = vbox!(shift: -lowered_by;
        rule!(width: content.width, height: thickness),
        kern!(vert: gap),
        content
    );
    Ok(hbox!(line))
}

fn underline<M : FontMetrics + ?Sized>(content : &ParseNode, settings : LayoutSettings<M>) -> LayoutResult<LayoutNode> {
    let content = layout(content, settings)?;
    let thickness = settings.metrics.fraction_rule_thickness(settings.font_size);
    let gap = settings.to_px(LINE_GAP);
    let lowered_by = content.depth + gap + thickness;
    let width = content.width;
    let line = vbox!(shift: -lowered_by;
        content,
        kern!(vert: gap),
        rule!(width: width, height: thickness)
    );
    Ok(hbox!(line))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::approx::ApproxMetrics;
    use crate::parser::parse;

    const EPS : f64 = 1e-9;

    fn lay(source : &str) -> LayoutNode {
        let parsed = parse(source);
        assert!(parsed.is_clean(), "{:?}", parsed.errors);
        layout(&parsed.root, LayoutSettings::new(&ApproxMetrics::new(), 10.)).unwrap()
    }

    fn measure(text : &str, font_size : f64) -> crate::font::GlyphMetrics {
        ApproxMetrics::new().measure_char(text, font_size).unwrap()
    }

    #[test]
    fn text_is_a_row_of_chars() {
        let node = lay("ab");
        let (a, b) = (measure("a", 10.), measure("b", 10.));
        assert!(node.width.approx_eq(a.width + b.width, EPS));
        assert_eq!(node.height, a.height.max(b.height));
        match node.node {
            LayoutVariant::HBox(ref children) => assert_eq!(children.len(), 2),
            ref other => panic!("expected a HBox, got {:?}", other),
        }
    }

    #[test]
    fn binary_operators_are_spaced() {
        let node = lay("a+b");
        let expected = measure("a", 10.).width + measure("+", 10.).width + measure("b", 10.).width
            + Unit::<Em>::new(2. / 9.).scaled(10.).scale(2.);
        assert!(node.width.approx_eq(expected, EPS), "{} != {}", node.width, expected);
    }

    #[test]
    fn fraction_dimensions() {
        let node = lay(r"\frac{A}{B}");
        let (a, b) = (measure("A", 8.), measure("B", 8.));
        let metrics = ApproxMetrics::new();
        let rule = metrics.fraction_rule_thickness(10.);

        assert!(node.width.approx_eq(a.width.max(b.width) + Unit::new(4.), EPS));
        assert!(node.height.approx_eq(a.total_height() + metrics.fraction_numerator_shift(10.) + rule.scale(0.5), EPS));
        assert!(node.depth.approx_eq(b.total_height() + metrics.fraction_denominator_shift(10.) + rule.scale(0.5), EPS));
    }

    #[test]
    fn scripts_are_smaller_and_shifted() {
        let node = lay("x_i^2");
        let script = match node.node {
            LayoutVariant::Script(ref script) => script,
            ref other => panic!("expected a Script, got {:?}", other),
        };
        let sub = script.subscript.as_ref().unwrap();
        let sup = script.superscript.as_ref().unwrap();

        assert!(sub.shift.approx_eq(Unit::new(-2.), EPS));
        assert!(sup.shift.approx_eq(Unit::new(4.), EPS));
        assert!((sub.glyphs()[0].font_size - 7.).abs() < EPS);
        assert!(node.width.approx_eq(script.base.width + sub.width.max(sup.width), EPS));
        assert!(node.height >= sup.height + sup.shift);
    }

    #[test]
    fn sqrt_depth_has_a_buffer() {
        let node = lay(r"\sqrt{x}");
        let x = measure("x", 10.);
        assert!(node.depth.approx_eq(x.depth + Unit::new(1.), EPS));
        assert!(node.height.approx_eq(x.height + Unit::new(1.) + Unit::new(0.5), EPS));
        assert!(node.width.approx_eq(Unit::new(6.) + x.width + Unit::new(1.), EPS));
    }

    #[test]
    fn sqrt_index_is_stored() {
        let node = lay(r"\sqrt[3]{x}");
        match node.node {
            LayoutVariant::Sqrt(ref sqrt) => {
                let index = sqrt.index.as_ref().expect("index");
                assert!((index.glyphs()[0].font_size - 4.9).abs() < EPS);
                assert!(index.shift > Unit::ZERO);
            },
            ref other => panic!("expected a Sqrt, got {:?}", other),
        }
    }

    #[test]
    fn delimiters_never_shrink() {
        let cases = [r"\left(x\right)", r"\left(\frac{a}{b}\right)", r"\left(\frac{\frac{a}{b}}{\frac{c}{d}}\right)"];
        let nominal = measure("(", 10.);
        for case in cases {
            eprintln!("{}", case);
            let node = lay(case);
            let left = match node.node {
                LayoutVariant::HBox(ref children) => &children[0],
                ref other => panic!("expected a HBox, got {:?}", other),
            };
            assert!(left.total_height() >= nominal.total_height());
            assert!(left.glyphs()[0].font_size >= 10.);
        }
    }

    #[test]
    fn tall_content_stretches_delimiters() {
        let node = lay(r"\left(\frac{\frac{a}{b}}{\frac{c}{d}}\right)");
        if let LayoutVariant::HBox(ref children) = node.node {
            let content = &children[1];
            assert!(children[0].total_height().approx_eq(content.total_height(), 1e-6));
            assert!(children[2].total_height().approx_eq(content.total_height(), 1e-6));
        } else {
            panic!("expected a HBox");
        }
    }

    #[test]
    fn null_delimiter() {
        let node = lay(r"\left.x\right|");
        if let LayoutVariant::HBox(ref children) = node.node {
            assert_eq!(children[0].node, LayoutVariant::Space);
            assert!(children[0].width.approx_eq(Unit::new(1.), EPS));
        } else {
            panic!("expected a HBox");
        }
    }

    #[test]
    fn mathbb_uses_double_struck_glyph() {
        let node = lay(r"\mathbb{R}");
        assert_eq!(node.as_glyph().map(|g| g.glyph.as_str()), Some("ℝ"));
    }

    #[test]
    fn unknown_symbols_fall_back_to_their_name() {
        let node = lay(r"\foo");
        let glyphs : String = node.glyphs().into_iter().map(|g| g.glyph.as_str()).collect();
        assert_eq!(glyphs, "foo");
    }

    #[test]
    fn matrix_grid() {
        let node = lay(r"\begin{pmatrix}a & b \\ c & dd\end{pmatrix}");
        let matrix = match node.node {
            LayoutVariant::Matrix(ref matrix) => matrix,
            ref other => panic!("expected a Matrix, got {:?}", other),
        };
        assert_eq!(matrix.cells.len(), 2);
        assert_eq!(matrix.column_widths.len(), 2);
        assert!(matrix.column_widths[1].approx_eq(measure("dd", 10.).width, EPS));
        assert!(matrix.left.is_some() && matrix.right.is_some());

        assert!(matrix.left_room() >= Unit::new(4.) && matrix.right_room() >= Unit::new(4.));
        let expected = matrix.column_widths[0] + matrix.column_widths[1]
            + Unit::new(4. * 5.) + matrix.left_room() + matrix.right_room();
        assert!(node.width.approx_eq(expected, EPS));
        // centred on the axis
        let grid_centre = matrix.grid_top - matrix.grid_height().scale(0.5);
        assert!(grid_centre.approx_eq(Unit::new(2.5), EPS));
    }

    #[test]
    fn tall_matrix_makes_room_for_its_delimiters() {
        let node = lay(r"\begin{pmatrix}a\\b\\c\\d\end{pmatrix}");
        let matrix = match node.node {
            LayoutVariant::Matrix(ref matrix) => matrix,
            ref other => panic!("expected a Matrix, got {:?}", other),
        };
        let left  = matrix.left.as_deref().unwrap();
        let right = matrix.right.as_deref().unwrap();
        // stretched past the allowance
        assert!(left.width > matrix.delimiter_allowance);

        let x_offsets = matrix.x_offsets();
        assert!(left.width <= x_offsets[0] - matrix.cell_padding + Unit::new(EPS));
        let grid_end = x_offsets[0] + matrix.column_widths[0] + matrix.cell_padding;
        assert!(grid_end <= node.width - right.width + Unit::new(EPS));
        assert!(node.width.approx_eq(grid_end + matrix.right_room(), EPS));

        for delimiter in [left, right] {
            assert!(delimiter.height + delimiter.shift <= node.height + Unit::new(EPS));
            assert!(delimiter.depth - delimiter.shift <= node.depth + Unit::new(EPS));
        }
        assert!(matrix.grid_top <= node.height);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let node = lay(r"\begin{matrix}a & b & c \\ d\end{matrix}");
        if let LayoutVariant::Matrix(ref matrix) = node.node {
            assert!(matrix.cells.iter().all(|row| row.len() == 3));
            assert!(matrix.left.is_none());
        } else {
            panic!("expected a Matrix");
        }
    }

    #[test]
    fn overline_keeps_baseline() {
        let x = lay("g");
        let node = lay(r"\overline{g}");
        assert!(node.depth.approx_eq(x.depth, EPS));
        assert!(node.height > x.height);
        let node = lay(r"\underline{g}");
        assert!(node.depth > x.depth);
    }

    #[test]
    fn empty_group_is_an_empty_hbox() {
        let node = layout(&ParseNode::Group(vec![]), LayoutSettings::new(&ApproxMetrics::new(), 10.)).unwrap();
        assert_eq!(node.width, Unit::ZERO);
        assert_eq!(node.node, LayoutVariant::HBox(vec![]));
    }
}
