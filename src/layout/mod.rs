//! Converting [`ParseNode`s](crate::parser::nodes::ParseNode) to boxes which are ready to be rendered.
//!
//! The boxes follow the model found in TeX: every box has a width, a height (extent above its baseline)
//! and a depth (extent below its baseline). Horizontal boxes place their children side by side on a common
//! baseline, vertical boxes stack them from top to bottom. A box may be raised above its parent's baseline
//! by a `shift` (negative values lower it).
//!
//! Dimensions are computed once, when a box is built. A box tree only carries geometry and glyph names:
//! it can be cached, serialized or sent to another thread, and painted by any [`Backend`](crate::render::Backend).

#[macro_use]
mod builders;
pub mod constants;
pub mod engine;
pub mod spacing;

pub use self::engine::{layout, LayoutSettings};

use crate::dimensions::Unit;
use crate::dimensions::units::Px;
use crate::parser::environments::MatrixKind;


/// A node of the box tree, with its dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Type of node
    pub node   : LayoutVariant,
    /// Width
    pub width  : Unit<Px>,
    /// Height: distance from baseline to top of the node
    pub height : Unit<Px>,
    /// Depth: distance from baseline to bottom of the node
    pub depth  : Unit<Px>,
    /// How far the node is raised above its parent's baseline
    pub shift  : Unit<Px>,
}

/// Different types of boxes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LayoutVariant {
    /// A glyph, or a run of glyphs measured as a whole
    Char(LayoutGlyph),
    /// A horizontal box: children are placed side by side
    HBox(Vec<LayoutNode>),
    /// A vertical box: children are placed on top of each other, the last one sitting on the baseline
    VBox(Vec<LayoutNode>),
    /// A fraction with its bar
    Fraction(FractionBox),
    /// A base with sub- and superscripts
    Script(ScriptBox),
    /// A radical
    Sqrt(SqrtBox),
    /// Some (possibly negative) space, without ink
    Space,
    /// A filled rectangle
    Rule,
    /// A grid of cells, possibly between delimiters
    Matrix(MatrixBox),
}

/// Glyph: this node has no children; it names a glyph and the size to draw it at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutGlyph {
    /// Text of the glyph
    pub glyph     : String,
    /// Font size in pixels per em
    pub font_size : f64,
}

/// Children of a [`LayoutVariant::Fraction`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FractionBox {
    /// Numerator, centred above the bar
    pub numerator         : Box<LayoutNode>,
    /// Denominator, centred below the bar
    pub denominator       : Box<LayoutNode>,
    /// Thickness of the bar, which is centred on the baseline
    pub rule_thickness    : Unit<Px>,
    /// Gap between the bottom of the numerator and the bar
    pub numerator_spacing : Unit<Px>,
    /// Gap between the bar and the top of the denominator
    pub denominator_spacing : Unit<Px>,
}

/// Children of a [`LayoutVariant::Script`]. Scripts are placed right after the base,
/// at their own [`LayoutNode::shift`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptBox {
    /// The nucleus
    pub base        : Box<LayoutNode>,
    /// Subscript, lowered
    pub subscript   : Option<Box<LayoutNode>>,
    /// Superscript, raised
    pub superscript : Option<Box<LayoutNode>>,
}

/// Children of a [`LayoutVariant::Sqrt`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqrtBox {
    /// The radicand
    pub content        : Box<LayoutNode>,
    /// Degree of the root, drawn at the left of the radical sign
    pub index          : Option<Box<LayoutNode>>,
    /// Width of the radical sign
    pub symbol_width   : Unit<Px>,
    /// Thickness of the bar above the radicand
    pub rule_thickness : Unit<Px>,
    /// Space between the radicand and the bar
    pub padding        : Unit<Px>,
}

impl SqrtBox {
    /// Horizontal room taken by the index on the left of the radical sign
    pub fn index_overhang(&self) -> Unit<Px> {
        match self.index {
            Some(ref index) => (index.width - self.symbol_width.scale(0.5)).max(Unit::ZERO),
            None            => Unit::ZERO,
        }
    }
}

/// Children of a [`LayoutVariant::Matrix`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixBox {
    /// Cells, row by row. Every row has as many cells as there are columns.
    pub cells         : Vec<Vec<LayoutNode>>,
    /// Environment the matrix comes from
    pub kind          : MatrixKind,
    /// Max width of each column
    pub column_widths : Vec<Unit<Px>>,
    /// Max height of each row
    pub row_heights   : Vec<Unit<Px>>,
    /// Max depth of each row
    pub row_depths    : Vec<Unit<Px>>,
    /// Space on each side of a cell
    pub cell_padding  : Unit<Px>,
    /// Space between the depth of a row and the height of the next one
    pub row_spacing   : Unit<Px>,
    /// Minimal room taken by each drawn delimiter
    pub delimiter_allowance : Unit<Px>,
    /// Distance from the baseline up to the top of the first row
    pub grid_top      : Unit<Px>,
    /// Left delimiter, stretched to the height of the grid
    pub left          : Option<Box<LayoutNode>>,
    /// Right delimiter, stretched to the height of the grid
    pub right         : Option<Box<LayoutNode>>,
}

impl MatrixBox {
    /// Distance from the top of the first row to the bottom of the last one
    pub fn grid_height(&self) -> Unit<Px> {
        let rows : Unit<Px> = self.row_heights.iter().zip(&self.row_depths)
            .map(|(&height, &depth)| height + depth)
            .sum();
        let gaps = self.row_heights.len().saturating_sub(1) as f64;
        rows + self.row_spacing.scale(gaps)
    }

    /// Horizontal room taken by the left delimiter: its width, but at least the allowance
    pub fn left_room(&self) -> Unit<Px> {
        self.delimiter_room(self.left.as_deref())
    }

    /// Horizontal room taken by the right delimiter, which is drawn at the right edge of the matrix
    pub fn right_room(&self) -> Unit<Px> {
        self.delimiter_room(self.right.as_deref())
    }

    fn delimiter_room(&self, delimiter : Option<&LayoutNode>) -> Unit<Px> {
        delimiter.map_or(Unit::ZERO, |delimiter| delimiter.width.max(self.delimiter_allowance))
    }

    /// Returns, for every column, its horizontal offset from the left edge of the matrix
    pub fn x_offsets(&self) -> Vec<Unit<Px>> {
        let start = self.left_room();
        self.column_widths.iter().scan(start, |acc, &width| {
            let x = *acc;
            *acc += width + self.cell_padding.scale(2.);
            Some(x + self.cell_padding)
        }).collect()
    }

    /// Returns, for every row, the distance from the top of the grid to its baseline
    pub fn baselines(&self) -> Vec<Unit<Px>> {
        self.row_heights.iter().zip(&self.row_depths).scan(Unit::ZERO, |acc, (&height, &depth)| {
            let baseline = *acc + height;
            *acc = baseline + depth + self.row_spacing;
            Some(baseline)
        }).collect()
    }
}


impl LayoutNode {
    /// `height + depth`
    pub fn total_height(&self) -> Unit<Px> {
        self.height + self.depth
    }

    /// Raises the node by `amount` (lowers it if negative), on top of any shift it already has
    pub fn shifted(mut self, amount : Unit<Px>) -> Self {
        self.shift += amount;
        self
    }

    /// Returns the glyph if this node is a [`LayoutVariant::Char`]
    pub fn as_glyph(&self) -> Option<&LayoutGlyph> {
        match self.node {
            LayoutVariant::Char(ref glyph) => Some(glyph),
            _ => None,
        }
    }

    /// Direct children of this node, in painting order
    pub fn children(&self) -> Vec<&LayoutNode> {
        match self.node {
            LayoutVariant::HBox(ref contents)
            | LayoutVariant::VBox(ref contents) => contents.iter().collect(),
            LayoutVariant::Fraction(ref frac) => vec![&*frac.numerator, &*frac.denominator],
            LayoutVariant::Script(ref script) => {
                let mut children = vec![&*script.base];
                children.extend(script.subscript.as_deref());
                children.extend(script.superscript.as_deref());
                children
            },
            LayoutVariant::Sqrt(ref sqrt) => {
                let mut children : Vec<&LayoutNode> = sqrt.index.as_deref().into_iter().collect();
                children.push(&*sqrt.content);
                children
            },
            LayoutVariant::Matrix(ref matrix) => {
                let mut children : Vec<&LayoutNode> = matrix.left.as_deref().into_iter().collect();
                children.extend(matrix.cells.iter().flatten());
                children.extend(matrix.right.as_deref());
                children
            },
            LayoutVariant::Char(_) | LayoutVariant::Space | LayoutVariant::Rule => Vec::new(),
        }
    }

    /// Every glyph of the tree, in painting order
    pub fn glyphs(&self) -> Vec<&LayoutGlyph> {
        let mut glyphs = Vec::new();
        self.collect_glyphs(&mut glyphs);
        glyphs
    }

    fn collect_glyphs<'a>(&'a self, acc : &mut Vec<&'a LayoutGlyph>) {
        match self.as_glyph() {
            Some(glyph) => acc.push(glyph),
            None => for child in self.children() {
                child.collect_glyphs(acc);
            },
        }
    }
}
