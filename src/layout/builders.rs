use super::{LayoutNode, LayoutVariant};

use crate::dimensions::{units::Px, Unit};


/// Accumulates the children of a horizontal box, keeping track of its dimensions
#[derive(Debug, Default)]
pub struct HBox {
    pub width  : Unit<Px>,
    pub height : Unit<Px>,
    pub depth  : Unit<Px>,
    contents   : Vec<LayoutNode>,
}

impl HBox {
    pub fn new() -> HBox {
        HBox::default()
    }

    pub fn add_node(&mut self, node : LayoutNode) {
        self.width += node.width;
        self.height = Unit::max(self.height, node.height + node.shift.max(Unit::ZERO));
        self.depth  = Unit::max(self.depth,  node.depth  + (-node.shift).max(Unit::ZERO));
        self.contents.push(node);
    }

    pub fn build(self) -> LayoutNode {
        LayoutNode {
            width  : self.width,
            height : self.height,
            depth  : self.depth,
            shift  : Unit::ZERO,
            node   : LayoutVariant::HBox(self.contents),
        }
    }
}

/// Accumulates the children of a vertical box. The box sits on the bottom of its last child.
#[derive(Debug, Default)]
pub struct VBox {
    pub width  : Unit<Px>,
    pub height : Unit<Px>,
    shift      : Unit<Px>,
    contents   : Vec<LayoutNode>,
}

impl VBox {
    pub fn new() -> VBox {
        VBox::default()
    }

    pub fn add_node(&mut self, node : LayoutNode) {
        self.width = Unit::max(self.width, node.width);
        self.height += node.total_height();
        self.contents.push(node);
    }

    pub fn set_shift(&mut self, shift : Unit<Px>) {
        self.shift = shift;
    }

    pub fn build(self) -> LayoutNode {
        LayoutNode {
            width  : self.width,
            height : self.height,
            depth  : Unit::ZERO,
            shift  : self.shift,
            node   : LayoutVariant::VBox(self.contents),
        }
    }
}

macro_rules! vbox {
    (shift: $shift:expr; $($node:expr),*) => ({
        let mut _vbox = $crate::layout::builders::VBox::new();
        $( _vbox.add_node($node); )*
        _vbox.set_shift($shift);
        _vbox.build()
    });

    ( $($node:expr),* ) => ({
        let mut _vbox = $crate::layout::builders::VBox::new();
        $( _vbox.add_node($node); )*
        _vbox.build()
    });
}

macro_rules! hbox {
    ( $($node:expr),* ) => ({
        let mut _hbox = $crate::layout::builders::HBox::new();
        $( _hbox.add_node($node); )*
        _hbox.build()
    });
}

macro_rules! rule {
    (width: $width:expr, height: $height:expr) => (
        rule!(width: $width, height: $height, depth: $crate::dimensions::Unit::ZERO)
    );

    (width: $width:expr, height: $height:expr, depth: $depth:expr) => (
        $crate::layout::LayoutNode {
            width  : $width,
            height : $height,
            depth  : $depth,
            shift  : $crate::dimensions::Unit::ZERO,
            node   : $crate::layout::LayoutVariant::Rule,
        }
    );
}

macro_rules! kern {
    (horz: $width:expr) => (
        $crate::layout::LayoutNode {
            width  : $width,
            height : $crate::dimensions::Unit::ZERO,
            depth  : $crate::dimensions::Unit::ZERO,
            shift  : $crate::dimensions::Unit::ZERO,
            node   : $crate::layout::LayoutVariant::Space,
        }
    );

    (vert: $height:expr) => (
        $crate::layout::LayoutNode {
            width  : $crate::dimensions::Unit::ZERO,
            height : $height,
            depth  : $crate::dimensions::Unit::ZERO,
            shift  : $crate::dimensions::Unit::ZERO,
            node   : $crate::layout::LayoutVariant::Space,
        }
    );
}
