//! The syntax tree produced by the parser

use super::environments::MatrixKind;


/// A node of the syntax tree. Every node owns its children ; there is no sharing between subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseNode {
    /// Literal characters, e.g. `x`, `12` or `+`
    Text(String),
    /// A command that is laid out as a single glyph, e.g. `\alpha` ; the name is stored without its backslash
    Symbol(String),
    /// `\frac{numerator}{denominator}`
    Fraction {
        /// Upper part of the fraction
        numerator   : Box<ParseNode>,
        /// Lower part of the fraction
        denominator : Box<ParseNode>,
    },
    /// A base with at most one subscript and at most one superscript
    Script {
        /// Node to which the scripts are attached
        base        : Box<ParseNode>,
        /// Payload of `_`
        subscript   : Option<Box<ParseNode>>,
        /// Payload of `^`
        superscript : Option<Box<ParseNode>>,
    },
    /// An ordered sequence of nodes laid out side by side
    Group(Vec<ParseNode>),
    /// `\sqrt[index]{content}`
    Sqrt {
        /// Radicand
        content : Box<ParseNode>,
        /// Optional degree of the root
        index   : Option<Box<ParseNode>>,
    },
    /// `\left<left> content \right<right>` ; an empty glyph stands for the null delimiter `.`
    Delimiter {
        /// Opening glyph
        left    : String,
        /// Enclosed content
        content : Box<ParseNode>,
        /// Closing glyph
        right   : String,
    },
    /// Horizontal space, in em
    Space(f64),
    /// `\text{..}`
    TextMode(Box<ParseNode>),
    /// `\mathbb{..}`
    Mathbb(Box<ParseNode>),
    /// A matrix-like environment, rows in reading order
    Matrix {
        /// Cells, row by row
        rows : Vec<Vec<ParseNode>>,
        /// Which environment produced the matrix
        kind : MatrixKind,
    },
    /// `\overline{..}`
    Overline(Box<ParseNode>),
    /// `\underline{..}`
    Underline(Box<ParseNode>),
}

impl ParseNode {
    /// The empty node used to stand in for a missing operand
    pub fn empty() -> Self {
        ParseNode::Text(String::new())
    }

    /// Collapses a sequence of nodes: a single node stands for itself, anything else becomes a [`ParseNode::Group`]
    pub fn collapse(mut nodes : Vec<ParseNode>) -> Self {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        ParseNode::Group(nodes)
    }

    /// Returns true if the node is a (possibly empty) text node or an empty group
    pub fn is_empty(&self) -> bool {
        match self {
            ParseNode::Text(text)   => text.is_empty(),
            ParseNode::Group(nodes) => nodes.is_empty(),
            _ => false,
        }
    }

    /// Depth-first search for a node satisfying `predicate`
    pub fn find(&self, predicate : &impl Fn(&ParseNode) -> bool) -> Option<&ParseNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(predicate))
    }

    /// Immediate children of the node, in reading order
    pub fn children(&self) -> Vec<&ParseNode> {
        match self {
            ParseNode::Text(_) | ParseNode::Symbol(_) | ParseNode::Space(_) => Vec::new(),
            ParseNode::Fraction { numerator, denominator } => vec![numerator, denominator],
            ParseNode::Script { base, subscript, superscript } => {
                let mut children = vec![base.as_ref()];
                children.extend(subscript.as_deref());
                children.extend(superscript.as_deref());
                children
            },
            ParseNode::Group(nodes) => nodes.iter().collect(),
            ParseNode::Sqrt { content, index } => {
                let mut children : Vec<&ParseNode> = index.as_deref().into_iter().collect();
                children.push(content);
                children
            },
            ParseNode::Delimiter { content, .. } => vec![content],
            ParseNode::TextMode(node)
            | ParseNode::Mathbb(node)
            | ParseNode::Overline(node)
            | ParseNode::Underline(node) => vec![node],
            ParseNode::Matrix { rows, .. } => rows.iter().flatten().collect(),
        }
    }
}
