//! Defines structs and parses TeX environments, e.g. `\begin{pmatrix}..\end{pmatrix}`
//!
//! Matrix-like environments produce a [`ParseNode::Matrix`] ; any other environment
//! is parsed as a plain group, its separators being ignored.

use std::fmt;

use super::lexer::{Token, TokenKind};
use super::{ParseNode, Parser, Until};


/// An enumeration of recognized matrix environments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixKind {
    /// `\begin{matrix} ... \end{matrix}`
    #[serde(rename = "matrix")]
    Matrix,
    /// `\begin{pmatrix} ... \end{pmatrix}`
    #[serde(rename = "pmatrix")]
    PMatrix,
    /// `\begin{bmatrix} ... \end{bmatrix}`
    #[serde(rename = "bmatrix")]
    BMatrix,
    /// `\begin{Bmatrix} ... \end{Bmatrix}`
    #[serde(rename = "Bmatrix")]
    BbMatrix,
    /// `\begin{vmatrix} ... \end{vmatrix}`
    #[serde(rename = "vmatrix")]
    VMatrix,
    /// `\begin{Vmatrix} ... \end{Vmatrix}`
    #[serde(rename = "Vmatrix")]
    VvMatrix,
    /// `\begin{cases} ... \end{cases}`
    #[serde(rename = "cases")]
    Cases,
}

impl MatrixKind {
    /// Given an environment name (e.g. "pmatrix"), returns the corresponding kind
    pub fn from_name(name : &str) -> Option<Self> {
        let kind = match name {
            "matrix"  => MatrixKind::Matrix,
            "pmatrix" => MatrixKind::PMatrix,
            "bmatrix" => MatrixKind::BMatrix,
            "Bmatrix" => MatrixKind::BbMatrix,
            "vmatrix" => MatrixKind::VMatrix,
            "Vmatrix" => MatrixKind::VvMatrix,
            "cases"   => MatrixKind::Cases,
            _ => return None,
        };
        Some(kind)
    }

    /// The name of the environment
    pub fn name(self) -> &'static str {
        match self {
            MatrixKind::Matrix   => "matrix",
            MatrixKind::PMatrix  => "pmatrix",
            MatrixKind::BMatrix  => "bmatrix",
            MatrixKind::BbMatrix => "Bmatrix",
            MatrixKind::VMatrix  => "vmatrix",
            MatrixKind::VvMatrix => "Vmatrix",
            MatrixKind::Cases    => "cases",
        }
    }

    /// The glyph drawn on the left of the grid, if any
    pub fn left_delimiter(self) -> Option<&'static str> {
        match self {
            MatrixKind::Matrix   => None,
            MatrixKind::PMatrix  => Some("("),
            MatrixKind::BMatrix  => Some("["),
            MatrixKind::BbMatrix => Some("{"),
            MatrixKind::VMatrix  => Some("|"),
            MatrixKind::VvMatrix => Some("‖"),
            MatrixKind::Cases    => Some("{"),
        }
    }

    /// The glyph drawn on the right of the grid, if any
    pub fn right_delimiter(self) -> Option<&'static str> {
        match self {
            MatrixKind::Matrix   => None,
            MatrixKind::PMatrix  => Some(")"),
            MatrixKind::BMatrix  => Some("]"),
            MatrixKind::BbMatrix => Some("}"),
            MatrixKind::VMatrix  => Some("|"),
            MatrixKind::VvMatrix => Some("‖"),
            MatrixKind::Cases    => None,
        }
    }

    /// How many delimiters are drawn around the grid
    pub fn delimiter_count(self) -> usize {
        self.left_delimiter().iter().count() + self.right_delimiter().iter().count()
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


impl<'a> Parser<'a> {
    /// `\begin{name} ... \end{name}`, the `\begin` token having been consumed
    pub(super) fn parse_environment(&mut self, begin : Token<'a>) -> ParseNode {
        let name = self.environment_name(begin);
        match MatrixKind::from_name(&name) {
            Some(kind) => self.parse_matrix(kind, begin),
            None       => self.parse_generic_environment(&name, begin),
        }
    }

    /// Reads the `{name}` argument of `\begin` or `\end` ; returns an empty name if there is none
    pub(super) fn environment_name(&mut self, command : Token<'a>) -> String {
        if self.peek().kind != TokenKind::OpenBrace {
            self.error(format!(r"expected '{{' after \{}", command.text), command.position);
            return String::new();
        }
        let open = self.advance();

        let mut name = String::new();
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::CloseBrace => {
                    self.advance();
                    break;
                },
                TokenKind::EndOfInput => {
                    self.error("missing '}'", open.position);
                    break;
                },
                _ => {
                    self.advance();
                    name.push_str(token.text);
                },
            }
        }
        name
    }

    fn parse_generic_environment(&mut self, name : &str, begin : Token<'a>) -> ParseNode {
        trace!("parsing environment '{}' as a group", name);
        let children = self.collect(Until::End);
        self.close_environment(name, begin);
        ParseNode::Group(children)
    }

    fn parse_matrix(&mut self, kind : MatrixKind, begin : Token<'a>) -> ParseNode {
        let mut rows = Vec::new();
        let mut row  = Vec::new();
        loop {
            let cell = self.collect(Until::Cell);
            row.push(ParseNode::collapse(cell));

            match self.peek().kind {
                TokenKind::Ampersand => {
                    self.advance();
                },
                TokenKind::RowBreak => {
                    self.advance();
                    rows.push(std::mem::take(&mut row));
                },
                _ => {
                    rows.push(row);
                    break;
                },
            }
        }

        // `\\` right before `\end` does not open a new row
        let trailing_empty_row = rows.len() > 1
            && rows.last().map_or(false, |last| last.len() == 1 && last[0].is_empty());
        if trailing_empty_row {
            rows.pop();
        }

        self.close_environment(kind.name(), begin);
        ParseNode::Matrix { rows, kind }
    }

    /// Consumes `\end{name}` ; a missing or mismatched end is recorded
    fn close_environment(&mut self, name : &str, begin : Token<'a>) {
        let token = self.peek();
        if !token.is_command("end") {
            self.error(format!(r"missing \end{{{}}}", name), begin.position);
            return;
        }

        self.advance();
        let end_name = self.environment_name(token);
        if end_name != name {
            self.error(
                format!(r"\begin{{{}}} closed by \end{{{}}}", name, end_name),
                token.position,
            );
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn text(s : &str) -> ParseNode {
        ParseNode::Text(s.to_string())
    }

    #[test]
    fn kinds_and_delimiters() {
        for name in ["matrix", "pmatrix", "bmatrix", "Bmatrix", "vmatrix", "Vmatrix", "cases"] {
            let kind = MatrixKind::from_name(name).unwrap();
            assert_eq!(kind.name(), name);
        }
        assert_eq!(MatrixKind::from_name("array"), None);
        assert_eq!(MatrixKind::Matrix.delimiter_count(), 0);
        assert_eq!(MatrixKind::Cases.delimiter_count(), 1);
        assert_eq!(MatrixKind::VvMatrix.delimiter_count(), 2);
        assert_eq!(serde_json::to_string(&MatrixKind::BbMatrix).unwrap(), r#""Bmatrix""#);
    }

    #[test]
    fn trailing_row_break_is_dropped() {
        let parsed = parse(r"\begin{bmatrix} 1 & 2 \\ 3 & 4 \\ \end{bmatrix}");
        assert!(parsed.is_clean());
        assert_eq!(parsed.root, ParseNode::Matrix {
            rows : vec![vec![text("1"), text("2")], vec![text("3"), text("4")]],
            kind : MatrixKind::BMatrix,
        });
    }

    #[test]
    fn cells_collapse_or_group() {
        let parsed = parse(r"\begin{matrix} a b & \end{matrix}");
        assert_eq!(parsed.root, ParseNode::Matrix {
            rows : vec![vec![ParseNode::Group(vec![text("a"), text("b")]), ParseNode::Group(vec![])]],
            kind : MatrixKind::Matrix,
        });
    }

    #[test]
    fn unterminated_matrix() {
        let parsed = parse(r"\begin{vmatrix} a & b");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].position, 0);
        assert_eq!(parsed.root, ParseNode::Matrix {
            rows : vec![vec![text("a"), text("b")]],
            kind : MatrixKind::VMatrix,
        });
    }

    #[test]
    fn generic_environment_is_a_group() {
        let parsed = parse(r"\begin{aligned} x &= 1 \\ y &= 2 \end{aligned}");
        assert!(parsed.is_clean());
        assert_eq!(parsed.root, ParseNode::Group(vec![
            text("x"), text("="), text("1"), text("y"), text("="), text("2"),
        ]));
    }

    #[test]
    fn mismatched_end_still_closes() {
        let parsed = parse(r"\begin{pmatrix} a \end{bmatrix} b");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.root, ParseNode::Group(vec![
            ParseNode::Matrix { rows : vec![vec![text("a")]], kind : MatrixKind::PMatrix },
            text("b"),
        ]));
    }
}
