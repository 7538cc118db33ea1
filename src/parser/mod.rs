//! Parses strings representing LateX formulas into [`ParseNode`]'s
//!
//! Defines the [`parse`] function to parse TeX into renderable [`ParseNode`].
//! More fine-grained customization is offered by the more basic [`Parser`] struct, which allows extra symbols.
//!
//! Parsing never fails: malformed input (unbalanced braces, missing `\right`, unterminated environments)
//! is recovered from locally, and the problems are reported in [`Parsed::errors`].

#[deny(missing_docs)]
pub mod nodes;
#[deny(missing_docs)]
pub mod symbols;
#[deny(missing_docs)]
pub mod lexer;
#[deny(missing_docs)]
pub mod error;
pub mod environments;

pub use self::nodes::ParseNode;

use self::error::ParseError;
use self::lexer::{Token, TokenKind, tokenize};
use self::symbols::SymbolRegistry;


/// The outcome of parsing: a tree that is always usable, and the list of problems met along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parsed {
    /// Root of the syntax tree
    pub root   : ParseNode,
    /// Errors recovered from, in the order they were met
    pub errors : Vec<ParseError>,
}

impl Parsed {
    /// True if parsing did not need to recover from any error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}


/// Parses a LaTeX formula. Convenience wrapper around [`tokenize`] and [`parse_tokens`].
pub fn parse(input: &str) -> Parsed {
    parse_tokens(&tokenize(input))
}

/// Parses a sequence of tokens, as produced by [`tokenize`]
pub fn parse_tokens(tokens: &[Token<'_>]) -> Parsed {
    Parser::new(tokens).parse()
}


// Spacing commands, in em
const THIN_SPACE   : f64 = 3. / 18.;
const MEDIUM_SPACE : f64 = 4. / 18.;
const THICK_SPACE  : f64 = 5. / 18.;

/// Deepest nesting of groups and commands; anything deeper is dropped
pub const MAX_NESTING : usize = 64;

/// Font commands that only change the style of their argument ; the style itself is not modeled
const STYLE_ONLY_COMMANDS : &[&str] = &[
    "mathrm", "mathbf", "mathit", "mathsf", "mathtt", "mathcal", "boldsymbol", "operatorname",
];

/// What terminates a sequence of expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Until {
    /// Only the end of input
    EndOfInput,
    /// `}`
    CloseBrace,
    /// `)`
    CloseParen,
    /// `]`
    CloseBracket,
    /// `\right`
    Right,
    /// `\end`
    End,
    /// `&`, `\\` or `\end`
    Cell,
}

impl Until {
    fn stops_at(self, token : &Token<'_>) -> bool {
        match self {
            Until::EndOfInput   => false,
            Until::CloseBrace   => token.kind == TokenKind::CloseBrace,
            Until::CloseParen   => token.kind == TokenKind::CloseParen,
            Until::CloseBracket => token.kind == TokenKind::CloseBracket,
            Until::Right        => token.is_command("right"),
            Until::End          => token.is_command("end"),
            Until::Cell         =>
                matches!(token.kind, TokenKind::Ampersand | TokenKind::RowBreak)
                || token.is_command("end"),
        }
    }
}


/// A recursive-descent parser with one token of lookahead.
/// The lifetime `'a` is for the borrow of the tokens and of the symbol registry.
pub struct Parser<'a> {
    tokens  : &'a [Token<'a>],
    cursor  : usize,
    /// Remainder of a text token split by a delimiter, e.g. `x` in `\left|x`
    pending : Option<Token<'a>>,
    symbols : &'a SymbolRegistry,
    errors  : Vec<ParseError>,
    /// Groups and commands currently open
    depth   : usize,
    too_deep_reported : bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser from a token sequence.
    pub fn new(tokens : &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            cursor  : 0,
            pending : None,
            symbols : SymbolRegistry::builtin(),
            errors  : Vec::new(),
            depth   : 0,
            too_deep_reported : false,
        }
    }

    /// Resolves command names through `symbols` rather than the built-in table only
    pub fn with_symbols(mut self, symbols : &'a SymbolRegistry) -> Self {
        self.symbols = symbols;
        self
    }

    /// Parses the tokens provided. This is the main API entry point for parsing.
    pub fn parse(mut self) -> Parsed {
        let nodes = self.collect(Until::EndOfInput);
        if !self.errors.is_empty() {
            debug!("parse recovered from {} error(s)", self.errors.len());
        }
        Parsed {
            root   : ParseNode::collapse(nodes),
            errors : self.errors,
        }
    }

    // ----------------------- TOKEN STREAM ------------------------------

    fn peek(&self) -> Token<'a> {
        if let Some(token) = self.pending {
            return token;
        }
        match self.tokens.get(self.cursor) {
            Some(token) => *token,
            None => {
                let end = self.tokens.last().map_or(0, Token::end);
                Token::new(TokenKind::EndOfInput, "", end)
            }
        }
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if self.pending.take().is_none() && token.kind != TokenKind::EndOfInput {
            self.cursor += 1;
        }
        token
    }

    fn error(&mut self, message : impl Into<String>, position : usize) {
        let error = ParseError::new(message, position);
        debug!("recovering from parse error: {}", error);
        self.errors.push(error);
    }

    fn resolve_symbol(&self, name : &str) -> Option<&'a str> {
        self.symbols.get(name)
    }

    // ----------------------- GRAMMAR ------------------------------

    /// Collects expressions until `until` or the end of input, neither of which is consumed
    fn collect(&mut self, until : Until) -> Vec<ParseNode> {
        let mut nodes = Vec::new();
        loop {
            let token = self.peek();
            if token.kind == TokenKind::EndOfInput || until.stops_at(&token) {
                return nodes;
            }

            match self.parse_expression() {
                Some(node) => nodes.push(node),
                None       => self.recover(token, until, &mut nodes),
            }
        }
    }

    /// Deals with a token that starts no expression ; always consumes it
    fn recover(&mut self, token : Token<'a>, until : Until, nodes : &mut Vec<ParseNode>) {
        self.advance();
        match token.kind {
            TokenKind::OpenBracket | TokenKind::CloseBracket | TokenKind::CloseParen =>
                nodes.push(ParseNode::Text(token.text.to_string())),
            TokenKind::Ampersand | TokenKind::RowBreak if until == Until::End =>
                trace!("ignoring {} in environment", token),
            TokenKind::CloseBrace =>
                self.error("unmatched '}'", token.position),
            TokenKind::Ampersand =>
                self.error("'&' outside of a matrix", token.position),
            TokenKind::RowBreak =>
                self.error(r"'\\' outside of a matrix", token.position),
            _ =>
                self.error(format!("unexpected {}", token), token.position),
        }
    }

    /// A primary followed by any number of `_` and `^` ; each script kind keeps its last occurrence
    fn parse_expression(&mut self) -> Option<ParseNode> {
        let base = match self.peek().kind {
            TokenKind::Subscript | TokenKind::Superscript => ParseNode::empty(),
            _ => self.parse_primary()?,
        };

        let mut subscript   = None;
        let mut superscript = None;
        loop {
            let token = self.peek();
            let slot = match token.kind {
                TokenKind::Subscript   => &mut subscript,
                TokenKind::Superscript => &mut superscript,
                _ => break,
            };
            self.advance();

            let payload = match self.parse_primary() {
                Some(node) => node,
                None => {
                    self.error(format!("missing argument after '{}'", token.text), token.position);
                    ParseNode::empty()
                }
            };
            if slot.is_some() {
                debug!("'{}' at byte {} overwrites a previous script", token.text, token.position);
            }
            *slot = Some(Box::new(payload));
        }

        if subscript.is_none() && superscript.is_none() {
            return Some(base);
        }
        Some(ParseNode::Script {
            base : Box::new(base),
            subscript,
            superscript,
        })
    }

    fn parse_primary(&mut self) -> Option<ParseNode> {
        let token = self.peek();
        match token.kind {
            TokenKind::Text
            | TokenKind::BinaryOperator
            | TokenKind::RelationOperator
            | TokenKind::Punctuation => {
                self.advance();
                Some(ParseNode::Text(token.text.to_string()))
            },
            TokenKind::Command | TokenKind::OpenBrace | TokenKind::OpenParen => {
                self.advance();
                if self.depth >= MAX_NESTING {
                    self.too_deep(token);
                    return Some(ParseNode::empty());
                }
                self.depth += 1;
                let node = self.parse_nested(token);
                self.depth -= 1;
                Some(node)
            },
            _ => None,
        }
    }

    /// A command or a bracketed group, whose first token has just been consumed
    fn parse_nested(&mut self, token : Token<'a>) -> ParseNode {
        match token.kind {
            TokenKind::OpenBrace => {
                let children = self.collect(Until::CloseBrace);
                self.expect_closing(TokenKind::CloseBrace, "missing '}'", token.position);
                ParseNode::collapse(children)
            },
            TokenKind::OpenParen => {
                let mut children = vec![ParseNode::Text("(".to_string())];
                children.extend(self.collect(Until::CloseParen));
                self.expect_closing(TokenKind::CloseParen, "missing ')'", token.position);
                children.push(ParseNode::Text(")".to_string()));
                ParseNode::Group(children)
            },
            _ => self.parse_command(token),
        }
    }

    /// Past [`MAX_NESTING`], tokens opening a group or a command are dropped one by one. Reported once.
    fn too_deep(&mut self, token : Token<'a>) {
        if !self.too_deep_reported {
            self.too_deep_reported = true;
            self.error(format!("nesting deeper than {} levels", MAX_NESTING), token.position);
        }
        else {
            trace!("dropping {} past the nesting limit", token);
        }
    }

    fn expect_closing(&mut self, kind : TokenKind, message : &str, opened_at : usize) {
        if self.peek().kind == kind {
            self.advance();
        }
        else {
            self.error(message, opened_at);
        }
    }

    /// Parses one operand of `command` ; a missing operand is recorded and replaced by an empty node
    fn required_argument(&mut self, command : Token<'a>) -> ParseNode {
        match self.parse_primary() {
            Some(node) => node,
            None => {
                self.error(format!(r"missing argument for \{}", command.text), command.position);
                ParseNode::empty()
            }
        }
    }

    /// Dispatches on a command whose token has just been consumed
    fn parse_command(&mut self, command : Token<'a>) -> ParseNode {
        let name = command.text;
        match name {
            "frac" | "dfrac" | "tfrac" => {
                let numerator   = self.required_argument(command);
                let denominator = self.required_argument(command);
                ParseNode::Fraction {
                    numerator   : Box::new(numerator),
                    denominator : Box::new(denominator),
                }
            },
            "sqrt" => {
                let index = if self.peek().kind == TokenKind::OpenBracket {
                    let open = self.advance();
                    let index = self.collect(Until::CloseBracket);
                    self.expect_closing(TokenKind::CloseBracket, "missing ']'", open.position);
                    Some(Box::new(ParseNode::collapse(index)))
                }
                else {
                    None
                };
                let content = self.required_argument(command);
                ParseNode::Sqrt { content : Box::new(content), index }
            },
            "left"   => self.parse_left_right(command),
            "middle" => {
                let glyph = self.read_delimiter().unwrap_or_else(|| {
                    self.error(r"missing delimiter after \middle", command.position);
                    String::new()
                });
                ParseNode::Text(glyph)
            },
            "right" => {
                self.error(r"\right without matching \left", command.position);
                ParseNode::Text(self.read_delimiter().unwrap_or_else(|| ")".to_string()))
            },

            "quad"           => ParseNode::Space(1.0),
            "qquad" | "qqad" => ParseNode::Space(2.0),
            ","              => ParseNode::Space(THIN_SPACE),
            ":" | ">"        => ParseNode::Space(MEDIUM_SPACE),
            ";"              => ParseNode::Space(THICK_SPACE),
            "!"              => ParseNode::Space(- THIN_SPACE),
            " "              => ParseNode::Space(0.25),
            "enspace"        => ParseNode::Space(0.5),
            "displaystyle" | "textstyle" | "scriptstyle" => ParseNode::Space(0.),

            "text" | "mbox" | "textrm" => self.parse_text_mode(command),
            "mathbb"    => ParseNode::Mathbb(Box::new(self.required_argument(command))),
            "overline"  => ParseNode::Overline(Box::new(self.required_argument(command))),
            "underline" => ParseNode::Underline(Box::new(self.required_argument(command))),
            _ if STYLE_ONLY_COMMANDS.contains(&name) => self.required_argument(command),

            "begin" => self.parse_environment(command),
            "end"   => {
                let env_name = self.environment_name(command);
                self.error(format!(r"\end{{{}}} without matching \begin", env_name), command.position);
                ParseNode::Group(Vec::new())
            },

            _ => ParseNode::Symbol(name.to_string()),
        }
    }

    /// `\left<delim> ... \right<delim>`, the `\left` token having been consumed
    fn parse_left_right(&mut self, left_token : Token<'a>) -> ParseNode {
        let left = self.read_delimiter().unwrap_or_else(|| {
            debug!(r"no delimiter after \left at byte {}, defaulting to '('", left_token.position);
            "(".to_string()
        });
        let content = self.collect(Until::Right);

        let right = if self.peek().is_command("right") {
            self.advance();
            self.read_delimiter()
        }
        else {
            self.error(r"missing \right", left_token.position);
            None
        };
        let right = right.unwrap_or_else(|| ")".to_string());

        ParseNode::Delimiter {
            left,
            content : Box::new(ParseNode::collapse(content)),
            right,
        }
    }

    /// Reads the delimiter following `\left`, `\middle` or `\right`. The null delimiter `.` yields an empty glyph.
    /// Only the first character of a text token is used, the rest is left in the stream.
    fn read_delimiter(&mut self) -> Option<String> {
        let token = self.peek();
        match token.kind {
            TokenKind::OpenBracket
            | TokenKind::CloseBracket
            | TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::Punctuation
            | TokenKind::BinaryOperator
            | TokenKind::RelationOperator => {
                self.advance();
                if token.text == "." {
                    Some(String::new())
                }
                else {
                    Some(token.text.to_string())
                }
            },
            TokenKind::Text => {
                self.advance();
                let mut chars = token.text.chars();
                let first = chars.next()?;
                let rest  = chars.as_str();
                if !rest.is_empty() {
                    self.pending = Some(Token::new(TokenKind::Text, rest, token.position + first.len_utf8()));
                }
                Some(first.to_string())
            },
            TokenKind::Command => {
                self.advance();
                Some(self.resolve_symbol(token.text).unwrap_or(token.text).to_string())
            },
            _ => None,
        }
    }

    /// `\text{...}` parses its argument as usual, with a single space wherever the source had whitespace
    /// between two tokens; neighbouring text runs are joined
    fn parse_text_mode(&mut self, command : Token<'a>) -> ParseNode {
        if self.peek().kind != TokenKind::OpenBrace {
            return ParseNode::TextMode(Box::new(self.required_argument(command)));
        }

        let open = self.advance();
        let mut nodes = Vec::new();
        let mut previous_end = open.end();
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::EndOfInput => {
                    self.error("missing '}'", open.position);
                    break;
                },
                TokenKind::CloseBrace => {
                    self.advance();
                    break;
                },
                _ => (),
            }

            if token.position > previous_end && !nodes.is_empty() {
                nodes.push(ParseNode::Text(" ".to_string()));
            }
            match self.parse_expression() {
                Some(node) => nodes.push(node),
                None       => self.recover(token, Until::CloseBrace, &mut nodes),
            }
            previous_end = self.consumed_end();
        }

        ParseNode::TextMode(Box::new(ParseNode::collapse(join_text_runs(nodes))))
    }

    fn consumed_end(&self) -> usize {
        self.cursor.checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or(0, Token::end)
    }
}

fn join_text_runs(nodes : Vec<ParseNode>) -> Vec<ParseNode> {
    let mut joined : Vec<ParseNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(ParseNode::Text(run)), ParseNode::Text(next)) = (joined.last_mut(), &node) {
            run.push_str(next);
            continue;
        }
        joined.push(node);
    }
    joined
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::environments::MatrixKind;

    fn text(s : &str) -> ParseNode {
        ParseNode::Text(s.to_string())
    }

    fn symbol(s : &str) -> ParseNode {
        ParseNode::Symbol(s.to_string())
    }

    #[test]
    fn clean_and_recovered_cases() {
        let clean_cases = vec![
            r"x^2 + y^2 = z^2",
            r"\frac{a}{b}",
            r"\frac\alpha\beta",
            r"\sqrt[3]{x}",
            r"\left( \frac{1}{2} \right)",
            r"\left. x \right|",
            r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}",
            r"\begin{align} a & b \\ c \end{align}",
            r"\text{if } x > 0",
            r"\mathbb{R}",
            r"\{ x \}",
            r"[0, 1)",
            r"x_1^2",
        ];
        for case in clean_cases {
            eprintln!("{} should parse cleanly", case);
            let parsed = parse(case);
            assert!(parsed.is_clean(), "{:?}", parsed.errors);
        }

        let recovered_cases = vec![
            r"{a",
            r"a}",
            r"\frac{a}",
            r"\sqrt",
            r"x^",
            r"\left( x",
            r"\right)",
            r"\end{matrix}",
            r"a & b",
            r"a \\ b",
            r"\begin{pmatrix} a",
            r"\begin{pmatrix} a \end{bmatrix}",
            r"\begin",
            r"(a",
        ];
        for case in recovered_cases {
            eprintln!("{} should record errors", case);
            let parsed = parse(case);
            assert!(!parsed.is_clean());
        }
    }

    #[test]
    fn equality_cases() {
        let equality_cases = vec![
            (r"\frac{1}{2}", r"\frac 1 2"),
            (r"\sqrt2", r"\sqrt{2}"),
            (r"x_1^2", r"x^2_1"),
            (r"{{a}}", r"a"),
            (r"\mathrm{d}x", r"{d}x"),
            (r"a     +   b", r"a+b"),
        ];
        for (case1, case2) in equality_cases {
            eprintln!("{} == {}", case1, case2);
            assert_eq!(parse(case1), parse(case2));
        }

        let inequality_cases = vec![
            (r"\sqrt2_3", r"\sqrt{2_3}"),
            (r"x^{2}_{1}", r"x^{21}"),
        ];
        for (case1, case2) in inequality_cases {
            eprintln!("{} != {}", case1, case2);
            assert!(parse(case1) != parse(case2));
        }
    }

    #[test]
    fn unbalanced_brace_keeps_content() {
        let parsed = parse("{a");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].position, 0);
        assert!(parsed.root.find(&|node| *node == text("a")).is_some());
    }

    #[test]
    fn scripts_overwrite() {
        let parsed = parse("x_1_2^3");
        assert!(parsed.is_clean());
        assert_eq!(parsed.root, ParseNode::Script {
            base        : Box::new(text("x")),
            subscript   : Some(Box::new(text("2"))),
            superscript : Some(Box::new(text("3"))),
        });
    }

    #[test]
    fn leading_script_gets_empty_base() {
        let parsed = parse("^2");
        assert!(parsed.is_clean());
        assert_eq!(parsed.root, ParseNode::Script {
            base        : Box::new(text("")),
            subscript   : None,
            superscript : Some(Box::new(text("2"))),
        });
    }

    #[test]
    fn parentheses_are_kept() {
        assert_eq!(
            parse("(a+b)").root,
            ParseNode::Group(vec![text("("), text("a"), text("+"), text("b"), text(")")]),
        );
        let parsed = parse("(a");
        assert_eq!(parsed.root, ParseNode::Group(vec![text("("), text("a"), text(")")]));
        assert_eq!(parsed.errors.len(), 1);
    }

    #[test]
    fn stray_brackets_become_text() {
        let parsed = parse("[a)");
        assert!(parsed.is_clean());
        assert_eq!(parsed.root, ParseNode::Group(vec![text("["), text("a"), text(")")]));
    }

    #[test]
    fn fraction_and_sqrt() {
        assert_eq!(parse(r"\frac{a}{b}").root, ParseNode::Fraction {
            numerator   : Box::new(text("a")),
            denominator : Box::new(text("b")),
        });
        assert_eq!(parse(r"\sqrt[n]{x}").root, ParseNode::Sqrt {
            content : Box::new(text("x")),
            index   : Some(Box::new(text("n"))),
        });

        let parsed = parse(r"\frac{a}");
        assert_eq!(parsed.root, ParseNode::Fraction {
            numerator   : Box::new(text("a")),
            denominator : Box::new(text("")),
        });
    }

    #[test]
    fn digit_runs_are_one_operand() {
        let parsed = parse(r"\frac12");
        assert_eq!(parsed.root, ParseNode::Fraction {
            numerator   : Box::new(text("12")),
            denominator : Box::new(text("")),
        });
        assert_eq!(parsed.errors, vec![ParseError::new(r"missing argument for \frac", 0)]);
    }

    fn nesting_depth(node : &ParseNode) -> usize {
        1 + node.children().into_iter().map(nesting_depth).max().unwrap_or(0)
    }

    #[test]
    fn deep_nesting_is_cut_off() {
        let braces = "{".repeat(20_000);
        let parsed = parse(&braces);
        let too_deep : Vec<&ParseError> = parsed.errors.iter()
            .filter(|e| e.message.starts_with("nesting deeper"))
            .collect();
        assert_eq!(too_deep.len(), 1);
        assert_eq!(too_deep[0].position, MAX_NESTING);

        let radicals = r"\sqrt{".repeat(5_000);
        let parsed = parse(&radicals);
        assert!(!parsed.is_clean());
        assert!(nesting_depth(&parsed.root) <= MAX_NESTING);

        // shallow nesting is untouched
        let nested = format!("{}x{}", "{".repeat(MAX_NESTING), "}".repeat(MAX_NESTING));
        let parsed = parse(&nested);
        assert!(parsed.is_clean(), "{:?}", parsed.errors);
        assert_eq!(parsed.root, text("x"));
    }

    #[test]
    fn left_right_delimiters() {
        assert_eq!(parse(r"\left| x \right.").root, ParseNode::Delimiter {
            left    : "|".to_string(),
            content : Box::new(text("x")),
            right   : String::new(),
        });
        assert_eq!(parse(r"\left\{ x \right\rangle").root, ParseNode::Delimiter {
            left    : "{".to_string(),
            content : Box::new(text("x")),
            right   : "⟩".to_string(),
        });
        // the rest of a text token stays in the stream
        assert_eq!(parse(r"\left|x\right|").root, ParseNode::Delimiter {
            left    : "|".to_string(),
            content : Box::new(text("x")),
            right   : "|".to_string(),
        });

        let parsed = parse(r"\left[ a");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.root, ParseNode::Delimiter {
            left    : "[".to_string(),
            content : Box::new(text("a")),
            right   : ")".to_string(),
        });
    }

    #[test]
    fn spacing_commands() {
        assert_eq!(parse(r"\quad").root, ParseNode::Space(1.0));
        assert_eq!(parse(r"\qquad").root, ParseNode::Space(2.0));
        assert_eq!(parse(r"\qqad").root, ParseNode::Space(2.0));
        assert_eq!(parse(r"\,").root, ParseNode::Space(THIN_SPACE));
        assert_eq!(parse(r"\!").root, ParseNode::Space(-THIN_SPACE));
        assert_eq!(parse(r"\displaystyle").root, ParseNode::Space(0.));
    }

    #[test]
    fn text_command() {
        assert_eq!(
            parse(r"\text{if  and   only if}").root,
            ParseNode::TextMode(Box::new(text("if and only if"))),
        );
        assert_eq!(
            parse(r"\text{x=1,y}").root,
            ParseNode::TextMode(Box::new(text("x=1,y"))),
        );
        assert_eq!(parse(r"\text a").root, ParseNode::TextMode(Box::new(text("a"))));
    }

    #[test]
    fn text_keeps_nested_structure() {
        assert_eq!(
            parse(r"\text{\frac{a}{b}}").root,
            ParseNode::TextMode(Box::new(ParseNode::Fraction {
                numerator   : Box::new(text("a")),
                denominator : Box::new(text("b")),
            })),
        );
        assert_eq!(
            parse(r"\text{area of \alpha is}").root,
            ParseNode::TextMode(Box::new(ParseNode::Group(vec![
                text("area of "),
                symbol("alpha"),
                text(" is"),
            ]))),
        );

        let parsed = parse(r"\text{if } x");
        assert!(parsed.is_clean(), "{:?}", parsed.errors);
        assert_eq!(
            parsed.root,
            ParseNode::Group(vec![ParseNode::TextMode(Box::new(text("if"))), text("x")]),
        );

        let parsed = parse(r"\text{abc");
        assert_eq!(parsed.errors, vec![ParseError::new("missing '}'", 5)]);
        assert_eq!(parsed.root, ParseNode::TextMode(Box::new(text("abc"))));
    }

    #[test]
    fn unknown_commands_become_symbols() {
        assert_eq!(parse(r"\alpha").root, symbol("alpha"));
        assert_eq!(parse(r"\foo").root, symbol("foo"));
        assert_eq!(parse(r"\mathbb{R}").root, ParseNode::Mathbb(Box::new(text("R"))));
    }

    #[test]
    fn stray_end_and_right() {
        let parsed = parse(r"a \end{matrix} b");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.root, ParseNode::Group(vec![text("a"), ParseNode::Group(vec![]), text("b")]));

        let parsed = parse(r"a \right]");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.root, ParseNode::Group(vec![text("a"), text("]")]));
    }

    #[test]
    fn custom_symbols() {
        let registry = SymbolRegistry::new().with("R", "ℝ");
        let tokens   = tokenize(r"\left\R x \right\R");
        let parsed   = Parser::new(&tokens).with_symbols(&registry).parse();
        assert_eq!(parsed.root, ParseNode::Delimiter {
            left    : "ℝ".to_string(),
            content : Box::new(text("x")),
            right   : "ℝ".to_string(),
        });
    }

    #[test]
    fn matrix_environment() {
        let parsed = parse(r"\begin{pmatrix}a&b\\c&d\end{pmatrix}");
        assert!(parsed.is_clean());
        assert_eq!(parsed.root, ParseNode::Matrix {
            rows : vec![vec![text("a"), text("b")], vec![text("c"), text("d")]],
            kind : MatrixKind::PMatrix,
        });
    }

    #[test]
    fn deterministic() {
        let input = r"\frac{\left( a \right.}{\begin{bmatrix} 1 & 2 \end{vmatrix}} } x^^";
        assert_eq!(parse(input), parse(input));
    }
}
