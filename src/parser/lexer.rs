//! Producing tokens for the parser
//!
//! The lexer is total: any input yields a sequence of tokens terminated by exactly one
//! [`TokenKind::EndOfInput`]. Characters it does not recognize are absorbed into [`TokenKind::Text`] runs.
use std::fmt;


/// The lexical category of a [`Token`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of characters that are neither structural, classified nor whitespace
    Text,
    /// A TeX command, e.g. `\frac` or `\alpha` ; also control symbols like `\{` or `\,`
    Command,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `_`
    Subscript,
    /// `^`
    Superscript,
    /// `&`, the column separator of matrices
    Ampersand,
    /// `\\`, the row separator of matrices
    RowBreak,
    /// A binary operator such as `+` or `×`
    BinaryOperator,
    /// A relation such as `=` or `≤`
    RelationOperator,
    /// A punctuation mark such as `,` or `…`
    Punctuation,
    /// End of input
    EndOfInput,
}

/// A token for LaTeX
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Category of the token
    pub kind: TokenKind,
    /// Source text of the token ; for commands, the command name without its backslash
    pub text: &'a str,
    /// Byte offset in the input where the token begins
    pub position: usize,
}

impl<'a> Token<'a> {
    /// Creates a new token
    pub const fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self { kind, text, position }
    }

    /// Byte offset in the input just past the end of the token
    pub fn end(&self) -> usize {
        match self.kind {
            TokenKind::Command => self.position + 1 + self.text.len(),
            _ => self.position + self.text.len(),
        }
    }

    /// Returns true if the token is the command `\name`
    pub fn is_command(&self, name: &str) -> bool {
        self.kind == TokenKind::Command && self.text == name
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Command    => write!(f, r#""\{}""#, self.text),
            TokenKind::EndOfInput => write!(f, "end of input"),
            _                     => write!(f, "'{}'", self.text),
        }
    }
}


/// Spacing class of a single character. Shared by the lexer, which emits classified characters
/// as standalone tokens, and by the layout engine, which inserts spacing around them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `+ - * / × ÷ ⋅ ∘ ± ∓ ∧ ∨ ⊕ ⊗`
    Binary,
    /// `= ≠ < > ≤ ≥ ≈ ≡ ∼ ∝ ≪ ≫ ∈ ∉ ⊂ ⊃ ⊆ ⊇`
    Relation,
    /// `, ; : ! ? . …`
    Punctuation,
    /// Everything else
    Other,
}

const BINARY_OPERATORS : &[char] = &['+', '-', '*', '/', '×', '÷', '⋅', '∘', '±', '∓', '∧', '∨', '⊕', '⊗'];
const RELATIONS        : &[char] = &['=', '≠', '<', '>', '≤', '≥', '≈', '≡', '∼', '∝', '≪', '≫', '∈', '∉', '⊂', '⊃', '⊆', '⊇'];
const PUNCTUATION      : &[char] = &[',', ';', ':', '!', '?', '.', '…'];

/// Classifies a character as binary operator, relation, punctuation or other
pub fn char_class(c: char) -> CharClass {
    if BINARY_OPERATORS.contains(&c) {
        CharClass::Binary
    }
    else if RELATIONS.contains(&c) {
        CharClass::Relation
    }
    else if PUNCTUATION.contains(&c) {
        CharClass::Punctuation
    }
    else {
        CharClass::Other
    }
}

fn structural_kind(c: char) -> Option<TokenKind> {
    let kind = match c {
        '{' => TokenKind::OpenBrace,
        '}' => TokenKind::CloseBrace,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '_' => TokenKind::Subscript,
        '^' => TokenKind::Superscript,
        '&' => TokenKind::Ampersand,
        _   => return None,
    };
    Some(kind)
}

fn ends_text_run(c: char) -> bool {
    c == '\\'
    || c.is_whitespace()
    || structural_kind(c).is_some()
    || char_class(c) != CharClass::Other
}


/// Splits the input into tokens, cf [`Lexer`] for the rules.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer  = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done  = token.kind == TokenKind::EndOfInput;
        tokens.push(token);
        if done {
            break;
        }
    }
    trace!("lexed {} tokens from {:?}", tokens.len(), input);
    tokens
}


/// The main structure for producing tokens from an input string
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input  : & 'a str,
    offset : usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer positioned at the start of `input`
    pub fn new(input: &'a str) -> Lexer<'a> {
        Self { input, offset: 0 }
    }

    /// Returns the input that remains to be lexed
    pub fn input(&self) -> & 'a str {
        &self.input[self.offset ..]
    }

    /// Advances through the input so that the first character pointed to
    /// is not a whitespace
    pub fn consume_whitespace(&mut self) {
        let rest    = self.input();
        let trimmed = rest.trim_start();
        self.offset += rest.len() - trimmed.len();
    }

    /// Attempts parsing a control sequence like `\bla`, returning `bla`.
    /// A backslash followed by a non-letter yields that single character (e.g. `\{` yields `{`).
    /// Returns `None` without advancing if the input does not start with `\` or if the backslash is the last character.
    pub fn control_sequence(&mut self) -> Option<& 'a str> {
        let rest = self.input();
        let mut chars = rest.chars();
        if chars.next() != Some('\\') {
            return None;
        }

        let start_command = chars.as_str();
        let character = chars.next()?;

        // If the first character is non-alphabetic, that is the command and we return it
        if !character.is_ascii_alphabetic() {
            let name = &start_command[.. character.len_utf8()];
            self.offset += 1 + name.len();
            return Some(name);
        }

        // Otherwise, we keep looping while characters are ASCII alphabetic
        let length = start_command
            .find(|c : char| !c.is_ascii_alphabetic())
            .unwrap_or(start_command.len());
        let name = &start_command[.. length];
        self.offset += 1 + length;
        Some(name)
    }

    /// Produces the next token ; returns [`TokenKind::EndOfInput`] forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        self.consume_whitespace();
        let start = self.offset;
        let rest  = self.input();

        let first = match rest.chars().next() {
            Some(c) => c,
            None    => return Token::new(TokenKind::EndOfInput, "", start),
        };

        if first == '\\' {
            if rest.starts_with("\\\\") {
                self.offset += 2;
                return Token::new(TokenKind::RowBreak, &rest[.. 2], start);
            }
            return match self.control_sequence() {
                Some(name) => Token::new(TokenKind::Command, name, start),
                None => {
                    // a trailing backslash is kept as literal text
                    self.offset += 1;
                    Token::new(TokenKind::Text, &rest[.. 1], start)
                }
            };
        }

        let single = &rest[.. first.len_utf8()];
        if let Some(kind) = structural_kind(first) {
            self.offset += single.len();
            return Token::new(kind, single, start);
        }

        let classified = match char_class(first) {
            CharClass::Binary      => Some(TokenKind::BinaryOperator),
            CharClass::Relation    => Some(TokenKind::RelationOperator),
            CharClass::Punctuation => Some(TokenKind::Punctuation),
            CharClass::Other       => None,
        };
        if let Some(kind) = classified {
            self.offset += single.len();
            return Token::new(kind, single, start);
        }

        let length = rest[single.len() ..]
            .find(ends_text_run)
            .map_or(rest.len(), |idx| idx + single.len());
        self.offset += length;
        Token::new(TokenKind::Text, &rest[.. length], start)
    }
}
