//! The lexer, turning the input into a flat sequence of [`Token`]s.

use unicode_segmentation::UnicodeSegmentation;

/// A token of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// The literal source text of the token.
    pub content: &'a str,
    /// Byte offset of `content` in the input.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind<'a> {
    /// A control sequence. The name does not include the leading `\`, and is empty when the `\`
    /// is not followed by a letter.
    Command(&'a str),
    /// A single extended grapheme cluster, so that a letter and its combining marks stay
    /// together. `[` and `]` are text as well; whether they delimit an optional argument is up
    /// to the parser.
    Text(&'a str),
    LeftBrace,
    RightBrace,
    Superscript,
    Subscript,
    Ampersand,
    /// `\\`, the row separator of environments.
    RowBreak,
}

impl<'a> Token<'a> {
    /// Offset of the first byte following the token.
    pub fn end(&self) -> usize {
        self.offset + self.content.len()
    }

    /// Whether the token is the command with the given name.
    pub fn is_command(&self, name: &str) -> bool {
        matches!(self.kind, TokenKind::Command(cs) if cs == name)
    }

    /// Whether the token is the text token with the given content.
    pub fn is_text(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Text(t) if t == text)
    }

    /// The first character of a text token.
    pub fn text_char(&self) -> Option<char> {
        match self.kind {
            TokenKind::Text(t) => t.chars().next(),
            _ => None,
        }
    }
}

/// An iterator over the tokens of an input string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn token(&mut self, kind: TokenKind<'a>, len: usize) -> Token<'a> {
        let offset = self.position;
        self.position += len;
        Token {
            kind,
            content: &self.input[offset..self.position],
            offset,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.position..];
        let skipped = rest.len() - rest.trim_start_matches(is_blank).len();
        self.position += skipped;
        let rest = &self.input[self.position..];

        let next = rest.chars().next()?;
        Some(match next {
            '\\' => {
                let name_start = &rest[1..];
                if name_start.starts_with('\\') {
                    return Some(self.token(TokenKind::RowBreak, 2));
                }
                let name_len = name_start
                    .find(|c: char| !c.is_alphabetic())
                    .unwrap_or(name_start.len());
                let name = &name_start[..name_len];
                self.token(TokenKind::Command(name), name_len + 1)
            }
            '{' => self.token(TokenKind::LeftBrace, 1),
            '}' => self.token(TokenKind::RightBrace, 1),
            '^' => self.token(TokenKind::Superscript, 1),
            '_' => self.token(TokenKind::Subscript, 1),
            '&' => self.token(TokenKind::Ampersand, 1),
            _ => {
                let cluster = rest.graphemes(true).next().unwrap_or(rest);
                // Prepended characters cluster with anything, markup included.
                let len = cluster
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| is_blank(c) || "\\{}^_&".contains(c))
                    .map_or(cluster.len(), |(i, _)| i);
                self.token(TokenKind::Text(&rest[..len]), len)
            }
        })
    }
}

/// Tokenize the whole input.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
