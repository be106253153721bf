//! A module that implements the behavior of every command handled by the parser, other than plain
//! symbols and accents.

use crate::{
    attribute::Style,
    node::{ArrowKind, Brackets, Node},
};

use super::{
    error::ErrorKind,
    lex::{Token, TokenKind},
    tables::{self, Handler},
    Parser, Terminator,
};

/// Width, in `em`, of the space produced by `\ `.
const CONTROL_SPACE: f32 = 6. / 18.;

impl<'a> Parser<'a> {
    /// Apply the handler of the command `name`, whose token was just consumed.
    pub(super) fn handle(
        &mut self,
        handler: Handler,
        token: Token<'a>,
        name: &'a str,
        style: Style,
    ) -> Option<Node<'a>> {
        Some(match handler {
            Handler::Fraction => {
                let (numerator, denominator) = self.argument_pair(style);
                Node::Fraction {
                    numerator,
                    denominator,
                }
            }
            Handler::Binomial => {
                let (numerator, denominator) = self.argument_pair(style);
                Node::Binomial {
                    numerator,
                    denominator,
                }
            }
            Handler::Sqrt => {
                if self.optional_argument(style).is_some() {
                    log::debug!("ignoring the index of `\\sqrt`");
                }
                Node::Sqrt(Box::new(self.argument(style)))
            }
            Handler::Enclosure(kind) => Node::Enclosure {
                child: Box::new(self.argument(style)),
                kind,
            },
            Handler::Begin => self.environment(style),
            Handler::Left => self.delimited(style),
            Handler::Font(font) => self.argument(style.with_font(font)),
            Handler::Space(width) => Node::Space(width * style.scale),
            Handler::Color => self.color(style),
            Handler::Function => Node::Text {
                content: name,
                style: style.roman(),
            },
            Handler::Arrow(kind) => self.arrow(kind, style),
            Handler::Structure => match self.raw_literal() {
                Ok(literal) => Node::StructureLiteral(literal),
                Err(e) => {
                    log::debug!("`\\{name}`: {e}");
                    Node::Text {
                        content: name,
                        style: style.roman(),
                    }
                }
            },
            Handler::StructureShorthand(literal) => Node::StructureLiteral(literal),
            Handler::Chemistry => self.chemistry(style),
            Handler::StrayCloser => {
                log::debug!("skipping `\\{name}` with no opener");
                if name == "right" {
                    self.delimiter();
                } else if let Err(e) = self.literal_group() {
                    log::debug!("`\\end`: {e}");
                }
                return None;
            }
            Handler::ControlSymbol => self.control_symbol(token, style),
        })
    }

    /// Parse the two arguments of a fraction or a binomial.
    fn argument_pair(&mut self, style: Style) -> (Box<Node<'a>>, Box<Node<'a>>) {
        let style = style.scaled(self.config.argument_scale);
        let first = self.argument(style);
        let second = self.argument(style);
        (Box::new(first), Box::new(second))
    }

    /// Handle a `\` that is not followed by a letter, given its token.
    ///
    /// The symbol is the next token, provided it directly follows the `\`.
    fn control_symbol(&mut self, escape: Token<'a>, style: Style) -> Node<'a> {
        let Some(&symbol) = self.peek() else {
            return Node::empty(style);
        };
        if symbol.offset != escape.end() {
            return Node::Space(CONTROL_SPACE * style.scale);
        }
        self.cursor += 1;
        if let TokenKind::Text(content) = symbol.kind {
            if let Some(width) = tables::control_symbol_spacing(content) {
                return Node::Space(width * style.scale);
            }
        }
        let content = match symbol.content {
            "|" => "‖",
            content => content,
        };
        Node::Text {
            content,
            style: style.roman(),
        }
    }

    /// Consume the token naming a delimiter after `\left` or `\right`.
    ///
    /// Returns the content of the delimiter, or `None` if there is no delimiter.
    fn delimiter(&mut self) -> Option<&'a str> {
        let token = *self.peek()?;
        if token.kind == TokenKind::RightBrace {
            return None;
        }
        self.cursor += 1;
        if let TokenKind::Command("") = token.kind {
            if self.adjacent() {
                return self.next_token().map(|symbol| symbol.content);
            }
        }
        Some(match token.kind {
            TokenKind::Command(name) => tables::glyph(name).unwrap_or(name),
            _ => token.content,
        })
    }

    /// Parse the content of `\left ... \right`, the `\left` being consumed.
    fn delimited(&mut self, style: Style) -> Node<'a> {
        let brackets = match self.delimiter() {
            Some("[") => Brackets::Bracket,
            _ => Brackets::Paren,
        };
        let inner = self.sibling_run(style, Terminator::Right);
        if self.peek().is_some_and(|token| token.is_command("right")) {
            self.cursor += 1;
            self.delimiter();
        } else {
            log::debug!("`\\left` without a matching `\\right`");
        }
        Node::Delimiter {
            inner: Box::new(inner),
            brackets,
        }
    }

    /// Parse the arguments of `\color` and `\textcolor`.
    ///
    /// An unknown color leaves its content uncolored.
    fn color(&mut self, style: Style) -> Node<'a> {
        let name = self.literal_group().unwrap_or_else(|e| {
            log::debug!("color name: {e}");
            ""
        });
        let child = match self.peek_kind() {
            Some(TokenKind::LeftBrace) => self.group(style),
            _ => self.argument(style),
        };
        match tables::color(name) {
            Some(color) => Node::Color {
                child: Box::new(child),
                color,
            },
            None => {
                log::debug!("{} `{name}`", ErrorKind::UnknownColor);
                child
            }
        }
    }

    /// Parse the optional lower and the upper annotations of a stretchy arrow.
    fn arrow(&mut self, kind: ArrowKind, style: Style) -> Node<'a> {
        let style = style.scaled(self.config.script_scale);
        let lower = self.optional_argument(style);
        let upper = match self.peek_kind() {
            Some(TokenKind::LeftBrace) => Some(self.group(style)),
            _ => {
                log::debug!("stretchy arrow: {}", ErrorKind::GroupArgument);
                None
            }
        };
        let annotation = |node: Option<Node<'a>>| node.filter(|n| !n.is_empty()).map(Box::new);
        Node::Arrow {
            upper: annotation(upper),
            lower: annotation(lower),
            kind,
        }
    }
}
