//! Contains the [`Parser`], which transforms input markup into a [`Node`] tree.
//!
//! The parser is a recursive-descent parser over the tokens produced by the [`lex`] module. The
//! current [`Style`] is passed down every recursive call, and each call that parses a run of
//! siblings is given a [`Terminator`] bounding it (a group, a matrix cell, a `\left ... \right`
//! region or an optional argument).
//!
//! The parser never fails. Unknown commands, unbalanced groups and the like degrade to the best
//! tree that can be built, and every loop is guaranteed to make progress, so that parsing always
//! terminates in a number of steps proportional to the number of tokens.
mod chemistry;
mod environment;
mod error;
pub mod lex;
mod primitives;
pub mod tables;

use crate::{
    attribute::Style,
    config::ParserConfig,
    node::{Node, ScriptKind},
};

use self::{
    error::ErrorKind,
    lex::{Token, TokenKind},
};

/// The parser completes the task of transforming the input markup into a [`Node`] tree.
///
/// A parser is consumed by [`Parser::parse`]; parse another input with a new parser.
#[derive(Debug)]
pub struct Parser<'a> {
    /// What the initial input is.
    ///
    /// Element symbols and structure literals are sliced out of it.
    input: &'a str,
    tokens: Vec<Token<'a>>,
    /// Index of the next token to be parsed.
    cursor: usize,
    /// Current nesting depth, bounded by `config.max_depth`.
    depth: usize,
    config: ParserConfig,
}

/// Where a run of siblings ends, in addition to the end of the input and an unmatched `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminator {
    /// Only the end of the input, or an unmatched `}`.
    Unbounded,
    /// The `}` closing a group.
    Brace,
    /// The `\right` closing a `\left`.
    Right,
    /// `&`, `\\` or `\end`, in an environment.
    Cell,
    /// The `]` closing an optional argument.
    Bracket,
}

impl Terminator {
    fn matches(self, token: &Token) -> bool {
        match self {
            Terminator::Unbounded => false,
            Terminator::Brace => token.kind == TokenKind::RightBrace,
            Terminator::Right => token.is_command("right"),
            Terminator::Cell => {
                matches!(token.kind, TokenKind::Ampersand | TokenKind::RowBreak)
                    || token.is_command("end")
            }
            Terminator::Bracket => token.is_text("]"),
        }
    }
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            tokens: lex::tokenize(input),
            cursor: 0,
            depth: 0,
            config,
        }
    }

    /// Parse the whole input into a single node.
    ///
    /// Tokens that can only end a nested scope (`&`, `\\` and an unmatched `}`) are skipped when
    /// found at the top level.
    pub fn parse(mut self) -> Node<'a> {
        let style = Style::default();
        let mut siblings = Vec::new();
        loop {
            self.sibling_list(style, Terminator::Unbounded, &mut siblings);
            match self.next_token() {
                Some(token) => log::debug!("skipping stray `{}` at the top level", token.content),
                None => break,
            }
        }
        Node::from_siblings(siblings, style)
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<TokenKind<'a>> {
        self.peek().map(|token| token.kind)
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(token)
    }

    /// Consume the next token if it is of the given kind.
    fn eat(&mut self, kind: TokenKind<'a>) -> bool {
        let found = self.peek_kind() == Some(kind);
        if found {
            self.cursor += 1;
        }
        found
    }

    /// Consume the next token if it is the given text.
    fn eat_text(&mut self, text: &str) -> bool {
        let found = self.peek().is_some_and(|token| token.is_text(text));
        if found {
            self.cursor += 1;
        }
        found
    }

    /// Whether the next token directly follows the previous one, with no whitespace in between.
    fn adjacent(&self) -> bool {
        match (self.cursor.checked_sub(1), self.peek()) {
            (Some(previous), Some(next)) => self.tokens[previous].end() == next.offset,
            _ => false,
        }
    }

    /// Parse a run of siblings and build the node representing them.
    fn sibling_run(&mut self, style: Style, terminator: Terminator) -> Node<'a> {
        let mut siblings = Vec::new();
        self.sibling_list(style, terminator, &mut siblings);
        Node::from_siblings(siblings, style)
    }

    /// Parse atoms and their scripts, pushing them to `siblings`, until the terminator, an
    /// unmatched `}`, or the end of the input is reached.
    fn sibling_list(&mut self, style: Style, terminator: Terminator, siblings: &mut Vec<Node<'a>>) {
        self.depth += 1;
        while let Some(token) = self.peek() {
            if terminator.matches(token) || token.kind == TokenKind::RightBrace {
                break;
            }
            let start = self.cursor;
            match self.scripted_atom(style) {
                Some(node) => siblings.push(node),
                // Nothing was consumed: the token can only be consumed by an enclosing scope.
                None if self.cursor == start => break,
                None => {}
            }
        }
        self.depth -= 1;
    }

    /// Parse an atom followed by its scripts.
    ///
    /// The scripts of operators with vertical limits are stored in the operator itself, instead
    /// of being attached to its corner.
    fn scripted_atom(&mut self, style: Style) -> Option<Node<'a>> {
        let limits = match self.peek()?.kind {
            TokenKind::Command(name) => tables::vertical_limit(name),
            _ => None,
        };
        let atom = match limits {
            Some(symbol) if self.depth < self.config.max_depth => {
                self.cursor += 1;
                self.operator(symbol, style)
            }
            _ => self.atom(style)?,
        };
        Some(self.scripts(atom, style))
    }

    /// Parse the limits following an operator.
    ///
    /// Scripts are consumed in any order, as long as the corresponding limit is not set yet.
    fn operator(&mut self, symbol: &'static str, style: Style) -> Node<'a> {
        let limit_style = style.scaled(self.config.script_scale);
        let (mut upper, mut lower) = (None, None);
        loop {
            let limit = match self.peek_kind() {
                Some(TokenKind::Superscript) if upper.is_none() => &mut upper,
                Some(TokenKind::Subscript) if lower.is_none() => &mut lower,
                _ => break,
            };
            self.cursor += 1;
            *limit = Some(Box::new(self.argument(limit_style)));
        }
        Node::Operator {
            symbol,
            style: style.upright(),
            upper,
            lower,
        }
    }

    /// Attach the scripts following `base`, each script wrapping the previous result.
    ///
    /// Every script nests the tree one level deeper, so scripts count towards the depth limit.
    fn scripts(&mut self, mut base: Node<'a>, style: Style) -> Node<'a> {
        let script_style = style.scaled(self.config.script_scale);
        let depth = self.depth;
        while self.depth < self.config.max_depth {
            let kind = match self.peek_kind() {
                Some(TokenKind::Superscript) => ScriptKind::Superscript,
                Some(TokenKind::Subscript) => ScriptKind::Subscript,
                _ => break,
            };
            self.cursor += 1;
            let script = self.argument(script_style);
            base = Node::Script {
                base: Box::new(base),
                script: Box::new(script),
                kind,
            };
            self.depth += 1;
        }
        self.depth = depth;
        base
    }

    /// Parse a single atom.
    ///
    /// Returns `None` when the next token ends the current scope, in which case it is left
    /// unconsumed, or when the next token cannot start an atom, in which case it is skipped.
    fn atom(&mut self, style: Style) -> Option<Node<'a>> {
        let token = *self.peek()?;
        match token.kind {
            TokenKind::Ampersand | TokenKind::RowBreak | TokenKind::RightBrace => None,
            _ if self.depth >= self.config.max_depth => {
                log::debug!(
                    "{} at `{}`, taking it literally",
                    ErrorKind::DepthLimit,
                    token.content
                );
                self.cursor += 1;
                Some(Node::Text {
                    content: token.content,
                    style: style.roman(),
                })
            }
            TokenKind::Text(content) => {
                self.cursor += 1;
                Some(Node::Text {
                    content,
                    style: style.with_font(style.font.refine(content)),
                })
            }
            TokenKind::LeftBrace => Some(self.group(style)),
            TokenKind::Command(name) => {
                self.cursor += 1;
                self.depth += 1;
                let node = self.command(token, name, style);
                self.depth -= 1;
                node
            }
            TokenKind::Superscript | TokenKind::Subscript => {
                log::debug!("skipping `{}` with no base", token.content);
                self.cursor += 1;
                None
            }
        }
    }

    /// Parse the content of a `{}` group, the `{` being the next token.
    ///
    /// The group is transparent: its content is returned as is. A missing `}` is tolerated.
    fn group(&mut self, style: Style) -> Node<'a> {
        self.cursor += 1;
        let inner = self.sibling_run(style, Terminator::Brace);
        if !self.eat(TokenKind::RightBrace) {
            log::debug!("{}", ErrorKind::UnbalancedGroup);
        }
        inner
    }

    /// Parse the argument of a command: a group, or a single atom without its scripts.
    fn argument(&mut self, style: Style) -> Node<'a> {
        match self.peek_kind() {
            Some(TokenKind::LeftBrace) => self.group(style),
            Some(_) => self.atom(style).unwrap_or(Node::empty(style)),
            None => Node::empty(style),
        }
    }

    /// Parse an argument delimited by `[]`, if there is one.
    fn optional_argument(&mut self, style: Style) -> Option<Node<'a>> {
        if !self.eat_text("[") {
            return None;
        }
        let node = self.sibling_run(style, Terminator::Bracket);
        self.eat_text("]");
        Some(node)
    }

    /// Dispatch a command whose token was just consumed.
    fn command(&mut self, token: Token<'a>, name: &'a str, style: Style) -> Option<Node<'a>> {
        if let Some(handler) = tables::handler(name) {
            log::trace!("`\\{name}` handled as {handler:?}");
            return self.handle(handler, token, name, style);
        }
        if let Some(symbol) = tables::vertical_limit(name) {
            return Some(Node::Operator {
                symbol,
                style: style.upright(),
                upper: None,
                lower: None,
            });
        }
        if let Some(glyph) = tables::glyph(name) {
            return Some(Node::Text {
                content: glyph,
                style: style.upright(),
            });
        }
        if let Some(accent) = tables::accent(name) {
            let base = self.argument(style);
            return Some(Node::Accent {
                base: Box::new(base),
                accent,
                style,
            });
        }
        log::debug!("unknown command `\\{name}`, rendering its name");
        Some(Node::Text {
            content: name,
            style: style.roman(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        attribute::Font,
        node::{Brackets, EnclosureKind, MatrixBrackets},
        parse,
    };

    use super::*;

    fn text<'a>(node: &Node<'a>) -> &'a str {
        node.text().expect("expected a text node")
    }

    #[test]
    fn superscript() {
        let node = parse("x^2");
        let Node::Script { base, script, kind } = node else {
            panic!("expected a script, got {node:?}");
        };
        assert_eq!(kind, ScriptKind::Superscript);
        assert_eq!(text(&base), "x");
        assert_eq!(text(&script), "2");
        let Node::Text { style, .. } = *script else {
            unreachable!()
        };
        assert_eq!(style.font, Font::UpRight);
        assert!(style.scale < 1.);
    }

    #[test]
    fn sequential_scripts() {
        assert_eq!(parse("x^2_3").to_string(), "(sub (sup x 2) 3)");
        assert_eq!(parse("a_{i_j}").to_string(), "(sub a (sub i j))");
    }

    #[test]
    fn fraction() {
        let node = parse(r"\frac{a}{b}");
        let Node::Fraction {
            numerator,
            denominator,
        } = node
        else {
            panic!("expected a fraction, got {node:?}");
        };
        assert_eq!(text(&numerator), "a");
        assert_eq!(text(&denominator), "b");
    }

    #[test]
    fn single_token_arguments() {
        assert_eq!(parse(r"\frac12").to_string(), "(frac 1 2)");
        assert_eq!(parse(r"\frac\alpha b^2").to_string(), "(sup (frac α b) 2)");
    }

    #[test]
    fn graphemes_are_atoms() {
        assert_eq!(parse("\\hat e\u{301}").to_string(), "(accent ˆ e\u{301})");
        assert_eq!(parse("\\frac e\u{301} 2").to_string(), "(frac e\u{301} 2)");
        assert_eq!(parse("x^🇫🇷").to_string(), "(sup x 🇫🇷)");

        let node = parse("e\u{301}");
        let Node::Text { content, style } = node else {
            panic!("expected a single text node, got {node:?}");
        };
        assert_eq!(content, "e\u{301}");
        assert_eq!(style.font, Font::Italic);
    }

    #[test]
    fn sum_has_vertical_limits() {
        let node = parse(r"\sum_{i=1}^{n}");
        let Node::Operator {
            symbol,
            upper: Some(upper),
            lower: Some(lower),
            ..
        } = &node
        else {
            panic!("expected an operator with limits, got {node:?}");
        };
        assert_eq!(*symbol, "∑");
        assert_eq!(text(upper), "n");
        assert_eq!(lower.to_string(), "[i = 1]");
    }

    #[test]
    fn limits_in_any_order() {
        assert_eq!(parse(r"\lim^a_b").to_string(), "(op lim _b ^a)");
        assert_eq!(parse(r"\prod_k").to_string(), "(op ∏ _k)");
        assert_eq!(parse(r"\sum_a_b").to_string(), "(sub (op ∑ _a) b)");
    }

    #[test]
    fn integrals_keep_corner_scripts() {
        assert_eq!(parse(r"\int_0^1").to_string(), "(sup (sub ∫ 0) 1)");
    }

    #[test]
    fn unknown_command() {
        let node = parse(r"\foobar");
        assert_eq!(text(&node), "foobar");
    }

    #[test]
    fn unterminated_fraction() {
        let node = parse(r"\frac{a}{b");
        assert_eq!(node.to_string(), "(frac a b)");

        assert_eq!(parse(r"\frac{a}{").to_string(), "(frac a \"\")");
        assert_eq!(parse(r"\frac{a").to_string(), "(frac a \"\")");
    }

    #[test]
    fn groups_are_transparent() {
        assert_eq!(parse("{{x}}"), parse("x"));
        assert_eq!(parse("{a b}c").to_string(), "[[a b] c]");
        assert!(parse("{}").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn text_styles() {
        let Node::Horizontal(children) = parse("x1") else {
            panic!("expected two siblings");
        };
        assert!(matches!(
            children[0],
            Node::Text {
                style: Style {
                    font: Font::Italic,
                    ..
                },
                ..
            }
        ));
        assert!(matches!(
            children[1],
            Node::Text {
                style: Style {
                    font: Font::UpRight,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn font_switches() {
        let Node::Horizontal(children) = parse(r"\mathbb{R1}") else {
            panic!("expected two siblings");
        };
        for child in &children {
            let Node::Text { style, .. } = child else {
                panic!("expected text");
            };
            assert_eq!(style.font, Font::DoubleStruck);
        }

        let node = parse(r"\mathrm d");
        assert_eq!(text(&node), "d");
        assert!(matches!(
            node,
            Node::Text {
                style: Style {
                    font: Font::UpRight,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn function_names_are_roman() {
        let node = parse(r"\mathit{\sin}");
        assert_eq!(text(&node), "sin");
        assert!(matches!(
            node,
            Node::Text {
                style: Style {
                    font: Font::UpRight,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn matrix() {
        let node = parse(r"\begin{pmatrix}a&b\\c&d\end{pmatrix}");
        let Node::Matrix { rows, brackets } = &node else {
            panic!("expected a matrix, got {node:?}");
        };
        assert_eq!(*brackets, MatrixBrackets::Paren);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows.iter()
                .map(|row| row.iter().map(text).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn delimiters() {
        let node = parse(r"\left[ x \right]");
        assert!(matches!(
            node,
            Node::Delimiter {
                brackets: Brackets::Bracket,
                ..
            }
        ));
        assert_eq!(parse(r"\left( \frac12 \right)").to_string(), "(paren (frac 1 2))");
        assert_eq!(parse(r"\left| x \right|").to_string(), "(paren x)");
        assert_eq!(parse(r"\left\{ x \right\}").to_string(), "(paren x)");
        assert_eq!(parse(r"\left( x").to_string(), "(paren x)");
    }

    #[test]
    fn enclosures_and_roots() {
        assert!(matches!(
            parse(r"\boxed{x}"),
            Node::Enclosure {
                kind: EnclosureKind::Boxed,
                ..
            }
        ));
        assert_eq!(parse(r"\sqrt[3]{x}").to_string(), "(sqrt x)");
        assert_eq!(parse(r"\binom n k").to_string(), "(binom n k)");
        assert_eq!(parse(r"\overline{AB}").to_string(), "(overline [A B])");
    }

    #[test]
    fn accents() {
        assert_eq!(parse(r"\hat x").to_string(), "(accent ˆ x)");
        assert_eq!(parse(r"\vec{v}_1").to_string(), "(sub (accent → v) 1)");
    }

    #[test]
    fn depth_is_bounded() {
        let input = "{".repeat(10_000) + "x" + &"}".repeat(10_000);
        let node = parse(&input);
        assert!(node.to_string().contains('x'));

        let input = "x^".repeat(5_000) + "y";
        let _ = parse(&input);
    }

    #[test]
    fn config_is_used() {
        let config = ParserConfig {
            script_scale: 0.5,
            ..Default::default()
        };
        let Node::Script { script, .. } = Parser::with_config("x^y", config).parse() else {
            panic!("expected a script");
        };
        let Node::Text { style, .. } = *script else {
            panic!("expected text");
        };
        assert_eq!(style.scale, 0.5);
    }

    #[test]
    fn stray_tokens_at_top_level() {
        assert_eq!(parse("a}b").to_string(), "[a b]");
        assert_eq!(parse(r"a&b\\c").to_string(), "[a b c]");
        assert_eq!(parse("^2x").to_string(), "[2 x]");
    }
}
