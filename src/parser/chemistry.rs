//! The chemistry scanner behind `\ce`, and the raw capture of structure literals.
//!
//! The content of `\ce{...}` is scanned left to right rather than parsed recursively: formulas
//! such as `H2O` or `SO4^2-` are made of indices and charges attached to the preceding atom,
//! which the general grammar would typeset as plain text. Nested commands fall back to the
//! general atom parser.

use crate::{
    attribute::Style,
    node::{ArrowKind, Node, ScriptKind},
};

use super::{
    error::{ErrorKind, InnerResult},
    lex::TokenKind,
    Parser,
};

/// Width, in `em`, of the space around the `+` separating reactants.
const REACTION_SPACE: f32 = 4. / 18.;

impl<'a> Parser<'a> {
    /// Capture the content of the next `{}` group verbatim, without the outer braces.
    ///
    /// Fails if the next token is not `{`, or if the input ends before the group is closed.
    pub(super) fn raw_literal(&mut self) -> InnerResult<&'a str> {
        if !self.eat(TokenKind::LeftBrace) {
            return Err(ErrorKind::GroupArgument);
        }
        let start = self.tokens[self.cursor - 1].end();
        let mut depth = 1usize;
        while let Some(token) = self.next_token() {
            match token.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&self.input[start..token.offset]);
                    }
                }
                _ => {}
            }
        }
        Err(ErrorKind::UnbalancedGroup)
    }

    /// Scan the argument of `\ce`, the command being consumed.
    pub(super) fn chemistry(&mut self, style: Style) -> Node<'a> {
        if self.peek_kind() != Some(TokenKind::LeftBrace) {
            log::debug!("`\\ce`: {}", ErrorKind::GroupArgument);
            return self.argument(style.roman());
        }
        self.cursor += 1;

        let style = style.roman();
        let script_style = style.scaled(self.config.script_scale);
        let mut nodes: Vec<Node<'a>> = Vec::new();
        // How many scripts were attached to the last node, which count towards the depth limit.
        let mut attached = 0;

        while let Some(token) = self.peek().copied() {
            let can_attach = self.depth + attached < self.config.max_depth;
            let content = match token.kind {
                TokenKind::RightBrace => {
                    self.cursor += 1;
                    break;
                }
                TokenKind::Text(content) => content,
                TokenKind::Superscript | TokenKind::Subscript => {
                    self.cursor += 1;
                    let kind = if token.kind == TokenKind::Superscript {
                        ScriptKind::Superscript
                    } else {
                        ScriptKind::Subscript
                    };
                    let base = match nodes.pop() {
                        Some(base) if can_attach => base,
                        previous => {
                            nodes.extend(previous);
                            attached = 0;
                            Node::empty(style)
                        }
                    };
                    let script = self.argument(script_style);
                    attached += 1;
                    nodes.push(Node::Script {
                        base: Box::new(base),
                        script: Box::new(script),
                        kind,
                    });
                    continue;
                }
                _ => {
                    let start = self.cursor;
                    match self.atom(style) {
                        Some(node) => {
                            nodes.push(node);
                            attached = 0;
                        }
                        None if self.cursor == start => self.cursor += 1,
                        None => {}
                    }
                    continue;
                }
            };

            let adjacent = self.adjacent();
            self.cursor += 1;
            let first = content.chars().next().unwrap_or_default();
            let previous_attached = attached;
            attached = 0;
            match content {
                _ if first.is_numeric()
                    && adjacent
                    && can_attach
                    && nodes.last().is_some_and(takes_index) =>
                {
                    let index = self.run(token.offset, char::is_numeric);
                    let base = nodes.pop().unwrap_or(Node::empty(style));
                    nodes.push(script(base, index, ScriptKind::Subscript, script_style));
                    attached = previous_attached + 1;
                }
                "-" if self.eat_text(">") => nodes.push(Node::Arrow {
                    upper: None,
                    lower: None,
                    kind: ArrowKind::Right,
                }),
                "-" => {
                    let next_is_letter = self
                        .peek()
                        .and_then(|token| token.text_char())
                        .is_some_and(char::is_alphabetic);
                    match nodes.pop() {
                        Some(base)
                            if can_attach && !next_is_letter && !matches!(base, Node::Space(_)) =>
                        {
                            nodes.push(script(base, "−", ScriptKind::Superscript, script_style));
                            attached = previous_attached + 1;
                        }
                        previous => {
                            nodes.extend(previous);
                            nodes.push(Node::Text {
                                content: "–",
                                style,
                            });
                        }
                    }
                }
                "+" => {
                    let ends_formula = match self.peek() {
                        None => true,
                        Some(next) => {
                            next.kind == TokenKind::RightBrace
                                || ["+", "-", ")", "]"].iter().any(|t| next.is_text(t))
                        }
                    };
                    match nodes.pop() {
                        Some(base)
                            if can_attach && ends_formula && !matches!(base, Node::Space(_)) =>
                        {
                            nodes.push(script(base, "+", ScriptKind::Superscript, script_style));
                            attached = previous_attached + 1;
                        }
                        previous => {
                            nodes.extend(previous);
                            let space = Node::Space(REACTION_SPACE * style.scale);
                            nodes.push(space.clone());
                            nodes.push(Node::Text {
                                content: "+",
                                style,
                            });
                            nodes.push(space);
                        }
                    }
                }
                _ if first.is_uppercase() => {
                    let element = self.run(token.offset, char::is_lowercase);
                    nodes.push(Node::Text {
                        content: element,
                        style,
                    });
                }
                _ => nodes.push(Node::Text { content, style }),
            }
        }
        Node::from_siblings(nodes, style)
    }

    /// Extend the text starting at `start`, whose first token was just consumed, with the
    /// directly following text tokens made of characters satisfying `predicate`.
    fn run(&mut self, start: usize, predicate: fn(char) -> bool) -> &'a str {
        while self.adjacent()
            && self
                .peek()
                .and_then(|token| token.text_char())
                .is_some_and(predicate)
        {
            self.cursor += 1;
        }
        let end = self.tokens[self.cursor - 1].end();
        &self.input[start..end]
    }
}

/// Whether an index directly following the node attaches to it.
fn takes_index(node: &Node) -> bool {
    match node {
        Node::Text { content, .. } => {
            (!content.is_empty() && content.chars().all(char::is_alphabetic))
                || matches!(*content, ")" | "]")
        }
        Node::Delimiter { .. } => true,
        _ => false,
    }
}

fn script<'a>(base: Node<'a>, content: &'a str, kind: ScriptKind, style: Style) -> Node<'a> {
    Node::Script {
        base: Box::new(base),
        script: Box::new(Node::Text { content, style }),
        kind,
    }
}
