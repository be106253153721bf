//! Matrix-like environments, introduced by `\begin{name}` and closed by `\end{name}`.

use std::mem;

use crate::{
    attribute::Style,
    node::{MatrixBrackets, Node},
};

use super::{error::InnerResult, lex::TokenKind, tables, Parser, Terminator};

impl<'a> Parser<'a> {
    /// Read the content of a `{}` group as a literal string, with surrounding whitespace removed.
    pub(super) fn literal_group(&mut self) -> InnerResult<&'a str> {
        self.raw_literal().map(str::trim)
    }

    /// Parse an environment, the `\begin` being consumed.
    pub(super) fn environment(&mut self, style: Style) -> Node<'a> {
        let name = self.literal_group().unwrap_or_else(|e| {
            log::debug!("environment name: {e}");
            ""
        });
        if name.trim_end_matches('*') == "array" && self.peek_kind() == Some(TokenKind::LeftBrace) {
            if let Err(e) = self.raw_literal() {
                log::debug!("array column specification: {e}");
            }
        }
        log::trace!("entering the `{name}` environment");
        self.matrix(tables::environment(name), style)
    }

    /// Parse the cells of a matrix until `\end{...}` or the end of the input.
    fn matrix(&mut self, brackets: MatrixBrackets, style: Style) -> Node<'a> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut cell = Vec::new();
        // Token position where the current row starts.
        let mut row_start = self.cursor;
        let row_end = loop {
            let start = self.cursor;
            self.sibling_list(style, Terminator::Cell, &mut cell);
            match self.peek_kind() {
                Some(TokenKind::Ampersand) => {
                    self.cursor += 1;
                    row.push(Node::from_siblings(mem::take(&mut cell), style));
                }
                Some(TokenKind::RowBreak) => {
                    self.cursor += 1;
                    row.push(Node::from_siblings(mem::take(&mut cell), style));
                    rows.push(mem::take(&mut row));
                    row_start = self.cursor;
                }
                Some(TokenKind::Command("end")) => {
                    let end = self.cursor;
                    self.cursor += 1;
                    if let Err(e) = self.literal_group() {
                        log::debug!("`\\end`: {e}");
                    }
                    break end;
                }
                None => {
                    log::debug!("environment not closed before the end of the input");
                    break self.cursor;
                }
                Some(_) => {
                    if self.cursor == start {
                        log::debug!("skipping `{}` in an environment", self.tokens[start].content);
                        self.cursor += 1;
                    }
                }
            }
        };
        // A trailing `\\` is not followed by a row, unless the row holds something, even `{}`.
        if rows.is_empty() || row_end > row_start {
            row.push(Node::from_siblings(cell, style));
            rows.push(row);
        }
        Node::Matrix { rows, brackets }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        node::{MatrixBrackets, Node},
        parse,
    };

    fn shape(node: &Node) -> (MatrixBrackets, Vec<usize>) {
        let Node::Matrix { rows, brackets } = node else {
            panic!("expected a matrix, got {node:?}");
        };
        (*brackets, rows.iter().map(Vec::len).collect())
    }

    #[test]
    fn ragged_rows() {
        let node = parse(r"\begin{bmatrix} 1 & 2 & 3 \\ 4 \end{bmatrix}");
        assert_eq!(shape(&node), (MatrixBrackets::Bracket, vec![3, 1]));
        assert_eq!(node.to_string(), "(bmatrix [1 2 3] [4])");
    }

    #[test]
    fn trailing_row_break() {
        let node = parse(r"\begin{matrix} a \\ b \\ \end{matrix}");
        assert_eq!(node.to_string(), "(matrix [a] [b])");

        let node = parse(r"\begin{matrix}\end{matrix}");
        assert_eq!(node.to_string(), "(matrix [\"\"])");

        let node = parse(r"\begin{matrix} a \\ {} \end{matrix}");
        assert_eq!(node.to_string(), "(matrix [a] [\"\"])");
        let node = parse(r"\begin{matrix} a \\ & \end{matrix}");
        assert_eq!(node.to_string(), "(matrix [a] [\"\" \"\"])");
        let node = parse(r"\begin{pmatrix} a \\");
        assert_eq!(node.to_string(), "(pmatrix [a])");
    }

    #[test]
    fn cases() {
        let node = parse(r"f(x) = \begin{cases} 1 & x > 0 \\ 0 & \text{otherwise} \end{cases}");
        let Node::Horizontal(children) = &node else {
            panic!("expected siblings");
        };
        let last = children.last().expect("there are children");
        assert_eq!(shape(last), (MatrixBrackets::Cases, vec![2, 2]));
    }

    #[test]
    fn names() {
        assert_eq!(shape(&parse(r"\begin{ vmatrix } x \end{vmatrix}")).0, MatrixBrackets::Absolute);
        assert_eq!(shape(&parse(r"\begin{pmatrix*} x \end{pmatrix*}")).0, MatrixBrackets::Paren);
        assert_eq!(shape(&parse(r"\begin{aligned} x &= 1 \end{aligned}")).0, MatrixBrackets::None);
        assert_eq!(
            parse(r"\begin{array}{cc} a & b \end{array}").to_string(),
            "(matrix [a b])"
        );
    }

    #[test]
    fn nested() {
        let node = parse(
            r"\begin{pmatrix} \begin{matrix} a & b \end{matrix} & c \\ d & e \end{pmatrix}",
        );
        assert_eq!(node.to_string(), "(pmatrix [(matrix [a b]) c] [d e])");
    }

    #[test]
    fn cells_with_structure() {
        let node = parse(r"\begin{pmatrix} \frac{1}{2} & x^2 \end{pmatrix}");
        assert_eq!(node.to_string(), "(pmatrix [(frac 1 2) (sup x 2)])");
    }

    #[test]
    fn malformed() {
        assert_eq!(parse(r"\begin{matrix} a & b").to_string(), "(matrix [a b])");
        assert_eq!(parse(r"\begin{matrix} a } b \end{matrix}").to_string(), "(matrix [[a b]])");
        assert_eq!(parse(r"\begin{matrix").to_string(), "(matrix [\"\"])");
        assert_eq!(parse(r"\begin{matrix} a \end").to_string(), "(matrix [a])");
        // An unclosed column specification runs to the end of the input.
        assert_eq!(parse(r"\begin{array}{cc a & b").to_string(), "(matrix [\"\"])");
    }
}
