//! The definition of the [`Node`] enum, which is the logical representation of the parsed markup.
//!
//! A single [`Node`] is produced by the [`Parser`] and handed, whole, to a layout engine. Nodes
//! are built bottom-up and never modified afterwards; every node carrying a [`Style`] stores the
//! style resolved at the time it was built.
//!
//! [`Parser`]: crate::parser::Parser

use std::fmt::{self, Display, Write};

use crate::attribute::Style;

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// A run of glyphs.
    ///
    /// The content is either a slice of the input or a glyph from the symbol tables. An empty
    /// content is used as a placeholder where nothing could be parsed.
    Text { content: &'a str, style: Style },
    /// Siblings laid out from left to right. There are always at least two of them.
    Horizontal(Vec<Node<'a>>),
    /// A base with a script attached to its corner.
    Script {
        base: Box<Node<'a>>,
        script: Box<Node<'a>>,
        kind: ScriptKind,
    },
    /// A large operator whose limits are set above and below it, such as `\sum` or `\lim`.
    Operator {
        symbol: &'a str,
        style: Style,
        upper: Option<Box<Node<'a>>>,
        lower: Option<Box<Node<'a>>>,
    },
    Fraction {
        numerator: Box<Node<'a>>,
        denominator: Box<Node<'a>>,
    },
    /// A binomial coefficient; laid out like a fraction without its bar, between parentheses.
    Binomial {
        numerator: Box<Node<'a>>,
        denominator: Box<Node<'a>>,
    },
    /// A square root of the inner node.
    Sqrt(Box<Node<'a>>),
    /// The content of a matrix-like environment.
    ///
    /// Rows are not required to have the same number of cells.
    Matrix {
        rows: Vec<Vec<Node<'a>>>,
        brackets: MatrixBrackets,
    },
    /// Content between stretchy delimiters, produced by `\left ... \right`.
    Delimiter {
        inner: Box<Node<'a>>,
        brackets: Brackets,
    },
    Accent {
        base: Box<Node<'a>>,
        accent: &'static str,
        style: Style,
    },
    Enclosure {
        child: Box<Node<'a>>,
        kind: EnclosureKind,
    },
    /// A stretchy arrow with optional annotations above and below.
    Arrow {
        upper: Option<Box<Node<'a>>>,
        lower: Option<Box<Node<'a>>>,
        kind: ArrowKind,
    },
    Color { child: Box<Node<'a>>, color: Color },
    /// Horizontal space, in `em` at the root scale. Negative widths pull siblings closer.
    Space(f32),
    /// An opaque structure description, such as the argument of `\chemfig`, to be interpreted by
    /// the layout engine.
    StructureLiteral(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Superscript,
    Subscript,
}

/// The brackets surrounding a [`Node::Matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixBrackets {
    /// `matrix`, and any environment that is not known.
    None,
    /// `bmatrix`
    Bracket,
    /// `pmatrix`
    Paren,
    /// `vmatrix`
    Absolute,
    /// `cases`: a single left brace.
    Cases,
}

/// The brackets surrounding a [`Node::Delimiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brackets {
    Paren,
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnclosureKind {
    Overline,
    Underline,
    Boxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    Left,
    Right,
    /// A stretchy equal sign, as in `\xlongequal`.
    Equal,
}

/// An abstract color identifier, resolved to a concrete color by the consumer of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The canonical name of an entry of the color table, aliases being resolved.
    Named(&'static str),
    /// A color written in the `#RRGGBB` form.
    Rgb([u8; 3]),
}

impl<'a> Node<'a> {
    /// An empty text node, standing where nothing could be parsed.
    pub fn empty(style: Style) -> Self {
        Node::Text { content: "", style }
    }

    /// Whether the node is an empty text node.
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Text { content: "", .. })
    }

    /// Build the node representing a list of siblings.
    ///
    /// No sibling gives an empty text node, a single sibling is returned as is, and more
    /// siblings are wrapped in a [`Node::Horizontal`].
    pub fn from_siblings(mut siblings: Vec<Node<'a>>, style: Style) -> Self {
        match siblings.len() {
            0 => Node::empty(style),
            1 => siblings.pop().expect("there is exactly one sibling"),
            _ => Node::Horizontal(siblings),
        }
    }

    /// The text content of the node, if it is a [`Node::Text`].
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Node::Text { content, .. } => Some(*content),
            _ => None,
        }
    }
}

/// A compact s-expression rendering of the tree, without styles.
///
/// ```
/// assert_eq!(latex_ast::parse(r"\sqrt{x^2}").to_string(), "(sqrt (sup x 2))");
/// ```
impl Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text { content: "", .. } => f.write_str("\"\""),
            Node::Text { content, .. } => f.write_str(content),
            Node::Horizontal(children) => {
                f.write_char('[')?;
                write_separated(f, children)?;
                f.write_char(']')
            }
            Node::Script { base, script, kind } => {
                let tag = match kind {
                    ScriptKind::Superscript => "sup",
                    ScriptKind::Subscript => "sub",
                };
                write!(f, "({tag} {base} {script})")
            }
            Node::Operator {
                symbol,
                upper,
                lower,
                ..
            } => {
                write!(f, "(op {symbol}")?;
                if let Some(lower) = lower {
                    write!(f, " _{lower}")?;
                }
                if let Some(upper) = upper {
                    write!(f, " ^{upper}")?;
                }
                f.write_char(')')
            }
            Node::Fraction {
                numerator,
                denominator,
            } => write!(f, "(frac {numerator} {denominator})"),
            Node::Binomial {
                numerator,
                denominator,
            } => write!(f, "(binom {numerator} {denominator})"),
            Node::Sqrt(inner) => write!(f, "(sqrt {inner})"),
            Node::Matrix { rows, brackets } => {
                let tag = match brackets {
                    MatrixBrackets::None => "matrix",
                    MatrixBrackets::Bracket => "bmatrix",
                    MatrixBrackets::Paren => "pmatrix",
                    MatrixBrackets::Absolute => "vmatrix",
                    MatrixBrackets::Cases => "cases",
                };
                write!(f, "({tag}")?;
                for row in rows {
                    f.write_str(" [")?;
                    write_separated(f, row)?;
                    f.write_char(']')?;
                }
                f.write_char(')')
            }
            Node::Delimiter { inner, brackets } => match brackets {
                Brackets::Paren => write!(f, "(paren {inner})"),
                Brackets::Bracket => write!(f, "(bracket {inner})"),
            },
            Node::Accent { base, accent, .. } => write!(f, "(accent {accent} {base})"),
            Node::Enclosure { child, kind } => {
                let tag = match kind {
                    EnclosureKind::Overline => "overline",
                    EnclosureKind::Underline => "underline",
                    EnclosureKind::Boxed => "boxed",
                };
                write!(f, "({tag} {child})")
            }
            Node::Arrow { upper, lower, kind } => {
                let tag = match kind {
                    ArrowKind::Left => "<-",
                    ArrowKind::Right => "->",
                    ArrowKind::Equal => "=",
                };
                write!(f, "(arrow {tag}")?;
                if let Some(lower) = lower {
                    write!(f, " _{lower}")?;
                }
                if let Some(upper) = upper {
                    write!(f, " ^{upper}")?;
                }
                f.write_char(')')
            }
            Node::Color { child, color } => match color {
                Color::Named(name) => write!(f, "(color {name} {child})"),
                Color::Rgb([r, g, b]) => write!(f, "(color #{r:02X}{g:02X}{b:02X} {child})"),
            },
            Node::Space(width) => write!(f, "(space {width})"),
            Node::StructureLiteral(raw) => write!(f, "(structure {raw:?})"),
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, nodes: &[Node<'_>]) -> fmt::Result {
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            f.write_char(' ')?;
        }
        node.fmt(f)?;
    }
    Ok(())
}
