//! This crate provides a [`Parser`] for `LaTeX`-like math markup, including an embedded
//! chemistry dialect (`\ce{...}`) and structure-diagram macros (`\chemfig{...}`).
//!
//! The parser turns the markup into an immutable [`Node`] tree which a layout engine can then
//! position and paint. Parsing never fails: malformed input degrades to a best-effort tree.
//!
//! ```
//! use latex_ast::{parse, Node};
//!
//! let tree = parse(r"\frac{a}{b}");
//! assert!(matches!(tree, Node::Fraction { .. }));
//! assert_eq!(tree.to_string(), "(frac a b)");
//! ```

pub mod attribute;
pub mod config;
pub mod node;
pub mod parser;

#[doc(inline)]
pub use attribute::{Font, Style};
#[doc(inline)]
pub use config::ParserConfig;
#[doc(inline)]
pub use node::Node;
#[doc(inline)]
pub use parser::Parser;

/// Parse `input` with the default [`ParserConfig`].
pub fn parse(input: &str) -> Node<'_> {
    Parser::new(input).parse()
}
