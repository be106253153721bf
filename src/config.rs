/// Configuration used by the [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserConfig {
    /// The deepest nesting of groups, arguments and scripts the parser will descend into.
    ///
    /// Past this depth, tokens are taken as literal text instead of being parsed, which keeps the
    /// stack bounded on pathological input such as thousands of nested `{`. (default: 64)
    pub max_depth: usize,
    /// The factor applied to the scale of subscripts, superscripts, operator limits, arrow
    /// annotations and chemical indices and charges. (default: 0.7)
    pub script_scale: f32,
    /// The factor applied to the scale of fraction and binomial arguments. (default: 0.9)
    pub argument_scale: f32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            script_scale: 0.7,
            argument_scale: 0.9,
        }
    }
}
