//! Static tables consulted by the parser.
//!
//! Every table is a plain `match`, compiled once into the binary and never mutated, so any
//! number of parsers can read them concurrently.

use crate::{
    attribute::Font,
    node::{ArrowKind, Color, EnclosureKind, MatrixBrackets},
};

/// What the parser does when it encounters a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Handler {
    Fraction,
    Binomial,
    Sqrt,
    Enclosure(EnclosureKind),
    Begin,
    Left,
    /// Parse one argument with the font overridden.
    Font(Font),
    /// A space of the given width, in `em`.
    Space(f32),
    Color,
    /// An upright function name, such as `\sin`.
    Function,
    Arrow(ArrowKind),
    /// Capture the raw argument of a structure macro.
    Structure,
    /// A structure macro standing for a fixed structure.
    StructureShorthand(&'static str),
    Chemistry,
    /// `\right` or `\end` with no matching opener.
    StrayCloser,
    /// `\` followed by something that is not a letter.
    ControlSymbol,
}

/// Returns the handler of a command, if it is not a plain symbol or accent.
pub(crate) fn handler(name: &str) -> Option<Handler> {
    Some(match name {
        "" => Handler::ControlSymbol,
        "frac" | "dfrac" | "tfrac" => Handler::Fraction,
        "binom" | "dbinom" | "tbinom" => Handler::Binomial,
        "sqrt" => Handler::Sqrt,
        "overline" => Handler::Enclosure(EnclosureKind::Overline),
        "underline" => Handler::Enclosure(EnclosureKind::Underline),
        "boxed" => Handler::Enclosure(EnclosureKind::Boxed),
        "begin" => Handler::Begin,
        "left" => Handler::Left,
        "right" | "end" => Handler::StrayCloser,

        "mathrm" | "textrm" | "text" | "mathup" | "operatorname" | "mbox" => {
            Handler::Font(Font::UpRight)
        }
        "mathit" | "textit" => Handler::Font(Font::Italic),
        "mathbf" | "textbf" => Handler::Font(Font::Bold),
        "boldsymbol" | "bm" | "mathbfit" => Handler::Font(Font::BoldItalic),
        "mathcal" => Handler::Font(Font::Calligraphic),
        "mathbb" => Handler::Font(Font::DoubleStruck),
        "mathfrak" => Handler::Font(Font::Fraktur),
        "mathtt" | "texttt" => Handler::Font(Font::Monospace),
        "mathsf" | "textsf" => Handler::Font(Font::SansSerif),
        "mathscr" => Handler::Font(Font::Script),

        "color" | "textcolor" => Handler::Color,

        "xrightarrow" => Handler::Arrow(ArrowKind::Right),
        "xleftarrow" => Handler::Arrow(ArrowKind::Left),
        "xlongequal" | "xequal" => Handler::Arrow(ArrowKind::Equal),

        "chemfig" => Handler::Structure,
        "benzene" => Handler::StructureShorthand("*6(-=-=-=)"),
        "cyclohexane" => Handler::StructureShorthand("*6(------)"),
        "cyclopentane" => Handler::StructureShorthand("*5(-----)"),
        "cyclopropane" => Handler::StructureShorthand("*3(---)"),

        "ce" => Handler::Chemistry,

        _ if is_function_name(name) => Handler::Function,
        _ => return spacing(name).map(Handler::Space),
    })
}

/// Width, in `em`, of the named spacing commands.
pub fn spacing(name: &str) -> Option<f32> {
    Some(match name {
        "thinspace" => 3. / 18.,
        "medspace" => 4. / 18.,
        "thickspace" => 5. / 18.,
        "enspace" => 0.5,
        "quad" => 1.,
        "qquad" => 2.,
        "negthinspace" => -3. / 18.,
        "negmedspace" => -4. / 18.,
        "negthickspace" => -5. / 18.,
        _ => return None,
    })
}

/// Width, in `em`, of the spacing control symbols such as `\,`.
pub fn control_symbol_spacing(symbol: &str) -> Option<f32> {
    Some(match symbol {
        "," => 3. / 18.,
        ":" | ">" => 4. / 18.,
        ";" => 5. / 18.,
        "!" => -3. / 18.,
        _ => return None,
    })
}

/// Whether the command is typeset as an upright function name.
pub fn is_function_name(name: &str) -> bool {
    matches!(
        name,
        "sin"
            | "cos"
            | "tan"
            | "cot"
            | "sec"
            | "csc"
            | "arcsin"
            | "arccos"
            | "arctan"
            | "sinh"
            | "cosh"
            | "tanh"
            | "coth"
            | "log"
            | "ln"
            | "lg"
            | "exp"
            | "deg"
            | "dim"
            | "ker"
            | "hom"
            | "arg"
    )
}

/// The symbol of an operator whose limits are set above and below it.
///
/// Named operators such as `\lim` are their own symbol.
pub fn vertical_limit(name: &str) -> Option<&'static str> {
    Some(match name {
        "sum" => "∑",
        "prod" => "∏",
        "coprod" => "∐",
        "bigcup" => "⋃",
        "bigcap" => "⋂",
        "bigvee" => "⋁",
        "bigwedge" => "⋀",
        "bigoplus" => "⨁",
        "bigotimes" => "⨂",
        "bigodot" => "⨀",
        "biguplus" => "⨄",
        "bigsqcup" => "⨆",
        "lim" => "lim",
        "limsup" => "lim sup",
        "liminf" => "lim inf",
        "max" => "max",
        "min" => "min",
        "sup" => "sup",
        "inf" => "inf",
        "det" => "det",
        "gcd" => "gcd",
        "Pr" => "Pr",
        _ => return None,
    })
}

pub fn is_vertical_limit(name: &str) -> bool {
    vertical_limit(name).is_some()
}

/// The glyph of an accent command.
pub fn accent(name: &str) -> Option<&'static str> {
    Some(match name {
        "hat" | "widehat" => "ˆ",
        "tilde" | "widetilde" => "˜",
        "bar" => "¯",
        "vec" | "overrightarrow" => "→",
        "overleftarrow" => "←",
        "overleftrightarrow" => "↔",
        "dot" => "˙",
        "ddot" => "¨",
        "dddot" => "⃛",
        "acute" => "´",
        "grave" => "`",
        "breve" => "˘",
        "check" | "widecheck" => "ˇ",
        "mathring" => "˚",
        "overbrace" => "⏞",
        "underbrace" => "⏟",
        _ => return None,
    })
}

/// The glyph of a symbol command.
pub fn glyph(name: &str) -> Option<&'static str> {
    Some(match name {
        // Lowercase Greek letters
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" => "ϵ",
        "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" => "θ",
        "vartheta" => "ϑ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "omicron" => "ο",
        "pi" => "π",
        "varpi" => "ϖ",
        "rho" => "ρ",
        "varrho" => "ϱ",
        "sigma" => "σ",
        "varsigma" => "ς",
        "tau" => "τ",
        "upsilon" => "υ",
        "phi" => "ϕ",
        "varphi" => "φ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",
        // Uppercase Greek letters
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Xi" => "Ξ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Upsilon" => "Υ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",
        // Hebrew letters and letter-like symbols
        "aleph" => "ℵ",
        "beth" => "ℶ",
        "ell" => "ℓ",
        "hbar" | "hslash" => "ℏ",
        "imath" => "ı",
        "jmath" => "ȷ",
        "Re" => "ℜ",
        "Im" => "ℑ",
        "wp" => "℘",
        "nabla" => "∇",
        "partial" => "∂",
        "infty" => "∞",
        "emptyset" => "∅",
        "varnothing" => "⌀",
        "angle" => "∠",
        "degree" => "°",
        "prime" => "′",
        // Integrals keep their scripts in the corner.
        "int" => "∫",
        "iint" => "∬",
        "iiint" => "∭",
        "oint" => "∮",
        // Binary operators
        "pm" => "±",
        "mp" => "∓",
        "times" => "×",
        "div" => "÷",
        "cdot" => "⋅",
        "ast" => "∗",
        "star" => "⋆",
        "circ" => "∘",
        "bullet" => "∙",
        "oplus" => "⊕",
        "ominus" => "⊖",
        "otimes" => "⊗",
        "odot" => "⊙",
        "cap" => "∩",
        "cup" => "∪",
        "sqcap" => "⊓",
        "sqcup" => "⊔",
        "wedge" | "land" => "∧",
        "vee" | "lor" => "∨",
        "setminus" => "∖",
        // Relations
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "ll" => "≪",
        "gg" => "≫",
        "approx" => "≈",
        "equiv" => "≡",
        "sim" => "∼",
        "simeq" => "≃",
        "cong" => "≅",
        "propto" => "∝",
        "in" => "∈",
        "notin" => "∉",
        "ni" => "∋",
        "subset" => "⊂",
        "supset" => "⊃",
        "subseteq" => "⊆",
        "supseteq" => "⊇",
        "perp" => "⊥",
        "parallel" => "∥",
        "mid" => "∣",
        // Logic
        "forall" => "∀",
        "exists" => "∃",
        "nexists" => "∄",
        "neg" | "lnot" => "¬",
        "therefore" => "∴",
        "because" => "∵",
        // Arrows
        "to" | "rightarrow" => "→",
        "gets" | "leftarrow" => "←",
        "leftrightarrow" => "↔",
        "Rightarrow" => "⇒",
        "Leftarrow" => "⇐",
        "Leftrightarrow" => "⇔",
        "longrightarrow" => "⟶",
        "longleftarrow" => "⟵",
        "implies" => "⟹",
        "impliedby" => "⟸",
        "iff" => "⟺",
        "mapsto" => "↦",
        "uparrow" => "↑",
        "downarrow" => "↓",
        "rightleftharpoons" => "⇌",
        "leftrightarrows" => "⇄",
        // Delimiters
        "langle" => "⟨",
        "rangle" => "⟩",
        "lfloor" => "⌊",
        "rfloor" => "⌋",
        "lceil" => "⌈",
        "rceil" => "⌉",
        "lbrace" => "{",
        "rbrace" => "}",
        "lbrack" => "[",
        "rbrack" => "]",
        "vert" => "|",
        "Vert" => "‖",
        "backslash" => "\\",
        // Dots
        "ldots" | "dots" => "…",
        "cdots" => "⋯",
        "vdots" => "⋮",
        "ddots" => "⋱",
        _ => return None,
    })
}

/// The brackets of a matrix-like environment.
pub fn environment(name: &str) -> MatrixBrackets {
    match name.trim_end_matches('*') {
        "bmatrix" => MatrixBrackets::Bracket,
        "pmatrix" => MatrixBrackets::Paren,
        "vmatrix" | "Vmatrix" => MatrixBrackets::Absolute,
        "cases" => MatrixBrackets::Cases,
        _ => MatrixBrackets::None,
    }
}

/// Returns the color with the given name, or parses a `#RRGGBB` color.
///
/// Names are the base colors of `xcolor` and the most common `dvipsnames`/CSS names.
pub fn color(name: &str) -> Option<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        return hex_color(hex);
    }
    let name = match name {
        "black" => "black",
        "white" => "white",
        "red" => "red",
        "green" => "green",
        "blue" => "blue",
        "cyan" => "cyan",
        "magenta" => "magenta",
        "yellow" => "yellow",
        "gray" | "grey" => "gray",
        "darkgray" => "darkgray",
        "lightgray" => "lightgray",
        "brown" => "brown",
        "lime" => "lime",
        "olive" => "olive",
        "orange" => "orange",
        "pink" => "pink",
        "purple" => "purple",
        "teal" => "teal",
        "violet" => "violet",
        "navy" => "navy",
        "maroon" => "maroon",
        "gold" => "gold",
        "silver" => "silver",
        "indigo" => "indigo",
        "crimson" => "crimson",
        "turquoise" => "turquoise",
        "salmon" => "salmon",
        "forestgreen" | "ForestGreen" => "forestgreen",
        "royalblue" | "RoyalBlue" => "royalblue",
        "darkred" => "darkred",
        "darkgreen" => "darkgreen",
        "darkblue" => "darkblue",
        _ => return None,
    };
    Some(Color::Named(name))
}

fn hex_color(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_not_glyphs() {
        for name in ["sum", "prod", "lim", "bigcup"] {
            assert!(is_vertical_limit(name));
            assert_eq!(glyph(name), None, "{name} should only be an operator");
        }
        assert!(!is_vertical_limit("int"));
    }

    #[test]
    fn symbols_and_accents_do_not_overlap() {
        for name in ["hat", "vec", "bar", "dot", "tilde"] {
            assert!(accent(name).is_some());
            assert_eq!(glyph(name), None);
            assert_eq!(handler(name), None);
        }
    }

    #[test]
    fn handlers() {
        assert_eq!(handler("frac"), Some(Handler::Fraction));
        assert_eq!(handler("sin"), Some(Handler::Function));
        assert_eq!(handler("quad"), Some(Handler::Space(1.)));
        assert_eq!(handler("mathbb"), Some(Handler::Font(Font::DoubleStruck)));
        assert_eq!(handler("alpha"), None);
    }

    #[test]
    fn colors() {
        assert_eq!(color("red"), Some(Color::Named("red")));
        assert_eq!(color("grey"), Some(Color::Named("gray")));
        assert_eq!(color("ForestGreen"), Some(Color::Named("forestgreen")));
        assert_eq!(color("#1a2B3c"), Some(Color::Rgb([0x1a, 0x2b, 0x3c])));
        assert_eq!(color("#12345"), None);
        assert_eq!(color("notacolor"), None);
    }

    #[test]
    fn environments() {
        assert_eq!(environment("pmatrix"), MatrixBrackets::Paren);
        assert_eq!(environment("bmatrix*"), MatrixBrackets::Bracket);
        assert_eq!(environment("aligned"), MatrixBrackets::None);
    }
}
