//! Style attributes resolved by the parser and stored on the nodes of the tree.
//!
//! These are abstract tags: the layout engine is responsible for resolving a [`Font`] to a
//! concrete font resource and a [`Style::scale`] to an actual size.

/// Fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Roman, upright glyphs (`\mathrm`).
    UpRight,
    /// The default font of math mode (`\mathit`).
    Italic,
    Bold,
    BoldItalic,
    /// `\mathcal`
    Calligraphic,
    /// Blackboard bold (`\mathbb`).
    DoubleStruck,
    Fraktur,
    /// Typewriter (`\mathtt`).
    Monospace,
    SansSerif,
    /// `\mathscr`
    Script,
}

impl Font {
    /// Whether the font is a complete alphabet of its own, as opposed to one of the regular
    /// upright/italic text fonts.
    ///
    /// Alphabet fonts are never refined based on the content they are applied to.
    pub fn is_alphabet(self) -> bool {
        matches!(
            self,
            Font::Calligraphic
                | Font::DoubleStruck
                | Font::Fraktur
                | Font::Monospace
                | Font::SansSerif
                | Font::Script
        )
    }

    /// The upright font of the same weight.
    pub fn upright(self) -> Font {
        match self {
            Font::Italic => Font::UpRight,
            Font::BoldItalic => Font::Bold,
            font => font,
        }
    }

    /// Refine the font for the given text content.
    ///
    /// Letters keep the font of the context, while digits, punctuation and operator characters
    /// are set upright.
    pub fn refine(self, content: &str) -> Font {
        if self.is_alphabet() {
            return self;
        }
        match content.chars().next() {
            Some(c) if c.is_alphabetic() => self,
            Some(_) => self.upright(),
            None => self,
        }
    }
}

/// The style context threaded through the parser and stored, resolved, on the nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub font: Font,
    /// Size of the content relative to the root of the tree, which has a scale of `1.0`.
    pub scale: f32,
}

impl Style {
    pub const fn new(font: Font, scale: f32) -> Self {
        Self { font, scale }
    }

    /// The same style with its scale multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            scale: self.scale * factor,
            ..self
        }
    }

    /// The same style with its font replaced.
    pub fn with_font(self, font: Font) -> Self {
        Self { font, ..self }
    }

    /// The same style, set in the upright font of the same weight.
    pub fn upright(self) -> Self {
        self.with_font(self.font.upright())
    }

    /// The same style, set in the roman font whatever the font of the context.
    pub fn roman(self) -> Self {
        self.with_font(Font::UpRight)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Font::Italic, 1.)
    }
}
