//! Term parser configuration

/// Which color interpretations the term parser tries, and how deep
/// function arguments may nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Turn `#abc` / `#aabbcc` hash tokens into colors
    pub resolve_hex: bool,
    /// Turn `rgb(...)` functions into colors
    pub resolve_functions: bool,
    /// Turn color keywords into colors
    pub resolve_keywords: bool,
    /// Maximum function nesting depth
    pub max_nesting: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            resolve_hex: true,
            resolve_functions: true,
            resolve_keywords: true,
            max_nesting: 32,
        }
    }
}

impl ParserConfig {
    /// Configuration that keeps every token as written
    pub fn raw() -> Self {
        Self {
            resolve_hex: false,
            resolve_functions: false,
            resolve_keywords: false,
            ..Self::default()
        }
    }

    pub fn with_hex(mut self, enabled: bool) -> Self {
        self.resolve_hex = enabled;
        self
    }

    pub fn with_functions(mut self, enabled: bool) -> Self {
        self.resolve_functions = enabled;
        self
    }

    pub fn with_keywords(mut self, enabled: bool) -> Self {
        self.resolve_keywords = enabled;
        self
    }

    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = depth;
        self
    }
}
