//! fOS CSS Terms
//!
//! Value terms of CSS declarations and the construction of color terms
//! from hex notation, `rgb()` and named keywords.
//!
//! # Example
//! ```rust
//! use fos_css_terms::{ColorTerm, ColorValue, CssTerm, TermParser};
//!
//! let red = ColorTerm::from_hash("#F00").unwrap();
//! assert_eq!(red.to_string(), "#ff0000");
//!
//! let terms = TermParser::new().parse("rgb(100%, 0%, 0%) solid").unwrap();
//! assert_eq!(terms[0], CssTerm::Color(ColorTerm::new(ColorValue::new(255, 0, 0))));
//! ```

mod color;
mod config;
mod named;
mod parser;
mod term;

pub use color::{decode_function, decode_hex, ColorTerm, ColorValue, COLOR_FUNCTION_NAME};
pub use config::ParserConfig;
pub use named::{is_named_color, named_colors, resolve_named_color};
pub use parser::TermParser;
pub use term::{CssTerm, Function, HashText, Number, Operator, Percentage, Term};

/// Parse a CSS value into terms with the default configuration
pub fn parse_terms(css: &str) -> Result<Vec<CssTerm>, TermError> {
    TermParser::new().parse(css)
}

/// Term construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unexpected token at line {line}, column {column}: {token}")]
    Unexpected { line: u32, column: u32, token: String },
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse { line: u32, column: u32, message: String },
    #[error("Function nesting deeper than {depth}")]
    TooDeep { depth: usize },
}
