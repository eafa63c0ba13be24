//! CSS Term Parser using cssparser
//!
//! Tokenizes a declaration value and builds terms, turning hash tokens,
//! `rgb()` calls and color keywords into color terms where they qualify.

use cssparser::{
    BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, SourceLocation,
    SourcePosition, ToCss, Token,
};

use crate::color::{ColorTerm, COLOR_FUNCTION_NAME};
use crate::config::ParserConfig;
use crate::term::{CssTerm, Function, HashText, Number, Operator, Percentage, Term};
use crate::TermError;

type TermResult<'i, T> = Result<T, ParseError<'i, TermError>>;

/// CSS value term parser
#[derive(Debug, Clone, Default)]
pub struct TermParser {
    config: ParserConfig,
}

impl TermParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a declaration value such as `1 solid #ccc`.
    ///
    /// Commas separate terms and are not kept. Dimensions (`1px`), strings
    /// and urls are rejected.
    pub fn parse(&self, css: &str) -> Result<Vec<CssTerm>, TermError> {
        tracing::debug!("Parsing CSS value: {}", css);

        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let terms = self.parse_terms(&mut parser, 0).map_err(to_term_error)?;

        tracing::debug!("Parsed {} terms", terms.len());
        Ok(terms)
    }

    fn parse_terms<'i>(&self, parser: &mut Parser<'i, '_>, depth: usize) -> TermResult<'i, Vec<CssTerm>> {
        let mut terms = Vec::new();

        loop {
            parser.skip_whitespace();
            let location = parser.current_source_location();
            let start = parser.position();
            let token = match parser.next() {
                Ok(token) => token.clone(),
                Err(e) if matches!(e.kind, BasicParseErrorKind::EndOfInput) => break,
                Err(e) => return Err(e.into()),
            };

            let (operator, location, start, token) = match token {
                Token::Comma => continue,
                Token::Delim(c) if Operator::from_char(c).is_some() => {
                    parser.skip_whitespace();
                    let location = parser.current_source_location();
                    let start = parser.position();
                    let token = parser.next()?.clone();
                    (Operator::from_char(c), location, start, token)
                }
                token => (None, location, start, token),
            };

            let term = self.parse_term(parser, token, location, start, depth)?;
            terms.push(term.with_operator(operator));
        }

        Ok(terms)
    }

    fn parse_term<'i>(
        &self,
        parser: &mut Parser<'i, '_>,
        token: Token<'i>,
        location: SourceLocation,
        start: SourcePosition,
        depth: usize,
    ) -> TermResult<'i, CssTerm> {
        match token {
            Token::Number { value, int_value, .. } => {
                let number = match int_value {
                    Some(int) => Number::integer(int),
                    None => Number::real(value),
                };
                Ok(CssTerm::Number(Term::new(number)))
            }
            Token::Percentage { unit_value, int_value, .. } => {
                // unit_value * 100 can land just below what was written
                let percent = match int_value {
                    Some(int) => Percentage::integer(int),
                    None => {
                        let written = parser.slice_from(start).trim_end_matches('%');
                        Percentage::real(written.parse().unwrap_or(unit_value * 100.0))
                    }
                };
                Ok(CssTerm::Percentage(Term::new(percent)))
            }
            Token::Ident(name) => Ok(self.ident_term(&name)),
            Token::Hash(value) | Token::IDHash(value) => Ok(self.hash_term(&value)),
            Token::Function(name) => {
                let name = name.to_string();
                if depth >= self.config.max_nesting {
                    return Err(custom_error(
                        TermError::TooDeep { depth: self.config.max_nesting },
                        location,
                    ));
                }
                let args = parser.parse_nested_block(|nested| self.parse_terms(nested, depth + 1))?;
                Ok(self.function_term(Function::new(name, args)))
            }
            other => Err(custom_error(
                TermError::Unexpected {
                    line: location.line + 1,
                    column: location.column,
                    token: other.to_css_string(),
                },
                location,
            )),
        }
    }

    fn ident_term(&self, name: &str) -> CssTerm {
        if self.config.resolve_keywords {
            if let Some(color) = ColorTerm::from_ident(name) {
                return CssTerm::Color(color);
            }
        }
        CssTerm::Ident(Term::new(name.to_string()))
    }

    fn hash_term(&self, value: &str) -> CssTerm {
        if self.config.resolve_hex {
            if let Some(color) = ColorTerm::from_hash(&format!("#{}", value)) {
                return CssTerm::Color(color);
            }
            tracing::trace!("Hash #{} is not a color", value);
        }
        CssTerm::Hash(Term::new(HashText(value.to_string())))
    }

    fn function_term(&self, function: Function) -> CssTerm {
        if self.config.resolve_functions {
            if let Some(color) = ColorTerm::from_function(&function) {
                return CssTerm::Color(color);
            }
            if function.name == COLOR_FUNCTION_NAME {
                tracing::trace!("Keeping {} as a function term", function);
            }
        }
        CssTerm::Function(Term::new(function))
    }
}

fn custom_error<'i>(error: TermError, location: SourceLocation) -> ParseError<'i, TermError> {
    ParseError {
        kind: ParseErrorKind::Custom(error),
        location,
    }
}

fn to_term_error(error: ParseError<'_, TermError>) -> TermError {
    match error.kind {
        ParseErrorKind::Custom(e) => e,
        ParseErrorKind::Basic(kind) => TermError::Parse {
            line: error.location.line + 1,
            column: error.location.column,
            message: format!("{:?}", kind),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorValue;

    fn parse(css: &str) -> Vec<CssTerm> {
        let result = TermParser::new().parse(css);
        assert!(result.is_ok(), "Parse error: {:?}", result.err());
        result.unwrap()
    }

    fn color(r: u8, g: u8, b: u8) -> CssTerm {
        CssTerm::Color(ColorTerm::new(ColorValue::new(r, g, b)))
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse("#f00"), vec![color(255, 0, 0)]);
        assert_eq!(parse("#00FF00"), vec![color(0, 255, 0)]);
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(parse("rgb(255, 0, 0)"), vec![color(255, 0, 0)]);
        assert_eq!(parse("rgb(100%, 0%, 0%)"), vec![color(255, 0, 0)]);
        assert_eq!(parse("rgb(33%, 0%, 0%)"), vec![color(84, 0, 0)]);
        assert_eq!(parse("rgb(300, -10, 128)"), vec![color(255, 0, 128)]);
    }

    #[test]
    fn test_parse_decimal_percentages() {
        assert_eq!(parse("rgb(53.0%, 0, 0)"), vec![color(135, 0, 0)]);
        assert_eq!(parse("rgb(59.0%, 0, 0)"), vec![color(150, 0, 0)]);
        assert_eq!(parse("rgb(33.9%, 0%, 0%)"), vec![color(84, 0, 0)]);
        assert_eq!(parse("rgb(-0.5%, 100.9%, 0%)"), vec![color(0, 255, 0)]);
    }

    #[test]
    fn test_parse_decimal_percentages_match_integers() {
        for n in 0..=100 {
            for fraction in ["0", "5", "9"] {
                let expected = (n * 255 / 100) as u8;
                let terms = parse(&format!("rgb({}.{}%, 0, 0)", n, fraction));
                assert_eq!(terms, vec![color(expected, 0, 0)], "{}.{}%", n, fraction);
            }
        }
    }

    #[test]
    fn test_parse_keyword_colors() {
        assert_eq!(parse("navy"), vec![color(0, 0, 128)]);
        assert_eq!(parse("NAVY"), vec![color(0, 0, 128)]);
        assert_eq!(parse("solid"), vec![CssTerm::ident("solid")]);
    }

    #[test]
    fn test_parse_mixed_value() {
        let terms = parse("1 solid #ccc");
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0], CssTerm::number(1));
        assert_eq!(terms[1], CssTerm::ident("solid"));
        assert_eq!(terms[2], color(0xcc, 0xcc, 0xcc));
    }

    #[test]
    fn test_parse_operator_prefix() {
        let terms = parse("-#fff");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].operator(), Some(Operator::Minus));
        assert_eq!(terms[0].to_string(), "-#ffffff");
    }

    #[test]
    fn test_parse_invalid_hash_falls_back() {
        let terms = parse("#12");
        assert!(matches!(&terms[0], CssTerm::Hash(t) if t.value().as_str() == "12"));
    }

    #[test]
    fn test_parse_rgba_stays_function() {
        let terms = parse("rgba(1, 2, 3)");
        match &terms[0] {
            CssTerm::Function(f) => {
                assert_eq!(f.value().name, "rgba");
                assert_eq!(f.value().args.len(), 3);
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_real_number_argument() {
        let terms = parse("rgb(1.5, 2, 3)");
        assert!(matches!(&terms[0], CssTerm::Function(_)));
    }

    #[test]
    fn test_parse_raw_config() {
        let parser = TermParser::with_config(ParserConfig::raw());
        let terms = parser.parse("red #fff rgb(1, 2, 3)").unwrap();
        assert_eq!(terms[0], CssTerm::ident("red"));
        assert!(matches!(&terms[1], CssTerm::Hash(_)));
        assert!(matches!(&terms[2], CssTerm::Function(_)));
    }

    #[test]
    fn test_parse_nesting_limit() {
        let parser = TermParser::with_config(ParserConfig::default().with_max_nesting(2));
        assert!(parser.parse("a(b(1))").is_ok());
        assert_eq!(parser.parse("a(b(c(1)))"), Err(TermError::TooDeep { depth: 2 }));
    }

    #[test]
    fn test_parse_unexpected_token() {
        let result = TermParser::new().parse("1 \"text\"");
        match result {
            Err(TermError::Unexpected { line, column, token }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 3);
                assert_eq!(token, "\"text\"");
            }
            other => panic!("expected unexpected-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dangling_operator() {
        let result = TermParser::new().parse("+");
        assert!(matches!(result, Err(TermError::Parse { .. })));
    }
}
