//! CSS Terms
//!
//! A term is a single value node of a declaration: `12`, `50%`, `bold`,
//! `#fff`, `rgb(1, 2, 3)`. Every kind shares the unary operator slot.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::color::ColorTerm;

/// Unary sign written in front of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            _ => None,
        }
    }

    /// Textual symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A term value together with its optional operator.
///
/// Equality and hashing cover both the operator and the value, so `-#fff`
/// and `#fff` are different terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term<V> {
    operator: Option<Operator>,
    value: V,
}

impl<V> Term<V> {
    pub fn new(value: V) -> Self {
        Self { operator: None, value }
    }

    pub fn with_operator(mut self, operator: Option<Operator>) -> Self {
        self.operator = operator;
        self
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

/// Serializes as the operator symbol (if any) directly followed by the value
impl<V: fmt::Display> fmt::Display for Term<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operator) = self.operator {
            f.write_str(operator.symbol())?;
        }
        fmt::Display::fmt(&self.value, f)
    }
}

/// Plain number, kept in the form it was written in
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i32),
    Real(f32),
}

impl Number {
    pub fn integer(value: i32) -> Self {
        Self::Integer(value)
    }

    pub fn real(value: f32) -> Self {
        Self::Real(value)
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Integer(int) => int as f64,
            Self::Real(real) => real as f64,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Integer magnitude, only for numbers written as integers
    pub fn int_value(self) -> Option<i64> {
        match self {
            Self::Integer(int) => Some(int as i64),
            Self::Real(_) => None,
        }
    }

    /// Value truncated toward zero, saturating at the `i64` bounds
    pub fn trunc(self) -> i64 {
        match self {
            Self::Integer(int) => int as i64,
            Self::Real(real) => real as i64,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(int) => {
                0u8.hash(state);
                int.hash(state);
            }
            Self::Real(real) => {
                1u8.hash(state);
                real.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(int) => write!(f, "{}", int),
            // keep the fractional marker so the number stays non-integer
            Self::Real(real) if real.fract() == 0.0 => write!(f, "{:.1}", real),
            Self::Real(real) => write!(f, "{}", real),
        }
    }
}

/// Percentage in percent units (`50%` holds `50`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Percentage(pub Number);

impl Percentage {
    pub fn integer(value: i32) -> Self {
        Self(Number::Integer(value))
    }

    pub fn real(value: f32) -> Self {
        Self(Number::Real(value))
    }

    pub fn number(self) -> Number {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Raw text of a hash token that is not a color, without the `#`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashText(pub String);

impl HashText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Function call with its argument terms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub name: String,
    pub args: Vec<CssTerm>,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<CssTerm>) -> Self {
        Self { name: name.into(), args }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(arg, f)?;
        }
        f.write_str(")")
    }
}

/// Any parsed term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CssTerm {
    Color(ColorTerm),
    Number(Term<Number>),
    Percentage(Term<Percentage>),
    Ident(Term<String>),
    /// Hash token that is not a valid color
    Hash(Term<HashText>),
    Function(Term<Function>),
}

impl CssTerm {
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Self::Color(t) => t.operator(),
            Self::Number(t) => t.operator(),
            Self::Percentage(t) => t.operator(),
            Self::Ident(t) => t.operator(),
            Self::Hash(t) => t.operator(),
            Self::Function(t) => t.operator(),
        }
    }

    /// Replace the operator slot of whichever kind this is
    pub fn with_operator(self, operator: Option<Operator>) -> Self {
        match self {
            Self::Color(t) => Self::Color(t.with_operator(operator)),
            Self::Number(t) => Self::Number(t.with_operator(operator)),
            Self::Percentage(t) => Self::Percentage(t.with_operator(operator)),
            Self::Ident(t) => Self::Ident(t.with_operator(operator)),
            Self::Hash(t) => Self::Hash(t.with_operator(operator)),
            Self::Function(t) => Self::Function(t.with_operator(operator)),
        }
    }

    pub fn as_color(&self) -> Option<&ColorTerm> {
        match self {
            Self::Color(t) => Some(t),
            _ => None,
        }
    }

    pub fn number(value: i32) -> Self {
        Self::Number(Term::new(Number::integer(value)))
    }

    pub fn percentage(value: i32) -> Self {
        Self::Percentage(Term::new(Percentage::integer(value)))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(Term::new(name.into()))
    }
}

impl fmt::Display for CssTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(t) => fmt::Display::fmt(t, f),
            Self::Number(t) => fmt::Display::fmt(t, f),
            Self::Percentage(t) => fmt::Display::fmt(t, f),
            Self::Ident(t) => fmt::Display::fmt(t, f),
            Self::Hash(t) => fmt::Display::fmt(t, f),
            Self::Function(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl From<ColorTerm> for CssTerm {
    fn from(term: ColorTerm) -> Self {
        Self::Color(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_operator_symbol() {
        assert_eq!(Operator::Plus.symbol(), "+");
        assert_eq!(Operator::Minus.symbol(), "-");
        assert_eq!(Operator::from_char('-'), Some(Operator::Minus));
        assert_eq!(Operator::from_char('*'), None);
    }

    #[test]
    fn test_term_display_with_operator() {
        let term = Term::new(Number::integer(5)).with_operator(Some(Operator::Minus));
        assert_eq!(term.to_string(), "-5");
        assert_eq!(Term::new(Percentage::integer(50)).to_string(), "50%");
        assert_eq!(Term::new(Percentage::real(53.0)).to_string(), "53.0%");
    }

    #[test]
    fn test_number_integer_flag() {
        assert_eq!(Number::integer(42).int_value(), Some(42));
        assert_eq!(Number::real(42.5).int_value(), None);
        assert_eq!(Number::real(2.0).to_string(), "2.0");
        assert_ne!(Number::integer(2), Number::real(2.0));
        assert_eq!(Number::integer(i32::MAX).to_string(), "2147483647");
        assert_eq!(Number::real(-7.9).trunc(), -7);
    }

    #[test]
    fn test_terms_in_hash_set() {
        let mut set = HashSet::new();
        set.insert(CssTerm::number(1));
        set.insert(CssTerm::number(1));
        set.insert(CssTerm::percentage(1));
        set.insert(CssTerm::ident("auto"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_function_display() {
        let func = Function::new("translate", vec![CssTerm::number(1), CssTerm::percentage(50)]);
        assert_eq!(func.to_string(), "translate(1, 50%)");
    }

    #[test]
    fn test_hash_term_display() {
        let term = CssTerm::Hash(Term::new(HashText("zz".to_string())).with_operator(Some(Operator::Plus)));
        assert_eq!(term.to_string(), "+#zz");
    }
}
