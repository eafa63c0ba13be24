//! CSS Color Terms
//!
//! Colors written as `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a keyword all end
//! up as the same sRGB byte triple. Serialization is always `#rrggbb`.

use std::fmt;

use crate::named::resolve_named_color;
use crate::term::{CssTerm, Function, Percentage, Term};
use crate::TermError;

/// Name of the color function
pub const COLOR_FUNCTION_NAME: &str = "rgb";
const COLOR_ARGS: usize = 3;
const MAX_COMPONENT: i64 = 255;
const MIN_COMPONENT: i64 = 0;
const PERCENT: i64 = 100;

/// sRGB color as a byte triple, no alpha
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorValue {
    red: u8,
    green: u8,
    blue: u8,
}

impl ColorValue {
    pub const BLACK: ColorValue = ColorValue::new(0, 0, 0);
    pub const WHITE: ColorValue = ColorValue::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Unpack `0xRRGGBB`; bits above the low 24 are ignored
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn red(self) -> u8 {
        self.red
    }

    pub const fn green(self) -> u8 {
        self.green
    }

    pub const fn blue(self) -> u8 {
        self.blue
    }

    /// Pack as `0xRRGGBB`
    pub const fn to_rgb24(self) -> u32 {
        (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_rgb24())
    }
}

impl From<(u8, u8, u8)> for ColorValue {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColorValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ColorValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = <String as serde::Deserialize>::deserialize(deserializer)?;
        decode_hex(&hex).ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {}", hex)))
    }
}

/// Decode `#rgb` or `#rrggbb` (hex digits in any case).
///
/// Every other shape yields `None`.
pub fn decode_hex(input: &str) -> Option<ColorValue> {
    let digits = input.strip_prefix('#')?;
    // from_str_radix alone would accept a leading '+'
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        3 => {
            // `a` -> `aa`
            let r = u8::from_str_radix(&digits[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&digits[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&digits[2..3], 16).ok()? * 17;
            Some(ColorValue::new(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some(ColorValue::new(r, g, b))
        }
        _ => None,
    }
}

/// Decode `rgb(r, g, b)` from its name and argument terms.
///
/// Arguments are integers or percentages; results are clamped to 0..=255.
pub fn decode_function(name: &str, args: &[CssTerm]) -> Option<ColorValue> {
    if name != COLOR_FUNCTION_NAME || args.len() != COLOR_ARGS {
        return None;
    }

    let mut rgb = [0i64; COLOR_ARGS];
    for (component, arg) in rgb.iter_mut().zip(args) {
        *component = match arg {
            CssTerm::Number(number) => number.value().int_value()?,
            CssTerm::Percentage(percentage) => percent_to_component(*percentage.value()),
            CssTerm::Color(_) | CssTerm::Ident(_) | CssTerm::Hash(_) | CssTerm::Function(_) => {
                return None;
            }
        };
    }

    let [r, g, b] = rgb.map(clamp_component);
    Some(ColorValue::new(r, g, b))
}

/// `50%` -> 127; the percentage is truncated before scaling
fn percent_to_component(percentage: Percentage) -> i64 {
    percentage.number().trunc().saturating_mul(MAX_COMPONENT) / PERCENT
}

fn clamp_component(value: i64) -> u8 {
    value.clamp(MIN_COMPONENT, MAX_COMPONENT) as u8
}

/// Color term: a color value plus the shared operator slot
pub type ColorTerm = Term<ColorValue>;

impl Term<ColorValue> {
    /// Color from a hash string such as `#abc` or `#aabbcc`
    pub fn from_hash(hash: &str) -> Option<Self> {
        decode_hex(hash).map(Term::new)
    }

    /// Like [`from_hash`](Self::from_hash) for callers whose hash may be
    /// missing. A missing hash is a caller error, not a failed match.
    pub fn from_hash_checked(hash: Option<&str>) -> Result<Option<Self>, TermError> {
        let hash = hash.ok_or_else(|| {
            TermError::InvalidArgument("missing hash value for color construction".into())
        })?;
        Ok(Self::from_hash(hash))
    }

    /// Color from an `rgb()` function term
    pub fn from_function(function: &Function) -> Option<Self> {
        decode_function(&function.name, &function.args).map(Term::new)
    }

    /// Color from a named keyword such as `navy`
    pub fn from_ident(ident: &str) -> Option<Self> {
        resolve_named_color(ident).map(Term::new)
    }

    pub fn color(&self) -> ColorValue {
        *self.value()
    }
}
