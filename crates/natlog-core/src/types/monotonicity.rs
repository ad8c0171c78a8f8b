//! Monotonicity marks and quantifier classes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Monotonicity (polarity) of a position in a sentence.
///
/// UP positions license substitution by a more general term while preserving
/// truth; DOWN positions license a more specific term; FLAT positions license
/// neither. INVALID marks a position whose polarity has not been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Monotonicity {
    /// Upward monotone: generalization preserves truth.
    Up,
    /// Downward monotone: specialization preserves truth.
    Down,
    /// Non-monotone: neither direction preserves truth.
    Flat,
    /// Polarity not yet computed.
    #[default]
    Invalid,
}

impl Monotonicity {
    /// Pack into 2 bits for the search node quantifier-override table.
    #[must_use]
    pub const fn to_bits(self) -> u8 {
        match self {
            Monotonicity::Invalid => 0,
            Monotonicity::Up => 1,
            Monotonicity::Down => 2,
            Monotonicity::Flat => 3,
        }
    }

    /// Unpack from 2 bits. Values above 3 are masked off by the caller.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => Monotonicity::Up,
            2 => Monotonicity::Down,
            3 => Monotonicity::Flat,
            _ => Monotonicity::Invalid,
        }
    }
}

/// Algebraic class of a quantifier, per side of its scope.
///
/// Determines how negation-family relations survive projection through the
/// quantifier (additive preserves unions, multiplicative preserves
/// intersections).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantifierType {
    /// Not a quantified position.
    #[default]
    None,
    /// Additive: preserves cover through projection.
    Additive,
    /// Multiplicative: preserves alternation through projection.
    Multiplicative,
    /// Both additive and multiplicative: preserves negation.
    Both,
}

/// Parse an annotator monotonicity specifier into (class, polarity).
///
/// Vocabulary follows the annotator's convention: `additive`,
/// `anti-additive`, `multiplicative`, `anti-multiplicative`, `both`,
/// `anti-both`, `nonmonotone`. The `anti-` prefix marks downward polarity.
pub fn parse_monotonicity_spec(spec: &str) -> Result<(QuantifierType, Monotonicity), CoreError> {
    match spec {
        "additive" => Ok((QuantifierType::Additive, Monotonicity::Up)),
        "anti-additive" => Ok((QuantifierType::Additive, Monotonicity::Down)),
        "multiplicative" => Ok((QuantifierType::Multiplicative, Monotonicity::Up)),
        "anti-multiplicative" => Ok((QuantifierType::Multiplicative, Monotonicity::Down)),
        "both" => Ok((QuantifierType::Both, Monotonicity::Up)),
        "anti-both" => Ok((QuantifierType::Both, Monotonicity::Down)),
        "nonmonotone" => Ok((QuantifierType::None, Monotonicity::Flat)),
        other => Err(CoreError::UnknownMonotonicity(other.to_string())),
    }
}
