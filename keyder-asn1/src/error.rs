use crate::Tag;
use nom::error::{ErrorKind, ParseError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error returned by the encoding and decoding functions of this crate.
pub enum Asn1Error {
    /// The dotted-decimal object identifier could not be encoded.
    InvalidObjectIdentifier {
        oid: String,
        reason: &'static str,
    },
    /// Input ended before the announced element was complete.
    Truncated,
    /// The input could not be parsed as a TLV element.
    Malformed,
    /// An element was found with another tag than the one required.
    UnexpectedTag { expected: Tag, found: Tag },
    /// The length octets do not follow the DER (definite, minimal) rules.
    NonCanonicalLength,
    /// Indefinite length (`0x80`) is BER only.
    IndefiniteLength,
    /// The length does not fit in a machine word.
    LengthOverflow,
    /// The content octets violate the encoding rules of their type.
    InvalidValue { tag: Tag, reason: &'static str },
    /// Bytes remained after the element that was expected to be the last one.
    TrailingData { remaining: usize },
}

impl fmt::Display for Asn1Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectIdentifier { oid, reason } => {
                write!(f, "asn1: invalid object identifier '{oid}': {reason}")
            }
            Self::Truncated => write!(f, "asn1: truncated input"),
            Self::Malformed => write!(f, "asn1: malformed input"),
            Self::UnexpectedTag { expected, found } => {
                write!(f, "asn1: expected tag {expected}, found {found}")
            }
            Self::NonCanonicalLength => write!(f, "asn1: non-canonical DER length"),
            Self::IndefiniteLength => write!(f, "asn1: indefinite length is not allowed in DER"),
            Self::LengthOverflow => write!(f, "asn1: length does not fit in usize"),
            Self::InvalidValue { tag, reason } => {
                write!(f, "asn1: invalid {tag} value: {reason}")
            }
            Self::TrailingData { remaining } => {
                write!(f, "asn1: {remaining} trailing byte(s) after element")
            }
        }
    }
}

impl std::error::Error for Asn1Error {}

impl<I> ParseError<I> for Asn1Error {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Eof | ErrorKind::Complete => Self::Truncated,
            _ => Self::Malformed,
        }
    }

    fn append(_input: I, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl Asn1Error {
    pub(crate) fn invalid_oid(oid: &str, reason: &'static str) -> Self {
        Self::InvalidObjectIdentifier {
            oid: oid.to_owned(),
            reason,
        }
    }
}
