use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// ASN.1 identifier octet, stored exactly as it is written on the wire.
///
/// Only the single-octet tags needed for RSA, DSA and EC key structures are
/// defined. Constructed types (SEQUENCE, SET and the context-specific tags)
/// already carry the constructed bit (`0x20`).
pub struct Tag(u8);

impl Tag {
    /// Identifier tag for a DER encoded boolean.
    /// Defined in [ITU X.680](https://www.itu.int/ITU-T/studygroups/com17/languages/X.680-0207.pdf).
    pub const BOOLEAN: Self = Self(0x01);
    /// Identifier tag for a DER encoded integer.
    /// Defined in [ITU X.680](https://www.itu.int/ITU-T/studygroups/com17/languages/X.680-0207.pdf).
    pub const INTEGER: Self = Self(0x02);
    /// Identifier tag for a DER encoded bit string.
    /// Defined in [ITU X.680](https://www.itu.int/ITU-T/studygroups/com17/languages/X.680-0207.pdf).
    pub const BIT_STRING: Self = Self(0x03);
    /// Identifier tag for a DER encoded octet string.
    pub const OCTET_STRING: Self = Self(0x04);
    /// Identifier tag for the DER encoded null value.
    pub const NULL: Self = Self(0x05);
    /// Identifier tag for a DER encoded object identifier.
    pub const OBJECT_IDENTIFIER: Self = Self(0x06);
    /// Identifier tag for a DER encoded sequence (universal 16, constructed).
    pub const SEQUENCE: Self = Self(0x30);
    /// Identifier tag for a DER encoded set (universal 17, constructed).
    pub const SET: Self = Self(0x31);
    /// Context-specific constructed tag `[0]`, used by SEC1 for the curve parameters.
    pub const CONTEXT_SPECIFIC_0: Self = Self(0xa0);
    /// Context-specific constructed tag `[1]`, used by SEC1 for the public key.
    pub const CONTEXT_SPECIFIC_1: Self = Self(0xa1);

    const CONSTRUCTED_BIT: u8 = 0x20;

    /// Create a [`Tag`] from a raw identifier octet as found in DER input.
    #[must_use]
    pub const fn from_octet(octet: u8) -> Self {
        Self(octet)
    }

    /// The identifier octet.
    #[must_use]
    pub const fn octet(self) -> u8 {
        self.0
    }

    /// Returns `true` if the value of this tag is itself a series of TLV elements.
    #[must_use]
    pub const fn is_constructed(self) -> bool {
        self.0 & Self::CONSTRUCTED_BIT != 0
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::BOOLEAN => "BOOLEAN",
            Self::INTEGER => "INTEGER",
            Self::BIT_STRING => "BIT STRING",
            Self::OCTET_STRING => "OCTET STRING",
            Self::NULL => "NULL",
            Self::OBJECT_IDENTIFIER => "OBJECT IDENTIFIER",
            Self::SEQUENCE => "SEQUENCE",
            Self::SET => "SET",
            Self::CONTEXT_SPECIFIC_0 => "[0]",
            Self::CONTEXT_SPECIFIC_1 => "[1]",
            _ => return None,
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:#04x})", self.0),
            None => write!(f, "Unknown ({:#04x})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructed_bit() {
        assert!(Tag::SEQUENCE.is_constructed());
        assert!(Tag::SET.is_constructed());
        assert!(Tag::CONTEXT_SPECIFIC_0.is_constructed());
        assert!(!Tag::INTEGER.is_constructed());
        assert!(!Tag::BIT_STRING.is_constructed());
    }

    #[test]
    fn display() {
        assert_eq!(Tag::INTEGER.to_string(), "INTEGER (0x02)");
        assert_eq!(Tag::SEQUENCE.to_string(), "SEQUENCE (0x30)");
        assert_eq!(Tag::from_octet(0x1f).to_string(), "Unknown (0x1f)");
    }
}
