//! Strict DER decoding of the tags used in key structures.
//!
//! This is not a general purpose ASN.1 parser: it reads single octet tags,
//! definite canonical lengths and offers typed accessors for the
//! universal types that appear in PKCS#1, SEC1 and X.509 key encodings.

use crate::{Asn1Error, Tag, length::parse_length, oid::decode_object_identifier};
use nom::{
    IResult, Parser, combinator::verify, multi::length_data, number::complete::be_u8,
};

/// Low five bits of an identifier octet that announce a multi-octet tag number.
const HIGH_TAG_NUMBER_FORM: u8 = 0x1f;

const INTEGER_SIGN_BIT_MASK: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A decoded TLV element borrowing its content octets from the input.
pub struct Tlv<'a> {
    tag: Tag,
    value: &'a [u8],
}

/// Decode the TLV element at the start of `input`,
/// returning the remaining input and the element.
pub fn decode_tlv(input: &[u8]) -> Result<(&[u8], Tlv<'_>), Asn1Error> {
    finish(parse_tlv(input))
}

/// Decode `input` as exactly one TLV element.
pub fn decode_single(input: &[u8]) -> Result<Tlv<'_>, Asn1Error> {
    let (rest, tlv) = decode_tlv(input)?;
    if !rest.is_empty() {
        return Err(Asn1Error::TrailingData {
            remaining: rest.len(),
        });
    }
    Ok(tlv)
}

fn parse_tlv(input: &[u8]) -> IResult<&[u8], Tlv<'_>, Asn1Error> {
    let (input, (tag, value)) = (
        verify(be_u8, |tag: &u8| {
            tag & HIGH_TAG_NUMBER_FORM != HIGH_TAG_NUMBER_FORM
        }),
        length_data(parse_length),
    )
        .parse(input)?;
    Ok((
        input,
        Tlv {
            tag: Tag::from_octet(tag),
            value,
        },
    ))
}

pub(crate) fn finish<'a, T>(
    result: IResult<&'a [u8], T, Asn1Error>,
) -> Result<(&'a [u8], T), Asn1Error> {
    result.map_err(|err| match err {
        nom::Err::Error(err) | nom::Err::Failure(err) => err,
        nom::Err::Incomplete(_) => Asn1Error::Truncated,
    })
}

impl<'a> Tlv<'a> {
    /// Identifier octet of this element.
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Raw content octets.
    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Return this element if it carries `tag`.
    pub fn expect_tag(self, tag: Tag) -> Result<Self, Asn1Error> {
        if self.tag == tag {
            Ok(self)
        } else {
            Err(Asn1Error::UnexpectedTag {
                expected: tag,
                found: self.tag,
            })
        }
    }

    /// Read a BOOLEAN, any non-zero content octet is true.
    pub fn boolean(&self) -> Result<bool, Asn1Error> {
        match self.expect_tag(Tag::BOOLEAN)?.value {
            [octet] => Ok(*octet != 0),
            _ => Err(self.invalid("boolean must be exactly one octet")),
        }
    }

    /// Read an INTEGER as minimal two's complement big-endian octets.
    pub fn integer(&self) -> Result<&'a [u8], Asn1Error> {
        match self.expect_tag(Tag::INTEGER)?.value {
            [] => Err(self.invalid("integer has no content octets")),
            [0x00, next, ..] if next & INTEGER_SIGN_BIT_MASK == 0 => {
                Err(self.invalid("integer is not minimally encoded"))
            }
            [0xff, next, ..] if next & INTEGER_SIGN_BIT_MASK != 0 => {
                Err(self.invalid("integer is not minimally encoded"))
            }
            value => Ok(value),
        }
    }

    /// Read a non-negative INTEGER as its unsigned big-endian magnitude,
    /// without the `0x00` sign octet. Zero is returned as an empty slice.
    pub fn unsigned_integer(&self) -> Result<&'a [u8], Asn1Error> {
        match self.integer()? {
            [first, ..] if first & INTEGER_SIGN_BIT_MASK != 0 => {
                Err(self.invalid("integer is negative"))
            }
            [0x00, magnitude @ ..] => Ok(magnitude),
            magnitude => Ok(magnitude),
        }
    }

    /// Read the NULL value.
    pub fn null(&self) -> Result<(), Asn1Error> {
        if self.expect_tag(Tag::NULL)?.value.is_empty() {
            Ok(())
        } else {
            Err(self.invalid("null must have no content octets"))
        }
    }

    /// Read an OCTET STRING.
    pub fn octet_string(&self) -> Result<&'a [u8], Asn1Error> {
        Ok(self.expect_tag(Tag::OCTET_STRING)?.value)
    }

    /// Read a byte aligned BIT STRING, returning the bits without the unused bits octet.
    pub fn bit_string(&self) -> Result<&'a [u8], Asn1Error> {
        match self.expect_tag(Tag::BIT_STRING)?.value {
            [0x00, bits @ ..] => Ok(bits),
            [] => Err(self.invalid("bit string is missing its unused bits octet")),
            _ => Err(self.invalid("only byte aligned bit strings are supported")),
        }
    }

    /// Read an OBJECT IDENTIFIER in dotted-decimal form.
    pub fn object_identifier(&self) -> Result<String, Asn1Error> {
        decode_object_identifier(self.expect_tag(Tag::OBJECT_IDENTIFIER)?.value)
    }

    /// Iterate over the elements contained in a constructed value.
    pub fn children(&self) -> Result<Children<'a>, Asn1Error> {
        if !self.tag.is_constructed() {
            return Err(self.invalid("primitive value has no children"));
        }
        Ok(Children {
            remaining: self.value,
        })
    }

    fn invalid(&self, reason: &'static str) -> Asn1Error {
        Asn1Error::InvalidValue {
            tag: self.tag,
            reason,
        }
    }
}

#[derive(Debug, Clone)]
/// Iterator over the children of a constructed [`Tlv`].
pub struct Children<'a> {
    remaining: &'a [u8],
}

impl<'a> Children<'a> {
    /// Decode the next child, failing with [`Asn1Error::Truncated`] when none is left.
    pub fn next_tlv(&mut self) -> Result<Tlv<'a>, Asn1Error> {
        self.next().unwrap_or(Err(Asn1Error::Truncated))
    }

    /// Ensure all children were consumed.
    pub fn finish(self) -> Result<(), Asn1Error> {
        if self.remaining.is_empty() {
            Ok(())
        } else {
            Err(Asn1Error::TrailingData {
                remaining: self.remaining.len(),
            })
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Result<Tlv<'a>, Asn1Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        match decode_tlv(self.remaining) {
            Ok((rest, tlv)) => {
                self.remaining = rest;
                Some(Ok(tlv))
            }
            Err(err) => {
                self.remaining = &[];
                Some(Err(err))
            }
        }
    }
}
