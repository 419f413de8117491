//! DER encoders for the universal types used in key structures.
//!
//! Every function returns a complete, owned TLV element.
//! Constructed values are built by concatenating already encoded
//! children and wrapping them with [`wrap_sequence`] (or one of its siblings).

use crate::{Asn1Error, Tag, encode_length, oid::encode_oid_arcs};

/// Mask of the sign bit in the first content octet of an INTEGER.
const INTEGER_SIGN_BIT_MASK: u8 = 0x80;

/// Octet that indicates that no unused bits are present in a bit string.
/// Defined in section 8.6 of [ITU X.690](https://www.itu.int/ITU-T/studygroups/com17/languages/X.690-0207.pdf).
const BIT_STRING_NO_UNUSED_BITS: u8 = 0x00;

/// Encode `tag ++ length(value) ++ value`.
#[must_use]
pub fn encode_tlv(tag: Tag, value: &[u8]) -> Vec<u8> {
    let len_bytes = encode_length(value.len());
    let mut result = Vec::with_capacity(1 + len_bytes.len() + value.len());
    result.push(tag.octet());
    result.extend_from_slice(&len_bytes);
    result.extend_from_slice(value);
    result
}

/// Encode a BOOLEAN as a single `0x01` (true) or `0x00` (false) content octet.
///
/// Strict DER writes `0xff` for true; the decoder of this crate
/// reads any non-zero octet as true so both forms round trip.
#[must_use]
pub fn encode_boolean(value: bool) -> Vec<u8> {
    encode_tlv(Tag::BOOLEAN, &[u8::from(value)])
}

/// Encode a machine integer as a DER INTEGER.
///
/// The value is laid out in the narrowest of 8, 16, 32 or 64 bits that holds it
/// and reduced to its minimal two's complement form.
///
/// ```
/// use keyder_asn1::encode::encode_integer;
///
/// assert_eq!(encode_integer(0), [0x02, 0x01, 0x00]);
/// assert_eq!(encode_integer(128), [0x02, 0x02, 0x00, 0x80]);
/// assert_eq!(encode_integer(-129), [0x02, 0x02, 0xff, 0x7f]);
/// ```
#[must_use]
pub fn encode_integer(value: i64) -> Vec<u8> {
    let bytes: Vec<u8> = if let Ok(v) = i8::try_from(value) {
        v.to_be_bytes().into()
    } else if let Ok(v) = i16::try_from(value) {
        v.to_be_bytes().into()
    } else if let Ok(v) = i32::try_from(value) {
        v.to_be_bytes().into()
    } else {
        value.to_be_bytes().into()
    };
    encode_integer_from_binary(minimal_twos_complement(&bytes), false)
}

/// Encode a big-endian binary as a DER INTEGER.
///
/// With `force_positive` the binary is an unsigned magnitude, as all key parameters are:
/// redundant leading zero octets are dropped and a single `0x00` is prepended
/// when the sign bit of the first octet is set, so the value is never read as negative.
///
/// Without `force_positive` the binary is taken verbatim as two's complement.
///
/// An empty binary encodes zero.
///
/// ```
/// use keyder_asn1::encode::encode_integer_from_binary;
///
/// assert_eq!(encode_integer_from_binary(&[0x80], true), [0x02, 0x02, 0x00, 0x80]);
/// assert_eq!(encode_integer_from_binary(&[0x80], false), [0x02, 0x01, 0x80]);
/// ```
#[must_use]
pub fn encode_integer_from_binary(bin: &[u8], force_positive: bool) -> Vec<u8> {
    let value = if force_positive {
        let leading_zeros = bin.iter().take_while(|b| **b == 0).count();
        bin.get(leading_zeros..).unwrap_or_default()
    } else {
        bin
    };

    let Some(first) = value.first() else {
        return encode_tlv(Tag::INTEGER, &[0x00]);
    };

    let needs_leading_zero = force_positive && first & INTEGER_SIGN_BIT_MASK != 0;
    let value_len = value.len() + needs_leading_zero as usize;
    let len_bytes = encode_length(value_len);
    let mut result = Vec::with_capacity(1 + len_bytes.len() + value_len);
    result.push(Tag::INTEGER.octet());
    result.extend_from_slice(&len_bytes);
    if needs_leading_zero {
        result.push(0);
    }
    result.extend_from_slice(value);
    result
}

/// Drop octets that only repeat the sign of the next octet.
fn minimal_twos_complement(bytes: &[u8]) -> &[u8] {
    let redundant = bytes
        .windows(2)
        .take_while(|pair| match pair {
            [0x00, next] => next & INTEGER_SIGN_BIT_MASK == 0,
            [0xff, next] => next & INTEGER_SIGN_BIT_MASK != 0,
            _ => false,
        })
        .count();
    bytes.get(redundant..).unwrap_or(bytes)
}

/// Encode the NULL value.
#[must_use]
pub fn encode_null() -> Vec<u8> {
    vec![Tag::NULL.octet(), 0x00]
}

/// Encode an OCTET STRING.
#[must_use]
pub fn encode_octet_string(value: &[u8]) -> Vec<u8> {
    encode_tlv(Tag::OCTET_STRING, value)
}

/// Encode a byte aligned BIT STRING, defined in section 8.6 of
/// [ITU X.690](https://www.itu.int/ITU-T/studygroups/com17/languages/X.690-0207.pdf).
///
/// The first content octet (unused bits) is always `0x00`.
#[must_use]
pub fn encode_bit_string(value: &[u8]) -> Vec<u8> {
    let len_bytes = encode_length(value.len() + 1);
    let mut result = Vec::with_capacity(2 + len_bytes.len() + value.len());
    result.push(Tag::BIT_STRING.octet());
    result.extend_from_slice(&len_bytes);
    result.push(BIT_STRING_NO_UNUSED_BITS);
    result.extend_from_slice(value);
    result
}

/// Encode a dotted-decimal OBJECT IDENTIFIER.
///
/// ```
/// use keyder_asn1::encode::encode_object_identifier;
///
/// assert_eq!(
///     encode_object_identifier("1.2.840.113549.1.1.1").unwrap(),
///     [0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01],
/// );
/// ```
pub fn encode_object_identifier(oid: &str) -> Result<Vec<u8>, Asn1Error> {
    let arcs = encode_oid_arcs(oid)?;
    Ok(encode_tlv(Tag::OBJECT_IDENTIFIER, &arcs))
}

/// Wrap the concatenation of encoded children in a SEQUENCE.
#[must_use]
pub fn wrap_sequence(children: &[u8]) -> Vec<u8> {
    encode_tlv(Tag::SEQUENCE, children)
}

/// Wrap the concatenation of encoded children in a SET.
///
/// Children are written in the given order; sorting them as DER
/// requires for SET OF is left to the caller.
#[must_use]
pub fn wrap_set(children: &[u8]) -> Vec<u8> {
    encode_tlv(Tag::SET, children)
}

/// Wrap one encoded child in an explicit context-specific tag,
/// such as the `[0]` parameters and `[1]` public key of a SEC1 private key.
#[must_use]
pub fn wrap_context_specific(tag: Tag, child: &[u8]) -> Vec<u8> {
    encode_tlv(tag, child)
}
