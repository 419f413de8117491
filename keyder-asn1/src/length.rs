use crate::Asn1Error;
use nom::{IResult, Parser, bytes::complete::take, number::complete::be_u8};

/// Maximum length of a DER encoded length in short form.
/// Defined in section 8.1.3.4 of [ITU X.690](https://www.itu.int/ITU-T/studygroups/com17/languages/X.690-0207.pdf).
const SHORT_FORM_MAX: usize = 0x7f;

/// Bit set in the first length octet when the long form is used.
const LONG_FORM_BIT: u8 = 0x80;

/// Encode a length as defined in section 8.1.3 of
/// [ITU X.690](https://www.itu.int/ITU-T/studygroups/com17/languages/X.690-0207.pdf),
/// restricted to the DER rules of section 10.1: the short form for lengths up to
/// 127 and otherwise the long form with the minimal number of length octets.
///
/// ```
/// use keyder_asn1::encode_length;
///
/// assert_eq!(encode_length(127), [0x7f]);
/// assert_eq!(encode_length(128), [0x81, 0x80]);
/// assert_eq!(encode_length(271), [0x82, 0x01, 0x0f]);
/// ```
#[must_use]
pub fn encode_length(len: usize) -> Vec<u8> {
    if len <= SHORT_FORM_MAX {
        return vec![len as u8];
    }

    let be_bytes = len.to_be_bytes();
    let significant: Vec<u8> = be_bytes.iter().copied().skip_while(|b| *b == 0).collect();

    let mut result = Vec::with_capacity(1 + significant.len());
    result.push(LONG_FORM_BIT | significant.len() as u8);
    result.extend_from_slice(&significant);
    result
}

/// Decode the length octets at the start of `input`,
/// returning the remaining input and the decoded length.
///
/// Only canonical DER lengths are accepted: the indefinite form,
/// long form lengths that would fit the short form and long form
/// lengths with leading zero octets are all rejected.
pub fn decode_length(input: &[u8]) -> Result<(&[u8], usize), Asn1Error> {
    crate::decode::finish(parse_length(input))
}

pub(crate) fn parse_length(input: &[u8]) -> IResult<&[u8], usize, Asn1Error> {
    let (input, first) = be_u8::<_, Asn1Error>(input)?;
    if first & LONG_FORM_BIT == 0 {
        return Ok((input, usize::from(first)));
    }

    let count = usize::from(first & !LONG_FORM_BIT);
    if count == 0 {
        return Err(nom::Err::Failure(Asn1Error::IndefiniteLength));
    }
    if count > size_of::<usize>() {
        return Err(nom::Err::Failure(Asn1Error::LengthOverflow));
    }

    let (input, octets) = take::<_, _, Asn1Error>(count).parse(input)?;
    if octets.first() == Some(&0) {
        return Err(nom::Err::Failure(Asn1Error::NonCanonicalLength));
    }

    let len = octets
        .iter()
        .fold(0usize, |acc, octet| (acc << 8) | usize::from(*octet));
    if len <= SHORT_FORM_MAX {
        return Err(nom::Err::Failure(Asn1Error::NonCanonicalLength));
    }

    Ok((input, len))
}
