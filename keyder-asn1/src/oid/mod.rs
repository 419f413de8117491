//! Object identifiers: arc encoding and the static tables of
//! algorithm and named curve identifiers used in key structures.

use crate::{Asn1Error, Tag};

mod curves;
pub use curves::{NamedCurve, curve_name, curve_oid};

/// RSA encryption algorithm identifier, defined in appendix C of
/// [RFC 8017](https://datatracker.ietf.org/doc/rfc8017/).
pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";

/// DSA algorithm identifier, defined in section 2.3.2 of
/// [RFC 3279](https://datatracker.ietf.org/doc/rfc3279/).
pub const DSA: &str = "1.2.840.10040.4.1";

/// Elliptic curve public key algorithm identifier, defined in section 2.1.1 of
/// [RFC 5480](https://datatracker.ietf.org/doc/rfc5480/).
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

const CONTINUATION_BIT: u8 = 0x80;
const ARC_BITS: u32 = 7;

/// Encode a dotted-decimal object identifier into its content octets,
/// as defined in section 8.19 of
/// [ITU X.690](https://www.itu.int/ITU-T/studygroups/com17/languages/X.690-0207.pdf).
///
/// The first two arcs are combined into one subidentifier (`arc1 * 40 + arc2`),
/// every subidentifier is written in base 128 with the high bit set on all
/// but its last octet.
///
/// ```
/// use keyder_asn1::oid::encode_oid_arcs;
///
/// assert_eq!(
///     encode_oid_arcs("1.2.840.113549.1.1.1").unwrap(),
///     [0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01],
/// );
/// ```
pub fn encode_oid_arcs(oid: &str) -> Result<Vec<u8>, Asn1Error> {
    let arcs = oid
        .split('.')
        .map(|arc| parse_arc(oid, arc))
        .collect::<Result<Vec<u64>, _>>()?;

    let (first, second, rest) = match arcs.as_slice() {
        [first, second, rest @ ..] => (*first, *second, rest),
        _ => return Err(Asn1Error::invalid_oid(oid, "at least two arcs are required")),
    };
    if first > 2 {
        return Err(Asn1Error::invalid_oid(oid, "first arc must be 0, 1 or 2"));
    }
    if first < 2 && second >= 40 {
        return Err(Asn1Error::invalid_oid(
            oid,
            "second arc must be below 40 when the first arc is 0 or 1",
        ));
    }
    let combined = (first * 40)
        .checked_add(second)
        .ok_or_else(|| Asn1Error::invalid_oid(oid, "second arc is too large"))?;

    let mut out = Vec::with_capacity(arcs.len() + 4);
    push_base128(&mut out, combined);
    for arc in rest {
        push_base128(&mut out, *arc);
    }
    Ok(out)
}

fn parse_arc(oid: &str, arc: &str) -> Result<u64, Asn1Error> {
    if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Asn1Error::invalid_oid(oid, "arcs must be non-empty decimal numbers"));
    }
    arc.parse()
        .map_err(|_err| Asn1Error::invalid_oid(oid, "arc does not fit in 64 bits"))
}

fn push_base128(out: &mut Vec<u8>, value: u64) {
    let significant_bits = u64::BITS - value.leading_zeros();
    let groups = significant_bits.div_ceil(ARC_BITS).max(1);
    for group in (0..groups).rev() {
        let octet = ((value >> (group * ARC_BITS)) & 0x7f) as u8;
        if group == 0 {
            out.push(octet);
        } else {
            out.push(octet | CONTINUATION_BIT);
        }
    }
}

/// Decode the content octets of an object identifier back into its
/// dotted-decimal form. The inverse of [`encode_oid_arcs`].
///
/// Subidentifiers with a leading `0x80` octet (non-minimal) or
/// an unterminated last subidentifier are rejected.
pub fn decode_object_identifier(content: &[u8]) -> Result<String, Asn1Error> {
    let mut subidentifiers = Vec::new();
    let mut current: u64 = 0;
    let mut in_progress = false;

    for octet in content {
        if !in_progress && *octet == CONTINUATION_BIT {
            return Err(invalid_oid_value("subidentifier is not minimally encoded"));
        }
        if current > (u64::MAX >> ARC_BITS) {
            return Err(invalid_oid_value("subidentifier does not fit in 64 bits"));
        }
        current = (current << ARC_BITS) | u64::from(octet & 0x7f);
        if octet & CONTINUATION_BIT != 0 {
            in_progress = true;
        } else {
            subidentifiers.push(current);
            current = 0;
            in_progress = false;
        }
    }
    if in_progress {
        return Err(invalid_oid_value("last subidentifier is unterminated"));
    }

    let Some((combined, rest)) = subidentifiers.split_first() else {
        return Err(invalid_oid_value("no subidentifiers"));
    };
    let (first, second) = match *combined {
        v if v < 40 => (0, v),
        v if v < 80 => (1, v - 40),
        v => (2, v - 80),
    };

    let mut oid = format!("{first}.{second}");
    for arc in rest {
        oid.push('.');
        oid.push_str(&arc.to_string());
    }
    Ok(oid)
}

fn invalid_oid_value(reason: &'static str) -> Asn1Error {
    Asn1Error::InvalidValue {
        tag: Tag::OBJECT_IDENTIFIER,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    #[test]
    fn encode_rsa_encryption() {
        assert_eq!(
            encode_oid_arcs(RSA_ENCRYPTION).unwrap(),
            hex::decode("2a864886f70d010101").unwrap()
        );
    }

    #[test]
    fn encode_algorithm_and_curve_oids() {
        assert_eq!(
            encode_oid_arcs(DSA).unwrap(),
            hex::decode("2a8648ce380401").unwrap()
        );
        assert_eq!(
            encode_oid_arcs(EC_PUBLIC_KEY).unwrap(),
            hex::decode("2a8648ce3d0201").unwrap()
        );
        assert_eq!(
            encode_oid_arcs("1.2.840.10045.3.1.7").unwrap(),
            hex::decode("2a8648ce3d030107").unwrap()
        );
        assert_eq!(
            encode_oid_arcs("1.3.132.0.34").unwrap(),
            hex::decode("2b81040022").unwrap()
        );
    }

    #[test]
    fn encode_first_arc_two_with_large_second_arc() {
        // 2.999 -> 2*40 + 999 = 1079 = 0x437
        assert_eq!(encode_oid_arcs("2.999.3").unwrap(), [0x88, 0x37, 0x03]);
    }

    #[test]
    fn encode_rejects_malformed_oids() {
        for oid in ["", "1", "1.", ".1.2", "1..2", "a.b", "3.1", "1.40", "0.99", "1.+2"] {
            assert!(
                matches!(
                    encode_oid_arcs(oid),
                    Err(Asn1Error::InvalidObjectIdentifier { .. })
                ),
                "oid: {oid:?}"
            );
        }
    }

    #[test]
    fn decode_rsa_encryption() {
        let content = hex::decode("2a864886f70d010101").unwrap();
        assert_eq!(
            decode_object_identifier(&content).unwrap(),
            "1.2.840.113549.1.1.1"
        );
    }

    #[test]
    fn decode_rejects_non_minimal_and_unterminated() {
        assert!(decode_object_identifier(&[0x2a, 0x80, 0x01]).is_err());
        assert!(decode_object_identifier(&[0x2a, 0x86]).is_err());
        assert!(decode_object_identifier(&[]).is_err());
    }

    #[derive(Debug, Clone)]
    struct DottedOid(String);

    impl Arbitrary for DottedOid {
        fn arbitrary(g: &mut Gen) -> Self {
            let first = u64::arbitrary(g) % 3;
            let second = if first == 2 {
                u64::arbitrary(g) % 100_000
            } else {
                u64::arbitrary(g) % 40
            };
            let tail_len = usize::arbitrary(g) % 8;
            let mut oid = format!("{first}.{second}");
            for _ in 0..tail_len {
                oid.push('.');
                oid.push_str(&u64::arbitrary(g).to_string());
            }
            Self(oid)
        }
    }

    #[quickcheck]
    fn oid_round_trip(oid: DottedOid) -> bool {
        let encoded = encode_oid_arcs(&oid.0).unwrap();
        decode_object_identifier(&encoded).unwrap() == oid.0
    }
}
