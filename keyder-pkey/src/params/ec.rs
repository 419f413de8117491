use super::{
    expect_version,
    spki::{SubjectPublicKeyInfo, encode_spki},
};
use crate::{KeyError, Pem, PemLabel};
use keyder_asn1::{
    Asn1Error, NamedCurve, Tag,
    decode::{Tlv, decode_single},
    encode::{
        encode_bit_string, encode_integer, encode_object_identifier, encode_octet_string,
        wrap_context_specific, wrap_sequence,
    },
    oid,
};

/// Leading octet of an uncompressed point, defined in section 2.3.3 of
/// [SEC 1](https://www.secg.org/sec1-v2.pdf).
const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public EC key: a named curve and the affine coordinates of the public point.
pub struct EcPublicParameters {
    /// Curve name, any name known to the named curve table.
    pub curve: String,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Private EC key: a named curve, the public point and the private scalar.
pub struct EcPrivateParameters {
    /// Curve name, any name known to the named curve table.
    pub curve: String,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
    pub d: Vec<u8>,
}

fn resolve_curve(name: &str) -> Result<NamedCurve, KeyError> {
    NamedCurve::from_name(name).ok_or_else(|| KeyError::UnsupportedCurve(name.to_owned()))
}

fn curve_from_oid(oid: String) -> Result<NamedCurve, KeyError> {
    NamedCurve::from_oid(&oid).ok_or(KeyError::UnsupportedCurve(oid))
}

/// Left pad `bytes` with zero octets up to `width`.
pub(crate) fn left_pad(bytes: &[u8], width: usize) -> Vec<u8> {
    let mut padded = vec![0; width.saturating_sub(bytes.len())];
    padded.extend_from_slice(bytes);
    padded
}

/// Left pad `bytes` to `width`, dropping leading zero octets beyond it.
fn fixed_width(bytes: &[u8], width: usize) -> Vec<u8> {
    let excess = bytes.len().saturating_sub(width);
    let redundant = bytes.iter().take(excess).take_while(|b| **b == 0).count();
    left_pad(bytes.get(redundant..).unwrap_or_default(), width)
}

/// `0x04 || x || y`, both coordinates written at the field size of the curve.
fn uncompressed_point(curve: NamedCurve, x: &[u8], y: &[u8]) -> Vec<u8> {
    let width = curve.field_size();
    let mut point = Vec::with_capacity(1 + 2 * width);
    point.push(UNCOMPRESSED_POINT_TAG);
    point.extend(fixed_width(x, width));
    point.extend(fixed_width(y, width));
    point
}

/// Split an uncompressed point into its `x` and `y` coordinates.
pub(crate) fn split_uncompressed_point(point: &[u8]) -> Result<(&[u8], &[u8]), KeyError> {
    match point {
        [UNCOMPRESSED_POINT_TAG, coordinates @ ..]
            if !coordinates.is_empty() && coordinates.len() % 2 == 0 =>
        {
            Ok(coordinates.split_at(coordinates.len() / 2))
        }
        _ => Err(KeyError::InvalidEcPoint),
    }
}

fn named_curve_parameters(parameters: Tlv<'_>) -> Result<NamedCurve, KeyError> {
    if parameters.tag() != Tag::OBJECT_IDENTIFIER {
        return Err(KeyError::UnsupportedCurve(
            "explicit curve parameters".to_owned(),
        ));
    }
    curve_from_oid(parameters.object_identifier()?)
}

impl EcPublicParameters {
    /// Encode as a SubjectPublicKeyInfo as defined in section 2 of
    /// [RFC 5480](https://datatracker.ietf.org/doc/rfc5480/):
    /// the curve identifier is the algorithm parameter and
    /// the uncompressed point is the subject public key.
    ///
    /// The curve is resolved before anything is encoded,
    /// an unknown curve fails with [`KeyError::UnsupportedCurve`].
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let curve = resolve_curve(&self.curve)?;
        let der = encode_spki(
            oid::EC_PUBLIC_KEY,
            &encode_object_identifier(curve.oid())?,
            &uncompressed_point(curve, &self.x, &self.y),
        )?;
        tracing::trace!(der.len = der.len(), curve = %curve, "built ec public key");
        Ok(der)
    }

    /// Encode as a `PUBLIC KEY` [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(PemLabel::PublicKey, self.to_der()?))
    }

    /// Decode a SubjectPublicKeyInfo holding an EC public key on a named curve.
    ///
    /// The curve is reported by its canonical name.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        Self::from_spki(&SubjectPublicKeyInfo::from_der(der)?)
    }

    pub(super) fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> Result<Self, KeyError> {
        spki.expect_algorithm(oid::EC_PUBLIC_KEY)?;
        let curve = named_curve_parameters(spki.parameters()?)?;
        let (x, y) = split_uncompressed_point(spki.subject_public_key)?;
        Ok(Self {
            curve: curve.name().to_owned(),
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }
}

impl EcPrivateParameters {
    /// Encode as the `ECPrivateKey` sequence defined in section C.4 of
    /// [SEC 1](https://www.secg.org/sec1-v2.pdf):
    ///
    /// ```text
    /// ECPrivateKey = SEQUENCE {
    ///     version INTEGER { ecPrivkeyVer1(1) },
    ///     privateKey OCTET STRING,
    ///     parameters [0] ECDomainParameters {{ SECGCurveNames }},
    ///     publicKey [1] BIT STRING
    /// }
    /// ```
    ///
    /// `x`, `y` and `d` are left padded to the field size of the curve.
    /// The curve is resolved before anything is encoded,
    /// an unknown curve fails with [`KeyError::UnsupportedCurve`].
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let curve = resolve_curve(&self.curve)?;
        let point = uncompressed_point(curve, &self.x, &self.y);
        let der = wrap_sequence(
            &[
                encode_integer(1),
                encode_octet_string(&fixed_width(&self.d, curve.field_size())),
                wrap_context_specific(
                    Tag::CONTEXT_SPECIFIC_0,
                    &encode_object_identifier(curve.oid())?,
                ),
                wrap_context_specific(Tag::CONTEXT_SPECIFIC_1, &encode_bit_string(&point)),
            ]
            .concat(),
        );
        tracing::trace!(der.len = der.len(), curve = %curve, "built ec private key");
        Ok(der)
    }

    /// Encode as an `EC PRIVATE KEY` [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(PemLabel::EcPrivateKey, self.to_der()?))
    }

    /// Decode an `ECPrivateKey` sequence.
    ///
    /// The optional `[0]` parameters and `[1]` public key are required here,
    /// as the curve and the public point are part of the parameter set.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        let mut fields = decode_single(der)?.expect_tag(Tag::SEQUENCE)?.children()?;
        expect_version(fields.next_tlv()?, 1)?;
        let d = fields.next_tlv()?.octet_string()?.to_vec();

        let mut curve = None;
        let mut point = None;
        for field in fields {
            let field = field?;
            match field.tag() {
                Tag::CONTEXT_SPECIFIC_0 => {
                    let mut inner = field.children()?;
                    curve = Some(named_curve_parameters(inner.next_tlv()?)?);
                    inner.finish()?;
                }
                Tag::CONTEXT_SPECIFIC_1 => {
                    let mut inner = field.children()?;
                    point = Some(inner.next_tlv()?.bit_string()?);
                    inner.finish()?;
                }
                found => {
                    return Err(Asn1Error::UnexpectedTag {
                        expected: Tag::CONTEXT_SPECIFIC_0,
                        found,
                    }
                    .into());
                }
            }
        }

        let curve = curve.ok_or(KeyError::MissingComponent("curve parameters"))?;
        let point = point.ok_or(KeyError::MissingComponent("public key"))?;
        let (x, y) = split_uncompressed_point(point)?;
        Ok(Self {
            curve: curve.name().to_owned(),
            x: x.to_vec(),
            y: y.to_vec(),
            d,
        })
    }

    /// The public half of this key.
    #[must_use]
    pub fn public_parameters(&self) -> EcPublicParameters {
        EcPublicParameters {
            curve: self.curve.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private() -> EcPrivateParameters {
        EcPrivateParameters {
            curve: "secp112r1".to_owned(),
            x: vec![0x01, 0x02],
            y: vec![0x03],
            d: vec![0x07],
        }
    }

    /// Uncompressed point of [`private`] on secp112r1.
    fn point_hex() -> String {
        format!("04{}0102{}03", "00".repeat(12), "00".repeat(13))
    }

    #[test]
    fn public_key_layout() {
        let der = private().public_parameters().to_der().unwrap();
        let point = point_hex();
        let expected: [&str; 6] = [
            "3032",
            "3010",               // AlgorithmIdentifier
            "06072a8648ce3d0201", // ecPublicKey
            "06052b81040006",     // secp112r1
            "031e00",             // BIT STRING, no unused bits
            &point,
        ];
        assert_eq!(der, hex::decode(expected.concat()).unwrap());

        let decoded = EcPublicParameters::from_der(&der).unwrap();
        assert_eq!(decoded.curve, "secp112r1");
        assert_eq!(decoded.x, left_pad(&[0x01, 0x02], 14));
        assert_eq!(decoded.y, left_pad(&[0x03], 14));
    }

    #[test]
    fn private_key_layout() {
        let der = private().to_der().unwrap();
        let d = format!("040e{}07", "00".repeat(13));
        let point = point_hex();
        let expected: [&str; 6] = [
            "303e",
            "020101",             // version
            &d,                   // d, padded to the field size
            "a00706052b81040006", // [0] secp112r1
            "a120031e00",         // [1] BIT STRING
            &point,
        ];
        assert_eq!(der, hex::decode(expected.concat()).unwrap());

        let decoded = EcPrivateParameters::from_der(&der).unwrap();
        assert_eq!(decoded.curve, "secp112r1");
        assert_eq!(decoded.d, left_pad(&[0x07], 14));
        assert_eq!(decoded.y, left_pad(&[0x03], 14));
    }

    #[test]
    fn short_coordinates_are_padded_to_field_size() {
        let params = EcPrivateParameters {
            curve: "secp256r1".to_owned(),
            x: vec![0x01; 31],
            y: vec![0x02; 31],
            d: vec![0x03; 30],
        };
        let der = params.to_der().unwrap();
        let decoded = EcPrivateParameters::from_der(&der).unwrap();
        assert_eq!(decoded.x, left_pad(&params.x, 32));
        assert_eq!(decoded.y, left_pad(&params.y, 32));
        assert_eq!(decoded.d, left_pad(&params.d, 32));

        let public = EcPublicParameters::from_der(&params.public_parameters().to_der().unwrap())
            .unwrap();
        assert_eq!(public.x.len(), 32);
        assert_eq!(public.y.len(), 32);
    }

    #[test]
    fn redundant_leading_zeros_are_dropped() {
        let mut x = vec![0x00, 0x00];
        x.extend([0x05; 32]);
        let params = EcPublicParameters {
            curve: "prime256v1".to_owned(),
            x,
            y: vec![0x06; 32],
        };
        let decoded = EcPublicParameters::from_der(&params.to_der().unwrap()).unwrap();
        assert_eq!(decoded.x, [0x05; 32]);
        assert_eq!(decoded.y, [0x06; 32]);
    }

    #[test]
    fn unknown_curve_fails_before_encoding() {
        let mut params = private();
        params.curve = "curve25519".to_owned();
        assert!(matches!(
            params.to_der(),
            Err(KeyError::UnsupportedCurve(name)) if name == "curve25519"
        ));
        assert!(matches!(
            params.public_parameters().to_pem(),
            Err(KeyError::UnsupportedCurve(_))
        ));
    }

    #[test]
    fn explicit_curve_parameters_are_rejected() {
        let der = wrap_sequence(
            &[
                encode_integer(1),
                encode_octet_string(&[0x07]),
                wrap_context_specific(
                    Tag::CONTEXT_SPECIFIC_0,
                    &wrap_sequence(&encode_integer(1)),
                ),
                wrap_context_specific(Tag::CONTEXT_SPECIFIC_1, &encode_bit_string(&[0x04, 1, 2])),
            ]
            .concat(),
        );
        assert!(matches!(
            EcPrivateParameters::from_der(&der),
            Err(KeyError::UnsupportedCurve(reason)) if reason == "explicit curve parameters"
        ));
    }

    #[test]
    fn stray_primitive_field_is_an_unexpected_tag() {
        let der = wrap_sequence(
            &[
                encode_integer(1),
                encode_octet_string(&[0x07]),
                encode_integer(5),
            ]
            .concat(),
        );
        assert!(matches!(
            EcPrivateParameters::from_der(&der),
            Err(KeyError::Asn1(Asn1Error::UnexpectedTag {
                expected: Tag::CONTEXT_SPECIFIC_0,
                found: Tag::INTEGER,
            }))
        ));
    }

    #[test]
    fn private_key_requires_public_point() {
        let der = wrap_sequence(
            &[
                encode_integer(1),
                encode_octet_string(&[0x07]),
                wrap_context_specific(
                    Tag::CONTEXT_SPECIFIC_0,
                    &encode_object_identifier("1.3.132.0.34").unwrap(),
                ),
            ]
            .concat(),
        );
        assert!(matches!(
            EcPrivateParameters::from_der(&der),
            Err(KeyError::MissingComponent("public key"))
        ));
    }

    #[test]
    fn split_points() {
        assert_eq!(
            split_uncompressed_point(&[0x04, 0x01, 0x02]).unwrap(),
            (&[0x01][..], &[0x02][..])
        );
        assert!(split_uncompressed_point(&[0x02, 0x01, 0x02]).is_err());
        assert!(split_uncompressed_point(&[0x04, 0x01]).is_err());
        assert!(split_uncompressed_point(&[0x04]).is_err());
        assert!(split_uncompressed_point(&[]).is_err());
    }

    #[test]
    fn pad() {
        assert_eq!(left_pad(&[0x01], 3), [0x00, 0x00, 0x01]);
        assert_eq!(left_pad(&[0x01, 0x02], 1), [0x01, 0x02]);
    }
}
