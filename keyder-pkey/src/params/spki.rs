use crate::KeyError;
use keyder_asn1::{
    Tag,
    decode::{Tlv, decode_single},
    encode::{encode_bit_string, encode_object_identifier, wrap_sequence},
};

/// Encode a SubjectPublicKeyInfo as defined in section 4.1 of
/// [RFC 5280](https://datatracker.ietf.org/doc/rfc5280/):
///
/// ```text
/// SubjectPublicKeyInfo = SEQUENCE {
///     algorithm AlgorithmIdentifier,
///     subjectPublicKey BIT STRING
/// }
///
/// AlgorithmIdentifier = SEQUENCE {
///     algorithm OBJECT IDENTIFIER,
///     parameters ANY DEFINED BY algorithm OPTIONAL
/// }
/// ```
///
/// `parameters` is the already encoded parameters TLV.
pub(super) fn encode_spki(
    algorithm: &str,
    parameters: &[u8],
    subject_public_key: &[u8],
) -> Result<Vec<u8>, KeyError> {
    let algorithm_identifier =
        wrap_sequence(&[encode_object_identifier(algorithm)?.as_slice(), parameters].concat());
    Ok(wrap_sequence(
        &[algorithm_identifier, encode_bit_string(subject_public_key)].concat(),
    ))
}

/// Borrowed view of a decoded SubjectPublicKeyInfo.
pub(crate) struct SubjectPublicKeyInfo<'a> {
    pub(crate) algorithm: String,
    pub(crate) parameters: Option<Tlv<'a>>,
    pub(crate) subject_public_key: &'a [u8],
}

impl<'a> SubjectPublicKeyInfo<'a> {
    pub(crate) fn from_der(der: &'a [u8]) -> Result<Self, KeyError> {
        let mut fields = decode_single(der)?.expect_tag(Tag::SEQUENCE)?.children()?;

        let mut algorithm_identifier = fields.next_tlv()?.expect_tag(Tag::SEQUENCE)?.children()?;
        let algorithm = algorithm_identifier.next_tlv()?.object_identifier()?;
        let parameters = algorithm_identifier.next().transpose()?;
        algorithm_identifier.finish()?;

        let subject_public_key = fields.next_tlv()?.bit_string()?;
        fields.finish()?;

        Ok(Self {
            algorithm,
            parameters,
            subject_public_key,
        })
    }

    pub(super) fn expect_algorithm(&self, algorithm: &str) -> Result<(), KeyError> {
        if self.algorithm == algorithm {
            Ok(())
        } else {
            Err(KeyError::UnsupportedAlgorithm(self.algorithm.clone()))
        }
    }

    pub(super) fn parameters(&self) -> Result<Tlv<'a>, KeyError> {
        self.parameters
            .ok_or(KeyError::MissingComponent("algorithm parameters"))
    }
}
