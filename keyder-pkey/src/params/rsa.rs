use super::{
    expect_version,
    spki::{SubjectPublicKeyInfo, encode_spki},
};
use crate::{KeyError, Pem, PemLabel};
use keyder_asn1::{
    Tag,
    decode::decode_single,
    encode::{encode_integer, encode_integer_from_binary, encode_null, wrap_sequence},
    oid,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public RSA key components as unsigned big-endian binaries.
pub struct RsaPublicParameters {
    /// Modulus
    pub n: Vec<u8>,
    /// Public exponent
    pub e: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Private RSA key components as unsigned big-endian binaries,
/// in the order of the PKCS#1 `RSAPrivateKey` sequence.
pub struct RsaPrivateParameters {
    /// Modulus
    pub n: Vec<u8>,
    /// Public exponent
    pub e: Vec<u8>,
    /// Private exponent
    pub d: Vec<u8>,
    /// First prime factor
    pub p: Vec<u8>,
    /// Second prime factor
    pub q: Vec<u8>,
    /// `d mod (p - 1)`
    pub dmp1: Vec<u8>,
    /// `d mod (q - 1)`
    pub dmq1: Vec<u8>,
    /// `q^-1 mod p`
    pub iqmp: Vec<u8>,
}

impl RsaPublicParameters {
    /// Encode as a SubjectPublicKeyInfo whose subject public key is the
    /// `RSAPublicKey` sequence defined in section 2.3.1 of
    /// [RFC 3279](https://datatracker.ietf.org/doc/rfc3279/):
    ///
    /// ```text
    /// RSAPublicKey = SEQUENCE {
    ///     modulus INTEGER,
    ///     exponent INTEGER,
    /// }
    /// ```
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let rsa_public_key = wrap_sequence(
            &[
                encode_integer_from_binary(&self.n, true),
                encode_integer_from_binary(&self.e, true),
            ]
            .concat(),
        );
        let der = encode_spki(oid::RSA_ENCRYPTION, &encode_null(), &rsa_public_key)?;
        tracing::trace!(der.len = der.len(), "built rsa public key");
        Ok(der)
    }

    /// Encode as a `PUBLIC KEY` [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(PemLabel::PublicKey, self.to_der()?))
    }

    /// Decode a SubjectPublicKeyInfo holding an RSA public key.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        Self::from_spki(&SubjectPublicKeyInfo::from_der(der)?)
    }

    pub(super) fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> Result<Self, KeyError> {
        spki.expect_algorithm(oid::RSA_ENCRYPTION)?;
        if let Some(parameters) = spki.parameters {
            parameters.null()?;
        }

        let mut fields = decode_single(spki.subject_public_key)?
            .expect_tag(Tag::SEQUENCE)?
            .children()?;
        let n = fields.next_tlv()?.unsigned_integer()?.to_vec();
        let e = fields.next_tlv()?.unsigned_integer()?.to_vec();
        fields.finish()?;

        Ok(Self { n, e })
    }
}

impl RsaPrivateParameters {
    /// Encode as the two-prime `RSAPrivateKey` sequence defined in appendix A.1.2 of
    /// [RFC 8017](https://datatracker.ietf.org/doc/rfc8017/).
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let der = wrap_sequence(
            &[
                encode_integer(0),
                encode_integer_from_binary(&self.n, true),
                encode_integer_from_binary(&self.e, true),
                encode_integer_from_binary(&self.d, true),
                encode_integer_from_binary(&self.p, true),
                encode_integer_from_binary(&self.q, true),
                encode_integer_from_binary(&self.dmp1, true),
                encode_integer_from_binary(&self.dmq1, true),
                encode_integer_from_binary(&self.iqmp, true),
            ]
            .concat(),
        );
        tracing::trace!(der.len = der.len(), "built rsa private key");
        Ok(der)
    }

    /// Encode as an `RSA PRIVATE KEY` [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(PemLabel::RsaPrivateKey, self.to_der()?))
    }

    /// Decode a two-prime `RSAPrivateKey` sequence.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        let mut fields = decode_single(der)?.expect_tag(Tag::SEQUENCE)?.children()?;
        expect_version(fields.next_tlv()?, 0)?;
        let mut next = || -> Result<Vec<u8>, KeyError> {
            Ok(fields.next_tlv()?.unsigned_integer()?.to_vec())
        };
        let params = Self {
            n: next()?,
            e: next()?,
            d: next()?,
            p: next()?,
            q: next()?,
            dmp1: next()?,
            dmq1: next()?,
            iqmp: next()?,
        };
        fields.finish()?;
        Ok(params)
    }

    /// The public half of this key.
    #[must_use]
    pub fn public_parameters(&self) -> RsaPublicParameters {
        RsaPublicParameters {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_public() -> RsaPublicParameters {
        RsaPublicParameters {
            n: vec![0xc5, 0x01],
            e: vec![0x01, 0x00, 0x01],
        }
    }

    #[test]
    fn public_key_layout() {
        let der = small_public().to_der().unwrap();
        assert_eq!(
            der,
            hex::decode(concat!(
                "301e",                           // SubjectPublicKeyInfo
                "300d06092a864886f70d0101010500", // rsaEncryption, NULL
                "030d00",                         // BIT STRING, no unused bits
                "300a",                           // RSAPublicKey
                "020300c501",
                "0203010001",
            ))
            .unwrap()
        );
        assert_eq!(RsaPublicParameters::from_der(&der).unwrap(), small_public());
    }

    #[test]
    fn private_key_layout() {
        let params = RsaPrivateParameters {
            n: vec![0x80],
            e: vec![0x03],
            d: vec![0x01],
            p: vec![0x02],
            q: vec![0x03],
            dmp1: vec![0x04],
            dmq1: vec![0x05],
            iqmp: vec![0xff],
        };
        let der = params.to_der().unwrap();
        assert_eq!(
            der,
            hex::decode(concat!(
                "301d",
                "020100",   // version
                "02020080", // n, sign octet added
                "020103020101020102020103020104020105",
                "020200ff", // iqmp, sign octet added
            ))
            .unwrap()
        );
        assert_eq!(RsaPrivateParameters::from_der(&der).unwrap(), params);
        assert_eq!(
            params.public_parameters(),
            RsaPublicParameters {
                n: vec![0x80],
                e: vec![0x03],
            }
        );
    }

    #[test]
    fn private_key_rejects_multi_prime_version() {
        let der = wrap_sequence(&[encode_integer(1), encode_integer(0)].concat());
        assert!(RsaPrivateParameters::from_der(&der).is_err());
    }

    #[test]
    fn public_key_rejects_other_algorithms() {
        let der = encode_spki(oid::EC_PUBLIC_KEY, &encode_null(), &[]).unwrap();
        assert!(matches!(
            RsaPublicParameters::from_der(&der),
            Err(KeyError::UnsupportedAlgorithm(found)) if found == oid::EC_PUBLIC_KEY
        ));
    }
}
