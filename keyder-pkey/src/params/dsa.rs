use super::{
    expect_version,
    spki::{SubjectPublicKeyInfo, encode_spki},
};
use crate::{KeyError, Pem, PemLabel};
use keyder_asn1::{
    Tag,
    decode::decode_single,
    encode::{encode_integer, encode_integer_from_binary, wrap_sequence},
    oid,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public DSA key components as unsigned big-endian binaries.
pub struct DsaPublicParameters {
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub g: Vec<u8>,
    pub pub_key: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Private DSA key components as unsigned big-endian binaries.
pub struct DsaPrivateParameters {
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub g: Vec<u8>,
    pub pub_key: Vec<u8>,
    pub priv_key: Vec<u8>,
}

impl DsaPublicParameters {
    /// Encode as a SubjectPublicKeyInfo, with the domain parameters
    /// in the algorithm identifier and the public value as the subject public key,
    /// as defined in section 2.3.2 of [RFC 3279](https://datatracker.ietf.org/doc/rfc3279/):
    ///
    /// ```text
    /// Dss-Parms = SEQUENCE {
    ///     p INTEGER,
    ///     q INTEGER,
    ///     g INTEGER
    /// }
    ///
    /// DSAPublicKey = INTEGER
    /// ```
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let der = encode_spki(
            oid::DSA,
            &encode_domain_parameters(&self.p, &self.q, &self.g),
            &encode_integer_from_binary(&self.pub_key, true),
        )?;
        tracing::trace!(der.len = der.len(), "built dsa public key");
        Ok(der)
    }

    /// Encode as a `PUBLIC KEY` [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(PemLabel::PublicKey, self.to_der()?))
    }

    /// Decode a SubjectPublicKeyInfo holding a DSA public key.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        Self::from_spki(&SubjectPublicKeyInfo::from_der(der)?)
    }

    pub(super) fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> Result<Self, KeyError> {
        spki.expect_algorithm(oid::DSA)?;

        let mut domain = spki
            .parameters()?
            .expect_tag(Tag::SEQUENCE)?
            .children()?;
        let p = domain.next_tlv()?.unsigned_integer()?.to_vec();
        let q = domain.next_tlv()?.unsigned_integer()?.to_vec();
        let g = domain.next_tlv()?.unsigned_integer()?.to_vec();
        domain.finish()?;

        let pub_key = decode_single(spki.subject_public_key)?
            .unsigned_integer()?
            .to_vec();

        Ok(Self { p, q, g, pub_key })
    }
}

fn encode_domain_parameters(p: &[u8], q: &[u8], g: &[u8]) -> Vec<u8> {
    wrap_sequence(
        &[
            encode_integer_from_binary(p, true),
            encode_integer_from_binary(q, true),
            encode_integer_from_binary(g, true),
        ]
        .concat(),
    )
}

impl DsaPrivateParameters {
    /// Encode as the OpenSSL `DSAPrivateKey` sequence:
    ///
    /// ```text
    /// DSAPrivateKey = SEQUENCE {
    ///     version INTEGER,
    ///     p INTEGER,
    ///     q INTEGER,
    ///     g INTEGER,
    ///     pub_key INTEGER,
    ///     priv_key INTEGER
    /// }
    /// ```
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let der = wrap_sequence(
            &[
                encode_integer(0),
                encode_integer_from_binary(&self.p, true),
                encode_integer_from_binary(&self.q, true),
                encode_integer_from_binary(&self.g, true),
                encode_integer_from_binary(&self.pub_key, true),
                encode_integer_from_binary(&self.priv_key, true),
            ]
            .concat(),
        );
        tracing::trace!(der.len = der.len(), "built dsa private key");
        Ok(der)
    }

    /// Encode as a `DSA PRIVATE KEY` [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(PemLabel::DsaPrivateKey, self.to_der()?))
    }

    /// Decode an OpenSSL `DSAPrivateKey` sequence.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        let mut fields = decode_single(der)?.expect_tag(Tag::SEQUENCE)?.children()?;
        expect_version(fields.next_tlv()?, 0)?;
        let mut next = || -> Result<Vec<u8>, KeyError> {
            Ok(fields.next_tlv()?.unsigned_integer()?.to_vec())
        };
        let params = Self {
            p: next()?,
            q: next()?,
            g: next()?,
            pub_key: next()?,
            priv_key: next()?,
        };
        fields.finish()?;
        Ok(params)
    }

    /// The public half of this key.
    #[must_use]
    pub fn public_parameters(&self) -> DsaPublicParameters {
        DsaPublicParameters {
            p: self.p.clone(),
            q: self.q.clone(),
            g: self.g.clone(),
            pub_key: self.pub_key.clone(),
        }
    }
}
