//! Named key parameter sets and the DER structures built from them.
//!
//! Every set encodes to exactly one DER structure and PEM label:
//!
//! | parameters | structure | PEM label |
//! |-|-|-|
//! | [`RsaPublicParameters`] | SubjectPublicKeyInfo (`rsaEncryption`) | `PUBLIC KEY` |
//! | [`RsaPrivateParameters`] | PKCS#1 `RSAPrivateKey` | `RSA PRIVATE KEY` |
//! | [`DsaPublicParameters`] | SubjectPublicKeyInfo (`dsa`) | `PUBLIC KEY` |
//! | [`DsaPrivateParameters`] | OpenSSL `DSAPrivateKey` | `DSA PRIVATE KEY` |
//! | [`EcPublicParameters`] | SubjectPublicKeyInfo (`ecPublicKey`) | `PUBLIC KEY` |
//! | [`EcPrivateParameters`] | SEC1 `ECPrivateKey` | `EC PRIVATE KEY` |
//!
//! All binaries are unsigned big-endian magnitudes; every INTEGER is
//! written forced positive.

use crate::{KeyError, KeyHandle, Pem, PemLabel};
use keyder_asn1::{Asn1Error, Tag, decode::Tlv, oid};

mod dsa;
mod ec;
mod rsa;
mod spki;

pub(crate) use ec::{left_pad, split_uncompressed_point};

#[doc(inline)]
pub use self::{
    dsa::{DsaPrivateParameters, DsaPublicParameters},
    ec::{EcPrivateParameters, EcPublicParameters},
    rsa::{RsaPrivateParameters, RsaPublicParameters},
};

use spki::SubjectPublicKeyInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Any of the supported key parameter sets.
pub enum KeyParameters {
    RsaPublic(RsaPublicParameters),
    RsaPrivate(RsaPrivateParameters),
    DsaPublic(DsaPublicParameters),
    DsaPrivate(DsaPrivateParameters),
    EcPublic(EcPublicParameters),
    EcPrivate(EcPrivateParameters),
}

impl KeyParameters {
    /// Returns `true` for the private parameter sets.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(
            self,
            Self::RsaPrivate(_) | Self::DsaPrivate(_) | Self::EcPrivate(_)
        )
    }

    /// PEM label of the structure these parameters encode to.
    #[must_use]
    pub const fn pem_label(&self) -> PemLabel {
        match self {
            Self::RsaPublic(_) | Self::DsaPublic(_) | Self::EcPublic(_) => PemLabel::PublicKey,
            Self::RsaPrivate(_) => PemLabel::RsaPrivateKey,
            Self::DsaPrivate(_) => PemLabel::DsaPrivateKey,
            Self::EcPrivate(_) => PemLabel::EcPrivateKey,
        }
    }

    /// Encode to the DER structure of this parameter set.
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        match self {
            Self::RsaPublic(params) => params.to_der(),
            Self::RsaPrivate(params) => params.to_der(),
            Self::DsaPublic(params) => params.to_der(),
            Self::DsaPrivate(params) => params.to_der(),
            Self::EcPublic(params) => params.to_der(),
            Self::EcPrivate(params) => params.to_der(),
        }
    }

    /// Encode to the DER structure of this parameter set, armored as [`Pem`].
    pub fn to_pem(&self) -> Result<Pem, KeyError> {
        Ok(Pem::new(self.pem_label(), self.to_der()?))
    }

    /// Decode the parameters from a PEM armored structure, without the provider.
    ///
    /// `PUBLIC KEY` structures are dispatched on their algorithm identifier.
    pub fn from_pem(pem: &Pem) -> Result<Self, KeyError> {
        match pem.label() {
            PemLabel::PublicKey => {
                let spki = SubjectPublicKeyInfo::from_der(pem.der())?;
                match spki.algorithm.as_str() {
                    oid::RSA_ENCRYPTION => RsaPublicParameters::from_spki(&spki).map(Into::into),
                    oid::DSA => DsaPublicParameters::from_spki(&spki).map(Into::into),
                    oid::EC_PUBLIC_KEY => EcPublicParameters::from_spki(&spki).map(Into::into),
                    other => Err(KeyError::UnsupportedAlgorithm(other.to_owned())),
                }
            }
            PemLabel::RsaPrivateKey => RsaPrivateParameters::from_der(pem.der()).map(Into::into),
            PemLabel::DsaPrivateKey => DsaPrivateParameters::from_der(pem.der()).map(Into::into),
            PemLabel::EcPrivateKey => EcPrivateParameters::from_der(pem.der()).map(Into::into),
        }
    }

    /// Build the PEM of these parameters and hand it to the provider.
    ///
    /// The passphrase is passed on to the provider together with private keys.
    /// The PEM built here is never encrypted, so it only matters for
    /// providers that insist on one.
    pub fn to_key(&self, passphrase: Option<&[u8]>) -> Result<KeyHandle, KeyError> {
        let pem = self.to_pem()?.encode();
        if self.is_private() {
            KeyHandle::from_private_pem(pem.as_bytes(), passphrase)
        } else {
            KeyHandle::from_public_pem(pem.as_bytes())
        }
    }
}

macro_rules! impl_from_parameters {
    ($($variant:ident($params:ty)),+ $(,)?) => {
        $(
            impl From<$params> for KeyParameters {
                fn from(value: $params) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_parameters!(
    RsaPublic(RsaPublicParameters),
    RsaPrivate(RsaPrivateParameters),
    DsaPublic(DsaPublicParameters),
    DsaPrivate(DsaPrivateParameters),
    EcPublic(EcPublicParameters),
    EcPrivate(EcPrivateParameters),
);

fn expect_version(tlv: Tlv<'_>, version: u8) -> Result<(), KeyError> {
    if tlv.integer()? == [version] {
        Ok(())
    } else {
        Err(Asn1Error::InvalidValue {
            tag: Tag::INTEGER,
            reason: "unsupported structure version",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineEnding, PemEncoder};

    const RSA_PUBLIC: &str = include_str!("../../tests/fixtures/rsa2048_public.pem");
    const RSA_PRIVATE: &str = include_str!("../../tests/fixtures/rsa2048_private.pem");
    const DSA_PUBLIC: &str = include_str!("../../tests/fixtures/dsa2048_public.pem");
    const DSA_PRIVATE: &str = include_str!("../../tests/fixtures/dsa2048_private.pem");
    const EC_P256_PUBLIC: &str = include_str!("../../tests/fixtures/ec_p256_public.pem");
    const EC_P256_PRIVATE: &str = include_str!("../../tests/fixtures/ec_p256_private.pem");
    const EC_P384_PRIVATE: &str = include_str!("../../tests/fixtures/ec_p384_private.pem");

    /// Decoding then rebuilding a reference key reproduces it byte for byte,
    /// PEM text included.
    fn assert_rebuilds_identically(reference: &str) -> KeyParameters {
        let pem = Pem::parse(reference).unwrap();
        let params = KeyParameters::from_pem(&pem).unwrap();
        let rebuilt = params.to_pem().unwrap();
        assert_eq!(rebuilt, pem);
        assert_eq!(
            PemEncoder::new()
                .with_line_ending(LineEnding::Lf)
                .encode(&rebuilt),
            reference
        );
        params
    }

    #[test]
    fn rebuild_rsa_keys() {
        let public = assert_rebuilds_identically(RSA_PUBLIC);
        let private = assert_rebuilds_identically(RSA_PRIVATE);
        let (KeyParameters::RsaPublic(public), KeyParameters::RsaPrivate(private)) =
            (public, private)
        else {
            panic!("unexpected parameter sets");
        };
        assert_eq!(private.public_parameters(), public);
        assert_eq!(public.n.len(), 256);
        assert_eq!(public.e, [0x01, 0x00, 0x01]);
    }

    #[test]
    fn rebuild_dsa_keys() {
        let public = assert_rebuilds_identically(DSA_PUBLIC);
        let private = assert_rebuilds_identically(DSA_PRIVATE);
        let (KeyParameters::DsaPublic(public), KeyParameters::DsaPrivate(private)) =
            (public, private)
        else {
            panic!("unexpected parameter sets");
        };
        assert_eq!(private.public_parameters(), public);
        assert_eq!(public.p.len(), 256);
    }

    #[test]
    fn rebuild_ec_keys() {
        let public = assert_rebuilds_identically(EC_P256_PUBLIC);
        let private = assert_rebuilds_identically(EC_P256_PRIVATE);
        let (KeyParameters::EcPublic(public), KeyParameters::EcPrivate(private)) =
            (public, private)
        else {
            panic!("unexpected parameter sets");
        };
        assert_eq!(private.public_parameters(), public);
        assert_eq!(public.curve, "secp256r1");
        assert_eq!(public.x.len(), 32);
        assert_eq!(private.d.len(), 32);

        let KeyParameters::EcPrivate(p384) = assert_rebuilds_identically(EC_P384_PRIVATE) else {
            panic!("unexpected parameter set");
        };
        assert_eq!(p384.curve, "secp384r1");
        assert_eq!(p384.x.len(), 48);
    }

    #[test]
    fn labels_and_kinds() {
        let params = KeyParameters::from(EcPublicParameters {
            curve: "secp384r1".to_owned(),
            x: vec![1; 48],
            y: vec![2; 48],
        });
        assert!(!params.is_private());
        assert_eq!(params.pem_label(), PemLabel::PublicKey);
        assert_eq!(params.to_pem().unwrap().label(), PemLabel::PublicKey);

        let params = KeyParameters::from(DsaPrivateParameters {
            p: vec![0x17],
            q: vec![0x0b],
            g: vec![0x04],
            pub_key: vec![0x08],
            priv_key: vec![0x03],
        });
        assert!(params.is_private());
        assert_eq!(params.pem_label(), PemLabel::DsaPrivateKey);
    }

    #[test]
    fn from_pem_rejects_unknown_algorithm() {
        // Ed25519 SubjectPublicKeyInfo
        let der = hex::decode(
            "302a300506032b6570032100d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        )
        .unwrap();
        assert!(matches!(
            KeyParameters::from_pem(&Pem::new(PemLabel::PublicKey, der)),
            Err(KeyError::UnsupportedAlgorithm(oid)) if oid == "1.3.101.112"
        ));
    }
}
