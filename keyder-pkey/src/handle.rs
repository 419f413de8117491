//! Key handles owned by the crypto provider (BoringSSL).
//!
//! This is the only place keys cross into the provider:
//! PEM text goes in, decoded key objects come out.

use crate::KeyError;
use keyder_asn1::NamedCurve;
use rama_boring::{
    dsa::Dsa,
    ec::{EcGroup, EcKey},
    error::ErrorStack,
    nid::Nid,
    pkey::{Id, PKey, Private, Public},
    rsa::Rsa,
    symm::Cipher,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Algorithm family of a key.
pub enum KeyAlgorithm {
    Rsa,
    Dsa,
    Ec,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ec => "EC",
        })
    }
}

/// A public key parsed by the provider.
pub enum PublicKeyHandle {
    Rsa(Rsa<Public>),
    Dsa(Dsa<Public>),
    Ec(EcKey<Public>),
}

/// A private key parsed or generated by the provider.
pub enum PrivateKeyHandle {
    Rsa(Rsa<Private>),
    Dsa(Dsa<Private>),
    Ec(EcKey<Private>),
}

/// A provider key, public or private, of any supported algorithm.
pub enum KeyHandle {
    Public(PublicKeyHandle),
    Private(PrivateKeyHandle),
}

impl PublicKeyHandle {
    fn from_pkey(pkey: &PKey<Public>) -> Result<Self, KeyError> {
        match pkey.id() {
            Id::RSA => Ok(Self::Rsa(pkey.rsa()?)),
            Id::DSA => Ok(Self::Dsa(pkey.dsa()?)),
            Id::EC => Ok(Self::Ec(pkey.ec_key()?)),
            _ => Err(KeyError::UnsupportedKeyType),
        }
    }

    fn to_pkey(&self) -> Result<PKey<Public>, ErrorStack> {
        match self {
            Self::Rsa(key) => PKey::from_rsa(key.clone()),
            Self::Dsa(key) => PKey::from_dsa(key.clone()),
            Self::Ec(key) => PKey::from_ec_key(key.clone()),
        }
    }

    /// Algorithm family of this key.
    #[must_use]
    pub const fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::Dsa(_) => KeyAlgorithm::Dsa,
            Self::Ec(_) => KeyAlgorithm::Ec,
        }
    }
}

impl PrivateKeyHandle {
    fn from_pkey(pkey: &PKey<Private>) -> Result<Self, KeyError> {
        match pkey.id() {
            Id::RSA => Ok(Self::Rsa(pkey.rsa()?)),
            Id::DSA => Ok(Self::Dsa(pkey.dsa()?)),
            Id::EC => Ok(Self::Ec(pkey.ec_key()?)),
            _ => Err(KeyError::UnsupportedKeyType),
        }
    }

    fn to_pkey(&self) -> Result<PKey<Private>, ErrorStack> {
        match self {
            Self::Rsa(key) => PKey::from_rsa(key.clone()),
            Self::Dsa(key) => PKey::from_dsa(key.clone()),
            Self::Ec(key) => PKey::from_ec_key(key.clone()),
        }
    }

    /// Algorithm family of this key.
    #[must_use]
    pub const fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::Dsa(_) => KeyAlgorithm::Dsa,
            Self::Ec(_) => KeyAlgorithm::Ec,
        }
    }
}

impl KeyHandle {
    /// Parse a `PUBLIC KEY` PEM through the provider.
    pub fn from_public_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let pkey = PKey::public_key_from_pem(pem)?;
        let handle = Self::Public(PublicKeyHandle::from_pkey(&pkey)?);
        tracing::debug!(algorithm = %handle.algorithm(), "parsed public key");
        Ok(handle)
    }

    /// Parse a private key PEM through the provider.
    ///
    /// Traditional (`RSA PRIVATE KEY`, `DSA PRIVATE KEY`, `EC PRIVATE KEY`)
    /// and PKCS#8 (`PRIVATE KEY`, `ENCRYPTED PRIVATE KEY`) structures are accepted.
    /// The passphrase is only used for encrypted keys;
    /// a wrong or missing passphrase is a [`KeyError::Provider`] error.
    pub fn from_private_pem(pem: &[u8], passphrase: Option<&[u8]>) -> Result<Self, KeyError> {
        let pkey = match passphrase {
            Some(passphrase) => PKey::private_key_from_pem_passphrase(pem, passphrase)?,
            None => PKey::private_key_from_pem(pem)?,
        };
        let handle = Self::Private(PrivateKeyHandle::from_pkey(&pkey)?);
        tracing::debug!(algorithm = %handle.algorithm(), "parsed private key");
        Ok(handle)
    }

    /// Generate an RSA key with a modulus of `bits` bits.
    pub fn generate_rsa(bits: u32) -> Result<Self, KeyError> {
        let key = Rsa::generate(bits)?;
        tracing::debug!(bits, "generated rsa key");
        Ok(Self::Private(PrivateKeyHandle::Rsa(key)))
    }

    /// Generate DSA domain parameters with a prime `p` of `bits` bits, and a key for them.
    pub fn generate_dsa(bits: u32) -> Result<Self, KeyError> {
        let key = Dsa::generate(bits)?;
        tracing::debug!(bits, "generated dsa key");
        Ok(Self::Private(PrivateKeyHandle::Dsa(key)))
    }

    /// Generate an EC key on the named curve.
    ///
    /// Any name of the named curve table is accepted, but the provider
    /// only implements `secp224r1`, `secp256r1`, `secp384r1` and `secp521r1`.
    /// Other curves fail with [`KeyError::UnsupportedCurve`] before the provider is called.
    pub fn generate_ec(curve: &str) -> Result<Self, KeyError> {
        let named_curve = NamedCurve::from_name(curve)
            .ok_or_else(|| KeyError::UnsupportedCurve(curve.to_owned()))?;
        let group = EcGroup::from_curve_name(provider_curve_nid(named_curve)?)?;
        let key = EcKey::generate(&group)?;
        tracing::debug!(curve = %named_curve, "generated ec key");
        Ok(Self::Private(PrivateKeyHandle::Ec(key)))
    }

    /// Algorithm family of this key.
    #[must_use]
    pub const fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Public(key) => key.algorithm(),
            Self::Private(key) => key.algorithm(),
        }
    }

    /// Returns `true` if this handle holds a private key.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// Export the public key as a `PUBLIC KEY` PEM, written by the provider.
    pub fn to_public_pem(&self) -> Result<Vec<u8>, KeyError> {
        let pem = match self {
            Self::Public(key) => key.to_pkey()?.public_key_to_pem()?,
            Self::Private(key) => key.to_pkey()?.public_key_to_pem()?,
        };
        Ok(pem)
    }

    /// Export the private key as a PKCS#8 PEM, written by the provider.
    ///
    /// With a passphrase the key is encrypted with AES-256-CBC
    /// (`ENCRYPTED PRIVATE KEY`), without one it is written as `PRIVATE KEY`.
    pub fn to_private_pem(&self, passphrase: Option<&[u8]>) -> Result<Vec<u8>, KeyError> {
        let Self::Private(key) = self else {
            return Err(KeyError::MissingComponent("private key"));
        };
        let pkey = key.to_pkey()?;
        let pem = match passphrase {
            Some(passphrase) => {
                pkey.private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), passphrase)?
            }
            None => pkey.private_key_to_pem_pkcs8()?,
        };
        Ok(pem)
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = if self.is_private() { "Private" } else { "Public" };
        write!(f, "KeyHandle::{visibility}({})", self.algorithm())
    }
}

impl fmt::Debug for PublicKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyHandle::{:?}", self.algorithm())
    }
}

impl fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyHandle::{:?}", self.algorithm())
    }
}

impl From<PublicKeyHandle> for KeyHandle {
    fn from(value: PublicKeyHandle) -> Self {
        Self::Public(value)
    }
}

impl From<PrivateKeyHandle> for KeyHandle {
    fn from(value: PrivateKeyHandle) -> Self {
        Self::Private(value)
    }
}

/// Provider identifier of the curves BoringSSL implements.
fn provider_curve_nid(curve: NamedCurve) -> Result<Nid, KeyError> {
    match curve.name() {
        "secp224r1" => Ok(Nid::SECP224R1),
        "secp256r1" => Ok(Nid::X9_62_PRIME256V1),
        "secp384r1" => Ok(Nid::SECP384R1),
        "secp521r1" => Ok(Nid::SECP521R1),
        other => Err(KeyError::UnsupportedCurve(other.to_owned())),
    }
}
