//! JSON Web Key conversion, as defined in
//! [RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517) and
//! [RFC 7518 section 6](https://datatracker.ietf.org/doc/html/rfc7518#section-6).
//!
//! A [`Jwk`] carries the same components as the parameter sets,
//! base64url encoded without padding. DSA has no JWK representation.

use crate::{
    EcPrivateParameters, EcPublicParameters, KeyError, KeyHandle, KeyParameters,
    RsaPrivateParameters, RsaPublicParameters,
};
use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use keyder_asn1::NamedCurve;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kty")]
/// [`Jwk`] or JSON Web Key, identified by its `kty` (key type) member.
///
/// Private members are optional: a key without them is a public key.
pub enum Jwk {
    #[serde(rename = "RSA")]
    Rsa {
        n: String,
        e: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        d: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        p: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        q: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dp: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dq: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        qi: Option<String>,
    },
    /// Elliptic curve
    #[serde(rename = "EC")]
    Ec {
        crv: JwkCurve,
        x: String,
        y: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        d: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Curves registered for the `crv` member.
pub enum JwkCurve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
    #[serde(rename = "secp256k1")]
    Secp256k1,
}

impl JwkCurve {
    /// Canonical name of this curve in the named curve table.
    #[must_use]
    pub const fn curve_name(self) -> &'static str {
        match self {
            Self::P256 => "secp256r1",
            Self::P384 => "secp384r1",
            Self::P521 => "secp521r1",
            Self::Secp256k1 => "secp256k1",
        }
    }

    /// Find the JWK curve for any name of the named curve table,
    /// e.g. `prime256v1` maps to [`JwkCurve::P256`].
    #[must_use]
    pub fn from_curve_name(name: &str) -> Option<Self> {
        match NamedCurve::from_name(name)?.name() {
            "secp256r1" => Some(Self::P256),
            "secp384r1" => Some(Self::P384),
            "secp521r1" => Some(Self::P521),
            "secp256k1" => Some(Self::Secp256k1),
            _ => None,
        }
    }
}

fn decode(value: &str) -> Result<Vec<u8>, KeyError> {
    Ok(BASE64_URL_SAFE_NO_PAD.decode(value)?)
}

fn decode_member(value: Option<&str>, name: &'static str) -> Result<Vec<u8>, KeyError> {
    decode(value.ok_or(KeyError::MissingComponent(name))?)
}

fn encode(value: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(value)
}

impl Jwk {
    /// Parse a JWK from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this JWK as compact JSON.
    pub fn to_json(&self) -> Result<String, KeyError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns `true` if the private members are present.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        match self {
            Self::Rsa { d, .. } | Self::Ec { d, .. } => d.is_some(),
        }
    }
}

impl TryFrom<&Jwk> for KeyParameters {
    type Error = KeyError;

    fn try_from(jwk: &Jwk) -> Result<Self, Self::Error> {
        match jwk {
            Jwk::Rsa {
                n,
                e,
                d: None,
                ..
            } => Ok(RsaPublicParameters {
                n: decode(n)?,
                e: decode(e)?,
            }
            .into()),
            Jwk::Rsa {
                n,
                e,
                d: Some(d),
                p,
                q,
                dp,
                dq,
                qi,
            } => Ok(RsaPrivateParameters {
                n: decode(n)?,
                e: decode(e)?,
                d: decode(d)?,
                p: decode_member(p.as_deref(), "p")?,
                q: decode_member(q.as_deref(), "q")?,
                dmp1: decode_member(dp.as_deref(), "dp")?,
                dmq1: decode_member(dq.as_deref(), "dq")?,
                iqmp: decode_member(qi.as_deref(), "qi")?,
            }
            .into()),
            Jwk::Ec { crv, x, y, d } => {
                let curve = crv.curve_name().to_owned();
                let (x, y) = (decode(x)?, decode(y)?);
                Ok(match d {
                    None => EcPublicParameters { curve, x, y }.into(),
                    Some(d) => EcPrivateParameters {
                        curve,
                        x,
                        y,
                        d: decode(d)?,
                    }
                    .into(),
                })
            }
        }
    }
}

impl TryFrom<Jwk> for KeyParameters {
    type Error = KeyError;

    fn try_from(jwk: Jwk) -> Result<Self, Self::Error> {
        Self::try_from(&jwk)
    }
}

fn jwk_curve(name: &str) -> Result<JwkCurve, KeyError> {
    JwkCurve::from_curve_name(name).ok_or_else(|| KeyError::UnsupportedCurve(name.to_owned()))
}

impl TryFrom<&KeyParameters> for Jwk {
    type Error = KeyError;

    fn try_from(params: &KeyParameters) -> Result<Self, Self::Error> {
        match params {
            KeyParameters::RsaPublic(params) => Ok(Self::Rsa {
                n: encode(&params.n),
                e: encode(&params.e),
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            }),
            KeyParameters::RsaPrivate(params) => Ok(Self::Rsa {
                n: encode(&params.n),
                e: encode(&params.e),
                d: Some(encode(&params.d)),
                p: Some(encode(&params.p)),
                q: Some(encode(&params.q)),
                dp: Some(encode(&params.dmp1)),
                dq: Some(encode(&params.dmq1)),
                qi: Some(encode(&params.iqmp)),
            }),
            KeyParameters::EcPublic(params) => Ok(Self::Ec {
                crv: jwk_curve(&params.curve)?,
                x: encode(&params.x),
                y: encode(&params.y),
                d: None,
            }),
            KeyParameters::EcPrivate(params) => Ok(Self::Ec {
                crv: jwk_curve(&params.curve)?,
                x: encode(&params.x),
                y: encode(&params.y),
                d: Some(encode(&params.d)),
            }),
            KeyParameters::DsaPublic(_) | KeyParameters::DsaPrivate(_) => {
                Err(KeyError::UnsupportedKeyType)
            }
        }
    }
}

impl TryFrom<KeyParameters> for Jwk {
    type Error = KeyError;

    fn try_from(params: KeyParameters) -> Result<Self, Self::Error> {
        Self::try_from(&params)
    }
}

impl KeyHandle {
    /// Extract the parameters of this key as a [`Jwk`].
    pub fn to_jwk(&self) -> Result<Jwk, KeyError> {
        let jwk = Jwk::try_from(&self.parameters()?)?;
        tracing::trace!(algorithm = %self.algorithm(), private = jwk.is_private(), "exported jwk");
        Ok(jwk)
    }

    /// Build the PEM of a [`Jwk`] and parse it through the provider.
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, KeyError> {
        KeyParameters::try_from(jwk)?.to_key(None)
    }
}
