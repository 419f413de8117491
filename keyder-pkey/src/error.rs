use keyder_asn1::Asn1Error;
use rama_boring::error::ErrorStack;
use std::fmt;

#[derive(Debug)]
/// Error returned while building, parsing or converting key material.
pub enum KeyError {
    /// The DER input could not be encoded or decoded.
    Asn1(Asn1Error),
    /// The curve is not found in the named curve table,
    /// or cannot be used for the requested operation.
    UnsupportedCurve(String),
    /// The key algorithm is not one of RSA, DSA or EC,
    /// or has no representation in the requested format.
    UnsupportedKeyType,
    /// The algorithm identifier of a public key is not supported.
    UnsupportedAlgorithm(String),
    /// A required key component is absent.
    MissingComponent(&'static str),
    /// An EC public point is not in the uncompressed `0x04 || x || y` form.
    InvalidEcPoint,
    /// The PEM armor is malformed.
    InvalidPem(&'static str),
    /// The base64 body of a PEM or JWK member could not be decoded.
    Base64(base64::DecodeError),
    /// The crypto provider rejected the key material.
    Provider(ErrorStack),
    #[cfg(feature = "jwk")]
    /// The JWK document is not valid JSON or misses required members.
    Json(serde_json::Error),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asn1(err) => write!(f, "key error: {err}"),
            Self::UnsupportedCurve(name) => write!(f, "key error: unsupported curve '{name}'"),
            Self::UnsupportedKeyType => write!(f, "key error: unsupported key type"),
            Self::UnsupportedAlgorithm(oid) => {
                write!(f, "key error: unsupported public key algorithm {oid}")
            }
            Self::MissingComponent(component) => {
                write!(f, "key error: missing key component '{component}'")
            }
            Self::InvalidEcPoint => write!(f, "key error: ec point is not uncompressed"),
            Self::InvalidPem(reason) => write!(f, "key error: invalid PEM: {reason}"),
            Self::Base64(err) => write!(f, "key error: base64: {err}"),
            Self::Provider(err) => write!(f, "key error: provider: {err}"),
            #[cfg(feature = "jwk")]
            Self::Json(err) => write!(f, "key error: jwk: {err}"),
        }
    }
}

impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Asn1(err) => Some(err),
            Self::Base64(err) => Some(err),
            Self::Provider(err) => Some(err),
            #[cfg(feature = "jwk")]
            Self::Json(err) => Some(err),
            Self::UnsupportedCurve(_)
            | Self::UnsupportedKeyType
            | Self::UnsupportedAlgorithm(_)
            | Self::MissingComponent(_)
            | Self::InvalidEcPoint
            | Self::InvalidPem(_) => None,
        }
    }
}

impl From<Asn1Error> for KeyError {
    fn from(value: Asn1Error) -> Self {
        Self::Asn1(value)
    }
}

impl From<base64::DecodeError> for KeyError {
    fn from(value: base64::DecodeError) -> Self {
        Self::Base64(value)
    }
}

impl From<ErrorStack> for KeyError {
    fn from(value: ErrorStack) -> Self {
        Self::Provider(value)
    }
}

#[cfg(feature = "jwk")]
impl From<serde_json::Error> for KeyError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
