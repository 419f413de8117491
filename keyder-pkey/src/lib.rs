//! Build PEM encoded RSA, DSA and EC keys from raw key parameters,
//! and extract those parameters back from keys parsed by the crypto provider.
//!
//! The crypto provider is BoringSSL, through [`rama-boring`]. It never sees raw
//! parameters: [`KeyParameters`] are encoded to DER with [`keyder_asn1`],
//! armored as [`Pem`] and only then handed over.
//!
//! ```
//! use keyder_pkey::{EcPublicParameters, KeyParameters};
//!
//! let params = KeyParameters::from(EcPublicParameters {
//!     curve: "prime256v1".to_owned(),
//!     x: vec![0x01; 32],
//!     y: vec![0x02; 32],
//! });
//! let pem = params.to_pem()?;
//! assert!(pem.encode().starts_with("-----BEGIN PUBLIC KEY-----\r\n"));
//!
//! let decoded = KeyParameters::from_pem(&pem)?;
//! let KeyParameters::EcPublic(decoded) = decoded else { unreachable!() };
//! assert_eq!(decoded.curve, "secp256r1");
//! # Ok::<(), keyder_pkey::KeyError>(())
//! ```
//!
//! [`rama-boring`]: https://docs.rs/rama-boring

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

mod error;
#[doc(inline)]
pub use error::KeyError;

mod pem;
#[doc(inline)]
pub use pem::{DEFAULT_LINE_WIDTH, LineEnding, Pem, PemEncoder, PemLabel};

mod params;
#[doc(inline)]
pub use params::{
    DsaPrivateParameters, DsaPublicParameters, EcPrivateParameters, EcPublicParameters,
    KeyParameters, RsaPrivateParameters, RsaPublicParameters,
};

mod extract;
mod handle;
#[doc(inline)]
pub use handle::{KeyAlgorithm, KeyHandle, PrivateKeyHandle, PublicKeyHandle};

#[cfg(feature = "jwk")]
#[cfg_attr(docsrs, doc(cfg(feature = "jwk")))]
mod jwk;
#[cfg(feature = "jwk")]
#[cfg_attr(docsrs, doc(cfg(feature = "jwk")))]
#[doc(inline)]
pub use jwk::{Jwk, JwkCurve};

pub mod core {
    //! Re-export of the [`rama-boring`] crate.
    //!
    //! [`rama-boring`]: https://docs.rs/rama-boring

    #[doc(inline)]
    pub use rama_boring::*;
}
