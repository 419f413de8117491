//! 🔑 keyder builds DER and PEM encoded RSA, DSA and EC keys from raw key parameters,
//! and reads those parameters back from keys parsed by BoringSSL.
//!
//! Typical use is converting between formats that carry raw key components,
//! such as a JSON Web Key, and the PEM text a crypto library expects.
//!
//! | crate | support list |
//! |-|-|
//! | ✅ [asn1] | ✅ [DER encoders](crate::asn1::encode) ⸱ ✅ [strict DER decoder](crate::asn1::decode) ⸱ ✅ [named curve table](crate::asn1::oid) |
//! | ✅ [pkey] | ✅ [PEM armor](crate::pkey::Pem) ⸱ ✅ [key structure builders](crate::pkey::KeyParameters) ⸱ ✅ [parameter extraction](crate::pkey::KeyHandle::parameters) ⸱ ✅ key generation ⸱ ✅ JWK <sup>(1)</sup> |
//!
//! > 🗒️ _Footnotes_
//! >
//! > * <sup>(1)</sup> behind the `jwk` feature, enabled by default.
//!
//! Supported structures:
//!
//! - `PUBLIC KEY`: SubjectPublicKeyInfo for `rsaEncryption`, `dsa` and `ecPublicKey`;
//! - `RSA PRIVATE KEY`: PKCS#1;
//! - `DSA PRIVATE KEY`: the OpenSSL DSA private key sequence;
//! - `EC PRIVATE KEY`: SEC1, on any curve of the named curve table.
//!
//! ```
//! use keyder::pkey::{KeyParameters, RsaPublicParameters};
//!
//! let params = KeyParameters::from(RsaPublicParameters {
//!     n: vec![0xc3; 128],
//!     e: vec![0x01, 0x00, 0x01],
//! });
//! let pem = params.to_pem()?.encode();
//! assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
//! # Ok::<(), keyder::pkey::KeyError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[doc(inline)]
pub use ::keyder_asn1 as asn1;

#[doc(inline)]
pub use ::keyder_pkey as pkey;
