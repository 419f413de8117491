//! Minimal ASN.1 DER codec used to build and inspect key material.
//!
//! This crate covers the subset of the
//! [ITU X.690](https://www.itu.int/ITU-T/studygroups/com17/languages/X.690-0207.pdf)
//! Distinguished Encoding Rules needed for PKCS#1, SEC1, DSA and
//! SubjectPublicKeyInfo structures:
//!
//! - [`encode`]: TLV encoders for the universal types and constructed wrappers;
//! - [`decode`]: a strict decoder with typed accessors for the same types;
//! - [`oid`]: object identifier arcs and the named curve table.
//!
//! ```
//! use keyder_asn1::{
//!     Tag,
//!     decode::decode_single,
//!     encode::{encode_integer, encode_null, wrap_sequence},
//! };
//!
//! let der = wrap_sequence(&[encode_integer(65537), encode_null()].concat());
//! let root = decode_single(&der)?.expect_tag(Tag::SEQUENCE)?;
//! let mut children = root.children()?;
//! assert_eq!(children.next_tlv()?.unsigned_integer()?, [0x01, 0x00, 0x01]);
//! children.next_tlv()?.null()?;
//! children.finish()?;
//! # Ok::<(), keyder_asn1::Asn1Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

mod error;
#[doc(inline)]
pub use error::Asn1Error;

mod tag;
#[doc(inline)]
pub use tag::Tag;

mod length;
#[doc(inline)]
pub use length::{decode_length, encode_length};

pub mod decode;
pub mod encode;
pub mod oid;

#[doc(inline)]
pub use oid::NamedCurve;
