#![cfg(feature = "jwk")]

use keyder_pkey::{Jwk, JwkCurve, KeyError, KeyHandle, KeyParameters, Pem};

const EC_P256_PRIVATE_JWK: &str = include_str!("fixtures/ec_p256_private.jwk.json");
const EC_P256_PRIVATE: &str = include_str!("fixtures/ec_p256_private.pem");
const RSA_PUBLIC_JWK: &str = include_str!("fixtures/rsa2048_public.jwk.json");
const RSA_PUBLIC: &str = include_str!("fixtures/rsa2048_public.pem");
const DSA_PRIVATE: &str = include_str!("fixtures/dsa2048_private.pem");

#[test]
fn ec_jwk_through_the_provider() {
    let jwk = Jwk::from_json(EC_P256_PRIVATE_JWK).unwrap();
    let handle = KeyHandle::from_jwk(&jwk).unwrap();
    assert!(handle.is_private());
    assert_eq!(handle.to_jwk().unwrap(), jwk);

    let reference = KeyHandle::from_private_pem(EC_P256_PRIVATE.as_bytes(), None).unwrap();
    assert_eq!(reference.to_jwk().unwrap(), jwk);
}

#[test]
fn rsa_public_jwk_builds_reference_pem() {
    let jwk = Jwk::from_json(RSA_PUBLIC_JWK).unwrap();
    let params = KeyParameters::try_from(&jwk).unwrap();
    assert_eq!(params.to_pem().unwrap(), Pem::parse(RSA_PUBLIC).unwrap());

    let handle = KeyHandle::from_jwk(&jwk).unwrap();
    assert!(!handle.is_private());
    assert_eq!(handle.to_jwk().unwrap(), jwk);
}

#[test]
fn generated_keys_to_jwk_and_back() {
    for handle in [
        KeyHandle::generate_rsa(2048).unwrap(),
        KeyHandle::generate_ec("secp384r1").unwrap(),
        KeyHandle::generate_ec("secp521r1").unwrap(),
    ] {
        let jwk = handle.to_jwk().unwrap();
        assert!(jwk.is_private());
        let json = jwk.to_json().unwrap();
        let rebuilt = KeyHandle::from_jwk(&Jwk::from_json(&json).unwrap()).unwrap();
        assert_eq!(rebuilt.parameters().unwrap(), handle.parameters().unwrap());
    }
}

#[test]
fn p521_coordinates_keep_field_width() {
    let Jwk::Ec { crv, x, y, d } = KeyHandle::generate_ec("secp521r1")
        .unwrap()
        .to_jwk()
        .unwrap()
    else {
        panic!("expected an ec jwk");
    };
    assert_eq!(crv, JwkCurve::P521);
    // 66 octets encode to 88 base64url characters
    assert_eq!(x.len(), 88);
    assert_eq!(y.len(), 88);
    assert_eq!(d.map(|d| d.len()), Some(88));
}

#[test]
fn dsa_has_no_jwk() {
    let handle = KeyHandle::from_private_pem(DSA_PRIVATE.as_bytes(), None).unwrap();
    assert!(matches!(
        handle.to_jwk(),
        Err(KeyError::UnsupportedKeyType)
    ));
}
