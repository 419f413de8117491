use keyder::{
    asn1::{Tag, decode::decode_single, oid},
    pkey::{DsaPublicParameters, KeyParameters, LineEnding, PemEncoder},
};

#[test]
fn dsa_public_key_through_the_facade() {
    let params = KeyParameters::from(DsaPublicParameters {
        p: vec![0x97],
        q: vec![0x0b],
        g: vec![0x04],
        pub_key: vec![0x8a],
    });
    let pem = params.to_pem().unwrap();
    assert_eq!(
        pem.der(),
        hex::decode("301e301506072a8648ce380401300a0202009702010b0201040305000202008a").unwrap()
    );

    let spki = decode_single(pem.der()).unwrap().expect_tag(Tag::SEQUENCE).unwrap();
    let mut fields = spki.children().unwrap();
    let mut algorithm = fields.next_tlv().unwrap().children().unwrap();
    assert_eq!(
        algorithm.next_tlv().unwrap().object_identifier().unwrap(),
        oid::DSA
    );

    assert_eq!(
        PemEncoder::new()
            .with_line_ending(LineEnding::Lf)
            .encode(&pem),
        "-----BEGIN PUBLIC KEY-----\n\
         MB4wFQYHKoZIzjgEATAKAgIAlwIBCwIBBAMFAAICAIo=\n\
         -----END PUBLIC KEY-----\n"
    );
}
