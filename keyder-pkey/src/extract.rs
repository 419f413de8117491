use crate::{
    DsaPrivateParameters, DsaPublicParameters, EcPrivateParameters, EcPublicParameters,
    KeyError, KeyHandle, KeyParameters, PrivateKeyHandle, PublicKeyHandle, RsaPrivateParameters,
    RsaPublicParameters,
    params::{left_pad, split_uncompressed_point},
};
use keyder_asn1::NamedCurve;
use rama_boring::{
    bn::{BigNumContext, BigNumRef},
    ec::{EcGroupRef, EcKeyRef, PointConversionForm},
    pkey::{HasPublic, Private},
    rsa::RsaRef,
};

impl KeyHandle {
    /// Read the key components exposed by the provider into the matching parameter set.
    ///
    /// All binaries are unsigned big-endian without leading zero octets,
    /// except for EC keys: `x` and `y` are written at the field width of
    /// the curve and `d` is left padded to that same width.
    /// The curve is reported by its canonical name.
    pub fn parameters(&self) -> Result<KeyParameters, KeyError> {
        let params = match self {
            Self::Public(PublicKeyHandle::Rsa(rsa)) => RsaPublicParameters {
                n: rsa.n().to_vec(),
                e: rsa.e().to_vec(),
            }
            .into(),
            Self::Private(PrivateKeyHandle::Rsa(rsa)) => rsa_private_parameters(rsa)?.into(),
            Self::Public(PublicKeyHandle::Dsa(dsa)) => DsaPublicParameters {
                p: dsa.p().to_vec(),
                q: dsa.q().to_vec(),
                g: dsa.g().to_vec(),
                pub_key: dsa.pub_key().to_vec(),
            }
            .into(),
            Self::Private(PrivateKeyHandle::Dsa(dsa)) => DsaPrivateParameters {
                p: dsa.p().to_vec(),
                q: dsa.q().to_vec(),
                g: dsa.g().to_vec(),
                pub_key: dsa.pub_key().to_vec(),
                priv_key: dsa.priv_key().to_vec(),
            }
            .into(),
            Self::Public(PublicKeyHandle::Ec(ec)) => ec_public_parameters(ec)?.into(),
            Self::Private(PrivateKeyHandle::Ec(ec)) => {
                let EcPublicParameters { curve, x, y } = ec_public_parameters(ec)?;
                let d = left_pad(&ec.private_key().to_vec(), x.len());
                EcPrivateParameters { curve, x, y, d }.into()
            }
        };
        tracing::trace!(algorithm = %self.algorithm(), "extracted key parameters");
        Ok(params)
    }
}

fn rsa_private_parameters(rsa: &RsaRef<Private>) -> Result<RsaPrivateParameters, KeyError> {
    let component = |value: Option<&BigNumRef>, name: &'static str| {
        value
            .map(BigNumRef::to_vec)
            .ok_or(KeyError::MissingComponent(name))
    };
    Ok(RsaPrivateParameters {
        n: rsa.n().to_vec(),
        e: rsa.e().to_vec(),
        d: rsa.d().to_vec(),
        p: component(rsa.p(), "p")?,
        q: component(rsa.q(), "q")?,
        dmp1: component(rsa.dmp1(), "dmp1")?,
        dmq1: component(rsa.dmq1(), "dmq1")?,
        iqmp: component(rsa.iqmp(), "iqmp")?,
    })
}

fn ec_public_parameters<T: HasPublic>(ec: &EcKeyRef<T>) -> Result<EcPublicParameters, KeyError> {
    let group = ec.group();
    let curve = provider_curve_name(group)?;
    let mut ctx = BigNumContext::new()?;
    let point = ec
        .public_key()
        .to_bytes(group, PointConversionForm::UNCOMPRESSED, &mut ctx)?;
    let (x, y) = split_uncompressed_point(&point)?;
    Ok(EcPublicParameters {
        curve: curve.name().to_owned(),
        x: x.to_vec(),
        y: y.to_vec(),
    })
}

/// Map the provider's curve short name (e.g. `prime256v1`) onto the named curve table.
fn provider_curve_name(group: &EcGroupRef) -> Result<NamedCurve, KeyError> {
    let nid = group
        .curve_name()
        .ok_or_else(|| KeyError::UnsupportedCurve("explicit curve parameters".to_owned()))?;
    let short_name = nid.short_name()?;
    NamedCurve::from_name(short_name)
        .ok_or_else(|| KeyError::UnsupportedCurve(short_name.to_owned()))
}
