use std::{collections::HashMap, fmt, sync::OnceLock};

/// Named curves as `(name, oid, field size in octets)`.
///
/// Where two names share an identifier the first listed name is the canonical one
/// returned by [`curve_name`].
const NAMED_CURVES: &[(&str, &str, usize)] = &[
    // SEC 2 prime field curves
    ("secp112r1", "1.3.132.0.6", 14),
    ("secp112r2", "1.3.132.0.7", 14),
    ("secp128r1", "1.3.132.0.28", 16),
    ("secp128r2", "1.3.132.0.29", 16),
    ("secp160k1", "1.3.132.0.9", 20),
    ("secp160r1", "1.3.132.0.8", 20),
    ("secp160r2", "1.3.132.0.30", 20),
    ("secp192k1", "1.3.132.0.31", 24),
    ("secp192r1", "1.2.840.10045.3.1.1", 24),
    ("secp224k1", "1.3.132.0.32", 28),
    ("secp224r1", "1.3.132.0.33", 28),
    ("secp256k1", "1.3.132.0.10", 32),
    ("secp256r1", "1.2.840.10045.3.1.7", 32),
    ("secp384r1", "1.3.132.0.34", 48),
    ("secp521r1", "1.3.132.0.35", 66),
    // X9.62 prime field curves
    ("prime192v1", "1.2.840.10045.3.1.1", 24),
    ("prime192v2", "1.2.840.10045.3.1.2", 24),
    ("prime192v3", "1.2.840.10045.3.1.3", 24),
    ("prime239v1", "1.2.840.10045.3.1.4", 30),
    ("prime239v2", "1.2.840.10045.3.1.5", 30),
    ("prime239v3", "1.2.840.10045.3.1.6", 30),
    ("prime256v1", "1.2.840.10045.3.1.7", 32),
    // SEC 2 characteristic two curves
    ("sect113r1", "1.3.132.0.4", 15),
    ("sect113r2", "1.3.132.0.5", 15),
    ("sect131r1", "1.3.132.0.22", 17),
    ("sect131r2", "1.3.132.0.23", 17),
    ("sect163k1", "1.3.132.0.1", 21),
    ("sect163r1", "1.3.132.0.2", 21),
    ("sect163r2", "1.3.132.0.15", 21),
    ("sect193r1", "1.3.132.0.24", 25),
    ("sect193r2", "1.3.132.0.25", 25),
    ("sect233k1", "1.3.132.0.26", 30),
    ("sect233r1", "1.3.132.0.27", 30),
    ("sect239k1", "1.3.132.0.3", 30),
    ("sect283k1", "1.3.132.0.16", 36),
    ("sect283r1", "1.3.132.0.17", 36),
    ("sect409k1", "1.3.132.0.36", 52),
    ("sect409r1", "1.3.132.0.37", 52),
    ("sect571k1", "1.3.132.0.38", 72),
    ("sect571r1", "1.3.132.0.39", 72),
    // X9.62 characteristic two curves
    ("c2pnb163v1", "1.2.840.10045.3.0.1", 21),
    ("c2pnb163v2", "1.2.840.10045.3.0.2", 21),
    ("c2pnb163v3", "1.2.840.10045.3.0.3", 21),
    ("c2pnb176v1", "1.2.840.10045.3.0.4", 22),
    ("c2tnb191v1", "1.2.840.10045.3.0.5", 24),
    ("c2tnb191v2", "1.2.840.10045.3.0.6", 24),
    ("c2tnb191v3", "1.2.840.10045.3.0.7", 24),
    ("c2pnb208w1", "1.2.840.10045.3.0.10", 26),
    ("c2tnb239v1", "1.2.840.10045.3.0.11", 30),
    ("c2tnb239v2", "1.2.840.10045.3.0.12", 30),
    ("c2tnb239v3", "1.2.840.10045.3.0.13", 30),
    ("c2pnb272w1", "1.2.840.10045.3.0.16", 34),
    ("c2pnb304w1", "1.2.840.10045.3.0.17", 38),
    ("c2tnb359v1", "1.2.840.10045.3.0.18", 45),
    ("c2pnb368w1", "1.2.840.10045.3.0.19", 46),
    ("c2tnb431r1", "1.2.840.10045.3.0.20", 54),
    // WAP WTLS curves
    ("wap-wsg-idm-ecid-wtls1", "2.23.43.1.4.1", 15),
    ("wap-wsg-idm-ecid-wtls3", "2.23.43.1.4.3", 21),
    ("wap-wsg-idm-ecid-wtls4", "2.23.43.1.4.4", 15),
    ("wap-wsg-idm-ecid-wtls5", "2.23.43.1.4.5", 21),
    ("wap-wsg-idm-ecid-wtls6", "2.23.43.1.4.6", 14),
    ("wap-wsg-idm-ecid-wtls7", "2.23.43.1.4.7", 20),
    ("wap-wsg-idm-ecid-wtls8", "2.23.43.1.4.8", 14),
    ("wap-wsg-idm-ecid-wtls9", "2.23.43.1.4.9", 20),
    ("wap-wsg-idm-ecid-wtls10", "2.23.43.1.4.10", 30),
    ("wap-wsg-idm-ecid-wtls11", "2.23.43.1.4.11", 30),
    ("wap-wsg-idm-ecid-wtls12", "2.23.43.1.4.12", 28),
    // RFC 5639 brainpool curves
    ("brainpoolP160r1", "1.3.36.3.3.2.8.1.1.1", 20),
    ("brainpoolP160t1", "1.3.36.3.3.2.8.1.1.2", 20),
    ("brainpoolP192r1", "1.3.36.3.3.2.8.1.1.3", 24),
    ("brainpoolP192t1", "1.3.36.3.3.2.8.1.1.4", 24),
    ("brainpoolP224r1", "1.3.36.3.3.2.8.1.1.5", 28),
    ("brainpoolP224t1", "1.3.36.3.3.2.8.1.1.6", 28),
    ("brainpoolP256r1", "1.3.36.3.3.2.8.1.1.7", 32),
    ("brainpoolP256t1", "1.3.36.3.3.2.8.1.1.8", 32),
    ("brainpoolP320r1", "1.3.36.3.3.2.8.1.1.9", 40),
    ("brainpoolP320t1", "1.3.36.3.3.2.8.1.1.10", 40),
    ("brainpoolP384r1", "1.3.36.3.3.2.8.1.1.11", 48),
    ("brainpoolP384t1", "1.3.36.3.3.2.8.1.1.12", 48),
    ("brainpoolP512r1", "1.3.36.3.3.2.8.1.1.13", 64),
    ("brainpoolP512t1", "1.3.36.3.3.2.8.1.1.14", 64),
];

struct CurveTable {
    by_name: HashMap<&'static str, &'static str>,
    by_oid: HashMap<&'static str, (&'static str, usize)>,
}

static CURVE_TABLE: OnceLock<CurveTable> = OnceLock::new();

fn get_curve_table() -> &'static CurveTable {
    CURVE_TABLE.get_or_init(|| {
        let mut by_oid = HashMap::with_capacity(NAMED_CURVES.len());
        for (name, oid, field_size) in NAMED_CURVES {
            by_oid.entry(*oid).or_insert((*name, *field_size));
        }
        CurveTable {
            by_name: NAMED_CURVES
                .iter()
                .map(|(name, oid, _)| (*name, *oid))
                .collect(),
            by_oid,
        }
    })
}

/// Look up the object identifier of a named curve, e.g. `secp256r1` or `prime256v1`.
#[must_use]
pub fn curve_oid(name: &str) -> Option<&'static str> {
    get_curve_table().by_name.get(name).copied()
}

/// Look up the canonical curve name for a dotted-decimal object identifier.
#[must_use]
pub fn curve_name(oid: &str) -> Option<&'static str> {
    get_curve_table().by_oid.get(oid).map(|(name, _)| *name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A curve found in the named curve table.
///
/// Aliases resolve to the same [`NamedCurve`]:
/// `NamedCurve::from_name("prime256v1") == NamedCurve::from_name("secp256r1")`.
pub struct NamedCurve {
    name: &'static str,
    oid: &'static str,
    field_size: usize,
}

impl NamedCurve {
    /// Resolve a curve by any of its names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        curve_oid(name).and_then(Self::from_oid)
    }

    /// Resolve a curve by its dotted-decimal object identifier.
    #[must_use]
    pub fn from_oid(oid: &str) -> Option<Self> {
        let table = get_curve_table();
        table
            .by_oid
            .get_key_value(oid)
            .map(|(oid, (name, field_size))| Self {
                name: *name,
                oid: *oid,
                field_size: *field_size,
            })
    }

    /// Canonical name of the curve.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Dotted-decimal object identifier of the curve.
    #[must_use]
    pub fn oid(&self) -> &'static str {
        self.oid
    }

    /// Size in octets of a field element, and so of each affine coordinate
    /// in an uncompressed point.
    #[must_use]
    pub fn field_size(&self) -> usize {
        self.field_size
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.oid)
    }
}
