//! The fixed feature schema produced by the interaction engine.
//!
//! Every feature group is a [`Buckets`] map over a closed set of typed keys.
//! All keys exist from construction with a zero value, so the flattened
//! vector always has the same length and column order.

use super::error::EngineError;
use crate::core::chemistry::typing::AtomType;
use crate::core::models::atom::AtomRole;
use crate::core::models::secondary::SecondaryStructure;
use std::fmt;
use std::sync::LazyLock;

/// A key of a feature group whose complete key set is known up front.
pub trait BucketKey: Copy + PartialEq + fmt::Display + 'static {
    /// Every key of the group, in column order.
    fn all() -> &'static [Self];

    fn position(&self) -> usize {
        Self::all()
            .iter()
            .position(|key| key == self)
            .unwrap_or_default()
    }
}

/// Numeric values for every key of one feature group.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<K: BucketKey> {
    values: Vec<f64>,
    _keys: std::marker::PhantomData<K>,
}

impl<K: BucketKey> Default for Buckets<K> {
    fn default() -> Self {
        Self {
            values: vec![0.0; K::all().len()],
            _keys: std::marker::PhantomData,
        }
    }
}

impl<K: BucketKey> Buckets<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: K) -> f64 {
        self.values[key.position()]
    }

    pub fn add(&mut self, key: K, amount: f64) {
        self.values[key.position()] += amount;
    }

    pub fn increment(&mut self, key: K) {
        self.add(key, 1.0);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Keys paired with their values, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        K::all().iter().copied().zip(self.values.iter().copied())
    }
}

impl BucketKey for AtomType {
    fn all() -> &'static [Self] {
        &AtomType::ALL
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

/// An unordered pair of atom types, stored with the smaller type first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomTypePair(AtomType, AtomType);

static ALL_ATOM_TYPE_PAIRS: LazyLock<Vec<AtomTypePair>> = LazyLock::new(|| {
    AtomType::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| AtomType::ALL[i..].iter().map(move |&b| AtomTypePair(a, b)))
        .collect()
});

impl AtomTypePair {
    pub fn new(a: AtomType, b: AtomType) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> AtomType {
        self.0
    }

    pub fn second(&self) -> AtomType {
        self.1
    }
}

impl fmt::Display for AtomTypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.0, self.1)
    }
}

impl BucketKey for AtomTypePair {
    fn all() -> &'static [Self] {
        ALL_ATOM_TYPE_PAIRS.as_slice()
    }

    fn position(&self) -> usize {
        let n = AtomType::COUNT;
        let (i, j) = (self.0 as usize, self.1 as usize);
        i * (2 * n - i + 1) / 2 + (j - i)
    }
}

/// Backbone/side-chain role combined with the secondary structure of the
/// owning residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stratum {
    pub role: AtomRole,
    pub structure: SecondaryStructure,
}

impl Stratum {
    pub const ALL: [Stratum; 6] = [
        Stratum::new(AtomRole::Backbone, SecondaryStructure::Alpha),
        Stratum::new(AtomRole::Backbone, SecondaryStructure::Beta),
        Stratum::new(AtomRole::Backbone, SecondaryStructure::Other),
        Stratum::new(AtomRole::Sidechain, SecondaryStructure::Alpha),
        Stratum::new(AtomRole::Sidechain, SecondaryStructure::Beta),
        Stratum::new(AtomRole::Sidechain, SecondaryStructure::Other),
    ];

    pub const fn new(role: AtomRole, structure: SecondaryStructure) -> Self {
        Self { role, structure }
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.role, self.structure)
    }
}

impl BucketKey for Stratum {
    fn all() -> &'static [Self] {
        &Stratum::ALL
    }
}

/// Which side of the complex an interaction is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partner {
    Ligand,
    Receptor,
}

impl Partner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partner::Ligand => "LIGAND",
            Partner::Receptor => "RECEPTOR",
        }
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hydrogen bonds keyed by the partner owning the hydrogen and the stratum of
/// the receptor atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HydrogenBondKey {
    pub donor: Partner,
    pub stratum: Stratum,
}

static ALL_HYDROGEN_BOND_KEYS: LazyLock<Vec<HydrogenBondKey>> = LazyLock::new(|| {
    [Partner::Ligand, Partner::Receptor]
        .into_iter()
        .flat_map(|donor| {
            Stratum::ALL
                .into_iter()
                .map(move |stratum| HydrogenBondKey { donor, stratum })
        })
        .collect()
});

impl fmt::Display for HydrogenBondKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HDONOR-{}_{}", self.donor, self.stratum)
    }
}

impl BucketKey for HydrogenBondKey {
    fn all() -> &'static [Self] {
        ALL_HYDROGEN_BOND_KEYS.as_slice()
    }
}

/// Pi-cation interactions keyed by the partner carrying the charge and the
/// secondary structure of the receptor side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiCationKey {
    pub charged: Partner,
    pub structure: SecondaryStructure,
}

static ALL_PI_CATION_KEYS: LazyLock<Vec<PiCationKey>> = LazyLock::new(|| {
    [Partner::Ligand, Partner::Receptor]
        .into_iter()
        .flat_map(|charged| {
            SecondaryStructure::ALL
                .into_iter()
                .map(move |structure| PiCationKey { charged, structure })
        })
        .collect()
});

impl fmt::Display for PiCationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PI-CATION_{}-CHARGED_{}", self.charged, self.structure)
    }
}

impl BucketKey for PiCationKey {
    fn all() -> &'static [Self] {
        ALL_PI_CATION_KEYS.as_slice()
    }
}

macro_rules! secondary_structure_key {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub SecondaryStructure);

        impl $name {
            const ALL: [$name; 3] = [
                $name(SecondaryStructure::Alpha),
                $name(SecondaryStructure::Beta),
                $name(SecondaryStructure::Other),
            ];
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl BucketKey for $name {
            fn all() -> &'static [Self] {
                &$name::ALL
            }
        }
    };
}

secondary_structure_key!(
    /// Parallel pi-pi stacking, keyed by the receptor ring's residue.
    StackingKey,
    "STACKING"
);
secondary_structure_key!(
    /// Perpendicular (edge-to-face) pi interactions.
    TShapedKey,
    "T-SHAPED"
);
secondary_structure_key!(
    /// Salt bridges, keyed by the receptor charged group's residue.
    SaltBridgeKey,
    "SALT-BRIDGE"
);

/// Number of columns in a flattened [`BindingFeatures`] vector.
pub const FEATURE_COUNT: usize =
    3 * AtomType::COUNT * (AtomType::COUNT + 1) / 2 + AtomType::COUNT + 43;

/// The complete interaction fingerprint of one receptor–ligand pose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingFeatures {
    pub close_contacts: Buckets<AtomTypePair>,
    pub contacts: Buckets<AtomTypePair>,
    pub electrostatics: Buckets<AtomTypePair>,
    pub ligand_atom_counts: Buckets<AtomType>,
    pub hydrogen_bonds: Buckets<HydrogenBondKey>,
    pub hydrophobics: Buckets<Stratum>,
    pub pi_stacking: Buckets<StackingKey>,
    pub pi_cation: Buckets<PiCationKey>,
    pub t_shaped: Buckets<TShapedKey>,
    pub active_site_flexibility: Buckets<Stratum>,
    pub salt_bridges: Buckets<SaltBridgeKey>,
    pub rotatable_bonds: usize,
}

struct Columns {
    names: Vec<String>,
    values: Vec<f64>,
}

impl Columns {
    fn push_group<K: BucketKey>(&mut self, group: &str, buckets: &Buckets<K>) {
        for (key, value) in buckets.iter() {
            self.names.push(format!("{group}.{key}"));
            self.values.push(value);
        }
    }
}

impl BindingFeatures {
    /// Column labels (`group.KEY`) in flattening order.
    pub fn feature_names() -> Vec<String> {
        Self::default().columns().names
    }

    /// Concatenates every group into one vector in schema order.
    pub fn flatten(&self) -> Result<Vec<f64>, EngineError> {
        let columns = self.columns();
        check_length(columns.values.len())?;
        Ok(columns.values)
    }

    pub fn named_values(&self) -> Result<Vec<(String, f64)>, EngineError> {
        let columns = self.columns();
        check_length(columns.values.len())?;
        Ok(columns.names.into_iter().zip(columns.values).collect())
    }

    fn columns(&self) -> Columns {
        let mut columns = Columns {
            names: Vec::with_capacity(FEATURE_COUNT),
            values: Vec::with_capacity(FEATURE_COUNT),
        };
        columns.push_group("close_contacts", &self.close_contacts);
        columns.push_group("contacts", &self.contacts);
        columns.push_group("electrostatics", &self.electrostatics);
        columns.push_group("ligand_atom_counts", &self.ligand_atom_counts);
        columns.push_group("hydrogen_bonds", &self.hydrogen_bonds);
        columns.push_group("hydrophobics", &self.hydrophobics);
        columns.push_group("pi_stacking", &self.pi_stacking);
        columns.push_group("pi_cation", &self.pi_cation);
        columns.push_group("t_shaped", &self.t_shaped);
        columns.push_group("active_site_flexibility", &self.active_site_flexibility);
        columns.push_group("salt_bridges", &self.salt_bridges);
        columns.names.push("rotatable_bonds".to_string());
        columns.values.push(self.rotatable_bonds as f64);
        columns
    }
}

fn check_length(actual: usize) -> Result<(), EngineError> {
    if actual == FEATURE_COUNT {
        Ok(())
    } else {
        Err(EngineError::SchemaViolation {
            expected: FEATURE_COUNT,
            actual,
        })
    }
}
