//! Molecular fixtures shared by the unit tests.
//!
//! Small molecules are stored as PDB text and go through the regular loader,
//! so every fixture is bonded and annotated exactly like a file on disk.

use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::{Point3, Vector3};
use std::io::Cursor;

pub const BENZENE_PDB: &str = "\
HETATM    1  C1  BNZ A   1       1.390   0.000   0.000  1.00  0.00           C
HETATM    2  C2  BNZ A   1       0.695   1.204   0.000  1.00  0.00           C
HETATM    3  C3  BNZ A   1      -0.695   1.204   0.000  1.00  0.00           C
HETATM    4  C4  BNZ A   1      -1.390   0.000   0.000  1.00  0.00           C
HETATM    5  C5  BNZ A   1      -0.695  -1.204   0.000  1.00  0.00           C
HETATM    6  C6  BNZ A   1       0.695  -1.204   0.000  1.00  0.00           C
HETATM    7  H1  BNZ A   1       2.470   0.000   0.000  1.00  0.00           H
HETATM    8  H2  BNZ A   1       1.235   2.139   0.000  1.00  0.00           H
HETATM    9  H3  BNZ A   1      -1.235   2.139   0.000  1.00  0.00           H
HETATM   10  H4  BNZ A   1      -2.470   0.000   0.000  1.00  0.00           H
HETATM   11  H5  BNZ A   1      -1.235  -2.139   0.000  1.00  0.00           H
HETATM   12  H6  BNZ A   1       1.235  -2.139   0.000  1.00  0.00           H
END
";

pub const AMMONIUM_SULFATE_PDB: &str = "\
HETATM    1  N   NH4 A   1      -6.000   0.000   0.000  1.00  0.00           N
HETATM    2  H1  NH4 A   1      -5.405   0.595   0.595  1.00  0.00           H
HETATM    3  H2  NH4 A   1      -5.405  -0.595  -0.595  1.00  0.00           H
HETATM    4  H3  NH4 A   1      -6.595   0.595  -0.595  1.00  0.00           H
HETATM    5  H4  NH4 A   1      -6.595  -0.595   0.595  1.00  0.00           H
HETATM    6  N   NH4 A   2       6.000   0.000   0.000  1.00  0.00           N
HETATM    7  H1  NH4 A   2       6.595   0.595   0.595  1.00  0.00           H
HETATM    8  H2  NH4 A   2       6.595  -0.595  -0.595  1.00  0.00           H
HETATM    9  H3  NH4 A   2       5.405   0.595  -0.595  1.00  0.00           H
HETATM   10  H4  NH4 A   2       5.405  -0.595   0.595  1.00  0.00           H
HETATM   11  S   SO4 A   3       0.000   0.000   0.000  1.00  0.00           S
HETATM   12  O1  SO4 A   3       0.860   0.860   0.860  1.00  0.00           O
HETATM   13  O2  SO4 A   3       0.860  -0.860  -0.860  1.00  0.00           O
HETATM   14  O3  SO4 A   3      -0.860   0.860  -0.860  1.00  0.00           O
HETATM   15  O4  SO4 A   3      -0.860  -0.860   0.860  1.00  0.00           O
END
";

pub const GUANIDINE_PDB: &str = "\
HETATM    1  C   GAI A   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    2  N1  GAI A   1       0.000   1.330   0.000  1.00  0.00           N
HETATM    3  N2  GAI A   1      -1.152  -0.665   0.000  1.00  0.00           N
HETATM    4  N3  GAI A   1       1.152  -0.665   0.000  1.00  0.00           N
HETATM    5  H1  GAI A   1      -0.875   1.835   0.000  1.00  0.00           H
HETATM    6  H2  GAI A   1      -2.026  -0.160   0.000  1.00  0.00           H
HETATM    7  H3  GAI A   1      -1.152  -1.675   0.000  1.00  0.00           H
HETATM    8  H4  GAI A   1       1.152  -1.675   0.000  1.00  0.00           H
HETATM    9  H5  GAI A   1       2.026  -0.160   0.000  1.00  0.00           H
END
";

pub const FORMIC_ACID_PDB: &str = "\
HETATM    1  C   FMT A   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    2  O1  FMT A   1       1.200   0.000   0.000  1.00  0.00           O
HETATM    3  O2  FMT A   1      -0.749   1.111   0.000  1.00  0.00           O
HETATM    4  H   FMT A   1      -0.512  -0.962   0.000  1.00  0.00           H
HETATM    5  HO  FMT A   1      -1.677   0.827   0.000  1.00  0.00           H
END
";

pub const PYRROLIDINE_PDB: &str = "\
HETATM    1  N1  PYR A   1       0.000   1.276   0.000  1.00  0.00           N
HETATM    2  C2  PYR A   1      -1.214   0.394   0.000  1.00  0.00           C
HETATM    3  C3  PYR A   1      -0.750  -1.032   0.000  1.00  0.00           C
HETATM    4  C4  PYR A   1       0.750  -1.032   0.000  1.00  0.00           C
HETATM    5  C5  PYR A   1       1.214   0.394   0.000  1.00  0.00           C
HETATM    6  H1  PYR A   1       0.000   1.855   0.827  1.00  0.00           H
HETATM    7  H2  PYR A   1      -1.812   0.589   0.890  1.00  0.00           H
HETATM    8  H3  PYR A   1      -1.812   0.589  -0.890  1.00  0.00           H
HETATM    9  H4  PYR A   1      -1.120  -1.541   0.890  1.00  0.00           H
HETATM   10  H5  PYR A   1      -1.120  -1.541  -0.890  1.00  0.00           H
HETATM   11  H6  PYR A   1       1.120  -1.541   0.890  1.00  0.00           H
HETATM   12  H7  PYR A   1       1.120  -1.541  -0.890  1.00  0.00           H
HETATM   13  H8  PYR A   1       1.812   0.589   0.890  1.00  0.00           H
HETATM   14  H9  PYR A   1       1.812   0.589  -0.890  1.00  0.00           H
END
";

pub const TRIFLIC_ACID_PDB: &str = "\
HETATM    1  S   TFA A   1       0.000   0.000   0.000  1.00  0.00           S
HETATM    2  C   TFA A   1       1.057   1.057   1.057  1.00  0.00           C
HETATM    3  O1  TFA A   1       0.826  -0.826  -0.826  1.00  0.00           O
HETATM    4  O2  TFA A   1      -0.826   0.826  -0.826  1.00  0.00           O
HETATM    5  O3  TFA A   1      -0.826  -0.826   0.826  1.00  0.00           O
HETATM    6  F1  TFA A   1       0.289   1.824   1.824  1.00  0.00           F
HETATM    7  F2  TFA A   1       1.824   0.289   1.824  1.00  0.00           F
HETATM    8  F3  TFA A   1       1.824   1.824   0.289  1.00  0.00           F
HETATM    9  H   TFA A   1      -1.475  -1.475   1.138  1.00  0.00           H
END
";

pub const DIMETHYL_PHOSPHATE_PDB: &str = "\
HETATM    1  P   DMP A   1       0.000   0.000   0.000  1.00  0.00           P
HETATM    2  O1  DMP A   1       0.924   0.924   0.924  1.00  0.00           O
HETATM    3  O2  DMP A   1       0.924  -0.924  -0.924  1.00  0.00           O
HETATM    4  O3  DMP A   1      -0.866   0.866  -0.866  1.00  0.00           O
HETATM    5  O4  DMP A   1      -0.866  -0.866   0.866  1.00  0.00           O
HETATM    6  C1  DMP A   1       1.749   1.749   1.749  1.00  0.00           C
HETATM    7  C2  DMP A   1       1.749  -1.749  -1.749  1.00  0.00           C
END
";

pub fn load(text: &str) -> Structure {
    let (structure, metadata) = PdbFile::read_from(&mut Cursor::new(text)).unwrap();
    assert!(metadata.warnings.is_empty(), "{:?}", metadata.warnings);
    structure
}

pub fn benzene() -> Structure {
    load(BENZENE_PDB)
}

pub fn ammonium_sulfate() -> Structure {
    load(AMMONIUM_SULFATE_PDB)
}

pub fn guanidine() -> Structure {
    load(GUANIDINE_PDB)
}

pub fn formic_acid() -> Structure {
    load(FORMIC_ACID_PDB)
}

pub fn pyrrolidine() -> Structure {
    load(PYRROLIDINE_PDB)
}

pub fn triflic_acid() -> Structure {
    load(TRIFLIC_ACID_PDB)
}

pub fn dimethyl_phosphate() -> Structure {
    load(DIMETHYL_PHOSPHATE_PDB)
}

/// A non-protein structure bonded by distance and annotated.
pub fn ligand(atoms: &[(&str, [f64; 3])]) -> Structure {
    let mut structure = Structure::new();
    for (name, [x, y, z]) in atoms {
        structure.add_new_non_protein_atom(Atom::new(name, "LIG", 1, 'L', Point3::new(*x, *y, *z)));
    }
    structure.create_non_protein_atom_bonds_by_distance();
    structure.annotate();
    structure
}

/// A protein structure made of the given residues, bonded and annotated.
pub fn receptor(residues: &[(&str, isize, &[(&str, [f64; 3])])]) -> Structure {
    let mut structure = Structure::new();
    for (residue, number, atoms) in residues {
        for (name, [x, y, z]) in atoms.iter() {
            structure.add_new_atom(Atom::new(name, residue, *number, 'A', Point3::new(*x, *y, *z)));
        }
    }
    structure.create_protein_atom_bonds_by_distance();
    structure.annotate();
    structure
}

/// Six points of a regular hexagon of radius 1.39 around `center`, in the
/// xy plane or, when `vertical`, in the xz plane.
pub fn hexagon(center: [f64; 3], vertical: bool) -> Vec<[f64; 3]> {
    (0..6)
        .map(|i| {
            let t = (60.0 * i as f64).to_radians();
            let (u, v) = (1.39 * t.cos(), 1.39 * t.sin());
            if vertical {
                [center[0] + u, center[1], center[2] + v]
            } else {
                [center[0] + u, center[1] + v, center[2]]
            }
        })
        .collect()
}

/// A heavy-atom benzene ligand centred at `center`.
pub fn benzene_ring(center: [f64; 3], vertical: bool) -> Structure {
    let names = ["C1", "C2", "C3", "C4", "C5", "C6"];
    let points = hexagon(center, vertical);
    let atoms: Vec<(&str, [f64; 3])> = names.iter().copied().zip(points).collect();
    ligand(&atoms)
}

/// A phenylalanine side-chain ring centred at `center`, as residue `PHE 1`.
pub fn phenylalanine_ring(center: [f64; 3], vertical: bool) -> Structure {
    let names = ["CG", "CD1", "CE1", "CZ", "CE2", "CD2"];
    let points = hexagon(center, vertical);
    let atoms: Vec<(&str, [f64; 3])> = names.iter().copied().zip(points).collect();
    receptor(&[("PHE", 1, atoms.as_slice())])
}

/// Places a fourth atom from three reference atoms using internal coordinates.
///
/// `bond_length` is the distance `c-d`, `angle` the bond angle `b-c-d` and
/// `torsion` the dihedral `a-b-c-d`, both in degrees.
fn place_from_internal(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    bond_length: f64,
    angle: f64,
    torsion: f64,
) -> Point3<f64> {
    let bc = (c - b).normalize();
    let n = (b - a).cross(&bc).normalize();
    let m = n.cross(&bc);

    let (theta, phi) = (angle.to_radians(), torsion.to_radians());
    let d = bc * (-bond_length * theta.cos())
        + m * (bond_length * theta.sin() * phi.cos())
        + n * (bond_length * theta.sin() * phi.sin());
    c + d
}

/// An ALA backbone (N, CA, C) of `length` residues built from ideal bond
/// geometry with every residue at the given `(phi, psi)` and trans peptides.
pub fn ideal_backbone(length: usize, phi: f64, psi: f64) -> Structure {
    const N_CA: f64 = 1.458;
    const CA_C: f64 = 1.525;
    const C_N: f64 = 1.329;
    const N_CA_C: f64 = 111.2;
    const CA_C_N: f64 = 116.2;
    const C_N_CA: f64 = 121.7;

    let mut backbone: Vec<[Point3<f64>; 3]> = Vec::with_capacity(length);
    for _ in 0..length {
        let residue = match backbone.last() {
            None => {
                let n = Point3::origin();
                let ca = Point3::new(N_CA, 0.0, 0.0);
                let angle = N_CA_C.to_radians();
                let c = ca + Vector3::new(-angle.cos(), angle.sin(), 0.0) * CA_C;
                [n, ca, c]
            }
            Some([prev_n, prev_ca, prev_c]) => {
                let n = place_from_internal(prev_n, prev_ca, prev_c, C_N, CA_C_N, psi);
                let ca = place_from_internal(prev_ca, prev_c, &n, N_CA, C_N_CA, 180.0);
                let c = place_from_internal(prev_c, &n, &ca, CA_C, N_CA_C, phi);
                [n, ca, c]
            }
        };
        backbone.push(residue);
    }

    let mut structure = Structure::new();
    for (i, atoms) in backbone.iter().enumerate() {
        for (name, position) in ["N", "CA", "C"].iter().zip(atoms) {
            structure.add_new_atom(Atom::new(name, "ALA", i as isize + 1, 'A', *position));
        }
    }
    structure.create_protein_atom_bonds_by_distance();
    structure.annotate();
    structure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::{bond_angle, dihedral, distance};

    #[test]
    fn internal_coordinates_are_reproduced() {
        let a = Point3::new(0.3, -1.2, 0.4);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(1.5, 0.1, -0.2);

        let d = place_from_internal(&a, &b, &c, 1.33, 116.0, -57.0);

        assert!((distance(&c, &d) - 1.33).abs() < 1e-6);
        assert!((bond_angle(&b, &c, &d) - 116.0).abs() < 1e-6);
        assert!((dihedral(&a, &b, &c, &d) + 57.0).abs() < 1e-6);
    }
}
