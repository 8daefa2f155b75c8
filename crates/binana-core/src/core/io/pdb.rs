use super::traits::StructureFile;
use crate::core::chemistry::{bonds, elements};
use crate::core::models::atom::{Atom, RecordKind};
use crate::core::models::residue::is_standard_amino_acid;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Which column layout to expect after the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdbFlavor {
    /// Plain PDB: element symbol in columns 77-78.
    #[default]
    Pdb,
    /// AutoDock PDBQT: partial charge in columns 71-76, atom type in 78-79.
    Pdbqt,
}

impl PdbFlavor {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdbqt") => PdbFlavor::Pdbqt,
            _ => PdbFlavor::Pdb,
        }
    }
}

/// A recoverable problem met while loading; the offending record is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    MalformedRecord { line: usize },
    DanglingBond { line: usize, serial: usize },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MalformedRecord { line } => {
                write!(f, "line {line}: malformed atom record skipped")
            }
            LoadWarning::DanglingBond { line, serial } => {
                write!(f, "line {line}: CONECT references unknown serial {serial}")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub flavor: PdbFlavor,
    pub warnings: Vec<LoadWarning>,
    pub remarks: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

pub struct PdbFile;

impl PdbFile {
    /// Reads a structure, completes its bond graph and annotates it.
    ///
    /// Only the first model is read. Records with unreadable coordinates and
    /// CONECT entries pointing at unknown serials are skipped and reported in
    /// [`PdbMetadata::warnings`].
    pub fn read_with_flavor(
        reader: &mut impl BufRead,
        flavor: PdbFlavor,
    ) -> Result<(Structure, PdbMetadata), PdbError> {
        let mut structure = Structure::new();
        let mut metadata = PdbMetadata {
            flavor,
            ..Default::default()
        };
        let mut conect_lines: Vec<(usize, String)> = Vec::new();
        let mut first_model_done = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {
                    if first_model_done {
                        continue;
                    }
                    match parse_atom_record(&line, flavor) {
                        Some(atom) if is_standard_amino_acid(&atom.residue) => {
                            structure.add_new_atom(atom);
                        }
                        Some(atom) => {
                            structure.add_new_non_protein_atom(atom);
                        }
                        None => {
                            warn!(line = line_num, "Skipping atom record with unreadable coordinates.");
                            metadata
                                .warnings
                                .push(LoadWarning::MalformedRecord { line: line_num });
                        }
                    }
                }
                "CONECT" => conect_lines.push((line_num, line.clone())),
                "ENDMDL" => first_model_done = true,
                "END" => break,
                "REMARK" => metadata.remarks.push(line.clone()),
                _ if line.starts_with("TORSDOF") => {
                    let torsions = line.split_whitespace().nth(1).and_then(|n| n.parse().ok());
                    structure.set_declared_torsions(torsions);
                }
                _ => {}
            }
        }

        for (line_num, line) in &conect_lines {
            apply_conect_record(&mut structure, line, *line_num, &mut metadata.warnings);
        }

        structure.create_protein_atom_bonds_by_distance();
        let has_explicit_ligand_bonds = structure
            .non_protein_indices()
            .any(|i| structure.degree(i) > 0);
        if !has_explicit_ligand_bonds {
            bonds::bond_non_protein_atoms_by_distance(&mut structure);
        }
        structure.annotate();

        debug!(
            atoms = structure.len(),
            non_protein = structure.non_protein_indices().count(),
            warnings = metadata.warnings.len(),
            "Loaded structure."
        );
        Ok((structure, metadata))
    }
}

fn parse_atom_record(line: &str, flavor: PdbFlavor) -> Option<Atom> {
    let record: RecordKind = slice_and_trim(line, 0, 6).parse().ok()?;
    let x: f64 = slice_and_trim(line, 30, 38).parse().ok()?;
    let y: f64 = slice_and_trim(line, 38, 46).parse().ok()?;
    let z: f64 = slice_and_trim(line, 46, 54).parse().ok()?;

    let chain = line
        .get(21..22)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ');
    let residue_number = slice_and_trim(line, 22, 26).parse().unwrap_or(0);

    let mut atom = Atom::new(
        slice_and_trim(line, 12, 16),
        slice_and_trim(line, 17, 20),
        residue_number,
        chain,
        Point3::new(x, y, z),
    )
    .with_record(record);

    if let Ok(serial) = slice_and_trim(line, 6, 11).parse::<usize>() {
        atom = atom.with_serial(serial);
    }

    match flavor {
        PdbFlavor::Pdb => {
            let element = slice_and_trim(line, 76, 78);
            if !element.is_empty() && element.chars().all(|c| c.is_ascii_alphabetic()) {
                atom = atom.with_element(element);
            }
        }
        PdbFlavor::Pdbqt => {
            if let Ok(charge) = slice_and_trim(line, 70, 76).parse::<f64>() {
                atom = atom.with_charge(charge);
            }
            let autodock_type = slice_and_trim(line, 77, 79);
            if !autodock_type.is_empty() {
                if let Some(element) = elements::element_from_autodock_type(autodock_type) {
                    atom = atom.with_element(element);
                }
                atom = atom.with_atom_type(autodock_type);
            }
        }
    }
    Some(atom)
}

fn conect_serials(line: &str) -> Vec<usize> {
    let fields: Vec<&str> = line.get(6..).unwrap_or("").split_whitespace().collect();
    if fields.iter().all(|f| f.len() <= 5) {
        let parsed: Option<Vec<usize>> = fields.iter().map(|f| f.parse().ok()).collect();
        if let Some(serials) = parsed {
            return serials;
        }
    }
    (6..line.len())
        .step_by(5)
        .filter_map(|start| slice_and_trim(line, start, start + 5).parse().ok())
        .collect()
}

/// Adds the bonds of one CONECT record to the centre atom only.
pub(crate) fn apply_conect_record(
    structure: &mut Structure,
    line: &str,
    line_num: usize,
    warnings: &mut Vec<LoadWarning>,
) {
    let serials = conect_serials(line);
    let Some((&center_serial, partners)) = serials.split_first() else {
        return;
    };

    let mut dangling = |serial: usize| {
        warn!(line = line_num, serial, "CONECT references an unknown atom serial.");
        warnings.push(LoadWarning::DanglingBond {
            line: line_num,
            serial,
        });
    };

    let Some(center) = structure.index_of_serial(center_serial) else {
        dangling(center_serial);
        return;
    };
    for &serial in partners {
        match structure.index_of_serial(serial) {
            Some(partner) if structure.add_bond(center, partner).is_ok() => {}
            _ => dangling(serial),
        }
    }
}

fn format_atom_record(atom: &Atom) -> String {
    let name = if atom.name.len() < 4 && atom.element.len() == 1 {
        format!(" {:<3}", atom.name)
    } else {
        format!("{:<4}", atom.name)
    };
    format!(
        "{:<6}{:>5} {} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        atom.record.as_str(),
        atom.index,
        name,
        atom.residue,
        atom.chain,
        atom.residue_number,
        atom.coordinates.x,
        atom.coordinates.y,
        atom.coordinates.z,
        1.0,
        0.0,
        atom.element,
    )
}

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        Self::read_with_flavor(reader, PdbFlavor::Pdb)
    }

    /// Picks the flavour from the file extension (`.pdbqt` or plain PDB).
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Structure, Self::Metadata), Self::Error> {
        let flavor = PdbFlavor::from_path(path.as_ref());
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_with_flavor(&mut reader, flavor)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        for atom in structure.atoms() {
            writeln!(writer, "{}", format_atom_record(atom))?;
        }
        for atom in structure.atoms() {
            let partners: Vec<usize> = atom.connected_indices().iter().copied().collect();
            for chunk in partners.chunks(4) {
                write!(writer, "CONECT{:>5}", atom.index)?;
                for partner in chunk {
                    write!(writer, "{:>5}", partner)?;
                }
                writeln!(writer)?;
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}
