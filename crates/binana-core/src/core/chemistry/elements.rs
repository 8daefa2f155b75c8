use crate::core::models::residue::is_standard_amino_acid;
use phf::{phf_map, phf_set};

/// Single-bond covalent radii in Angstroms.
static COVALENT_RADII: phf::Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "LI" => 1.28, "B" => 0.84, "C" => 0.76, "N" => 0.71,
    "O" => 0.66, "F" => 0.57, "NA" => 1.66, "MG" => 1.41, "AL" => 1.21,
    "SI" => 1.11, "P" => 1.07, "S" => 1.05, "CL" => 1.02, "K" => 2.03,
    "CA" => 1.76, "MN" => 1.39, "FE" => 1.32, "CO" => 1.26, "NI" => 1.24,
    "CU" => 1.32, "ZN" => 1.22, "AS" => 1.19, "SE" => 1.20, "BR" => 1.20,
    "RH" => 1.42, "AG" => 1.45, "CD" => 1.44, "I" => 1.39, "PT" => 1.36,
    "AU" => 1.36, "HG" => 1.32, "BI" => 1.48,
};

static METAL_IONS: phf::Set<&'static str> = phf_set! {
    "MG", "MN", "RH", "ZN", "FE", "BI", "AS", "AG", "CA", "CU", "CO", "NI",
};

static HALOGENS: phf::Set<&'static str> = phf_set! { "CL", "BR" };

static AUTODOCK_TYPE_ELEMENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "A" => "C", "C" => "C", "N" => "N", "NA" => "N", "NS" => "N",
    "O" => "O", "OA" => "O", "OS" => "O", "S" => "S", "SA" => "S",
    "H" => "H", "HD" => "H", "HS" => "H", "P" => "P", "F" => "F",
    "CL" => "CL", "BR" => "BR", "I" => "I", "FE" => "FE", "MG" => "MG",
    "MN" => "MN", "ZN" => "ZN", "CA" => "CA",
};

pub fn covalent_radius(element: &str) -> Option<f64> {
    COVALENT_RADII.get(element).copied()
}

pub fn is_metal_ion(element: &str) -> bool {
    METAL_IONS.contains(element)
}

pub fn element_from_autodock_type(atom_type: &str) -> Option<&'static str> {
    AUTODOCK_TYPE_ELEMENTS
        .get(atom_type.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Guesses the element of an atom from its name.
///
/// Leading digits are skipped (`1HB` is a hydrogen). Two-letter symbols are
/// only used for chlorine and bromine, or for ions whose residue name is the
/// symbol itself (`ZN` in residue `ZN`); everything else takes the first
/// letter, so a protein `CA` stays a carbon.
pub fn infer_element(name: &str, residue: &str) -> String {
    let letters: String = name
        .trim()
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();

    if letters.len() >= 2 && !is_standard_amino_acid(residue) {
        let two = &letters[..2];
        let is_ion = residue.trim().eq_ignore_ascii_case(two) && covalent_radius(two).is_some();
        if HALOGENS.contains(two) || is_ion {
            return two.to_string();
        }
    }
    letters.chars().next().map(String::from).unwrap_or_default()
}
