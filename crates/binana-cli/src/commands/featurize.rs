use crate::cli::FeaturizeArgs;
use crate::error::Result;
use binana::engine::config::BinanaParams;
use binana::engine::features::BindingFeatures;
use binana::workflows;
use std::fs::File;
use std::io::{self, Write};
use tracing::{info, warn};

pub fn run(args: FeaturizeArgs) -> Result<()> {
    let params = match &args.config {
        Some(path) => {
            info!("Loading interaction parameters from {:?}", path);
            BinanaParams::load(path)?
        }
        None => BinanaParams::default(),
    };

    info!(
        "Featurizing ligand {:?} against receptor {:?}",
        &args.ligand, &args.receptor
    );
    let output = workflows::featurize::run_from_paths(&args.ligand, &args.receptor, &params)?;

    for warning in output
        .receptor_warnings
        .iter()
        .map(|w| ("receptor", w))
        .chain(output.ligand_warnings.iter().map(|w| ("ligand", w)))
    {
        warn!("Skipped part of the {} file: {}", warning.0, warning.1);
    }

    match &args.output {
        Some(path) => {
            write_csv(&output.features, File::create(path)?)?;
            info!("Features written to {:?}", path);
        }
        None => write_csv(&output.features, io::stdout().lock())?,
    }
    Ok(())
}

/// Writes a header row of feature names followed by one row of values.
pub fn write_csv<W: Write>(features: &BindingFeatures, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(BindingFeatures::feature_names())?;
    let values = features.flatten()?;
    writer.write_record(values.iter().map(|v| v.to_string()))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binana::engine::features::FEATURE_COUNT;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const RING_RECEPTOR_PDB: &str = "\
ATOM      1  CG  PHE A   1       1.390   0.000   0.000  1.00  0.00           C
ATOM      2  CD1 PHE A   1       0.695   1.204   0.000  1.00  0.00           C
ATOM      3  CE1 PHE A   1      -0.695   1.204   0.000  1.00  0.00           C
ATOM      4  CZ  PHE A   1      -1.390   0.000   0.000  1.00  0.00           C
ATOM      5  CE2 PHE A   1      -0.695  -1.204   0.000  1.00  0.00           C
ATOM      6  CD2 PHE A   1       0.695  -1.204   0.000  1.00  0.00           C
END
";

    const STACKED_LIGAND_PDB: &str = "\
HETATM    1  C1  BNZ L   1       1.390   0.000   3.700  1.00  0.00           C
HETATM    2  C2  BNZ L   1       0.695   1.204   3.700  1.00  0.00           C
HETATM    3  C3  BNZ L   1      -0.695   1.204   3.700  1.00  0.00           C
HETATM    4  C4  BNZ L   1      -1.390   0.000   3.700  1.00  0.00           C
HETATM    5  C5  BNZ L   1      -0.695  -1.204   3.700  1.00  0.00           C
HETATM    6  C6  BNZ L   1       0.695  -1.204   3.700  1.00  0.00           C
END
";

    fn write_inputs(dir: &std::path::Path) -> (PathBuf, PathBuf) {
        let receptor = dir.join("receptor.pdb");
        let ligand = dir.join("ligand.pdb");
        fs::write(&receptor, RING_RECEPTOR_PDB).unwrap();
        fs::write(&ligand, STACKED_LIGAND_PDB).unwrap();
        (receptor, ligand)
    }

    #[test]
    fn csv_has_header_and_one_value_row() {
        let mut buffer = Vec::new();
        write_csv(&BindingFeatures::default(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(',').count(), FEATURE_COUNT);
        assert!(lines[0].starts_with("close_contacts.A_A,"));
        assert!(lines[1].split(',').all(|v| v == "0"));
    }

    #[test]
    fn featurize_writes_output_file() {
        let dir = tempdir().unwrap();
        let (receptor, ligand) = write_inputs(dir.path());
        let output = dir.path().join("features.csv");

        run(FeaturizeArgs {
            receptor,
            ligand,
            config: None,
            output: Some(output.clone()),
        })
        .unwrap();

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(headers.len(), FEATURE_COUNT);
        assert_eq!(row.len(), FEATURE_COUNT);
        let stacking = headers
            .iter()
            .position(|h| h == "pi_stacking.STACKING_OTHER")
            .unwrap();
        assert_eq!(&row[stacking], "1");
    }

    #[test]
    fn featurize_applies_config_overrides() {
        let dir = tempdir().unwrap();
        let (receptor, ligand) = write_inputs(dir.path());
        let config = dir.path().join("params.toml");
        fs::write(&config, "pi-stacking-cutoff = 3.0\n").unwrap();
        let output = dir.path().join("features.csv");

        run(FeaturizeArgs {
            receptor,
            ligand,
            config: Some(config),
            output: Some(output.clone()),
        })
        .unwrap();

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let stacking = headers
            .iter()
            .position(|h| h == "pi_stacking.STACKING_OTHER")
            .unwrap();
        assert_eq!(&row[stacking], "0");
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let (receptor, ligand) = write_inputs(dir.path());
        let config = dir.path().join("params.toml");
        fs::write(&config, "unknown-cutoff = 1.0\n").unwrap();

        let result = run(FeaturizeArgs {
            receptor,
            ligand,
            config: Some(config),
            output: None,
        });
        assert!(matches!(result, Err(crate::error::CliError::Config(_))));
    }
}
