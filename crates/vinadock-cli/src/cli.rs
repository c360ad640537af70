use crate::utils::parser::parse_triplet;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "vinadock - batch scoring and docking of ligands with AutoDock Vina.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score ligands in their given poses against a receptor.
    Score(RunArgs),
    /// Dock ligands into a search box on a receptor and write every pose.
    Dock(RunArgs),
}

/// Arguments shared by `score` and `dock`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Receptor structure (.pdbqt is used as-is; .pdb and .sdf are converted).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub receptor: PathBuf,

    /// Ligand file (.sdf, .pdb or .pdbqt); every record is processed.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ligands: PathBuf,

    /// Output structure file for the annotated ligands or poses.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write a CSV table of the scores.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Search Box Overrides ---
    /// Box center in Angstrom.
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_triplet, allow_hyphen_values = true)]
    pub center: Option<[f64; 3]>,

    /// Center the box on the centroid of this ligand instead.
    #[arg(long, value_name = "PATH", conflicts_with = "center")]
    pub autobox_ligand: Option<PathBuf>,

    /// Box edge lengths in Angstrom.
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_triplet)]
    pub size: Option<[f64; 3]>,

    // --- Search Overrides ---
    #[arg(long, value_name = "INT")]
    pub exhaustiveness: Option<u32>,

    /// Maximum number of poses per ligand (1 to 9).
    #[arg(short = 'n', long, value_name = "INT")]
    pub num_modes: Option<u32>,

    /// Maximum energy difference between the best and worst pose, in kcal/mol.
    #[arg(long, value_name = "FLOAT")]
    pub energy_range: Option<f64>,

    #[arg(long, value_name = "INT", allow_hyphen_values = true)]
    pub seed: Option<i64>,

    /// CPUs the engine may use per ligand.
    #[arg(long, value_name = "INT")]
    pub cpu: Option<u32>,

    // --- Engine Overrides ---
    /// Docking engine executable; `vina` on PATH by default.
    #[arg(long, value_name = "PATH")]
    pub vina: Option<PathBuf>,

    /// Directory under which scratch files are created.
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Abort on the first ligand the engine rejects instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Leave scratch files in place after the run.
    #[arg(long)]
    pub keep_scratch: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.exhaustiveness=16
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn center_and_autobox_ligand_conflict() {
        let argv = "vinadock dock -r r.pdbqt -l l.sdf -o o.sdf \
                    --center 1,2,3 --autobox-ligand x.sdf";
        let result = Cli::try_parse_from(argv.split_whitespace());
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let argv = "vinadock score -r r.pdbqt -l l.sdf -o o.sdf -vv";
        let cli = Cli::try_parse_from(argv.split_whitespace()).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Score(_)));
    }
}
