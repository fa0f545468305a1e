/// CLI argument definitions for the `fitscore` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::model::{Gender, TestType};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "fitscore",
    version,
    about = "Fitness assessment scoring, injury risk and percentiles"
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Reference-data arguments shared by the scoring commands.
#[derive(Args)]
pub struct ReferenceArgs {
    /// Reference data file (default: nearest fitscore.toml, else built-in tables)
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one assessment file
    #[command(long_about = "\
Score one assessment file.

Grades the seven physical tests against the reference standards (falling
back to built-in tables), aggregates them into strength, mobility, balance
and cardio, and derives the overall score, injury risk, questionnaire
scores and the comprehensive score.

Category weights:
  Strength  30%   Mobility  25%   Balance  20%   Cardio  25%

Comprehensive score:
  Physical 60%   Knowledge 15%   Lifestyle 15%   Readiness 10%

Values marked * were overridden by a trainer and are never recomputed.

Examples:
  fitscore score client.json                 # print the report
  fitscore score client.json --write         # also save the scores
  fitscore score client.json --json          # machine-readable output")]
    Score {
        /// Assessment JSON file
        path: PathBuf,

        #[command(flatten)]
        common: ReferenceArgs,

        /// Write the scored assessment back to the file
        #[arg(long)]
        write: bool,

        /// Do not adjust the overall score for test-day temperature
        #[arg(long)]
        no_temperature_adjustment: bool,
    },

    /// Look up the percentile of a score against normative data
    Percentile {
        /// Test type (e.g. push_up, toe_touch, overall)
        #[arg(long)]
        test: TestType,

        /// Raw score to rank
        #[arg(long, allow_negative_numbers = true)]
        score: f64,

        /// Client age in years
        #[arg(long)]
        age: u32,

        /// Client gender (M or F)
        #[arg(long)]
        gender: Gender,

        #[command(flatten)]
        common: ReferenceArgs,
    },

    /// Summarize risk factors across assessment files
    #[command(long_about = "\
Summarize risk factors across assessment files.

Reads the stored scores of every assessment under the given paths and counts
each risk factor by source (physical movement flags or questionnaire
answers). Also reports the mean injury risk and the distribution of risk
levels:

  Low        < 25
  Moderate   < 50
  High       < 75
  Very High  >= 75

Examples:
  fitscore risks data/                  # all assessments under data/
  fitscore risks a.json b.json --top 5  # top 5 factors of two files")]
    Risks {
        /// Assessment files or directories (default: current directory)
        paths: Vec<PathBuf>,

        /// Glob pattern of files to skip (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Show only the top N factors (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recalculate every assessment file under a directory
    #[command(long_about = "\
Recalculate every assessment file under a directory.

Each file is rescored and written back atomically on its own. A file that
fails to load or save is reported and skipped; the rest still run. The exit
code is non-zero when any file failed.

Examples:
  fitscore batch data/                         # rescore everything
  fitscore batch data/ --dry-run               # count changes only
  fitscore batch data/ --exclude 'archive/**'  # skip archived files")]
    Batch {
        /// Directory of assessment JSON files
        path: PathBuf,

        /// Glob pattern of files to skip (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Count what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Do not adjust the overall score for test-day temperature
        #[arg(long)]
        no_temperature_adjustment: bool,

        #[command(flatten)]
        common: ReferenceArgs,
    },

    /// Compare two scored assessments
    Diff {
        /// Earlier assessment
        before: PathBuf,

        /// Later assessment
        after: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check reference data for inconsistencies
    #[command(long_about = "\
Check reference data for inconsistencies.

Checks:
  - standard thresholds must not increase (excellent >= good >= ...)
  - age_min <= age_max on standards and normative rows
  - normative percentile markers must not decrease
  - questionnaire category weights in [0, 1] summing to 1.0
  - choice risk weights in [0, 1]
  - choice points no greater than the question's max points

With --fix, thresholds and markers are sorted, weights are clamped and
normalized, and the result is written back (or to --output). Age ranges and
points are reported only.

Examples:
  fitscore validate                          # nearest fitscore.toml
  fitscore validate --reference ref.toml --fix --output fixed.toml")]
    Validate {
        #[command(flatten)]
        common: ReferenceArgs,

        /// Correct fixable issues and write the result
        #[arg(long)]
        fix: bool,

        /// Write the corrected data here instead of over the source
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the built-in standards as a TOML document
    Seed,

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}
