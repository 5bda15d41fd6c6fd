// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// `prepare` and `predict` with their flags. Each Args struct
// converts into its use case config, so Layer 2 never sees clap.

use clap::{Args, Subcommand};

use crate::application::predict_use_case::PredictConfig;
use crate::application::prepare_use_case::PrepareConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build windowed (and optionally stem) pair files
    Prepare(PrepareArgs),

    /// Vote over generation logs and write the glossed corpus
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Folder holding one sub-folder per language corpus
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Where the `<prefix>-fairseq-data` folders are created
    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// Language code, e.g. ddo, git, lez
    #[arg(long, default_value = "ddo")]
    pub language: String,

    /// JSON file overriding the built-in language table
    #[arg(long)]
    pub languages_file: Option<String>,

    /// Context words on each side; one dataset per size
    #[arg(long, value_delimiter = ',', default_value = "1,2")]
    pub window_sizes: Vec<usize>,

    /// Also build the translation -> stems dataset
    #[arg(long)]
    pub stemmer: bool,
}

impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            data_dir:       a.data_dir,
            output_dir:     a.output_dir,
            language:       a.language,
            languages_file: a.languages_file,
            window_sizes:   a.window_sizes,
            stemmer:        a.stemmer,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    #[arg(long, default_value = "ddo")]
    pub language: String,

    #[arg(long)]
    pub languages_file: Option<String>,

    /// Which covered corpus to gloss
    #[arg(long, default_value = "dev", value_parser = ["dev", "test"])]
    pub split: String,

    /// Generation logs of the window models, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub window_logs: Vec<String>,

    /// Generation log of the stem model
    #[arg(long)]
    pub stem_log: Option<String>,

    /// Glossed corpus to write
    #[arg(long, default_value = "results.txt")]
    pub output: String,

    /// Folder for metrics.csv (default: next to the output)
    #[arg(long)]
    pub metrics_dir: Option<String>,
}

impl From<PredictArgs> for PredictConfig {
    fn from(a: PredictArgs) -> Self {
        PredictConfig {
            data_dir:       a.data_dir,
            language:       a.language,
            languages_file: a.languages_file,
            split:          a.split,
            window_logs:    a.window_logs,
            stem_log:       a.stem_log,
            output:         a.output,
            metrics_dir:    a.metrics_dir,
        }
    }
}
