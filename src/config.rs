use crate::effects::RandomizationMode;
use crate::error::RzResult;
use crate::run::RunOptions;
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// groups | dist | inclusion | random
    #[arg(long, default_value = "groups")]
    pub rand_type: String,

    /// Pick uniformly among distinct effects, ignoring how often each occurs.
    #[arg(long, default_value_t = false)]
    pub ignore_dist: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub set_esl: bool,

    #[arg(long, default_value = "RandomAlchemyPatch.esp")]
    pub patch_file_name: String,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rand_type: "groups".to_string(),
            ignore_dist: false,
            set_esl: true,
            patch_file_name: "RandomAlchemyPatch.esp".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RzResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn mode(&self) -> RzResult<RandomizationMode> {
        RandomizationMode::parse(&self.rand_type)
    }

    pub fn run_options(&self) -> RzResult<RunOptions> {
        Ok(RunOptions {
            mode: self.mode()?,
            ignore_dist: self.ignore_dist,
            seed: self.seed,
        })
    }

    /// Copies every value the user typed on the command line over `self`.
    pub fn merge_from_cli(&mut self, cli: &Settings, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(rand_type, "rand_type");
        update_if_present!(ignore_dist, "ignore_dist");
        update_if_present!(set_esl, "set_esl");
        update_if_present!(patch_file_name, "patch_file_name");
        update_if_present!(seed, "seed");
    }
}
