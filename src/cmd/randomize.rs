use crate::reports;
use alchemy_randomizer::config::Settings;
use alchemy_randomizer::consts::ESL_FLAG;
use alchemy_randomizer::error::RzResult;
use alchemy_randomizer::run::randomize;
use alchemy_randomizer::store::{PluginStore, RecordStore};
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RandomizeArgs {
    #[command(flatten)]
    pub settings: Settings,

    /// Where to write the patch (defaults to `<patch_file_name>.json`).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Human-readable change log.
    #[arg(long)]
    pub log: Option<String>,

    /// Effect -> ingredients summary as CSV.
    #[arg(long)]
    pub summary_csv: Option<String>,

    /// Skip the terminal tables.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

pub fn run(args: RandomizeArgs, settings: Settings, input: &str) -> RzResult<()> {
    let options = settings.run_options()?;
    let mut store = PluginStore::load_from_file(input, settings.patch_file_name.clone())?;

    let report = randomize(&mut store, &options)?;

    info!("Setting ESL flag to {}.", settings.set_esl);
    store.set_output_flag(ESL_FLAG, settings.set_esl);

    if !args.quiet {
        reports::print_change_table(&report);
        reports::print_usage_table(&report);
    }
    reports::print_run_summary(&report);

    if let Some(path) = &args.log {
        info!("📝 Writing change log to {}", path);
        report.write_log(BufWriter::new(File::create(path)?))?;
    }

    if let Some(path) = &args.summary_csv {
        info!("📊 Writing effect summary to {}", path);
        report.write_usage_csv(File::create(path)?)?;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| format!("{}.json", settings.patch_file_name));
    store.save_patch(&output)?;
    println!("Patch: {}", output);

    Ok(())
}
