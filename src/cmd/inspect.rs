use crate::reports::{self, CatalogRow};
use alchemy_randomizer::consts::{PARALYSIS_EFFECT_ID, SLOT_COUNT};
use alchemy_randomizer::error::RzResult;
use alchemy_randomizer::run::harvest_catalog;
use alchemy_randomizer::store::PluginStore;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Only list effects whose name contains this text.
    #[arg(short, long)]
    pub filter: Option<String>,
}

pub fn run(args: InspectArgs, input: &str) -> RzResult<()> {
    let store = PluginStore::load_from_file(input, "inspect")?;
    let catalog = harvest_catalog(&store)?;

    let mut rows: Vec<CatalogRow> = catalog
        .identities()
        .iter()
        .map(|&id| CatalogRow {
            id,
            name: catalog
                .find_first(id)
                .map(|(_, e)| e.fields.name.clone())
                .unwrap_or_default(),
            count: catalog.count(id),
        })
        .collect();

    if let Some(ref filter) = args.filter {
        let needle = filter.to_lowercase();
        rows.retain(|r| r.name.to_lowercase().contains(&needle));
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    println!("\n🔎 === EFFECT CATALOG === 🔎");
    reports::print_catalog_table(&rows);

    println!("Occurrences: {}", catalog.len());
    println!("Distinct:    {}", catalog.distinct_count());

    let viable = catalog.distinct_count() >= SLOT_COUNT
        && catalog.distinct_count_excluding(&[PARALYSIS_EFFECT_ID]) > 0;
    if viable {
        println!("Slot modes:  ✅ available");
    } else {
        println!(
            "Slot modes:  ❌ need at least {} distinct effects (only 'groups' will work)",
            SLOT_COUNT
        );
    }

    Ok(())
}
