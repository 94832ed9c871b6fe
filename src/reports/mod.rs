use alchemy_randomizer::consts::PARALYSIS_EFFECT_ID;
use alchemy_randomizer::outcome::RunReport;
use alchemy_randomizer::records::{EffectFields, EffectId};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// One catalog row for `inspect`: identity, display name, live occurrences.
pub struct CatalogRow {
    pub id: EffectId,
    pub name: String,
    pub count: usize,
}

fn effect_list(effects: &[EffectFields]) -> String {
    effects
        .iter()
        .map(|e| format!("{} ({}/{}/{})", e.name, e.magnitude, e.area, e.duration))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_change_table(report: &RunReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Ingredient").add_attribute(Attribute::Bold),
        Cell::new("FormID"),
        Cell::new("Original (Mag/Area/Dur)"),
        Cell::new("New (Mag/Area/Dur)").fg(Color::Cyan),
    ]);

    let mut changes: Vec<_> = report.changes.iter().collect();
    changes.sort_by(|a, b| a.name.cmp(&b.name));

    for change in changes {
        table.add_row(vec![
            Cell::new(&change.name).add_attribute(Attribute::Bold),
            Cell::new(change.form_id.to_string()),
            Cell::new(effect_list(&change.original)),
            Cell::new(effect_list(&change.assigned)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_usage_table(report: &RunReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Effect").add_attribute(Attribute::Bold),
        Cell::new("FormID"),
        Cell::new("Count"),
        Cell::new("Ingredients"),
    ]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (id, entry) in report.usage.sorted_by_name() {
        let names: Vec<&str> = entry.records.iter().map(String::as_str).collect();
        table.add_row(vec![
            Cell::new(&entry.name).add_attribute(Attribute::Bold),
            Cell::new(id.to_string()),
            Cell::new(entry.records.len()),
            Cell::new(names.join(", ")),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_run_summary(report: &RunReport) {
    println!("\n=== 🧪 RANDOMIZATION SUMMARY ===");
    println!("Type:        {}", report.mode);
    println!("Ingredients: {}", report.changes.len());
    println!("Effects:     {}", report.usage.len());
    if let (Some(initial), Some(remaining)) = (report.pool_initial, report.pool_remaining) {
        println!("Pool:        {} -> {}", initial, remaining);
    }
}

pub fn print_catalog_table(rows: &[CatalogRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Effect").add_attribute(Attribute::Bold),
        Cell::new("FormID"),
        Cell::new("Occurrences"),
    ]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for row in rows {
        let name_cell = if row.id == PARALYSIS_EFFECT_ID {
            Cell::new(format!("{} (never first)", row.name)).fg(Color::Red)
        } else {
            Cell::new(&row.name)
        };
        table.add_row(vec![
            name_cell,
            Cell::new(row.id.to_string()),
            Cell::new(row.count),
        ]);
    }
    println!("\n{}", table);
}
