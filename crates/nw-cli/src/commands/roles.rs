use comfy_table::{ContentArrangement, Table};

use nw_engine::role;

pub fn run() -> Result<(), String> {
    let catalog = role::base_catalog();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Role", "Camp", "Count", "Ability"]);

    for entry in &catalog {
        table.add_row(vec![
            entry.name.clone(),
            entry.camp.to_string(),
            entry.count.to_string(),
            entry.description.clone(),
        ]);
    }

    println!("{table}");

    let counts = role::count_by_camp(&catalog);
    println!();
    println!(
        "  {} cards: {} good, {} wolf, {} third",
        counts.good + counts.wolf + counts.third,
        counts.good,
        counts.wolf,
        counts.third
    );

    Ok(())
}
