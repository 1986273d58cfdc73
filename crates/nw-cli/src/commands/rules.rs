use comfy_table::{ContentArrangement, Table};

use nw_engine::rules::{RuleKey, RuleSet};

pub fn run() -> Result<(), String> {
    let defaults = RuleSet::default();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rule", "Default", "Effect"]);

    for &key in RuleKey::all() {
        let default = if defaults.get(key) { "on" } else { "off" };
        table.add_row(vec![key.to_string(), default.to_string(), key.description().to_string()]);
    }

    println!("{table}");
    println!();
    println!("  Toggle with `rule <name> on|off` inside a session, before locking.");

    Ok(())
}
