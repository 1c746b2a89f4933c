use anyhow::{anyhow, Result};

use folio_core::content::Catalog;
use folio_core::AppConfig;

pub fn run(config: &AppConfig, category: &str, json: bool) -> Result<()> {
    let catalog = Catalog::from_config(&config.content, config.ui.cell_vertical_scale)?;

    let Some(category) = catalog.find(category) else {
        let keys: Vec<&str> = catalog
            .categories()
            .iter()
            .map(|c| c.tab.key.as_str())
            .collect();
        return Err(anyhow!(
            "Unknown category '{}'. Available: {}",
            category,
            keys.join(", ")
        ));
    };

    let items = category.items();

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("{} ({} items):\n", category.tab.title, items.len());
    for item in &items {
        println!("  {:>3}  {}", item.id, item.source_ref);
    }

    Ok(())
}
