use anyhow::Result;

use folio_core::AppConfig;
use folio_tui::available_themes;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        AppConfig::default().save()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{}\n", path.display(), source);
    println!("# themes: {}\n", available_themes().join(", "));
    print!("{}", config.to_toml()?);

    Ok(())
}
