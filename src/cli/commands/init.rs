//! `init` command: set up the data directory and a starter config.

use console::style;

use crate::config::Settings;

pub fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let data_dir = settings.data_dir();
    std::fs::create_dir_all(&data_dir)?;
    println!("{} {}", style("Data directory:").bold(), data_dir.display());

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        println!(
            "{} {} (already exists)",
            style("Config file:").bold(),
            config_path.display()
        );
    } else {
        Settings::write_default(&config_path)?;
        println!(
            "{} {} (created)",
            style("Config file:").bold(),
            config_path.display()
        );
    }

    Ok(())
}
