//! Sources command handler

use anyhow::Result;
use dotaconstants::{Source, SOURCES};

use crate::config::Config;

/// One line per source: key, then `location=url` for each document
fn describe(source: &Source, config: &Config) -> String {
    let locations: Vec<String> = source
        .locations
        .iter()
        .map(|location| format!("{}={}", location.name, config.url(location)))
        .collect();
    format!("{:<14} {}", source.key, locations.join(" "))
}

/// Handle the sources command
pub fn handle(config: &Config) -> Result<()> {
    for source in SOURCES {
        println!("{}", describe(source, config));
    }
    Ok(())
}
