//! Application data embedded from TOML files at compile time.
//!
//! Like `config.rs` this is deserialized with serde, but it is not
//! user-configurable: it describes the rovers themselves, not user choices.
//!
//! Data files are located in `embedded/`:
//! - `rovers.toml` - launch/landing dates, mission status and a short blurb per rover

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

const ROVERS_TOML: &str = include_str!("../embedded/rovers.toml");

/// Static facts about one rover
#[derive(Debug, Clone, Deserialize)]
pub struct RoverFacts {
    pub launch: String,
    pub landing: String,
    pub status: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RoverFactsFile {
    rovers: HashMap<String, RoverFacts>,
}

/// Get the rover facts table (lazy-loaded)
pub fn rover_facts_table() -> &'static HashMap<String, RoverFacts> {
    static TABLE: OnceLock<HashMap<String, RoverFacts>> = OnceLock::new();
    TABLE.get_or_init(|| {
        toml::from_str::<RoverFactsFile>(ROVERS_TOML)
            .map(|file| file.rovers)
            .unwrap_or_else(|e| {
                panic!("Failed to parse rovers.toml: {}", e);
            })
    })
}

/// Look up facts for a rover by display name
pub fn rover_facts(name: &str) -> Option<&'static RoverFacts> {
    rover_facts_table().get(name)
}
