//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

pub const SCHEMA_VERSION: u32 = 1;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a DataFile<T> from RON text.
pub fn parse_data_file<T>(file_name: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if data.schema_version != SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file_name.to_string(),
            message: format!(
                "unsupported schema_version {} (expected {})",
                data.schema_version, SCHEMA_VERSION
            ),
        });
    }

    Ok(data.items)
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_data_file(&file_name, &contents)
}

/// Load all content from assets/data/*.ron into a ContentRegistry.
///
/// Each file that fails keeps its built-in fallback; the errors are
/// returned next to the registry so the caller can log them.
pub fn load_all_content(base_path: &Path) -> (ContentRegistry, Vec<ContentLoadError>) {
    let mut registry = ContentRegistry::builtin();
    let mut errors = Vec::new();

    match load_data_file::<CharacterDef>(&base_path.join("characters.ron")) {
        Ok(items) => {
            registry.characters.clear();
            for item in items {
                registry.characters.insert(item.id, item);
            }
        }
        Err(e) => errors.push(e),
    }

    match load_data_file::<PickupSlotDef>(&base_path.join("pickup_layout.ron")) {
        Ok(mut items) => {
            items.sort_by_key(|slot| slot.slot);
            registry.pickup_layout = items;
        }
        Err(e) => errors.push(e),
    }

    (registry, errors)
}
