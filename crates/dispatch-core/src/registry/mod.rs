pub mod builtin;
pub mod schema;

use crate::error::DispatchError;
use regex::Regex;
use schema::RegistryDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a registry from a JSON file.
pub fn load_registry(path: &Path) -> Result<RegistryDef, DispatchError> {
    let content = std::fs::read_to_string(path).map_err(|e| DispatchError::RegistryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_registry(&content, path)
}

/// Parse a registry from a JSON string.
pub fn parse_registry(json: &str, source: &Path) -> Result<RegistryDef, DispatchError> {
    let registry: RegistryDef =
        serde_json::from_str(json).map_err(|e| DispatchError::RegistryLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_registry(&registry)?;
    Ok(registry)
}

/// Parse a registry from a JSON string (no file path context).
pub fn parse_registry_str(json: &str) -> Result<RegistryDef, DispatchError> {
    let registry: RegistryDef = serde_json::from_str(json).map_err(DispatchError::Json)?;
    validate_registry(&registry)?;
    Ok(registry)
}

/// Validate that a registry is well-formed.
pub fn validate_registry(registry: &RegistryDef) -> Result<(), DispatchError> {
    if registry.cities.is_empty() {
        return Err(DispatchError::RegistryInvalid(
            "cities must not be empty".into(),
        ));
    }

    if registry.tags.is_empty() {
        return Err(DispatchError::RegistryInvalid("tags must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for city in &registry.cities {
        let key = city.trim().to_lowercase();
        if key.is_empty() {
            return Err(DispatchError::RegistryInvalid(
                "city name must not be blank".into(),
            ));
        }
        if key.chars().any(|c| c.is_ascii_digit()) {
            return Err(DispatchError::RegistryInvalid(format!(
                "city '{}' contains digits",
                city
            )));
        }
        if !seen.insert(key) {
            return Err(DispatchError::RegistryInvalid(format!(
                "city '{}' is listed more than once",
                city
            )));
        }
    }

    for tag in &registry.tags {
        if tag.trim().is_empty() {
            return Err(DispatchError::RegistryInvalid(
                "tag keyword must not be blank".into(),
            ));
        }
    }

    Ok(())
}

/// A registry prepared for matching.
#[derive(Debug, Clone)]
pub struct Registry {
    name: String,
    /// Lowercased city names, longest first.
    cities: Vec<String>,
    keywords: Regex,
}

impl Registry {
    /// Validate and compile a registry definition.
    pub fn compile(def: &RegistryDef) -> Result<Registry, DispatchError> {
        validate_registry(def)?;

        let mut cities: Vec<String> = def
            .cities
            .iter()
            .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .collect();
        // Stable, so equal-length names keep file order.
        cities.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut tags: Vec<String> = def.tags.iter().map(|t| t.trim().to_lowercase()).collect();
        tags.sort_by(|a, b| b.len().cmp(&a.len()));
        tags.dedup();
        let alternation = tags
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let keywords = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .map_err(|e| DispatchError::RegistryInvalid(format!("bad tag keyword: {e}")))?;

        Ok(Registry {
            name: def.name.clone(),
            cities,
            keywords,
        })
    }

    /// Compile a built-in preset.
    pub fn preset(name: &str) -> Result<Registry, DispatchError> {
        Registry::compile(&builtin::load_preset(name)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased city names, longest first.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Case-insensitive, word-bounded matcher over the tag keywords.
    pub fn keywords(&self) -> &Regex {
        &self.keywords
    }
}
