use crate::error::DispatchError;
use crate::registry::schema::RegistryDef;

const PHOENIX_METRO_JSON: &str = include_str!("../../../../registries/phoenix-metro.json");
const TUCSON_JSON: &str = include_str!("../../../../registries/tucson.json");

/// Available predefined registries.
pub const PRESETS: &[&str] = &["phoenix", "tucson"];

/// Preset used when none is named.
pub const DEFAULT_PRESET: &str = "phoenix";

/// Load a predefined registry by name.
pub fn load_preset(name: &str) -> Result<RegistryDef, DispatchError> {
    match name {
        "phoenix" => {
            let registry: RegistryDef = serde_json::from_str(PHOENIX_METRO_JSON)?;
            Ok(registry)
        }
        "tucson" => {
            let registry: RegistryDef = serde_json::from_str(TUCSON_JSON)?;
            Ok(registry)
        }
        _ => Err(DispatchError::RegistryInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
