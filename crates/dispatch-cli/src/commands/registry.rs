use dispatch_core::error::DispatchError;
use dispatch_core::registry::{builtin, load_registry, Registry};
use std::path::Path;

pub fn list() -> Result<(), DispatchError> {
    println!("Available predefined registries:\n");
    for name in builtin::PRESETS {
        let def = builtin::load_preset(name)?;
        let region = match def.region.as_deref() {
            Some(r) => format!(" [{r}]"),
            None => String::new(),
        };
        let default = if *name == builtin::DEFAULT_PRESET {
            " (default)"
        } else {
            ""
        };
        println!("  {:<8} {} (v{}){}{}", name, def.name, def.version, region, default);
        if let Some(ref desc) = def.description {
            println!("           {desc}");
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), DispatchError> {
    let def = builtin::load_preset(preset)?;
    let registry = Registry::compile(&def)?;

    println!("{} (version {})\n", def.name, def.version);
    if let Some(ref desc) = def.description {
        println!("{desc}\n");
    }

    println!("Cities ({}), matched longest first:\n", registry.cities().len());
    for city in registry.cities() {
        println!("  {}", city.to_uppercase());
    }
    println!();

    println!("Tag keywords ({}):\n", def.tags.len());
    println!("  {}", def.tags.join(", "));
    println!();

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), DispatchError> {
    let def = load_registry(file)?;
    Registry::compile(&def)?;

    println!("Registry '{}' (v{}) is valid.", def.name, def.version);
    println!("  Cities: {}", def.cities.len());
    println!("  Tag keywords: {}", def.tags.len());

    let mut warnings = Vec::new();
    for city in &def.cities {
        if def.tags.iter().any(|t| t.eq_ignore_ascii_case(city.trim())) {
            warnings.push(format!("'{city}' is both a city and a tag keyword"));
        }
    }
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}
