use super::types::ProfileConfig;
use crate::error::Error;
use std::collections::HashMap;
use std::sync::OnceLock;

static PROFILE_CONFIGS: OnceLock<Result<HashMap<String, ProfileConfig>, String>> = OnceLock::new();

macro_rules! embed_profile_config {
    ($name:expr, $path:expr) => {
        ($name, include_str!($path))
    };
}

fn load_embedded_configs() -> Result<HashMap<String, ProfileConfig>, String> {
    let mut configs = HashMap::new();

    let embedded_configs = [
        embed_profile_config!(
            "i2b2_2016_track-1",
            "../../configs/profiles/i2b2_2016_track-1.toml"
        ),
        embed_profile_config!("CAS XMI", "../../configs/profiles/cas_xmi.toml"),
    ];

    for (name, toml_content) in embedded_configs {
        let config: ProfileConfig = toml::from_str(toml_content)
            .map_err(|e| format!("Failed to parse embedded profile {name}: {e}"))?;

        if config.metadata.name != name {
            return Err(format!(
                "Profile name mismatch: expected {}, got {}",
                name, config.metadata.name
            ));
        }

        configs.insert(name.to_string(), config);
    }

    Ok(configs)
}

fn embedded_configs() -> Result<&'static HashMap<String, ProfileConfig>, Error> {
    PROFILE_CONFIGS
        .get_or_init(load_embedded_configs)
        .as_ref()
        .map_err(|msg| Error::Configuration(msg.clone()))
}

pub fn get_profile_config(name: &str) -> Result<&'static ProfileConfig, Error> {
    embedded_configs()?
        .get(name)
        .ok_or_else(|| Error::UnknownProfile(name.to_string()))
}

/// Names of the built-in profiles, sorted
pub fn list_available_profiles() -> Result<Vec<&'static str>, Error> {
    let mut names: Vec<&'static str> = embedded_configs()?.keys().map(|s| s.as_str()).collect();
    names.sort_unstable();
    Ok(names)
}
