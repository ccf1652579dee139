//! Load `Template`/`CompanyProfile` from YAML files or strings.
//!
//! Grounded on `config/src/domain/intents.rs::IntentsConfig::load`.

use crate::error::{ConfigError, Result};
use crate::validator::validate_template;
use receptionist_core::{CompanyProfile, Template};
use std::path::Path;
use tracing::{info, warn};

pub fn load_template<P: AsRef<Path>>(path: P) -> Result<Template> {
    let path_display = path.as_ref().display().to_string();
    let content = std::fs::read_to_string(path.as_ref()).map_err(|_| {
        warn!(path = %path_display, "template file not found");
        ConfigError::FileNotFound(path_display.clone())
    })?;
    let template = parse_template(&content, &path_display)?;
    if let Err(reason) = validate_template(&template) {
        warn!(path = %path_display, id = %template.id, %reason, "template failed validation");
        return Err(ConfigError::InvalidTemplate(reason));
    }
    info!(path = %path_display, id = %template.id, version = template.version, "loaded template");
    Ok(template)
}

pub fn parse_template(yaml: &str, source: &str) -> Result<Template> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
        path: source.to_string(),
        reason: e.to_string(),
    })
}

pub fn load_company<P: AsRef<Path>>(path: P) -> Result<CompanyProfile> {
    let path_display = path.as_ref().display().to_string();
    let content = std::fs::read_to_string(path.as_ref()).map_err(|_| {
        warn!(path = %path_display, "company file not found");
        ConfigError::FileNotFound(path_display.clone())
    })?;
    let company = parse_company(&content, &path_display)?;
    info!(path = %path_display, id = %company.id, "loaded company profile");
    Ok(company)
}

pub fn parse_company(yaml: &str, source: &str) -> Result<CompanyProfile> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
        path: source.to_string(),
        reason: e.to_string(),
    })
}
