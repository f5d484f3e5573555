//! Field checks shared by both registrars.
//!
//! Each check reports the first failing field; nothing here touches the store.

use crate::{CreateRepository, CreateTarget, Provider, RegistryError};

/// URL schemes a source or remote URL may use.
const ALLOWED_SCHEMES: [&str; 2] = ["https://", "ssh://"];

fn require(field: &'static str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

fn parse_provider(field: &'static str, value: &str) -> Result<Provider, RegistryError> {
    value.parse().map_err(|_| {
        let allowed = Provider::ALL.map(|p| p.as_str()).join(", ");
        RegistryError::validation(field, format!("invalid {field}. allowed: {allowed}"))
    })
}

fn check_url(field: &'static str, value: &str) -> Result<(), RegistryError> {
    if !ALLOWED_SCHEMES.iter().any(|scheme| value.starts_with(scheme)) {
        return Err(RegistryError::validation(
            field,
            format!("{field} must start with {}", ALLOWED_SCHEMES.join(" or ")),
        ));
    }
    Ok(())
}

/// Validate a repository command, returning the parsed source provider.
pub fn validate_repository(input: &CreateRepository) -> Result<Provider, RegistryError> {
    require("name", &input.name)?;
    require("source_provider", &input.source_provider)?;
    require("source_url", &input.source_url)?;
    let provider = parse_provider("source_provider", &input.source_provider)?;
    check_url("source_url", &input.source_url)?;
    Ok(provider)
}

/// Validate a target command, returning the parsed provider.
pub fn validate_target(input: &CreateTarget) -> Result<Provider, RegistryError> {
    require("provider", &input.provider)?;
    let provider = parse_provider("provider", &input.provider)?;
    require("remote_url", &input.remote_url)?;
    check_url("remote_url", &input.remote_url)?;
    Ok(provider)
}
