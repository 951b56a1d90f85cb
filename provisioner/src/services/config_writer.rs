//! keep-tecdsa client configuration writer
//!
//! Reads the TOML template, overwrites the runtime-derived fields and writes
//! the result. Everything else in the template is carried over untouched.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use crate::error::{ProvisionerError, ProvisionerResult};
use crate::traits::ConfigWriter;
use crate::types::ClientConfigUpdate;
use shared::{ProvisioningStep, step_debug};

/// Section paths and keys overwritten in the template
pub mod fields {
    pub const ETHEREUM: &[&str] = &["ethereum"];
    pub const ETHEREUM_ACCOUNT: &[&str] = &["ethereum", "account"];
    pub const CONTRACT_ADDRESSES: &[&str] = &["ethereum", "ContractAddresses"];
    pub const SANCTIONED_APPLICATIONS: &[&str] = &["SanctionedApplications"];
    pub const STORAGE: &[&str] = &["Storage"];

    pub const URL: &str = "URL";
    pub const KEY_FILE: &str = "KeyFile";
    pub const KEEP_FACTORY: &str = "BondedECDSAKeepFactory";
    pub const ADDRESSES: &str = "Addresses";
    pub const DATA_DIR: &str = "DataDir";
}

/// Walk (and create where missing) nested tables
fn section_mut<'a>(doc: &'a mut Table, path: &[&str]) -> Result<&'a mut Table, String> {
    let mut current = doc;
    for (depth, key) in path.iter().enumerate() {
        let entry = current
            .entry(key.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        current = entry
            .as_table_mut()
            .ok_or_else(|| format!("{} is not a table", path[..=depth].join(".")))?;
    }
    Ok(current)
}

fn string_array<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(items.into_iter().map(|s| Value::String(s.into())).collect())
}

/// Overwrite the runtime fields of a parsed template in place
pub fn apply_client_config(doc: &mut Table, update: &ClientConfigUpdate) -> Result<(), String> {
    section_mut(doc, fields::ETHEREUM)?
        .insert(fields::URL.to_string(), Value::String(update.ethereum_url.clone()));

    section_mut(doc, fields::ETHEREUM_ACCOUNT)?
        .insert(fields::KEY_FILE.to_string(), string_array(update.key_files.iter().cloned()));

    section_mut(doc, fields::CONTRACT_ADDRESSES)?.insert(
        fields::KEEP_FACTORY.to_string(),
        Value::String(update.keep_factory.to_string()),
    );

    section_mut(doc, fields::SANCTIONED_APPLICATIONS)?.insert(
        fields::ADDRESSES.to_string(),
        string_array(update.sanctioned_applications.iter().map(|a| a.to_string())),
    );

    section_mut(doc, fields::STORAGE)?
        .insert(fields::DATA_DIR.to_string(), Value::String(update.data_dir.clone()));

    Ok(())
}

/// Render a template document with the runtime values applied
pub fn render_client_config(template_path: &Path, template: &str, update: &ClientConfigUpdate) -> ProvisionerResult<String> {
    let mut doc: Table = toml::from_str(template).map_err(|e| ProvisionerError::ConfigTemplate {
        path: template_path.to_path_buf(),
        message: e.to_string(),
    })?;

    apply_client_config(&mut doc, update).map_err(|message| ProvisionerError::ConfigTemplate {
        path: template_path.to_path_buf(),
        message,
    })?;

    Ok(toml::to_string(&doc)?)
}

/// Config writer backed by TOML files on disk
pub struct TomlConfigWriter {
    template_path: PathBuf,
    output_path: PathBuf,
}

impl TomlConfigWriter {
    pub fn new(template_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
        }
    }
}

#[async_trait]
impl ConfigWriter for TomlConfigWriter {
    async fn write_client_config(&self, update: &ClientConfigUpdate) -> ProvisionerResult<PathBuf> {
        let template = tokio::fs::read_to_string(&self.template_path)
            .await
            .map_err(|e| ProvisionerError::file_system("read config template", &self.template_path, e))?;

        let rendered = render_client_config(&self.template_path, &template, update)?;

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProvisionerError::file_system("create config directory", parent, e))?;
        }

        tokio::fs::write(&self.output_path, rendered)
            .await
            .map_err(|e| ProvisionerError::file_system("write client config", &self.output_path, e))?;

        step_debug!(
            ProvisioningStep::ClientConfig,
            "💾 Rendered {} into {}",
            self.template_path.display(),
            self.output_path.display()
        );
        Ok(self.output_path.clone())
    }
}
