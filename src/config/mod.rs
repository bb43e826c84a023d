use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{dates::MonthOverflow, errors::FieldError, form::PageMode};

const CONFIG_DIR_NAME: &str = "contract_fields";
const CONFIG_FILE_NAME: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Settings for a form page: which mode it renders in, how month overflow is
/// resolved and which CSS classes mark the formatted fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatterConfig {
    pub page_mode: PageMode,
    pub month_overflow: MonthOverflow,
    pub money_class: String,
    pub percentage_class: String,
    pub money_display_class: String,
    pub percentage_display_class: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            page_mode: PageMode::Create,
            month_overflow: MonthOverflow::Rollover,
            money_class: "money-input".into(),
            percentage_class: "percentage-input".into(),
            money_display_class: "formato-moneda".into(),
            percentage_display_class: "formato-porcentaje".into(),
        }
    }
}

impl FormatterConfig {
    pub fn for_mode(page_mode: PageMode) -> Self {
        Self {
            page_mode,
            ..Self::default()
        }
    }
}

/// Loads and saves [`FormatterConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `<config dir>/contract_fields/config.json`.
    pub fn default_location() -> Result<Self, FieldError> {
        let base = dirs::config_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no configuration directory")
        })?;
        Ok(Self::new(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing files yield the defaults.
    pub fn load(&self) -> Result<FormatterConfig, FieldError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(FormatterConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &FormatterConfig) -> Result<(), FieldError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "saved formatter config");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), FieldError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/x/config.json")),
            PathBuf::from("/x/config.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/x/config")), PathBuf::from("/x/config.tmp"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: FormatterConfig = serde_json::from_str(r#"{"page_mode": "Edit"}"#).unwrap();
        assert_eq!(config.page_mode, PageMode::Edit);
        assert_eq!(config.money_class, "money-input");
        assert_eq!(config.month_overflow, MonthOverflow::Rollover);
    }
}
