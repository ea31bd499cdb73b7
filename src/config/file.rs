//! TOML configuration file.
//!
//! ```toml
//! base_url = "http://fleet-pi.local:5000"
//! interval_ms = 1000
//! timeout_ms = 5000
//!
//! [[screens]]
//! id = "trucks"          # override part of a built-in screen
//! interval_ms = 500
//!
//! [[screens]]
//! id = "bins"            # or declare a new one
//! title = "Bins"
//! url = "bins.json"
//! kind = "table"
//! name_header = "Bin"
//! alert_key = "fill"
//! alert_above = 8
//! columns = [{ key = "fill", header = "Fill", kind = "number", required = true }]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use super::screens::{AlertRule, ScreenConfig, ScreenKind};
use super::{ConfigError, DashConfig};
use crate::models::{Column, RecordSchema};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub interval_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub screens: Vec<FileScreen>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileScreenKind {
    Table,
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileScreen {
    pub id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub interval_ms: Option<u64>,
    pub kind: Option<FileScreenKind>,
    pub name_header: Option<String>,
    pub position_header: Option<String>,
    pub columns: Option<Vec<Column>>,
    pub alert_key: Option<String>,
    pub alert_above: Option<f64>,
}

pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub(super) fn interval_from_ms(field: &str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::ZeroInterval(field.to_string()));
    }
    Ok(Duration::from_millis(ms))
}

impl DashConfig {
    /// Layer a parsed file over this config.
    pub fn merge_file(mut self, file: FileConfig) -> Result<Self, ConfigError> {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(ms) = file.interval_ms {
            self.interval = interval_from_ms("interval_ms", ms)?;
        }
        if let Some(ms) = file.timeout_ms {
            self.http_timeout = Some(interval_from_ms("timeout_ms", ms)?);
        }

        let mut seen = HashSet::new();
        let mut added = Vec::new();
        for screen in file.screens {
            if !seen.insert(screen.id.clone()) {
                return Err(ConfigError::DuplicateScreen(screen.id));
            }
            match self.screens.iter_mut().find(|s| s.id == screen.id) {
                Some(existing) => apply_overrides(existing, screen)?,
                None => added.push(new_screen(screen)?),
            }
        }
        self.screens.extend(added);
        Ok(self)
    }
}

fn apply_overrides(existing: &mut ScreenConfig, file: FileScreen) -> Result<(), ConfigError> {
    let alert_rule = alert_from(&file)?;
    if let Some(title) = &file.title {
        existing.title = title.clone();
    }
    if let Some(url) = &file.url {
        existing.url = url.clone();
    }
    if let Some(ms) = file.interval_ms {
        let field = format!("screens.{}.interval_ms", existing.id);
        existing.interval = Some(interval_from_ms(&field, ms)?);
    }

    match (file.kind, existing.kind.is_table()) {
        (Some(FileScreenKind::Text), true) => existing.kind = ScreenKind::Text,
        (Some(FileScreenKind::Table), false) => {
            existing.kind = ScreenKind::Table {
                schema: schema_from(&file.name_header, &file.position_header, file.columns.clone()),
                alert: alert_rule,
            }
        }
        _ => {
            if let ScreenKind::Table { schema, alert } = &mut existing.kind {
                if let Some(header) = &file.name_header {
                    schema.name_header = header.clone();
                }
                if let Some(header) = &file.position_header {
                    schema.position_header = header.clone();
                }
                if let Some(columns) = file.columns.clone() {
                    schema.columns = columns;
                }
                if let Some(rule) = alert_rule {
                    *alert = Some(rule);
                }
            }
        }
    }
    Ok(())
}

fn new_screen(file: FileScreen) -> Result<ScreenConfig, ConfigError> {
    let url = file
        .url
        .clone()
        .ok_or_else(|| ConfigError::MissingScreenUrl(file.id.clone()))?;
    let title = file.title.clone().unwrap_or_else(|| file.id.clone());
    let interval = file
        .interval_ms
        .map(|ms| interval_from_ms(&format!("screens.{}.interval_ms", file.id), ms))
        .transpose()?;

    let kind = match file.kind.unwrap_or(FileScreenKind::Table) {
        FileScreenKind::Text => ScreenKind::Text,
        FileScreenKind::Table => ScreenKind::Table {
            schema: schema_from(&file.name_header, &file.position_header, file.columns.clone()),
            alert: alert_from(&file)?,
        },
    };

    Ok(ScreenConfig {
        id: file.id,
        title,
        url,
        interval,
        kind,
    })
}

fn schema_from(
    name_header: &Option<String>,
    position_header: &Option<String>,
    columns: Option<Vec<Column>>,
) -> RecordSchema {
    let mut schema = RecordSchema::new(columns.unwrap_or_default());
    if let Some(header) = name_header {
        schema.name_header = header.clone();
    }
    if let Some(header) = position_header {
        schema.position_header = header.clone();
    }
    schema
}

fn alert_from(file: &FileScreen) -> Result<Option<AlertRule>, ConfigError> {
    match (&file.alert_key, file.alert_above) {
        (Some(key), Some(above)) => Ok(Some(AlertRule::new(key.clone(), above))),
        (None, None) => Ok(None),
        _ => Err(ConfigError::IncompleteAlert(file.id.clone())),
    }
}
