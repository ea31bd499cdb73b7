//! Screen definitions: what each tab polls and how it lays out.

use std::time::Duration;

use crate::models::{Column, PayloadKind, RecordSchema};

/// Highlight rows whose numeric `key` column exceeds `above`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRule {
    pub key: String,
    pub above: f64,
}

impl AlertRule {
    pub fn new(key: impl Into<String>, above: f64) -> Self {
        Self {
            key: key.into(),
            above,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenKind {
    /// JSON list rendered as a table with the schema's columns.
    Table {
        schema: RecordSchema,
        alert: Option<AlertRule>,
    },
    /// Plain text rendered verbatim.
    Text,
}

impl ScreenKind {
    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            ScreenKind::Table { schema, .. } => PayloadKind::list(schema.clone()),
            ScreenKind::Text => PayloadKind::Text,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ScreenKind::Table { .. })
    }

    pub fn alert(&self) -> Option<&AlertRule> {
        match self {
            ScreenKind::Table { alert, .. } => alert.as_ref(),
            ScreenKind::Text => None,
        }
    }
}

/// One mountable screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    /// Mount point identifier, used by `--screen`.
    pub id: String,
    pub title: String,
    /// Absolute URL, or a path joined onto the dashboard base URL.
    pub url: String,
    /// Per-screen override of the dashboard poll interval.
    pub interval: Option<Duration>,
    pub kind: ScreenKind,
}

impl ScreenConfig {
    pub fn table(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        schema: RecordSchema,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            interval: None,
            kind: ScreenKind::Table {
                schema,
                alert: None,
            },
        }
    }

    pub fn text(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            interval: None,
            kind: ScreenKind::Text,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_alert(mut self, rule: AlertRule) -> Self {
        if let ScreenKind::Table { alert, .. } = &mut self.kind {
            *alert = Some(rule);
        }
        self
    }
}

/// Dumpsters fill on a 0-10 scale; above this they need a pickup.
pub const DUMPSTER_OVERFLOW_LEVEL: f64 = 5.0;

pub fn trucks_screen() -> ScreenConfig {
    let schema = RecordSchema::new(vec![
        Column::text("status", "Status"),
        Column::number("fuel_level", "Fuel Level"),
        Column::number("trash_level", "Trash Level"),
    ])
    .with_name_header("Truck Name");
    ScreenConfig::table("trucks", "Trucks", "trucks.json", schema)
}

pub fn dumpsters_screen() -> ScreenConfig {
    let schema = RecordSchema::new(vec![Column::number("trash_level", "Value")
        .alias("value")
        .required()])
    .with_name_header("Dumpster Name");
    ScreenConfig::table("dumpsters", "Dumpsters", "dumpsters.json", schema)
        .with_alert(AlertRule::new("trash_level", DUMPSTER_OVERFLOW_LEVEL))
}

pub fn map_screen() -> ScreenConfig {
    ScreenConfig::text("map", "Map", "map.txt")
}

/// The screens of the fleet status page, in tab order.
pub fn builtin_screens() -> Vec<ScreenConfig> {
    vec![trucks_screen(), dumpsters_screen(), map_screen()]
}
