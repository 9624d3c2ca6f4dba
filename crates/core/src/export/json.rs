use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    export::{ExportData, Serializer},
};

pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub version: String,
    pub exported_at: String,
    pub meeting_data: ExportData,
}

pub struct JsonSerializer {
    exported_at: DateTime<Utc>,
}

impl JsonSerializer {
    pub fn new(exported_at: DateTime<Utc>) -> Self {
        Self { exported_at }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }
}

impl Serializer for JsonSerializer {
    fn render(&self, data: &ExportData) -> Result<Vec<u8>> {
        let envelope = ExportEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            exported_at: self.exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            meeting_data: data.clone(),
        };
        Ok(serde_json::to_vec_pretty(&envelope)?)
    }
}
