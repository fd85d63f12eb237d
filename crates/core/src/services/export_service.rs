use crate::errors::CoreError;

/// A ready-to-download snapshot of the user's full financial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    /// Pretty-printed JSON, two-space indent
    pub contents: String,
}

impl ExportFile {
    pub const MIME_TYPE: &'static str = "text/json;charset=utf-8";

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Packages fetched state for download. The host performs the actual save.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn package(
        &self,
        data: &serde_json::Value,
        file_name: &str,
    ) -> Result<ExportFile, CoreError> {
        if data.is_null() {
            return Err(CoreError::ValidationError(
                "Export returned no data".into(),
            ));
        }

        let contents = serde_json::to_string_pretty(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize export: {e}")))?;

        Ok(ExportFile {
            file_name: file_name.to_string(),
            contents,
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
