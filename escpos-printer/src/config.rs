//! Print job options

/// Document name shown in the spooler queue
pub const DEFAULT_DOCUMENT_NAME: &str = "ESC/POS Print Job";

/// Spooler datatype that passes bytes through to the device unchanged
pub const RAW_DATATYPE: &str = "RAW";

/// Options applied to every document submitted through a session
///
/// Captured once when the session is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOptions {
    document_name: String,
    datatype: String,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            datatype: RAW_DATATYPE.to_string(),
        }
    }
}

impl JobOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document name shown in the spooler queue
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    /// Set the spooler datatype (`RAW` unless the driver needs a variant
    /// such as `RAW [FF appended]`)
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = datatype.into();
        self
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn datatype(&self) -> &str {
        &self.datatype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = JobOptions::default();
        assert_eq!(options.document_name(), "ESC/POS Print Job");
        assert_eq!(options.datatype(), "RAW");
    }

    #[test]
    fn test_builder() {
        let options = JobOptions::new()
            .with_document_name("Kitchen ticket")
            .with_datatype("RAW [FF appended]");
        assert_eq!(options.document_name(), "Kitchen ticket");
        assert_eq!(options.datatype(), "RAW [FF appended]");
    }
}
