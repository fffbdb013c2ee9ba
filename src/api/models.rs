use serde::Deserialize;

use crate::error::Result;
use crate::scan::ScanRequest;

/// Query string submitted by the search form.
#[derive(Debug, Default, Deserialize)]
pub struct ScanQuery {
    #[serde(rename = "domain-search")]
    pub domain: Option<String>,
    #[serde(rename = "keyword-search")]
    pub keyword: Option<String>,
}

impl ScanQuery {
    /// Validates the form fields. A missing keyword is treated as empty.
    pub fn into_request(self) -> Result<ScanRequest> {
        ScanRequest::new(
            self.domain.as_deref().unwrap_or_default(),
            self.keyword.as_deref().unwrap_or_default(),
        )
    }
}
