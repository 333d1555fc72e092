use serde::Deserialize;

/// Query parameters de `GET /api/stories/new`.
///
/// Values are taken as signed so that range checks happen in the engine
/// and report a validation error instead of a parse error.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewestQuery {
    pub offset: i64,
    pub limit: i64,
    pub search: Option<String>,
}

impl Default for NewestQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
            search: None,
        }
    }
}
