use serde::Deserialize;

/// File-level mirror of the CLI flags. Every field is optional; unset fields
/// fall back to the CLI defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub concurrency: Option<usize>,
    pub requests: Option<u64>,
    pub method: Option<String>,
    pub headers: Option<Vec<String>>,
    pub insecure: Option<bool>,
    pub data: Option<String>,
    pub timeout: Option<DurationValue>,
    pub verbose: Option<bool>,
}

/// Either whole seconds or a suffixed string such as `"250ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}
