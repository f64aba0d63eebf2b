//! merge parsed variables into destination entries
use crate::env_file::EnvMap;
use crate::value::Value;
use indexmap::IndexMap;

/// Parsed source variables in source order, keyed by their original name
pub type Variables = IndexMap<String, Value>;

/// Counters reported after a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SyncSummary {
    /// keys that did not exist in the destination
    #[serde(rename = "new")]
    pub new_count: usize,
    /// keys whose value changed
    #[serde(rename = "updated")]
    pub updated_count: usize,
    /// entries in the destination after the merge
    #[serde(rename = "total")]
    pub total_count: usize,
}

/// Destination key for a source key: `prefix` followed by the uppercased key
pub fn env_key(prefix: &str, key: &str) -> String {
    format!("{prefix}{}", key.to_uppercase())
}

/// Merge `variables` into `env`
///
/// Existing entries without a counterpart in `variables` are kept. Pass an empty map to start from scratch.
pub fn merge(mut env: EnvMap, variables: &Variables, prefix: &str) -> (EnvMap, SyncSummary) {
    let mut summary = SyncSummary::default();

    for (key, value) in variables {
        let key = env_key(prefix, key);
        let value = value.to_string();

        match env.get(&key) {
            None => {
                tracing::debug!(%key, %value, "new");
                summary.new_count += 1;
            }
            Some(existing) if *existing != value => {
                tracing::debug!(%key, %existing, %value, "updated");
                summary.updated_count += 1;
            }
            Some(_) => continue,
        }

        env.insert(key, value);
    }

    summary.total_count = env.len();
    (env, summary)
}
