//! Variable expansion for env file values.
//!
//! Values may reference other variables:
//!
//! - `${NAME}` or `$NAME` - replaced with the value of `NAME`
//! - `\$` - produces a literal `$`
//!
//! References resolve against the unexpanded variables of the same
//! directory first, then the process environment snapshot. Unknown names
//! expand to the empty string.

use super::EnvMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\$|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("reference pattern is valid")
});

/// Expand references in a single value.
pub fn expand_value(value: &str, vars: &EnvMap, process_env: Option<&EnvMap>) -> String {
    REFERENCE
        .replace_all(value, |caps: &Captures<'_>| {
            let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
                return "$".to_string();
            };
            vars.get(name.as_str())
                .or_else(|| process_env.and_then(|env| env.get(name.as_str())))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Expand references in every value of `vars`.
pub fn expand_all(vars: &EnvMap, process_env: Option<&EnvMap>) -> EnvMap {
    vars.iter()
        .map(|(key, value)| (key.clone(), expand_value(value, vars, process_env)))
        .collect()
}
