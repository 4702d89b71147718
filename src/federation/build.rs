//! Base bundler settings derived from the serving port and URL.

use serde::Serialize;
use std::collections::BTreeMap;

/// Browser target for federated builds (top-level await support).
pub const BUILD_TARGET: &str = "chrome89";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveConfig {
    pub alias: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub strict_port: bool,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildTarget {
    pub target: String,
}

/// Settings every federated project starts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    pub resolve: ResolveConfig,
    pub server: ServerConfig,
    pub preview: ServerConfig,
    pub base: String,
    pub build: BuildTarget,
}

impl BuildConfig {
    /// Base settings for a project serving at `url` on `port`.
    pub fn new(port: u16, url: &str) -> Self {
        let server = ServerConfig {
            strict_port: true,
            port,
        };

        Self {
            resolve: ResolveConfig {
                alias: BTreeMap::from([("src".to_string(), "/src".to_string())]),
            },
            server,
            preview: server,
            base: url.to_string(),
            build: BuildTarget {
                target: BUILD_TARGET.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_bundler_shape() {
        let json = serde_json::to_value(BuildConfig::new(3000, "localhost:3000")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "resolve": { "alias": { "src": "/src" } },
                "server": { "strictPort": true, "port": 3000 },
                "preview": { "strictPort": true, "port": 3000 },
                "base": "localhost:3000",
                "build": { "target": "chrome89" }
            })
        );
    }

    #[test]
    fn zero_port_is_carried_through() {
        let config = BuildConfig::new(0, "localhost:abc");
        assert_eq!(config.server.port, 0);
        assert_eq!(config.preview.port, 0);
    }
}
