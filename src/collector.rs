//! Details about the mdn-bcd-collector project used as evidence in PRs.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

const COLLECTOR_HOME: &str = "https://mdn-bcd-collector.gooborg.com";
const COLLECTOR_TESTS_URL: &str = "https://mdn-bcd-collector.gooborg.com/tests/";

#[derive(Debug, Deserialize)]
struct PackageJson {
    version: Option<String>,
}

/// Collector version, read from the local collector checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorInfo {
    pub version: Option<String>,
}

impl CollectorInfo {
    /// Read `<collector_path>/package.json`.
    ///
    /// A missing or unreadable file is not fatal: the version is left out of
    /// the rendered text and a warning is logged.
    pub fn load(collector_path: &Path) -> Self {
        let path = collector_path.join("package.json");
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), err = %e, "collector checkout not readable; omitting version");
                return Self::default();
            }
        };
        match serde_json::from_str::<PackageJson>(&contents) {
            Ok(pkg) => Self {
                version: pkg.version.filter(|v| !v.is_empty()),
            },
            Err(e) => {
                warn!(path = %path.display(), err = %e, "invalid collector package.json; omitting version");
                Self::default()
            }
        }
    }

    /// Markdown phrase naming the collector project, with its version when known.
    pub fn phrase(&self) -> String {
        match &self.version {
            Some(v) => format!("[mdn-bcd-collector]({COLLECTOR_HOME}) project (v{v})"),
            None => format!("[mdn-bcd-collector]({COLLECTOR_HOME}) project"),
        }
    }
}

/// URL of the collector tests covering `feature`.
pub fn test_url(feature: &str) -> String {
    let slug = feature.replace('.', "/");
    format!(
        "{COLLECTOR_TESTS_URL}{}",
        slug.replace("/worker_support", "?exposure=Worker")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_turns_dots_into_slashes() {
        assert_eq!(
            test_url("api.AbortController.abort"),
            "https://mdn-bcd-collector.gooborg.com/tests/api/AbortController/abort"
        );
    }

    #[test]
    fn test_url_maps_worker_support_to_exposure_query() {
        assert_eq!(
            test_url("api.Blob.worker_support"),
            "https://mdn-bcd-collector.gooborg.com/tests/api/Blob?exposure=Worker"
        );
    }

    #[test]
    fn load_reads_version_from_package_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "mdn-bcd-collector", "version": "10.2.3"}"#,
        )
        .unwrap();

        let info = CollectorInfo::load(dir.path());
        assert_eq!(info.version.as_deref(), Some("10.2.3"));
        assert_eq!(
            info.phrase(),
            "[mdn-bcd-collector](https://mdn-bcd-collector.gooborg.com) project (v10.2.3)"
        );
    }

    #[test]
    fn load_without_checkout_omits_version() {
        let dir = tempfile::tempdir().unwrap();
        let info = CollectorInfo::load(&dir.path().join("missing"));
        assert_eq!(info, CollectorInfo::default());
        assert!(!info.phrase().contains("(v"));
    }

    #[test]
    fn load_with_invalid_json_omits_version() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        assert_eq!(CollectorInfo::load(dir.path()).version, None);
    }
}
