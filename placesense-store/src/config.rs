//! Loading [`SessionConfig`] from disk.

use camino::Utf8Path;
use placesense_session::SessionConfig;

use crate::{ConfigError, fs};

/// Read and validate a JSON session configuration.
///
/// Omitted fields take their defaults, so `{}` is a valid file.
///
/// # Errors
/// Returns [`ConfigError`] when the file cannot be read, is not valid JSON
/// or holds rejected settings.
pub fn load_config(path: &Utf8Path) -> Result<SessionConfig, ConfigError> {
    let text = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    let config: SessionConfig =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use placesense_session::SessionConfigError;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn write(dir: &TempDir, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("placesense.json"))
            .expect("utf-8 temp dir");
        std::fs::write(&path, text).expect("write config");
        path
    }

    #[rstest]
    fn empty_object_yields_defaults(dir: TempDir) {
        let path = write(&dir, "{}");
        assert_eq!(load_config(&path).expect("load"), SessionConfig::default());
    }

    #[rstest]
    fn overrides_are_applied(dir: TempDir) {
        let path = write(
            &dir,
            r#"{"nearby_keyword": "guest house", "comparison": {"tier_capacity": 3}}"#,
        );
        let config = load_config(&path).expect("load");
        assert_eq!(config.nearby_keyword, "guest house");
        assert_eq!(config.comparison.tier_capacity, 3);
        assert_eq!(config.nearby_radius_m, 10_000);
    }

    #[rstest]
    fn invalid_settings_are_rejected(dir: TempDir) {
        let path = write(&dir, r#"{"nearby_radius_m": 0}"#);
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Invalid {
                source: SessionConfigError::ZeroRadius,
                ..
            })
        ));
    }

    #[rstest]
    fn malformed_json_is_reported(dir: TempDir) {
        let path = write(&dir, "{not json");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[rstest]
    fn missing_file_is_reported(dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
            .expect("utf-8 temp dir");
        assert!(matches!(load_config(&path), Err(ConfigError::Io { .. })));
    }
}
