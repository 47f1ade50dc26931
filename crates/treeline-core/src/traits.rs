//! Core traits for Treeline configuration.
//!
//! The primary trait is [`ConfigProvider`], which abstracts the settings
//! that the store and CLI crates need without tying them to one config
//! struct.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// The store crate resolves seed fixtures through this trait, so any
/// configuration source (TOML file, test double, embedded defaults) can
/// drive a seed run.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use treeline_core::traits::ConfigProvider;
/// use treeline_core::Result;
///
/// #[derive(Clone)]
/// struct OrgChartConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for OrgChartConfig {
///     fn project_name(&self) -> &str {
///         "org-chart"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
///
///     fn fixture_path(&self) -> Result<Option<PathBuf>> {
///         Ok(Some(self.data_dir.join("org.toml")))
///     }
/// }
///
/// let config = OrgChartConfig { data_dir: PathBuf::from("/srv/org") };
/// assert_eq!(
///     config.fixture_path().unwrap(),
///     Some(PathBuf::from("/srv/org/org.toml"))
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// Relative paths elsewhere in the configuration are resolved
    /// against this directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path of the seed fixture to load, if one is configured.
    ///
    /// `None` means the built-in dataset should be used.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured relative path cannot be resolved.
    fn fixture_path(&self) -> Result<Option<PathBuf>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        name: String,
        base: PathBuf,
        fixture: Option<String>,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            &self.name
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn fixture_path(&self) -> Result<Option<PathBuf>> {
            Ok(self.fixture.as_ref().map(|f| self.base.join(f)))
        }
    }

    #[test]
    fn test_config_provider_project_name() {
        let config = TestConfig {
            name: "test-project".into(),
            base: PathBuf::from("/tmp/test"),
            fixture: None,
        };
        assert_eq!(config.project_name(), "test-project");
    }

    #[test]
    fn test_config_provider_fixture_path_resolves_against_base() {
        let config = TestConfig {
            name: "test".into(),
            base: PathBuf::from("/data"),
            fixture: Some("seed.toml".into()),
        };
        assert_eq!(
            config.fixture_path().unwrap(),
            Some(PathBuf::from("/data/seed.toml"))
        );
    }

    #[test]
    fn test_config_provider_fixture_path_none() {
        let config = TestConfig {
            name: "test".into(),
            base: PathBuf::from("/data"),
            fixture: None,
        };
        assert!(config.fixture_path().unwrap().is_none());
    }

    #[test]
    fn test_config_provider_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestConfig>();
    }
}
