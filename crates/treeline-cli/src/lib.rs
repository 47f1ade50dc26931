//! Command-line interface for Treeline.
//!
//! # Modules
//!
//! - [`cli`]: clap argument types
//! - [`config`]: [`TreelineConfig`] and its loader
//! - [`config_handlers`]: `treeline config ...` subcommands
//! - [`render`]: terminal tree rendering
//! - [`app`]: [`TreelineCli`], which wires it all together

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod render;

pub use app::TreelineCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::{ServerConfig, SeedConfig, StoreBackend, StoreConfig, TreelineConfig};

#[cfg(test)]
#[allow(unsafe_code, clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serialize tests that read or write process environment variables.
    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Restores an environment variable on drop. Hold [`env_lock`] while alive.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn set(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: callers hold ENV_LOCK, so no other test touches the environment.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: as above.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: as above.
            match &self.prev {
                Some(val) => unsafe { std::env::set_var(&self.key, val) },
                None => unsafe { std::env::remove_var(&self.key) },
            }
        }
    }
}
