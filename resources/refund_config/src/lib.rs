//! Persisted plugin configuration.
//!
//! The config file is JSON with the field names `"Version"` and
//! `"Refund Percentage"` — a pinned wire format that predates this
//! implementation, so renames here must never change.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::{
        fmt, fs,
        path::{Path, PathBuf},
        str::FromStr,
    },
    thiserror::Error,
};


/// Version stamped into freshly written config files. Deliberately a
/// constant rather than `CARGO_PKG_VERSION`: a workspace version bump must
/// not silently trigger a config migration.
pub const CURRENT_VERSION: ConfigVersion = ConfigVersion::new(1, 0, 0);

/// Configs older than this are replaced wholesale during migration.
const BASELINE_VERSION: ConfigVersion = ConfigVersion::new(1, 0, 0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("malformed version string '{0}'")]
    Version(String),
}

/// Ordered semantic version triple. Comparison is numeric per segment,
/// not lexicographic on the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl ConfigVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ConfigVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('.');
        let mut next = || {
            segments
                .next()
                .and_then(|seg| seg.parse::<u16>().ok())
                .ok_or_else(|| ConfigError::Version(s.to_string()))
        };
        let version = Self::new(next()?, next()?, next()?);
        if segments.next().is_some() {
            return Err(ConfigError::Version(s.to_string()));
        }
        Ok(version)
    }
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefundConfig {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Refund Percentage")]
    pub refund_percentage: u32,
}

impl Default for RefundConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            refund_percentage: 100,
        }
    }
}

impl RefundConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Brings a loaded config up to [`CURRENT_VERSION`]. Configs older
    /// than the baseline (or with an unreadable version) are replaced by
    /// defaults before the version is stamped. Returns whether anything
    /// changed; migrating an already-current config is a no-op.
    pub fn migrate(&mut self) -> bool {
        let stored = ConfigVersion::from_str(&self.version).ok();
        if stored.is_some_and(|version| version >= CURRENT_VERSION) {
            return false;
        }

        info!(
            "config version '{}' is older than {}, updating",
            self.version, CURRENT_VERSION
        );

        if stored.is_none_or(|version| version < BASELINE_VERSION) {
            *self = Self::default();
        }
        self.version = CURRENT_VERSION.to_string();
        true
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Startup entry point: load, fall back to defaults on any error,
    /// migrate, and persist the result. Errors are logged, never surfaced
    /// to players.
    pub fn load_or_default(path: &Path) -> Self {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(error) => {
                warn!(
                    "could not load config from '{}' ({}), using defaults",
                    path.display(),
                    error
                );
                Self::default()
            }
        };

        if config.migrate() {
            info!("config updated to version {}", config.version);
        }

        if let Err(error) = config.save(path) {
            warn!(
                "could not persist config to '{}': {}",
                path.display(),
                error
            );
        }

        config
    }
}

/// Location of the persisted config file, owned by the hosting harness.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub PathBuf);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(PathBuf::from("config/build_refund.json"))
    }
}

pub struct RefundConfigPlugin;

impl Plugin for RefundConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigPath>()
            .add_systems(Startup, load_config);
    }
}

fn load_config(mut commands: Commands, path: Res<ConfigPath>) {
    let config = RefundConfig::load_or_default(&path.0);
    debug!(
        "config loaded: version {}, refund percentage {}",
        config.version, config.refund_percentage
    );
    commands.insert_resource(config);
}
