use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context};
use sitegrid_core::export::{ExportSettings, ExportTarget, DEFAULT_EXPORT_DIR};
use sitegrid_core::hazard::HazardRegistry;
use sitegrid_core::source::SourceLayout;

/// Default filename prefix shared by sources and artifacts.
pub const DEFAULT_PREFIX: &str = "Ians_W7";

/// Environment variable prefix for per-hazard source overrides.
pub const OVERRIDE_VAR_PREFIX: &str = "SOURCE_OVERRIDE_";

/// How an existing debug log file is treated at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFileMode {
    /// Keep earlier runs and append.
    #[default]
    Append,
    /// Start a fresh file.
    Truncate,
}

impl LogFileMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "append" => Some(Self::Append),
            "truncate" => Some(Self::Truncate),
            _ => None,
        }
    }
}

/// Exporter configuration loaded from environment variables.
///
/// | Env Var                  | Default   |
/// |--------------------------|-----------|
/// | `SOURCE_DIR`             | `.`       |
/// | `SOURCE_PREFIX`          | `Ians_W7` |
/// | `EXPORT_DIR`             | `export`  |
/// | `HAZARD_PROFILES`        | unset     |
/// | `SOURCE_OVERRIDE_<CODE>` | unset     |
/// | `LOG_FILE`               | unset     |
/// | `LOG_FILE_MODE`          | `append`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    pub source_dir: PathBuf,
    pub prefix: String,
    pub export_dir: PathBuf,
    /// JSON profile file replacing the built-in hazard table.
    pub profiles_path: Option<PathBuf>,
    /// `(code, path)` pairs, code as written in the variable name.
    pub source_overrides: Vec<(String, PathBuf)>,
    pub log_file: Option<PathBuf>,
    pub log_file_mode: LogFileMode,
}

impl ExporterConfig {
    /// Load from the process environment. Variables that are not valid
    /// Unicode are ignored.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Load from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let raw_prefix = vars.get("SOURCE_PREFIX").cloned();
        let vars: HashMap<String, String> = vars
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let source_dir = vars
            .get("SOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        // A set-but-blank prefix would name files `_SO2.csv`.
        let prefix = match raw_prefix.as_deref().map(str::trim) {
            Some("") => bail!("SOURCE_PREFIX is set but empty"),
            Some(p) => p.to_string(),
            None => DEFAULT_PREFIX.to_string(),
        };
        if prefix.contains(['/', '\\']) {
            bail!("SOURCE_PREFIX must not contain path separators, got {prefix:?}");
        }

        let export_dir = vars
            .get("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));

        let profiles_path = vars.get("HAZARD_PROFILES").map(PathBuf::from);

        let mut source_overrides: Vec<(String, PathBuf)> = vars
            .iter()
            .filter_map(|(key, value)| {
                let code = key.strip_prefix(OVERRIDE_VAR_PREFIX)?;
                Some((code.to_string(), PathBuf::from(value)))
            })
            .collect();
        if source_overrides.iter().any(|(code, _)| code.is_empty()) {
            bail!("{OVERRIDE_VAR_PREFIX} needs a hazard code suffix, e.g. {OVERRIDE_VAR_PREFIX}CO");
        }
        source_overrides.sort();

        let log_file = vars.get("LOG_FILE").map(PathBuf::from);

        let log_file_mode = match vars.get("LOG_FILE_MODE") {
            Some(raw) => LogFileMode::parse(raw)
                .with_context(|| format!("LOG_FILE_MODE must be append or truncate, got {raw:?}"))?,
            None => LogFileMode::default(),
        };

        Ok(Self {
            source_dir,
            prefix,
            export_dir,
            profiles_path,
            source_overrides,
            log_file,
            log_file_mode,
        })
    }

    /// Built-in profiles, or the profile file when one is configured.
    pub fn load_registry(&self) -> anyhow::Result<HazardRegistry> {
        match &self.profiles_path {
            Some(path) => HazardRegistry::load(path)
                .with_context(|| format!("loading hazard profiles from {}", path.display())),
            None => Ok(HazardRegistry::default()),
        }
    }

    /// Resolve source and artifact locations against `registry`.
    ///
    /// Override codes match registry codes case-insensitively, so
    /// `SOURCE_OVERRIDE_OBSTRUCT` selects the `Obstruct` hazard. An
    /// override naming no registered hazard is an error.
    pub fn export_settings(&self, registry: &HazardRegistry) -> anyhow::Result<ExportSettings> {
        let mut sources = SourceLayout::new(&self.source_dir, &self.prefix);
        for (code, path) in &self.source_overrides {
            let Some(profile) = registry
                .iter()
                .find(|p| p.code.eq_ignore_ascii_case(code))
            else {
                bail!(
                    "{OVERRIDE_VAR_PREFIX}{code} does not name a known hazard (known: {})",
                    registry.codes().join(", ")
                );
            };
            sources = sources.with_override(profile.code.clone(), path.clone());
        }

        Ok(ExportSettings {
            sources,
            target: ExportTarget::new(&self.export_dir, &self.prefix),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ExporterConfig::from_vars(vars(&[])).expect("config");
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert_eq!(config.prefix, "Ians_W7");
        assert_eq!(config.export_dir, PathBuf::from("export"));
        assert!(config.profiles_path.is_none());
        assert!(config.source_overrides.is_empty());
        assert!(config.log_file.is_none());
        assert_eq!(config.log_file_mode, LogFileMode::Append);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ExporterConfig::from_vars(vars(&[("EXPORT_DIR", "  "), ("LOG_FILE", "")]))
            .expect("config");
        assert_eq!(config.export_dir, PathBuf::from("export"));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn empty_prefix_is_rejected() {
        for blank in ["", "   "] {
            let err = ExporterConfig::from_vars(vars(&[("SOURCE_PREFIX", blank)]))
                .expect_err("blank prefix");
            assert!(err.to_string().contains("SOURCE_PREFIX"));
        }
    }

    #[test]
    fn log_file_mode_is_case_insensitive() {
        let config =
            ExporterConfig::from_vars(vars(&[("LOG_FILE_MODE", "Truncate")])).expect("config");
        assert_eq!(config.log_file_mode, LogFileMode::Truncate);
    }

    #[test]
    fn unknown_log_file_mode_is_rejected() {
        let err = ExporterConfig::from_vars(vars(&[("LOG_FILE_MODE", "rotate")]))
            .expect_err("invalid mode");
        assert!(err.to_string().contains("LOG_FILE_MODE"));
    }

    #[test]
    fn prefix_with_separator_is_rejected() {
        assert!(ExporterConfig::from_vars(vars(&[("SOURCE_PREFIX", "../W7")])).is_err());
    }

    #[test]
    fn overrides_resolve_case_insensitively() {
        let config = ExporterConfig::from_vars(vars(&[(
            "SOURCE_OVERRIDE_OBSTRUCT",
            "/tmp/obstruct_manual.csv",
        )]))
        .expect("config");
        let settings = config
            .export_settings(&HazardRegistry::default())
            .expect("settings");
        assert_eq!(
            settings.sources.path_for("Obstruct"),
            PathBuf::from("/tmp/obstruct_manual.csv")
        );
        assert!(!settings.sources.is_overridden("CO"));
    }

    #[test]
    fn override_for_unknown_hazard_is_rejected() {
        let config =
            ExporterConfig::from_vars(vars(&[("SOURCE_OVERRIDE_H2S", "/tmp/h2s.csv")]))
                .expect("config");
        let err = config
            .export_settings(&HazardRegistry::default())
            .expect_err("unknown hazard");
        assert!(err.to_string().contains("SOURCE_OVERRIDE_H2S"));
    }
}
