//! Configuration loading and discovery.
//!
//! Sources are merged with figment, lowest precedence first:
//! 1. Defaults
//! 2. User config from the XDG config directory
//! 3. Project config, found by walking up from the working directory
//! 4. Explicit files (`--config`)
//! 5. `GRADEWISE_*` environment variables (`__` separates nested keys)
//!
//! # Supported formats
//!
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! Project discovery stops at the first directory holding any
//! `.gradewise.<ext>` or `gradewise.<ext>`. Every match in that directory is
//! merged, dotfiles first, then by extension: toml, yaml, yml, json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use gradewise_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let settings = config.analysis_settings();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::words::HardSyllables;

/// Reading-level goal a writer is aiming for.
///
/// Serialized as the bare integer (`6`, `8` or `10`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TargetGrade {
    /// Grade 6.
    #[cfg_attr(feature = "clap", value(name = "6"))]
    Six,
    /// Grade 8.
    #[default]
    #[cfg_attr(feature = "clap", value(name = "8"))]
    Eight,
    /// Grade 10.
    #[cfg_attr(feature = "clap", value(name = "10"))]
    Ten,
}

impl TargetGrade {
    /// All grades, lowest first.
    pub const ALL: [Self; 3] = [Self::Six, Self::Eight, Self::Ten];

    /// The grade as an integer.
    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Eight => 8,
            Self::Ten => 10,
        }
    }

    /// The grade as a score, for comparison with Flesch–Kincaid grades.
    pub fn value(&self) -> f64 {
        f64::from(self.as_u8())
    }
}

impl TryFrom<u8> for TargetGrade {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            10 => Ok(Self::Ten),
            other => Err(format!("target grade must be 6, 8 or 10, got {other}")),
        }
    }
}

impl From<TargetGrade> for u8 {
    fn from(grade: TargetGrade) -> Self {
        grade.as_u8()
    }
}

impl std::fmt::Display for TargetGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl JsonSchema for TargetGrade {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "TargetGrade".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "enum": [6, 8, 10],
            "description": "Target reading grade level"
        })
    }
}

/// Everything an annotation rebuild reads from configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSettings {
    /// Reading-level goal.
    pub target_grade: TargetGrade,
    /// Whether hard words are flagged.
    pub show_hard_words: bool,
    /// Sentence classification thresholds.
    pub classifier: ClassifierConfig,
    /// Per-grade hard-word syllable thresholds.
    pub hard_syllables: HardSyllables,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            target_grade: TargetGrade::default(),
            show_hard_words: true,
            classifier: ClassifierConfig::default(),
            hard_syllables: HardSyllables::default(),
        }
    }
}

impl AnalysisSettings {
    /// Syllable threshold for the current target grade.
    pub const fn hard_word_threshold(&self) -> usize {
        self.hard_syllables.for_grade(self.target_grade)
    }
}

/// The configuration for gradewise.
///
/// Deserialized from config files found during discovery (TOML, YAML, or JSON).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File log level.
    pub log_level: LogLevel,
    /// Directory for the JSON-lines log file.
    pub log_dir: Option<Utf8PathBuf>,
    /// Reading-level goal (6, 8 or 10).
    pub target_grade: TargetGrade,
    /// Flag individual hard words as well as sentences.
    pub show_hard_words: bool,
    /// JSON array of easy words that replaces the built-in seed list.
    pub easy_words_path: Option<Utf8PathBuf>,
    /// Quiet period before aggregate statistics are recomputed while watching.
    pub stats_debounce_ms: u64,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the limit
    /// entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    pub disable_input_limit: bool,
    /// Default maximum Flesch-Kincaid grade for the `score` command.
    pub max_grade: Option<f64>,
    /// Sentence classification thresholds.
    pub classifier: ClassifierConfig,
    /// Hard-word syllable thresholds per target grade.
    pub hard_syllables: HardSyllables,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            target_grade: TargetGrade::default(),
            show_hard_words: true,
            easy_words_path: None,
            stats_debounce_ms: 250,
            max_input_bytes: None,
            disable_input_limit: false,
            max_grade: None,
            classifier: ClassifierConfig::default(),
            hard_syllables: HardSyllables::default(),
        }
    }
}

impl Config {
    /// Snapshot of the settings an annotation rebuild needs.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            target_grade: self.target_grade,
            show_hard_words: self.show_hard_words,
            classifier: self.classifier.clone(),
            hard_syllables: self.hard_syllables.clone(),
        }
    }

    /// Effective input limit, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Minimum level written to the log file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug.
    Debug,
    /// Info.
    #[default]
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

impl LogLevel {
    /// Lowercase name, as accepted by `EnvFilter`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Files that contributed to a loaded [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project files, lowest precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Per-user config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files given with `--config`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file whose values win: last explicit, else closest project, else user.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Config file stem and XDG directory name.
const APP_NAME: &str = "gradewise";

/// Collects config sources, then merges them with [`ConfigLoader::load`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// User config on, `.git` as the boundary, nothing else.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Toggle the per-user config file (see [`user_config_dir`]).
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Merge `path` above every discovered file. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge defaults, user, project, explicit files and environment, in
    /// that order, and report which files took part.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Deserialize`] when a file fails to parse or a value is
    /// out of range (for example `target_grade = 7`).
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(root) = &self.project_search_root {
            sources.project_files = self.find_project_configs(root);
        }
        for file in sources.project_files.iter().chain(&self.explicit_files) {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // GRADEWISE_TARGET_GRADE=6, GRADEWISE_CLASSIFIER__MIN_WORDS=10, ...
        figment = figment.merge(Env::prefixed("GRADEWISE_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            target_grade = config.target_grade.as_u8(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Config files in the closest directory (walking up from `start`) that
    /// has any, lowest precedence first.
    ///
    /// The walk stops at the boundary marker, but a config sitting next to the
    /// marker is still found.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found = project_candidates(dir)
                .filter(|path| path.is_file())
                .collect::<Vec<_>>();
            if !found.is_empty() {
                return found;
            }
            let at_boundary = self
                .boundary_marker
                .as_ref()
                .is_some_and(|marker| dir != start && dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }

    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Unknown extensions are read as TOML.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("toml") => figment.merge(Toml::file_exact(path.as_str())),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// `.gradewise.<ext>` then `gradewise.<ext>`; figment merges last-wins.
fn project_candidates(dir: &Utf8Path) -> impl Iterator<Item = Utf8PathBuf> + '_ {
    let dotfiles = CONFIG_EXTENSIONS
        .iter()
        .map(move |ext| dir.join(format!(".{APP_NAME}.{ext}")));
    let regular = CONFIG_EXTENSIONS
        .iter()
        .map(move |ext| dir.join(format!("{APP_NAME}.{ext}")));
    dotfiles.chain(regular)
}

/// Per-user config directory: `~/.config/gradewise/` on Linux,
/// `~/Library/Application Support/gradewise/` on macOS.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Held by every test that touches `GRADEWISE_*` variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    fn write_in(dir: &Utf8Path, name: &str, contents: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Loader with no user config and no boundary, so only test files count.
    fn isolated() -> ConfigLoader {
        ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
    }

    fn load_file(name: &str, contents: &str) -> Config {
        let tmp = TempDir::new().unwrap();
        let path = write_in(&utf8_dir(&tmp), name, contents);
        isolated().with_file(&path).load().unwrap().0
    }

    #[test]
    fn defaults() {
        let _env = env_lock();
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.target_grade, TargetGrade::Eight);
        assert!(config.show_hard_words);
        assert_eq!(config.stats_debounce_ms, 250);
        assert!(config.easy_words_path.is_none());

        let (loaded, sources) = isolated().load().unwrap();
        assert_eq!(loaded, config);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn toml_file_sets_analysis_keys() {
        let config = load_file(
            "config.toml",
            "log_dir = \"/tmp/gradewise\"\ntarget_grade = 6\nshow_hard_words = false\n",
        );
        assert_eq!(config.log_dir.as_deref().map(Utf8Path::as_str), Some("/tmp/gradewise"));
        assert_eq!(config.target_grade, TargetGrade::Six);
        assert!(!config.show_hard_words);
    }

    #[test]
    fn later_explicit_file_wins_key_by_key() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        let base = write_in(&dir, "base.toml", "target_grade = 6\nstats_debounce_ms = 100\n");
        let top = write_in(&dir, "top.json", r#"{"target_grade": 10}"#);

        let (config, sources) = isolated().with_file(&base).with_file(&top).load().unwrap();
        assert_eq!(config.target_grade, TargetGrade::Ten);
        assert_eq!(config.stats_debounce_ms, 100);
        assert_eq!(sources.primary_file(), Some(top.as_path()));
    }

    #[test]
    fn unsupported_target_grade_fails_to_load() {
        let tmp = TempDir::new().unwrap();
        let path = write_in(&utf8_dir(&tmp), "config.toml", "target_grade = 7\n");
        let result = isolated().with_file(&path).load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn target_grade_conversions() {
        for grade in TargetGrade::ALL {
            assert_eq!(TargetGrade::try_from(grade.as_u8()), Ok(grade));
            assert_eq!(grade.to_string(), grade.as_u8().to_string());
        }
        assert!(TargetGrade::try_from(12).is_err());
        assert!((TargetGrade::Ten.value() - 10.0).abs() < f64::EPSILON);
        assert_eq!(serde_json::to_string(&TargetGrade::Six).unwrap(), "6");
    }

    #[test]
    fn classifier_table_merges_with_defaults() {
        let config = load_file(
            "config.yaml",
            "classifier:\n  min_words: 10\n  blue_enabled: false\nhard_syllables:\n  grade_6: 4\n",
        );
        assert_eq!(config.classifier.min_words, 10);
        assert!(!config.classifier.blue_enabled);
        assert_eq!(config.classifier.long_words, 20);
        assert_eq!(config.hard_syllables.grade_6, 4);
        assert_eq!(config.hard_syllables.grade_8, 4);
    }

    #[test]
    fn analysis_settings_snapshot() {
        let settings = load_file("config.json", r#"{"target_grade": 10}"#).analysis_settings();
        assert_eq!(settings.target_grade, TargetGrade::Ten);
        assert!(settings.show_hard_words);
        assert_eq!(settings.hard_word_threshold(), 5);
    }

    #[test]
    fn yaml_round_trips_paths() {
        let yaml = "target_grade: 8\neasy_words_path: data/easy.json\nstats_debounce_ms: 100\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.easy_words_path.as_deref().map(Utf8Path::as_str),
            Some("data/easy.json")
        );
        assert_eq!(config.stats_debounce_ms, 100);
    }

    #[test]
    fn project_config_found_from_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write_in(&root, "project/.gradewise.toml", "target_grade = 10\n");
        let deep = root.join("project/src/deep");
        fs::create_dir_all(&deep).unwrap();

        let (config, sources) = isolated().with_project_search(&deep).load().unwrap();
        assert_eq!(config.target_grade, TargetGrade::Ten);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write_in(&root, "outer/.gradewise.toml", "target_grade = 6\n");
        fs::create_dir_all(root.join("outer/repo/.git")).unwrap();
        let work = root.join("outer/repo/work");
        fs::create_dir_all(&work).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&work)
            .load()
            .unwrap();
        assert_eq!(config.target_grade, TargetGrade::Eight);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn closest_directory_only_and_regular_name_last() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write_in(&root, ".gradewise.toml", "stats_debounce_ms = 10\n");
        write_in(&root, "child/.gradewise.toml", "target_grade = 6\n");
        write_in(&root, "child/gradewise.yaml", "target_grade: 10\n");

        let (config, sources) = isolated()
            .with_project_search(root.join("child"))
            .load()
            .unwrap();
        assert_eq!(config.target_grade, TargetGrade::Ten);
        assert_eq!(config.stats_debounce_ms, 250);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.project_files[1].as_str().ends_with("gradewise.yaml"));
    }

    #[test]
    fn input_limit_resolution() {
        assert_eq!(
            Config::default().input_limit(),
            Some(crate::DEFAULT_MAX_INPUT_BYTES)
        );
        assert_eq!(
            load_file("config.toml", "max_input_bytes = 1024\n").input_limit(),
            Some(1024)
        );
        let disabled = load_file(
            "config.toml",
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
        );
        assert_eq!(disabled.max_input_bytes, Some(1024));
        assert_eq!(disabled.input_limit(), None);
    }

    #[test]
    fn user_config_dir_is_named_for_the_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains(APP_NAME));
        }
    }

    /// Set `key` for the duration of `f`.
    #[allow(unsafe_code)]
    fn with_env<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
        let _lock = env_lock();
        // SAFETY: every env-mutating test holds ENV_LOCK.
        unsafe { std::env::set_var(key, value) };
        let out = f();
        // SAFETY: as above.
        unsafe { std::env::remove_var(key) };
        out
    }

    #[test]
    fn env_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_in(&utf8_dir(&tmp), "config.toml", "stats_debounce_ms = 100\n");
        let config = with_env("GRADEWISE_STATS_DEBOUNCE_MS", "400", || {
            isolated().with_file(&path).load().unwrap().0
        });
        assert_eq!(config.stats_debounce_ms, 400);
    }

    #[test]
    fn env_sets_nested_classifier_key() {
        let config = with_env("GRADEWISE_CLASSIFIER__VERY_LONG_WORDS", "30", || {
            isolated().load().unwrap().0
        });
        assert_eq!(config.classifier.very_long_words, 30);
        assert_eq!(config.classifier.long_words, 20);
    }
}
