/// French-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libancien_core::Config` (flattened via serde)
/// - Whether unknown words fall back to candidate rewrites
/// - Apostrophe handling for sentence tokenizing
///
/// # Example
///
/// ```rust
/// use libfrench::FrenchConfig;
///
/// let config = FrenchConfig::default();
/// assert!(!config.base().affinity.is_empty());
/// let base_config = config.into_base();
/// assert_eq!(base_config.match_award, 4);
/// ```
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrenchConfig {
    /// Base configuration fields (scores, mode, affinity, cache)
    #[serde(flatten)]
    pub base: libancien_core::Config,

    /// Try candidate rewrites for words missing from every dictionary
    pub use_candidate_rules: bool,

    /// Map `'` to `’` when splitting sentences into tokens
    pub unify_apostrophes: bool,
}

impl Default for FrenchConfig {
    fn default() -> Self {
        let mut base = libancien_core::Config::default();
        base.affinity = french_affinity_rules();

        Self {
            base,
            use_candidate_rules: true,
            unify_apostrophes: true,
        }
    }
}

impl FrenchConfig {
    /// Convert this French config into the base config for the core engine
    pub fn into_base(self) -> libancien_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libancien_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libancien_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load configuration from TOML string.
    ///
    /// An absent or empty `affinity` list means the French defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        if config.base.affinity.is_empty() {
            config.base.affinity = french_affinity_rules();
        }
        Ok(config)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Returns the default affinity rules for aligning old and modern French.
///
/// These rules make orthographic neighbours cheap to align:
/// - Accented and plain vowels: e=é, e=ê, a=â, ...
/// - Ramist letters and their historical doubles: u=v, i=j, y=i
/// - Long s and ligatures: ſ=s, æ=e, œ=e
/// - Cedilla: c=ç
pub fn french_affinity_rules() -> Vec<String> {
    vec![
        // Accents
        "e=é:2".into(), "e=è:2".into(), "e=ê:2".into(), "e=ë:2".into(),
        "a=à:2".into(), "a=â:2".into(),
        "i=î:2".into(), "i=ï:2".into(),
        "o=ô:2".into(),
        "u=ù:2".into(), "u=û:2".into(), "u=ü:2".into(),

        // Ramist letters
        "u=v:3".into(), "i=j:3".into(),
        "y=i:3".into(), "y=ï:2".into(),

        // Long s, ligatures, cedilla
        "ſ=s:3".into(),
        "æ=e:1".into(), "œ=e:1".into(),
        "c=ç:3".into(),
    ]
}
