//! Banner bootstrap configuration.
//!
//! # Example
//!
//! ```toml
//! debug = false
//!
//! [google_consent_mode]
//! enabled = true              # Push Google Consent Mode defaults
//! wait_for_update = 500       # Milliseconds tags wait for the banner
//! ads_data_redaction = true   # Redact ad click identifiers without consent
//! url_passthrough = false     # Pass click information through URLs
//!
//! [[google_consent_mode.defaults]]
//! ad_storage = "denied"
//! analytics_storage = "denied"
//! region = ["US", "CA"]
//!
//! [[google_consent_mode.defaults]]
//! ad_storage = "granted"
//! analytics_storage = "granted"
//! region = ["GB"]
//! ```
//!
//! Every key is optional; missing keys fall back to [`BannerConfig::default`].

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Google Consent Mode signal names understood by the banner.
pub mod signals {
    /// Advertising cookies
    pub const AD_STORAGE: &str = "ad_storage";
    /// Sending user data to advertising services
    pub const AD_USER_DATA: &str = "ad_user_data";
    /// Personalized advertising
    pub const AD_PERSONALIZATION: &str = "ad_personalization";
    /// Analytics cookies
    pub const ANALYTICS_STORAGE: &str = "analytics_storage";
    /// Storage that supports site functionality
    pub const FUNCTIONALITY_STORAGE: &str = "functionality_storage";
    /// Storage for personalization such as recommendations
    pub const PERSONALIZATION_STORAGE: &str = "personalization_storage";
    /// Storage for security such as fraud prevention
    pub const SECURITY_STORAGE: &str = "security_storage";
}

/// Environment variable overriding [`GoogleConsentMode::enabled`].
pub const ENV_GCM_ENABLED: &str = "CONSENT_STUDIO_GCM_ENABLED";
/// Environment variable overriding [`GoogleConsentMode::wait_for_update`].
pub const ENV_GCM_WAIT: &str = "CONSENT_STUDIO_GCM_WAIT";
/// Environment variable overriding [`GoogleConsentMode::ads_data_redaction`].
pub const ENV_GCM_ADS_REDACTION: &str = "CONSENT_STUDIO_GCM_ADS_REDACTION";
/// Environment variable overriding [`GoogleConsentMode::url_passthrough`].
pub const ENV_GCM_URL_PASSTHROUGH: &str = "CONSENT_STUDIO_GCM_URL_PASSTHROUGH";
/// Environment variable overriding [`BannerConfig::debug`].
pub const ENV_DEBUG: &str = "CONSENT_STUDIO_DEBUG";

/// State of a single Consent Mode signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentSignal {
    /// Storage allowed
    Granted,
    /// Storage refused
    Denied,
}

impl fmt::Display for ConsentSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsentSignal::Granted => write!(f, "granted"),
            ConsentSignal::Denied => write!(f, "denied"),
        }
    }
}

/// One Consent Mode default record, optionally scoped to regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentModeDefaults {
    /// Signal name to default state, in configuration order
    #[serde(flatten)]
    pub signals: IndexMap<String, ConsentSignal>,
    /// ISO 3166 country or subdivision codes this record applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<String>>,
}

impl ConsentModeDefaults {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default state of a signal.
    pub fn with(mut self, signal: impl Into<String>, state: ConsentSignal) -> Self {
        self.signals.insert(signal.into(), state);
        self
    }

    /// Scopes the record to the given regions.
    pub fn in_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.region = Some(regions.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the default state of `signal`, if configured.
    pub fn signal(&self, signal: &str) -> Option<ConsentSignal> {
        self.signals.get(signal).copied()
    }

    /// Denies advertising and analytics, grants functional, personalization
    /// and security storage.
    pub fn recommended() -> Self {
        use signals::*;

        Self::new()
            .with(AD_STORAGE, ConsentSignal::Denied)
            .with(AD_USER_DATA, ConsentSignal::Denied)
            .with(AD_PERSONALIZATION, ConsentSignal::Denied)
            .with(ANALYTICS_STORAGE, ConsentSignal::Denied)
            .with(FUNCTIONALITY_STORAGE, ConsentSignal::Granted)
            .with(PERSONALIZATION_STORAGE, ConsentSignal::Granted)
            .with(SECURITY_STORAGE, ConsentSignal::Granted)
    }
}

/// Consent Mode defaults: one record, or an ordered list of region-scoped ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsentDefaults {
    /// Records pushed in order; later regions refine earlier ones
    Regional(Vec<ConsentModeDefaults>),
    /// A single record for every visitor
    Single(ConsentModeDefaults),
}

impl ConsentDefaults {
    /// Returns the records in push order.
    pub fn records(&self) -> &[ConsentModeDefaults] {
        match self {
            ConsentDefaults::Regional(records) => records,
            ConsentDefaults::Single(record) => std::slice::from_ref(record),
        }
    }
}

impl Default for ConsentDefaults {
    fn default() -> Self {
        ConsentDefaults::Regional(vec![ConsentModeDefaults::recommended()])
    }
}

/// Google Consent Mode v2 settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConsentMode {
    /// Push Consent Mode defaults before the banner loads
    pub enabled: bool,
    /// Milliseconds Google tags wait for a consent update
    pub wait_for_update: u64,
    /// Redact ads data while ad storage is denied
    pub ads_data_redaction: bool,
    /// Pass click information through URL parameters
    pub url_passthrough: bool,
    /// Default signal states
    pub defaults: ConsentDefaults,
}

impl Default for GoogleConsentMode {
    fn default() -> Self {
        Self {
            enabled: true,
            wait_for_update: 500,
            ads_data_redaction: true,
            url_passthrough: false,
            defaults: ConsentDefaults::default(),
        }
    }
}

/// Configuration embedded into the banner bootstrap script.
///
/// # Examples
///
/// ```
/// use consent_studio::BannerConfig;
///
/// let config = BannerConfig::from_toml_str(
///     "debug = true\n[google_consent_mode]\nwait_for_update = 1000",
/// )
/// .expect("valid config");
///
/// assert!(config.debug);
/// assert_eq!(config.google_consent_mode.wait_for_update, 1000);
/// assert!(config.google_consent_mode.enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Google Consent Mode settings
    pub google_consent_mode: GoogleConsentMode,
    /// Enable the banner's debug output
    pub debug: bool,
}

impl BannerConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] if the text is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Toml`]
    /// if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|err| Error::Io(path.to_path_buf(), err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded banner config");
        Ok(config)
    }

    /// Applies `CONSENT_STUDIO_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Env`] if a variable is set to a value of the wrong shape.
    pub fn apply_env(&mut self) -> Result<(), Error> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies `CONSENT_STUDIO_*` overrides read through `lookup`.
    ///
    /// Unset variables leave the current value alone. Booleans accept
    /// `true`/`false`, `1`/`0`, `on`/`off` and `yes`/`no`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Env`] naming the first variable that failed to parse.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gcm = &mut self.google_consent_mode;

        if let Some(value) = lookup(ENV_GCM_ENABLED) {
            gcm.enabled = env_bool(ENV_GCM_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_GCM_WAIT) {
            gcm.wait_for_update = value.trim().parse().map_err(|_| {
                Error::env(ENV_GCM_WAIT, format!("expected milliseconds, got {value:?}"))
            })?;
        }
        if let Some(value) = lookup(ENV_GCM_ADS_REDACTION) {
            gcm.ads_data_redaction = env_bool(ENV_GCM_ADS_REDACTION, &value)?;
        }
        if let Some(value) = lookup(ENV_GCM_URL_PASSTHROUGH) {
            gcm.url_passthrough = env_bool(ENV_GCM_URL_PASSTHROUGH, &value)?;
        }
        if let Some(value) = lookup(ENV_DEBUG) {
            self.debug = env_bool(ENV_DEBUG, &value)?;
        }
        Ok(())
    }
}

fn env_bool(key: &str, value: &str) -> Result<bool, Error> {
    let value = value.trim();
    let is_any = |options: &[&str]| options.iter().any(|o| value.eq_ignore_ascii_case(o));

    if is_any(&["1", "true", "on", "yes"]) {
        Ok(true)
    } else if is_any(&["0", "false", "off", "no", ""]) {
        Ok(false)
    } else {
        Err(Error::env(key, format!("expected a boolean, got {value:?}")))
    }
}
