//! Rendering of the banner bootstrap `<script>` block.

use serde::Serialize;

use super::config::{BannerConfig, ConsentDefaults};
use crate::error::Error;

/// Origin the hosted banner is served from.
pub const BANNER_ORIGIN: &str = "https://consent.studio";

/// Pushes Consent Mode defaults (all granted while the site is being scanned)
/// and injects `banner.js` for the current hostname once per page.
const LOADER: &str = r#"/* Consent Studio - European CMP
 * Documentation: https://learn.consent.studio */
(function (g, loc) {
  var GRANTED = "granted", DENIED = "denied";
  if (g && g.enabled) {
    window.dataLayer = window.dataLayer || [];
    var gtag = function () { window.dataLayer.push(arguments); };
    var defaults = g.defaults || {
      ad_storage: DENIED, ad_user_data: DENIED, ad_personalization: DENIED,
      analytics_storage: DENIED, functionality_storage: GRANTED,
      personalization_storage: GRANTED, security_storage: GRANTED
    };
    var withWait = function (record) {
      return Object.assign({}, record, { wait_for_update: g.wait_for_update });
    };
    if (loc.hash.substr(1, 7) === "cs-scan") {
      gtag("consent", "default", withWait({
        ad_storage: GRANTED, ad_user_data: GRANTED, ad_personalization: GRANTED,
        analytics_storage: GRANTED, functionality_storage: GRANTED,
        personalization_storage: GRANTED, security_storage: GRANTED
      }));
    } else if (Array.isArray(defaults)) {
      for (var i = 0; i < defaults.length; i++) {
        gtag("consent", "default", withWait(defaults[i]));
      }
    } else {
      gtag("consent", "default", withWait(defaults));
    }
    if (g.ads_data_redaction) gtag("set", "ads_data_redaction", true);
    if (g.url_passthrough) gtag("set", "url_passthrough", true);
    gtag("set", "developer_id.dZTlmZj", true);
  }
  if (window.bakery._loaded) return;
  window.bakery._loaded = 1;
  var banner = document.createElement("script");
  banner.src = "__ORIGIN__/" + loc.hostname + "/banner.js";
  document.head.appendChild(banner);
})(window.bakery.googleConsentMode, location);"#;

/// The `window.bakery` object the hosted banner reads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Bootstrap<'a> {
    google_consent_mode: GoogleConsentModePayload<'a>,
    debug: bool,
}

#[derive(Debug, Serialize)]
struct GoogleConsentModePayload<'a> {
    enabled: bool,
    wait_for_update: u64,
    ads_data_redaction: bool,
    url_passthrough: bool,
    defaults: &'a ConsentDefaults,
}

impl<'a> From<&'a BannerConfig> for Bootstrap<'a> {
    fn from(config: &'a BannerConfig) -> Self {
        let gcm = &config.google_consent_mode;
        Self {
            google_consent_mode: GoogleConsentModePayload {
                enabled: gcm.enabled,
                wait_for_update: gcm.wait_for_update,
                ads_data_redaction: gcm.ads_data_redaction,
                url_passthrough: gcm.url_passthrough,
                defaults: &gcm.defaults,
            },
            debug: config.debug,
        }
    }
}

/// Serializes the bootstrap payload as JSON safe to embed in a `<script>`.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn bootstrap_json(config: &BannerConfig) -> Result<String, Error> {
    let json = serde_json::to_string(&Bootstrap::from(config))?;
    Ok(escape_script_json(&json))
}

/// Renders the complete bootstrap `<script>` block.
///
/// The block sets `window.bakery` (unless the page already did) and then
/// loads the hosted banner.
///
/// # Errors
///
/// Returns [`Error::Json`] if the payload cannot be serialized.
///
/// # Examples
///
/// ```
/// use consent_studio::{render_script, BannerConfig};
///
/// let html = render_script(&BannerConfig::default()).expect("serializable");
/// assert!(html.starts_with("<script type=\"text/javascript\">"));
/// assert!(html.contains("\"wait_for_update\":500"));
/// assert!(html.contains("https://consent.studio/"));
/// ```
pub fn render_script(config: &BannerConfig) -> Result<String, Error> {
    let payload = bootstrap_json(config)?;
    let loader = LOADER.replace("__ORIGIN__", BANNER_ORIGIN);

    tracing::debug!(
        gcm_enabled = config.google_consent_mode.enabled,
        debug = config.debug,
        "rendered banner bootstrap"
    );

    Ok(format!(
        "<script type=\"text/javascript\">\nwindow.bakery = window.bakery || {payload};\n{loader}\n</script>"
    ))
}

/// Keeps JSON from closing the surrounding `<script>` element early.
fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
