//! Bootstrap for the hosted consent banner.
//!
//! The banner itself is an external script. This module only owns the
//! configuration it is started with ([`BannerConfig`]) and the `<script>`
//! block that hands that configuration over ([`render_script`]).

mod config;
mod script;

pub use config::{
    signals, BannerConfig, ConsentDefaults, ConsentModeDefaults, ConsentSignal,
    GoogleConsentMode, ENV_DEBUG, ENV_GCM_ADS_REDACTION, ENV_GCM_ENABLED,
    ENV_GCM_URL_PASSTHROUGH, ENV_GCM_WAIT,
};
pub use script::{bootstrap_json, render_script, BANNER_ORIGIN};
