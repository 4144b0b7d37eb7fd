//! Query-parameter style injector: turns an untrusted `?css=...` value into a
//! single scoped stylesheet rule.
//!
//! The value is filtered through [`css_sanitizer::sanitize`] against a
//! configured allow-list and wrapped in a rule for a fixed target selector.
//! Mounting the produced rule into a document (and any retry or
//! mutation-observation around that) is the embedder's business; this crate
//! stops at the rule text.
//!
//! Everything here is best-effort: a missing parameter, an unparseable URL,
//! or input with nothing permitted in it produces `None` and a log line,
//! never an error.

#![forbid(unsafe_code)]

use css_sanitizer::{AllowList, sanitize};
use log::{debug, warn};
use once_cell::sync::Lazy;
use url::Url;

/// Selector the assembled rule applies to, unless reconfigured.
pub const DEFAULT_TARGET: &str = "#page-content div.rate";

/// Query parameter carrying the declaration list, unless reconfigured.
pub const DEFAULT_PARAM: &str = "css";

/// Property names permitted by default, fine-grained longhands included.
pub const DEFAULT_ALLOWED_PROPERTIES: &[&str] = &[
    // Box model
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "border",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-width",
    "border-style",
    "border-color",
    "border-radius",
    "box-sizing",
    "box-shadow",
    // Layout
    "display",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "float",
    "width",
    "height",
    "max-width",
    "max-height",
    "min-width",
    "min-height",
    "overflow",
    "overflow-x",
    "overflow-y",
    // Typography
    "color",
    "font",
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "text-align",
    "text-decoration",
    "line-height",
    "letter-spacing",
    "white-space",
    // Background
    "background",
    "background-color",
    "background-image",
    "background-position",
    "background-repeat",
    "background-size",
    "background-clip",
    "background-origin",
    "background-attachment",
    // Visual effects
    "opacity",
    "visibility",
    "z-index",
    "cursor",
    "transition",
    "transform",
    "transform-origin",
    "animation",
    // Misc
    "clip",
    "clear",
    "content",
    "counter-reset",
    "counter-increment",
];

static DEFAULT_ALLOW: Lazy<AllowList> =
    Lazy::new(|| AllowList::new(DEFAULT_ALLOWED_PROPERTIES.iter().copied()));

/// The default allow-list, built once and shared.
pub fn default_allow_list() -> &'static AllowList {
    &DEFAULT_ALLOW
}

/// Injector configuration: where the declarations come from, what they may
/// contain, and what the produced rule targets.
///
/// A configuration is an explicit value handed to each call; there is no
/// ambient mutable state to reconfigure behind a caller's back.
#[derive(Clone, Debug)]
pub struct InjectorConfig {
    /// Selector the assembled rule applies to.
    pub target: String,
    /// Name of the query parameter carrying the declaration list.
    pub param: String,
    /// Property names allowed through the sanitizer.
    pub allowed: AllowList,
    /// Append ` !important` to every retained declaration.
    pub important: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_owned(),
            param: DEFAULT_PARAM.to_owned(),
            allowed: DEFAULT_ALLOW.clone(),
            important: false,
        }
    }
}

impl InjectorConfig {
    /// Assemble the scoped rule for a raw declaration-list value.
    ///
    /// The value is sanitized against the configured allow-list; if nothing
    /// survives, there is no rule to build and `None` comes back. Otherwise
    /// the retained declarations (each suffixed with ` !important` when the
    /// flag is set) are wrapped as `target { ... }`.
    pub fn rule_for_value(&self, raw: &str) -> Option<String> {
        let body = sanitize(raw, &self.allowed);
        if body.is_empty() {
            warn!("no permitted declarations in {raw:?}");
            return None;
        }
        let body = self.decorate(&body);
        debug!("assembled rule body {body:?} for target {:?}", self.target);
        Some(format!("{} {{ {body} }}", self.target))
    }

    /// Extract the configured parameter from `url` and assemble its rule.
    ///
    /// The URL may be a document location or a script's own `src`; wherever
    /// it comes from, only its query string matters here.
    pub fn rule_for_url(&self, url: &str) -> Option<String> {
        let Some(value) = query_param(url, &self.param) else {
            debug!("no {:?} parameter found on {url:?}", self.param);
            return None;
        };
        self.rule_for_value(&value)
    }

    /// Apply the `!important` post-processing step to a sanitized body.
    fn decorate(&self, body: &str) -> String {
        if !self.important {
            return body.to_owned();
        }
        body.split(';')
            .map(str::trim)
            .filter(|declaration| !declaration.is_empty())
            .map(|declaration| format!("{declaration} !important"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// First value of the named query parameter, percent-decoded.
///
/// An unparseable URL is logged and treated the same as an absent parameter.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("cannot parse URL {url:?}: {error}");
            return None;
        }
    };
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
