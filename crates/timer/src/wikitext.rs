//! Wikitext assembly for timer notices.
//!
//! A notice is a site-provided template with `%%placeholder%%` slots; this
//! module fills the slots from the timer link and the moderator's inputs.
//! Each placeholder is substituted at its first occurrence only, so template
//! text that happens to repeat a marker keeps the later copies verbatim.

/// Substituted for `%%banuser%%` when no user was named.
pub const DEFAULT_BAN_USER: &str = "USERNAME";

/// Substituted for `%%bandate%%` when no date was picked.
pub const DEFAULT_BAN_DATE: &str = "YYYY年MM月DD日";

/// Wikitext iframe embed pointing at a timer page.
pub fn iframe_embed(url: &str, width: &str, height: &str) -> String {
    format!(
        "[[iframe {url} style=\"width: {width}; height: {height}; border: 0; text-align: center;\"]]"
    )
}

/// Values available to a notice template.
///
/// `width`/`height` size the embedded iframe; the ban fields only matter to
/// ban templates and fall back to visible placeholders when absent, so a
/// half-filled form still produces reviewable output.
#[derive(Clone, Debug, Default)]
pub struct TemplateValues {
    /// Timer page URL, as built by [`crate::timer_url`].
    pub url: String,
    /// Current vote score quoted by deletion notices.
    pub score: String,
    /// Iframe width (CSS length, e.g. `400px`).
    pub width: String,
    /// Iframe height (CSS length).
    pub height: String,
    /// Pre-rendered deletion-reason sentence, possibly empty.
    pub summary: String,
    /// User a ban notice names.
    pub ban_user: Option<String>,
    /// Date of the offence, already formatted for display.
    pub ban_date: Option<String>,
    /// Pre-rendered ban-reason text, possibly empty.
    pub ban_summary: String,
    /// Kind of ban (violation, cheating, ...), possibly empty.
    pub ban_type: String,
}

/// Fill a notice template's placeholders.
///
/// Recognized markers: `%%url%%`, `%%score%%`, `%%iframe%%`, `%%summary%%`,
/// `%%banuser%%`, `%%bandate%%`, `%%bansummary%%`, `%%bantype%%`. Unknown
/// markers pass through untouched. Substitution happens in that fixed order,
/// first occurrence each.
pub fn render_template(template: &str, values: &TemplateValues) -> String {
    let iframe = iframe_embed(&values.url, &values.width, &values.height);
    let ban_user = values.ban_user.as_deref().unwrap_or(DEFAULT_BAN_USER);
    let ban_date = values.ban_date.as_deref().unwrap_or(DEFAULT_BAN_DATE);

    let mut output = template.to_owned();
    for (marker, value) in [
        ("%%url%%", values.url.as_str()),
        ("%%score%%", values.score.as_str()),
        ("%%iframe%%", iframe.as_str()),
        ("%%summary%%", values.summary.as_str()),
        ("%%banuser%%", ban_user),
        ("%%bandate%%", ban_date),
        ("%%bansummary%%", values.ban_summary.as_str()),
        ("%%bantype%%", values.ban_type.as_str()),
    ] {
        output = output.replacen(marker, value, 1);
    }
    output
}
