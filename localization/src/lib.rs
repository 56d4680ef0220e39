//! Per-locale refund messages backed by Fluent (FTL) bundles.
//!
//! Templates are FTL resources registered per locale and formatted with
//! `FluentArgs`, so argument values are never re-scanned as template
//! text. Locale resolution negotiates against the registered bundles and
//! falls back to [`DEFAULT_LOCALE`].

use {
    bevy::prelude::*,
    fluent::{FluentArgs, FluentResource, concurrent::FluentBundle},
    fluent_langneg::{NegotiationStrategy, negotiate_languages},
    std::collections::HashMap,
    thiserror::Error,
    unic_langid::LanguageIdentifier,
};

pub const DEFAULT_LOCALE: &str = "en";

/// Symbolic message keys (FTL message identifiers).
pub mod lang {
    pub const REFUND_SUMMARY: &str = "refund-summary";
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("invalid locale identifier '{0}'")]
    Locale(String),
    #[error("invalid FTL resource for locale '{0}'")]
    Resource(String),
}

/// Locale-keyed Fluent bundles. The default locale must cover every
/// message; other locales are optional overlays consulted first.
#[derive(Resource, Default)]
pub struct MessageCatalog {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl MessageCatalog {
    /// Parses an FTL resource and adds it to the bundle for `locale`,
    /// creating the bundle on first use. Later registrations override
    /// messages with the same id.
    pub fn register(&mut self, locale: &str, ftl: &str) -> Result<(), LocalizationError> {
        let resource = FluentResource::try_new(ftl.to_string())
            .map_err(|_| LocalizationError::Resource(locale.to_string()))?;
        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| LocalizationError::Locale(locale.to_string()))?;

        let bundle = self.bundles.entry(locale.to_string()).or_insert_with(|| {
            let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
            // Plain chat output: skip Unicode directional isolation marks.
            bundle.set_use_isolating(false);
            bundle
        });
        bundle.add_resource_overriding(resource);
        Ok(())
    }

    /// Formats a message for the recipient's locale. Falls back to
    /// [`DEFAULT_LOCALE`] when the locale has no bundle or its bundle
    /// lacks the message; `None` when no bundle carries the key.
    pub fn format(&self, key: &str, locale: Option<&str>, args: &FluentArgs) -> Option<String> {
        if let Some(text) = self
            .negotiated_bundle(locale)
            .and_then(|bundle| Self::format_in(bundle, key, args))
        {
            return Some(text);
        }
        self.bundles
            .get(DEFAULT_LOCALE)
            .and_then(|bundle| Self::format_in(bundle, key, args))
    }

    fn negotiated_bundle(&self, locale: Option<&str>) -> Option<&FluentBundle<FluentResource>> {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|key| key.parse().ok()).collect();
        let requested: Vec<LanguageIdentifier> = locale
            .and_then(|locale| locale.parse().ok())
            .into_iter()
            .collect();
        let default: LanguageIdentifier = DEFAULT_LOCALE.parse().ok()?;

        let negotiated = negotiate_languages(
            &requested,
            &available,
            Some(&default),
            NegotiationStrategy::Filtering,
        );
        let best = negotiated.first()?.to_string();
        self.bundles.get(&best)
    }

    fn format_in(
        bundle: &FluentBundle<FluentResource>,
        key: &str,
        args: &FluentArgs,
    ) -> Option<String> {
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;
        let mut errors = vec![];
        let text = bundle.format_pattern(pattern, Some(args), &mut errors);
        if !errors.is_empty() {
            warn!("formatting message '{}' produced errors: {:?}", key, errors);
        }
        Some(text.to_string())
    }
}

/// One line of the refund summary: `- <display name> x<quantity>`.
pub fn summary_line(display_name: &str, quantity: u32) -> String {
    format!("- {} x{}", display_name, quantity)
}

/// Composes the full refund summary, or `None` when there is nothing to
/// report (callers skip sending entirely).
pub fn format_summary(
    catalog: &MessageCatalog,
    locale: Option<&str>,
    structure_name: &str,
    grade_name: &str,
    lines: &[String],
) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let mut args = FluentArgs::new();
    args.set("structure", structure_name);
    args.set("grade", grade_name);
    args.set("items", lines.join("\n"));
    catalog.format(lang::REFUND_SUMMARY, locale, &args)
}

pub struct LocalizationPlugin;

impl Plugin for LocalizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MessageCatalog>();
    }
}
