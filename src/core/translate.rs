//! Message translation
//!
//! Renders a failed rule as a user-facing sentence. Templates are keyed by
//! locale and rule; `{0}` in a template is replaced with the option key.

use std::collections::HashMap;

use crate::config::defaults::DEFAULT_LOCALE;
use crate::core::binder::FieldMeta;
use crate::core::validation::Rule;

/// Used when neither the requested nor the default locale has a template
const FALLBACK_TEMPLATE: &str = "{0} option is not valid";

/// Placeholder replaced with the option key
const PLACEHOLDER: &str = "{0}";

/// Locale-aware `(rule, option)` to message renderer
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    templates: HashMap<String, HashMap<Rule, String>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Translator for the default locale with the built-in templates
    pub fn new() -> Self {
        let mut translator = Self {
            locale: DEFAULT_LOCALE.to_string(),
            templates: HashMap::new(),
        };
        translator.add_template(DEFAULT_LOCALE, Rule::Required, "{0} option is required");
        translator
    }

    /// Render messages for `locale`, falling back to the default locale
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn with_template(
        mut self,
        locale: impl Into<String>,
        rule: Rule,
        template: impl Into<String>,
    ) -> Self {
        self.add_template(locale, rule, template);
        self
    }

    /// Add or replace the template for `(locale, rule)`
    pub fn add_template(&mut self, locale: impl Into<String>, rule: Rule, template: impl Into<String>) {
        self.templates
            .entry(locale.into())
            .or_default()
            .insert(rule, template.into());
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Template for `rule`: requested locale, then default locale, then a
    /// generic sentence
    pub fn template(&self, rule: Rule) -> &str {
        [self.locale.as_str(), DEFAULT_LOCALE]
            .into_iter()
            .find_map(|locale| self.templates.get(locale)?.get(&rule))
            .map_or(FALLBACK_TEMPLATE, String::as_str)
    }

    /// Render the message for `rule` failing on the field described by `meta`
    pub fn render(&self, rule: Rule, meta: &FieldMeta) -> String {
        self.render_option(rule, meta.option_key)
    }

    /// Render the message for `rule` failing on `option`
    pub fn render_option(&self, rule: Rule, option: &str) -> String {
        self.template(rule).replace(PLACEHOLDER, option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::OptionKind;

    #[test]
    fn test_required_in_default_locale() {
        let translator = Translator::default();
        assert_eq!(translator.locale(), "en");
        assert_eq!(
            translator.render_option(Rule::Required, "app-id"),
            "app-id option is required"
        );
    }

    #[test]
    fn test_render_uses_option_key_not_field_name() {
        let meta = FieldMeta {
            field: "table_id",
            option_key: "table-id",
            kind: OptionKind::String,
            rules: &[],
        };
        assert_eq!(
            Translator::new().render(Rule::Required, &meta),
            "table-id option is required"
        );
    }

    #[test]
    fn test_unknown_locale_falls_back_to_default() {
        let translator = Translator::new().with_locale("fr");
        assert_eq!(
            translator.render_option(Rule::Required, "field-id"),
            "field-id option is required"
        );
    }

    #[test]
    fn test_locale_specific_template() {
        let translator = Translator::new()
            .with_template("fr", Rule::Required, "l'option {0} est obligatoire")
            .with_locale("fr");
        assert_eq!(
            translator.render_option(Rule::Required, "app-id"),
            "l'option app-id est obligatoire"
        );
    }

    #[test]
    fn test_missing_rule_uses_generic_template() {
        let translator = Translator::new();
        assert_eq!(translator.template(Rule::Min), FALLBACK_TEMPLATE);
        assert_eq!(
            translator.render_option(Rule::Min, "field-id"),
            "field-id option is not valid"
        );
    }
}
