//! UI languages, built-in messages, and the translation catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Namespace for section titles.
pub const SECTIONS_NAMESPACE: &str = "kanbanlogiq";

/// Namespace for CSV column labels.
pub const CSV_NAMESPACE: &str = "csv";

/// A supported UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Italian, the language the application ships in.
    #[default]
    #[serde(rename = "it")]
    Italian,
    /// English.
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Built-in UI strings for this language.
    #[must_use]
    pub fn messages(self) -> &'static Messages {
        match self {
            Self::Italian => &ITALIAN,
            Self::English => &ENGLISH,
        }
    }
}

/// Fixed UI strings emitted by the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Prefix of an order bar's tooltip, followed by the rounded percent.
    pub items_shipped: &'static str,
    /// Prefix of a tray popover.
    pub tray_status: &'static str,
    /// Popover text for an empty tray.
    pub tray_empty: &'static str,
    /// Unit suffix in `"{status}/{quantity} <unit>"`.
    pub units: &'static str,
    /// Shown in place of a CSV column label that cannot be resolved.
    pub invalid_column: &'static str,
    /// Shown on any failed login.
    pub login_failed: &'static str,
    /// Shown when a login field is blank. `{field}` is substituted.
    pub field_required: &'static str,
}

impl Messages {
    /// Validation message for a missing field.
    #[must_use]
    pub fn field_required(&self, field: &str) -> String {
        self.field_required.replace("{field}", field)
    }
}

static ITALIAN: Messages = Messages {
    items_shipped: "Articoli evasi: ",
    tray_status: "Stato Vaschetta: ",
    tray_empty: "Vuota",
    units: "pz",
    invalid_column: "Colonna non valida. Contatta l'amministratore di sistema.",
    login_failed: "Email o password errati.",
    field_required: "Il campo {field} è obbligatorio.",
};

static ENGLISH: Messages = Messages {
    items_shipped: "Items shipped: ",
    tray_status: "Tray status: ",
    tray_empty: "Empty",
    units: "units",
    invalid_column: "Invalid column. Contact the system administrator.",
    login_failed: "Incorrect email or password.",
    field_required: "The {field} field is required.",
};

/// Looks up a human-readable string for a `(namespace, key)` pair.
pub trait Translator {
    /// The translation, if one exists.
    fn translate(&self, namespace: &str, key: &str) -> Option<&str>;
}

/// In-memory translation catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog for a language.
    #[must_use]
    pub fn builtin(language: Language) -> Self {
        let (sections, csv): (&[(&str, &str)], &[(&str, &str)]) = match language {
            Language::Italian => (
                &[
                    ("home", "home"),
                    ("admin", "amministrazione"),
                    ("customer", "area cliente"),
                    ("orders", "ordini"),
                    ("installations", "installazioni"),
                    ("trays", "vaschette"),
                    ("customers", "clienti"),
                    ("users", "utenti"),
                ],
                &[
                    ("qta_vaschette", "quantità_vaschette"),
                    ("qta_evasa", "quantità_evasa"),
                    ("tipo_vaschette", "tipo_vaschetta"),
                    ("barcode", "codice_a_barre"),
                ],
            ),
            Language::English => (
                &[
                    ("home", "home"),
                    ("admin", "administration"),
                    ("customer", "customer area"),
                    ("orders", "orders"),
                    ("installations", "installations"),
                    ("trays", "trays"),
                    ("customers", "customers"),
                    ("users", "users"),
                ],
                &[
                    ("qta_vaschette", "trays_ordered"),
                    ("qta_evasa", "trays_shipped"),
                    ("tipo_vaschette", "tray_type"),
                    ("barcode", "barcode"),
                ],
            ),
        };

        let mut catalog = Self::new();
        for (key, value) in sections {
            catalog.insert(SECTIONS_NAMESPACE, *key, *value);
        }
        for (key, value) in csv {
            catalog.insert(CSV_NAMESPACE, *key, *value);
        }
        catalog
    }

    /// The built-in catalog for a language with configured overrides on top.
    #[must_use]
    pub fn with_overrides(
        language: Language,
        overrides: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Self {
        let mut catalog = Self::builtin(language);
        for (namespace, entries) in overrides {
            for (key, value) in entries {
                catalog.insert(namespace.as_str(), key.as_str(), value.as_str());
            }
        }
        catalog
    }

    /// Add or replace one translation.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Number of translations across all namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Check if the catalog holds no translations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Translator for Catalog {
    fn translate(&self, namespace: &str, key: &str) -> Option<&str> {
        self.entries
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }
}

/// Upper-case the first character, leaving the rest untouched.
#[must_use]
pub fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default_is_italian() {
        assert_eq!(Language::default(), Language::Italian);
    }

    #[test]
    fn test_language_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"it\"").unwrap();
        assert_eq!(lang, Language::Italian);
    }

    #[test]
    fn test_messages_per_language() {
        assert_eq!(Language::Italian.messages().tray_empty, "Vuota");
        assert_eq!(Language::English.messages().tray_empty, "Empty");
        assert_eq!(
            Language::English.messages().login_failed,
            "Incorrect email or password."
        );
    }

    #[test]
    fn test_field_required_substitution() {
        let msg = Language::English.messages().field_required("email");
        assert_eq!(msg, "The email field is required.");
    }

    #[test]
    fn test_builtin_catalog_has_sections_and_csv() {
        let catalog = Catalog::builtin(Language::Italian);
        assert_eq!(catalog.translate(SECTIONS_NAMESPACE, "orders"), Some("ordini"));
        assert_eq!(catalog.translate(CSV_NAMESPACE, "barcode"), Some("codice_a_barre"));
        assert_eq!(catalog.translate(SECTIONS_NAMESPACE, "missing"), None);
        assert_eq!(catalog.translate("other", "orders"), None);
    }

    #[test]
    fn test_overrides_replace_builtins() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            SECTIONS_NAMESPACE.to_string(),
            BTreeMap::from([("orders".to_string(), "commesse".to_string())]),
        );

        let catalog = Catalog::with_overrides(Language::Italian, &overrides);
        assert_eq!(catalog.translate(SECTIONS_NAMESPACE, "orders"), Some("commesse"));
        assert_eq!(catalog.translate(SECTIONS_NAMESPACE, "users"), Some("utenti"));
    }

    #[test]
    fn test_catalog_len() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.insert("a", "x", "1");
        catalog.insert("b", "y", "2");
        catalog.insert("a", "x", "3");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_ucfirst() {
        assert_eq!(ucfirst("ordini"), "Ordini");
        assert_eq!(ucfirst("àrea"), "Àrea");
        assert_eq!(ucfirst(""), "");
        assert_eq!(ucfirst("Già"), "Già");
    }
}
