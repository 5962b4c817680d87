// src/common/i18n.rs

use std::collections::HashMap;

// Idioma usado quando o cliente pede algo que não temos
pub const DEFAULT_LANG: &str = "pt";

// Catálogo de mensagens embutido no binário (locales/*.json)
const BUNDLES: &[(&str, &str)] = &[
    ("pt", include_str!("../../locales/pt.json")),
    ("en", include_str!("../../locales/en.json")),
];

#[derive(Debug, Clone, Default)]
pub struct I18nStore {
    messages: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut messages = HashMap::new();
        for (lang, raw) in BUNDLES {
            let bundle: HashMap<String, String> = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("Arquivo de tradução '{}' inválido: {}", lang, e))?;
            messages.insert(lang.to_string(), bundle);
        }
        Ok(Self { messages })
    }

    /// Busca a mensagem no idioma pedido, caindo para o padrão e, por último, para a própria chave.
    pub fn translate(&self, lang: &str, key: &str, params: &[(&str, String)]) -> String {
        let template = self
            .messages
            .get(lang)
            .and_then(|bundle| bundle.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|bundle| bundle.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string());

        params.iter().fold(template, |acc, (name, value)| {
            acc.replace(&format!("{{{}}}", name), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_share_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let pt: Vec<_> = {
            let mut keys: Vec<_> = store.messages["pt"].keys().cloned().collect();
            keys.sort();
            keys
        };
        let mut en: Vec<_> = store.messages["en"].keys().cloned().collect();
        en.sort();
        assert_eq!(pt, en);
    }

    #[test]
    fn falls_back_to_default_language() {
        let store = I18nStore::load().unwrap();
        assert_eq!(
            store.translate("de", "errors.forbidden", &[]),
            "Você não tem permissão para realizar esta ação."
        );
    }

    #[test]
    fn replaces_named_params() {
        let store = I18nStore::load().unwrap();
        let msg = store.translate(
            "en",
            "errors.invalid_transition",
            &[("from", "pending_approval".into()), ("to", "published".into())],
        );
        assert_eq!(msg, "Cannot change status from 'pending_approval' to 'published'.");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("en", "errors.nope", &[]), "errors.nope");
    }
}
