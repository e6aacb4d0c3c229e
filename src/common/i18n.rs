// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_LANG: &str = "en";

// Catálogos embutidos no binário (chave do erro -> mensagem)
const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

/// Mensagens traduzidas, indexadas por idioma e código.
#[derive(Clone, Debug)]
pub struct I18nStore {
    catalogs: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("Catálogo '{}' inválido: {}", lang, e))?;
            catalogs.insert(lang.to_string(), messages);
        }

        tracing::info!("🌐 {} catálogos de idioma carregados", catalogs.len());

        Ok(Self { catalogs: Arc::new(catalogs) })
    }

    /// Busca a mensagem no idioma pedido, cai para o inglês e, por fim, devolve o próprio código.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|c| c.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Igual ao `translate`, substituindo `{nome}` pelos argumentos.
    pub fn translate_with(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.translate(lang, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_language() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("pt", "customer_not_found"), "Cliente não encontrado");
        assert_eq!(store.translate("en", "customer_not_found"), "Customer not found");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("de", "invalid_credentials"), "Incorrect email or password");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("en", "nao_existe"), "nao_existe");
    }

    #[test]
    fn test_translate_with_placeholders() {
        let store = I18nStore::load().unwrap();
        let msg = store.translate_with("en", "route_not_found", &[("id", "route-1234abcd")]);
        assert_eq!(msg, "Route with id route-1234abcd not found");
    }

    #[test]
    fn test_catalogs_have_same_keys() {
        let store = I18nStore::load().unwrap();
        let en = store.catalogs.get("en").unwrap();
        let pt = store.catalogs.get("pt").unwrap();
        for key in en.keys() {
            assert!(pt.contains_key(key), "chave '{}' faltando em pt", key);
        }
    }
}
