// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const SUPPORTED: &[&str] = &["en", "pt"];
const DEFAULT_LANG: &str = "en";

/// Idioma principal do `Accept-Language` (ex: "pt-BR" -> "pt").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_header(value: Option<&str>) -> Self {
        let lang = value
            .map(accept_language::parse)
            .and_then(|tags| {
                // Primeiro idioma que temos catálogo
                tags.into_iter().find_map(|tag| {
                    let primary = tag.split('-').next().unwrap_or(&tag).to_lowercase();
                    SUPPORTED.contains(&primary.as_str()).then_some(primary)
                })
            })
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(Locale::from_header(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_is_stripped() {
        assert_eq!(Locale::from_header(Some("pt-BR,pt;q=0.9")).0, "pt");
    }

    #[test]
    fn test_missing_header_defaults_to_english() {
        assert_eq!(Locale::from_header(None).0, "en");
    }

    #[test]
    fn test_first_supported_language_wins() {
        assert_eq!(Locale::from_header(Some("de-DE,pt;q=0.8,en;q=0.5")).0, "pt");
        assert_eq!(Locale::from_header(Some("fr")).0, "en");
    }
}
