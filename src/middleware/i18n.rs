// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::DEFAULT_LANG;

// Extrator de idioma (Accept-Language). Só guarda o idioma primário.
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    pub fn from_header(header_str: &str) -> Self {
        accept_language::parse(header_str)
            .first() // Pega o idioma preferido (ex: "pt-BR")
            .map(|tag_string| {
                // "pt-BR" -> "pt", "en" -> "en"
                let primary = tag_string.split('-').next().unwrap_or(tag_string);
                Locale(primary.to_ascii_lowercase())
            })
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_primary_subtag_of_preferred_language() {
        assert_eq!(Locale::from_header("pt-BR,pt;q=0.9,en;q=0.8").0, "pt");
    }

    #[test]
    fn respects_quality_ordering() {
        assert_eq!(Locale::from_header("en;q=0.5, pt;q=0.9").0, "pt");
    }

    #[test]
    fn empty_header_defaults_to_english() {
        assert_eq!(Locale::from_header("").0, "en");
    }
}
