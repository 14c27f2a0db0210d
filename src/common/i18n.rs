// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

// Catálogo de mensagens por idioma: idioma -> (chave -> mensagem)
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("malformed_request", "The request contains malformed parameters."),
    ("invalid_api_key", "Invalid API Key"),
    ("organization_not_found", "Organization not found"),
    ("building_not_found", "Building not found"),
    ("no_organizations_for_activity", "No organizations found for the given activity"),
    ("no_buildings_in_area", "No buildings found in the specified area"),
    ("invalid_depth", "Depth must be between 1 and 3."),
    ("search_term_too_short", "The search term must have at least 2 characters."),
    ("invalid_area", "The requested area is invalid."),
    ("internal_error", "An unexpected error occurred."),
    // Mensagens de validação de campo
    ("depth_range", "Depth must be between 1 and 3."),
    ("name_min_length", "Name must have at least 2 characters."),
    ("latitude_range", "Latitude must be between -90 and 90."),
    ("longitude_range", "Longitude must be between -180 and 180."),
    ("radius_positive", "Radius must be greater than zero."),
    ("id_positive", "The id must be greater than zero."),
    ("latitude_order", "min_lat must not be greater than max_lat."),
    ("longitude_order", "min_lon must not be greater than max_lon."),
];

const PT: &[(&str, &str)] = &[
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("malformed_request", "A requisição contém parâmetros mal formatados."),
    ("invalid_api_key", "Chave de API inválida"),
    ("organization_not_found", "Organização não encontrada"),
    ("building_not_found", "Prédio não encontrado"),
    ("no_organizations_for_activity", "Nenhuma organização encontrada para a atividade informada"),
    ("no_buildings_in_area", "Nenhum prédio encontrado na área informada"),
    ("invalid_depth", "A profundidade deve estar entre 1 e 3."),
    ("search_term_too_short", "O termo de busca deve ter no mínimo 2 caracteres."),
    ("invalid_area", "A área informada é inválida."),
    ("internal_error", "Ocorreu um erro inesperado."),
    ("depth_range", "A profundidade deve estar entre 1 e 3."),
    ("name_min_length", "O nome deve ter no mínimo 2 caracteres."),
    ("latitude_range", "A latitude deve estar entre -90 e 90."),
    ("longitude_range", "A longitude deve estar entre -180 e 180."),
    ("radius_positive", "O raio deve ser maior que zero."),
    ("id_positive", "O id deve ser maior que zero."),
    ("latitude_order", "min_lat não pode ser maior que max_lat."),
    ("longitude_order", "min_lon não pode ser maior que max_lon."),
];

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("en", EN.iter().copied().collect());
        messages.insert("pt", PT.iter().copied().collect());
        Self { messages }
    }

    /// Traduz uma chave. Cai para o inglês e, em último caso, devolve a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.messages.contains_key(lang)
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.messages.get(lang).and_then(|catalog| catalog.get(key)).copied()
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
