// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{seed, DirectoryRepository, InMemoryDirectoryRepository, PgDirectoryRepository},
    services::{ActivityService, BuildingService, OrganizationService},
};

// Valor especial de DATABASE_URL que liga o repositório em memória
pub const MEMORY_BACKEND: &str = "memory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { url: String },
    Memory,
}

// Configuração do processo, lida do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageBackend,
    pub api_key: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub seed_demo_data: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (testável sem mexer no ambiente).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let api_key = lookup("API_KEY").context("API_KEY deve ser definida")?;
        if api_key.trim().is_empty() {
            return Err(anyhow!("API_KEY não pode ser vazia"));
        }

        let storage = if database_url.trim() == MEMORY_BACKEND {
            StorageBackend::Memory
        } else {
            StorageBackend::Postgres { url: database_url }
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().with_context(|| format!("DB_MAX_CONNECTIONS inválido: {v}"))?,
            None => 5,
        };

        let acquire_timeout = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse().with_context(|| format!("DB_ACQUIRE_TIMEOUT_SECS inválido: {v}"))?,
            ),
            None => Duration::from_secs(3),
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(v) => parse_flag(&v).with_context(|| format!("SEED_DEMO_DATA inválido: {v}"))?,
            None => false,
        };

        Ok(Self {
            storage,
            api_key,
            bind_addr,
            max_connections,
            acquire_timeout,
            seed_demo_data,
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("valor booleano desconhecido '{other}'")),
    }
}

// O estado compartilhado, acessível em todos os handlers.
// Nada aqui é mutável: cada requisição trabalha só com dados locais.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Arc<str>,
    pub i18n_store: Arc<I18nStore>,
    pub activity_service: ActivityService,
    pub organization_service: OrganizationService,
    pub building_service: BuildingService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let repo: Arc<dyn DirectoryRepository> = match &settings.storage {
            StorageBackend::Postgres { url } => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .acquire_timeout(settings.acquire_timeout)
                    .connect(url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                let repo = PgDirectoryRepository::new(db_pool);
                if settings.seed_demo_data {
                    if repo.is_empty().await? {
                        repo.insert_snapshot(&seed::demo_dataset()).await?;
                        tracing::info!("🌱 Dados de demonstração gravados.");
                    } else {
                        tracing::info!("Dados já existentes, seed ignorado.");
                    }
                }
                Arc::new(repo)
            }
            StorageBackend::Memory => {
                tracing::warn!("Usando o repositório em memória (DATABASE_URL=memory)");
                let repo = if settings.seed_demo_data {
                    InMemoryDirectoryRepository::from_snapshot(seed::demo_dataset())
                } else {
                    InMemoryDirectoryRepository::new()
                };
                if repo.is_empty() {
                    tracing::warn!("Repositório em memória vazio: todas as buscas voltarão sem resultados");
                }
                Arc::new(repo)
            }
        };

        Ok(Self::with_repository(repo, &settings.api_key))
    }

    // Monta o gráfico de dependências a partir de qualquer repositório
    pub fn with_repository(repo: Arc<dyn DirectoryRepository>, api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
            i18n_store: Arc::new(I18nStore::new()),
            activity_service: ActivityService::new(repo.clone()),
            organization_service: OrganizationService::new(repo.clone()),
            building_service: BuildingService::new(repo),
        }
    }
}
