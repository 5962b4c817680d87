// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        CatalogRepository, DashboardRepository, FavoriteRepository, GradeRepository,
        MessageRepository, ProductRepository, ReviewRepository, UploadRepository, UserRepository,
    },
    services::{
        auth::AuthService, catalog_service::CatalogService, dashboard_service::DashboardService,
        document_service::DocumentService, favorite_service::FavoriteService,
        grade_service::GradeService, message_service::MessageService,
        product_service::ProductService, review_service::ReviewService,
        upload_service::UploadService,
    },
};

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub public_base_url: String,
    pub upload_base_url: String,
    pub fonts_dir: String,
    pub cors_origin: Option<String>,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            upload_base_url: env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9000/upload".to_string()),
            fonts_dir: env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string()),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
    pub i18n_store: I18nStore,

    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub product_service: ProductService,
    pub grade_service: GradeService,
    pub review_service: ReviewService,
    pub message_service: MessageService,
    pub favorite_service: FavoriteService,
    pub upload_service: UploadService,
    pub dashboard_service: DashboardService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::with_pool(config, db_pool)
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(config: Config, db_pool: PgPool) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load()?;

        let user_repo = UserRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let grade_repo = GradeRepository::new(db_pool.clone());
        let review_repo = ReviewRepository::new(db_pool.clone());
        let message_repo = MessageRepository::new(db_pool.clone());
        let favorite_repo = FavoriteRepository::new(db_pool.clone());
        let upload_repo = UploadRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, config.jwt_secret.clone(), db_pool.clone());
        let catalog_service = CatalogService::new(
            catalog_repo.clone(),
            product_repo.clone(),
            db_pool.clone(),
        );
        let product_service = ProductService::new(product_repo.clone());
        let grade_service = GradeService::new(grade_repo, product_repo, db_pool.clone());
        let review_service = ReviewService::new(review_repo, catalog_repo.clone(), db_pool.clone());
        let message_service =
            MessageService::new(message_repo, catalog_repo.clone(), db_pool.clone());
        let favorite_service = FavoriteService::new(favorite_repo, catalog_repo.clone());
        let upload_service = UploadService::new(
            upload_repo,
            config.jwt_secret.clone(),
            config.upload_base_url.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo);
        let document_service = DocumentService::new(
            catalog_service.clone(),
            config.fonts_dir.clone(),
            config.public_base_url.clone(),
        );

        Ok(Self {
            db_pool,
            config,
            i18n_store,
            auth_service,
            catalog_service,
            product_service,
            grade_service,
            review_service,
            message_service,
            favorite_service,
            upload_service,
            dashboard_service,
            document_service,
        })
    }
}
