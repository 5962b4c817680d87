// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,

        // --- Users ---
        handlers::users::get_me,
        handlers::users::list_users,
        handlers::users::set_user_active,

        // --- Catálogos ---
        handlers::catalogs::create_catalog,
        handlers::catalogs::list_catalogs,
        handlers::catalogs::get_catalog,
        handlers::catalogs::update_catalog,
        handlers::catalogs::delete_catalog,
        handlers::catalogs::transition_status,
        handlers::catalogs::add_product,
        handlers::catalogs::update_product,
        handlers::catalogs::remove_product,
        handlers::documents::catalog_pdf,

        // --- Produtos e grades ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::grades::upsert_grades,
        handlers::grades::list_grades,
        handlers::grades::delete_grade,

        // --- Avaliações ---
        handlers::reviews::create_review,
        handlers::reviews::list_reviews,
        handlers::reviews::update_review,
        handlers::reviews::delete_review,

        // --- Mensagens ---
        handlers::messages::send_message,
        handlers::messages::list_messages,
        handlers::messages::get_message,
        handlers::messages::reply_message,

        // --- Favoritos ---
        handlers::favorites::add_favorite,
        handlers::favorites::remove_favorite,
        handlers::favorites::list_favorites,

        // --- Vitrine ---
        handlers::vitrine::list_vitrine,
        handlers::vitrine::get_vitrine_catalog,

        // --- Uploads ---
        handlers::uploads::request_upload,
        handlers::uploads::upload_callback,
        handlers::uploads::poll_upload,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UpdateUserActivePayload,

            // --- Catálogos ---
            models::catalog::CatalogStatus,
            models::catalog::Catalog,
            models::catalog::CatalogDetail,
            models::catalog::CatalogProduct,
            models::catalog::CatalogProductEntry,
            models::catalog::CreateCatalogPayload,
            models::catalog::UpdateCatalogPayload,
            models::catalog::TransitionCatalogPayload,
            models::catalog::AddCatalogProductPayload,
            models::catalog::UpdateCatalogProductPayload,

            // --- Produtos ---
            models::product::Product,
            models::product::ProductPayload,
            models::grade::Grade,
            models::grade::GradeInput,
            models::grade::UpsertGradesPayload,

            // --- Avaliações / Mensagens / Favoritos ---
            models::review::Review,
            models::review::ReviewPayload,
            models::review::ReviewWithRating,
            models::message::MessageStatus,
            models::message::Message,
            models::message::MessageReply,
            models::message::MessageThread,
            models::message::CreateMessagePayload,
            models::message::ReplyMessagePayload,
            models::favorite::Favorite,

            // --- Uploads ---
            models::upload::UploadStatus,
            models::upload::Upload,
            models::upload::UploadTicket,
            models::upload::RequestUploadPayload,
            models::upload::UploadCallbackPayload,

            // --- Dashboard ---
            models::dashboard::StatusCount,
            models::dashboard::RoleCount,
            models::dashboard::AdminDashboard,
            models::dashboard::PublisherDashboard,
            models::dashboard::RetailerDashboard,
            models::dashboard::Dashboard,

            crate::common::pagination::PaginationMeta,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Usuários", description = "Perfil e administração de usuários"),
        (name = "Catálogos", description = "Catálogos, ciclo de aprovação e PDF"),
        (name = "Produtos", description = "Produtos dos fornecedores e representantes"),
        (name = "Grades", description = "Estoque por cor e tamanho"),
        (name = "Avaliações", description = "Avaliações e nota dos catálogos"),
        (name = "Mensagens", description = "Contato entre lojistas e catálogos"),
        (name = "Favoritos", description = "Catálogos favoritos"),
        (name = "Vitrine", description = "Vitrine pública de catálogos publicados"),
        (name = "Uploads", description = "URLs assinadas para envio de imagens"),
        (name = "Dashboard", description = "Indicadores por papel")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_vitrine_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/vitrine"));
        assert!(doc.paths.paths.contains_key("/api/v1/catalogs/{id}/status"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
