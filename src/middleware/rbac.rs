// src/middleware/rbac.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::UserRole,
};

/// Conjunto de papéis autorizados para uma rota.
pub trait RoleRequirement: Send + Sync + 'static {
    fn allowed() -> &'static [UserRole];
}

/// O Extractor (Guardião): rejeita com 403 quem não tem um dos papéis.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        if !T::allowed().contains(&user.0.role) {
            tracing::warn!(
                "Acesso negado: usuário {} ({:?}) fora de {:?}",
                user.0.id,
                user.0.role,
                T::allowed()
            );
            return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct Administrators;
impl RoleRequirement for Administrators {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Administrator]
    }
}

/// Quem pode criar catálogos e produtos (e o administrador).
pub struct Publishers;
impl RoleRequirement for Publishers {
    fn allowed() -> &'static [UserRole] {
        &[UserRole::Administrator, UserRole::Supplier, UserRole::Representative]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retailers_are_not_publishers() {
        assert!(!Publishers::allowed().contains(&UserRole::Retailer));
        assert!(Publishers::allowed().contains(&UserRole::Supplier));
        assert_eq!(Administrators::allowed(), &[UserRole::Administrator]);
    }
}
