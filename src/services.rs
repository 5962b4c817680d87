pub mod access;
pub mod auth;
pub mod catalog_service;
pub mod dashboard_service;
pub mod document_service;
pub mod favorite_service;
pub mod grade_service;
pub mod message_service;
pub mod product_service;
pub mod review_service;
pub mod upload_service;
