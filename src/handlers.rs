pub mod auth;
pub mod catalogs;
pub mod dashboard;
pub mod documents;
pub mod favorites;
pub mod grades;
pub mod messages;
pub mod products;
pub mod reviews;
pub mod uploads;
pub mod users;
pub mod vitrine;
