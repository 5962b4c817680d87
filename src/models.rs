pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod favorite;
pub mod grade;
pub mod message;
pub mod product;
pub mod review;
pub mod upload;
