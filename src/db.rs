pub mod user_repo;
pub use user_repo::UserRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod grade_repo;
pub use grade_repo::GradeRepository;
pub mod review_repo;
pub use review_repo::ReviewRepository;
pub mod message_repo;
pub use message_repo::MessageRepository;
pub mod favorite_repo;
pub use favorite_repo::FavoriteRepository;
pub mod upload_repo;
pub use upload_repo::UploadRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
