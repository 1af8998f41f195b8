//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod order_repo;
pub mod pet_repo;
pub mod pet_tag_repo;
pub mod photo_url_repo;
pub mod tag_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use order_repo::OrderRepo;
pub use pet_repo::PetRepo;
pub use pet_tag_repo::PetTagRepo;
pub use photo_url_repo::PhotoUrlRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
