mod category_repository;
mod pg_category_repository;
mod postgrest_category_repository;

pub use category_repository::CategoryRepository;
pub use pg_category_repository::PgCategoryRepository;
pub use postgrest_category_repository::PostgrestCategoryRepository;
