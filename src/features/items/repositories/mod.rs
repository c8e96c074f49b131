mod item_repository;
mod pg_item_repository;
mod postgrest_item_repository;

pub use item_repository::ItemRepository;
pub use pg_item_repository::PgItemRepository;
pub use postgrest_item_repository::PostgrestItemRepository;
