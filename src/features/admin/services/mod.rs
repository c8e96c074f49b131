mod admin_service;
mod catalog_view;

pub use admin_service::{AdminPage, AdminService};
pub use catalog_view::CatalogView;
