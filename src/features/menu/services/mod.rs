mod menu_service;

pub use menu_service::{price_label, MenuService};
