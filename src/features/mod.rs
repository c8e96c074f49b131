pub mod admin;
pub mod categories;
pub mod images;
pub mod items;
pub mod menu;
