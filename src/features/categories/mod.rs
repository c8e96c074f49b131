//! Menu categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | List categories in id order |
//! | POST | `/api/admin/categories` | Admin | Create category |
//! | PUT | `/api/admin/categories/{id}` | Admin | Rename category |
//! | DELETE | `/api/admin/categories/{id}` | Admin | Delete category (items are kept) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CategoryService;
