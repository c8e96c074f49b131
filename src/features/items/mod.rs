//! Menu items.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/items` | No | List items in id order |
//! | POST | `/api/admin/items` | Admin | Create item |
//! | PUT | `/api/admin/items/{id}` | Admin | Update item |
//! | DELETE | `/api/admin/items/{id}` | Admin | Delete item, then clean up its stored image |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ItemService;
