//! Server-rendered admin panel.
//!
//! Every request re-fetches the catalog into a
//! [`CatalogView`](services::CatalogView), applies the submitted change when
//! the backend accepts it and renders the panel.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/admin` | Panel (`?tab=categories\|items`, `&edit=<id>`, `&new=1`) |
//! | POST | `/admin/categories` | Add category |
//! | POST | `/admin/categories/{id}` | Rename category |
//! | POST | `/admin/categories/{id}/delete` | Delete category |
//! | POST | `/admin/items` | Add item (multipart, optional image) |
//! | POST | `/admin/items/{id}` | Update item (multipart, optional image) |
//! | POST | `/admin/items/{id}/delete` | Delete item |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
