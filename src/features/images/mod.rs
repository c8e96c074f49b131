//! Menu image uploads.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/admin/images` | Admin | Upload an image, returns its key and public URL |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ImageService;
