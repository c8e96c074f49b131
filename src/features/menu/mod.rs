//! Public menu page.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/` | No | Rendered menu, one section per category |
//! | GET | `/api/menu` | No | The same sections as JSON |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::MenuService;
