//! Server-rendered page templates.
//!
//! Templates live in `templates/pages/` and use Jinja2 syntax. They are
//! compiled into the binary, and `.html` names get HTML auto-escaping.

pub mod engine;

pub use engine::render_page;
