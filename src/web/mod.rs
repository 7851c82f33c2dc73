//! Web module
//!
//! Hosts the search widget: the HTML page with its input, buttons, counter
//! and table, plus a small JSON API over the same session.

mod handlers;
mod routes;
mod state;
mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
