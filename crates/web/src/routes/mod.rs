//! HTTP route handlers for the cafe directory.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Cafes
//! GET  /cafes                  - List every cafe
//! GET  /add                    - Empty add form
//! POST /add                    - Create a cafe (302 to / or form with errors)
//! GET  /edit?id=<id>           - Edit form for one cafe
//! POST /edit                   - Update the cafe's location (302 to /)
//! GET  /delete?id=<id>         - Delete a cafe (302 to /)
//! POST /delete?id=<id>         - Same as GET
//! ```

pub mod cafes;
pub mod home;

use axum::{
    Router,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::state::AppState;

/// Create the page routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/cafes", get(cafes::list))
        .route("/add", get(cafes::add_page).post(cafes::add))
        .route("/edit", get(cafes::edit_page).post(cafes::edit))
        .route("/delete", get(cafes::delete).post(cafes::delete))
}

/// A `302 Found` redirect.
///
/// `axum::response::Redirect` only offers 303, 307 and 308.
pub(crate) fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
