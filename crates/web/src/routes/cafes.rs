//! Cafe list, add, edit and delete handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use cafe_directory_core::CafeId;

use super::found;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::forms::{AddCafeForm, EditCafeForm, FieldErrors};
use crate::models::{Cafe, CafeUpdate};
use crate::state::AppState;

/// Query string carrying a cafe id.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: CafeId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cafe list page template.
#[derive(Template, WebTemplate)]
#[template(path = "cafes.html")]
pub struct CafesTemplate {
    pub cafes: Vec<Cafe>,
}

/// Add-cafe page template.
#[derive(Template, WebTemplate)]
#[template(path = "add.html")]
pub struct AddCafeTemplate {
    pub form: AddCafeForm,
    pub errors: FieldErrors,
}

/// Edit-cafe page template.
#[derive(Template, WebTemplate)]
#[template(path = "edit.html")]
pub struct EditCafeTemplate {
    pub cafe: Cafe,
    pub cafe_location: String,
    pub errors: FieldErrors,
}

// =============================================================================
// List
// =============================================================================

/// Display every cafe.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cafes = state.cafes().list().await?;
    tracing::debug!(count = cafes.len(), "Listed cafes");
    Ok(CafesTemplate { cafes })
}

// =============================================================================
// Add
// =============================================================================

/// Display the empty add form.
pub async fn add_page() -> impl IntoResponse {
    AddCafeTemplate {
        form: AddCafeForm::default(),
        errors: FieldErrors::new(),
    }
}

/// Handle add form submission.
///
/// Invalid submissions re-render the form with the submitted values and one
/// message per failing field.
#[instrument(skip(state, form), fields(cafe_name = %form.cafe_name))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddCafeForm>) -> Result<Response> {
    let new_cafe = match form.validate() {
        Ok(new_cafe) => new_cafe,
        Err(errors) => {
            tracing::info!(%errors, "Add cafe rejected");
            return Ok(AddCafeTemplate { form, errors }.into_response());
        }
    };

    let cafe = state.cafes().create(&new_cafe).await?;

    let id = cafe.id.to_string();
    add_breadcrumb("cafes", "Added cafe", Some(&[("cafe_id", id.as_str())]));
    tracing::info!(cafe_id = %cafe.id, name = %cafe.name, "Cafe added");

    Ok(found("/"))
}

// =============================================================================
// Edit
// =============================================================================

/// Display the edit form pre-filled with the cafe's current location.
#[instrument(skip(state), fields(cafe_id = %query.id))]
pub async fn edit_page(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse> {
    let cafe = find_cafe(&state, query.id).await?;

    Ok(EditCafeTemplate {
        cafe_location: cafe.location.clone(),
        cafe,
        errors: FieldErrors::new(),
    })
}

/// Handle edit form submission by updating the cafe's location.
#[instrument(skip(state, form), fields(cafe_id = %form.id))]
pub async fn edit(State(state): State<AppState>, Form(form): Form<EditCafeForm>) -> Result<Response> {
    let cafe = find_cafe(&state, form.id).await?;

    let location = match form.validate() {
        Ok(location) => location,
        Err(errors) => {
            tracing::info!(%errors, "Edit cafe rejected");
            return Ok(EditCafeTemplate {
                cafe,
                cafe_location: form.cafe_location,
                errors,
            }
            .into_response());
        }
    };

    state
        .cafes()
        .update(cafe.id, &CafeUpdate::Location(location))
        .await?;

    let id = cafe.id.to_string();
    add_breadcrumb("cafes", "Edited cafe", Some(&[("cafe_id", id.as_str())]));
    tracing::info!(cafe_id = %cafe.id, "Cafe location updated");

    Ok(found("/"))
}

// =============================================================================
// Delete
// =============================================================================

/// Delete the cafe named by the `id` query parameter.
#[instrument(skip(state), fields(cafe_id = %query.id))]
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    state.cafes().delete(query.id).await?;

    let id = query.id.to_string();
    add_breadcrumb("cafes", "Deleted cafe", Some(&[("cafe_id", id.as_str())]));
    tracing::info!(cafe_id = %query.id, "Cafe deleted");

    Ok(found("/"))
}

async fn find_cafe(state: &AppState, id: CafeId) -> Result<Cafe> {
    state
        .cafes()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cafe {id}")))
}
