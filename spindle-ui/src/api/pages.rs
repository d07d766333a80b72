//! Page routes: the collection page and the form open/cancel actions
//!
//! Mutating routes follow Post/Redirect/Get: they change state and
//! redirect to `/`, which renders from current state.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};

use crate::api::items::ItemFormBody;
use crate::render::render_page;
use crate::view::build_view;
use crate::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.read().await;
    let covers = state.covers.read().await;
    let form = state.form.read().await;

    let view = build_view(store.items(), &covers);
    Html(render_page(&view, &form))
}

/// POST /form/open
pub async fn open_form(State(state): State<AppState>) -> Redirect {
    state.form.write().await.open();
    Redirect::to("/")
}

/// POST /form/cancel
///
/// The cancel button submits the form fields too (formaction), so
/// whatever was typed is kept in the draft for the next open. A bare
/// request without a body just hides the form.
pub async fn cancel_form(
    State(state): State<AppState>,
    body: Option<Form<ItemFormBody>>,
) -> Redirect {
    let mut form = state.form.write().await;
    if let Some(Form(fields)) = body {
        form.update_draft(fields.into_draft());
    }
    form.cancel();
    Redirect::to("/")
}
