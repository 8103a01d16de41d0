use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::Html,
};
use tracing::{debug, warn};

use crate::{
    AppState,
    catalog::Catalog,
    error::{AppResult, CatalogError},
    models::{Action, ActionForm, IdList, ListQuery, MoviePage, Notice},
    templates::{self, ListingView},
};

pub async fn list(State(state): State<Arc<AppState>>, Query(q): Query<ListQuery>) -> Html<String> {
    let mut notices = Vec::new();
    if let Some(action) = q.action() {
        notices.push(run_action(&state.catalog, action).await);
    }
    render(&state.catalog, &q, notices).await
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
    Form(form): Form<ActionForm>,
) -> Html<String> {
    let mut notices = Vec::new();
    if let Some(action) = q.action() {
        notices.push(run_action(&state.catalog, action).await);
    }
    notices.extend(run_form(&state.catalog, &form).await);
    render(&state.catalog, &q, notices).await
}

pub async fn health(State(state): State<Arc<AppState>>) -> AppResult<&'static str> {
    state.catalog.ping().await?;
    Ok("ok")
}

async fn run_action(catalog: &Catalog, action: Action) -> Notice {
    match action {
        Action::DeleteAll => outcome(catalog.delete_all().await, |n| format!("Deleted all {n} movies.")),
        Action::RandomAll => {
            outcome(catalog.randomize(None).await, |n| format!("Randomized stats for {n} movies."))
        },
    }
}

async fn run_form(catalog: &Catalog, form: &ActionForm) -> Vec<Notice> {
    let mut notices = Vec::new();

    if let Some(ids) = form.delete_movies.as_deref().and_then(|raw| decode_ids("delete_movies", raw)) {
        notices.push(outcome(catalog.delete_many(&ids).await, |n| format!("Deleted {n} movies.")));
    }

    if let Some(ids) = form.random_movies.as_deref().and_then(|raw| decode_ids("random_movies", raw)) {
        notices.push(outcome(catalog.randomize(Some(&ids)).await, |n| {
            format!("Randomized stats for {n} movies.")
        }));
    }

    if let Some(id) = form.single_delete_id() {
        notices.push(outcome(catalog.delete_one(id).await, |_| format!("Deleted movie #{id}.")));
    }

    notices
}

/// Malformed or empty lists are skipped without a banner.
fn decode_ids(field: &str, raw: &str) -> Option<IdList> {
    match IdList::parse(raw) {
        Ok(ids) => Some(ids),
        Err(err) => {
            debug!(field, error = %err, "ignoring id list");
            None
        },
    }
}

fn outcome(res: Result<u64, CatalogError>, success: impl FnOnce(u64) -> String) -> Notice {
    match res {
        Ok(n) => Notice::Success(success(n)),
        Err(err) => {
            warn!(error = %err, "catalog operation failed");
            Notice::Error(err.to_string())
        },
    }
}

async fn render(catalog: &Catalog, q: &ListQuery, mut notices: Vec<Notice>) -> Html<String> {
    let params = q.params();

    let detail = match q.detail_id() {
        Some(id) => match catalog.get(id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(movie_id = id, error = %err, "failed to load movie");
                notices.push(Notice::Error(err.to_string()));
                None
            },
        },
        None => None,
    };

    let page = match catalog.list(&params).await {
        Ok(page) => page,
        Err(err) => {
            warn!(error = %err, "failed to list movies");
            notices.push(Notice::Error(err.to_string()));
            MoviePage::new(&params, 0, Vec::new())
        },
    };

    Html(templates::listing_page(&ListingView {
        params: &params,
        page: &page,
        notices: &notices,
        detail: detail.as_ref(),
    }))
}
