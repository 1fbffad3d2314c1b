use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{FromRequest, Path, Request, State},
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse},
};
use catalog::{Catalog, HtmlPage, ProductCollection, Region, RngSource, render_catalog};
use tracing::{info, warn};

use crate::{
    contact::{ContactForm, ContactReply},
    error::AppError,
    state::AppState,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ContactReply>, AppError> {
    let enquiry = read_form(request).await?.validate()?;

    let mail = enquiry.to_mail(&state.config.from_email, &state.config.to_email)?;
    state.mailer.send(&mail).await?;

    info!("Contact enquiry from {}", enquiry.email);

    if let Some(submissions) = &state.submissions {
        if let Err(e) = submissions.record(&enquiry).await {
            warn!("Failed to record submission: {e}");
        }
    }

    Ok(Json(ContactReply::sent()))
}

async fn read_form(request: Request) -> Result<ContactForm, AppError> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

    if is_form {
        let Form(form) = Form::<ContactForm>::from_request(request, &())
            .await
            .map_err(|_| AppError::MalformedPayload)?;

        return Ok(form);
    }

    let Json(form) = Json::<ContactForm>::from_request(request, &())
        .await
        .map_err(|_| AppError::MalformedPayload)?;

    Ok(form)
}

pub async fn products_handler(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(state.catalog.clone())
}

pub async fn fragment_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let region: Region = slug.parse()?;
    let (html, visible) = render_region(&state.catalog.products, region);

    Ok(([("x-region-visible", visible.to_string())], Html(html)))
}

/// Related picks are reshuffled on every call.
fn render_region(products: &ProductCollection, region: Region) -> (String, bool) {
    let mut page = HtmlPage::full();
    render_catalog(products, &mut page, &mut RngSource::thread());

    (
        page.region_html(region).unwrap_or_default(),
        page.is_visible(region),
    )
}
