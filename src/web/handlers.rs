use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{info, warn};

use crate::{
    core::{ContactForm, UpdateContactForm},
    validation::{self, Verdict},
    web::{
        Result, WebError, flash, render,
        state::AppState,
        templates::{
            AboutPage, AddContactPage, ContactListPage, DetailPage, EditContactPage, ErrorPage,
            HomePage,
        },
    },
};

const CONTACT_LIST_PATH: &str = "/contact";

pub async fn home() -> Result<Html<String>> {
    render(&HomePage { title: "Home" })
}

pub async fn about() -> Result<Html<String>> {
    render(&AboutPage { title: "About" })
}

pub async fn list_contacts(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let contacts = state.store.load_all().await?;

    let token = flash::token_from_headers(&headers);
    let message = match token {
        Some(token) => state.flash.take(token).await,
        None => None,
    };

    let mut response = render(&ContactListPage {
        title: "Contact",
        contacts,
        message,
    })?
    .into_response();

    if token.is_some() {
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_static(flash::clear_cookie()),
        );
    }
    Ok(response)
}

pub async fn add_form() -> Result<Html<String>> {
    render(&AddContactPage::blank())
}

pub async fn create_contact(
    State(state): State<AppState>,
    form: std::result::Result<Form<ContactForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    match validation::check_new(state.store.as_ref(), form).await? {
        Verdict::Rejected(rejection) => {
            warn!(
                name = %rejection.submitted.name,
                violations = rejection.violations.len(),
                "rejected new contact"
            );
            let page = AddContactPage::with_errors(rejection.violations, rejection.submitted);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response())
        }
        Verdict::Accepted(contact) => {
            let message = format!("Contact {} was added.", contact.name);
            state.store.insert(contact).await?;
            Ok(redirect_with_flash(&state, message).await)
        }
    }
}

/// An unknown name renders an empty form rather than failing the request.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>> {
    let form = state
        .store
        .find_by_name(&name)
        .await?
        .map(|contact| UpdateContactForm::from_contact(&contact))
        .unwrap_or_default();

    render(&EditContactPage::with_errors(Vec::new(), form))
}

pub async fn update_contact(
    State(state): State<AppState>,
    form: std::result::Result<Form<UpdateContactForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    match validation::check_update(state.store.as_ref(), form).await? {
        Verdict::Rejected(rejection) => {
            warn!(
                prior_name = %rejection.submitted.prior_name,
                violations = rejection.violations.len(),
                "rejected contact update"
            );
            let page = EditContactPage::with_errors(rejection.violations, rejection.submitted);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response())
        }
        Verdict::Accepted(update) => {
            let message = format!("Contact {} was updated.", update.contact.name);
            state.store.update(&update.prior_name, update.contact).await?;
            Ok(redirect_with_flash(&state, message).await)
        }
    }
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let Some(contact) = state.store.find_by_name(&name).await? else {
        warn!(name = %name, "delete of unknown contact");
        return Err(WebError::not_found("contact name not found!"));
    };

    state.store.delete_by_name(&contact.name).await?;
    let message = format!("Contact {} was deleted.", contact.name);
    Ok(redirect_with_flash(&state, message).await)
}

/// An unknown name renders the detail view with an empty contact.
pub async fn contact_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>> {
    let contact = state.store.find_by_name(&name).await?;
    render(&DetailPage {
        title: "Contact Detail",
        found: contact.is_some(),
        contact: contact.unwrap_or_default(),
    })
}

pub async fn not_found() -> Result<(StatusCode, Html<String>)> {
    let page = ErrorPage {
        title: "Error 404".to_string(),
        message: "The page you are looking for does not exist.".to_string(),
    };
    Ok((StatusCode::NOT_FOUND, render(&page)?))
}

async fn redirect_with_flash(state: &AppState, message: String) -> Response {
    info!(message = %message, "contact mutation committed");
    let token = state.flash.push(message).await;
    (
        [(header::SET_COOKIE, state.flash.cookie(token))],
        Redirect::to(CONTACT_LIST_PATH),
    )
        .into_response()
}
