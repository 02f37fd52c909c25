//! HTTP handlers and the small helpers they share.

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::query::COMPANIES_RESOURCE;
use crate::dto::companies::CompaniesQuery;
use crate::navigation::{Action, HistoryMode, NavigateRequest, Navigator, UrlNavigator};
use crate::views::ViewId;

pub mod companies;

const VIEW_SESSION_KEY: &str = "companies_view";

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Template context with pending flash alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Parses a list query, falling back to the defaults when it is malformed.
pub fn parse_list_query(raw: &str) -> CompaniesQuery {
    serde_html_form::from_str(raw.trim_start_matches('?')).unwrap_or_else(|err| {
        log::debug!("Ignoring malformed list query '{raw}': {err}");
        CompaniesQuery::default()
    })
}

/// Re-encodes a user supplied list query, dropping anything unknown.
pub fn sanitize_query(raw: &str) -> String {
    parse_list_query(raw).to_query_string()
}

/// Location of `action` carrying the list state encoded in `raw`.
pub fn action_location<N>(navigator: &N, action: Action, raw: &str) -> String
where
    N: Navigator + ?Sized,
{
    let request = NavigateRequest {
        resource: COMPANIES_RESOURCE,
        action,
        preserve_query: true,
        mode: HistoryMode::Push,
    };
    navigator.navigate(&request, &sanitize_query(raw)).location
}

/// List location restoring the state encoded in `raw`.
pub fn list_location(raw: &str) -> String {
    action_location(&UrlNavigator::default(), Action::List, raw)
}

/// View id stored in the session, created on first visit.
pub fn session_view_id(session: &Session) -> ViewId {
    match session.get::<ViewId>(VIEW_SESSION_KEY) {
        Ok(Some(view_id)) => view_id,
        Ok(None) | Err(_) => {
            let view_id = ViewId::new();
            if let Err(err) = session.insert(VIEW_SESSION_KEY, view_id) {
                log::error!("Failed to store list view in session: {err}");
            }
            view_id
        }
    }
}
