use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::CompanyId;
use crate::forms::companies::{AddCompanyForm, DeleteCompanyForm, SaveCompanyForm};
use crate::models::config::ServerConfig;
use crate::navigation::{Action, UrlNavigator};
use crate::provider::graphql::GraphQlProvider;
use crate::routes::{
    action_location, base_context, list_location, parse_list_query, redirect, render_template,
    sanitize_query, session_view_id,
};
use crate::services::ServiceError;
use crate::services::companies::{self as company_service, ListPresenter};
use crate::views::ListViews;

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/companies")
}

#[get("/companies")]
pub async fn show_companies(
    req: HttpRequest,
    session: Session,
    provider: web::Data<GraphQlProvider>,
    views: web::Data<ListViews>,
    navigator: web::Data<UrlNavigator>,
    server_config: web::Data<ServerConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = parse_list_query(req.query_string());
    let view_id = session_view_id(&session);
    let presenter = ListPresenter {
        currency: &server_config.currency,
        navigator: navigator.get_ref(),
    };

    let page = company_service::load_companies_page(
        provider.get_ref(),
        &views,
        view_id,
        &params,
        &presenter,
    )
    .await;

    let mut context = base_context(&flash_messages, "companies");
    context.insert("page", &page);

    render_template(&tera, "companies/index.html", &context)
}

#[get("/companies/create")]
pub async fn create_company_page(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = sanitize_query(req.query_string());

    let mut context = base_context(&flash_messages, "companies");
    context.insert("query", &query);
    context.insert("back_url", &list_location(&query));

    render_template(&tera, "companies/create.html", &context)
}

#[post("/companies/create")]
pub async fn create_company(
    provider: web::Data<GraphQlProvider>,
    navigator: web::Data<UrlNavigator>,
    web::Form(form): web::Form<AddCompanyForm>,
) -> impl Responder {
    let query = sanitize_query(&form.query);

    match company_service::create_company(provider.get_ref(), form).await {
        Ok(company) => {
            FlashMessage::success(format!("Company \"{}\" created.", company.name)).send();
            redirect(&list_location(&query))
        }
        Err(ServiceError::Form(_)) => {
            FlashMessage::error("Please check the company form.").send();
            redirect(&action_location(
                navigator.get_ref(),
                Action::Create,
                &query,
            ))
        }
        Err(err) => {
            FlashMessage::error(format!("Failed to create the company: {err}")).send();
            redirect(&list_location(&query))
        }
    }
}

#[get("/companies/edit/{company_id}")]
pub async fn edit_company_page(
    company_id: web::Path<String>,
    req: HttpRequest,
    provider: web::Data<GraphQlProvider>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = sanitize_query(req.query_string());

    let company = match company_service::load_company(provider.get_ref(), &company_id).await {
        Ok(company) => company,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Company not found.").send();
            return redirect(&list_location(&query));
        }
        Err(err) => {
            FlashMessage::error(format!("Failed to load the company: {err}")).send();
            return redirect(&list_location(&query));
        }
    };

    let mut context = base_context(&flash_messages, "companies");
    context.insert("company", &company);
    context.insert("query", &query);
    context.insert("back_url", &list_location(&query));

    render_template(&tera, "companies/edit.html", &context)
}

#[post("/companies/edit/{company_id}")]
pub async fn save_company(
    company_id: web::Path<String>,
    provider: web::Data<GraphQlProvider>,
    navigator: web::Data<UrlNavigator>,
    web::Form(form): web::Form<SaveCompanyForm>,
) -> impl Responder {
    let query = sanitize_query(&form.query);

    match company_service::update_company(provider.get_ref(), &company_id, &form).await {
        Ok(_) => {
            FlashMessage::success("Company updated.").send();
            redirect(&list_location(&query))
        }
        Err(ServiceError::Form(_)) => {
            FlashMessage::error("Please check the company form.").send();
            match CompanyId::new(company_id.as_str()) {
                Ok(id) => redirect(&action_location(
                    navigator.get_ref(),
                    Action::Edit(id),
                    &query,
                )),
                Err(_) => redirect(&list_location(&query)),
            }
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Company not found.").send();
            redirect(&list_location(&query))
        }
        Err(err) => {
            FlashMessage::error(format!("Failed to update the company: {err}")).send();
            redirect(&list_location(&query))
        }
    }
}

#[get("/companies/delete/{company_id}")]
pub async fn confirm_delete_company(
    company_id: web::Path<String>,
    req: HttpRequest,
    provider: web::Data<GraphQlProvider>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = sanitize_query(req.query_string());

    let company = match company_service::load_company(provider.get_ref(), &company_id).await {
        Ok(company) => company,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Company not found.").send();
            return redirect(&list_location(&query));
        }
        Err(err) => {
            FlashMessage::error(format!("Failed to load the company: {err}")).send();
            return redirect(&list_location(&query));
        }
    };

    let mut context = base_context(&flash_messages, "companies");
    context.insert("company", &company);
    context.insert("query", &query);
    context.insert("back_url", &list_location(&query));

    render_template(&tera, "companies/delete.html", &context)
}

#[post("/companies/delete/{company_id}")]
pub async fn delete_company(
    company_id: web::Path<String>,
    provider: web::Data<GraphQlProvider>,
    web::Form(form): web::Form<DeleteCompanyForm>,
) -> HttpResponse {
    let location = list_location(&form.query);

    match company_service::delete_company(provider.get_ref(), &company_id).await {
        Ok(()) => FlashMessage::success("Company deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Company not found.").send(),
        Err(err) => FlashMessage::error(format!("Failed to delete the company: {err}")).send(),
    }

    redirect(&location)
}
