pub mod binder;
pub mod columns;
pub mod currency;
pub mod domain;
pub mod navigation;
pub mod pagination;
pub mod provider;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod views;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::navigation::UrlNavigator;
    use crate::provider::graphql::GraphQlProvider;
    use crate::routes::companies::{
        confirm_delete_company, create_company, create_company_page, delete_company,
        edit_company_page, index, save_company, show_companies,
    };
    use crate::views::ListViews;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let provider = GraphQlProvider::new(
            server_config.graphql_url.clone(),
            server_config.graphql_token.clone(),
            Duration::from_secs(server_config.request_timeout_secs),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to build GraphQL client: {e}")))?;
        let provider = web::Data::new(provider);

        let views = web::Data::new(ListViews::new(server_config.max_list_views));
        let navigator = web::Data::new(UrlNavigator::default());

        // Keys and stores for sessions and flash messages.
        if server_config.secret.len() < 64 {
            return Err(std::io::Error::other(
                "Secret must be at least 64 bytes long",
            ));
        }
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving companies on {}:{} against {}",
            bind_address.0,
            bind_address.1,
            server_config.graphql_url
        );

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(index)
                .service(show_companies)
                .service(create_company_page)
                .service(create_company)
                .service(edit_company_page)
                .service(save_company)
                .service(confirm_delete_company)
                .service(delete_company)
                .app_data(web::Data::new(tera.clone()))
                .app_data(provider.clone())
                .app_data(views.clone())
                .app_data(navigator.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
