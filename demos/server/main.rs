use actix_cors::Cors;
use dotenvy::*;
use justcheckoutstripe::{
    checkout_redirect_html, setup_logger, CheckoutRequest, KVStore, RedirectHtmlOptions,
    StripeClient,
};
mod cors;
use crate::cors::*;
mod env;
use crate::env::*;
use actix_web::{
    http::{
        header,
        uri::Uri,
        // StatusCode
    },
    middleware::Logger as ActixLogger,
    web,
    App,
    // HttpRequest,
    HttpResponse,
    HttpServer,
    Responder,
};
use log::{error, info, trace, warn};
use serde_derive::{Deserialize, Serialize};
use std::{
    // collections::{HashMap, HashSet},
    env as stdenv,
    fs::File,
    io::{
        BufRead,
        BufReader,
        Error as IOError,
        ErrorKind,
        // self,
        // Read,
    },
    path::{
        Path,
        // PathBuf
    },
    process::{
        exit,
        id as process_id,
        Command,
        // Stdio
    },
    string::String as IOString,
    vec::Vec as IOVec,
};

const VERSION: &str = stdenv!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = stdenv!("CARGO_PKG_DESCRIPTION");
const NAME: &str = stdenv!("CARGO_PKG_NAME");

/// POST /checkout-page body. `public_key` overrides the env-configured client key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutPageBody {
    public_key: Option<String>,
    input: CheckoutRequest,
    options: Option<RedirectHtmlOptions>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutPageCreated {
    reference: String,
    page_url: String,
}

#[derive(Deserialize)]
struct OutcomeQuery {
    url: String,
}

#[derive(Serialize)]
struct NavigationOutcome {
    reference: String,
    outcome: &'static str,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

async fn post_checkout_page(
    item: web::Json<CheckoutPageBody>,
    client: web::Data<StripeClient>,
    store: web::Data<KVStore>,
) -> impl Responder {
    let body = item.0;
    let public_key = body
        .public_key
        .unwrap_or_else(|| client.publishable_key.clone());
    match checkout_redirect_html(&public_key, Some(&body.input), body.options.as_ref()) {
        Ok(html) => {
            let reference = body.input.reference_id().to_string();
            store.set(&format!("page:{}", reference), html).await;
            // The raw input stays alongside the page so /outcome can classify
            // navigation URLs against its success/cancel URLs later.
            match serde_json::to_string(&body.input) {
                Ok(input_json) => store.set(&format!("input:{}", reference), input_json).await,
                Err(e) => warn!("Could not store checkout input for {}: {}", reference, e),
            }
            info!("Rendered checkout page for {}", reference);
            HttpResponse::Created().json(CheckoutPageCreated {
                page_url: format!("/checkout-page/{}", reference),
                reference,
            })
        }
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

async fn get_checkout_page(path: web::Path<String>, store: web::Data<KVStore>) -> impl Responder {
    let reference = path.into_inner();
    match store.get(&format!("page:{}", reference)).await {
        Some(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        None => HttpResponse::NotFound().body(format!("Error: no checkout page for {}", reference)),
    }
}

async fn get_checkout_outcome(
    path: web::Path<String>,
    query: web::Query<OutcomeQuery>,
    store: web::Data<KVStore>,
) -> impl Responder {
    let reference = path.into_inner();
    let stored = match store.get(&format!("input:{}", reference)).await {
        Some(json) => json,
        None => {
            return HttpResponse::NotFound()
                .body(format!("Error: no checkout input for {}", reference))
        }
    };
    match serde_json::from_str::<CheckoutRequest>(&stored) {
        Ok(input) => {
            let outcome = input.navigation_outcome(&query.url);
            HttpResponse::Ok().json(NavigationOutcome {
                reference,
                outcome: outcome.as_str(),
            })
        }
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

async fn success_landing() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<html><body><h1>Payment complete</h1><p>You can close this window.</p></body></html>")
}

async fn cancel_landing() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<html><body><h1>Checkout canceled</h1><p>No charge was made.</p></body></html>")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let this_script_relative_path = stdenv::args().next().unwrap_or_default();
    let this_script_name = Path::new(&this_script_relative_path)
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
        .to_owned();

    // Initialize the logger
    setup_logger();

    // Load .env .env_cors files and log error if not found
    load_env_file();
    check_env_cors();

    dotenv().ok();

    info!(
        "\x1b[01;35m # THIS SCRIPT NAME\x1b[38;5;93m:\x1b[38;5;1m {}",
        this_script_name
    );
    info!("{} v{}: {}", NAME, VERSION, DESCRIPTION);
    info!("PID: {}", std::process::id());

    let target_port = load_env_var("PORT", "8081");
    let target_host = load_env_var("HOST", "127.0.0.1");
    let target_server = format!("{}:{}", target_host, target_port);

    let mut cors_failed = false;
    let cors_origins = match load_and_validate_cors_origins(".env_cors") {
        Ok(origins) => {
            info!("CORS origins loaded successfully.");
            origins
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            cors_failed = true;
            let pwd = stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
            warn!(
                ".env_cors not found in {:?}; falling back to permissive CORS.",
                pwd.display()
            );
            vec![]
        }
        Err(e) => {
            error!("Failed to load or validate all CORS origins: {}", e);
            exit(1);
        }
    };
    info!("Allowed cors_origins: {:?}", cors_origins);
    trace!("cors_failed: {:?}", cors_failed);

    // Probe the port before actix binds, with a PID hint when lsof exists.
    if std::net::TcpListener::bind(&target_server).is_err() {
        error!("Port {} is already in use.", target_port);
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("lsof -i :{} -t -sTCP:LISTEN", target_port))
            .output();
        match output {
            Ok(output) if !output.stdout.is_empty() => {
                let pid = String::from_utf8_lossy(&output.stdout).trim().to_string();
                info!("PID using port {}: {}", target_port, pid);
            }
            _ => error!("Could not determine the process using port {}", target_port),
        }
        exit(52);
    }

    let publishable_key = load_env_var("STRIPE_PUBLISHABLE_KEY", "");
    if publishable_key.is_empty() {
        warn!("STRIPE_PUBLISHABLE_KEY is empty; POST /checkout-page needs publicKey in the body.");
    }
    let client = web::Data::new(StripeClient::from_key(publishable_key));
    let store = web::Data::new(KVStore::new());

    let server_pid = process_id();
    info!("Server starting with PID: {}", server_pid);

    let server = HttpServer::new(move || {
        let cors = if cors_origins.is_empty() {
            Cors::permissive()
        } else {
            cors_origins.iter().fold(
                Cors::default()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        header::AUTHORIZATION,
                        header::ACCEPT,
                        header::CONTENT_TYPE,
                    ])
                    .supports_credentials()
                    .max_age(3600),
                |cors, origin| cors.allowed_origin(origin),
            )
        };
        trace!("cors: {:?}", cors);

        App::new()
            .wrap(ActixLogger::default())
            .wrap(cors)
            .app_data(client.clone())
            .app_data(store.clone())
            .configure(|cfg| {
                cfg.route("/health", web::get().to(health))
                    .route("/checkout-page", web::post().to(post_checkout_page))
                    .route("/checkout-page/{reference}", web::get().to(get_checkout_page))
                    .route(
                        "/checkout-page/{reference}/outcome",
                        web::get().to(get_checkout_outcome),
                    )
                    .route("/success", web::get().to(success_landing))
                    .route("/cancel", web::get().to(cancel_landing));
            })
    })
    .bind(&target_server)?
    .run();

    info!("Server running at http://{} ", target_server);

    let execution = server.await;

    info!("Worker stopped with PID: {}", process_id());

    if let Err(e) = execution {
        error!("Failed to start the server: {:?}", e);
        return Err(e);
    }

    Ok(())
}
