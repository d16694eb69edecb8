//! Demo web form for the normalization pipeline.
//!
//! One page: paste text, submit, see the original and the cleaned result
//! side by side. No persistence, no sessions; each request calls
//! [`ungremlin::normalize`] synchronously and echoes both strings back.

use axum::{response::Html, routing::get, Form, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

const LISTEN_ADDR: &str = "127.0.0.1:8080";
const HEALTHZ_STATUS: &str = "ok";

#[derive(Debug, Error)]
enum ServerError {
    #[error("invalid listen address `{address}`: {source}")]
    InvalidListenAddr {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CleanForm {
    #[serde(default)]
    input_text: String,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    let addr: SocketAddr =
        LISTEN_ADDR
            .parse()
            .map_err(|source| ServerError::InvalidListenAddr {
                address: LISTEN_ADDR.to_string(),
                source,
            })?;

    let app = Router::new()
        .route("/", get(index).post(submit))
        .route("/healthz", get(healthz));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: LISTEN_ADDR.to_string(),
            source,
        })?;

    tracing::info!(%addr, "ungremlin demo form listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve { source })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("ctrl-c handler unavailable, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn healthz() -> &'static str {
    HEALTHZ_STATUS
}

async fn index() -> Html<String> {
    Html(render_page(None))
}

async fn submit(Form(form): Form<CleanForm>) -> Html<String> {
    let cleaned = ungremlin::normalize(&form.input_text);
    Html(render_page(Some((&form.input_text, &cleaned))))
}

fn render_page(result: Option<(&str, &str)>) -> String {
    let input_value = result.map(|(original, _)| original).unwrap_or_default();

    let comparison = match result {
        Some((original, cleaned)) => format!(
            "<section class=\"result\">\n\
             <div><h2>Original</h2><pre>{}</pre></div>\n\
             <div><h2>Cleaned</h2><pre>{}</pre></div>\n\
             </section>",
            html_escape::encode_text(original),
            html_escape::encode_text(cleaned),
        ),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>ungremlin</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }}\n\
         textarea {{ width: 100%; height: 10rem; }}\n\
         .result {{ display: flex; gap: 2rem; }}\n\
         .result div {{ flex: 1; }}\n\
         pre {{ white-space: pre-wrap; background: #f4f4f4; padding: 1rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>ungremlin</h1>\n\
         <p>Paste text to repair mojibake, strip invisible characters and AI\n\
         artifacts, and normalize whitespace.</p>\n\
         <form method=\"post\" action=\"/\">\n\
         <textarea name=\"input_text\">{}</textarea>\n\
         <p><button type=\"submit\">Clean</button></p>\n\
         </form>\n\
         {}\n\
         </body>\n\
         </html>",
        html_escape::encode_text(input_value),
        comparison,
    )
}
