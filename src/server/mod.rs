//! Development server
//!
//! Resolves every page request on demand, so edits to markdown files show
//! up on the next refresh without a rebuild step. Non-page paths (images,
//! stylesheets) are served straight from the content directory.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::content::{PageResolver, RenderError};
use crate::Site;

/// Server state
struct ServerState {
    resolver: PageResolver,
    content_dir: PathBuf,
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        resolver: site.resolver(),
        content_dir: site.content_dir.clone(),
    });

    let app = Router::new().fallback(page_handler).with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Pages are rendered per request; edits show up on refresh.");
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Fallback handler: extension-less paths resolve as pages, anything with
/// a file extension is served as a static asset from the content dir
async fn page_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let decoded = percent_decode_str(request.uri().path()).decode_utf8_lossy();
    let trimmed = decoded.trim_matches('/').to_string();

    if has_extension(&trimmed) {
        let mut service = ServeDir::new(&state.content_dir);
        return match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        };
    }

    let slug: Vec<String> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').map(str::to_string).collect()
    };

    match state.resolver.resolve(&slug) {
        Ok(payload) => Html(payload.content).into_response(),
        Err(RenderError::NotFound(path)) => {
            tracing::debug!("Not found: {}", path);
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            // Malformed pages read as missing, not as server crashes
            tracing::warn!("Failed to render /{}: {}", trimmed, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn has_extension(path: &str) -> bool {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.contains('.'))
        .unwrap_or(false)
}
