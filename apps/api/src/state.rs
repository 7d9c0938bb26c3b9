use std::sync::Arc;

use crate::auth::Credentials;
use crate::llm_client::TextGenerator;
use crate::render::assets::LogoSource;
use crate::render::table::MissingSeparator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: `LlmClient`.
    pub generator: Arc<dyn TextGenerator>,
    /// The only identity the basic-auth gate accepts.
    pub credentials: Arc<Credentials>,
    pub render: RenderSettings,
}

/// Everything the renderers need that is not part of the request body.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub logo: LogoSource,
    pub missing_separator: MissingSeparator,
}
