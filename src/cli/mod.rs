use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Flowise Upstream Args ---
    /// Prediction endpoint of the Flowise chatflow (e.g., http://localhost:3000/api/v1/prediction/<id>)
    #[arg(long, env = "FLOWISE_API_URL")] // No default, a missing URL is reported at startup
    pub flowise_api_url: Option<String>,

    /// Timeout in seconds for a single call to the Flowise API.
    #[arg(long, env = "FLOWISE_TIMEOUT_SECS", default_value = "120")]
    pub flowise_timeout_secs: u64,

    /// Response fields tried in order when extracting the answer (e.g., "text,answer,json").
    #[arg(long, env = "ANSWER_FIELDS", value_delimiter = ',', default_value = "text,answer,json")]
    pub answer_fields: Vec<String>,

    // --- Server Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:5001")]
    pub server_addr: String,

    /// Allow cross-origin requests from any origin.
    #[arg(long, env = "ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
