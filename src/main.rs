use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::{debug, info};

use sparql_language_server::logging::init_logger;
use sparql_language_server::lsp::backend::SparqlBackend;
use sparql_language_server::lsp::models::DID_UPDATE_COMPLETION_DATA;
use sparql_language_server::parsers::GrammarVariant;

#[derive(Parser, Debug)]
#[command(name = "sparql-language-server", version, about = "Language server for SPARQL queries")]
struct ServerArgs {
    /// Log filter for stderr output (overrides RUST_LOG), e.g. "debug" or "sparql_language_server=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    no_color: bool,

    /// Do not write a session log to the cache directory
    #[arg(long)]
    no_file_logging: bool,

    /// Grammar used when the client does not request one
    #[arg(long, default_value_t = GrammarVariant::Stardog)]
    grammar: GrammarVariant,

    /// Communicate over stdin/stdout (the only transport; accepted for editor compatibility)
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_logging)?;

    info!(
        "Starting sparql-language-server {} (default grammar: {})",
        env!("CARGO_PKG_VERSION"),
        args.grammar
    );
    if !args.stdio {
        debug!("No transport flag given, serving over stdio");
    }

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let grammar = args.grammar;
    let (service, socket) = LspService::build(|client| SparqlBackend::new(client, grammar))
        .custom_method(DID_UPDATE_COMPLETION_DATA, SparqlBackend::did_update_completion_data)
        .finish();

    // One message at a time, in arrival order.
    Server::new(stdin, stdout, socket)
        .concurrency_level(1)
        .serve(service)
        .await;

    info!("Server stopped");
    Ok(())
}
