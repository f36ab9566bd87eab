use anyhow::Result;
use clap::Parser;
use colored::*;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

// Import from our modular crates
use docq_cli::{IntentHandler, QuoteHandler, display_banner, is_exit, read_line};
use docq_core::{Document, DocumentIndexer, EmbeddingProvider, RagEngine, VectorStore};
use docq_openai::OpenAiClient;
use docq_rag::{
    ChunkIndexer, DocumentRagEngine, LocalVectorStore, QdrantVectorStore, document_from_pdf,
};

#[derive(Parser)]
#[command(name = "docq")]
#[command(about = "Document-grounded Q&A over your PDFs", long_about = None)]
struct Cli {
    /// PDF files to ingest before the conversation starts
    docs: Vec<PathBuf>,

    /// Ask a single question and exit instead of starting the REPL
    #[arg(short, long)]
    question: Option<String>,

    /// Vector store collection name
    #[arg(long)]
    collection: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Startup failures (missing credential, unreachable store) abort here;
    // everything after this point is caught per chunk or per turn.
    let client = Arc::new(OpenAiClient::from_env()?);

    let store: Arc<dyn VectorStore> = match env::var("DOCQ_QDRANT_URL") {
        Ok(url) => {
            let store = QdrantVectorStore::connect(&url, client.dimension()).await?;
            println!("{} Connected to Qdrant at {}", "✅".green(), url);
            Arc::new(store)
        }
        Err(_) => Arc::new(LocalVectorStore::new()),
    };

    let collection = cli
        .collection
        .or_else(|| env::var("DOCQ_COLLECTION").ok())
        .unwrap_or_else(|| "pdf_collection".to_string());

    let indexer = ChunkIndexer::new(client.clone(), store.clone(), collection.clone());

    // Ingest everything before the first turn; a bad document is reported
    // and skipped, a bad chunk is already handled inside the indexer.
    let mut quote_documents: Vec<Document> = Vec::new();
    for path in &cli.docs {
        match document_from_pdf(path) {
            Ok(document) => {
                quote_documents.push(document.clone());
                if let Err(e) = indexer.index_document(document).await {
                    eprintln!("{} failed to index '{}': {}", "❌".red(), path.display(), e);
                }
            }
            Err(e) => eprintln!("{} {}", "❌".red(), e),
        }
    }

    let engine = DocumentRagEngine::new(client.clone(), store, client.clone(), collection);
    let handlers: Vec<Box<dyn IntentHandler>> =
        vec![Box::new(QuoteHandler::new(client, quote_documents))];

    if let Some(question) = cli.question {
        let reply = answer_turn(&engine, &handlers, &question).await?;
        println!("{}", reply);
        return Ok(());
    }

    display_banner();

    loop {
        let Some(input) = read_line("docq>")? else {
            break;
        };

        if input.is_empty() {
            continue;
        }

        if is_exit(&input) {
            println!("{}", "👋 Hasta luego!".green());
            break;
        }

        match answer_turn(&engine, &handlers, &input).await {
            Ok(reply) => println!("{} {}", "🤖".blue(), reply),
            Err(e) => println!("{} Turn failed: {}", "❌".red(), e),
        }
    }

    Ok(())
}

/// One conversational turn: intent handlers get first claim on the input,
/// everything else goes through the RAG engine.
async fn answer_turn(
    engine: &DocumentRagEngine,
    handlers: &[Box<dyn IntentHandler>],
    input: &str,
) -> docq_core::Result<String> {
    for handler in handlers {
        if handler.matches(input) {
            return handler.handle(input).await;
        }
    }
    engine.answer(input).await
}
