//! Pluggable intent handlers that run ahead of the RAG path
//!
//! The quotation sub-flow lives here instead of inlined in the REPL loop:
//! it walks the full document text in fixed-size character windows,
//! delegates price-finding to the chat provider per window and accumulates
//! a product→price map.

use async_trait::async_trait;
use colored::*;
use std::collections::BTreeMap;
use std::sync::Arc;

use docq_core::{ChatConfig, ChatMessage, ChatProvider, Document, Result};
use docq_rag::split_chars;

/// An input interceptor checked before the default RAG turn
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Whether this handler claims the input
    fn matches(&self, input: &str) -> bool;

    /// Produce the reply for a claimed input
    async fn handle(&self, input: &str) -> Result<String>;
}

/// Extracts product/price pairs from one LLM reply.
///
/// Isolated behind a trait so the naive splitter below can later be replaced
/// with a schema-constrained parser without touching the orchestrator.
pub trait PriceParser: Send + Sync {
    fn parse(&self, reply: &str) -> Vec<(String, String)>;
}

/// Splits each non-empty reply line on the first colon.
///
/// Known fragility: a product name containing a colon lands in the wrong
/// half, and multi-line prices are not recombined.
pub struct ColonPriceParser;

impl PriceParser for ColonPriceParser {
    fn parse(&self, reply: &str) -> Vec<(String, String)> {
        reply
            .lines()
            .filter_map(|line| {
                let line = line.trim().trim_start_matches('-').trim();
                let (product, price) = line.split_once(':')?;
                let product = product.trim();
                let price = price.trim();
                if product.is_empty() || price.is_empty() {
                    return None;
                }
                Some((product.to_string(), price.to_string()))
            })
            .collect()
    }
}

const QUOTE_KEYWORDS: [&str; 5] = ["precio", "cotiza", "quote", "price", "presupuesto"];

/// Quotation intent: re-reads the full document texts and asks the LLM for
/// every product and its price, window by window.
pub struct QuoteHandler {
    chat: Arc<dyn ChatProvider>,
    parser: Box<dyn PriceParser>,
    documents: Vec<Document>,
    window: usize,
    chat_config: ChatConfig,
}

impl QuoteHandler {
    pub fn new(chat: Arc<dyn ChatProvider>, documents: Vec<Document>) -> Self {
        Self {
            chat,
            parser: Box::new(ColonPriceParser),
            documents,
            window: 3000,
            chat_config: ChatConfig::default(),
        }
    }

    pub fn with_parser(mut self, parser: Box<dyn PriceParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    fn window_prompt(window_text: &str) -> Vec<ChatMessage> {
        let prompt = format!(
            "List every product and its price found in the following text. \
             Output one line per product, formatted exactly as 'product: price'. \
             If the text contains no prices, output nothing.\n\nText:\n{}",
            window_text
        );
        vec![ChatMessage::user(prompt)]
    }
}

#[async_trait]
impl IntentHandler for QuoteHandler {
    fn matches(&self, input: &str) -> bool {
        let input = input.to_lowercase();
        QUOTE_KEYWORDS.iter().any(|keyword| input.contains(keyword))
    }

    async fn handle(&self, _input: &str) -> Result<String> {
        let mut prices: BTreeMap<String, String> = BTreeMap::new();

        for document in &self.documents {
            for window_text in split_chars(&document.content, self.window) {
                let messages = Self::window_prompt(&window_text);
                match self.chat.complete(&messages, &self.chat_config).await {
                    Ok(reply) => {
                        for (product, price) in self.parser.parse(&reply) {
                            prices.insert(product, price);
                        }
                    }
                    // One bad window loses its prices, not the whole quote.
                    Err(e) => eprintln!(
                        "{} price window of '{}' skipped: {}",
                        "⚠️".yellow(),
                        document.id,
                        e
                    ),
                }
            }
        }

        if prices.is_empty() {
            return Ok("No prices were found in the ingested documents.".to_string());
        }

        let lines: Vec<String> = prices
            .into_iter()
            .map(|(product, price)| format!("- {}: {}", product, price))
            .collect();
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedChat {
        replies: Mutex<Vec<String>>,
    }

    impl ScriptedChat {
        fn new(replies: Vec<&str>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().map(str::to_string).collect()),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedChat {
        async fn complete(&self, _messages: &[ChatMessage], _config: &ChatConfig) -> Result<String> {
            Ok(self.replies.lock().unwrap().pop().unwrap_or_default())
        }
    }

    #[test]
    fn test_colon_parser_splits_on_first_colon() {
        let parser = ColonPriceParser;
        let pairs = parser.parse("envío nacional: 12 USD\n- caja grande: 3: 50 USD\n\nnada\n");
        assert_eq!(
            pairs,
            vec![
                ("envío nacional".to_string(), "12 USD".to_string()),
                ("caja grande".to_string(), "3: 50 USD".to_string()),
            ]
        );
    }

    #[test]
    fn test_colon_parser_ignores_incomplete_lines() {
        let parser = ColonPriceParser;
        assert!(parser.parse(": 10 USD\nproducto:\n").is_empty());
    }

    #[test]
    fn test_quote_keywords_match_case_insensitively() {
        let handler = QuoteHandler::new(Arc::new(ScriptedChat::new(vec![])), vec![]);
        assert!(handler.matches("Dame el PRECIO del envío"));
        assert!(handler.matches("can you quote shipping?"));
        assert!(!handler.matches("cuándo llega mi paquete?"));
    }

    #[tokio::test]
    async fn test_quote_flow_accumulates_prices_across_windows() {
        let chat = Arc::new(ScriptedChat::new(vec![
            "caja chica: 5 USD",
            "caja grande: 9 USD\ncaja chica: 5 USD",
        ]));
        // 12-char windows split the document text into two chat calls
        let documents = vec![Document::new("tarifas", "abcdefghijkl mnopqrstuvwx")];
        let handler = QuoteHandler::new(chat, documents).with_window(12);

        let reply = handler.handle("precio de cajas").await.unwrap();
        assert_eq!(reply, "- caja chica: 5 USD\n- caja grande: 9 USD");
    }

    #[tokio::test]
    async fn test_quote_flow_with_no_prices() {
        let chat = Arc::new(ScriptedChat::new(vec![""]));
        let documents = vec![Document::new("doc", "no hay tarifas aquí")];
        let handler = QuoteHandler::new(chat, documents);

        let reply = handler.handle("precio").await.unwrap();
        assert_eq!(reply, "No prices were found in the ingested documents.");
    }
}
