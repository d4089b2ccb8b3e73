use std::io::{self, BufRead, Write};

use bharatshop_agent::{AssistedEngine, ChatSession, GeminiClient, TurnOutcome};
use bharatshop_core::{AppConfig, RecommendationEngine};

use super::CommandResult;

/// Interactive loop over stdin. Each line is one chat turn; `exit` or EOF
/// ends the session.
pub async fn run(config: &AppConfig) -> CommandResult {
    let engine = RecommendationEngine::with_demo_catalog(config.recommender.assisted());
    let analyzer = match GeminiClient::new(config.gemini.clone()) {
        Ok(analyzer) => analyzer,
        Err(error) => return CommandResult::failure(format!("gemini client error: {error}")),
    };
    let replies = match GeminiClient::new(config.gemini.clone()) {
        Ok(client) => client,
        Err(error) => return CommandResult::failure(format!("gemini client error: {error}")),
    };

    if !analyzer.enabled() {
        println!("(no GEMINI_API_KEY set; replies and analysis run locally)");
    }

    let mut session = ChatSession::new(AssistedEngine::new(engine, analyzer), replies);
    let stdin = io::stdin();

    println!("BharatShop assistant. Ask for products, or type 'exit' to quit.");
    loop {
        print!("you> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => return CommandResult::failure(format!("stdin error: {error}")),
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        let outcome = session.send(message).await;
        if let Some(reply) = session.last_reply() {
            println!("\nbot> {}", reply.text);
            print!("{}", super::render_products(&reply.recommendations));
        }
        if outcome == (TurnOutcome::Replied { rate_limited: true }) {
            println!("(AI analysis rate limited; results are keyword-based)");
        }
        println!();
    }

    CommandResult::ok("Goodbye!".to_string())
}
