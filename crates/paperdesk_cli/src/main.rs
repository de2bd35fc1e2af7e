//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `paperdesk_core` linkage without any UI host.
//! - Run the heuristic analyzers once over the text given as arguments.

use paperdesk_core::{ContentEngine, EngineConfig, MemoryCollectionStore};

const SAMPLE_TEXT: &str = "Sleep supports memory consolidation. Memory traces replay during sleep. \
Consolidation strengthens memory over time.";

fn main() {
    println!("paperdesk_core ping={}", paperdesk_core::ping());
    println!("paperdesk_core version={}", paperdesk_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        SAMPLE_TEXT.to_string()
    } else {
        args.join(" ")
    };

    let engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    match engine.analyze_paragraph(&text) {
        Ok(result) => println!("coherence score={} rating={:?}", result.score, result.rating()),
        Err(err) => {
            eprintln!("analysis failed: {err}");
            std::process::exit(1);
        }
    }
    match engine.extract_keywords(&text) {
        Ok(keywords) => {
            for keyword in keywords {
                println!(
                    "keyword={} frequency={} relevance={}",
                    keyword.keyword, keyword.frequency, keyword.relevance
                );
            }
        }
        Err(err) => {
            eprintln!("keyword extraction failed: {err}");
            std::process::exit(1);
        }
    }
}
