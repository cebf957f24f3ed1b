use std::env;
use std::io::{self, BufRead};

use farmq_classify::ClassifierContext;
use farmq_core::config::Config;
use farmq_core::domains::CategorySet;
use farmq_embed::get_default_embedder;
use farmq_summarize::summarize;
use tracing::info;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <classify|summarize|ask> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "classify" => {
            let question = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: farmq classify \"<question>\"");
                std::process::exit(1)
            });
            let ctx = build_classifier(&config)?;
            println!("{}", ctx.classify(&question)?);
        }
        "summarize" => {
            // one snippet per stdin line, as handed over by the search caller
            let snippets = read_snippets()?;
            println!("{}", summarize(&snippets));
        }
        "ask" => {
            let question = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: farmq ask \"<question>\" < snippets.txt");
                std::process::exit(1)
            });
            let ctx = build_classifier(&config)?;
            let domain = ctx.classify(&question)?;
            println!("Domain: {}", domain);
            let snippets = read_snippets()?;
            println!("{}", summarize(&snippets));
        }
        other => {
            eprintln!("Unknown command '{}'. Expected classify, summarize, or ask.", other);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn build_classifier(config: &Config) -> anyhow::Result<ClassifierContext> {
    let overrides = config.domain_overrides()?;
    if !overrides.is_empty() {
        info!(rows = overrides.len(), "enriching category set from config");
    }
    let categories = CategorySet::builder()
        .overrides(overrides.into_iter().map(|o| (o.label, o.keywords)))
        .build()?;
    let embedder = get_default_embedder()?;
    ClassifierContext::new(embedder, categories)
}

fn read_snippets() -> anyhow::Result<Vec<String>> {
    let mut snippets = Vec::new();
    for line in io::stdin().lock().lines() {
        snippets.push(line?);
    }
    Ok(snippets)
}
