use std::process::exit;

use wasteless_search_client::query::QueryBuilder;
use wasteless_search_client::{Result, SearchParams};

fn main() -> Result<()> {
    // Expect the search endpoint as the first argument
    // and the words to search for after it
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <endpoint_url> <word> [word ...]", args[0]);
        exit(1);
    }

    // Any of the given words may match
    let mut builder = QueryBuilder::new();
    for word in &args[2..] {
        builder = builder.or_word(word.as_str());
    }

    let url = SearchParams::from_builder(&builder)?
        .page(1, 10)
        .sort("default", false)
        .to_url(&args[1])?;
    println!("{}", url);
    Ok(())
}
