use codingmark_search::prelude::*;

fn main() {
    env_logger::init();

    let mut context = SearchContext::public(None);
    let mut user = None::<String>;
    let mut sort = None::<String>;
    let mut words = vec![];

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--public" => context.is_public = true,
            "--private" => context.is_public = false,
            "--any" => context.include = SearchInclude::Any,
            "--user" => user = args.next(),
            "--sort" => sort = args.next(),
            _ => words.push(arg),
        }
    }

    context.user_id = user.as_deref();
    if let Some(sort) = &sort {
        context.sort = sort.as_str();
    }

    let query = words.join(" ");
    println!("Input: '{query}'");

    let parsed = split_search_query(&query);
    println!("\nParsed:\n{parsed:#?}");
    let terms = extract_fulltext_and_special_search_terms(&parsed.terms);
    println!("\nTerms:\n{terms:#?}");

    let compiled = CompiledQuery::compile(&query, &context).expect("Failed to compile query");
    println!(
        "\nFilter:\n{}",
        serde_json::to_string_pretty(&compiled.filter).expect("Failed to serialize filter")
    );
    println!(
        "\nSort:\n{}",
        serde_json::to_string_pretty(&compiled.sort).expect("Failed to serialize sort")
    );
}
