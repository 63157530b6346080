use std::env;
use std::fs;
use wc_analytics::{AnalysisOptions, EmojiTables, analyze_string};

fn main() {
    let args: Vec<String> = env::args().collect();
    let file_path = &args[1];
    let content = fs::read_to_string(file_path).expect("Something went wrong reading the file");

    // An optional second argument points at a TOML file with emoji tables.
    let tables = match args.get(2) {
        Some(path) => {
            let toml = fs::read_to_string(path).expect("Something went wrong reading the tables");
            EmojiTables::from_toml_str(&toml).expect("Invalid emoji tables")
        }
        None => EmojiTables::default(),
    };

    let options = AnalysisOptions {
        allow_all_participants: true,
        tables,
        ..Default::default()
    };

    match analyze_string(&content, Some(options)) {
        Ok(analysis) => println!("{}", serde_json::to_string_pretty(&analysis).unwrap()),
        Err(err) => eprintln!("{}", err),
    }
}
