use std::env;
use std::fs;
use std::io::{self, Read};
use tally_lexer::Scanner;

fn main() {
    let args: Vec<String> = env::args().collect();

    let input = if args.len() > 1 {
        // Read from file
        let filename = &args[1];
        fs::read_to_string(filename).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", filename, e);
            std::process::exit(1);
        })
    } else {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        });
        buffer
    };

    // Print tokens with 1-based line and lexeme
    for result in Scanner::new(&input) {
        match result {
            Ok(token) => {
                println!("{:?} @ {} = {:?}", token.symbol(), token.line() + 1, token.text());
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
