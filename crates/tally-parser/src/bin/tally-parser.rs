use std::env;
use std::fs;
use std::io;
use std::process;
use tally_parser::{check_str, TraceSink};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.tly>", args[0]);
        eprintln!();
        eprintln!("Check a Tally file and print its parse trace");
        process::exit(1);
    }

    let filename = &args[1];

    // Read file
    let input = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    // Parse, tracing to stdout as we go
    let stdout = io::stdout();
    let mut sink = TraceSink::new(stdout.lock());
    let result = check_str(&input, &mut sink);

    if let Err(e) = sink.finish() {
        eprintln!("Error writing trace: {}", e);
        process::exit(1);
    }

    if let Err(e) = result {
        eprintln!("{}", e.render_chain());
        process::exit(1);
    }
}
