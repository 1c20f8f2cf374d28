//! Print the line events of stdin.
//!
//! RUST_LOG=markstream_core=trace shows the tokenizer's own tracing.

use markstream_core::{EndOfLine, EventEmitter, ParsingData, Tokenizer};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut tokenizer = Tokenizer::from_reader(stdin.lock());
    let mut emitter = EventEmitter::new("stdin", |data: &ParsingData<'_>| println!("{data}"));

    let result = tokenizer.for_each_entry(EndOfLine, |_, line| {
        emitter.text(line);
        Ok(())
    });

    match result {
        Ok(()) => eprintln!("{} line break(s)", tokenizer.line_count()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
