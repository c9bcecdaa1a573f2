//! Tokenize stdin and print each event.
//!
//! Input is fed in small chunks to exercise the streaming path:
//!
//! ```sh
//! echo '<a href="x">hi</a>' | cargo run --example stdin_tokens
//! ```

use std::io::Read;

use tagstream_core::{Event, Tokenizer};

fn main() {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("stdin is not valid UTF-8");

    let mut tok = Tokenizer::new();
    let mut sink = |event: Event| match event {
        Event::Open { name, attrs } => {
            print!("Open  {}", name);
            for (k, v) in attrs.iter() {
                print!(" {}={:?}", k, v);
            }
            println!();
        }
        Event::Close { name } => println!("Close {}", name),
        Event::Text { content } => println!("Text  {:?}", content),
    };

    // deliberately tiny chunks; the event stream is identical either way
    let mut rest = input.as_str();
    while !rest.is_empty() {
        let mut cut = rest.len().min(4);
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (chunk, tail) = rest.split_at(cut);
        tok.feed(chunk, &mut sink);
        rest = tail;
    }
    tok.finish(&mut sink);
}
