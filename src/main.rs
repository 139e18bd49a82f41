use std::io::{self, Write};
use wordcalc::{eval_tree, parse, MakeOperators, WordOpsFactory};

/// Longest accepted input line; everything beyond is cut off before parsing.
const MAX_LINE_CHARS: usize = 99;

fn truncated(line: &str) -> &str {
    match line.char_indices().nth(MAX_LINE_CHARS) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let ops = WordOpsFactory::<f64>::make();
    loop {
        stdout.write_all(b"> ")?;
        stdout.flush()?;
        buffer.clear();
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(());
        }
        let line = truncated(buffer.trim_end());
        match parse(line, &ops) {
            Ok(tree) => {
                let result = eval_tree(&tree);
                if result.is_nan() {
                    eprintln!("undefined result, probably a division by a near-zero value");
                } else {
                    println!("{}", result);
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
