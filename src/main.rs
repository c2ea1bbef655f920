use std::{
    env,
    fs::read_to_string,
    io::{self, Read},
    time::Instant,
};

use anyhow::{Context, Result};
use calc_parser::{source_name, translate};
use env_logger::Env;
use log::{debug, info};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    let (source, file_name) = match args.get(1) {
        Some(file_path) => {
            let source = read_to_string(file_path)
                .with_context(|| format!("Failed to read input file: {}", file_path))?;

            (source, Some(source_name(file_path)))
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read standard input")?;

            (source, None)
        }
    };

    debug!("Read {} bytes from {}", source.len(), file_name.as_deref().unwrap_or("stdin"));

    let start = Instant::now();
    let translation = translate(&source, file_name);
    info!("Parsed in {:?}", start.elapsed());

    // Syntax and lexical errors are part of the output, not a failure.
    print!("{}", translation.render());

    Ok(())
}
