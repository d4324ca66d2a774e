use std::env;
use std::fs;
use std::process;

use cifra::key::Key;
use cifra::sheet;

fn usage() -> ! {
    eprintln!("Usage: cifra <sheet.txt> <target-key> [output.txt]");
    eprintln!("       cifra --from <origin-key> <sheet.txt> <target-key> [output.txt]");
    eprintln!();
    eprintln!("Without --from, the origin key is read from the sheet's frontmatter");
    eprintln!("'tom:' field; a sheet with neither is passed through untransposed.");
    process::exit(1);
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let args: Vec<String> = env::args().collect();

    let mut origin: Option<&String> = None;
    let mut rest: &[String] = &args[1..];
    if rest.first().map(String::as_str) == Some("--from") {
        if rest.len() < 2 {
            usage();
        }
        origin = Some(&rest[1]);
        rest = &rest[2..];
    }
    if rest.len() < 2 {
        usage();
    }
    let input_path = &rest[0];
    let target = &rest[1];
    let output_path = rest.get(2);

    let raw = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let (meta, body) = match sheet::document_meta(&raw) {
        Ok(split) => split,
        Err(e) => {
            eprintln!("Error in '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let origin_key = match origin {
        Some(spelling) => Key::parse(spelling),
        None => Key::parse(meta.as_ref().and_then(|m| m.tom.as_deref()).unwrap_or("")),
    };
    let display = sheet::render_display_text(body, &origin_key, &Key::parse(target));

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &display) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote display text to {}", path);
        }
        None => {
            print!("{}", display);
        }
    }
}
