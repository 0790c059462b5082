use std::{env, fs, io::BufReader, path::PathBuf, process::exit, time::Instant};

use mjc::{display_error, init_tracing, lexer::scanner::Scanner};
use tracing::error;

struct Args {
    file: PathBuf,
    limit: Option<usize>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut file = None;
    let mut limit = None;

    while let Some(arg) = args.next() {
        if arg == "--limit" {
            let value = args.next().ok_or("err: --limit needs a value")?;
            let value = value
                .parse::<usize>()
                .map_err(|_| format!("err: invalid limit `{}`", value))?;
            limit = Some(value);
        } else if file.is_none() {
            file = Some(PathBuf::from(arg));
        } else {
            return Err(format!("err: unexpected argument `{}`", arg));
        }
    }

    let file = file.ok_or("err: no input specified")?;
    Ok(Args { file, limit })
}

fn main() {
    init_tracing();
    println!("mjc v{}", env!("CARGO_PKG_VERSION"));

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            exit(1);
        }
    };

    let file_name = args.file.to_string_lossy().into_owned();
    let input = match fs::File::open(&args.file) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("err: cannot open {}: {}", file_name, e);
            exit(1);
        }
    };

    let start = Instant::now();
    let mut source: Option<String> = None;
    let mut scanner = Scanner::new(BufReader::new(input));
    let mut count = 0;
    let mut failed = false;

    for result in scanner.by_ref().take(args.limit.unwrap_or(usize::MAX)) {
        count += 1;

        match result {
            Ok(token) => println!("{}", token),
            Err(e) if e.is_fatal() => {
                error!(error = %e, "scan aborted");
                eprintln!("fatal: {}", e);
                exit(1);
            }
            Err(e) => {
                failed = true;
                // Diagnostics need the line text, so load the file the first time one is shown.
                let text = source.get_or_insert_with(|| {
                    fs::read(&args.file)
                        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                        .unwrap_or_default()
                });
                display_error(&e, &file_name, text);
            }
        }
    }

    println!("Scanned {} tokens in {:?}", count, start.elapsed());

    if failed {
        exit(2);
    }
}
