//! Rasterize list of ovals and dump resulting pixel runs
use ovalraster::*;
use std::{
    env,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    output_file: Option<String>,
    width: Option<usize>,
    height: Option<usize>,
    cover_limit: Option<Scalar>,
    json: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            output_file: None,
            width: None,
            height: None,
            cover_limit: None,
            json: false,
        };
        let mut positional = 0;
        let mut args = env::args().peekable();
        let cmd = args.next().unwrap_or_else(|| "ovals".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--help" => {
                    positional = 0;
                    break;
                }
                "-w" => {
                    let width = args.next().ok_or("-w requires argument")?;
                    result.width = Some(width.parse()?);
                }
                "-h" => {
                    let height = args.next().ok_or("-h requires argument")?;
                    result.height = Some(height.parse()?);
                }
                "-d" => {
                    // limit is optional
                    let limit = match args.peek().map(|arg| arg.parse::<Scalar>()) {
                        Some(Ok(limit)) => {
                            args.next();
                            limit
                        }
                        _ => DEFAULT_COVER_LIMIT,
                    };
                    result.cover_limit = Some(limit);
                }
                "-o" => {
                    result.output_file = Some(args.next().ok_or("-o requires argument")?);
                }
                "-j" => {
                    result.json = true;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Rasterize list of ovals and print resulting pixel runs");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-w <width>] [-h <height>] [-d [<limit>]] [-o <out.pgm>] [-j] <file.ovals>",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -w <width>         width of the frame (default: right side of ovals)");
            eprintln!("    -h <height>        height of the frame (default: bottom of ovals)");
            eprintln!(
                "    -d [<limit>]       remove ovals covered by at least limit (default: {})",
                DEFAULT_COVER_LIMIT
            );
            eprintln!(
                "    -o <out.pgm>       write coverage mask in the PGM format ('-' means stdout)"
            );
            eprintln!("    -j                 input is a JSON array instead of text lines");
            eprintln!("    <file.ovals>       file containing ovals ('-' means stdin)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

/// Load ovals from the file
fn ovals_load(path: &str, json: bool) -> Result<Vec<Ellipse>, Error> {
    let input: Box<dyn BufRead> = if path != "-" {
        Box::new(BufReader::new(File::open(path)?))
    } else {
        Box::new(std::io::stdin().lock())
    };
    let _span = tracing::debug_span!("[parse]", json).entered();
    let ovals = if json {
        read_ellipses_json(input)?
    } else {
        read_ellipses(input)?
    };
    Ok(ovals)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let mut ovals = ovals_load(&args.input_file, args.json)?;
    tracing::debug!("[ovals:count] {}", ovals.len());

    if let Some(cover_limit) = args.cover_limit {
        let removed = deduplicate(&mut ovals, cover_limit);
        tracing::info!("[dedup] removed {} of {}", removed, removed + ovals.len());
    }

    // frame defaults to the bounds of all ovals
    let bounds = ovals
        .iter()
        .map(|oval| oval.bounds())
        .reduce(|union, bounds| union.union(&bounds));
    let frame = |size: Option<usize>, side: fn(&Bounds) -> Scalar| match (size, &bounds) {
        (Some(size), _) => size,
        (None, Some(bounds)) => side(bounds).max(0.0).ceil() as usize,
        (None, None) => 0,
    };
    let width = frame(args.width, |bounds| bounds.right);
    let height = frame(args.height, |bounds| bounds.bottom);

    let runs = rasterize(&ovals, width, height);

    let stdout = std::io::stdout();
    match args.output_file.as_deref() {
        Some("-") => {
            let mask = Mask::from_runs(width, height, &runs);
            let mut out = BufWriter::new(stdout.lock());
            mask.write_pgm(&mut out)?;
            out.flush()?;
        }
        Some(output_file) => {
            let mask = Mask::from_runs(width, height, &runs);
            tracing::debug!("[mask] {:?}", mask);
            let mut image_file = BufWriter::new(File::create(output_file)?);
            mask.write_pgm(&mut image_file)?;
            image_file.flush()?;
            write!(stdout.lock(), "{}", RunsDump(&runs))?;
        }
        None => write!(stdout.lock(), "{}", RunsDump(&runs))?,
    }

    Ok(())
}
