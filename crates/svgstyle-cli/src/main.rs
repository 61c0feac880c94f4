use std::io::Read;
use svgstyle::{ConvertStyleToAttrs, Document, Report};
use svgstyle_core::Options;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Svg(svgstyle::Error),
    Options(svgstyle_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Svg(err) => write!(f, "{err}"),
            CliError::Options(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<svgstyle::Error> for CliError {
    fn from(value: svgstyle::Error) -> Self {
        Self::Svg(value)
    }
}

impl From<svgstyle_core::Error> for CliError {
    fn from(value: svgstyle_core::Error) -> Self {
        Self::Options(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    out: Option<String>,
    config: Option<String>,
    precision: Option<u32>,
    exclude: Vec<String>,
    stats: bool,
}

fn usage() -> &'static str {
    "svgstyle-cli\n\
\n\
USAGE:\n\
  svgstyle-cli [--config <options.json>] [--precision <n>] [--exclude <property>]... [--out <path>] [--stats] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - The optimized SVG is printed to stdout unless --out is given.\n\
  - --config reads pass options as JSON, e.g. {\"precision\": 3, \"excluded\": [\"-inkscape-font-specification\"]}.\n\
  - --precision and --exclude are applied on top of --config.\n\
  - --stats prints a JSON summary to stderr.\n\
  - Set RUST_LOG=debug to see per-element diagnostics.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--stats" => args.stats = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--precision" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.precision = Some(n.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--exclude" => {
                let Some(prop) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.exclude.push(prop.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_options(args: &Args) -> Result<Options, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => Options::from_json(&std::fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    if let Some(precision) = args.precision {
        options = options.with_precision(precision)?;
    }
    for prop in &args.exclude {
        options = options.with_excluded(prop);
    }
    Ok(options)
}

fn report_json(report: &Report) -> serde_json::Value {
    serde_json::json!({
        "elements": report.elements,
        "rewritten": report.rewritten,
        "removed": report.removed,
        "failed": report.failed,
        "promoted": report.promoted,
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let options = build_options(&args)?;
    let pass = ConvertStyleToAttrs::new(options);
    log::debug!("options: {:?}", pass.options());

    let text = read_input(args.input.as_deref())?;
    let mut doc = Document::parse(&text)?;
    let report = svgstyle::convert_style_to_attrs(&mut doc, &pass);
    write_text(&doc.to_xml_string(), args.out.as_deref())?;

    if args.stats {
        eprintln!("{}", serde_json::to_string(&report_json(&report))?);
    }
    if report.failed > 0 {
        log::warn!(
            "{} element(s) kept their style because it could not be rewritten",
            report.failed
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
