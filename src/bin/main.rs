use check_file_count::{FileCountProbe, OutputFormat, Thresholds, Verdict, INVALID_INVOCATION, USAGE};
use clap::{Parser, ValueEnum};
use log::debug;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "check_file_count")]
#[command(about = "Count directory entries and report a monitoring plugin verdict")]
#[command(version)]
struct Cli {
    /// Warning count
    #[arg(
        short = 'w',
        long = "warning",
        value_name = "count",
        default_value_t = 8,
        allow_negative_numbers = true
    )]
    warn: i64,

    /// Critical count
    #[arg(
        short = 'c',
        long = "critical",
        value_name = "count",
        default_value_t = 16,
        allow_negative_numbers = true
    )]
    crit: i64,

    /// Regex to match files on (case-insensitive)
    #[arg(
        short = 'r',
        long = "regex",
        value_name = "regex",
        default_value = "",
        allow_hyphen_values = true
    )]
    regex: String,

    /// Output format
    #[arg(long, value_enum, default_value = "nagios")]
    format: FormatArg,

    /// Directory to inspect. Flag parsing stops here; anything after it is ignored
    #[arg(value_name = "path", trailing_var_arg = true, num_args = 0..)]
    args: Vec<String>,
}

impl Cli {
    fn path(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    fn ignored(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    fn into_probe(self) -> FileCountProbe {
        if !self.ignored().is_empty() {
            debug!("Ignoring arguments after the path: {:?}", self.ignored());
        }
        FileCountProbe::new(self.path())
            .with_thresholds(Thresholds::new(self.warn, self.crit))
            .with_filter(self.regex)
            .with_format(self.format.into())
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum FormatArg {
    Nagios,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Nagios => OutputFormat::Nagios,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// `--help` and `--version` are successful exits; every other parse
/// failure is an invalid invocation.
fn parse_failure_exit(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        INVALID_INVOCATION
    } else {
        0
    }
}

/// Last-resort report when output itself failed. The write may fail again
/// (closed stdout), so its result is ignored.
fn report_failure<W: Write>(out: &mut W, err: &anyhow::Error) -> i32 {
    let _ = writeln!(out, "{}: {:#}", Verdict::Unknown, err);
    Verdict::Unknown.exit_code()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CHECK_FILE_COUNT_LOG", "off"))
        .init();

    let code = match run() {
        Ok(code) => code,
        Err(e) => report_failure(&mut io::stdout(), &e),
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            let code = parse_failure_exit(&err);
            if code == INVALID_INVOCATION {
                writeln!(io::stdout(), "{}", USAGE)?;
            }
            return Ok(code);
        }
    };

    let probe = cli.into_probe();
    let exit = probe.run(&mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(exit.code())
}
