//! specimen CLI: build the XeTeX font database and query it.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::LevelFilter;
use regex::Regex;

use specimen_core::config::{default_database_path, system_font_roots};
use specimen_core::output::{read_json, write_json, write_json_pretty};
use specimen_core::{build_from_paths, discover_fonts, BuildOptions, FontDatabase, FontFace};

/// CLI entrypoint for specimen.
#[derive(Debug, Parser)]
#[command(name = "specimen", about = "OpenType font database builder for XeTeX")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan font directories and write the database
    Build(BuildArgs),
    /// Resolve a font name to its file and face index
    Lookup(LookupArgs),
    /// List every face of a family
    Family(FamilyArgs),
    /// List the names the database can resolve
    Names(NamesArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Directories (or files) to scan
    #[arg(
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["system_fonts", "stdin_paths"]
    )]
    roots: Vec<PathBuf>,

    /// Read newline-delimited roots from STDIN
    #[arg(long = "stdin-paths", action = ArgAction::SetTrue)]
    stdin_paths: bool,

    /// Include common system font directories automatically
    #[arg(long = "system-fonts", action = ArgAction::SetTrue)]
    system_fonts: bool,

    /// Where to write the database (defaults to the data directory)
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,

    /// Follow symlinks while walking roots
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Number of parsing threads (defaults to all cores)
    #[arg(short = 'j', long = "jobs", value_parser = clap::value_parser!(usize))]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct DbArg {
    /// Database to read (defaults to the data directory)
    #[arg(long = "db", value_hint = ValueHint::FilePath)]
    db: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// PostScript name, full name or Family-Style alias
    name: String,

    #[command(flatten)]
    db: DbArg,

    /// Print the whole face record as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct FamilyArgs {
    /// Family or typographic family name
    name: String,

    #[command(flatten)]
    db: DbArg,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct NamesArgs {
    #[command(flatten)]
    db: DbArg,

    /// Regex patterns; a name is listed when any of them matches
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Build(args) => {
            let stdin = io::stdin();
            run_build(args, stdin.lock(), &mut handle)
        }
        Command::Lookup(args) => run_lookup(args, &mut handle),
        Command::Family(args) => run_family(args, &mut handle),
        Command::Names(args) => run_names(args, &mut handle),
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `RUST_LOG` takes precedence over `-v`. A logger that is already installed
/// is left in place.
fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
        .ok();
}

fn run_build(args: BuildArgs, stdin: impl BufRead, mut out: impl Write) -> Result<()> {
    let roots = gather_paths(&args.roots, args.stdin_paths, args.system_fonts, stdin)?;
    let opts = BuildOptions {
        follow_symlinks: args.follow_symlinks,
        jobs: args.jobs,
    };

    let target = match args.output {
        Some(path) => path,
        None => default_database_path()?,
    };
    writeln!(out, "font_database @ '{}'", target.display())?;

    let paths = discover_fonts(&roots, &opts)?;
    let db = build_from_paths(&paths, &opts)?;
    save_database(&db, &target, args.pretty)?;

    // counts scanned files, not faces
    writeln!(out, "flushed {} fonts.", paths.len())?;
    Ok(())
}

fn save_database(db: &FontDatabase, target: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file =
        File::create(target).with_context(|| format!("creating {}", target.display()))?;
    let writer = BufWriter::new(file);

    if pretty {
        write_json_pretty(db, writer)
    } else {
        write_json(db, writer)
    }
}

fn load_database(arg: &DbArg) -> Result<FontDatabase> {
    let path = match &arg.db {
        Some(path) => path.clone(),
        None => default_database_path()?,
    };
    log::debug!("loading {}", path.display());

    let file = File::open(&path).with_context(|| {
        format!("opening {} (run `specimen build` first?)", path.display())
    })?;
    read_json(BufReader::new(file))
}

fn run_lookup(args: LookupArgs, mut out: impl Write) -> Result<()> {
    let db = load_database(&args.db)?;
    let face = db
        .search_name(&args.name)
        .ok_or_else(|| anyhow!("no font named '{}'", args.name))?;

    if args.json {
        serde_json::to_writer_pretty(&mut out, face)?;
        writeln!(out)?;
    } else {
        let color = use_color(args.color);
        writeln!(out, "{}", render_path(face, color))?;
    }
    Ok(())
}

fn run_family(args: FamilyArgs, mut out: impl Write) -> Result<()> {
    let db = load_database(&args.db)?;
    let members = db.search_family(&args.name);
    if members.is_empty() {
        return Err(anyhow!("no font family named '{}'", args.name));
    }

    write_members(&members, &mut out, use_color(args.color))
}

fn run_names(args: NamesArgs, mut out: impl Write) -> Result<()> {
    let patterns = compile_patterns(&args.name_patterns)?;
    let db = load_database(&args.db)?;

    for link in &db.link {
        if patterns.is_empty() || patterns.iter().any(|re| re.is_match(&link.name)) {
            writeln!(out, "{}", link.name)?;
        }
    }
    Ok(())
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

fn gather_paths(
    raw_paths: &[PathBuf],
    read_stdin: bool,
    include_system: bool,
    mut stdin: impl BufRead,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if read_stdin {
        paths.extend(read_paths_from(&mut stdin)?);
    }

    for path in raw_paths {
        if path == Path::new("-") {
            paths.extend(read_paths_from(&mut stdin)?);
        } else {
            paths.push(path.clone());
        }
    }

    if include_system {
        paths.extend(system_font_roots()?);
    }

    if paths.is_empty() {
        return Err(anyhow!("no font directories provided"));
    }

    Ok(paths)
}

fn read_paths_from(reader: &mut impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}

fn write_members(members: &[&FontFace], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String)> = members
        .iter()
        .map(|face| {
            let style = face
                .prefer_style
                .first()
                .or_else(|| face.style.first())
                .cloned()
                .unwrap_or_else(|| "(unnamed)".to_string());
            (style, path_with_index(face))
        })
        .collect();

    let style_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);

    for (style, path) in rows {
        let padded_style = format!("{style:<style_width$}");
        let rendered_style = apply_color(&padded_style, color, AnsiColor::Yellow);
        let rendered_path = apply_color(&path, color, AnsiColor::Cyan);
        writeln!(w, "{rendered_style}  {rendered_path}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
    };

    format!("\u{1b}[{code_str}m{text}\u{1b}[0m")
}

fn render_path(face: &FontFace, color: bool) -> String {
    apply_color(&path_with_index(face), color, AnsiColor::Cyan)
}

/// `path#index` for collection members, the bare path otherwise.
fn path_with_index(face: &FontFace) -> String {
    let is_collection = face
        .file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttc") || ext.eq_ignore_ascii_case("otc"));

    if is_collection || face.face_index > 0 {
        format!("{}#{}", face.file_path.display(), face.face_index)
    } else {
        face.file_path.display().to_string()
    }
}
