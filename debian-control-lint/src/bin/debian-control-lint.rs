//! Lint a Debian control file from the command line.

use clap::{Parser, ValueEnum};
use debian_control_lint::{input, Check, Configuration, ControlFile, ControlType, Error, Preset, Report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "debian-control-lint")]
#[command(about = "Check Debian control files against Debian Policy")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Preset to start from
    #[arg(short, long, default_value = "normal")]
    preset: Preset,

    /// Type of the control file (e.g. "debian/control", ".dsc")
    #[arg(short = 't', long = "type", default_value = "debian/copyright")]
    control_type: ControlType,

    /// Checks to enable on top of the preset
    #[arg(long, value_delimiter = ',')]
    enable: Vec<Check>,

    /// Checks to disable on top of the preset
    #[arg(long, value_delimiter = ',')]
    disable: Vec<Check>,

    /// List the known presets, checks or control file types
    #[arg(short, long)]
    list: Option<Listing>,

    /// Describe a preset and the checks it enables
    #[arg(long, value_name = "PRESET")]
    preset_info: Option<Preset>,

    /// Describe a control file type
    #[arg(long, value_name = "TYPE")]
    type_info: Option<ControlType>,

    /// Describe a check and the presets enabling it
    #[arg(long, value_name = "CHECK")]
    check_info: Option<Check>,

    /// What to show around each error message
    #[arg(long, default_value = "neither", ignore_case = true)]
    display: Display,

    /// File to lint; defaults to the usual location for the type, `-` reads stdin
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Listing {
    Presets,
    Checks,
    Types,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Display {
    Check,
    Reference,
    Both,
    Neither,
}

impl Display {
    fn shows_check(self) -> bool {
        matches!(self, Display::Check | Display::Both)
    }

    fn shows_reference(self) -> bool {
        matches!(self, Display::Reference | Display::Both)
    }
}

fn list(listing: Listing) {
    match listing {
        Listing::Presets => {
            for preset in Preset::ALL {
                println!("{}", preset);
            }
        }
        Listing::Checks => {
            for check in Check::ALL {
                println!("{}", check);
            }
        }
        Listing::Types => {
            for control_type in ControlType::ALL {
                println!("{}", control_type);
            }
        }
    }
}

fn show_preset(preset: Preset) {
    println!("{}", preset.description());
    println!("Configuration values enabled for preset:");
    for check in preset.checks() {
        // checks new in this preset are marked
        if check.minimum_preset() == preset && preset != Preset::Quirks {
            println!("{} [!]", check);
        } else {
            println!("{}", check);
        }
    }
}

fn show_type(control_type: ControlType) {
    println!("{}", control_type);
    println!("{}", control_type.description());
    println!("Default file: {}", control_type.default_file());
}

fn show_check(check: Check) {
    println!("{}", check.description());
    println!("Presets enabling this check by default:");
    for preset in Preset::ALL.iter().filter(|p| check.minimum_preset() <= **p) {
        println!("{}", preset);
    }
}

fn configure(cli: &Cli) -> Configuration {
    let mut config = cli.preset.configuration();
    config.set_control_type(cli.control_type);
    for check in &cli.enable {
        config.enable(*check);
    }
    for check in &cli.disable {
        config.disable(*check);
    }
    if let Some(file) = &cli.file {
        config.set_target(file.clone());
    }
    config
}

#[cfg(feature = "http")]
fn control_file(config: &Configuration) -> ControlFile {
    use debian_control_lint::probe::HttpProber;

    let file = ControlFile::new(config);
    if !config.is_enabled(Check::UrlExists) {
        return file;
    }
    match HttpProber::new(HttpProber::DEFAULT_TIMEOUT) {
        Ok(prober) => file.with_url_prober(Box::new(prober)),
        Err(e) => {
            log::warn!("URLs will not be probed: {}", e);
            file
        }
    }
}

#[cfg(not(feature = "http"))]
fn control_file(config: &Configuration) -> ControlFile {
    if config.is_enabled(Check::UrlExists) {
        log::warn!("Built without HTTP support; URLs will not be probed");
    }
    ControlFile::new(config)
}

fn run(config: &Configuration) -> Result<Report, Error> {
    log::info!(
        "Linting {} as {} with {} checks enabled",
        config.target().display(),
        config.control_type(),
        config.enabled_checks().count()
    );
    let lines = input::read_lines(config.target())?;
    let mut file = control_file(config);
    file.parse(lines)?;
    file.match_stanzas()?;
    file.lint_stanzas()?;
    Ok(file.into_report())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Some(listing) = cli.list {
        list(listing);
        return ExitCode::SUCCESS;
    }
    if let Some(preset) = cli.preset_info {
        show_preset(preset);
        return ExitCode::SUCCESS;
    }
    if let Some(control_type) = cli.type_info {
        show_type(control_type);
        return ExitCode::SUCCESS;
    }
    if let Some(check) = cli.check_info {
        show_check(check);
        return ExitCode::SUCCESS;
    }

    let config = configure(&cli);
    match run(&config) {
        Ok(report) if report.is_empty() => ExitCode::SUCCESS,
        Ok(report) => {
            for violation in report.violations() {
                println!(
                    "{}",
                    violation.render(cli.display.shows_check(), cli.display.shows_reference())
                );
            }
            println!("{} errors found", report.len());
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
