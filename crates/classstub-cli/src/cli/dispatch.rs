//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use classstub_bytecode::ClassVersion;
use classstub_compiler::BodyMode;

use super::ColorChoice;
use crate::commands::stub::StubArgs;

pub struct StubParams {
    pub input: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub version: ClassVersion,
    pub mode: BodyMode,
    pub synthetic: bool,
    pub dump: bool,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl StubParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            out_dir: m.get_one::<PathBuf>("out_dir").cloned(),
            version: parse_target(m),
            mode: parse_mode(m),
            synthetic: m.get_flag("synthetic"),
            dump: m.get_flag("dump"),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<StubParams> for StubArgs {
    fn from(p: StubParams) -> Self {
        Self {
            input: p.input,
            out_dir: p.out_dir,
            version: p.version,
            mode: p.mode,
            synthetic: p.synthetic,
            dump: p.dump,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_target(m: &ArgMatches) -> ClassVersion {
    m.get_one::<String>("target")
        .and_then(|s| s.parse::<u8>().ok())
        .and_then(ClassVersion::from_release)
        .unwrap_or_default()
}

fn parse_mode(m: &ArgMatches) -> BodyMode {
    match m.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("default") => BodyMode::Default,
        _ => BodyMode::Throw,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
