//! Argument builders for the CLI.
//!
//! Each function returns a `clap::Arg` composed into the command in
//! `commands.rs`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Class description to compile (positional).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("INPUT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Java source, declaration tree (.json) or outline file")
}

/// Class file version tier (--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .long("target")
        .value_name("RELEASE")
        .default_value("8")
        .value_parser(["6", "7", "8"])
        .help("Java release the class files target")
}

/// Stub body mode (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .default_value("throw")
        .value_parser(["throw", "default"])
        .help("Method bodies: throw UnsupportedOperationException, or return a zero value")
}

/// Mark everything synthetic (--synthetic).
pub fn synthetic_arg() -> Arg {
    Arg::new("synthetic")
        .long("synthetic")
        .action(ArgAction::SetTrue)
        .help("Mark classes, fields and methods synthetic")
}

/// Output directory (-o/--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory for class files (defaults to the input's directory)")
}

/// Print class files instead of writing them (--dump).
pub fn dump_arg() -> Arg {
    Arg::new("dump")
        .long("dump")
        .action(ArgAction::SetTrue)
        .help("Print a readable dump of each class instead of writing files")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Verbosity level (-v for progress, -vv for per-class detail)")
}
