use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use classstub_bytecode::{ClassVersion, dump, parse};
use classstub_compiler::diagnostics::DiagnosticKind;
use classstub_compiler::pipeline::default_out_dir;
use classstub_compiler::{
    Artifact, BodyMode, Diagnostics, EmitConfig, Error, InputFormat, compile_source,
    emit_artifacts, write_artifacts,
};

pub struct StubArgs {
    pub input: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub version: ClassVersion,
    pub mode: BodyMode,
    pub synthetic: bool,
    pub dump: bool,
    pub color: bool,
}

/// What a run produced, for the exit status.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub emitted: usize,
    pub written: usize,
    pub failed: bool,
}

pub fn run(args: StubArgs) {
    match execute(&args, &mut std::io::stdout()) {
        Ok(outcome) if !outcome.failed => {}
        Ok(_) => std::process::exit(1),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// Compile `args.input` and either write the class files or dump them to `out`.
///
/// Diagnostics are printed to stderr. An `Err` is a fatal problem with the
/// input as a whole.
pub fn execute(args: &StubArgs, out: &mut impl Write) -> Result<Outcome, String> {
    let source = fs::read_to_string(&args.input)
        .map_err(|err| format!("cannot read {}: {err}", args.input.display()))?;
    let path = args.input.display().to_string();
    let format = InputFormat::from_path(&args.input);

    let mut cx = match compile_source(&source, format) {
        Ok(cx) => cx,
        Err(err) => return Err(describe_fatal(&err, &source, &path, args.color)),
    };

    let config = EmitConfig::new()
        .version(args.version)
        .mode(args.mode)
        .synthetic(args.synthetic);
    let artifacts = emit_artifacts(&mut cx, &config);

    let written = if args.dump {
        dump_artifacts(&artifacts, out, &mut cx.diagnostics)
    } else {
        let dir = args
            .out_dir
            .clone()
            .unwrap_or_else(|| default_out_dir(&args.input));
        write_into(&dir, &artifacts, &mut cx.diagnostics)
    };

    if !cx.diagnostics.is_empty() {
        let rendered = cx
            .diagnostics
            .printer()
            .source(&source)
            .path(&path)
            .colored(args.color)
            .render();
        eprint!("{rendered}");
    }

    Ok(Outcome {
        emitted: artifacts.len(),
        written,
        failed: cx.diagnostics.has_errors(),
    })
}

fn write_into(dir: &Path, artifacts: &[Artifact], diagnostics: &mut Diagnostics) -> usize {
    if let Err(err) = fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %err, "cannot create output directory");
    }
    write_artifacts(dir, artifacts, diagnostics)
}

fn dump_artifacts(
    artifacts: &[Artifact],
    out: &mut impl Write,
    diagnostics: &mut Diagnostics,
) -> usize {
    let mut shown = 0;
    for artifact in artifacts {
        let text = match parse(&artifact.bytes) {
            Ok(parsed) => dump(&parsed),
            Err(err) => format!("# {}: cannot read back: {err}\n", artifact.file_name),
        };
        let separator = if shown == 0 { "" } else { "\n" };
        if let Err(err) = write!(out, "{separator}# {}\n{text}", artifact.file_name) {
            diagnostics
                .report(DiagnosticKind::WriteFailed, None)
                .message(err.to_string())
                .emit();
            break;
        }
        shown += 1;
    }
    shown
}

fn describe_fatal(err: &Error, source: &str, path: &str, color: bool) -> String {
    let render = |diagnostics: &Diagnostics| {
        let rendered = diagnostics
            .printer()
            .source(source)
            .path(path)
            .colored(color)
            .render();
        format!("{path}: {err}\n{}", rendered.trim_end())
    };

    match err {
        Error::Outline(outline) => {
            let mut diagnostics = Diagnostics::new();
            diagnostics
                .report(DiagnosticKind::NoClassDeclared, Some(outline.span()))
                .emit();
            render(&diagnostics)
        }
        #[cfg(feature = "lang-java")]
        Error::Frontend(classstub_compiler::FrontendError::Syntax(diagnostics)) => {
            render(diagnostics)
        }
        _ => format!("{path}: {err}"),
    }
}
