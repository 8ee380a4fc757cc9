//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("classstub")
        .about("Generate JVM class file stubs from class descriptions")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .after_help(
            r#"INPUT FORMATS:
  *.java   Java source; bodies and initializers other than literals are ignored
  *.json   Declaration tree
  other    Outline lines, e.g. `a.B:java.lang.Object:` then `+run()void`

EXAMPLES:
  classstub Api.java                   # writes Api.class next to Api.java
  classstub Api.java -o stubs          # writes into stubs/
  classstub stubs.txt --mode default   # bodies return zero values
  classstub Api.java --dump            # print the class files instead"#,
        )
        .arg(input_arg())
        .arg(target_arg())
        .arg(mode_arg())
        .arg(synthetic_arg())
        .arg(out_dir_arg())
        .arg(dump_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
