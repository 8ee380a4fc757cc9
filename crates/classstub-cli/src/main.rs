mod cli;
mod commands;
mod logging;

use cli::{StubParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let params = StubParams::from_matches(&matches);

    logging::init(params.verbosity);
    commands::stub::run(params.into());
}
