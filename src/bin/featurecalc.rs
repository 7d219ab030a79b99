use std::{env, process};

use featurecalc::{
    Dispatcher,
    cli::{Session, handle_command},
    config::CommandLineConfig,
    logging::init_tracing,
};

fn main() {
    if let Err(err) = init_tracing() {
        eprintln!("warning: {err}");
    }
    let args: Vec<String> = env::args().collect();
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };
    let Some(command) = config.command.as_deref().filter(|_| !config.help) else {
        print!("{}", CommandLineConfig::help());
        return;
    };

    let features = match config.resolve_features() {
        Ok(features) => features,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };
    let session = Session::new(config.methodology(), Dispatcher::new(&features), config.json);
    match handle_command(&session, command, &config.command_args) {
        Ok(output) => {
            println!("{}", output.stdout);
            if output.exit_code != 0 {
                process::exit(output.exit_code);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    }
}
