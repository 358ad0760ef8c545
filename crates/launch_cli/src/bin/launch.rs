//! Launch CLI
//!
//! Usage:
//!   launch launch/demo.launch.xml
//!   launch launch/demo.launch.yaml -a robot:=turtle --format json
//!   launch launch/demo.launch.xml --dry-run

use launch_cli::{load_description, LaunchArgs, Report};
use launch_core::{LaunchService, Parser};

fn main() {
    let args: LaunchArgs = argh::from_env();

    // Initialize logging
    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    env_logger::init_from_env(env);

    let parser = match Parser::with_builtin_actions() {
        Ok(parser) => parser,
        Err(e) => {
            log::error!("Failed to register built-in actions: {}", e);
            std::process::exit(1);
        }
    };

    // Load launch file
    log::info!("Loading launch file: {}", args.launch_file);
    let description = match load_description(&args.launch_file, &parser) {
        Ok(description) => description,
        Err(e) => {
            log::error!("Failed to load launch file: {:#}", e);
            std::process::exit(1);
        }
    };

    // Validate only mode
    if args.validate {
        println!("Launch file '{}' is valid", args.launch_file);
        println!("  Actions: {}", description.len());
        return;
    }

    // Dry run mode
    if args.dry_run {
        print!("{}", description);
        return;
    }

    let mut service = LaunchService::new(args.service_config());
    let initial_environment = service.context().environment().clone();

    let outcome = match service.run(&description) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Launch failed: {}", e);
            std::process::exit(1);
        }
    };

    match Report::new(&outcome, &initial_environment).render(args.format) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
