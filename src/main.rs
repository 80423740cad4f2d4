use log::error;
use snpcombine::config::Config;
use snpcombine::pipeline;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("cannot determine working directory: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let cfg = Config::from_env(&root);

    match pipeline::run(&cfg) {
        Ok(report) => {
            println!("{}", report);
            if report.failed() > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
