use std::process::ExitCode;

fn main() -> ExitCode {
    geointel::cli::run()
}
