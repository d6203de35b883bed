use std::process::ExitCode;

fn main() -> ExitCode {
    srcml2mse::cli::run()
}
