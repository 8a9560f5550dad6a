use bf_tape::cli;

fn main() {
    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bf".to_string());
    std::process::exit(cli::run_from_args(&program, std::env::args_os()));
}
