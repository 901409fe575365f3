use fontkeep::cli;

fn main() {
    // Logging is installed inside process_cli once --log-level is known
    let code = cli::process_cli();
    log::logger().flush();
    if code != 0 {
        std::process::exit(code);
    }
}
