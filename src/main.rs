use std::io;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    chess_rules::protocol::run_session(stdin.lock(), stdout.lock())
}
