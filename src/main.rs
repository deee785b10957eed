use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    chordwalk::repl::start()
}
