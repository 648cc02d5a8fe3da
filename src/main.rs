use liform::cli::CommandLineInterface;

fn main() -> anyhow::Result<()> {
    CommandLineInterface::load().run()
}
