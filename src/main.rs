fn main() -> anyhow::Result<()> {
    tasktrack::cli::run_cli()
}
