fn main() -> Result<(), Box<dyn std::error::Error>> {
    wings_cli::run()
}
