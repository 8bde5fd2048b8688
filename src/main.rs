fn main() {
    formality::app::cli::run();
}
