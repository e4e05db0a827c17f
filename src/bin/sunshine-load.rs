fn main() {
    if let Err(err) = sunshine_olap::run_load() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
