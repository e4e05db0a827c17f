fn main() {
    if let Err(err) = sunshine_olap::run_report() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
