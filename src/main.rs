fn main() {
    if let Err(e) = order_sheet_lib::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
