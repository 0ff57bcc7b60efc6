//! Build script to generate the bundled seed database.
//!
//! Runs assets/seed.sql against a fresh SQLite file in OUT_DIR. The library
//! embeds that file with `include_bytes!` and installs it on first launch.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("budgetbuddy.db");
    let sql_path = Path::new("assets/seed.sql");

    let sql = fs::read_to_string(sql_path).unwrap();

    if dest_path.exists() {
        fs::remove_file(&dest_path).unwrap();
    }

    let conn = rusqlite::Connection::open(&dest_path).unwrap();
    conn.execute_batch(&sql).unwrap();
    conn.close().map_err(|(_, e)| e).unwrap();

    println!("cargo:rerun-if-changed=assets/seed.sql");
    println!("cargo:rerun-if-changed=build.rs");
}
