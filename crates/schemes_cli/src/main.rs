//! Smoke binary for the schemes core.
//!
//! Opens a throwaway in-memory database, which drives connection
//! bootstrap and migrations end to end, and prints what it found.
//! Output stays deterministic so the probe is scriptable.

use schemes_core::db::migrations::latest_version;
use schemes_core::db::open_db_in_memory;

fn main() {
    println!("schemes_core version={}", schemes_core::core_version());

    match open_db_in_memory() {
        Ok(_conn) => {
            println!("schemes_core schema_version={}", latest_version());
        }
        Err(err) => {
            eprintln!("schemes_core db_open failed: {err}");
            std::process::exit(1);
        }
    }
}
