use std::{env, fs, path::Path};

/// Drop config.json next to the binary so the exe-relative lookup in main
/// finds it after `cargo build`.
fn main() {
    println!("cargo:rerun-if-changed=config.json");

    let src = Path::new("config.json");
    if !src.exists() {
        // Nothing to copy; the server falls back to built-in defaults.
        return;
    }

    // OUT_DIR is target/<profile>/build/<crate>/out; three levels up is
    // the directory the binary lands in.
    let out_dir = env::var("OUT_DIR").expect("Cannot read OUT_DIR");
    let exe_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .expect("Cannot find executable directory");

    if let Err(e) = fs::copy(src, exe_dir.join("config.json")) {
        println!("cargo:warning=Could NOT copy config.json: {}", e);
    }
}
