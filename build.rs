// Copies static assets (page, scene config, wasm-pack output) to `dist/`.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        if let Err(e) = std::fs::remove_dir_all(out_dir) {
            println!("cargo:warning=unable to clear dist/: {e}");
            return;
        }
    }

    if let Err(e) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=unable to create dist/: {e}");
        return;
    }

    let options = CopyOptions::new().content_only(true);
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=unable to copy static/ to dist/: {e}");
    }
}
