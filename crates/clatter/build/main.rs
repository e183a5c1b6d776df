//! Generates the embedded material bundle at build time and writes it
//! under `OUT_DIR` for the crate to `include_bytes!`.
mod material_tables;

fn main() {
    println!("cargo:rerun-if-changed=material_defs.rs");
    println!("cargo:rerun-if-changed=build/material_tables.rs");

    let bundle = material_tables::build_bundle();

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = std::path::Path::new(&out_dir).join("material_bundle.bin");
    std::fs::write(&dest, &bundle)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", dest.display()));
}
