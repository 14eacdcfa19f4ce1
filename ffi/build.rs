use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Ok(out_dir) = env::var("OUT_DIR").map(PathBuf::from) else {
        println!("cargo:warning=OUT_DIR not set, header generation skipped");
        return;
    };

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    match cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("SUPPLIER_CODEC_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("supplier_codec.h"));
        }
        Err(e) => println!("cargo:warning=header generation skipped: {e}"),
    }
}
