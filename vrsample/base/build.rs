fn main() {
    println!("cargo:rerun-if-env-changed=VRAPI_LIB_DIR");

    // libvrapi.so is a prebuilt vendor binary, linked against but never bundled from here
    if std::env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "android") {
        if let Ok(dir) = std::env::var("VRAPI_LIB_DIR") {
            println!("cargo:rustc-link-search=native={dir}");
        }
    }
}
