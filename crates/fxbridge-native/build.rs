//! Build script for fxbridge-native
//!
//! Locates the vendor engine libraries:
//! - `FXBRIDGE_NATIVE_LIB_DIR`: directory searched for the libraries
//! - `FXBRIDGE_AGC_LIB`, `FXBRIDGE_NS_LIB`, `FXBRIDGE_TUNER_LIB`: library
//!   names, overriding the defaults below

use std::env;

const LIBS: [(&str, &str); 3] = [
    ("FXBRIDGE_AGC_LIB", "agc_api"),
    ("FXBRIDGE_NS_LIB", "ns_api"),
    ("FXBRIDGE_TUNER_LIB", "soxwrapper"),
];

fn main() {
    println!("cargo:rerun-if-env-changed=FXBRIDGE_NATIVE_LIB_DIR");

    if let Ok(dir) = env::var("FXBRIDGE_NATIVE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }

    for (var, default) in LIBS {
        println!("cargo:rerun-if-env-changed={var}");
        let name = env::var(var).unwrap_or_else(|_| default.to_string());
        println!("cargo:rustc-link-lib=dylib={name}");
    }
}
