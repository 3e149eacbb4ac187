use std::fs;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    let cargo_toml = fs::read_to_string("Cargo.toml").expect("Failed to read Cargo.toml");
    let cargo: toml::Value = cargo_toml.parse().expect("Failed to parse Cargo.toml");

    for key in ["name", "version", "description"] {
        if let Some(value) = cargo
            .get("package")
            .and_then(|pkg| pkg.get(key))
            .and_then(|v| v.as_str())
        {
            println!("cargo:rustc-env=CARGO_PKG_{}={}", key.to_uppercase(), value);
        }
    }
}
