fn main() {
    // Stamp the library with the UTC build date.
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=SKYINK_BUILD_DATE={build_date}");
    println!("cargo:rerun-if-changed=build.rs");
}
