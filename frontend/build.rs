//! Bakes the backend URL into the bundle. A `.env` next to this crate (or in
//! any parent directory) is honoured, real environment variables win.

const BACKEND_URL_VAR: &str = "CHATMIND_BACKEND_URL";

fn main() {
    println!("cargo:rerun-if-env-changed={BACKEND_URL_VAR}");

    if let Ok(path) = dotenvy::dotenv() {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    if let Ok(url) = std::env::var(BACKEND_URL_VAR) {
        println!("cargo:rustc-env={BACKEND_URL_VAR}={url}");
    }
}
