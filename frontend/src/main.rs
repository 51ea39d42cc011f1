//! Entry point for the WASM application

pub fn main() {
    tryon_frontend::start();
}
