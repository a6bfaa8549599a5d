//! Entry point for the WASM application

pub fn main() {
    mp4drop::mount();
}
