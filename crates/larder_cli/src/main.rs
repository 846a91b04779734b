//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `larder_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("larder_core version={}", larder_core::core_version());
}
