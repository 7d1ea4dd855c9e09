//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `shelfmark_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("shelfmark_core ping={}", shelfmark_core::ping());
    println!("shelfmark_core version={}", shelfmark_core::core_version());
}
