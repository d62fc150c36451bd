//! # Crafts Storefront Entry Point
//!
//! Headless host for the storefront engine: loads config, restores the cart,
//! runs the testimonial carousel and logs storefront events until Ctrl-C.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load config (file, then `CRAFTS_*` environment overrides)
//! 3. Load the catalog and open storage
//! 4. Restore the cart
//! 5. Start the carousel
//! 6. Wait for Ctrl-C

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs so it can be tested
    match crafts_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront failed to start");
            ExitCode::FAILURE
        }
    }
}
