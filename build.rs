//! Build script for the optional N-API addon.
//!
//! With the `node` feature enabled this uses the `napi-build` crate to
//! configure linking so the `cdylib` can be loaded by Node.js as a native
//! module. Without the feature there is nothing to configure.

/// Entry point invoked by Cargo before compiling the crate.
fn main() {
    #[cfg(feature = "node")]
    napi_build::setup();
}
