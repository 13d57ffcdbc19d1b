//! Example: Strip Parameter Serialization
//!
//! This example loads `StripParams` from TOML, strips a small mesh, and
//! joins the result into a single strip.
//!
//! Run with: `cargo run --example strip_config --features config`

#[cfg(not(feature = "config"))]
fn main() {
    eprintln!("This example requires the 'config' feature.");
    eprintln!("Run with: cargo run --example strip_config --features config");
}

#[cfg(feature = "config")]
use mesh_strip::{join_strips, strippify_no_degenerate_with, validate_strips, HashDistinct, StripParams};

#[cfg(feature = "config")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // =========================================================================
    // 1. Parse parameters from TOML
    // =========================================================================

    let params = StripParams::from_toml(
        r#"
        strict_manifold = true
        extend_backward = true
        "#,
    )?;
    println!("=== Parameters ===\n{}", params.to_json()?);

    // =========================================================================
    // 2. Strip a 3x2 grid
    // =========================================================================

    let (w, h) = (3u32, 2u32);
    let mut indices = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let i = y * (w + 1) + x;
            let j = i + w + 1;
            indices.extend_from_slice(&[i, i + 1, j, j, i + 1, j + 1]);
        }
    }

    let (strips, reversed) = strippify_no_degenerate_with(&indices, &HashDistinct, &params)?;
    for (strip, rev) in strips.iter().zip(&reversed) {
        println!("strip {:?} reversed={}", strip, rev);
    }

    // =========================================================================
    // 3. Join and check
    // =========================================================================

    let joined = join_strips(&strips, &reversed);
    println!("joined: {:?}", joined);

    let report = validate_strips(&indices, &[joined], &[]);
    println!("{}", report);

    Ok(())
}
