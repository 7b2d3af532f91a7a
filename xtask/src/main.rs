//! Custom cargo commands for the search crate.
//!
//! Usage:
//!   cargo xtask verify      - Run full verification suite
//!   cargo xtask test        - Run all tests
//!   cargo xtask check       - Quick check (native only)
//!   cargo xtask bench       - Run benchmarks
//!   cargo xtask build-wasm  - Build the browser package with wasm-pack
//!   cargo xtask fuzz [SECS] - Run every fuzz target briefly

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const WASM_FEATURES: &[&str] = &["--no-default-features", "--features", "wasm"];

const FUZZ_TARGETS: &[&str] = &[
    "search_queries",
    "excerpt_rendering",
    "corpus_parsing",
    "controller_events",
];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("build-wasm") => build_wasm()?,
        Some("fuzz") => {
            let seconds = match args.next() {
                Some(s) => s.parse().context("fuzz duration must be a number of seconds")?,
                None => 30,
            };
            fuzz(seconds)?;
        }
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify      Run full verification suite (tests + clippy + wasm check)
  test        Run all Rust tests
  check       Quick check (cargo test + clippy, native only)
  bench       Run benchmarks
  build-wasm  Build the browser package into pkg/
  fuzz [SECS] Run each fuzz target for SECS seconds (default 30, needs nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("Search Crate Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[3/4] Checking the browser binding...");
    let mut args = vec!["check", "--lib", "--target", "wasm32-unknown-unknown"];
    args.extend_from_slice(WASM_FEATURES);
    run_cargo(&args)?;
    println!("✓ wasm32 build checks\n");

    println!("[4/4] Checking fuzz targets build...");
    run_in(&project_root()?.join("fuzz"), "cargo", &["check", "--quiet"])?;
    println!("✓ Fuzz targets build\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check (native only)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Build the browser package with wasm-pack.
fn build_wasm() -> Result<()> {
    let root = project_root()?;
    let mut args = vec!["build", "--target", "web", "--release", "--out-dir", "pkg", "--"];
    args.extend_from_slice(WASM_FEATURES);
    run_in(&root, "wasm-pack", &args)?;
    println!("✓ Browser package written to {}", root.join("pkg").display());
    Ok(())
}

/// Run each fuzz target for a fixed time.
fn fuzz(seconds: u32) -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");
    let max_time = format!("-max_total_time={}", seconds);
    for target in FUZZ_TARGETS {
        println!("Fuzzing {} for {}s...", target, seconds);
        run_in(
            &fuzz_dir,
            "cargo",
            &["+nightly", "fuzz", "run", target, "--", max_time.as_str()],
        )?;
    }
    println!("\n✓ No crashes in {} targets", FUZZ_TARGETS.len());
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run_in(&project_root()?, "cargo", args)
}

fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {} {:?}", program, args))?;

    if !status.success() {
        bail!("{} {:?} failed", program, args);
    }

    Ok(())
}
