//! Embeds build metadata for `animascii --version`.
//!
//! `ANIMASCII_BUILD_DATE` is always set. Dev builds also get `VERGEN_GIT_SHA`
//! (or `unknown` outside a git checkout); `--features release` leaves the
//! hash out so official version strings stay clean.

use std::process::Command;

fn build_date() -> String {
    Command::new("date")
        .arg("+%Y-%m-%d")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(feature = "release"))]
fn emit_git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit())
                .map_err(|e| e.to_string())
        });

    if let Err(e) = emitted {
        println!("cargo:warning=git information unavailable: {e}");
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=ANIMASCII_BUILD_DATE={}", build_date());

    #[cfg(not(feature = "release"))]
    emit_git_sha();
}
