//! Build script for vibecheck.
//!
//! Puts a copy of `.env.example` next to the `.env` that `config::load_env`
//! reads from the per-user data directory
//! (`~/.local/share/vibecheck/` on Linux).

use std::{fs, path::Path};

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=.env.example");

    let template = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env.example");
    let Some(data_dir) = dirs::data_local_dir() else {
        return Ok(());
    };
    if !template.is_file() {
        return Ok(());
    }

    let target_dir = data_dir.join("vibecheck");
    fs::create_dir_all(&target_dir)?;
    fs::copy(template, target_dir.join(".env.example"))?;
    Ok(())
}
