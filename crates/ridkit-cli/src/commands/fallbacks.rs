//! `ridkit fallbacks`

use anyhow::Result;

pub fn run(manifest: &str, rid: &str) -> Result<()> {
    let context = super::load_context(manifest)?;
    for candidate in context.runtime_graph.candidates(rid) {
        println!("{}", candidate);
    }
    Ok(())
}
