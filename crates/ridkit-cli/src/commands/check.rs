//! `ridkit check`

use anyhow::Result;
use ridkit_assets::{AssetKind, DependencyContext};

pub fn run(manifest: &str) -> Result<()> {
    let context = super::load_context(manifest)?;
    print!("{}", summary(&context));
    Ok(())
}

/// One line per library with its group counts, then the fallback table size
fn summary(context: &DependencyContext) -> String {
    let mut out = String::new();
    for library in &context.libraries {
        let counts: Vec<String> = AssetKind::ALL
            .iter()
            .map(|kind| format!("{}={}", kind, library.groups(*kind).len()))
            .collect();
        out.push_str(&format!(
            "{} {} ({})\n",
            library.name,
            library.version,
            counts.join(", ")
        ));
    }
    out.push_str(&format!(
        "{} libraries, {} fallback entries: ok\n",
        context.libraries.len(),
        context.runtime_graph.len()
    ));
    out
}
