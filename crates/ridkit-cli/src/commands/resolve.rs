//! `ridkit resolve`

use crate::config::{OutputFormat, RidkitConfig};
use anyhow::{bail, Result};
use clap::Args;
use ridkit_assets::{
    require_runtime, AssemblyName, AssetKind, DependencyContext, ResolutionReport, RuntimeFile,
};
use serde::Serialize;

#[derive(Args)]
pub struct ResolveArgs {
    /// Path to the dependency context snapshot (TOML)
    pub manifest: String,

    /// Target runtime identifier (e.g., linux-x64)
    #[arg(long, conflicts_with = "default")]
    pub rid: Option<String>,

    /// Resolve the RID-agnostic default assets only
    #[arg(long)]
    pub default: bool,

    /// Asset kind: native, runtime or resource
    #[arg(long, default_value = "native")]
    pub kind: String,

    /// Print file records with version metadata instead of paths
    #[arg(long, conflicts_with = "names")]
    pub files: bool,

    /// Print assembly names (runtime kind only)
    #[arg(long)]
    pub names: bool,

    /// Print the per-library report with the matched runtime tag
    #[arg(long, conflicts_with_all = ["files", "names"])]
    pub per_library: bool,

    /// Output format (text, json or toml)
    #[arg(long)]
    pub format: Option<String>,
}

pub fn run(args: ResolveArgs, config: &RidkitConfig) -> Result<()> {
    let context = super::load_context(&args.manifest)?;
    let kind: AssetKind = args.kind.parse()?;
    let format = match &args.format {
        Some(f) => f.parse()?,
        None => config.format,
    };
    let rid = target_runtime(&args, config, &context)?;
    let resolution = context.resolve(rid);

    let output = if args.per_library {
        render_report(&ResolutionReport::build(&resolution, kind), format)?
    } else if args.files {
        let files: Vec<&RuntimeFile> = resolution.files(kind).collect();
        render_files(&files, format)?
    } else if args.names {
        if kind != AssetKind::Runtime {
            bail!("--names only applies to the runtime asset kind, not '{}'", kind);
        }
        let mut names = Vec::new();
        let mut failures = 0usize;
        for result in resolution.assembly_names() {
            match result {
                Ok(name) => names.push(name),
                Err(err) => {
                    tracing::error!("{}", err);
                    failures += 1;
                }
            }
        }
        print!("{}", render_names(&names, format)?);
        if failures > 0 {
            bail!("{} asset path(s) did not yield an assembly name", failures);
        }
        return Ok(());
    } else {
        let paths: Vec<&str> = resolution.assets(kind).collect();
        render_paths(&paths, format)?
    };

    print!("{}", output);
    Ok(())
}

/// Pick the runtime identifier: flag, then config/env, then the manifest's
/// own target runtime.
fn target_runtime<'a>(
    args: &'a ResolveArgs,
    config: &'a RidkitConfig,
    context: &'a DependencyContext,
) -> Result<&'a str> {
    if args.default {
        return Ok("");
    }
    let rid = args
        .rid
        .as_deref()
        .or(config.default_rid.as_deref())
        .or(context.target.runtime.as_deref());
    Ok(require_runtime(rid)?)
}

#[derive(Serialize)]
struct PathList<'a> {
    paths: &'a [&'a str],
}

#[derive(Serialize)]
struct FileList<'a> {
    files: &'a [&'a RuntimeFile],
}

#[derive(Serialize)]
struct NameList<'a> {
    names: &'a [AssemblyName],
}

fn render_paths(paths: &[&str], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => lines(paths.iter()),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&PathList { paths })?),
        OutputFormat::Toml => toml::to_string_pretty(&PathList { paths })?,
    })
}

fn render_files(files: &[&RuntimeFile], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => lines(files.iter().map(|f| {
            let version = |v: Option<ridkit_core::Version>| {
                v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
            };
            format!(
                "{}\t{}\t{}",
                f.path,
                version(f.assembly_version),
                version(f.file_version)
            )
        })),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&FileList { files })?),
        OutputFormat::Toml => toml::to_string_pretty(&FileList { files })?,
    })
}

fn render_names(names: &[AssemblyName], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => lines(names.iter()),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&NameList { names })?),
        OutputFormat::Toml => toml::to_string_pretty(&NameList { names })?,
    })
}

fn render_report(report: &ResolutionReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => {
            let mut out = format!(
                "runtime: {}\nfallbacks: {}\nkind: {}\n",
                display_rid(&report.runtime),
                report.fallbacks.join(" -> "),
                report.kind
            );
            for library in &report.libraries {
                let matched = match &library.matched_runtime {
                    Some(rid) => display_rid(rid).to_string(),
                    None => "no match".to_string(),
                };
                out.push_str(&format!("{} {} [{}]\n", library.name, library.version, matched));
                for path in &library.paths {
                    out.push_str(&format!("  {}\n", path));
                }
            }
            out.push_str(&format!("fingerprint: {}\n", report.fingerprint.to_prefixed_hex()));
            out
        }
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
        OutputFormat::Toml => toml::to_string_pretty(report)?,
    })
}

fn display_rid(rid: &str) -> &str {
    if rid.is_empty() {
        "(default)"
    } else {
        rid
    }
}

fn lines<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    items.into_iter().map(|i| format!("{}\n", i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridkit_assets::{AssetGroup, Library, RuntimeFallbacks, TargetInfo};
    use ridkit_core::Version;

    fn context() -> DependencyContext {
        DependencyContext::new(
            TargetInfo {
                framework: ".NETCoreApp,Version=v8.0".to_string(),
                runtime: Some("linux-x64".to_string()),
            },
            vec![Library::new("Libuv", "1.10.0").with_groups(
                AssetKind::Native,
                vec![
                    AssetGroup::new("linux", ["runtimes/linux/native/libuv.so"]),
                    AssetGroup::default_group(["lib/libuv.so"]),
                ],
            )],
            [RuntimeFallbacks::new("linux-x64", ["linux", "unix"])]
                .into_iter()
                .collect(),
        )
    }

    fn args(rid: Option<&str>, default: bool) -> ResolveArgs {
        ResolveArgs {
            manifest: "app.deps.toml".to_string(),
            rid: rid.map(str::to_string),
            default,
            kind: "native".to_string(),
            files: false,
            names: false,
            per_library: false,
            format: None,
        }
    }

    #[test]
    fn test_target_runtime_precedence() {
        let ctx = context();
        let mut config = RidkitConfig::default();

        assert_eq!(target_runtime(&args(None, false), &config, &ctx).unwrap(), "linux-x64");

        config.default_rid = Some("osx-arm64".to_string());
        assert_eq!(target_runtime(&args(None, false), &config, &ctx).unwrap(), "osx-arm64");

        assert_eq!(
            target_runtime(&args(Some("win-x64"), false), &config, &ctx).unwrap(),
            "win-x64"
        );
        assert_eq!(target_runtime(&args(None, true), &config, &ctx).unwrap(), "");
    }

    #[test]
    fn test_missing_runtime_is_invalid_input() {
        let mut ctx = context();
        ctx.target.runtime = None;
        let err = target_runtime(&args(None, false), &RidkitConfig::default(), &ctx).unwrap_err();
        assert!(err.to_string().contains("runtime identifier is required"));
    }

    #[test]
    fn test_render_paths_text() {
        let out = render_paths(&["a.so", "b.so"], OutputFormat::Text).unwrap();
        assert_eq!(out, "a.so\nb.so\n");
    }

    #[test]
    fn test_render_paths_json() {
        let out = render_paths(&["a.so"], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["paths"][0], "a.so");
    }

    #[test]
    fn test_render_files_text_marks_missing_versions() {
        let with = RuntimeFile::with_versions("a.dll", Some(Version::new(1, 0, 0, 0)), None);
        let out = render_files(&[&with], OutputFormat::Text).unwrap();
        assert_eq!(out, "a.dll\t1.0.0.0\t-\n");
    }

    #[test]
    fn test_render_report_text() {
        let ctx = context();
        let report = ResolutionReport::build(&ctx.resolve("linux-x64"), AssetKind::Native);
        let out = render_report(&report, OutputFormat::Text).unwrap();
        assert!(out.starts_with("runtime: linux-x64\nfallbacks: linux -> unix\nkind: native\n"));
        assert!(out.contains("Libuv 1.10.0 [linux]\n  runtimes/linux/native/libuv.so\n"));
        assert!(out.contains("fingerprint: sha256:"));

        let report = ResolutionReport::build(&ctx.resolve_default(), AssetKind::Native);
        let out = render_report(&report, OutputFormat::Text).unwrap();
        assert!(out.contains("Libuv 1.10.0 [(default)]"));
    }

    #[test]
    fn test_render_report_toml() {
        let ctx = context();
        let report = ResolutionReport::build(&ctx.resolve("linux-x64"), AssetKind::Native);
        let out = render_report(&report, OutputFormat::Toml).unwrap();
        let parsed: ResolutionReport = toml::from_str(&out).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_render_names() {
        let names = vec![AssemblyName::from_asset_path("lib/Foo.ni.dll").unwrap()];
        assert_eq!(render_names(&names, OutputFormat::Text).unwrap(), "Foo\n");
        let json = render_names(&names, OutputFormat::Json).unwrap();
        assert!(json.contains("\"Foo\""));
    }
}
