use std::collections::{BTreeSet, HashMap};

use anyhow::Context;
use serde::Deserialize;

/// Crates that must stay free of I/O, and what they may not pull in.
const PURE_CRATES: &[&str] = &["formwalk-domain", "formwalk-shared"];
const FORBIDDEN_IN_PURE: &[&str] = &["tokio", "reqwest", "tracing-subscriber", "dotenvy"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_members: Vec<String>,
    resolve: Option<Resolve>,
}

#[derive(Debug, Deserialize)]
struct Package {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Resolve {
    nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    id: String,
    dependencies: Vec<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let violations = find_violations(&metadata)?;

    if violations.is_empty() {
        println!("arch-check passed");
        return Ok(());
    }
    for v in &violations {
        eprintln!("  {v}");
    }
    anyhow::bail!("arch-check failed with {} violation(s)", violations.len())
}

/// Every (pure crate, forbidden crate) pair reachable in the dependency graph.
fn find_violations(metadata: &Metadata) -> anyhow::Result<Vec<String>> {
    let resolve = metadata
        .resolve
        .as_ref()
        .context("cargo metadata has no resolve graph")?;
    let names: HashMap<&str, &str> = metadata
        .packages
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    let edges: HashMap<&str, &[String]> = resolve
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.dependencies.as_slice()))
        .collect();

    let mut violations = Vec::new();
    for member in &metadata.workspace_members {
        let Some(&name) = names.get(member.as_str()) else {
            continue;
        };
        if !PURE_CRATES.contains(&name) {
            continue;
        }

        let mut seen = BTreeSet::new();
        let mut stack = vec![member.as_str()];
        while let Some(id) = stack.pop() {
            for dep in edges.get(id).copied().unwrap_or_default() {
                if seen.insert(dep.as_str()) {
                    stack.push(dep.as_str());
                }
            }
        }

        for dep in seen {
            if let Some(&dep_name) = names.get(dep) {
                if FORBIDDEN_IN_PURE.contains(&dep_name) {
                    violations.push(format!("{name} depends on {dep_name}"));
                }
            }
        }
    }
    Ok(violations)
}
