//! `ciplan diff`: Compare two step graph snapshots.

use std::path::PathBuf;

use clap::Args;

use ciplan_graph::StepGraphSnapshot;

/// Arguments for the `diff` command.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Baseline snapshot file.
    pub left: PathBuf,
    /// Snapshot file to compare against the baseline.
    pub right: PathBuf,
}

/// Executes the `diff` command.
///
/// # Errors
///
/// Returns an error if either file cannot be read, or if the snapshots
/// differ.
pub fn execute(args: DiffArgs) -> anyhow::Result<()> {
    let left = StepGraphSnapshot::read_from(&args.left)?;
    let right = StepGraphSnapshot::read_from(&args.right)?;

    if left.is_equivalent(&right) {
        println!("Snapshots are equivalent ({} step(s)).", left.steps().len());
        return Ok(());
    }

    let differences = left.differences(&right);
    println!("Steps that differ:");
    for name in &differences {
        println!("  ~ {name}");
    }
    anyhow::bail!("{} step(s) differ between snapshots", differences.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciplan_graph::StepWithDependencies;

    fn write(dir: &std::path::Path, file: &str, records: Vec<StepWithDependencies>) -> PathBuf {
        let path = dir.join(file);
        StepGraphSnapshot(records).write_to_path(&path).expect("write");
        path
    }

    fn record(name: &str, dependencies: &[&str]) -> StepWithDependencies {
        StepWithDependencies {
            step_name: name.into(),
            dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    #[test]
    fn reordered_snapshots_are_equivalent() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let left = write(dir.path(), "left.json", vec![record("a", &[]), record("b", &["a"])]);
        let right = write(dir.path(), "right.json", vec![record("b", &["a"]), record("a", &[])]);
        assert!(execute(DiffArgs { left, right }).is_ok());
    }

    #[test]
    fn changed_dependencies_fail_the_diff() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let left = write(dir.path(), "left.json", vec![record("a", &[]), record("b", &["a"])]);
        let right = write(dir.path(), "right.json", vec![record("a", &[]), record("b", &[])]);
        let err = execute(DiffArgs { left, right }).expect_err("snapshots differ");
        assert!(err.to_string().contains("1 step(s) differ"), "got: {err}");
    }
}
