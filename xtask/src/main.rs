//! numpy-parity harness.
//!
//! Computes reference pmf/cdf/pval values in Python with an independent
//! O(n^2) convolution recurrence and compares them against the crate's
//! transform-based results. Run with `cargo xtask` (alias for
//! `cargo run -p xtask`); set `PYTHON_BIN` to pick a Python interpreter.

use anyhow::{bail, Context, Result};
use poibin_rs::distribution::PoissonBinomial;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Write;
use std::process::{Command, Stdio};

const DEFAULT_PYTHON_BIN: &str = "python";

/// Values are compared against the reference within this tolerance.
const TOLERANCE: f64 = 1e-9;

const PY_REFERENCE_SCRIPT: &str = r#"
import json
import sys

import numpy as np


def reference_mass(p):
    """Exact convolution recurrence, independent of the transform method."""
    mass = np.array([1.0])
    for pi in p:
        mass = np.convolve(mass, [1.0 - pi, pi])
    return mass


def main():
    payload = json.load(sys.stdin)
    results = []
    for case in payload["cases"]:
        p = case["probabilities"]
        ks = case["outcomes"]
        mass = reference_mass(p)
        cumulative = np.cumsum(mass)
        results.append({
            "pmf": [float(mass[k]) for k in ks],
            "cdf": [float(cumulative[k]) for k in ks],
            "pval": [
                1.0 if k == 0 else float(1.0 - cumulative[k - 1]) for k in ks
            ],
        })
    json.dump({"results": results}, sys.stdout)


if __name__ == "__main__":
    main()
"#;

#[derive(Debug, Serialize)]
struct Case {
    name: &'static str,
    probabilities: Vec<f64>,
    outcomes: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct CaseResult {
    pmf: Vec<f64>,
    cdf: Vec<f64>,
    pval: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ReferenceOutput {
    results: Vec<CaseResult>,
}

fn parity_cases() -> Vec<Case> {
    let mut cases = vec![
        Case {
            name: "symmetric_binomial",
            probabilities: vec![0.5, 0.5, 0.5],
            outcomes: (0..=3).collect(),
        },
        Case {
            name: "all_failures",
            probabilities: vec![0.0; 8],
            outcomes: (0..=8).collect(),
        },
        Case {
            name: "all_successes",
            probabilities: vec![1.0; 8],
            outcomes: (0..=8).collect(),
        },
        Case {
            name: "mixed_small",
            probabilities: vec![0.02, 0.13, 0.25, 0.38, 0.41, 0.57, 0.63, 0.72, 0.86, 0.99],
            outcomes: (0..=10).collect(),
        },
    ];

    // A deterministic pseudo-random vector, long enough to stress the
    // log/angle accumulation in the spectrum builder.
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    let mut probabilities = Vec::with_capacity(64);
    for _ in 0..64 {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        probabilities.push((state >> 11) as f64 / (1u64 << 53) as f64);
    }
    cases.push(Case {
        name: "mixed_large",
        probabilities,
        outcomes: (0..=64).collect(),
    });

    cases
}

fn run_reference(python: &str, cases: &[Case]) -> Result<ReferenceOutput> {
    let mut child = Command::new(python)
        .arg("-c")
        .arg(PY_REFERENCE_SCRIPT)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to launch `{python}`"))?;

    let payload = json!({ "cases": cases });
    child
        .stdin
        .as_mut()
        .context("reference process stdin unavailable")?
        .write_all(payload.to_string().as_bytes())
        .context("failed to stream cases to the reference process")?;

    let output = child
        .wait_with_output()
        .context("reference process did not finish")?;
    if !output.status.success() {
        bail!(
            "reference script exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).context("malformed reference output")
}

fn compare(name: &str, quantity: &str, actual: &[f64], expected: &[f64]) -> Result<usize> {
    if actual.len() != expected.len() {
        bail!(
            "{name}/{quantity}: length mismatch ({} vs {})",
            actual.len(),
            expected.len()
        );
    }
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if (a - e).abs() > TOLERANCE {
            bail!("{name}/{quantity}[{i}]: {a} diverges from reference {e}");
        }
    }
    Ok(actual.len())
}

fn check_case(case: &Case, reference: &CaseResult) -> Result<usize> {
    let distribution = PoissonBinomial::from_probabilities(case.probabilities.as_slice())
        .with_context(|| format!("{}: construction failed", case.name))?;

    let pmf = distribution
        .pmf_alloc(case.outcomes.as_slice())
        .with_context(|| format!("{}: pmf query failed", case.name))?;
    let cdf = distribution
        .cdf_alloc(case.outcomes.as_slice())
        .with_context(|| format!("{}: cdf query failed", case.name))?;
    let pval = distribution
        .pval_alloc(case.outcomes.as_slice())
        .with_context(|| format!("{}: pval query failed", case.name))?;

    let mut checked = 0;
    checked += compare(case.name, "pmf", &pmf, &reference.pmf)?;
    checked += compare(case.name, "cdf", &cdf, &reference.cdf)?;
    checked += compare(case.name, "pval", &pval, &reference.pval)?;
    Ok(checked)
}

fn main() -> Result<()> {
    let python =
        std::env::var("PYTHON_BIN").unwrap_or_else(|_| DEFAULT_PYTHON_BIN.to_string());

    let cases = parity_cases();
    let reference = run_reference(&python, &cases)?;
    if reference.results.len() != cases.len() {
        bail!(
            "reference produced {} results for {} cases",
            reference.results.len(),
            cases.len()
        );
    }

    let mut checked = 0;
    for (case, result) in cases.iter().zip(reference.results.iter()) {
        checked += check_case(case, result)?;
        println!("parity ok: {}", case.name);
    }
    println!(
        "parity ok: {} cases, {} values within {TOLERANCE:e}",
        cases.len(),
        checked
    );
    Ok(())
}
