//! Luminance remap command.
//!
//! Rescales one color to a target luminance and prints the result.

use crate::RemapArgs;
use anyhow::{Context, Result};
use matsync_color::{remap_with_report, Saturation};
use serde_json::json;
use tracing::debug;

/// Runs the remap command.
pub fn run(args: RemapArgs, verbose: bool) -> Result<()> {
    let color = super::parse_color(&args.color)?;
    let report = remap_with_report(color, args.luminance)
        .with_context(|| format!("Failed to remap {} to luminance {}", args.color, args.luminance))?;
    let out = report.srgb();
    debug!(?report, "remapped");

    if args.json {
        let mut value = json!({
            "input": color,
            "luminance": args.luminance,
            "output": out,
            "linear": report.linear,
        });
        if args.report {
            value["scaled"] = json!(report.scaled);
            value["filled"] = json!(report.filled);
            value["saturated"] = json!(saturated(report.saturation));
            value["degenerate"] = json!(report.degenerate);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{:.6}", out);
    if args.report || verbose {
        println!("  input:      {:.6}", color);
        println!("  linear:     {:.6}", report.linear);
        println!("  luminance:  {:.6}", report.linear.luminance());
        println!("  scaled W:   {:.6?}", report.scaled);
        println!("  filled W:   {:.6?}", report.filled);
        println!("  saturated:  {:?}", saturated(report.saturation));
        if report.degenerate {
            println!("  degenerate input, used neutral gray");
        }
    }
    Ok(())
}

/// Channel names held at their cap.
fn saturated(saturation: Saturation) -> Vec<&'static str> {
    const NAMES: [&str; 3] = ["R", "G", "B"];
    match saturation {
        Saturation::None => Vec::new(),
        Saturation::Single(i) => vec![NAMES[i]],
        Saturation::Double(i, j) => vec![NAMES[i], NAMES[j]],
    }
}
