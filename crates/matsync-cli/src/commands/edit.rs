//! Edit replay command.
//!
//! Builds a synchronizer from defaults, applies a script and/or inline
//! edits in order, then prints the resulting material.

use crate::EditArgs;
use anyhow::{Context, Result};
use matsync_core::{Rgb, Srgb};
use matsync_material::edit::parse_script;
use matsync_material::{DerivedState, Edit, MaterialDefaults, MaterialParams, RenderTuple, Synchronizer};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Final state printed by `--json`.
#[derive(Serialize)]
struct Output {
    params: MaterialParams,
    derived: DerivedState,
    color: Rgb<Srgb>,
    appearance: Rgb<Srgb>,
    render: RenderTuple,
}

/// Runs the edit command.
pub fn run(args: EditArgs, verbose: bool) -> Result<()> {
    let defaults = match &args.config {
        Some(path) => MaterialDefaults::from_file(path)
            .with_context(|| format!("Failed to load defaults: {}", path.display()))?,
        None => MaterialDefaults::default(),
    };
    let mut sync = Synchronizer::from_defaults(&defaults).context("Invalid defaults")?;

    let mut edits = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    for token in &args.edits {
        edits.push(super::parse_edit(token)?);
    }

    for (i, edit) in edits.into_iter().enumerate() {
        sync.apply_edit(edit)
            .with_context(|| format!("Edit #{} ({}) failed", i + 1, edit))?;
        info!(%edit, "applied");
        if verbose && !args.json {
            println!("{}: {:?}", edit, sync.params());
        }
    }

    if args.json {
        let out = Output {
            params: *sync.params(),
            derived: *sync.derived(),
            color: sync.color(),
            appearance: sync.appearance(),
            render: sync.render_tuple(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let params = sync.params();
    println!("{}", params.material_type());
    println!("  reflection:   {:.4}", params.reflection_factor());
    if let Some(coat) = params.specular_coating() {
        println!("  coating:      {:.4}", coat);
    }
    if let Some(trans) = params.transmission() {
        println!("  transmission: {:.4}", trans);
    }
    println!("  luminance:    {:.4}", sync.derived().luminance);
    println!("  appearance:   {:.4}", sync.appearance());
    println!("render");
    super::print_tuple(&sync.render_tuple());
    Ok(())
}

/// Reads an edit list; `.json` files are parsed as JSON, anything else as YAML.
pub fn load_script(path: &Path) -> Result<Vec<Edit>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let edits: Vec<Edit> = if is_json {
        serde_json::from_str(&text).with_context(|| format!("Invalid script: {}", path.display()))?
    } else {
        parse_script(&text).with_context(|| format!("Invalid script: {}", path.display()))?
    };
    Ok(edits)
}
