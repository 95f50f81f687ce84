//! Forward mapping command.

use crate::ModelArgs;
use anyhow::{Context, Result};
use matsync_material::model::{self, DerivedState};
use matsync_material::render;
use matsync_material::{MaterialParams, MaterialType};

/// Runs the model command.
pub fn run(args: ModelArgs, verbose: bool) -> Result<()> {
    let params = match args.material_type {
        MaterialType::Metallic => MaterialParams::metallic(args.refl, args.coat),
        MaterialType::Painted => MaterialParams::painted(args.refl, args.coat),
        MaterialType::Transparent => MaterialParams::transparent(args.refl, args.trans, args.n),
    }
    .context("Invalid parameters")?;

    let derived = model::forward(&params, &DerivedState::default());
    println!("{}", params.material_type());
    println!("  luminance:  {:.6}", derived.luminance);
    match derived.shape {
        Some(shape) if params.material_type().is_opaque() => println!("  shape:      {:.6}", shape),
        _ => println!("  ratio T/R:  {}", derived.transmission_ratio),
    }

    if verbose {
        for target in MaterialType::ALL {
            if target != params.material_type() {
                let other = model::inverse(target, &derived, &params, args.n);
                println!("  as {:<12} {:?}", target, other);
            }
        }
    }

    if let Some(color) = args.color.as_deref() {
        let color = super::parse_color(color)?;
        let rendered = render::compute(&params, color).context("Failed to render")?;
        println!("render");
        super::print_tuple(&rendered.tuple);
    }
    Ok(())
}
