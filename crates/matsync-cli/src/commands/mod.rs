//! CLI command implementations

pub mod edit;
pub mod model;
pub mod remap;

use anyhow::{bail, Context, Result};
use matsync_core::{Rgb, Srgb};
use matsync_material::{Edit, MaterialType, RenderTuple};

/// Parses `R,G,B` into a checked sRGB color.
pub fn parse_color(text: &str) -> Result<Rgb<Srgb>> {
    let channels = text
        .split(',')
        .map(|c| c.trim().parse::<f64>().with_context(|| format!("Invalid channel '{}' in '{}'", c.trim(), text)))
        .collect::<Result<Vec<_>>>()?;
    let [r, g, b] = channels[..] else {
        bail!("Expected R,G,B, got '{}'", text);
    };
    Rgb::try_unit([r, g, b]).with_context(|| format!("Invalid color '{}'", text))
}

/// Parses an inline edit token such as `refl=0.5` or `type=painted`.
pub fn parse_edit(token: &str) -> Result<Edit> {
    let (key, value) = token
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{}'", token))?;
    let number = || {
        value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("Invalid number in '{}'", token))
    };

    let edit = match key.trim() {
        "color" | "c" => Edit::Color(parse_color(value)?),
        "type" | "t" => Edit::Type(value.parse::<MaterialType>()?),
        "refl" | "reflection_factor" => Edit::ReflectionFactor(number()?),
        "coat" | "specular_coating" => Edit::SpecularCoating(number()?),
        "trans" | "transmission" => Edit::Transmission(number()?),
        "n" | "refractive_index" => Edit::RefractiveIndex(number()?),
        "n-only" => Edit::RefractiveIndexOnly(number()?),
        other => bail!("Unknown edit '{}' (expected color, type, refl, coat, trans, n, n-only)", other),
    };
    Ok(edit)
}

/// Prints a render tuple as aligned text.
pub fn print_tuple(tuple: &RenderTuple) {
    println!("  diffuse:      {:.4}", tuple.diffuse);
    println!("  specular:     {:.4}", tuple.specular);
    println!("  ambient:      {:.4}", tuple.ambient);
    println!("  transmission: {:.4}", tuple.transmission);
    println!("  opacity:      {:.4}", tuple.opacity);
    println!("  shininess:    {}", tuple.shininess);
    println!("  refraction:   {:.4}", tuple.refraction_ratio);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("1, 0.5,0").unwrap(), Rgb::new(1.0, 0.5, 0.0));
        assert!(parse_color("1,0").is_err());
        assert!(parse_color("1,0,2").is_err());
        assert!(parse_color("a,b,c").is_err());
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(parse_edit("refl=0.5").unwrap(), Edit::ReflectionFactor(0.5));
        assert_eq!(parse_edit("type=Glass").unwrap(), Edit::Type(MaterialType::Transparent));
        assert_eq!(parse_edit("n-only=1.5").unwrap(), Edit::RefractiveIndexOnly(1.5));
        assert_eq!(parse_edit("color=0,1,0").unwrap(), Edit::Color(Rgb::new(0.0, 1.0, 0.0)));
        assert!(parse_edit("refl").is_err());
        assert!(parse_edit("gloss=0.2").is_err());
        assert!(parse_edit("coat=x").is_err());
    }
}
