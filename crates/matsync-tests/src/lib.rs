//! Integration tests for matsync crates.
//!
//! End-to-end checks across the color, model and synchronizer layers:
//! defaults files on disk, edit scripts, and serialized render output.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use matsync_color::remap;
    use matsync_core::prelude::*;
    use matsync_material::edit::parse_script;
    use matsync_material::{Edit, MaterialDefaults, MaterialError, MaterialType, RenderTuple, Synchronizer};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    /// Defaults file -> synchronizer -> render tuple
    #[test]
    fn test_defaults_file_pipeline() {
        let file = write_temp(
            "color: [0.0, 1.0, 0.0]\n\
             type: transparent\n\
             reflection_factor: 0.2\n\
             transmission: 0.6\n\
             refractive_index: 1.45\n\
             shininess: 40\n",
        );
        let defaults = MaterialDefaults::from_file(file.path()).unwrap();
        let sync = Synchronizer::from_defaults(&defaults).unwrap();

        let tuple = sync.render_tuple();
        assert_abs_diff_eq!(tuple.opacity, 0.75, epsilon = 1e-12);
        assert_eq!(tuple.refraction_ratio, 1.45);
        assert_eq!(tuple.diffuse, Rgb::black());
    }

    #[test]
    fn test_missing_defaults_file() {
        let dir = tempdir().unwrap();
        let err = MaterialDefaults::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, MaterialError::Io(_)));
    }

    #[test]
    fn test_invalid_defaults_rejected() {
        let file = write_temp("type: painted\nreflection_factor: 0.5\nspecular_coating: 1.5\n");
        let defaults = MaterialDefaults::from_file(file.path()).unwrap();
        assert!(matches!(
            Synchronizer::from_defaults(&defaults),
            Err(MaterialError::InvalidParameter { .. })
        ));
    }

    /// JSON edit script replayed against a fresh synchronizer
    #[test]
    fn test_json_script() {
        let script = r#"[
            {"reflection_factor": 0.5},
            {"specular_coating": 0.3},
            {"color": [1.0, 0.0, 0.0]},
            {"type": "painted"},
            {"type": "metallic"}
        ]"#;
        let edits: Vec<Edit> = serde_json::from_str(script).unwrap();
        let mut sync = Synchronizer::new();
        sync.apply_all(edits).unwrap();

        assert_eq!(sync.material_type(), MaterialType::Metallic);
        assert_abs_diff_eq!(sync.params().reflection_factor(), 0.9 * 0.2126, epsilon = 1e-12);
        assert_abs_diff_eq!(sync.params().specular_coating().unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_yaml_script() {
        let script = "- type: transparent\n- transmission: 0.4\n- refractive_index_only: 1.3\n";
        let edits = parse_script(script).unwrap();
        let mut sync = Synchronizer::new();
        let tuple = sync.apply_all(edits).unwrap();
        assert_eq!(tuple.refraction_ratio, 1.3);
        assert_eq!(sync.params().transmission(), Some(0.4));
    }

    #[test]
    fn test_script_stops_at_failure() {
        let edits = vec![
            Edit::ReflectionFactor(0.4),
            Edit::Transmission(0.2),
            Edit::ReflectionFactor(0.1),
        ];
        let mut sync = Synchronizer::new();
        assert!(sync.apply_all(edits).is_err());
        assert_eq!(sync.params().reflection_factor(), 0.4);
    }

    /// The render tuple survives a JSON round trip through a file.
    #[test]
    fn test_tuple_json_file() {
        let mut sync = Synchronizer::new();
        sync.apply_edit(Edit::Color(Rgb::new(0.9, 0.5, 0.1))).unwrap();
        let tuple = sync.render_tuple();

        let dir = tempdir().unwrap();
        let path = dir.path().join("tuple.json");
        std::fs::write(&path, serde_json::to_string_pretty(&tuple).unwrap()).unwrap();
        let back: RenderTuple = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, tuple);

        let value: serde_json::Value = serde_json::to_value(tuple).unwrap();
        assert_eq!(value["shininess"], 40.0);
        assert_eq!(value["diffuse"].as_array().map(Vec::len), Some(3));
    }

    /// Appearance and the remapper agree on luminance.
    #[test]
    fn test_appearance_matches_remap() {
        let base: Rgb<Srgb> = Rgb::new(0.3, 0.6, 0.9);
        let mut sync = Synchronizer::from_defaults(&MaterialDefaults {
            color: base,
            ..MaterialDefaults::default()
        })
        .unwrap();
        sync.apply_edit(Edit::ReflectionFactor(0.45)).unwrap();

        let expected = remap(base, 0.5).unwrap();
        assert!(sync.appearance().max_abs_diff(expected) < 1e-12);
    }

    /// Every rendered part is an exact luminance share of one remap.
    #[test]
    fn test_render_shares_across_types() {
        let base: Rgb<Srgb> = Rgb::new(0.8, 0.2, 0.6);
        for ty in MaterialType::ALL {
            let mut sync = Synchronizer::from_defaults(&MaterialDefaults {
                color: base,
                material_type: ty,
                reflection_factor: 0.4,
                specular_coating: 0.25,
                transmission: 0.3,
                refractive_index: 1.5,
            })
            .unwrap();
            sync.apply_edit(Edit::Color(base)).unwrap();

            let spectra = sync.rendered().spectra;
            let y = sync.derived().luminance;
            let expected = match ty {
                // painted renders its reflection factor, not the combined Y
                MaterialType::Painted => sync.params().reflection_factor(),
                _ => y,
            };
            assert_abs_diff_eq!(spectra.total_luminance(), expected, epsilon = 1e-6);
            assert!(spectra.is_energy_conserving());
        }
    }
}
