//! Parameter/appearance synchronizer.
//!
//! A [`Synchronizer`] owns one material: its base color, its parameters,
//! the derived coefficients and the resulting render tuple. All changes go
//! through [`Synchronizer::apply_edit`], which runs a transaction:
//!
//! 1. validate the edit and reject it before anything changes
//! 2. apply the edited value with its coupling rules
//! 3. refresh the derived state (a color edit sets `Y` from the color and
//!    leaves the shape unspecified; a type switch keeps the outgoing state)
//! 4. for color and type edits, rebuild the parameters by inverse mapping
//! 5. recompute the render tuple and commit
//!
//! The transaction works on a staged copy, so a failing step leaves the
//! synchronizer exactly as it was.
//!
//! # Example
//!
//! ```rust
//! use matsync_material::prelude::*;
//!
//! let mut sync = Synchronizer::new();
//! sync.apply_edit(Edit::ReflectionFactor(0.5)).unwrap();
//! sync.apply_edit(Edit::Color(Rgb::new(1.0, 0.0, 0.0))).unwrap();
//!
//! // a color edit sets Y to 90% of the color's luminance
//! assert!((sync.derived().luminance - 0.9 * 0.2126).abs() < 1e-9);
//! ```

use crate::config::MaterialDefaults;
use crate::edit::Edit;
use crate::error::{MaterialError, MaterialResult};
use crate::model::{self, DerivedState};
use crate::params::{MaterialParams, MaterialType, Parameter};
use crate::render::{self, Rendered, RenderTuple};
use matsync_color::remap;
use matsync_core::{Rgb, Srgb};
use tracing::{debug, trace};

/// Share of incident light a color edit treats as reflected.
pub const COLOR_REFLECTANCE: f64 = 0.9;

/// Everything a synchronizer knows about its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    /// Base color chosen by the operator.
    pub color: Rgb<Srgb>,
    /// Color matching the current parameters.
    pub appearance: Rgb<Srgb>,
    /// Current parameters.
    pub params: MaterialParams,
    /// Coefficients derived from the parameters.
    pub derived: DerivedState,
    /// Refractive index kept while the material is opaque.
    pub refractive_index: f64,
    /// Render tuple and the linear parts behind it.
    pub rendered: Rendered,
}

impl Default for MaterialState {
    fn default() -> Self {
        Self {
            color: Rgb::black(),
            appearance: Rgb::black(),
            params: MaterialParams::default(),
            derived: DerivedState::default(),
            refractive_index: 1.0,
            rendered: Rendered::default(),
        }
    }
}

/// Keeps a material's parameters and appearance consistent.
#[derive(Debug, Default)]
pub struct Synchronizer {
    state: MaterialState,
    in_flight: bool,
}

impl Synchronizer {
    /// Black metallic material with every parameter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronizer starting from `defaults`.
    ///
    /// # Errors
    ///
    /// [`MaterialError::InvalidParameter`] if a default is outside its domain.
    pub fn from_defaults(defaults: &MaterialDefaults) -> MaterialResult<Self> {
        let color = defaults.checked_color()?;
        let params = defaults.params()?;
        let refractive_index = defaults.checked_refractive_index()?;

        let derived = model::forward(&params, &DerivedState::default());
        let state = MaterialState {
            color,
            appearance: appearance(color, derived.luminance)?,
            params,
            derived,
            refractive_index,
            rendered: render::compute(&params, color)?,
        };
        debug!(material_type = %params.material_type(), "synchronizer created");
        Ok(Self {
            state,
            in_flight: false,
        })
    }

    /// Applies one edit and returns the new render tuple.
    ///
    /// # Errors
    ///
    /// Any [`MaterialError`]; the state is unchanged when one is returned.
    pub fn apply_edit(&mut self, edit: Edit) -> MaterialResult<RenderTuple> {
        trace!(%edit, "apply_edit");
        edit.validate()?;
        let mut txn = Transaction::begin(self)?;
        txn.run(edit)?;
        Ok(txn.commit())
    }

    /// Applies edits in order, stopping at the first failure.
    ///
    /// Edits before the failing one stay applied.
    pub fn apply_all<I>(&mut self, edits: I) -> MaterialResult<RenderTuple>
    where
        I: IntoIterator<Item = Edit>,
    {
        for edit in edits {
            self.apply_edit(edit)?;
        }
        Ok(self.render_tuple())
    }

    /// Full state snapshot.
    pub fn state(&self) -> &MaterialState {
        &self.state
    }

    /// Current parameters.
    pub fn params(&self) -> &MaterialParams {
        &self.state.params
    }

    /// Current material type.
    pub fn material_type(&self) -> MaterialType {
        self.state.params.material_type()
    }

    /// Current derived state.
    pub fn derived(&self) -> &DerivedState {
        &self.state.derived
    }

    /// Base color.
    pub fn color(&self) -> Rgb<Srgb> {
        self.state.color
    }

    /// Color matching the current parameters.
    pub fn appearance(&self) -> Rgb<Srgb> {
        self.state.appearance
    }

    /// Refractive index, remembered while opaque.
    pub fn refractive_index(&self) -> f64 {
        self.state.refractive_index
    }

    /// Current render tuple.
    pub fn render_tuple(&self) -> RenderTuple {
        self.state.rendered.tuple
    }

    /// Current render tuple with its linear parts.
    pub fn rendered(&self) -> &Rendered {
        &self.state.rendered
    }
}

/// Base color remapped to the luminance a color edit would have to carry.
fn appearance(color: Rgb<Srgb>, luminance: f64) -> MaterialResult<Rgb<Srgb>> {
    Ok(remap(color, (luminance / COLOR_REFLECTANCE).clamp(0.0, 1.0))?)
}

/// One edit in progress.
///
/// Works on a staged copy and writes it back in [`Transaction::commit`].
/// The owner is marked in flight until the transaction is dropped, whether
/// it commits or bails out with an error.
struct Transaction<'a> {
    owner: &'a mut Synchronizer,
    staged: MaterialState,
}

impl<'a> Transaction<'a> {
    fn begin(owner: &'a mut Synchronizer) -> MaterialResult<Self> {
        if owner.in_flight {
            return Err(MaterialError::EditInFlight);
        }
        owner.in_flight = true;
        let staged = owner.state;
        Ok(Self { owner, staged })
    }

    fn run(&mut self, edit: Edit) -> MaterialResult<()> {
        match edit {
            Edit::Color(color) => self.edit_color(color)?,
            Edit::Type(target) => self.edit_type(target),
            Edit::RefractiveIndexOnly(n) => {
                self.edit_parameter(Parameter::RefractiveIndex, n)?;
                self.staged.rendered.tuple.refraction_ratio = n;
                return Ok(());
            }
            Edit::ReflectionFactor(v) => self.edit_parameter(Parameter::ReflectionFactor, v)?,
            Edit::SpecularCoating(v) => self.edit_parameter(Parameter::SpecularCoating, v)?,
            Edit::Transmission(v) => self.edit_parameter(Parameter::Transmission, v)?,
            Edit::RefractiveIndex(v) => self.edit_parameter(Parameter::RefractiveIndex, v)?,
        }

        if !matches!(edit, Edit::Color(_)) {
            self.staged.appearance = appearance(self.staged.color, self.staged.derived.luminance)?;
        }
        self.staged.rendered = render::compute(&self.staged.params, self.staged.color)?;
        Ok(())
    }

    fn edit_parameter(&mut self, parameter: Parameter, value: f64) -> MaterialResult<()> {
        let params = model::apply_parameter(&self.staged.params, parameter, value)?;
        self.write(params);
        self.staged.derived = model::forward(&self.staged.params, &self.staged.derived);
        Ok(())
    }

    fn edit_color(&mut self, color: Rgb<Srgb>) -> MaterialResult<()> {
        let retained_shape = self.staged.derived.shape;
        self.staged.color = color;
        self.staged.appearance = color;
        self.staged.derived.luminance = COLOR_REFLECTANCE * color.to_linear().luminance();
        self.staged.derived.shape = None;

        let params = model::inverse(
            self.staged.params.material_type(),
            &self.staged.derived,
            &self.staged.params,
            self.staged.refractive_index,
        );
        self.write(params);

        // transparent materials do not re-derive the shape, keep the old one
        let prev = DerivedState {
            shape: retained_shape,
            ..self.staged.derived
        };
        self.staged.derived = model::forward(&self.staged.params, &prev);
        Ok(())
    }

    fn edit_type(&mut self, target: MaterialType) {
        if target == self.staged.params.material_type() {
            return;
        }
        let params = model::inverse(
            target,
            &self.staged.derived,
            &self.staged.params,
            self.staged.refractive_index,
        );
        self.write(params);
        self.staged.derived = model::forward(&self.staged.params, &self.staged.derived);
    }

    /// Stores re-derived parameters without triggering another edit.
    fn write(&mut self, params: MaterialParams) {
        if params != self.staged.params {
            trace!(from = ?self.staged.params, to = ?params, "params");
        }
        if let Some(n) = params.refractive_index() {
            self.staged.refractive_index = n;
        }
        self.staged.params = params;
    }

    fn commit(self) -> RenderTuple {
        self.owner.state = self.staged;
        debug!(
            material_type = %self.staged.params.material_type(),
            luminance = self.staged.derived.luminance,
            "edit committed"
        );
        self.staged.rendered.tuple
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.owner.in_flight = false;
    }
}
