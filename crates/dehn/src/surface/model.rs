//! The shared, immutable surface model every word points at.

use std::sync::Arc;

use super::reference::ReferenceCurveSystem;
use super::types::Surface;
use super::witness::WitnessFamily;
use crate::curve::Curve;
use crate::error::{MappingClassError, Result};

/// Surface + reference curve system + witness family, built once and shared
/// behind `Arc` by every word, generator lookup, and solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceModel {
    reference: ReferenceCurveSystem,
    witnesses: WitnessFamily,
}

impl SurfaceModel {
    /// Closed genus-g surface with the standard system and witness family.
    pub fn closed(genus: usize) -> Result<Arc<Self>> {
        let reference = ReferenceCurveSystem::standard(Surface::closed(genus)?)?;
        let witnesses = WitnessFamily::standard(&reference)?;
        Self::new(reference, witnesses)
    }

    pub fn new(reference: ReferenceCurveSystem, witnesses: WitnessFamily) -> Result<Arc<Self>> {
        if witnesses.is_empty() {
            return Err(MappingClassError::WitnessRank {
                rank: 0,
                expected: reference.surface().homology_rank(),
            });
        }
        MappingClassError::check_dim(reference.len(), witnesses.dim())?;
        Ok(Arc::new(Self {
            reference,
            witnesses,
        }))
    }

    #[inline]
    pub fn surface(&self) -> Surface {
        self.reference.surface()
    }

    #[inline]
    pub fn genus(&self) -> usize {
        self.surface().genus()
    }

    /// Rank of `H1` and of the band generating set, `2g`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.surface().homology_rank()
    }

    #[inline]
    pub fn reference(&self) -> &ReferenceCurveSystem {
        &self.reference
    }

    #[inline]
    pub fn witnesses(&self) -> &WitnessFamily {
        &self.witnesses
    }

    /// Coordinate length (number of reference curves).
    #[inline]
    pub fn dim(&self) -> usize {
        self.reference.len()
    }

    /// Default stretch-factor seed: the alternating word
    /// `x1 x2⁻¹ x3 x4⁻¹ …` through every band.
    ///
    /// It meets most reference curves, which keeps it off the invariant
    /// subsurfaces of the words used in practice; pass an explicit seed when
    /// it matters.
    pub fn generic_seed(&self) -> Result<Curve> {
        let letters: Vec<i32> = (1..=self.rank() as i32)
            .map(|k| if k % 2 == 1 { k } else { -k })
            .collect();
        Curve::from_letters(self.rank(), letters)
    }
}

/// Same model by identity or by value.
#[inline]
pub(crate) fn same_model(a: &Arc<SurfaceModel>, b: &Arc<SurfaceModel>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}
