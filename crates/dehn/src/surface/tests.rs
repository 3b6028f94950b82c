use super::*;
use crate::curve::{Curve, CurveCoordinate};
use crate::error::MappingClassError;
use crate::pi1::{ChordPath, Visit};

fn band(genus: usize, bands: &[usize]) -> ChordPath {
    ChordPath::through(genus, bands).unwrap()
}

#[test]
fn surface_validation() {
    assert!(Surface::closed(0).is_err());
    assert!(matches!(
        Surface::new(2, 1),
        Err(MappingClassError::InvalidSurface { .. })
    ));
    let s = Surface::closed(3).unwrap();
    assert_eq!((s.genus(), s.boundaries(), s.homology_rank()), (3, 0, 6));
}

#[test]
fn homology_classes_and_divisors() {
    let x2 = HomologyClass::generator(2, 2).unwrap();
    assert_eq!(x2.coeffs(), &[0, 1, 0, 0]);
    assert!(x2.is_primitive());
    assert!(HomologyClass::generator(2, 5).is_err());
    let doubled = HomologyClass::new(vec![4, 0, -6, 2]).unwrap();
    assert_eq!(doubled.divisor(), 2);
    assert!(!doubled.is_primitive());
    assert!(HomologyClass::zero(2).is_zero());
    assert_eq!(HomologyClass::zero(2).divisor(), 0);
    assert!(HomologyClass::new(vec![1, 2, 3]).is_err());
}

#[test]
fn standard_chain_intersections() {
    for genus in 1..=4 {
        let refs = ReferenceCurveSystem::standard(Surface::closed(genus).unwrap()).unwrap();
        let chain_len = 2 * genus + 1;
        let extra = usize::from(genus >= 2);
        assert_eq!(refs.len(), chain_len + extra);
        for k in 0..chain_len {
            for l in 0..chain_len {
                let expected = usize::from(k.abs_diff(l) == 1);
                assert_eq!(refs.intersection(k, l), expected, "genus {genus}: c{} c{}", k + 1, l + 1);
            }
        }
        if genus >= 2 {
            let c0 = refs.index_of("c0").unwrap();
            let c4 = refs.index_of("c4").unwrap();
            for l in 0..refs.len() {
                assert_eq!(refs.intersection(c0, l), usize::from(l == c4));
            }
        }
    }
}

#[test]
fn reference_coordinates_are_matrix_rows() {
    let m = SurfaceModel::closed(2).unwrap();
    let refs = m.reference();
    for i in 0..refs.len() {
        let row: Vec<i64> = (0..refs.len()).map(|j| refs.intersection(i, j) as i64).collect();
        assert_eq!(
            refs.reference_coordinate(i).unwrap(),
            CurveCoordinate::from_i64s(&row).unwrap()
        );
    }
}

#[test]
fn isotopic_reference_curves_are_recognised() {
    // Genus 1: c3 runs through the odd bands, which is just x1.
    let t = SurfaceModel::closed(1).unwrap();
    let c3 = t.reference().curve_word(2).unwrap();
    assert!(t.reference().is_reference_curve(0, c3).unwrap());
    // Genus 2: c5 and c0 are both x1 x3.
    let m = SurfaceModel::closed(2).unwrap();
    let refs = m.reference();
    let c0 = refs.index_of("c0").unwrap();
    assert!(refs.is_reference_curve(c0, refs.curve_word(4).unwrap()).unwrap());
    assert!(!refs.is_reference_curve(c0, refs.curve_word(3).unwrap()).unwrap());
    // Orientation does not matter.
    let reversed = Curve::new(2, &[-3, -1]).unwrap();
    assert!(refs.is_reference_curve(4, &reversed).unwrap());
}

#[test]
fn reference_system_rejects_bad_curves() {
    let s = Surface::closed(1).unwrap();
    let dup = vec![
        ReferenceCurve::new("x", band(1, &[1])),
        ReferenceCurve::new("x", band(1, &[2])),
    ];
    assert!(matches!(
        ReferenceCurveSystem::new(s, dup),
        Err(MappingClassError::InvalidSurface { .. })
    ));
    // x1 then x1 backwards is null-homotopic.
    let back = ChordPath::new(1, vec![Visit::forward(1), Visit::backward(1)]).unwrap();
    assert!(ReferenceCurveSystem::new(s, vec![ReferenceCurve::new("z", back)]).is_err());
    // x1 twice under two names does not span H1 of the torus.
    let thin = vec![
        ReferenceCurve::new("a", band(1, &[1])),
        ReferenceCurve::new("a'", band(1, &[1])),
    ];
    assert!(ReferenceCurveSystem::new(s, thin).is_err());
    // Curves of the wrong genus.
    let foreign = vec![ReferenceCurve::new("c1", band(2, &[1]))];
    assert!(matches!(
        ReferenceCurveSystem::new(s, foreign),
        Err(MappingClassError::DimensionMismatch { .. })
    ));
}

#[test]
fn non_primitive_reference_class_is_rejected() {
    let s = Surface::closed(1).unwrap();
    let curves = vec![
        ReferenceCurve::new("c1", band(1, &[1])),
        ReferenceCurve::new("c2", band(1, &[2])),
        ReferenceCurve::new("twice", band(1, &[1, 1])),
    ];
    match ReferenceCurveSystem::new(s, curves) {
        Err(MappingClassError::InvalidSurface { reason }) => {
            assert!(reason.contains("not primitive"), "{reason}");
            assert!(reason.contains("twice"), "{reason}");
        }
        other => panic!("expected a primitivity error, got {other:?}"),
    }
}

#[test]
fn crossing_paths_are_rejected() {
    let s = Surface::closed(2).unwrap();
    let mut curves: Vec<ReferenceCurve> = (1..=4)
        .map(|k| ReferenceCurve::new(format!("c{k}"), band(2, &[k])))
        .collect();
    // Class x1² x2 is primitive, but this drawing of it crosses itself.
    curves.push(ReferenceCurve::new("knot", band(2, &[1, 2, 1])));
    match ReferenceCurveSystem::new(s, curves) {
        Err(MappingClassError::InvalidSurface { reason }) => {
            assert!(reason.contains("not simple"), "{reason}");
        }
        other => panic!("expected a simplicity error, got {other:?}"),
    }
}

#[test]
fn custom_system_measures_like_the_standard_one() {
    let s = Surface::closed(1).unwrap();
    let curves = vec![
        ReferenceCurve::new("b", band(1, &[2])),
        ReferenceCurve::new("a", band(1, &[1])),
        ReferenceCurve::new("slope", band(1, &[1, 1, 2])),
    ];
    let refs = ReferenceCurveSystem::new(s, curves).unwrap();
    assert_eq!(refs.intersection(0, 1), 1);
    // |det((2, 1), (0, 1))| = 2 and |det((2, 1), (1, 0))| = 1.
    assert_eq!(refs.intersection(2, 0), 2);
    assert_eq!(refs.intersection(2, 1), 1);
}

#[test]
fn lookup_by_name_and_index() {
    let model = SurfaceModel::closed(2).unwrap();
    let refs = model.reference();
    assert_eq!(refs.index_of("c1").unwrap(), 0);
    assert_eq!(refs.index_of("c0").unwrap(), 5);
    assert_eq!(
        refs.index_of("c9"),
        Err(MappingClassError::UnknownCurve {
            name: "c9".to_string()
        })
    );
    assert!(refs.curve(6).is_err());
    assert!(refs.curve_word(6).is_err());
    assert!(refs.generator(6, crate::twist::Handedness::Left).is_err());
}

#[test]
fn witness_family_rank_check() {
    let model = SurfaceModel::closed(2).unwrap();
    let refs = model.reference();
    assert_eq!(model.witnesses().indices(), &[0, 1, 2, 3, 4]);
    assert_eq!(
        WitnessFamily::from_names(refs, &["c1", "c2"]),
        Err(MappingClassError::WitnessRank {
            rank: 2,
            expected: 4
        })
    );
    let w = WitnessFamily::from_names(refs, &["c1", "c2", "c3", "c4"]).unwrap();
    assert_eq!(w.len(), 4);
    assert!(SurfaceModel::new(refs.clone(), w).is_ok());
    assert!(WitnessFamily::from_names(refs, &["c1", "c7"]).is_err());
}

#[test]
fn model_rejects_foreign_witnesses() {
    let g1 = SurfaceModel::closed(1).unwrap();
    let g2 = SurfaceModel::closed(2).unwrap();
    let err = SurfaceModel::new(g2.reference().clone(), g1.witnesses().clone());
    assert!(matches!(err, Err(MappingClassError::DimensionMismatch { .. })));
}

#[test]
fn generic_seed_meets_the_chain() {
    let torus = SurfaceModel::closed(1).unwrap();
    let seed = torus.generic_seed().unwrap();
    assert_eq!(seed, Curve::new(1, &[1, -2]).unwrap());
    assert_eq!(
        torus.reference().coordinate_of(&seed).unwrap(),
        CurveCoordinate::from_i64s(&[1, 1, 1]).unwrap()
    );
    let m = SurfaceModel::closed(2).unwrap();
    let seed = m.generic_seed().unwrap();
    assert_eq!(
        m.reference().coordinate_of(&seed).unwrap(),
        CurveCoordinate::from_i64s(&[1, 0, 2, 1, 1, 1]).unwrap()
    );
    assert!(matches!(
        torus.reference().coordinate_of(&seed),
        Err(MappingClassError::DimensionMismatch { .. })
    ));
}
