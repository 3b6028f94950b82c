use super::*;
use crate::curve::{Curve, CurveCoordinate};
use crate::error::MappingClassError;
use crate::surface::SurfaceModel;
use crate::twist::Handedness;
use num_bigint::BigInt;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

fn word(model: &Arc<SurfaceModel>, text: &str) -> MappingClassWord {
    MappingClassWord::parse(model, text).unwrap()
}

#[test]
fn reduction_merges_and_cancels() {
    let m = SurfaceModel::closed(2).unwrap();
    let w = word(&m, "c1 c1 c2^3 c2^-3 c1^-1");
    assert_eq!(w.letters(), &[Letter::new(0, 1)]);
    let empty = word(&m, "c3^2 c3^-2");
    assert!(empty.is_empty());
    let zero = word(&m, "c1^0");
    assert!(zero.is_empty());
}

#[test]
fn compose_cancels_across_the_seam() {
    let m = SurfaceModel::closed(2).unwrap();
    let u = word(&m, "c1 c2 c3");
    let v = word(&m, "c3^-1 c2^-1 c4");
    let uv = u.compose(&v).unwrap();
    assert_eq!(uv.letters(), &[Letter::new(0, 1), Letter::new(3, 1)]);
    assert_eq!((&u * &v).letters(), uv.letters());
}

#[test]
fn inverse_and_powers() {
    let m = SurfaceModel::closed(2).unwrap();
    let w = word(&m, "c1 c2^-2 c0");
    let inv = w.inverse();
    assert_eq!(
        inv.letters(),
        &[Letter::new(5, -1), Letter::new(1, 2), Letter::new(0, -1)]
    );
    assert!(w.pow(0).unwrap().is_empty());
    assert_eq!(w.pow(3).unwrap().len(), 9);
    assert_eq!(w.pow(-2).unwrap().letters(), inv.pow(2).unwrap().letters());
    // Single-letter powers collapse.
    assert_eq!(word(&m, "c2").pow(5).unwrap().letters(), &[Letter::new(1, 5)]);
}

#[test]
fn merged_exponents_that_overflow_are_rejected() {
    let m = SurfaceModel::closed(2).unwrap();
    let err = MappingClassWord::parse(&m, "c1^9223372036854775807 c1").unwrap_err();
    assert!(matches!(err, MappingClassError::ExponentOverflow { .. }));
    let big = word(&m, "c1^9223372036854775807");
    assert!(matches!(
        big.pow(2),
        Err(MappingClassError::ExponentOverflow { .. })
    ));
    // Opposite signs still merge down to zero.
    assert!(word(&m, "c1^9223372036854775807 c1^-9223372036854775807").is_empty());
}

#[test]
fn most_negative_exponent_has_no_inverse_and_is_refused() {
    let m = SurfaceModel::closed(2).unwrap();
    let err = MappingClassWord::parse(&m, "c1^-9223372036854775808").unwrap_err();
    assert!(matches!(err, MappingClassError::ExponentOverflow { .. }));
    let w = word(&m, "c1^-9223372036854775807");
    assert_eq!(w.inverse().letters()[0].exponent, i64::MAX);
}

#[test]
fn rightmost_letter_acts_first() {
    let m = SurfaceModel::closed(1).unwrap();
    let refs = m.reference();
    let t1 = refs.generator(0, Handedness::Left).unwrap();
    let t2 = refs.generator(1, Handedness::Left).unwrap();
    let w = word(&m, "c1 c2");
    for index in 0..2 {
        let c = refs.curve_word(index).unwrap();
        let expected = t1.apply(&t2.apply(c).unwrap()).unwrap();
        assert_eq!(w.apply(c).unwrap(), expected);
    }
    // T_c1(c2) = x1^-1 x2 meets each chain curve once.
    let image = word(&m, "c1").apply(refs.curve_word(1).unwrap()).unwrap();
    assert_eq!(image, Curve::new(1, &[-1, 2]).unwrap());
    assert_eq!(
        refs.coordinate_of(&image).unwrap(),
        CurveCoordinate::from_i64s(&[1, 1, 1]).unwrap()
    );
}

#[test]
fn curve_images_carry_the_homology_action() {
    let m = SurfaceModel::closed(2).unwrap();
    let w = word(&m, "c1 c2^-1 c0^2 c4");
    let seed = m.generic_seed().unwrap();
    let image = w.apply(&seed).unwrap();
    let before: Vec<BigInt> = seed.homology().coeffs().iter().map(|&x| BigInt::from(x)).collect();
    let after: Vec<BigInt> = image.homology().coeffs().iter().map(|&x| BigInt::from(x)).collect();
    assert_eq!(w.apply_homology(&before).unwrap(), after);
    assert!(matches!(
        w.apply_homology(&before[..2]),
        Err(MappingClassError::DimensionMismatch { .. })
    ));
}

#[test]
fn parse_errors() {
    let m = SurfaceModel::closed(1).unwrap();
    assert!(matches!(
        MappingClassWord::parse(&m, "c1 c0"),
        Err(MappingClassError::UnknownCurve { .. })
    ));
    assert!(matches!(
        MappingClassWord::parse(&m, "c1^x"),
        Err(MappingClassError::Parse { .. })
    ));
    assert!(matches!(
        MappingClassWord::parse(&m, "^2"),
        Err(MappingClassError::Parse { .. })
    ));
    assert!(MappingClassWord::parse(&m, "  id ").unwrap().is_empty());
    assert_eq!(
        MappingClassWord::parse(&m, "c1*c2^+2").unwrap().letters(),
        &[Letter::new(0, 1), Letter::new(1, 2)]
    );
}

#[test]
fn display_round_trips_through_parse() {
    let m = SurfaceModel::closed(2).unwrap();
    let w = word(&m, "c1*c2^-1 c2^-1 c0^3 c5");
    assert_eq!(w.to_string(), "c1 c2^-2 c0^3 c5");
    assert_eq!(word(&m, &w.to_string()).letters(), w.letters());
    assert_eq!(MappingClassWord::identity(&m).to_string(), "id");
}

#[test]
fn foreign_models_do_not_mix() {
    let g1 = SurfaceModel::closed(1).unwrap();
    let g2 = SurfaceModel::closed(2).unwrap();
    let u = word(&g1, "c1");
    let v = word(&g2, "c1");
    assert_eq!(u.compose(&v).unwrap_err(), MappingClassError::SurfaceMismatch);
    assert!(u != v);
    let c = g2.reference().curve_word(0).unwrap();
    assert!(matches!(
        u.apply(c),
        Err(MappingClassError::DimensionMismatch { .. })
    ));
    // A structurally equal model built separately is accepted.
    let g1b = SurfaceModel::closed(1).unwrap();
    assert!(u.compose(&word(&g1b, "c2")).is_ok());
}

#[test]
#[should_panic(expected = "cannot compose words")]
fn operator_panics_on_mismatch() {
    let g1 = SurfaceModel::closed(1).unwrap();
    let g2 = SurfaceModel::closed(2).unwrap();
    let _ = word(&g1, "c1") * word(&g2, "c1");
}

#[test]
fn from_generator_uses_handedness() {
    let m = SurfaceModel::closed(2).unwrap();
    let g = m.reference().generator(2, Handedness::Right).unwrap();
    let w = MappingClassWord::from_generator(&m, &g).unwrap();
    assert_eq!(w.letters(), &[Letter::new(2, -1)]);
    assert!(MappingClassWord::twist(&m, 17).is_err());
}

#[test]
fn random_words_invert_seeded() {
    let m = SurfaceModel::closed(3).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let c = m.generic_seed().unwrap();
    for _ in 0..20 {
        let letters: Vec<Letter> = (0..10)
            .map(|_| Letter::new(rng.gen_range(0..m.dim()), rng.gen_range(-2..=2)))
            .collect();
        let w = MappingClassWord::from_letters(&m, letters).unwrap();
        let there = w.apply(&c).unwrap();
        assert_eq!(w.inverse().apply(&there).unwrap(), c);
        assert!(w.compose(&w.inverse()).unwrap().is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn apply_is_a_homomorphism(
        a in proptest::collection::vec((0usize..6, -2i64..=2), 0..8),
        b in proptest::collection::vec((0usize..6, -2i64..=2), 0..8),
        w in 0usize..6,
    ) {
        let m = SurfaceModel::closed(2).unwrap();
        let u = MappingClassWord::from_letters(&m, a.into_iter().map(|(c, e)| Letter::new(c, e))).unwrap();
        let v = MappingClassWord::from_letters(&m, b.into_iter().map(|(c, e)| Letter::new(c, e))).unwrap();
        let c = m.reference().curve_word(w).unwrap();
        let composed = u.compose(&v).unwrap().apply(c).unwrap();
        let threaded = u.apply(&v.apply(c).unwrap()).unwrap();
        prop_assert_eq!(composed, threaded);
    }
}
