//! Relation check and timings for the Humphries generators.
//!
//! Purpose
//! - Print, per genus, how many generator pairs commute or braid, and confirm
//!   both relations through the identity test.
//! - Time the order search on the hyperelliptic involution and the stretch
//!   estimate of `c1 c2^-1` seeded with `c1`.
//!
//! Run with `cargo run -p dehn --example humphries_relations --release`.

use std::time::Instant;

use dehn::generators::{humphries_generators, humphries_twists, hyperelliptic_involution};
use dehn::solve::{find_order, OrderCfg, StretchCfg};
use dehn::{MappingClassWord, SurfaceModel};

fn main() {
    for genus in 1..=4 {
        let model = SurfaceModel::closed(genus).expect("closed surface model");
        let gens = humphries_generators(&model).expect("generators");
        let twists = humphries_twists(&model).expect("twists");

        let mut commuting = 0;
        let mut braided = 0;
        for i in 0..gens.len() {
            for j in (i + 1)..gens.len() {
                let (a, b) = (&twists[i], &twists[j]);
                match gens[i].intersection(&gens[j]) {
                    0 => {
                        assert!(a.compose(b).unwrap().equals(&b.compose(a).unwrap()).unwrap());
                        commuting += 1;
                    }
                    1 => {
                        let aba = &(a * b) * a;
                        let bab = &(b * a) * b;
                        assert!(aba.equals(&bab).unwrap(), "braid relation for generators {i} and {j}");
                        braided += 1;
                    }
                    _ => {}
                }
            }
        }

        let iota = hyperelliptic_involution(&model).expect("involution");
        let order_start = Instant::now();
        let order = find_order(&iota, OrderCfg::default()).expect("order search");
        let order_ms = order_start.elapsed().as_secs_f64() * 1e3;

        let anosov = MappingClassWord::parse(&model, "c1 c2^-1").expect("word");
        let stretch_start = Instant::now();
        let est = anosov
            .estimate_stretch(
                model.reference().curve_word(0).expect("seed"),
                StretchCfg {
                    iterations: 500,
                    ..StretchCfg::default()
                },
            )
            .expect("stretch estimate");
        let stretch_ms = stretch_start.elapsed().as_secs_f64() * 1e3;

        println!(
            "genus={genus} generators={} commuting_pairs={commuting} braid_pairs={braided}",
            gens.len()
        );
        println!(
            "  involution_order={order:?} order_time_ms={order_ms:.3} \
             stretch={:.12} converged={} steps={} stretch_time_ms={stretch_ms:.3}",
            est.factor, est.converged, est.iterations
        );
    }
}
