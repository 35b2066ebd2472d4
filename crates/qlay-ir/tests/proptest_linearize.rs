//! Property-based tests for circuit linearization.
//!
//! Position is the only ordering key, ties keep insertion order, and
//! measurement names are handed out sequentially in execution order.

use proptest::prelude::*;
use qlay_ir::{Circuit, GatePlacement, GateSignature, SignatureCatalog, linearize};

fn catalog() -> SignatureCatalog {
    SignatureCatalog::new()
        .with("H", GateSignature::single())
        .with("X", GateSignature::single())
        .with("M", GateSignature::measurement())
        .with("Mx", GateSignature::measurement())
}

/// Random placements on up to 4 lines; positions drawn from a small set so
/// that ties are common.
fn arb_placements() -> impl Strategy<Value = Vec<GatePlacement>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["H", "X", "M", "Mx"]),
            0_usize..4,
            0_u8..8,
        ),
        0..=24,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .map(|(id, line, slot)| {
                GatePlacement::unchecked(id)
                    .on_line(line)
                    .at(f64::from(slot) * 40.0)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn positions_are_non_decreasing(placements in arb_placements()) {
        let ordered = linearize(placements, &catalog()).unwrap();
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].position <= pair[1].position);
        }
    }

    #[test]
    fn equal_positions_keep_insertion_order(placements in arb_placements()) {
        // Tag each placement with its insertion index through the angle list.
        let tagged: Vec<_> = placements
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.with_angles([i as f64]))
            .collect();

        let ordered = linearize(tagged, &catalog()).unwrap();
        for pair in ordered.windows(2) {
            if pair[0].position == pair[1].position {
                prop_assert!(pair[0].angle_args[0] < pair[1].angle_args[0]);
            }
        }
    }

    #[test]
    fn measurement_names_are_sequential(placements in arb_placements()) {
        let measurements = placements
            .iter()
            .filter(|p| p.function_id().starts_with('M'))
            .count();

        let circuit = Circuit::build(&placements, 4, &catalog()).unwrap();
        let names: Vec<_> = circuit.measurement_names().map(str::to_string).collect();
        let expected: Vec<_> = (0..measurements).map(|i| format!("M{i}")).collect();
        prop_assert_eq!(names, expected);

        for placement in circuit.placements() {
            let is_measurement = placement.function_id().starts_with('M');
            prop_assert_eq!(placement.measurement_name().is_some(), is_measurement);
        }
    }

    #[test]
    fn linearization_is_idempotent(placements in arb_placements()) {
        let once = linearize(placements, &catalog()).unwrap();
        let twice = linearize(once.clone(), &catalog()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
