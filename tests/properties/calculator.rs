//! Property tests for the batch dilution calculator.

use proptest::prelude::*;

use labmix::{calculate_batch, CalcWarning, MixProtocol, Reagent, ReagentRequirement, Strictness};

/// A small inventory with ids r0..rN and positive stock concentrations
fn inventory() -> impl Strategy<Value = Vec<Reagent>> {
    proptest::collection::vec(0.5f64..500.0, 1..=6).prop_map(|concs| {
        concs
            .into_iter()
            .enumerate()
            .map(|(i, conc)| Reagent {
                id: format!("r{i}").into(),
                name: format!("Reagent {i}"),
                initial_concentration: conc,
                unit: "X".to_string(),
                lot_number: "N/A".to_string(),
            })
            .collect()
    })
}

/// Requirements referencing the inventory by index, with a few ids that
/// resolve to nothing
fn requirements(max_index: usize) -> impl Strategy<Value = Vec<ReagentRequirement>> {
    proptest::collection::vec((0usize..max_index + 3, 0.0f64..20.0), 1..=8).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(i, target)| ReagentRequirement::new(format!("r{i}"), target))
            .collect()
    })
}

fn batch_inputs() -> impl Strategy<Value = (Vec<Reagent>, Vec<ReagentRequirement>, f64, f64)> {
    inventory().prop_flat_map(|reagents| {
        let n = reagents.len();
        (
            Just(reagents),
            requirements(n - 1),
            0.1f64..1000.0,
            1.0f64..500.0,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Water top-off is never negative.
    #[test]
    fn property_water_never_negative(
        (reagents, reqs, reactions, volume) in batch_inputs()
    ) {
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        let result =
            calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Lenient).unwrap();
        prop_assert!(result.water_per_reaction >= 0.0);
        prop_assert!(result.total_water >= 0.0);
    }

    /// PROPERTY: When nothing was clamped, components plus water fill the
    /// reaction volume exactly.
    #[test]
    fn property_volume_conservation(
        (reagents, reqs, reactions, volume) in batch_inputs()
    ) {
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        let result =
            calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Lenient).unwrap();

        let clamped = result
            .warnings
            .iter()
            .any(|w| matches!(w, CalcWarning::OverVolume { .. }));
        if !clamped {
            let filled = result.used_per_reaction() + result.water_per_reaction;
            prop_assert!((filled - volume).abs() < 1e-9);
        }
    }

    /// PROPERTY: Batch totals are the per-reaction volumes scaled by the
    /// reaction count.
    #[test]
    fn property_totals_scale_linearly(
        (reagents, reqs, reactions, volume) in batch_inputs()
    ) {
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        let result =
            calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Lenient).unwrap();

        for c in &result.components {
            prop_assert_eq!(c.total_volume, c.volume_per_reaction * reactions);
        }
        prop_assert_eq!(result.total_water, result.water_per_reaction * reactions);
    }

    /// PROPERTY: Every requirement is accounted for, either as a resolved
    /// component or as a missing-reagent warning.
    #[test]
    fn property_no_requirement_lost(
        (reagents, reqs, reactions, volume) in batch_inputs()
    ) {
        let n_reqs = reqs.len();
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        let result =
            calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Lenient).unwrap();

        let missing = result
            .warnings
            .iter()
            .filter(|w| matches!(w, CalcWarning::MissingReagent { .. }))
            .count();
        prop_assert_eq!(result.components.len() + missing, n_reqs);
    }

    /// PROPERTY: The calculator is a pure function.
    #[test]
    fn property_deterministic(
        (reagents, reqs, reactions, volume) in batch_inputs()
    ) {
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        let a = calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Lenient)
            .unwrap();
        let b = calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Lenient)
            .unwrap();
        prop_assert_eq!(a, b);
    }

    /// PROPERTY: Non-positive batch dimensions always yield the empty
    /// result, whatever the protocol says.
    #[test]
    fn property_non_positive_inputs_yield_empty(
        (reagents, reqs, _reactions, volume) in batch_inputs(),
        bad in -1000.0f64..=0.0
    ) {
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        let by_reactions =
            calculate_batch(&protocol, &reagents, bad, volume, Strictness::Lenient).unwrap();
        prop_assert!(by_reactions.is_empty());
        prop_assert_eq!(by_reactions.water_per_reaction, 0.0);

        let by_volume =
            calculate_batch(&protocol, &reagents, 10.0, bad, Strictness::Lenient).unwrap();
        prop_assert!(by_volume.is_empty());
    }

    /// PROPERTY: Strict mode never returns warnings; anomalies become
    /// errors instead.
    #[test]
    fn property_strict_mode_has_no_warnings(
        (reagents, reqs, reactions, volume) in batch_inputs()
    ) {
        let protocol = MixProtocol::new("P", "", reqs).unwrap();
        if let Ok(result) =
            calculate_batch(&protocol, &reagents, reactions, volume, Strictness::Strict)
        {
            prop_assert!(!result.has_warnings());
        }
    }
}
