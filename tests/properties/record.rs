//! Property tests for preparation record finalization.

use proptest::prelude::*;

use labmix::{
    calculate_batch, MixProtocol, PreparationRecord, Reagent, ReagentRequirement, Strictness,
};

fn one_reagent_setup(conc: f64, target: f64) -> (Vec<Reagent>, MixProtocol) {
    let reagents = vec![Reagent {
        id: "r0".into(),
        name: "Reagent 0".to_string(),
        initial_concentration: conc,
        unit: "X".to_string(),
        lot_number: "L-1".to_string(),
    }];
    let protocol = MixProtocol::new(
        "P",
        "",
        vec![ReagentRequirement::new("r0", target)],
    )
    .unwrap();
    (reagents, protocol)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A freshly finalized record always verifies, and still
    /// verifies after a serde round trip.
    #[test]
    fn property_finalized_record_verifies(
        conc in 0.5f64..500.0,
        target in 0.0f64..20.0,
        reactions in 0.1f64..1000.0,
        overage in 0.0f64..50.0,
        volume in 1.0f64..500.0,
        analyst in "[A-Za-z]{1,8}"
    ) {
        let (reagents, protocol) = one_reagent_setup(conc, target);
        let batch = calculate_batch(
            &protocol, &reagents, reactions + overage, volume, Strictness::Lenient,
        )
        .unwrap();
        let record = PreparationRecord::finalize(
            &batch, &protocol, &[], &analyst, reactions, overage, volume,
        )
        .unwrap();

        prop_assert!(record.verify());
        prop_assert_eq!(record.analyst(), analyst.to_uppercase());
        prop_assert_eq!(record.total_volume(), (reactions + overage) * volume);

        let json = serde_json::to_string(&record).unwrap();
        let back: PreparationRecord = serde_json::from_str(&json).unwrap();
        prop_assert!(back.verify());
        prop_assert_eq!(back, record);
    }

    /// PROPERTY: Two records of the same batch never share an id.
    #[test]
    fn property_record_ids_are_unique(
        conc in 0.5f64..500.0,
        volume in 1.0f64..500.0
    ) {
        let (reagents, protocol) = one_reagent_setup(conc, 1.0);
        let batch =
            calculate_batch(&protocol, &reagents, 10.0, volume, Strictness::Lenient).unwrap();
        let a = PreparationRecord::finalize(&batch, &protocol, &[], "jd", 10.0, 0.0, volume)
            .unwrap();
        let b = PreparationRecord::finalize(&batch, &protocol, &[], "jd", 10.0, 0.0, volume)
            .unwrap();
        prop_assert_ne!(a.id().as_str(), b.id().as_str());
    }
}
