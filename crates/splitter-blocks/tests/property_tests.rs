use proptest::prelude::*;
use splitter_blocks::{BlockExtractor, DispatchCase, Termination};

proptest! {
    #[test]
    fn flat_bodies_round_trip(
        names in prop::collection::vec("[a-z]{1,6}(_[a-z]{1,6}){0,3}", 1..6),
        bodies in prop::collection::vec("[a-zA-Z0-9 ;.()=+\n]{0,40}", 6),
    ) {
        let doc: String = names
            .iter()
            .zip(&bodies)
            .map(|(name, body)| format!("case 'xrp_{name}': {{{body}}}\n"))
            .collect();

        for termination in [Termination::Balanced, Termination::SingleNesting] {
            let extractor = BlockExtractor::new(
                DispatchCase::new("xrp_").unwrap().with_termination(termination),
            );
            let blocks = extractor.extract_all(&doc);

            prop_assert_eq!(blocks.len(), names.len());
            for ((block, name), body) in blocks.iter().zip(&names).zip(&bodies) {
                prop_assert_eq!(&block.name, &format!("xrp_{name}"));
                prop_assert_eq!(block.body.as_str(), body.trim());
            }
        }
    }

    #[test]
    fn balanced_body_survives_arbitrary_depth(depth in 1usize..12) {
        let inner = format!("{}x{}", "{ ".repeat(depth), " }".repeat(depth));
        let doc = format!("case 'xrp_deep': {{ {inner} }} trailing }}");
        let block = BlockExtractor::new(DispatchCase::new("xrp_").unwrap())
            .find_block(&doc, "xrp_deep")
            .unwrap();
        prop_assert_eq!(block.body, inner);
    }
}
