use fxhash::FxHashSet;
use crate::hypergraph::Hypergraph;
use crate::hs_instance::HSInstance;

impl Hypergraph {

    /// Checks if the original ids in `cover` hit every hyperedge of `self`.
    /// Does not check for minimality.
    pub fn is_cover(&self, cover: &FxHashSet<usize>) -> bool {
        self.hyperedges().all(|h| {
            self.incidence(h).iter().any(|&v| cover.contains(&self.original_id(v)))
        })
    }

}

impl HSInstance {

    /// Validates the cover that would be reported right now (current best plus forced set)
    /// against `original`, the instance as parsed. Does not check for optimality.
    pub fn validate(&self, original: &Hypergraph) -> bool {
        let cover: FxHashSet<usize> = self.solution_ids().into_iter().collect();
        original.is_cover(&cover)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hs_instance::Params;
    use std::io::Cursor;

    #[test]
    fn is_cover_test() {
        let gr = Cursor::new("p hs 4 3\n1 2\n3 4\n1 3\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let good: FxHashSet<usize> = vec![1, 3].into_iter().collect();
        assert!(g.is_cover(&good));
        let bad: FxHashSet<usize> = vec![1, 2].into_iter().collect();
        assert!(!g.is_cover(&bad));
        assert!(!g.is_cover(&FxHashSet::default()));
    }

    #[test]
    fn emitted_solution_round_trip_test() {
        let gr = Cursor::new("p ds 4 3\n1 2\n2 3\n3 4\n");
        let original = Hypergraph::read_instance(gr).unwrap();
        let mut instance = HSInstance::new(original.clone(), Params::default());
        instance.kernelize().unwrap();
        let mut buffer = Vec::new();
        instance.write_solution(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        let size: usize = lines.next().unwrap().parse().unwrap();
        let cover: FxHashSet<usize> = lines.map(|l| l.parse().unwrap()).collect();
        assert_eq!(size, instance.total_cost());
        assert!(original.is_cover(&cover));
    }

    #[test]
    fn validate_includes_forced_set_test() {
        let gr = Cursor::new("p hs 3 2\n1 2\n2 3\n");
        let original = Hypergraph::read_instance(gr).unwrap();
        let mut instance = HSInstance::new(original.clone(), Params::default());
        instance.kernelize().unwrap();
        // the whole cover lives in the forced set after kernelization
        assert_eq!(instance.best_cost, 0);
        assert!(instance.validate(&original));
    }
}
