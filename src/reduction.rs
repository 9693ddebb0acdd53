use std::collections::{BTreeSet, VecDeque};
use crate::hypergraph::{sorted_contains, Hypergraph};
use crate::hs_instance::HSInstance;
use crate::interrupter::Interrupter;
use crate::cust_errors::InterruptError;

/// Per-session scratch state of the reduction engine: which objects are
/// still active, their active-neighbor degrees, and a FIFO worklist with
/// duplicate suppression. The graph itself is never mutated by a session;
/// kernelization commits a session's outcome via `Hypergraph::prune_inactive`.
#[derive(Debug, Clone)]
pub struct ReductionState {
    pub active: Vec<bool>,
    pub degree: Vec<usize>,
    pub num_active_hyperedges: usize,
    /// Vertices committed by the unit-edge rule, in commit order.
    pub committed: Vec<usize>,
    queue: VecDeque<usize>,
    enqueued: Vec<bool>,
}

impl ReductionState {

    /// Returns a fresh session over `graph`: everything active, every object enqueued.
    pub fn new(graph: &Hypergraph) -> Self {
        let num_objects = graph.num_objects();
        ReductionState {
            active: vec![true; num_objects],
            degree: (0..num_objects).map(|i| graph.incidence(i).len()).collect(),
            num_active_hyperedges: graph.num_hyperedges(),
            committed: Vec::new(),
            queue: (0..num_objects).collect(),
            enqueued: vec![true; num_objects],
        }
    }

    fn enqueue_if_active(&mut self, i: usize) {
        if self.active[i] && !self.enqueued[i] {
            self.queue.push_back(i);
            self.enqueued[i] = true;
        }
    }

    /// Deactivates `v` and covers all of its still active hyperedges: each is deactivated, the
    /// degrees of all its members are decremented and affected objects are requeued.
    /// Returns `true` if at least one hyperedge was still active, i.e. taking `v` was useful.
    pub fn select_vertex(&mut self, graph: &Hypergraph, v: usize) -> bool {
        self.active[v] = false;
        let mut covered_any = false;
        for &h in graph.incidence(v) {
            if !self.active[h] {
                continue
            }
            covered_any = true;
            self.active[h] = false;
            self.num_active_hyperedges -= 1;
            for &u in graph.incidence(h) {
                self.degree[u] -= 1;
                self.enqueue_if_active(u);
            }
        }
        covered_any
    }

    /// Deactivates the redundant object `r` found by the domination rule and decrements the
    /// degrees of its neighbors.
    fn remove_dominated(&mut self, graph: &Hypergraph, r: usize) {
        self.active[r] = false;
        if graph.is_hyperedge(r) {
            self.num_active_hyperedges -= 1;
        }
        for &z in graph.incidence(r) {
            self.degree[z] -= 1;
            self.enqueue_if_active(z);
        }
    }

    /// Drives the worklist to quiescence, applying the unit-edge rule and the domination rules
    /// to each popped object.
    ///
    /// `max_candidates` throttles the domination rule: partners are collected from the incidence
    /// lists of the popped object's neighbors, and a neighbor's whole list is skipped once it
    /// would push the collected set over the cap. A cap of 0 drains the worklist without applying
    /// any rule.
    ///
    /// `soft_time_limit_ms` is the reduction-phase budget of the kernelizer: once exceeded the
    /// engine returns early with whatever has been committed. The interrupter is polled at every
    /// pop and propagates as an error.
    pub fn exhaustive_reductions(
        &mut self,
        graph: &Hypergraph,
        max_candidates: usize,
        interrupter: &Interrupter,
        soft_time_limit_ms: Option<u128>,
    ) -> Result<(), InterruptError> {
        while !self.queue.is_empty() {
            if let Some(limit) = soft_time_limit_ms {
                if interrupter.elapsed_ms() > limit {
                    break
                }
            }
            interrupter.send_interrupt()?;
            let x = self.queue.pop_front().expect("queue is not empty");
            debug_assert!(self.enqueued[x]);
            self.enqueued[x] = false;
            if max_candidates == 0 {
                continue
            }
            if !self.active[x] {
                continue
            }
            // unit edge rule
            if graph.is_hyperedge(x) && self.degree[x] == 1 {
                let mut unit = None;
                for &v in graph.incidence(x) {
                    if self.active[v] {
                        debug_assert!(unit.is_none());
                        unit = Some(v);
                    }
                }
                let u = unit.expect("an active hyperedge has an active member");
                self.committed.push(u);
                self.select_vertex(graph, u);
                continue
            }
            // domination rules: collect same-kind partners from the neighbors' lists
            let mut candidates = BTreeSet::new();
            for &y in graph.incidence(x) {
                if candidates.len() + graph.incidence(y).len() > max_candidates {
                    continue
                }
                candidates.extend(graph.incidence(y).iter().copied());
            }
            for &y in &candidates {
                if x == y || !self.active[y] {
                    continue
                }
                debug_assert_eq!(graph.is_vertex(x), graph.is_vertex(y));
                if self.degree[x] > self.degree[y] {
                    continue
                }
                let x_is_subset_of_y = graph.incidence(x).iter()
                    .all(|&z| !self.active[z] || sorted_contains(graph.incidence(y), z));
                if x_is_subset_of_y {
                    // a dominated vertex is replaceable by its dominator; a dominating
                    // hyperedge is hit whenever the dominated one is
                    let r = if graph.is_vertex(x) { x } else { y };
                    self.remove_dominated(graph, r);
                    if r == x {
                        break
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks that the degree of every active object equals its number of active neighbors.
    /// Degrees of inactive objects are allowed to be stale.
    pub fn degrees_coherent(&self, graph: &Hypergraph) -> bool {
        (0..graph.num_objects()).all(|i| {
            !self.active[i]
                || self.degree[i] == graph.incidence(i).iter().filter(|&&j| self.active[j]).count()
        })
    }

}

impl HSInstance {

    /// One-shot kernelization: runs the reduction engine over the full graph with an unbounded
    /// candidate cap, routes vertices committed by the unit-edge rule into
    /// `self.always_in_solution` (as original ids), and compacts the graph to the surviving
    /// objects. Respects the reduction-phase budget of `self.params`; whatever was committed
    /// before an early exit sticks.
    ///
    /// `best` is reset to the all-vertices cover of the kernel before any interrupt propagates,
    /// so the instance stays flushable.
    pub fn kernelize(&mut self) -> Result<(), InterruptError> {
        let mut state = ReductionState::new(&self.graph);
        let res = state.exhaustive_reductions(
            &self.graph,
            usize::MAX,
            &self.interrupter,
            Some(self.params.reduction_time_limit_ms),
        );
        for u in state.committed.drain(..) {
            self.always_in_solution.push(self.graph.original_id(u));
        }
        self.graph.prune_inactive(&state.active);
        self.best = vec![true; self.graph.num_vertices()];
        self.best_cost = self.graph.num_vertices();
        res
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hs_instance::Params;
    use std::io::Cursor;

    #[test]
    fn unit_edge_rule_test() {
        let gr = Cursor::new("p hs 2 2\n1\n1 2\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut state = ReductionState::new(&g);
        state.exhaustive_reductions(&g, usize::MAX, &Interrupter::default(), None).unwrap();
        assert_eq!(state.committed, vec![0]);
        assert_eq!(state.num_active_hyperedges, 0);
        assert!(!state.active[0]);
        assert!(state.degrees_coherent(&g));
    }

    #[test]
    fn vertex_domination_test() {
        // vertex 1 hits a subset of what vertex 2 hits, so it is dropped; the unit rule
        // then forces vertex 2 and covers everything
        let gr = Cursor::new("p hs 3 2\n1 2\n2 3\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut state = ReductionState::new(&g);
        state.exhaustive_reductions(&g, usize::MAX, &Interrupter::default(), None).unwrap();
        assert_eq!(state.committed, vec![1]);
        assert_eq!(state.num_active_hyperedges, 0);
        assert!(!state.active[0]);
        assert!(state.degrees_coherent(&g));
    }

    #[test]
    fn hyperedge_domination_test() {
        // {1,2} is contained in {1,2,3}: once vertex 3 is gone the superset hyperedge is
        // removed, while the private edges keep vertices 1, 2, 4 and 5 alive
        let gr = Cursor::new("p hs 5 5\n1 2\n1 2 3\n1 4\n2 5\n4 5\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut instance = HSInstance::new(g, Params::default());
        instance.kernelize().unwrap();
        assert!(instance.always_in_solution.is_empty());
        assert_eq!(instance.graph.num_vertices(), 4);
        assert_eq!(instance.graph.num_hyperedges(), 4);
        let ids: Vec<usize> = instance.graph.vertices()
            .map(|v| instance.graph.original_id(v)).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
        assert!(instance.graph.is_consistent());
    }

    #[test]
    fn cap_zero_disables_reductions_test() {
        let gr = Cursor::new("p hs 2 2\n1\n1 2\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut state = ReductionState::new(&g);
        state.exhaustive_reductions(&g, 0, &Interrupter::default(), None).unwrap();
        assert!(state.committed.is_empty());
        assert_eq!(state.num_active_hyperedges, 2);
        assert!(state.active.iter().all(|&a| a));
    }

    #[test]
    fn kernelize_forces_all_unit_edges_test() {
        let gr = Cursor::new("p hs 5 5\n1\n2\n3\n4\n5\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut instance = HSInstance::new(g, Params::default());
        instance.kernelize().unwrap();
        assert_eq!(instance.always_in_solution, vec![1, 2, 3, 4, 5]);
        assert_eq!(instance.graph.num_objects(), 0);
        assert_eq!(instance.best_cost, 0);
        assert_eq!(instance.total_cost(), 5);
    }

    #[test]
    fn kernelize_solves_path_instance_test() {
        let gr = Cursor::new("p hs 3 2\n1 2\n2 3\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut instance = HSInstance::new(g, Params::default());
        instance.kernelize().unwrap();
        // vertices 1 and 3 are dominated by 2, which the unit rule then forces
        assert_eq!(instance.always_in_solution, vec![2]);
        assert_eq!(instance.graph.num_objects(), 0);
        assert_eq!(instance.total_cost(), 1);
    }

    #[test]
    fn degree_coherence_at_quiescence_test() {
        let gr = Cursor::new("p ds 5 5\n1 2\n2 3\n3 4\n4 5\n5 1\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        for cap in [1, 4, 16, usize::MAX] {
            let mut state = ReductionState::new(&g);
            state.exhaustive_reductions(&g, cap, &Interrupter::default(), None).unwrap();
            assert!(state.degrees_coherent(&g));
        }
    }
}
