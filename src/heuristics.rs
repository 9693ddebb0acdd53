use std::cmp::min;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use crate::hypergraph::Hypergraph;
use crate::hs_instance::HSInstance;
use crate::reduction::ReductionState;
use crate::cust_errors::InterruptError;

/// Ceiling of the candidate cap schedule: `min(iter, MAX_CANDIDATE_CAP)` is passed to the
/// reduction engine on iteration `iter`.
pub const MAX_CANDIDATE_CAP: usize = 1_000_000;

/// Builds the greedy order from a hint valuation of the vertices (the previous best cover,
/// perturbed). The schedule is a list of `(required_degree, vertex)` pairs; a pair fires only
/// if the vertex is still active with exactly that degree when its turn comes.
///
/// Two passes append a shuffled `(1, v)` block for the hint-0 and then the hint-1 vertices,
/// and each block is swept to add `(k+1, v)` for every pair below the vertex's construction
/// degree, so every vertex keeps a fallback attempt at every requirement level. The final
/// reversal puts high requirements first (greedy prefers high coverage) and the hint's
/// favorites before the rest.
pub(crate) fn build_priority_schedule(graph: &Hypergraph, hint: &[bool], rng: &mut StdRng)
-> Vec<(usize, usize)> {
    let mut schedule: Vec<(usize, usize)> = Vec::new();
    for level in [false, true] {
        let start = schedule.len();
        for v in graph.vertices() {
            if hint[v] == level {
                schedule.push((1, v));
            }
        }
        schedule[start..].shuffle(rng);
        let mut i = start;
        while i < schedule.len() {
            let (required, v) = schedule[i];
            if required < graph.incidence(v).len() {
                schedule.push((required + 1, v));
            }
            i += 1;
        }
    }
    schedule.reverse();
    schedule
}

/// Strips redundant vertices from a feasible cover of `graph` until no single vertex can be
/// dropped without uncovering a hyperedge. Hyperedges hit exactly once pin their unique hitter;
/// every other cover vertex is dropped in index order, re-pinning as hit counts fall.
pub fn remove_unnecessary_vertices(graph: &Hypergraph, solution: &mut [bool]) {
    let num_vertices = graph.num_vertices();
    let mut hitcount = vec![0usize; graph.num_hyperedges()];
    for v in graph.vertices() {
        if solution[v] {
            for &h in graph.incidence(v) {
                hitcount[h - num_vertices] += 1;
            }
        }
    }
    let mut removable: Vec<bool> = solution.to_vec();
    for h in graph.hyperedges() {
        debug_assert!(hitcount[h - num_vertices] > 0);
        if hitcount[h - num_vertices] == 1 {
            for &v in graph.incidence(h) {
                removable[v] = false;
            }
        }
    }
    for v in graph.vertices() {
        if !removable[v] {
            continue
        }
        solution[v] = false;
        for &h in graph.incidence(v) {
            hitcount[h - num_vertices] -= 1;
            debug_assert!(hitcount[h - num_vertices] > 0);
            if hitcount[h - num_vertices] == 1 {
                for &u in graph.incidence(h) {
                    removable[u] = false;
                }
            }
        }
    }
}

impl HSInstance {

    /// One reduce-and-greedy pass: interleaves the reduction engine (at candidate cap
    /// `max_candidates`) with greedy selections in schedule order until every hyperedge is
    /// covered, repairs the cover to local minimality and installs it as new best if it
    /// improves. Returns whether the best was improved.
    pub fn greeduce(&mut self, hint: &[bool], max_candidates: usize) -> Result<bool, InterruptError> {
        let mut state = ReductionState::new(&self.graph);
        let schedule = build_priority_schedule(&self.graph, hint, &mut self.rng);
        let mut solution = vec![false; self.graph.num_vertices()];
        for &(required, v) in &schedule {
            self.interrupter.send_interrupt()?;
            state.exhaustive_reductions(&self.graph, max_candidates, &self.interrupter, None)?;
            for u in state.committed.drain(..) {
                solution[u] = true;
            }
            if !state.active[v] {
                continue
            }
            if state.degree[v] != required {
                continue
            }
            if state.select_vertex(&self.graph, v) {
                solution[v] = true;
            }
            if state.num_active_hyperedges == 0 {
                break
            }
        }
        debug_assert_eq!(state.num_active_hyperedges, 0);
        remove_unnecessary_vertices(&self.graph, &mut solution);
        let cost = solution.iter().filter(|&&b| b).count();
        let improved = self.update_best(solution, cost);
        self.interrupter.send_interrupt()?;
        Ok(improved)
    }

    /// One iteration of the perturb-and-rebuild loop: takes the best cover as hint, flips a
    /// size-dependent number of random positions to `false` (duplicates allowed), and rebuilds
    /// with the candidate cap widening as `iter` grows.
    pub fn search_step(&mut self, iter: usize) -> Result<bool, InterruptError> {
        let mut hint = self.best.clone();
        if iter > 0 {
            let mutation_size = if self.best_cost < self.params.mutation_cost_threshold {
                self.params.small_mutation_size
            } else {
                self.params.large_mutation_size
            };
            for _ in 0..mutation_size {
                let v = self.rng.gen_range(0..self.graph.num_vertices());
                hint[v] = false;
            }
        }
        self.greeduce(&hint, min(iter, MAX_CANDIDATE_CAP))
    }

    /// Runs search steps until the interrupter fires. Returns `Ok` immediately if kernelization
    /// already solved the instance; otherwise only an interrupt ends the loop, and `self.best`
    /// holds the result.
    pub fn anytime_search(&mut self) -> Result<(), InterruptError> {
        if self.graph.num_vertices() == 0 {
            return Ok(())
        }
        let mut iter = 0;
        loop {
            if self.search_step(iter)? {
                eprintln!("best {:>6} after {:>8} ms", self.total_cost(), self.interrupter.elapsed_ms());
            }
            iter += 1;
        }
    }

}
