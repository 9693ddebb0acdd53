use std::io::prelude::*;
use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::hypergraph::Hypergraph;
use crate::interrupter::Interrupter;

/// Default total wall clock budget in ms.
pub const DEFAULT_TIME_LIMIT_MS: u128 = 300_000;
/// Default budget for the kernelization phase in ms.
pub const DEFAULT_REDUCTION_TIME_LIMIT_MS: u128 = 150_000;

/// Tuning knobs of the search loop. The defaults match the values the solver
/// was calibrated with; all of them can be overridden on the command line.
#[derive(Debug, Clone)]
pub struct Params {
    pub reduction_time_limit_ms: u128,
    /// Hint positions flipped per iteration while the best cover is small.
    pub small_mutation_size: usize,
    /// Hint positions flipped per iteration once the best cover is large.
    pub large_mutation_size: usize,
    /// Cover size below which the small mutation size is used.
    pub mutation_cost_threshold: usize,
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            reduction_time_limit_ms: DEFAULT_REDUCTION_TIME_LIMIT_MS,
            small_mutation_size: 50,
            large_mutation_size: 15_000,
            mutation_cost_threshold: 5_000,
            seed: None,
        }
    }
}

/// Owns all solver state: the (kernelized) instance, the best known cover,
/// the vertices forced by kernelization, the cancellation token and the
/// random generator every heuristic decision flows through.
#[derive(Debug)]
pub struct HSInstance {
    pub graph: Hypergraph,
    /// Best known cover of the current (post kernelization) vertex space.
    pub best: Vec<bool>,
    pub best_cost: usize,
    /// Original ids committed by kernelization, in commit order.
    pub always_in_solution: Vec<usize>,
    pub interrupter: Interrupter,
    pub params: Params,
    pub(crate) rng: StdRng,
}

impl HSInstance {

    /// Returns a new `HSInstance` over `graph`. The trivial all-vertices cover is installed as
    /// initial best, so the instance can be flushed at any point.
    pub fn new(graph: Hypergraph, params: Params) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let num_vertices = graph.num_vertices();
        HSInstance {
            graph,
            best: vec![true; num_vertices],
            best_cost: num_vertices,
            always_in_solution: Vec::new(),
            interrupter: Interrupter::default(),
            params,
            rng,
        }
    }

    /// Sets an interrupter that fires after `time_limit` ms, or as soon as `sigterm` is set.
    pub fn set_time_interrupter(&mut self, time_limit: u128, sigterm: Option<Arc<AtomicBool>>) {
        self.interrupter = Interrupter::new(Some(time_limit), sigterm);
    }

    /// Returns the size of the cover that would be reported right now.
    pub fn total_cost(&self) -> usize {
        self.best_cost + self.always_in_solution.len()
    }

    /// Installs `solution` as new best if `cost` beats `self.best_cost`.
    /// Returns `true` if the best was replaced.
    pub fn update_best(&mut self, solution: Vec<bool>, cost: usize) -> bool {
        if cost < self.best_cost {
            self.best = solution;
            self.best_cost = cost;
            return true
        }
        false
    }

    /// Returns the reported cover in output order: the members of `best` as original ids in
    /// ascending internal order, followed by the forced set in commit order.
    pub fn solution_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.graph.vertices()
            .filter(|&v| self.best[v])
            .map(|v| self.graph.original_id(v))
            .collect();
        ids.extend(&self.always_in_solution);
        ids
    }

    /// Writes the solution to a writer: total size first, then one original id per line.
    pub fn write_solution<W: Write>(&self, mut out: W) -> Result<(), io::Error> {
        writeln!(out, "{}", self.total_cost())?;
        for id in self.solution_ids() {
            writeln!(out, "{}", id)?;
        }
        Ok(())
    }

}
