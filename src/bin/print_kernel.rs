use std::error;
use std::io;
use hs_solver::hypergraph::Hypergraph;
use hs_solver::hs_instance::{HSInstance, Params};

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let graph = Hypergraph::read_instance(stdin)?;
    let mut instance = HSInstance::new(graph, Params::default());

    let stats = instance.graph.instance_stats();
    eprintln!("Input instance:\t{:>6} vertices, {:>6} hyperedges, lower bound {:>5}",
              stats.num_vertices, stats.num_hyperedges, stats.efficiency_lower_bound);

    instance.kernelize()?;

    let stats = instance.graph.instance_stats();
    eprintln!("Kernel:\t\t{:>6} vertices, {:>6} hyperedges, lower bound {:>5}, {} forced",
              stats.num_vertices, stats.num_hyperedges, stats.efficiency_lower_bound,
              instance.always_in_solution.len());

    instance.graph.write_instance(&mut stdout)?;

    Ok(())
}
