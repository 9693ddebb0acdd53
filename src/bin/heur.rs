use std::error;
use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use clap::{Arg, App};
use hs_solver::hypergraph::Hypergraph;
use hs_solver::hs_instance::{HSInstance, Params, DEFAULT_TIME_LIMIT_MS};

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let m = App::new("heur")
        .about("Anytime reduce-and-greedy heuristic for hitting set (p hs) and dominating set (p ds) instances read from stdin.")
        .arg(Arg::new("time_limit")
             .takes_value(true)
             .short('t')
             .long("time-limit")
             .help("Total wall clock budget in ms"))
        .arg(Arg::new("reduction_limit")
             .takes_value(true)
             .short('r')
             .long("reduction-limit")
             .help("Budget of the kernelization phase in ms"))
        .arg(Arg::new("seed")
             .takes_value(true)
             .short('s')
             .long("seed")
             .help("Seed for the random generator"))
        .arg(Arg::new("small_mutation")
             .takes_value(true)
             .long("small-mutation")
             .help("Hint positions flipped per iteration below the mutation threshold"))
        .arg(Arg::new("large_mutation")
             .takes_value(true)
             .long("large-mutation")
             .help("Hint positions flipped per iteration above the mutation threshold"))
        .arg(Arg::new("mutation_threshold")
             .takes_value(true)
             .long("mutation-threshold")
             .help("Cover size separating the two mutation sizes"))
        .get_matches();

    let mut params = Params::default();
    if let Some(value) = m.value_of("reduction_limit") {
        params.reduction_time_limit_ms = value.parse()?;
    }
    if let Some(value) = m.value_of("seed") {
        params.seed = Some(value.parse()?);
    }
    if let Some(value) = m.value_of("small_mutation") {
        params.small_mutation_size = value.parse()?;
    }
    if let Some(value) = m.value_of("large_mutation") {
        params.large_mutation_size = value.parse()?;
    }
    if let Some(value) = m.value_of("mutation_threshold") {
        params.mutation_cost_threshold = value.parse()?;
    }
    let time_limit: u128 = match m.value_of("time_limit") {
        Some(value) => value.parse()?,
        None => DEFAULT_TIME_LIMIT_MS,
    };

    let sigterm = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&sigterm))?;

    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let graph = Hypergraph::read_instance(stdin)?;
    let mut instance = HSInstance::new(graph, params);
    instance.set_time_interrupter(time_limit, Some(sigterm));

    let stats = instance.graph.instance_stats();
    eprintln!("Input instance:\t{:>6} vertices, {:>6} hyperedges, avg degree {:>3}, 99% degree {:>3}, lower bound {:>5}",
              stats.num_vertices, stats.num_hyperedges, stats.avg_vertex_degree,
              stats.percentile99_degree, stats.efficiency_lower_bound);

    let outcome = instance.kernelize().and_then(|_| {
        let stats = instance.graph.instance_stats();
        eprintln!("Kernel:\t\t{:>6} vertices, {:>6} hyperedges, avg degree {:>3}, 99% degree {:>3}, lower bound {:>5}, {} forced",
                  stats.num_vertices, stats.num_hyperedges, stats.avg_vertex_degree,
                  stats.percentile99_degree, stats.efficiency_lower_bound,
                  instance.always_in_solution.len());
        instance.anytime_search()
    });
    match outcome {
        Ok(()) => eprintln!("Instance solved by kernelization."),
        Err(interrupt) => eprintln!("{}", interrupt),
    }

    eprintln!("Write solution of size {} to stdout.", instance.total_cost());
    instance.write_solution(&mut stdout)?;

    Ok(())
}
