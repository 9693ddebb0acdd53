pub mod hypergraph;
pub mod cust_errors;
pub mod interrupter;
pub mod hs_instance;
pub mod reduction;
pub mod heuristics;
pub mod statistics;
pub mod validate;
