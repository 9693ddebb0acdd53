use crate::hypergraph::Hypergraph;

/// Degree statistics and a cheap lower bound, reported by the binaries before and after
/// kernelization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceStats {
    pub num_vertices: usize,
    pub num_hyperedges: usize,
    pub avg_vertex_degree: usize,
    pub percentile99_degree: usize,
    /// `ceil(sum over hyperedges of 1/maxdeg)`, where `maxdeg` is the largest vertex degree
    /// inside the hyperedge. Every cover vertex hits at most `maxdeg` hyperedges, so no cover
    /// is smaller than this.
    pub efficiency_lower_bound: usize,
}

impl Hypergraph {

    /// Computes the instance statistics. All-zero for an empty instance.
    pub fn instance_stats(&self) -> InstanceStats {
        let num_vertices = self.num_vertices();
        let num_hyperedges = self.num_hyperedges();
        if num_vertices == 0 {
            return InstanceStats {
                num_vertices: 0,
                num_hyperedges: 0,
                avg_vertex_degree: 0,
                percentile99_degree: 0,
                efficiency_lower_bound: 0,
            }
        }
        let mut max_deg = vec![0usize; num_hyperedges];
        let mut degrees = Vec::with_capacity(num_vertices);
        let mut total_degree = 0;
        for v in self.vertices() {
            let degree = self.incidence(v).len();
            for &h in self.incidence(v) {
                max_deg[h - num_vertices] = max_deg[h - num_vertices].max(degree);
            }
            degrees.push(degree);
            total_degree += degree;
        }
        let efficiency_lower_bound = max_deg.iter()
            .map(|&d| 1.0 / d as f64)
            .sum::<f64>()
            .ceil() as usize;
        let index = num_vertices * 99 / 100;
        let (_, &mut percentile99_degree, _) = degrees.select_nth_unstable(index);
        InstanceStats {
            num_vertices,
            num_hyperedges,
            avg_vertex_degree: total_degree / num_vertices,
            percentile99_degree,
            efficiency_lower_bound,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn instance_stats_test() {
        let gr = Cursor::new("p hs 4 3\n1 2\n3 4\n1 3\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let stats = g.instance_stats();
        assert_eq!(stats.num_vertices, 4);
        assert_eq!(stats.num_hyperedges, 3);
        // degrees 2, 1, 2, 1
        assert_eq!(stats.avg_vertex_degree, 1);
        assert_eq!(stats.percentile99_degree, 2);
        // maxdeg per hyperedge is 2, so the bound is ceil(3/2)
        assert_eq!(stats.efficiency_lower_bound, 2);
    }

    #[test]
    fn empty_instance_stats_test() {
        let gr = Cursor::new("p hs 2 1\n1 2\n");
        let mut g = Hypergraph::read_instance(gr).unwrap();
        g.prune_inactive(&[false, false, false]);
        assert_eq!(g.instance_stats(), InstanceStats {
            num_vertices: 0,
            num_hyperedges: 0,
            avg_vertex_degree: 0,
            percentile99_degree: 0,
            efficiency_lower_bound: 0,
        });
    }
}
