use std::io::prelude::*;
use std::io;
use itertools::Itertools;
use crate::cust_errors::ImportError;

/// Checks if the sorted slice `list` contains `x`.
pub(crate) fn sorted_contains(list: &[usize], x: usize) -> bool {
    list.binary_search(&x).is_ok()
}

/// Bipartite incidence structure of a hitting set instance.
///
/// Vertices and hyperedges share one index space: indices below
/// `num_vertices` are vertices, the rest are hyperedges. A vertex's
/// incidence list holds the hyperedges it belongs to and vice versa; all
/// lists are sorted ascending and duplicate free.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Hypergraph {
    num_vertices: usize,
    num_hyperedges: usize,
    incidence: Vec<Vec<usize>>,
    vertex_to_original_id: Vec<usize>,
}

impl Hypergraph {

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Returns the number of hyperedges.
    pub fn num_hyperedges(&self) -> usize {
        self.num_hyperedges
    }

    /// Returns the number of objects (vertices and hyperedges) of the shared index space.
    pub fn num_objects(&self) -> usize {
        self.num_vertices + self.num_hyperedges
    }

    /// Checks if object `i` is a vertex.
    pub fn is_vertex(&self, i: usize) -> bool {
        i < self.num_vertices
    }

    /// Checks if object `i` is a hyperedge.
    pub fn is_hyperedge(&self, i: usize) -> bool {
        i >= self.num_vertices
    }

    /// Returns the incidence list of object `i`.
    pub fn incidence(&self, i: usize) -> &[usize] {
        &self.incidence[i]
    }

    /// Returns the 1-based id by which vertex `v` is reported to the outside world.
    pub fn original_id(&self, v: usize) -> usize {
        self.vertex_to_original_id[v]
    }

    /// Returns an iterator over all vertex indices.
    pub fn vertices(&self) -> impl Iterator<Item = usize> {
        0..self.num_vertices
    }

    /// Returns an iterator over all hyperedge indices.
    pub fn hyperedges(&self) -> impl Iterator<Item = usize> {
        self.num_vertices..self.num_vertices + self.num_hyperedges
    }

    /// Checks if the incidence structure is intact: lists sorted strictly ascending, adjacency
    /// symmetric, vertices only incident to hyperedges and vice versa.
    pub fn is_consistent(&self) -> bool {
        for i in 0..self.num_objects() {
            if !self.incidence[i].windows(2).all(|w| w[0] < w[1]) {
                return false
            }
            for &j in &self.incidence[i] {
                if j >= self.num_objects() || self.is_vertex(i) == self.is_vertex(j) {
                    return false
                }
                if !sorted_contains(&self.incidence[j], i) {
                    return false
                }
            }
        }
        true
    }

}

// Reading and writing instances
impl Hypergraph {

    /// Reads an instance in either of the two supported formats. All lines before the first line
    /// starting with `p` are ignored. `p hs V H` is followed by `H` hyperedge lines, each listing
    /// the 1-based vertex ids of one hyperedge. `p ds V E` is followed by `E` undirected edges
    /// `a b`, which are modeled as a hitting set instance over closed neighborhoods.
    pub fn read_instance<R: BufRead>(gr: R) -> Result<Self, ImportError> {
        let mut lines = gr.lines();
        let problem_line = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if line.starts_with('p') {
                        break line
                    }
                },
                None => return Err(ImportError::MissingProblemLine),
            }
        };
        let mut split = problem_line.split_whitespace();
        if let Some("p") = split.next() {} else { return Err(ImportError::InputMalformedError); }
        let problem_type = split.next().ok_or(ImportError::InputMalformedError)?.to_owned();
        let num_vertices: usize = split.next().ok_or(ImportError::InputMalformedError)?.parse()?;
        let count: usize = split.next().ok_or(ImportError::InputMalformedError)?.parse()?;
        if split.next().is_some() { return Err(ImportError::InputMalformedError); }
        match problem_type.as_str() {
            "hs" => Self::read_hitting_set(lines, num_vertices, count),
            "ds" => Self::read_dominating_set(lines, num_vertices, count),
            _ => Err(ImportError::UnknownProblemType(problem_type)),
        }
    }

    fn read_hitting_set<R: BufRead>(mut lines: io::Lines<R>, num_vertices: usize, num_hyperedges: usize)
    -> Result<Self, ImportError> {
        let num_objects = num_vertices + num_hyperedges;
        let mut incidence = vec![Vec::new(); num_objects];
        for i in 0..num_hyperedges {
            let line = lines.next().ok_or(ImportError::InputMalformedError)??;
            for token in line.split_whitespace() {
                let v: usize = token.parse()?;
                if v < 1 || v > num_vertices {
                    return Err(ImportError::EndpointOutOfRange);
                }
                incidence[v - 1].push(num_vertices + i);
                incidence[num_vertices + i].push(v - 1);
            }
        }
        Ok(Self::finish(num_vertices, num_hyperedges, incidence))
    }

    fn read_dominating_set<R: BufRead>(mut lines: io::Lines<R>, num_vertices: usize, num_edges: usize)
    -> Result<Self, ImportError> {
        // Hyperedge `i` collects the closed neighborhood of vertex `i`; covering every
        // hyperedge then dominates every vertex.
        let num_objects = 2 * num_vertices;
        let mut incidence = vec![Vec::new(); num_objects];
        for i in 0..num_vertices {
            incidence[i].push(num_vertices + i);
            incidence[num_vertices + i].push(i);
        }
        for _ in 0..num_edges {
            let line = lines.next().ok_or(ImportError::InputMalformedError)??;
            let mut split = line.split_whitespace();
            let a: usize = split.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let b: usize = split.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if split.next().is_some() { return Err(ImportError::InputMalformedError); }
            if a < 1 || a > num_vertices || b < 1 || b > num_vertices {
                return Err(ImportError::EndpointOutOfRange);
            }
            let (a, b) = (a - 1, b - 1);
            incidence[a].push(num_vertices + b);
            incidence[b].push(num_vertices + a);
            incidence[num_vertices + a].push(b);
            incidence[num_vertices + b].push(a);
        }
        Ok(Self::finish(num_vertices, num_vertices, incidence))
    }

    fn finish(num_vertices: usize, num_hyperedges: usize, mut incidence: Vec<Vec<usize>>) -> Self {
        for list in incidence.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Hypergraph {
            num_vertices,
            num_hyperedges,
            incidence,
            vertex_to_original_id: (1..=num_vertices).collect(),
        }
    }

    /// Writes the instance in `p hs` format, using the current (1-based) internal vertex indices.
    pub fn write_instance<W: Write>(&self, mut out: W) -> Result<(), io::Error> {
        writeln!(out, "p hs {} {}", self.num_vertices, self.num_hyperedges)?;
        for h in self.hyperedges() {
            let line = self.incidence[h].iter().map(|v| (v + 1).to_string()).join(" ");
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

}

// Kernel compaction
impl Hypergraph {

    /// Drops every object with `active[i] == false` and compacts both index ranges, keeping the
    /// relative order of the survivors so that vertices still occupy the low indices. Incidence
    /// lists are rewritten to the new index space; `vertex_to_original_id` follows along.
    ///
    /// If no vertex survives the instance is fully solved and becomes empty. A hyperedge cannot
    /// outlive its last active vertex, so this never loses a constraint.
    pub fn prune_inactive(&mut self, active: &[bool]) {
        debug_assert_eq!(active.len(), self.num_objects());
        let num_objects = self.num_objects();
        let mut new_object_id = vec![usize::MAX; num_objects];
        let mut new_num_objects = 0;
        for i in 0..num_objects {
            if active[i] {
                new_object_id[i] = new_num_objects;
                new_num_objects += 1;
            }
        }
        let mut new_incidence = Vec::with_capacity(new_num_objects);
        let mut new_original_ids = Vec::new();
        for i in 0..num_objects {
            if !active[i] {
                continue
            }
            new_incidence.push(
                self.incidence[i].iter()
                    .filter(|&&j| active[j])
                    .map(|&j| new_object_id[j])
                    .collect()
            );
            if i < self.num_vertices {
                new_original_ids.push(self.vertex_to_original_id[i]);
            }
        }
        self.num_vertices = new_original_ids.len();
        self.num_hyperedges = new_num_objects - self.num_vertices;
        self.incidence = new_incidence;
        self.vertex_to_original_id = new_original_ids;
        debug_assert!(self.num_vertices > 0 || self.num_hyperedges == 0);
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_hitting_set_test() {
        let gr = Cursor::new("c some comment\np hs 3 2\n1 2\n2 3\n");
        let g = Hypergraph::read_instance(gr);
        assert!(g.is_ok());
        let g = g.unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_hyperedges(), 2);
        assert_eq!(g.num_objects(), 5);
        assert_eq!(g.incidence(1), &[3, 4]);
        assert_eq!(g.incidence(3), &[0, 1]);
        assert_eq!(g.incidence(4), &[1, 2]);
        assert!(g.is_consistent());
    }

    #[test]
    fn read_dominating_set_test() {
        // path 1 - 2 - 3: hyperedges are closed neighborhoods
        let gr = Cursor::new("p ds 3 2\n1 2\n2 3\n");
        let g = Hypergraph::read_instance(gr);
        assert!(g.is_ok());
        let g = g.unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_hyperedges(), 3);
        assert_eq!(g.incidence(3), &[0, 1]);
        assert_eq!(g.incidence(4), &[0, 1, 2]);
        assert_eq!(g.incidence(5), &[1, 2]);
        assert!(g.is_consistent());
    }

    #[test]
    fn rejects_malformed_input_test() {
        let gr = Cursor::new("no problem line at all\n");
        assert!(matches!(Hypergraph::read_instance(gr), Err(ImportError::MissingProblemLine)));
        let gr = Cursor::new("p vc 3 2\n1 2\n2 3\n");
        assert!(matches!(Hypergraph::read_instance(gr), Err(ImportError::UnknownProblemType(_))));
        let gr = Cursor::new("p hs 3 2\n1 4\n2 3\n");
        assert!(matches!(Hypergraph::read_instance(gr), Err(ImportError::EndpointOutOfRange)));
        let gr = Cursor::new("p ds 3 2\n1 2\n");
        assert!(matches!(Hypergraph::read_instance(gr), Err(ImportError::InputMalformedError)));
        let gr = Cursor::new("p hs 3\n");
        assert!(matches!(Hypergraph::read_instance(gr), Err(ImportError::InputMalformedError)));
    }

    #[test]
    fn prune_inactive_test() {
        let gr = Cursor::new("p hs 4 3\n1 2\n3 4\n1 3\n");
        let mut g = Hypergraph::read_instance(gr).unwrap();
        // drop vertex 2 (index 1) and hyperedge {1,2} (index 4)
        let active = vec![true, false, true, true, false, true, true];
        g.prune_inactive(&active);
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_hyperedges(), 2);
        assert_eq!(g.original_id(0), 1);
        assert_eq!(g.original_id(1), 3);
        assert_eq!(g.original_id(2), 4);
        // surviving hyperedges: {3,4} -> internal {1,2}, {1,3} -> internal {0,1}
        assert_eq!(g.incidence(3), &[1, 2]);
        assert_eq!(g.incidence(4), &[0, 1]);
        assert!(g.is_consistent());
    }

    #[test]
    fn prune_all_vertices_test() {
        let gr = Cursor::new("p hs 2 1\n1 2\n");
        let mut g = Hypergraph::read_instance(gr).unwrap();
        let active = vec![false, false, false];
        g.prune_inactive(&active);
        assert_eq!(g.num_vertices(), 0);
        assert_eq!(g.num_objects(), 0);
    }

    #[test]
    fn write_instance_round_trip_test() {
        let gr = Cursor::new("p hs 4 3\n1 2\n3 4\n1 3\n");
        let g = Hypergraph::read_instance(gr).unwrap();
        let mut buffer = Vec::new();
        g.write_instance(&mut buffer).unwrap();
        let reparsed = Hypergraph::read_instance(Cursor::new(buffer)).unwrap();
        assert_eq!(g, reparsed);
    }
}
