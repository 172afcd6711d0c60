use super::layers::LayerGraph;
use std::collections::{BTreeMap, VecDeque};
use thiserror::Error;

/// Layers left over once every orderable layer has been removed; each of
/// them sits on, or downstream of, a cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cycle detected among layers: {}", .layers.join(", "))]
pub struct CycleError {
    pub layers: Vec<String>,
}

/// Returns a topological order of the layers using Kahn's Algorithm.
pub fn topological_order(graph: &LayerGraph) -> Result<Vec<&str>, CycleError> {
    let count = graph.vertex_count();
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut queue = VecDeque::with_capacity(count);
    let mut order = Vec::with_capacity(count);

    // 1. Initialize In-Degrees
    for layer in graph.vertices() {
        let degree = graph.independents(layer).map_or(0, |set| set.len());
        in_degree.insert(layer, degree);
        if degree == 0 {
            queue.push_back(layer);
        }
    }

    // 2. Process Queue
    while let Some(layer) = queue.pop_front() {
        order.push(layer);
        for dependent in graph.dependents(layer).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(dependent.as_str());
                }
            }
        }
    }

    if order.len() != count {
        let layers = in_degree
            .into_iter()
            .filter(|&(_, degree)| degree > 0)
            .map(|(layer, _)| layer.to_string())
            .collect();
        return Err(CycleError { layers });
    }

    Ok(order)
}

pub fn is_acyclic(graph: &LayerGraph) -> bool {
    topological_order(graph).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(vertices: &[&str], edges: &[(&str, &str)]) -> LayerGraph {
        let mut g = LayerGraph::new();
        for v in vertices {
            g.add_vertex(v);
        }
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    #[test]
    fn test_sort_diamond_dependency() {
        // Shape: A -> B, A -> C, B+C -> D
        let g = graph(&["D", "C", "B", "A"], &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let res = topological_order(&g).expect("Sort failed");

        let pos = |id: &str| res.iter().position(|&x| x == id).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("A") < pos("C"));
        assert!(pos("B") < pos("D"));
        assert!(pos("C") < pos("D"));
    }

    #[test]
    fn test_cycle_detection_names_layers() {
        let g = graph(&["A", "B", "C", "Free"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let err = topological_order(&g).unwrap_err();
        assert_eq!(err.layers, vec!["A", "B", "C"]);
        assert!(err.to_string().contains("Cycle detected"), "Msg: {}", err);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let g = graph(&["A"], &[("A", "A")]);
        assert!(!is_acyclic(&g));
    }

    #[test]
    fn test_empty_graph_is_acyclic() {
        assert_eq!(topological_order(&LayerGraph::new()).unwrap(), Vec::<&str>::new());
    }
}
