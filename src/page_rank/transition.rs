use crate::*;
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashSet};

/// Next-page distribution for a walk standing on `page`, one entry per page
/// in page order.
///
/// Every page gets the teleport term `(1 - damping) / n`; every page `page`
/// links to additionally gets `damping / k`. A page without links yields the
/// uniform distribution `1 / n` whatever the damping.
pub fn transitions(
    graph: &LinkGraph,
    page: VertexId,
    damping: f64,
) -> Result<Vec<(VertexId, f64)>> {
    check_damping(damping)?;
    let n = graph.page_count();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }
    let links: HashSet<VertexId, ahash::RandomState> = graph.links(page).collect();
    let n = n as f64;
    let (teleport, follow) = if links.is_empty() {
        (1.0 / n, 0.0)
    } else {
        ((1.0 - damping) / n, damping / links.len() as f64)
    };
    let res = graph
        .pages()
        .iter()
        .map(|v| {
            if links.contains(v) {
                (*v, teleport + follow)
            } else {
                (*v, teleport)
            }
        })
        .collect();
    Ok(res)
}

/// Name-level form of [`transitions`].
pub fn transition_model(
    graph: &LinkGraph,
    page: &str,
    damping: f64,
) -> Result<BTreeMap<String, f64>> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    let v = graph
        .vertex(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
    let res = transitions(graph, v, damping)?
        .into_iter()
        .map(|(v, p)| (graph.name(v).to_string(), p))
        .collect();
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::RandomGraph;
    use quickcheck_macros::quickcheck;

    const EPS: f64 = 1e-9;

    fn assert_dist(trial: &BTreeMap<String, f64>, oracle: &[(&str, f64)]) {
        assert_eq!(trial.len(), oracle.len(), "{trial:?}");
        for (page, p) in oracle.iter() {
            let q = trial.get(*page).unwrap();
            assert!((p - q).abs() < EPS, "{page}: {q} != {p}");
        }
    }

    #[test]
    fn follow_and_teleport() {
        let g = LinkGraph::from_adjacency(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &["B"])])
            .unwrap();
        let trial = transition_model(&g, "A", 0.85).unwrap();
        assert_dist(&trial, &[("A", 0.05), ("B", 0.475), ("C", 0.475)]);
    }

    #[test]
    fn dangling_is_uniform() {
        let g = LinkGraph::from_adjacency(&[("A", &[]), ("B", &["A"]), ("C", &["A"])]).unwrap();
        for d in [0.0, 0.3, 0.85, 1.0] {
            let trial = transition_model(&g, "A", d).unwrap();
            let third = 1.0 / 3.0;
            assert_dist(&trial, &[("A", third), ("B", third), ("C", third)]);
        }
    }

    #[test]
    fn full_damping_only_follows() {
        let g = LinkGraph::from_adjacency(&[("A", &["B"]), ("B", &["A"])]).unwrap();
        let trial = transition_model(&g, "A", 1.0).unwrap();
        assert_dist(&trial, &[("A", 0.0), ("B", 1.0)]);
    }

    #[test]
    fn errors() {
        let empty = LinkGraph::new(&Corpus::new()).unwrap();
        assert!(matches!(
            transition_model(&empty, "A", 0.85),
            Err(Error::EmptyGraph)
        ));
        let g = LinkGraph::from_adjacency(&[("A", &[])]).unwrap();
        assert!(matches!(
            transition_model(&g, "B", 0.85),
            Err(Error::UnknownPage(_))
        ));
        assert!(matches!(
            transition_model(&g, "A", 1.2),
            Err(Error::InvalidDamping(_))
        ));
    }

    #[quickcheck]
    fn sums_to_one(g: RandomGraph, d: u8) {
        let g = &g.graph;
        let d = f64::from(d) / f64::from(u8::MAX);
        for v in g.pages().iter() {
            let dist = transitions(g, *v, d).unwrap();
            assert_eq!(dist.len(), g.page_count());
            let sum: f64 = dist.iter().map(|(_, p)| p).sum();
            assert!((sum - 1.0).abs() < EPS, "sum={sum}");
            assert!(dist.iter().all(|(_, p)| *p >= 0.0));
        }
    }
}
