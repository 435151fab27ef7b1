use super::*;
use crate::*;
use algograph::graph::VertexId;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fixed-point PageRank by in-place round-robin updates.
///
/// Pages are updated one at a time in page order, each update reading the
/// latest ranks of its contributors. The solve ends once `n` consecutive
/// updates each changed a rank by at most `threshold`.
pub struct IteratedPageRank<'a> {
    graph: &'a LinkGraph,
    damping: f64,
    threshold: f64,
    max_iterations: usize,
    // page -> (contributor, L(contributor))
    inbound: HashMap<VertexId, Vec<(VertexId, usize)>, ahash::RandomState>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub threshold: f64,
    /// Bound on full round-robin cycles before giving up.
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            threshold: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    /// Absolute change of each page at its last update.
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    /// Single-page updates performed.
    pub updates: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        check_damping(damping)?;
        let threshold = config.threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(Error::InvalidThreshold(threshold));
        }
        if config.max_iterations < 1 {
            return Err(Error::InvalidIterationBound(config.max_iterations));
        }
        if g.is_empty() {
            return Err(Error::EmptyGraph);
        }
        let inbound = {
            let n = g.page_count();
            let mut inbound: HashMap<_, Vec<_>, ahash::RandomState> =
                HashMap::with_hasher(ahash::RandomState::new());
            for p in g.pages().iter() {
                let degree = g.out_degree(*p);
                if degree == 0 {
                    // a dangling page feeds every page, itself included
                    for q in g.pages().iter() {
                        inbound.entry(*q).or_default().push((*p, n));
                    }
                } else {
                    for q in g.links(*p) {
                        inbound.entry(q).or_default().push((*p, degree));
                    }
                }
            }
            inbound
        };
        Ok(Self {
            graph: g,
            damping,
            threshold,
            max_iterations: config.max_iterations,
            inbound,
        })
    }

    /// `Σ rank(p) / L(p)` over the pages linking to `q`; zero when none do.
    fn inflow(&self, q: VertexId, page_rank: &HashMap<VertexId, f64, ahash::RandomState>) -> f64 {
        let Some(contributors) = self.inbound.get(&q) else {
            return 0.0;
        };
        contributors
            .iter()
            .map(|(p, l)| page_rank.get(p).copied().unwrap_or_default() / *l as f64)
            .sum()
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let damping = self.damping;
        let threshold = self.threshold;
        let pages = self.graph.pages();
        let n = pages.len();
        let teleport = (1.0 - damping) / n as f64;
        let mut page_rank: HashMap<_, _, ahash::RandomState> =
            pages.iter().map(|v| (*v, 1.0 / n as f64)).collect();
        let mut delta: HashMap<_, _, ahash::RandomState> =
            pages.iter().map(|v| (*v, 0.0)).collect();

        let max_updates = self.max_iterations.saturating_mul(n);
        let mut updates = 0;
        let mut stable = 0;
        while stable < n {
            if updates >= max_updates {
                warn!(updates, threshold, "iteration did not converge");
                return Err(Error::NotConverged { updates, threshold });
            }
            let q = pages[updates % n];
            let new = teleport + damping * self.inflow(q, &page_rank);
            let old = page_rank.insert(q, new).unwrap_or_default();
            let change = (old - new).abs();
            delta.insert(q, change);
            if change <= threshold {
                stable += 1;
            } else {
                stable = 0;
            }
            updates += 1;
        }
        debug!(
            updates,
            cycles = updates.div_ceil(n),
            mass = norm_1(&page_rank),
            "iteration converged"
        );
        Ok(Self::Result {
            page_rank,
            delta,
            updates,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a> {
    graph: &'a LinkGraph,
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.pages().iter() {
            let name = self.graph.name(*v);
            let p = self.result.page_rank.get(v).copied().unwrap_or_default();
            let d = self.result.delta.get(v).copied().unwrap_or_default();
            writeln!(f, "{name}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
