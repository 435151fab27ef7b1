use super::{transition::transitions, *};
use crate::*;
use algograph::graph::VertexId;
use rand::Rng;
use std::{
    cell::RefCell,
    collections::{hash_map::Entry, HashMap},
};
use tracing::debug;

/// Monte-Carlo estimate of PageRank: the visit frequencies of one random
/// walk over the transition model.
pub struct SampledPageRank<'a, R>
where
    R: Rng,
{
    graph: &'a LinkGraph,
    damping: f64,
    samples: usize,
    rng: RefCell<R>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<'a, R: Rng> SampledPageRank<'a, R> {
    pub fn new(g: &'a LinkGraph, config: &Config, rng: R) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples < 1 {
            return Err(Error::InvalidSampleCount(config.samples));
        }
        if g.is_empty() {
            return Err(Error::EmptyGraph);
        }
        Ok(Self {
            graph: g,
            damping: config.damping,
            samples: config.samples,
            rng: RefCell::new(rng),
        })
    }

    pub fn into_rng(self) -> R {
        self.rng.into_inner()
    }
}

impl<R: Rng> PageRank for SampledPageRank<'_, R> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let pages = self.graph.pages();
        let mut rng = self.rng.borrow_mut();
        let mut transition_cache: HashMap<VertexId, Vec<(VertexId, f64)>, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        let mut visits: HashMap<VertexId, usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());

        let mut cur = pages[rng.random_range(0..pages.len())];
        for _ in 0..self.samples {
            *visits.entry(cur).or_insert(0) += 1;
            let dist = match transition_cache.entry(cur) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(transitions(self.graph, cur, self.damping)?),
            };
            let r: f64 = rng.random();
            cur = pick(dist, r).ok_or(Error::EmptyGraph)?;
        }
        debug!(
            samples = self.samples,
            visited = visits.len(),
            pages = pages.len(),
            "random walk finished"
        );

        let n = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        Ok(Self::Result {
            page_rank,
            visits,
            samples: self.samples,
        })
    }
}

/// Inverse-CDF pick: the first entry whose running sum exceeds `r`.
///
/// Rounding can leave the total a hair below `r`; the last entry is taken
/// then.
fn pick(dist: &[(VertexId, f64)], r: f64) -> Option<VertexId> {
    let mut acc = 0.0;
    for (v, p) in dist.iter() {
        acc += p;
        if r < acc {
            return Some(*v);
        }
    }
    dist.last().map(|(v, _)| *v)
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
            match self.result.page_rank.get(v) {
                Some(p) => {
                    let c = self.result.visits.get(v).copied().unwrap_or_default();
                    writeln!(f, "{name}: {p:?}, {c}/{}", self.result.samples)?;
                }
                None => writeln!(f, "{name}: unvisited")?,
            }
        }
        Ok(())
    }
}
