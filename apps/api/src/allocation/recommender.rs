use serde::Serialize;

use crate::allocation::scoring::{MatchScore, MatchScorer};
use crate::models::{Project, Resource};

/// An available resource paired with its score against the selected project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResource {
    pub resource: Resource,
    #[serde(flatten)]
    pub score: MatchScore,
}

/// Ranks the `Available` members of `pool` for `project`, best first.
///
/// Resources in any other status are skipped even if the caller forgot to
/// pre-filter. Equal scores keep their pool order (`sort_by` is stable).
///
/// Without a project every candidate gets the neutral placeholder score and
/// the pool order is kept.
pub fn recommend(
    project: Option<&Project>,
    pool: &[Resource],
    scorer: &dyn MatchScorer,
) -> Vec<RankedResource> {
    let candidates = pool.iter().filter(|r| r.is_available()).cloned();

    let Some(project) = project else {
        return candidates
            .map(|resource| RankedResource {
                resource,
                score: MatchScore::placeholder(),
            })
            .collect();
    };

    let mut ranked: Vec<RankedResource> = candidates
        .map(|resource| {
            let score = scorer.score(&resource, project);
            RankedResource { resource, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_score.cmp(&a.score.total_score));
    ranked
}
