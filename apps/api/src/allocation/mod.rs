// Allocation: match scoring, ranked recommendations and the allocate action.
// Scoring and ranking are pure; the only mutation is `ResourceStore::allocate`.

pub mod handlers;
pub mod recommender;
pub mod scoring;
