mod agent;
mod greedy;
mod random;

pub use agent::{candidate_moves, Agent};
pub use greedy::{GreedyAgent, Heuristic, RunLengthHeuristic};
pub use random::RandomAgent;
