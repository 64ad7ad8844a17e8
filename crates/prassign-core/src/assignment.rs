//! Reviewer selection.
//!
//! Selection functions are pure: they only read the candidates they are given
//! and draw from the random generator passed in.

use std::sync::{Mutex, PoisonError};

use prassign_models::{PullRequest, User};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pick up to `max_count` reviewers among the author's active teammates.
///
/// The author, inactive users and duplicate ids are never picked.
/// The result is a uniform random permutation prefix of the remaining pool.
pub fn select_reviewers<R: Rng + ?Sized>(
    rng: &mut R,
    author_id: &str,
    team_active_users: &[User],
    max_count: usize,
) -> Vec<String> {
    let mut pool: Vec<String> = Vec::with_capacity(team_active_users.len());
    for user in team_active_users {
        if user.is_active && user.user_id != author_id && !pool.contains(&user.user_id) {
            pool.push(user.user_id.clone());
        }
    }

    pool.shuffle(rng);
    pool.truncate(max_count);
    pool
}

/// Pick one replacement for `old_reviewer_id`, uniformly at random.
///
/// Excludes the author, every current reviewer and the departing reviewer.
/// Returns `None` when nobody is left.
pub fn select_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    old_reviewer_id: &str,
    pull_request: &PullRequest,
    team_active_users: &[User],
) -> Option<String> {
    let pool: Vec<&User> = team_active_users
        .iter()
        .filter(|u| {
            u.is_active
                && u.user_id != old_reviewer_id
                && u.user_id != pull_request.author_id
                && !pull_request.has_reviewer(&u.user_id)
        })
        .collect();

    pool.choose(rng).map(|u| u.user_id.clone())
}

/// Owns the random source used for reviewer selection.
pub struct AssignmentEngine {
    rng: Mutex<ChaCha8Rng>,
}

impl AssignmentEngine {
    /// Use a fixed seed, or OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn select_reviewers(
        &self,
        author_id: &str,
        team_active_users: &[User],
        max_count: usize,
    ) -> Vec<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_reviewers(&mut *rng, author_id, team_active_users, max_count)
    }

    pub fn select_replacement(
        &self,
        old_reviewer_id: &str,
        pull_request: &PullRequest,
        team_active_users: &[User],
    ) -> Option<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_replacement(&mut *rng, old_reviewer_id, pull_request, team_active_users)
    }
}

impl std::fmt::Debug for AssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use prassign_models::MAX_REVIEWERS;

    use super::*;

    fn users(ids: &[&str]) -> Vec<User> {
        ids.iter()
            .map(|id| User {
                user_id: id.to_string(),
                username: id.to_uppercase(),
                team_name: "backend".into(),
                is_active: true,
            })
            .collect()
    }

    fn pull_request(author_id: &str, reviewers: &[&str]) -> PullRequest {
        PullRequest {
            pull_request_id: "pr-1".into(),
            author_id: author_id.into(),
            assigned_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn reviewers_count_matches_pool_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let team = users(&["u1", "u2", "u3", "u4"]);

        for (size, expected) in [(1, 0), (2, 1), (3, 2), (4, 2)] {
            let result = select_reviewers(&mut rng, "u1", &team[..size], MAX_REVIEWERS);
            assert_eq!(result.len(), expected);
        }
    }

    #[test]
    fn reviewers_exclude_author_and_duplicates() {
        let mut team = users(&["u1", "u2", "u3"]);
        team.push(team[1].clone());

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = select_reviewers(&mut rng, "u1", &team, MAX_REVIEWERS);

            assert!(!result.contains(&"u1".to_string()));
            assert_eq!(result.iter().collect::<HashSet<_>>().len(), result.len());
        }
    }

    #[test]
    fn reviewers_skip_inactive_users() {
        let mut team = users(&["u1", "u2", "u3"]);
        team[2].is_active = false;

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            select_reviewers(&mut rng, "u1", &team, MAX_REVIEWERS),
            vec!["u2".to_string()]
        );
    }

    #[test]
    fn reviewers_cover_the_whole_pool() {
        let team = users(&["u1", "u2", "u3", "u4"]);
        let mut seen = HashSet::new();

        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            seen.extend(select_reviewers(&mut rng, "u1", &team, MAX_REVIEWERS));
        }

        assert_eq!(
            seen,
            ["u2", "u3", "u4"]
                .iter()
                .map(|s| s.to_string())
                .collect::<HashSet<_>>()
        );
    }

    #[test]
    fn replacement_excludes_author_and_reviewers() {
        let team = users(&["u1", "u2", "u3", "u4", "u5"]);
        let pr = pull_request("u1", &["u2", "u3"]);

        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select_replacement(&mut rng, "u2", &pr, &team).unwrap();
            assert!(picked == "u4" || picked == "u5", "unexpected pick {picked}");
        }
    }

    #[test]
    fn replacement_without_candidates() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let team = users(&["u1", "u2", "u3"]);
        let pr = pull_request("u1", &["u2", "u3"]);

        assert_eq!(select_replacement(&mut rng, "u2", &pr, &team), None);
        assert_eq!(select_replacement(&mut rng, "u2", &pr, &[]), None);
    }

    #[test]
    fn engine_with_fixed_seed_is_reproducible() {
        let team = users(&["u1", "u2", "u3", "u4", "u5", "u6"]);

        let first = AssignmentEngine::new(Some(7));
        let second = AssignmentEngine::new(Some(7));
        for _ in 0..10 {
            assert_eq!(
                first.select_reviewers("u1", &team, MAX_REVIEWERS),
                second.select_reviewers("u1", &team, MAX_REVIEWERS)
            );
        }
    }

    #[test]
    fn engine_draws_are_independent() {
        let team = users(&["u1", "u2", "u3", "u4", "u5", "u6"]);
        let engine = AssignmentEngine::new(None);

        let draws: HashSet<_> = (0..50)
            .map(|_| engine.select_reviewers("u1", &team, MAX_REVIEWERS))
            .collect();
        assert!(draws.len() > 1);
    }
}
