//! Ordering of post collections

use super::model::Post;

/// Sort posts newest first by publication timestamp.
///
/// Posts with a missing or unparseable date are treated as the oldest and end
/// up last. The sort is stable, so ties keep the order the store returned.
pub fn newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|post| std::cmp::Reverse(post.published_at()));
}
