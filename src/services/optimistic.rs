// src/services/optimistic.rs - local state changes applied without waiting on the server

use crate::models::post::{Comment, LikeEntry, Likes, Post};

/// What a like action tells the holder of a post. The single-post view knows
/// the server's authoritative count; other callers may only know the toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeUpdate {
    Replace(Vec<LikeEntry>),
    SetCount(u64),
    Toggled(bool),
}

impl LikeUpdate {
    /// The "liked" half of the signal, when it carries one.
    pub fn liked(&self) -> Option<bool> {
        match self {
            LikeUpdate::Toggled(liked) => Some(*liked),
            _ => None,
        }
    }
}

/// Reconciles `update` against whatever representation `likes` currently has.
pub fn apply_like_update(likes: &mut Likes, update: LikeUpdate) {
    match update {
        LikeUpdate::Replace(entries) => *likes = Likes::Entries(entries),
        LikeUpdate::SetCount(n) => {
            *likes = if likes.is_sequence() {
                Likes::from_count(n)
            } else {
                Likes::Count(n)
            };
        }
        LikeUpdate::Toggled(liked) => match likes {
            Likes::Entries(entries) => {
                if liked {
                    entries.push(LikeEntry::Placeholder);
                } else {
                    entries.pop();
                }
            }
            Likes::Count(n) => {
                *n = if liked { n.saturating_add(1) } else { n.saturating_sub(1) };
            }
            Likes::Absent => {
                *likes = if liked {
                    Likes::placeholders(1)
                } else {
                    Likes::default()
                };
            }
        },
    }
}

/// The server answers a comment with the post's full list; it always wins.
pub fn replace_comments(post: &mut Post, comments: Vec<Comment>) {
    post.comments = comments;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(n: usize) -> Likes {
        Likes::Entries((0..n).map(|i| LikeEntry::User(format!("u{}", i))).collect())
    }

    #[test]
    fn toggle_on_sequence_grows_and_shrinks() {
        let mut likes = seq(3);
        apply_like_update(&mut likes, LikeUpdate::Toggled(true));
        assert_eq!(likes.count(), 4);
        assert!(likes.is_sequence());

        let mut likes = seq(3);
        apply_like_update(&mut likes, LikeUpdate::Toggled(false));
        assert_eq!(likes.count(), 2);

        let mut likes = seq(0);
        apply_like_update(&mut likes, LikeUpdate::Toggled(false));
        assert_eq!(likes.count(), 0);
    }

    #[test]
    fn toggle_on_count_floors_at_zero() {
        let mut likes = Likes::Count(2);
        apply_like_update(&mut likes, LikeUpdate::Toggled(true));
        assert_eq!(likes, Likes::Count(3));

        let mut likes = Likes::Count(0);
        apply_like_update(&mut likes, LikeUpdate::Toggled(false));
        assert_eq!(likes, Likes::Count(0));
    }

    #[test]
    fn toggle_on_absent_initializes_sequence() {
        let mut likes = Likes::Absent;
        apply_like_update(&mut likes, LikeUpdate::Toggled(true));
        assert_eq!(likes, Likes::Entries(vec![LikeEntry::Placeholder]));

        let mut likes = Likes::Absent;
        apply_like_update(&mut likes, LikeUpdate::Toggled(false));
        assert_eq!(likes, Likes::Entries(vec![]));
    }

    #[test]
    fn set_count_keeps_current_shape() {
        let mut likes = seq(1);
        apply_like_update(&mut likes, LikeUpdate::SetCount(5));
        assert_eq!(likes, Likes::placeholders(5));

        let mut likes = Likes::Count(1);
        apply_like_update(&mut likes, LikeUpdate::SetCount(5));
        assert_eq!(likes, Likes::Count(5));

        let mut likes = Likes::Absent;
        apply_like_update(&mut likes, LikeUpdate::SetCount(2));
        assert_eq!(likes, Likes::Count(2));
    }

    #[test]
    fn huge_server_count_is_not_materialized() {
        let mut likes = seq(2);
        apply_like_update(&mut likes, LikeUpdate::SetCount(u64::MAX));
        assert_eq!(likes, Likes::Count(u64::MAX));
        apply_like_update(&mut likes, LikeUpdate::Toggled(true));
        assert_eq!(likes.count(), u64::MAX);
    }

    #[test]
    fn replace_overrides_any_shape() {
        let replacement = vec![LikeEntry::User("me".into())];
        for mut likes in [seq(4), Likes::Count(9), Likes::Absent] {
            apply_like_update(&mut likes, LikeUpdate::Replace(replacement.clone()));
            assert_eq!(likes, Likes::Entries(replacement.clone()));
        }
    }
}
