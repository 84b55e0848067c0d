//! Aggregation functions
//!
//! All ties resolve to the first candidate in input order. For the author
//! based statistics that means the author whose first post appears
//! earliest.

use crate::record::BlogEntry;
use serde::Serialize;
use std::collections::HashMap;

/// The author with the most posts and how many they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    #[serde(rename = "blogs")]
    pub count: usize,
}

/// The author with the most combined likes and that sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// Every statistic over one slice, computed in a single call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogStats<'a, B> {
    pub blog_count: usize,
    pub total_likes: u64,
    pub favorite_blog: Option<&'a B>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

/// Sanity probe. Always 1.
pub fn dummy<B>(_blogs: &[B]) -> u32 {
    1
}

/// Sum of likes over all entries. Saturates instead of overflowing.
pub fn total_likes<B: BlogEntry>(blogs: &[B]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |sum, blog| sum.saturating_add(blog.likes()))
}

/// The entry with the most likes, or `None` for an empty slice.
pub fn favorite_blog<B: BlogEntry>(blogs: &[B]) -> Option<&B> {
    // Iterator::max_by_key returns the last maximum; we want the first.
    blogs.iter().fold(None, |best, blog| match best {
        Some(current) if current.likes() >= blog.likes() => best,
        _ => Some(blog),
    })
}

/// The author with the greatest number of entries.
pub fn most_blogs<B: BlogEntry>(blogs: &[B]) -> Option<AuthorBlogs> {
    let (author, count) = leader(tally_by_author(blogs, |_| 1))?;
    Some(AuthorBlogs {
        author: author.to_string(),
        count: usize::try_from(count).unwrap_or(usize::MAX),
    })
}

/// The author whose entries have the greatest summed likes.
pub fn most_likes<B: BlogEntry>(blogs: &[B]) -> Option<AuthorLikes> {
    let (author, likes) = leader(tally_by_author(blogs, |blog| blog.likes()))?;
    Some(AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

pub fn summarize<B: BlogEntry>(blogs: &[B]) -> BlogStats<'_, B> {
    BlogStats {
        blog_count: blogs.len(),
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

/// Per-author totals of `weight`, one slot per distinct author in
/// first-seen order.
fn tally_by_author<'a, B, F>(blogs: &'a [B], weight: F) -> Vec<(&'a str, u64)>
where
    B: BlogEntry,
    F: Fn(&B) -> u64,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<(&'a str, u64)> = Vec::new();

    for blog in blogs {
        let author = blog.author();
        let slot = *slots.entry(author).or_insert_with(|| {
            totals.push((author, 0));
            totals.len() - 1
        });
        totals[slot].1 = totals[slot].1.saturating_add(weight(blog));
    }

    totals
}

/// First entry holding the strictly greatest total.
fn leader(totals: Vec<(&str, u64)>) -> Option<(&str, u64)> {
    totals.into_iter().fold(None, |best, (author, total)| match best {
        Some((_, top)) if top >= total => best,
        _ => Some((author, total)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BlogRecord;

    fn blog(title: &str, author: &str, likes: u64) -> BlogRecord {
        BlogRecord::new(author, likes).with_title(title)
    }

    fn by_author(pairs: &[(&str, u64)]) -> Vec<BlogRecord> {
        pairs
            .iter()
            .map(|(author, likes)| BlogRecord::new(*author, *likes))
            .collect()
    }

    #[test]
    fn test_dummy_returns_one() {
        let blogs: Vec<BlogRecord> = vec![];
        assert_eq!(dummy(&blogs), 1);
    }

    #[test]
    fn test_total_likes_empty() {
        let blogs: Vec<BlogRecord> = vec![];
        assert_eq!(total_likes(&blogs), 0);
    }

    #[test]
    fn test_total_likes_single() {
        let blogs = vec![blog("testSingular", "Aleksei Yin", 5)];
        assert_eq!(total_likes(&blogs), 5);
    }

    #[test]
    fn test_total_likes_many() {
        let blogs = vec![
            blog("test 1", "Aleksei Yin", 10),
            blog("test 1", "Aleksei Yin", 7),
            blog("test 1", "Aleksei Yin", 2),
        ];
        assert_eq!(total_likes(&blogs), 19);
    }

    #[test]
    fn test_total_likes_is_additive() {
        let a = by_author(&[("A", 3), ("B", 9)]);
        let b = by_author(&[("C", 40), ("A", 1), ("D", 0)]);
        let joined: Vec<BlogRecord> = a.iter().chain(b.iter()).cloned().collect();

        assert_eq!(total_likes(&joined), total_likes(&a) + total_likes(&b));
    }

    #[test]
    fn test_total_likes_saturates() {
        let blogs = by_author(&[("A", u64::MAX), ("B", 1)]);
        assert_eq!(total_likes(&blogs), u64::MAX);
    }

    #[test]
    fn test_favorite_blog_empty() {
        let blogs: Vec<BlogRecord> = vec![];
        assert_eq!(favorite_blog(&blogs), None);
    }

    #[test]
    fn test_favorite_blog_single() {
        let blogs = vec![blog("Canonical string reduction", "Edsger W. Dijkstra", 12)];
        assert_eq!(favorite_blog(&blogs), Some(&blogs[0]));
    }

    #[test]
    fn test_favorite_blog_most_liked() {
        let blogs = vec![
            blog("not favorite blog", "Aleksei Yin", 2),
            blog("not favorite blog", "Aleksei Yin", 5),
            blog("favorite blog", "Aleksei Yin", 10),
        ];
        assert_eq!(favorite_blog(&blogs), Some(&blogs[2]));
    }

    #[test]
    fn test_favorite_blog_tie_keeps_first() {
        let blogs = vec![
            blog("early", "A", 7),
            blog("first max", "B", 9),
            blog("second max", "C", 9),
        ];
        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.title.as_deref(), Some("first max"));
    }

    #[test]
    fn test_most_blogs_empty() {
        let blogs: Vec<BlogRecord> = vec![];
        assert_eq!(most_blogs(&blogs), None);
    }

    #[test]
    fn test_most_blogs_counts_posts() {
        let blogs = vec![
            blog("Blog title 1", "Most blogs author", 1),
            blog("Blog title 2", "Most blogs author", 2),
            blog("Blog title 3", "Most blogs author", 3),
            blog("Blog title 4", "Middle author", 4),
            blog("Blog title 2", "Most blogs author", 2),
            blog("Blog title 5", "Middle author", 5),
            blog("Blog title 6", "Least blogs author", 100),
            blog("Blog title 2", "Most blogs author", 2),
        ];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "Most blogs author".to_string(),
                count: 5
            })
        );
    }

    #[test]
    fn test_most_blogs_count_is_exact_for_long_lists() {
        let blogs: Vec<BlogRecord> = (0..70_000).map(|_| BlogRecord::new("Prolific", 0)).collect();
        assert_eq!(most_blogs(&blogs).unwrap().count, 70_000);
    }

    #[test]
    fn test_most_blogs_single() {
        let blogs = vec![blog("Blog title 1", "Most blogs author", 10000)];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "Most blogs author".to_string(),
                count: 1
            })
        );
    }

    #[test]
    fn test_most_blogs_not_alphabetical() {
        // "Zed" sorts last but has the fewest posts.
        let blogs = by_author(&[("Ann", 0), ("Zed", 0), ("Ann", 0), ("Bob", 0)]);
        let top = most_blogs(&blogs).unwrap();
        assert_eq!(top.author, "Ann");
        assert_eq!(top.count, 2);
    }

    #[test]
    fn test_most_blogs_tie_keeps_first_author() {
        let blogs = by_author(&[("Bob", 0), ("Ann", 0), ("Ann", 0), ("Bob", 0)]);
        assert_eq!(most_blogs(&blogs).unwrap().author, "Bob");
    }

    #[test]
    fn test_most_likes_empty() {
        let blogs: Vec<BlogRecord> = vec![];
        assert_eq!(most_likes(&blogs), None);
    }

    #[test]
    fn test_most_likes_sums_per_author() {
        let blogs = by_author(&[
            ("Author with most likes", 555),
            ("Author with some likes", 1),
            ("Author with least likes", 1),
            ("Author with most likes", 555),
            ("Author with some likes", 1),
            ("Author with some likes", 9999),
            ("Author with least likes", 1),
            ("Author with most likes", 555),
            ("Author with least likes", 555),
            ("Author with most likes", 9999),
        ]);
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "Author with most likes".to_string(),
                likes: 11664
            })
        );
    }

    #[test]
    fn test_most_likes_single() {
        let blogs = vec![blog("Blog title 1", "Some author", 4)];
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "Some author".to_string(),
                likes: 4
            })
        );
    }

    #[test]
    fn test_most_likes_tie_keeps_discovery_order() {
        let blogs = by_author(&[("C", 1), ("A", 5), ("C", 4), ("A", 0)]);
        let top = most_likes(&blogs).unwrap();
        assert_eq!(top.author, "C");
        assert_eq!(top.likes, 5);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let blogs = by_author(&[("A", 2), ("B", 3), ("A", 2)]);
        assert_eq!(most_likes(&blogs), most_likes(&blogs));
        assert_eq!(most_blogs(&blogs), most_blogs(&blogs));
        assert_eq!(favorite_blog(&blogs), favorite_blog(&blogs));
        assert_eq!(total_likes(&blogs), total_likes(&blogs));
    }

    #[test]
    fn test_works_over_borrowed_entries() {
        let owned = by_author(&[("A", 1), ("B", 2)]);
        let borrowed: Vec<&BlogRecord> = owned.iter().collect();
        assert_eq!(total_likes(&borrowed), 3);
        assert_eq!(**favorite_blog(&borrowed).unwrap(), owned[1]);
    }

    #[test]
    fn test_summarize_serializes_counts_as_blogs() {
        let blogs = by_author(&[("A", 1), ("A", 2), ("B", 5)]);
        let stats = summarize(&blogs);
        assert_eq!(stats.blog_count, 3);
        assert_eq!(stats.total_likes, 8);

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["most_blogs"]["blogs"], 2);
        assert_eq!(value["most_blogs"]["author"], "A");
        assert_eq!(value["most_likes"]["author"], "B");
        assert_eq!(value["favorite_blog"]["likes"], 5);
    }

    #[test]
    fn test_summarize_empty() {
        let blogs: Vec<BlogRecord> = vec![];
        let value = serde_json::to_value(summarize(&blogs)).unwrap();
        assert_eq!(value["total_likes"], 0);
        assert!(value["favorite_blog"].is_null());
        assert!(value["most_blogs"].is_null());
        assert!(value["most_likes"].is_null());
    }
}
