//! Blog list statistics
//!
//! Pure, stateless aggregation over an ordered slice of blog entries:
//! total likes, the favorite blog, the most prolific author and the
//! author with the most combined likes.
//!
//! Every function borrows its input and returns a fresh value, so calls
//! are reentrant and may run concurrently on any thread. Ties are always
//! resolved in favor of whichever candidate appears first in the input.
//!
//! ```
//! use bloglist_stats::{most_likes, BlogRecord};
//!
//! let blogs = vec![
//!     BlogRecord::new("Ada", 3),
//!     BlogRecord::new("Grace", 5),
//!     BlogRecord::new("Ada", 4),
//! ];
//! let top = most_likes(&blogs).unwrap();
//! assert_eq!(top.author, "Ada");
//! assert_eq!(top.likes, 7);
//! ```

pub mod error;
pub mod record;
pub mod stats;

pub use error::{RecordError, Result};
pub use record::{records_from_json, BlogEntry, BlogRecord};
pub use stats::{
    dummy, favorite_blog, most_blogs, most_likes, summarize, total_likes, AuthorBlogs,
    AuthorLikes, BlogStats,
};
