//! SQLite-backed blog storage

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::{Blog, BlogRepository, BlogUpdate, NewBlog, Owner};

const SELECT_BLOGS: &str = r#"
    SELECT b.id, b.title, b.author, b.url, b.likes, u.id, u.username, u.name
    FROM blogs b
    LEFT JOIN users u ON u.id = b.user_id
"#;

type BlogRow = (
    String,
    String,
    String,
    String,
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn blog_from_row(row: BlogRow) -> Blog {
    let (id, title, author, url, likes, owner_id, owner_username, owner_name) = row;
    let user = match (owner_id, owner_username) {
        (Some(id), Some(username)) => Some(Owner {
            id,
            username,
            name: owner_name,
        }),
        _ => None,
    };

    Blog {
        id,
        title,
        author,
        url,
        // The schema rejects negative likes.
        likes: u64::try_from(likes).unwrap_or(0),
        user,
    }
}

pub struct SqliteBlogStore {
    pool: SqlitePool,
}

impl SqliteBlogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for SqliteBlogStore {
    async fn list(&self) -> Result<Vec<Blog>> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!("{SELECT_BLOGS} ORDER BY b.rowid"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(blog_from_row).collect())
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Blog>> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!(
            "{SELECT_BLOGS} WHERE b.user_id = ? ORDER BY b.rowid"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(blog_from_row).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Blog>> {
        let row: Option<BlogRow> = sqlx::query_as(&format!("{SELECT_BLOGS} WHERE b.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(blog_from_row))
    }

    async fn create(&self, blog: NewBlog) -> Result<Blog> {
        let id = Uuid::new_v4().to_string();
        let likes = i64::try_from(blog.likes)?;

        sqlx::query(
            "INSERT INTO blogs (id, title, author, url, likes, user_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(likes)
        .bind(&blog.user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        info!("Blog {} created: {}", id, blog.title);

        self.get(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Blog {} vanished after insert", id))
    }

    async fn update(&self, id: &str, update: BlogUpdate) -> Result<Option<Blog>> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };

        let title = update.title.unwrap_or(current.title);
        let author = update.author.unwrap_or(current.author);
        let url = update.url.unwrap_or(current.url);
        let likes = i64::try_from(update.likes.unwrap_or(current.likes))?;

        sqlx::query("UPDATE blogs SET title = ?, author = ?, url = ?, likes = ? WHERE id = ?")
            .bind(&title)
            .bind(&author)
            .bind(&url)
            .bind(likes)
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("Blog {} updated", id);

        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Blog {} deleted", id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db;
    use tempfile::TempDir;

    async fn store(dir: &TempDir) -> (SqliteBlogStore, SqlitePool) {
        let pool = db::connect(&dir.path().join("blogs.sqlite")).await.unwrap();
        db::init_schema(&pool).await.unwrap();
        (SqliteBlogStore::new(pool.clone()), pool)
    }

    async fn insert_user(pool: &SqlitePool, id: &str, username: &str) {
        sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at) VALUES (?, ?, NULL, 'x', ?)",
        )
        .bind(id)
        .bind(username)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await
        .unwrap();
    }

    fn new_blog(title: &str, likes: u64, user_id: Option<&str>) -> NewBlog {
        NewBlog {
            title: title.to_string(),
            author: "Aleksei Yin".to_string(),
            url: "https://alekseiyin.com/".to_string(),
            likes,
            user_id: user_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_order() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store(&dir).await;

        store.create(new_blog("Random Blog", 12, None)).await.unwrap();
        store.create(new_blog("Second Blog", 30, None)).await.unwrap();

        let blogs = store.list().await.unwrap();
        let titles: Vec<_> = blogs.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Random Blog", "Second Blog"]);
        assert!(blogs.iter().all(|b| !b.id.is_empty() && b.user.is_none()));
    }

    #[tokio::test]
    async fn test_owner_is_populated() {
        let dir = TempDir::new().unwrap();
        let (store, pool) = store(&dir).await;
        insert_user(&pool, "u1", "alex").await;

        let blog = store.create(new_blog("How to Cook", 5, Some("u1"))).await.unwrap();
        let owner = blog.user.as_ref().unwrap();
        assert_eq!(owner.username, "alex");
        assert!(blog.is_owned_by("u1"));
        assert!(!blog.is_owned_by("u2"));

        let owned = store.list_by_owner("u1").await.unwrap();
        assert_eq!(owned, vec![blog]);
        assert!(store.list_by_owner("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store(&dir).await;
        let blog = store.create(new_blog("Random Blog", 12, None)).await.unwrap();

        let updated = store
            .update(
                &blog.id,
                BlogUpdate {
                    likes: Some(13),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.likes, 13);
        assert_eq!(updated.title, "Random Blog");
        assert_eq!(updated.url, blog.url);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store(&dir).await;

        assert!(store
            .update("missing", BlogUpdate::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_blog() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store(&dir).await;
        let blog = store.create(new_blog("to delete", 1, None)).await.unwrap();

        assert!(store.delete(&blog.id).await.unwrap());
        assert!(store.get(&blog.id).await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());
    }
}
