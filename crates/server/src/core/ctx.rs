use crate::blogs::Blog;
use crate::core::auth::UserInfo;
use crate::core::error::{Error, Result};
use axum::{extract::FromRequestParts, http::request::Parts};

/// The caller behind a verified bearer token. The auth middleware puts it
/// in the request extensions; protected handlers extract it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    user_id: String,
    username: String,
}

impl Ctx {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fails with [`Error::NotOwner`] unless `blog` belongs to this caller.
    pub fn ensure_owner(&self, blog: &Blog) -> Result<()> {
        if blog.is_owned_by(&self.user_id) {
            Ok(())
        } else {
            Err(Error::NotOwner {
                blog_id: blog.id.clone(),
            })
        }
    }
}

impl From<UserInfo> for Ctx {
    fn from(user: UserInfo) -> Self {
        Self::new(user.id, user.username)
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::AuthFailCtxNotInRequestExt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blogs::Owner;
    use axum::http::Request;

    fn blog_owned_by(owner: Option<&str>) -> Blog {
        Blog {
            id: "b1".to_string(),
            title: "Random Blog".to_string(),
            author: "Aleksei Yin".to_string(),
            url: "https://alekseiyin.com/".to_string(),
            likes: 12,
            user: owner.map(|id| Owner {
                id: id.to_string(),
                username: "alex".to_string(),
                name: None,
            }),
        }
    }

    #[test]
    fn test_ensure_owner() {
        let ctx = Ctx::new("u1", "alex");
        assert!(ctx.ensure_owner(&blog_owned_by(Some("u1"))).is_ok());
        assert!(matches!(
            ctx.ensure_owner(&blog_owned_by(Some("u2"))),
            Err(Error::NotOwner { blog_id }) if blog_id == "b1"
        ));
        // Unowned blogs can't be changed by anyone.
        assert!(ctx.ensure_owner(&blog_owned_by(None)).is_err());
    }

    #[tokio::test]
    async fn test_extract_requires_middleware() {
        let (mut parts, _) = Request::new(()).into_parts();
        let missing = Ctx::from_request_parts(&mut parts, &()).await;
        assert!(matches!(missing, Err(Error::AuthFailCtxNotInRequestExt)));

        parts.extensions.insert(Ctx::new("u1", "alex"));
        let ctx = Ctx::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.username(), "alex");
    }
}
