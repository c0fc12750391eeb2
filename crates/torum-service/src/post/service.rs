//! Post CRUD with ownership and moderation rules.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use torum_auth::rbac::{Permission, RbacEnforcer};
use torum_core::error::AppError;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_database::repositories::PostRepository;
use torum_entity::post::{CreatePost, Post, UpdatePost};

use crate::context::RequestContext;

/// Longest accepted post title, in characters.
const MAX_TITLE_LENGTH: usize = 200;

/// Title and body submitted when writing or editing a post.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PostInput {
    /// Post title.
    pub post_title: String,
    /// Post body.
    pub post_content: String,
}

impl PostInput {
    /// Trim the title and check its length.
    fn normalized(self) -> Result<(String, String), AppError> {
        let title = self.post_title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Post title cannot be empty"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::validation(format!(
                "Post title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }
        Ok((title.to_string(), self.post_content))
    }
}

/// Handles post operations.
#[derive(Debug, Clone)]
pub struct PostService {
    post_repo: Arc<PostRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl PostService {
    /// Creates a new post service.
    pub fn new(post_repo: Arc<PostRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { post_repo, rbac }
    }

    /// Writes a new post owned by the caller.
    pub async fn create_post(&self, ctx: &RequestContext, input: PostInput) -> Result<Post, AppError> {
        self.rbac
            .require_permission(&ctx.role, &Permission::CreateContent)?;
        let (post_title, post_content) = input.normalized()?;

        let post = self
            .post_repo
            .create(&CreatePost {
                post_owner: ctx.user_id,
                post_title,
                post_content,
            })
            .await?;

        info!(user_id = %ctx.user_id, post_id = %post.post_id, "Post created");
        Ok(post)
    }

    /// Lists every post, newest first.
    pub async fn list_posts(&self, page: PageRequest) -> Result<PageResponse<Post>, AppError> {
        self.post_repo.find_all(&page).await
    }

    /// Lists the caller's posts.
    pub async fn list_my_posts(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Post>, AppError> {
        self.post_repo.find_by_owner(ctx.user_id, &page).await
    }

    /// Fetches a single post.
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post, AppError> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    /// Replaces a post's title and content. Only the owner may edit.
    pub async fn update_post(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
        input: PostInput,
    ) -> Result<Post, AppError> {
        let (post_title, post_content) = input.normalized()?;

        let post = self
            .post_repo
            .update_owned(
                post_id,
                ctx.user_id,
                &UpdatePost {
                    post_title,
                    post_content,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        info!(user_id = %ctx.user_id, post_id = %post_id, "Post updated");
        Ok(post)
    }

    /// Deletes a post. Owners and moderators may delete; everyone else
    /// sees the post as missing.
    pub async fn delete_post(&self, ctx: &RequestContext, post_id: Uuid) -> Result<(), AppError> {
        let post = self.get_post(post_id).await?;

        if !self
            .rbac
            .can_remove_content(&ctx.role, post.is_owned_by(ctx.user_id))
        {
            return Err(AppError::not_found("Post not found"));
        }

        if !self.post_repo.delete(post_id).await? {
            return Err(AppError::not_found("Post not found"));
        }

        info!(
            user_id = %ctx.user_id,
            ip = %ctx.ip_address,
            post_id = %post_id,
            owner_id = %post.post_owner,
            "Post deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> PostInput {
        PostInput {
            post_title: title.to_string(),
            post_content: "body".to_string(),
        }
    }

    #[test]
    fn test_title_is_trimmed() {
        let (title, content) = input("  Hello forum  ").normalized().unwrap();
        assert_eq!(title, "Hello forum");
        assert_eq!(content, "body");
    }

    #[test]
    fn test_title_bounds() {
        assert!(input("").normalized().is_err());
        assert!(input("   ").normalized().is_err());
        assert!(input(&"t".repeat(200)).normalized().is_ok());
        assert!(input(&"t".repeat(201)).normalized().is_err());
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let post = PostInput {
            post_title: "Title".to_string(),
            post_content: String::new(),
        };
        assert!(post.normalized().is_ok());
    }
}
