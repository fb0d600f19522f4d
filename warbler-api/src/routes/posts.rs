/// Post endpoints
///
/// # Endpoints
///
/// - `POST /api/posts` - publish a post (gated)
/// - `GET /api/posts` - list posts, optional author filter and sort
/// - `GET /api/posts/:id` - fetch a single post
/// - `DELETE /api/posts/:id` - delete one's own post (gated)
///
/// The author of a created post is always the gate-resolved identity,
/// never a field of the request body.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use warbler_shared::{
    auth::middleware::AuthContext,
    models::post::{CreatePost, Post, SortOrder},
};

/// Maximum post body length in characters
const MAX_BODY_CHARS: usize = 140;

/// Words masked out of post bodies
const FORBIDDEN_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Create post request
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// Post body
    pub body: String,
}

/// Query parameters for listing posts
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParams {
    /// Restrict the listing to one author
    pub author_id: Option<Uuid>,

    /// Sort by creation time (default ascending)
    #[serde(default)]
    pub sort: SortOrder,
}

/// Masks forbidden words in a post body
///
/// Matching is per whitespace-separated word and case-insensitive;
/// punctuation attached to a word defeats the match, as in the original
/// service.
fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if FORBIDDEN_WORDS.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Publishes a new post as the authenticated user
///
/// # Errors
///
/// - `400 Bad Request`: body over 140 characters
/// - `401 Unauthorized`: handled by the gate before this runs
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    if req.body.chars().count() > MAX_BODY_CHARS {
        return Err(ApiError::BadRequest("post is too long".to_string()));
    }

    let post = Post::create(
        &state.db,
        CreatePost {
            user_id: auth.user_id,
            body: clean_body(&req.body),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Lists posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> ApiResult<Json<Vec<Post>>> {
    let posts = Post::list(&state.db, params.author_id, params.sort).await?;
    Ok(Json(posts))
}

/// Fetches a single post by ID
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Post>> {
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".to_string()))?;

    Ok(Json(post))
}

/// Deletes a post the authenticated user owns
///
/// # Errors
///
/// - `403 Forbidden`: the post belongs to someone else
/// - `404 Not Found`: no such post
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".to_string()))?;

    if post.user_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "you can only delete your own posts".to_string(),
        ));
    }

    Post::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_body_masks_forbidden_words() {
        assert_eq!(
            clean_body("this is a kerfuffle opinion"),
            "this is a **** opinion"
        );
    }

    #[test]
    fn test_clean_body_is_case_insensitive() {
        assert_eq!(clean_body("Sharbert! no, SHARBERT"), "Sharbert! no, ****");
    }

    #[test]
    fn test_clean_body_leaves_clean_text_alone() {
        assert_eq!(clean_body("nothing to see here"), "nothing to see here");
    }

    #[test]
    fn test_clean_body_masks_multiple_words() {
        assert_eq!(clean_body("kerfuffle fornax"), "**** ****");
    }
}
