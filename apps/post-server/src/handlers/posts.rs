//! Post handlers - the HTTP rendering of the post RPC surface.

use actix_web::{HttpResponse, web};

use post_core::domain::{Post, PostId};
use post_shared::dto::{CreatePostRequest, CreatePostResponse, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let id = state
        .posts
        .create(Post::new(identity.author_id, req.text))
        .await?;

    Ok(HttpResponse::Created().json(CreatePostResponse { id: id.to_string() }))
}

/// GET /api/posts/{id}
pub async fn get_post_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;

    let post = state.posts.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        id: post.id.to_string(),
        author_id: post.author_id.to_string(),
        created_at: post.created_at(),
        updated_at: post.updated_at,
        text: post.text,
    }))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;
    let req = body.into_inner();

    state
        .posts
        .update(Post::edit(id, identity.author_id, req.text))
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;

    state.posts.delete(id, identity.author_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use post_core::PostConfig;
    use post_core::ports::TokenService;
    use post_infra::{InMemoryPostStore, JwtConfig, JwtTokenService};

    use super::*;
    use crate::handlers::configure_routes;

    fn state() -> AppState {
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-test-secret".to_string(),
            ..JwtConfig::default()
        }));
        AppState::new(
            Arc::new(InMemoryPostStore::new()),
            tokens,
            PostConfig::default(),
            "memory",
        )
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn bearer(state: &AppState, author_id: PostId) -> (&'static str, String) {
        let token = state.tokens.generate_token(author_id).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    fn create_request(state: &AppState, author_id: PostId, text: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(state, author_id))
            .set_json(CreatePostRequest {
                text: text.to_string(),
            })
    }

    fn post_uri(id: impl std::fmt::Display) -> String {
        format!("/api/posts/{id}")
    }

    #[actix_rt::test]
    async fn test_create_and_get_post() {
        let state = state();
        let app = init_app!(state);
        let author = PostId::generate();

        let created: CreatePostResponse =
            test::call_and_read_body_json(&app, create_request(&state, author, "hello").to_request())
                .await;

        let req = test::TestRequest::get().uri(&post_uri(&created.id)).to_request();
        let post: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(post.id, created.id);
        assert_eq!(post.author_id, author.to_string());
        assert_eq!(post.text, "hello");
        assert!(post.updated_at >= post.created_at);
    }

    #[actix_rt::test]
    async fn test_create_returns_created() {
        let state = state();
        let app = init_app!(state);

        let req = create_request(&state, PostId::generate(), "hello").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[actix_rt::test]
    async fn test_create_requires_authentication() {
        let state = state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(CreatePostRequest {
                text: "hello".to_string(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_create_rejects_blank_text() {
        let state = state();
        let app = init_app!(state);

        let req = create_request(&state, PostId::generate(), "   ").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_get_rejects_malformed_id() {
        let state = state();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri(&post_uri("not-an-id")).to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_get_unknown_post_is_not_found() {
        let state = state();
        let app = init_app!(state);

        let req = test::TestRequest::get()
            .uri(&post_uri(PostId::generate()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_update_and_delete_are_scoped_to_author() {
        let state = state();
        let app = init_app!(state);
        let owner = PostId::generate();
        let stranger = PostId::generate();

        let created: CreatePostResponse =
            test::call_and_read_body_json(&app, create_request(&state, owner, "hello").to_request())
                .await;
        let uri = post_uri(&created.id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&state, stranger))
            .set_json(UpdatePostRequest {
                text: "hijacked".to_string(),
            })
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&state, stranger))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&state, owner))
            .set_json(UpdatePostRequest {
                text: "bye".to_string(),
            })
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let post: PostResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(post.text, "bye");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&state, owner))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_malformed_json_is_bad_request() {
        let state = state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&state, PostId::generate()))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"txt\": 1}")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_health_reports_storage() {
        let state = state();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
