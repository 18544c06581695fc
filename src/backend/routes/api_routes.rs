/**
 * API Route Groups
 *
 * This module defines the REST route groups nested under `/api`.
 *
 * # Routes
 *
 * ## Users (`/api/user`)
 * - `POST /api/user` - Register
 * - `POST /api/user/login` - Login
 * - `GET /api/user?search=` - Search users (requires authentication)
 *
 * ## Chats (`/api/chat`, all require authentication)
 * - `POST /api/chat` - Access or create a one-to-one chat
 * - `GET /api/chat` - List the caller's chats
 * - `POST /api/chat/group` - Create a group chat
 * - `PUT /api/chat/rename` - Rename a chat
 * - `PUT /api/chat/groupadd` - Add a member
 * - `PUT /api/chat/groupremove` - Remove a member
 *
 * ## Messages (`/api/message`, all require authentication)
 * - `POST /api/message` - Send a message
 * - `GET /api/message/{chatId}` - List a chat's messages
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{all_users, auth_user, register_user};
use crate::backend::chat::{
    access_chat, add_to_group, create_group_chat, fetch_chats, remove_from_group, rename_group,
};
use crate::backend::messaging::{all_messages, send_message};
use crate::backend::middleware::protect;
use crate::backend::server::state::AppState;

/// Configure the `/api/user` routes
///
/// The `protect` layer is applied to `GET` before `POST` is added, so only
/// the search is authenticated.
pub fn user_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(all_users)
                .route_layer(from_fn_with_state(app_state.clone(), protect))
                .post(register_user),
        )
        .route("/login", post(auth_user))
}

/// Configure the `/api/chat` routes
pub fn chat_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(access_chat).get(fetch_chats))
        .route("/group", post(create_group_chat))
        .route("/rename", put(rename_group))
        .route("/groupadd", put(add_to_group))
        .route("/groupremove", put(remove_from_group))
        .route_layer(from_fn_with_state(app_state.clone(), protect))
}

/// Configure the `/api/message` routes
pub fn message_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/{chat_id}", get(all_messages))
        .route_layer(from_fn_with_state(app_state.clone(), protect))
}

/// Nest every API group under its prefix
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        .nest("/api/user", user_routes(app_state))
        .nest("/api/chat", chat_routes(app_state))
        .nest("/api/message", message_routes(app_state))
}
