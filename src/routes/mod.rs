use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    self, auth, categories, comments, events, notifications, participations, reviews,
    subscriptions, tickets, users,
};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/categories", category_routes())
        .nest("/events", event_routes())
        .nest("/comments", comment_routes())
        .nest("/reviews", review_routes())
        .nest("/tickets", ticket_routes())
        .nest("/notifications", notification_routes())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/me", axum::routing::patch(users::update_me))
        .route("/me/password", put(users::change_password))
        .route("/me/tickets", get(tickets::my_tickets))
        .route(
            "/:id",
            get(users::get_user)
                .patch(users::admin_update_user)
                .delete(users::admin_delete_user),
        )
        .route(
            "/:id/follow",
            post(subscriptions::follow_user).delete(subscriptions::unfollow_user),
        )
        .route("/:id/followers", get(subscriptions::user_followers))
        .route("/:id/following", get(subscriptions::user_following))
        .route("/:id/participations", get(participations::user_participations))
        .route("/:id/comments", get(comments::user_comments))
        .route("/:id/reviews", get(reviews::user_reviews))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/:id",
            axum::routing::patch(categories::rename_category)
                .delete(categories::delete_category),
        )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(events::create_event).get(events::list_events))
        .route("/recommended", get(events::recommended_events))
        .route(
            "/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/:id/stats", get(events::event_stats))
        .route(
            "/:id/participation",
            put(participations::rsvp).delete(participations::cancel_rsvp),
        )
        .route("/:id/participations", get(participations::event_participations))
        .route(
            "/:id/comments",
            post(comments::create_comment).get(comments::event_comments),
        )
        .route(
            "/:id/reviews",
            post(reviews::create_review).get(reviews::event_reviews),
        )
        .route(
            "/:id/tickets",
            post(tickets::purchase_ticket).get(tickets::event_tickets),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/:id",
        axum::routing::patch(comments::update_comment).delete(comments::delete_comment),
    )
}

fn review_routes() -> Router<AppState> {
    Router::new().route(
        "/:id",
        axum::routing::patch(reviews::update_review).delete(reviews::delete_review),
    )
}

fn ticket_routes() -> Router<AppState> {
    Router::new().route("/:id", axum::routing::delete(tickets::cancel_ticket))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/:id/read", post(notifications::mark_notification_read))
        .route("/read-all", post(notifications::mark_all_notifications_read))
}
