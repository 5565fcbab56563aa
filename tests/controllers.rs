//! End-to-end tests of the screen controllers.
//!
//! Each test wires an [`AppContext`] to a `MemoryGateway` seeded with the
//! sample listings, drives a controller, and checks both the gateway call
//! log and the toasts the user would see.

use nestquest::app::{AppContext, ListingBoard, SearchBar, SubscribeForm, VisitScheduler};
use nestquest::gateway::memory::GatewayCall;
use nestquest::gateway::{MemoryGateway, Table};
use nestquest::notify::{drain, Level, Notification, Toasts};
use nestquest::session::on_auth_callback;
use nestquest::{FilterField, PropertyType, UserProfile};
use std::sync::Arc;

fn setup() -> (Arc<MemoryGateway>, AppContext, Toasts) {
    let gateway = Arc::new(MemoryGateway::with_sample_listings());
    let (ctx, toasts) = AppContext::new(gateway.clone(), 20);
    (gateway, ctx, toasts)
}

fn login(ctx: &AppContext, email: &str) {
    on_auth_callback(&ctx.session, Some(UserProfile::new(email)));
}

fn ids(board: &ListingBoard) -> Vec<i64> {
    board.filtered().iter().map(|p| p.id).collect()
}

fn count_calls(gateway: &MemoryGateway, table: Table) -> usize {
    gateway
        .calls()
        .iter()
        .filter(|call| match call {
            GatewayCall::Fetch(t, _) | GatewayCall::Create(t, _) | GatewayCall::Delete(t, _) => *t == table,
            GatewayCall::GetById(t, _) => *t == table,
        })
        .count()
}

// ---------------------------------------------------------------------------
// Listing grid
// ---------------------------------------------------------------------------

#[tokio::test]
async fn grid_refilters_on_every_change() {
    let (_, ctx, mut toasts) = setup();
    let mut board = ListingBoard::new(ctx);

    board.load().await;
    assert_eq!(ids(&board), vec![1, 2, 3, 4, 5, 6]);

    board.set_filter(FilterField::PriceMin, "400000");
    assert_eq!(ids(&board), vec![2, 3]);

    board.set_filter(FilterField::PriceMin, "");
    board.set_filter(FilterField::Status, "for rent");
    assert_eq!(ids(&board), vec![4, 6]);

    board.set_filter(FilterField::Bedrooms, "3");
    assert_eq!(ids(&board), vec![6]);

    board.reset_filters();
    assert_eq!(ids(&board).len(), 6);
    assert_eq!(
        drain(&mut toasts),
        vec![Notification { level: Level::Info, message: "Filters have been reset".into() }]
    );
}

#[tokio::test]
async fn misspelled_type_matches_nothing() {
    let (_, ctx, mut toasts) = setup();
    let mut board = ListingBoard::new(ctx);
    board.load().await;

    board.set_filter(FilterField::PropertyType, "condo");
    assert_eq!(ids(&board), vec![3]);

    board.set_filter(FilterField::PropertyType, "castle");
    assert!(ids(&board).is_empty());
    assert_eq!(board.filter_form().property_type, "castle");
    assert!(board.filter_form().to_spec().is_err());
    let queued = drain(&mut toasts);
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].level, Level::Error);

    board.set_filter(FilterField::PropertyType, "condo");
    assert_eq!(ids(&board), vec![3]);
    assert_eq!(board.filter_spec().property_type, Some(PropertyType::Condo));
}

#[tokio::test]
async fn bad_type_before_first_load_never_shows_everything() {
    let (_, ctx, _toasts) = setup();
    let mut board = ListingBoard::new(ctx);

    board.set_filter(FilterField::PropertyType, "House");
    board.load().await;
    assert_eq!(board.properties().len(), 6);
    assert!(ids(&board).is_empty());

    board.reset_filters();
    assert_eq!(ids(&board).len(), 6);
    assert!(board.filter_spec().is_empty());
}

#[tokio::test]
async fn server_side_filtering_sends_conditions() {
    let (gateway, ctx, _toasts) = setup();
    let mut board = ListingBoard::new(ctx);

    board.set_filter(FilterField::PropertyType, "house");
    board.load_server_filtered().await;

    assert_eq!(board.properties().iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 5]);
    match &gateway.calls()[0] {
        GatewayCall::Fetch(Table::Property, params) => {
            let conditions = params.conditions.as_ref().expect("where clause");
            assert_eq!(conditions.len(), 1);
            assert_eq!(conditions[0].field_name, "type");
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn load_failure_shows_error_and_keeps_grid() {
    let (gateway, ctx, mut toasts) = setup();
    let mut board = ListingBoard::new(ctx);
    board.load().await;
    drain(&mut toasts);

    gateway.fail_with("network unreachable");
    board.load().await;

    assert_eq!(board.properties().len(), 6);
    assert!(!board.is_loading());
    let queued = drain(&mut toasts);
    assert_eq!(queued[0].level, Level::Error);
    assert!(queued[0].message.contains("network unreachable"));
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_favorite_requires_login() {
    let (gateway, ctx, mut toasts) = setup();
    let mut board = ListingBoard::new(ctx);
    board.load().await;

    board.toggle_favorite(2).await;

    assert_eq!(count_calls(&gateway, Table::UserFavorite), 0);
    assert_eq!(
        drain(&mut toasts),
        vec![Notification { level: Level::Warning, message: "Please log in to save favorites".into() }]
    );
}

#[tokio::test]
async fn listing_favorites_while_logged_out_asks_for_login() {
    let (gateway, ctx, mut toasts) = setup();
    let board = ListingBoard::new(ctx.clone());

    assert_eq!(board.signed_in_email("see your favorites"), None);
    assert_eq!(
        drain(&mut toasts),
        vec![Notification { level: Level::Warning, message: "Please log in to see your favorites".into() }]
    );
    assert!(gateway.calls().is_empty());

    login(&ctx, "ana@example.com");
    assert_eq!(board.signed_in_email("see your favorites").as_deref(), Some("ana@example.com"));
    assert!(drain(&mut toasts).is_empty());
}

#[tokio::test]
async fn toggle_favorite_adds_then_removes() {
    let (gateway, ctx, mut toasts) = setup();
    login(&ctx, "ana@example.com");
    let mut board = ListingBoard::new(ctx);
    board.load().await;
    assert!(board.favorites().is_empty());

    board.toggle_favorite(2).await;
    assert!(board.is_favorite(2));
    assert_eq!(gateway.count(Table::UserFavorite), 1);

    board.toggle_favorite(2).await;
    assert!(!board.is_favorite(2));
    assert_eq!(gateway.count(Table::UserFavorite), 0);

    let messages: Vec<String> = drain(&mut toasts).into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Property added to favorites", "Property removed from favorites"]);
}

#[tokio::test]
async fn favorites_follow_the_session() {
    let (_, ctx, _toasts) = setup();
    let session = ctx.session.clone();
    login(&ctx, "ana@example.com");
    let mut board = ListingBoard::new(ctx);
    board.load().await;
    board.toggle_favorite(3).await;
    assert_eq!(board.favorites().len(), 1);
    assert!(!board.on_session_change().await);

    on_auth_callback(&session, None);
    assert!(board.on_session_change().await);
    assert!(board.favorites().is_empty());

    on_auth_callback(&session, Some(UserProfile::new("ana@example.com")));
    assert!(board.on_session_change().await);
    assert!(board.is_favorite(3));
}

#[tokio::test]
async fn failed_toggle_resyncs_from_gateway() {
    let (gateway, ctx, mut toasts) = setup();
    login(&ctx, "ana@example.com");
    let mut board = ListingBoard::new(ctx);
    board.load().await;

    gateway.fail_with("timeout");
    board.toggle_favorite(1).await;
    gateway.recover();

    assert!(!board.is_favorite(1));
    assert!(!board.is_loading());
    let queued = drain(&mut toasts);
    assert_eq!(queued.last().map(|n| n.level), Some(Level::Error));
}

#[tokio::test]
async fn details_fall_back_to_gateway() {
    let gateway = Arc::new(MemoryGateway::with_sample_listings());
    let (ctx, mut toasts) = AppContext::new(gateway.clone(), 2);
    let mut board = ListingBoard::new(ctx);
    board.load().await;
    assert_eq!(board.properties().len(), 2);

    let property = board.property_details(5).await.expect("property 5");
    assert_eq!(property.title, "Countryside Cottage");

    assert!(board.property_details(77).await.is_none());
    assert_eq!(drain(&mut toasts)[0].message, "Property 77 not found");
}

// ---------------------------------------------------------------------------
// Newsletter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_validates_before_calling_gateway() {
    let (gateway, ctx, mut toasts) = setup();
    let mut form = SubscribeForm::new(ctx);

    assert!(!form.submit("").await);
    assert!(!form.submit("not-an-email").await);
    assert_eq!(count_calls(&gateway, Table::Subscription), 0);

    let queued = drain(&mut toasts);
    assert_eq!(queued[0], Notification { level: Level::Warning, message: "Please enter your email address".into() });
    assert_eq!(queued[1], Notification { level: Level::Error, message: "Please enter a valid email address".into() });

    assert!(form.submit("ana@example.com").await);
    assert!(form.is_subscribed());
    assert!(!form.is_submitting());
    assert_eq!(gateway.count(Table::Subscription), 1);
    assert_eq!(drain(&mut toasts)[0].level, Level::Success);
}

// ---------------------------------------------------------------------------
// Visits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn visit_without_email_never_reaches_gateway() {
    let (gateway, ctx, mut toasts) = setup();
    let mut board = ListingBoard::new(ctx.clone());
    board.load().await;
    let property = board.filtered()[1].clone();

    let mut scheduler = VisitScheduler::open(ctx, &property);
    scheduler.form.date = "2026-11-02".into();
    scheduler.form.time = "10:00".into();

    assert!(!scheduler.submit().await);
    assert_eq!(count_calls(&gateway, Table::PropertyVisit), 0);
    assert_eq!(drain(&mut toasts)[0].message, "Please fill in all required fields");
}

#[tokio::test]
async fn visit_prefills_logged_in_email_and_books() {
    let (gateway, ctx, mut toasts) = setup();
    login(&ctx, "ana@example.com");
    let mut board = ListingBoard::new(ctx.clone());
    board.load().await;
    let property = board.filtered()[0].clone();

    let mut scheduler = VisitScheduler::open(ctx, &property);
    assert_eq!(scheduler.property_title(), "Modern Downtown Apartment");
    assert_eq!(scheduler.form.email, "ana@example.com");
    scheduler.form.date = "2026-11-02".into();
    scheduler.form.time = "10:00".into();

    assert!(scheduler.submit().await);
    assert!(!scheduler.is_submitting());
    let visit = scheduler.scheduled().expect("scheduled visit");
    assert_eq!(visit.property_id, 1);
    assert_eq!(visit.phone, "");
    assert_eq!(gateway.count(Table::PropertyVisit), 1);
    assert_eq!(drain(&mut toasts)[0].level, Level::Success);
}

#[tokio::test]
async fn malformed_visit_time_is_rejected_locally() {
    let (gateway, ctx, _toasts) = setup();
    let mut board = ListingBoard::new(ctx.clone());
    board.load().await;
    let property = board.filtered()[0].clone();

    let mut scheduler = VisitScheduler::open(ctx, &property);
    scheduler.form.date = "2026-11-02".into();
    scheduler.form.time = "noonish".into();
    scheduler.form.email = "ana@example.com".into();

    assert!(!scheduler.submit().await);
    assert_eq!(count_calls(&gateway, Table::PropertyVisit), 0);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_matches_all_words() {
    let (_, ctx, mut toasts) = setup();
    let mut board = ListingBoard::new(ctx.clone());
    board.load().await;
    let search = SearchBar::new(ctx);

    assert!(search.submit("   ", board.properties()).is_none());
    assert_eq!(drain(&mut toasts)[0].message, "Please enter a search term");

    let hits = search.submit("downtown APARTMENT", board.properties()).unwrap();
    assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 4]);
    assert_eq!(drain(&mut toasts)[0].message, "Searching for \"downtown APARTMENT\"...");
}
