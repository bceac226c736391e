//! Price management workflow against the in-process mock backend

mod common;

use axum::http::StatusCode;
use common::Backend;
use pos_admin::pricing::{
    BranchFilter, COMMIT_FALLBACK_MESSAGE, COMMIT_SUCCESS_MESSAGE, DialogState, PriceKey, PriceWorkspace, SaveStatus,
};
use pos_admin::{AdminError, Notification};
use pos_client::{OneshotHttpClient, Session};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::broadcast;

fn workspace(backend: &Arc<Backend>) -> (PriceWorkspace<OneshotHttpClient>, broadcast::Receiver<Notification>) {
    let notifier = common::notifier();
    let rx = notifier.subscribe();
    let api = backend.api(Session::with_token("test-token"));
    (PriceWorkspace::new(api, notifier), rx)
}

fn last_notification(rx: &mut broadcast::Receiver<Notification>) -> Option<Notification> {
    let mut last = None;
    while let Ok(n) = rx.try_recv() {
        last = Some(n);
    }
    last
}

/// Loaded on Main Store, dialog for product 3 in edit mode
async fn editing_product_3(backend: &Arc<Backend>) -> (PriceWorkspace<OneshotHttpClient>, broadcast::Receiver<Notification>) {
    let (ws, rx) = workspace(backend);
    ws.load(BranchFilter::ByName("Main Store".into())).await.unwrap();
    ws.open_product(3).await.unwrap();
    ws.begin_edit().await.unwrap();
    (ws, rx)
}

#[tokio::test]
async fn test_load_by_name_fetches_products_once() {
    let backend = Backend::seeded();
    let (ws, _rx) = workspace(&backend);

    ws.load(BranchFilter::ByName("Downtown".into())).await.unwrap();

    assert_eq!(ws.selection().await.branch_id().unwrap(), 2);
    assert_eq!(ws.branches().await.len(), 2);
    assert_eq!(ws.price_types().await.len(), 2);
    assert_eq!(ws.products().await.len(), 3);
    assert_eq!(Backend::count(&backend.counters.branch_products), 1);
    assert!(
        backend
            .auth_headers
            .lock()
            .unwrap()
            .iter()
            .all(|h| h == "Bearer test-token")
    );
}

#[tokio::test]
async fn test_load_by_id_fetches_lists_concurrently() {
    let backend = Backend::seeded();
    let (ws, _rx) = workspace(&backend);

    ws.load(BranchFilter::ById(1)).await.unwrap();

    assert_eq!(ws.selection().await.branch().unwrap().name, "Main Store");
    assert_eq!(ws.products().await.len(), 3);
    assert_eq!(Backend::count(&backend.counters.branches), 1);
    assert_eq!(Backend::count(&backend.counters.price_types), 1);
    assert_eq!(Backend::count(&backend.counters.branch_products), 1);
}

#[tokio::test]
async fn test_one_failing_list_keeps_the_others() {
    let backend = Backend::seeded();
    *backend.fail_price_types.lock().unwrap() = true;
    let (ws, mut rx) = workspace(&backend);

    let err = ws.load(BranchFilter::ById(2)).await.unwrap_err();

    assert!(matches!(err, AdminError::Client(_)));
    assert_eq!(ws.branches().await.len(), 2);
    assert!(ws.price_types().await.is_empty());
    assert_eq!(ws.products().await.len(), 3);
    let n = last_notification(&mut rx).unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, "Price types unavailable");
}

#[tokio::test]
async fn test_unknown_branch_issues_no_price_request() {
    let backend = Backend::seeded();
    let (ws, mut rx) = workspace(&backend);

    let err = ws.load(BranchFilter::ByName("Uptown".into())).await.unwrap_err();
    assert!(matches!(err, AdminError::NoBranchSelected));
    assert_eq!(last_notification(&mut rx).unwrap().message, "No branch selected");

    assert!(matches!(
        ws.open_product(3).await,
        Err(AdminError::NoBranchSelected)
    ));
    assert!(matches!(
        ws.select_branch(BranchFilter::ById(99)).await,
        Err(AdminError::NoBranchSelected)
    ));
    assert_eq!(Backend::count(&backend.counters.branch_products), 0);
    assert_eq!(Backend::count(&backend.counters.price_loads), 0);
    assert!(ws.products().await.is_empty());
}

#[tokio::test]
async fn test_own_branch_from_session_token() {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    let backend = Backend::seeded();
    let token = format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(r#"{"sub":"12","role":"Cashier"}"#)
    );
    let session = Session::with_token(token);
    let ws = PriceWorkspace::new(backend.api(session.clone()), common::notifier());

    ws.load_own_branch(&session).await.unwrap();

    assert_eq!(ws.selection().await.branch_id().unwrap(), 2);
    assert_eq!(Backend::count(&backend.counters.employees), 1);
    assert_eq!(Backend::count(&backend.counters.branch_products), 1);
}

#[tokio::test]
async fn test_own_branch_without_employee_claim_fails_closed() {
    let backend = Backend::seeded();
    let session = Session::with_token("opaque");
    let ws = PriceWorkspace::new(backend.api(session.clone()), common::notifier());

    assert!(ws.load_own_branch(&session).await.is_err());
    assert!(!ws.selection().await.is_selected());
    assert_eq!(Backend::count(&backend.counters.branch_products), 0);
}

#[tokio::test]
async fn test_open_product_seeds_buffer() {
    let backend = Backend::seeded();
    let (ws, _rx) = workspace(&backend);
    ws.load(BranchFilter::ById(1)).await.unwrap();

    ws.open_product(7).await.unwrap();

    assert_eq!(ws.dialog_state().await, DialogState::View);
    let buffer = ws.buffer().await;
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.get(&PriceKey::new(7, 1, 1)), Some("0"));
    assert_eq!(buffer.get(&PriceKey::new(7, 1, 2)), Some("3.50"));
}

#[tokio::test]
async fn test_successful_commit_posts_once_and_refetches_once() {
    let backend = Backend::seeded();
    let (ws, mut rx) = editing_product_3(&backend).await;
    let product_fetches = Backend::count(&backend.counters.branch_products);

    ws.set_price(1, "10").await.unwrap();
    ws.set_price(2, "20").await.unwrap();
    ws.request_save().await.unwrap();
    assert_eq!(Backend::count(&backend.counters.price_commits), 0);

    assert_eq!(ws.confirm_save().await.unwrap(), SaveStatus::Committed);

    assert_eq!(Backend::count(&backend.counters.price_commits), 1);
    let body = backend.last_commit.lock().unwrap().clone().unwrap();
    assert_eq!(
        body,
        json!({ "prices": [
            { "product_id": 3, "branch_id": 1, "price_type_id": 1, "price": 10.0 },
            { "product_id": 3, "branch_id": 1, "price_type_id": 2, "price": 20.0 },
        ]})
    );
    assert_eq!(
        Backend::count(&backend.counters.branch_products),
        product_fetches + 1
    );
    assert_eq!(ws.dialog_state().await, DialogState::Closed);
    assert!(ws.buffer().await.is_empty());

    let n = last_notification(&mut rx).unwrap();
    assert!(!n.is_error());
    assert_eq!(n.message, "Prices updated");

    let stored = backend.prices.lock().unwrap().clone();
    assert!(stored.iter().any(|p| p.product_id == 3 && p.price == Decimal::from(20)));
}

#[tokio::test]
async fn test_commit_answered_with_no_content_is_a_success() {
    let backend = Backend::seeded();
    backend.commit_no_content.store(true, Ordering::SeqCst);
    let (ws, mut rx) = editing_product_3(&backend).await;
    let product_fetches = Backend::count(&backend.counters.branch_products);

    ws.set_price(1, "10").await.unwrap();
    ws.request_save().await.unwrap();
    assert_eq!(ws.confirm_save().await.unwrap(), SaveStatus::Committed);

    assert_eq!(Backend::count(&backend.counters.price_commits), 1);
    assert_eq!(
        Backend::count(&backend.counters.branch_products),
        product_fetches + 1
    );
    assert_eq!(ws.dialog_state().await, DialogState::Closed);
    assert!(ws.buffer().await.is_empty());
    let n = last_notification(&mut rx).unwrap();
    assert!(!n.is_error());
    assert_eq!(n.message, COMMIT_SUCCESS_MESSAGE);
}

#[tokio::test]
async fn test_failed_commit_keeps_buffer_and_shows_server_message() {
    let backend = Backend::seeded();
    *backend.commit_failure.lock().unwrap() = Some((
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "code": 5004, "message": "Price below cost" }),
    ));
    let (ws, mut rx) = editing_product_3(&backend).await;
    let product_fetches = Backend::count(&backend.counters.branch_products);

    ws.set_price(1, "0.10").await.unwrap();
    let before = ws.buffer().await;
    ws.request_save().await.unwrap();

    assert!(ws.confirm_save().await.is_err());

    assert_eq!(ws.dialog_state().await, DialogState::Editing);
    assert_eq!(ws.buffer().await, before);
    assert_eq!(
        Backend::count(&backend.counters.branch_products),
        product_fetches
    );
    let n = last_notification(&mut rx).unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, "Price below cost");
}

#[tokio::test]
async fn test_failed_commit_without_message_uses_fallback() {
    let backend = Backend::seeded();
    *backend.commit_failure.lock().unwrap() =
        Some((StatusCode::BAD_GATEWAY, json!("upstream unavailable")));
    let (ws, mut rx) = editing_product_3(&backend).await;

    ws.request_save().await.unwrap();
    assert!(ws.confirm_save().await.is_err());

    let n = last_notification(&mut rx).unwrap();
    assert_eq!(n.message, COMMIT_FALLBACK_MESSAGE);
    assert_eq!(ws.dialog_state().await, DialogState::Editing);
}

#[tokio::test]
async fn test_invalid_price_is_not_sent() {
    let backend = Backend::seeded();
    let (ws, mut rx) = editing_product_3(&backend).await;

    ws.set_price(2, "12,5").await.unwrap();
    ws.request_save().await.unwrap();
    let err = ws.confirm_save().await.unwrap_err();

    assert!(matches!(err, AdminError::InvalidPrice { .. }));
    assert_eq!(Backend::count(&backend.counters.price_commits), 0);
    assert_eq!(ws.dialog_state().await, DialogState::Editing);
    assert_eq!(
        last_notification(&mut rx).unwrap().message,
        "Invalid price '12,5' for 3-1-2"
    );
}

#[tokio::test]
async fn test_stale_load_does_not_reach_new_product() {
    let backend = Backend::seeded();
    backend.load_delay_ms.lock().unwrap().insert(4, 150);
    let (ws, _rx) = workspace(&backend);
    ws.load(BranchFilter::ById(1)).await.unwrap();

    let (first, second) = tokio::join!(ws.open_product(4), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        ws.open_product(7).await
    });
    first.unwrap();
    second.unwrap();

    assert_eq!(ws.dialog_target().await.unwrap().product_id, 7);
    let buffer = ws.buffer().await;
    assert!(buffer.iter().all(|(key, _)| key.product_id == 7));
    assert_eq!(buffer.get(&PriceKey::new(7, 1, 2)), Some("3.50"));
    assert_eq!(buffer.get(&PriceKey::new(4, 1, 1)), None);
    assert_eq!(Backend::count(&backend.counters.price_loads), 2);
}

#[tokio::test]
async fn test_load_finishing_after_close_is_ignored() {
    let backend = Backend::seeded();
    backend.load_delay_ms.lock().unwrap().insert(4, 100);
    let (ws, _rx) = workspace(&backend);
    ws.load(BranchFilter::ById(1)).await.unwrap();

    let (opened, ()) = tokio::join!(ws.open_product(4), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        ws.close_dialog().await;
    });
    opened.unwrap();

    assert_eq!(ws.dialog_state().await, DialogState::Closed);
    assert!(ws.buffer().await.is_empty());
}

#[tokio::test]
async fn test_reentrant_save_is_noop() {
    let backend = Backend::seeded();
    backend.commit_delay_ms.store(100, Ordering::SeqCst);
    let (ws, _rx) = editing_product_3(&backend).await;
    ws.request_save().await.unwrap();

    let (first, second) = tokio::join!(ws.confirm_save(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        ws.request_save().await.unwrap();
        ws.confirm_save().await
    });

    assert_eq!(first.unwrap(), SaveStatus::Committed);
    assert_eq!(second.unwrap(), SaveStatus::AlreadySaving);
    assert_eq!(Backend::count(&backend.counters.price_commits), 1);
}

#[tokio::test]
async fn test_dialog_errors_are_notified() {
    let backend = Backend::seeded();
    let (ws, mut rx) = editing_product_3(&backend).await;

    let err = ws.set_price(99, "1").await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound(_)));
    let n = last_notification(&mut rx).unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, "Price type 99 not found");

    ws.cancel_edit().await.unwrap();
    assert!(ws.request_save().await.is_err());
    assert!(last_notification(&mut rx).unwrap().is_error());
}

#[tokio::test]
async fn test_open_during_save_is_refused_and_notified() {
    let backend = Backend::seeded();
    backend.commit_delay_ms.store(100, Ordering::SeqCst);
    let (ws, mut rx) = editing_product_3(&backend).await;
    ws.request_save().await.unwrap();

    let (saved, opened) = tokio::join!(ws.confirm_save(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let opened = ws.open_product(4).await;
        (opened, last_notification(&mut rx))
    });

    assert_eq!(saved.unwrap(), SaveStatus::Committed);
    let (opened, notification) = opened;
    assert!(matches!(opened, Err(AdminError::InvalidState(_))));
    let n = notification.unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, "Invalid state: a save is in progress");
    assert_eq!(Backend::count(&backend.counters.price_loads), 1);
}

#[tokio::test]
async fn test_close_during_save_discards_result() {
    let backend = Backend::seeded();
    backend.commit_delay_ms.store(100, Ordering::SeqCst);
    let (ws, _rx) = editing_product_3(&backend).await;
    ws.request_save().await.unwrap();
    let product_fetches = Backend::count(&backend.counters.branch_products);

    let (saved, ()) = tokio::join!(ws.confirm_save(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        ws.close_dialog().await;
    });

    assert_eq!(saved.unwrap(), SaveStatus::Discarded);
    assert_eq!(ws.dialog_state().await, DialogState::Closed);
    assert_eq!(
        Backend::count(&backend.counters.branch_products),
        product_fetches
    );
}

#[tokio::test]
async fn test_cancel_edit_restores_loaded_prices() {
    let backend = Backend::seeded();
    let (ws, _rx) = workspace(&backend);
    ws.load(BranchFilter::ById(1)).await.unwrap();
    ws.open_product(4).await.unwrap();
    ws.begin_edit().await.unwrap();

    ws.set_price(1, "1").await.unwrap();
    ws.cancel_edit().await.unwrap();

    assert_eq!(ws.dialog_state().await, DialogState::View);
    assert_eq!(ws.buffer().await.get(&PriceKey::new(4, 1, 1)), Some("9.99"));
}

#[tokio::test]
async fn test_alert_quantity_update_refetches_products() {
    let backend = Backend::seeded();
    let (ws, _rx) = workspace(&backend);
    ws.load(BranchFilter::ById(2)).await.unwrap();
    let product_fetches = Backend::count(&backend.counters.branch_products);

    ws.update_alert_quantity(3, 25).await.unwrap();

    assert_eq!(Backend::count(&backend.counters.alert_updates), 1);
    assert_eq!(
        Backend::count(&backend.counters.branch_products),
        product_fetches + 1
    );
    let coffee = ws.products().await.into_iter().find(|p| p.id == 3).unwrap();
    assert_eq!(coffee.alert_quantity, 25);

    assert!(ws.update_alert_quantity(3, -1).await.is_err());
    assert_eq!(Backend::count(&backend.counters.alert_updates), 1);
}
