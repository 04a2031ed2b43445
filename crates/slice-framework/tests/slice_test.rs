mod common;

use common::{brand, input, spawn_slice, Brand};
use pretty_assertions::assert_eq;
use slice_framework::mock::{create_mock_api, expect_create, expect_list_all, ApiCall, MockApi};
use slice_framework::{ApiError, Level, LoadStatus, SliceError};
use reqwest::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn fetch_all_replaces_items_in_server_order() {
    let api = MockApi::<Brand>::new();
    api.expect_list_all()
        .return_ok(vec![brand(1, "Lácteos")]);
    let h = spawn_slice(Arc::new(api.clone()));

    // Initial slice state
    let state = h.slice.state();
    assert!(state.items.is_empty());
    assert!(state.selected.is_none());
    assert_eq!(state.status, LoadStatus::Idle);

    let mut updates = h.slice.subscribe();
    let items = h.slice.fetch_all().await.unwrap();

    assert_eq!(items, vec![brand(1, "Lácteos")]);
    assert_eq!(h.slice.state().items, vec![brand(1, "Lácteos")]);
    assert_eq!(h.slice.state().status, LoadStatus::Loaded);
    assert!(updates.has_changed().unwrap());
    api.verify();
}

#[tokio::test]
async fn select_resolves_against_current_items() {
    let api = MockApi::<Brand>::new();
    api.expect_list_all()
        .return_ok(vec![brand(1, "Lácteos"), brand(2, "Bebidas")]);
    let h = spawn_slice(Arc::new(api.clone()));
    h.slice.fetch_all().await.unwrap();

    let selected = h.slice.select(Some(1)).await.unwrap();
    assert_eq!(selected, Some(brand(1, "Lácteos")));
    assert_eq!(h.slice.state().selected, Some(brand(1, "Lácteos")));

    // Unknown id clears the selection
    assert_eq!(h.slice.select(Some(99)).await.unwrap(), None);
    assert_eq!(h.slice.state().selected, None);

    h.slice.select(Some(2)).await.unwrap();
    assert_eq!(h.slice.select(None).await.unwrap(), None);
}

#[tokio::test]
async fn fetch_one_selects_record_outside_items() {
    let api = MockApi::<Brand>::new();
    api.expect_get(42).return_ok(brand(42, "Remoto"));
    let h = spawn_slice(Arc::new(api.clone()));

    let fetched = h.slice.fetch_one(42).await.unwrap();

    assert_eq!(fetched, brand(42, "Remoto"));
    assert_eq!(h.slice.state().selected, Some(brand(42, "Remoto")));
    assert!(h.slice.state().items.is_empty());
}

#[tokio::test]
async fn fetch_one_not_found_leaves_selection() {
    let api = MockApi::<Brand>::new();
    api.expect_get(9)
        .return_err(ApiError::NotFound { id: "9".into() });
    let h = spawn_slice(Arc::new(api.clone()));

    let result = h.slice.fetch_one(9).await;

    assert_eq!(
        result,
        Err(SliceError::Api(ApiError::NotFound { id: "9".into() }))
    );
    assert_eq!(h.slice.state().selected, None);
}

#[tokio::test]
async fn create_refreshes_before_answering() {
    let api = MockApi::<Brand>::new();
    api.expect_create().return_ok(brand(2, "Bebidas"));
    api.expect_list_all()
        .return_ok(vec![brand(1, "Lácteos"), brand(2, "Bebidas")]);
    let mut h = spawn_slice(Arc::new(api.clone()));

    let created = h.slice.create(input("Bebidas")).await.unwrap();

    assert_eq!(created, brand(2, "Bebidas"));
    // The refresh already landed when create returned
    assert_eq!(h.slice.state().items.len(), 2);
    assert_eq!(
        api.calls(),
        vec![
            ApiCall::Create(serde_json::json!({"nombre": "Bebidas", "precio": 1.5})),
            ApiCall::ListAll,
        ]
    );

    let note = h.notifications.recv().await.unwrap();
    assert_eq!(note.level, Level::Success);
    assert_eq!(note.message, "Marca: registro creado correctamente");
    assert_eq!(note.duration.as_millis(), 4000);
    api.verify();
}

#[tokio::test]
async fn update_payload_never_carries_identifier() {
    let api = MockApi::<Brand>::new();
    api.expect_update(5).return_ok(brand(5, "Aguas"));
    api.expect_list_all().return_ok(vec![brand(5, "Aguas")]);
    let h = spawn_slice(Arc::new(api.clone()));

    h.slice.update(5, input("Aguas")).await.unwrap();

    match &api.calls()[0] {
        ApiCall::Update(id, body) => {
            assert_eq!(*id, 5);
            assert!(body.get("idMarca").is_none());
            assert_eq!(body["nombre"], "Aguas");
        }
        other => panic!("Expected update, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_write_notifies_and_skips_refresh() {
    let api = MockApi::<Brand>::new();
    api.expect_list_all().return_ok(vec![brand(1, "Lácteos")]);
    api.expect_create().return_err(ApiError::Validation {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        body: "nombre duplicado".into(),
    });
    let mut h = spawn_slice(Arc::new(api.clone()));
    h.slice.fetch_all().await.unwrap();

    let result = h.slice.create(input("Lácteos")).await;

    assert!(matches!(
        result,
        Err(SliceError::Api(ApiError::Validation { .. }))
    ));
    assert_eq!(h.slice.state().items, vec![brand(1, "Lácteos")]);
    let note = h.notifications.recv().await.unwrap();
    assert_eq!(note.level, Level::Error);
    assert!(note.message.starts_with("Error al crear Marca"));
    assert_eq!(api.calls().len(), 2);
    api.verify();
}

#[tokio::test]
async fn unauthenticated_delete_leaves_state_and_shows_no_success() {
    let api = MockApi::<Brand>::new();
    api.expect_list_all().return_ok(vec![brand(5, "Bebidas")]);
    api.expect_remove(5).return_err(ApiError::Unauthenticated);
    let mut h = spawn_slice(Arc::new(api.clone()));
    h.slice.fetch_all().await.unwrap();
    let before = h.slice.state();

    let result = h.slice.delete(5).await;

    assert!(result.unwrap_err().is_unauthenticated());
    let after = h.slice.state();
    assert_eq!(after.items, before.items);
    assert_eq!(after.status, before.status);

    let note = h.notifications.recv().await.unwrap();
    assert_eq!(note.level, Level::Error);
    assert!(h.notifications.try_recv().is_err());
    // No refresh after the refused write
    assert_eq!(api.calls(), vec![ApiCall::ListAll, ApiCall::Remove(5)]);
}

#[tokio::test]
async fn read_failure_keeps_previous_items() {
    let api = MockApi::<Brand>::new();
    api.expect_list_all().return_ok(vec![brand(1, "Lácteos")]);
    api.expect_list_all()
        .return_err(ApiError::Network("connection refused".into()));
    let h = spawn_slice(Arc::new(api.clone()));
    h.slice.fetch_all().await.unwrap();

    let result = h.slice.fetch_all().await;

    assert!(matches!(result, Err(SliceError::Api(ApiError::Network(_)))));
    let state = h.slice.state();
    assert_eq!(state.status, LoadStatus::Failed);
    assert_eq!(state.items, vec![brand(1, "Lácteos")]);
}

/// Two overlapping fetches where the older one resolves last: the newer snapshot is kept
/// and the late response is discarded.
#[tokio::test]
async fn stale_fetch_response_is_discarded() {
    let (api, mut calls) = create_mock_api::<Brand>(8);
    let h = spawn_slice(Arc::new(api));

    let slice = h.slice.clone();
    let first = tokio::spawn(async move { slice.fetch_all().await });
    let first_reply = expect_list_all(&mut calls).await.expect("first fetch");

    let slice = h.slice.clone();
    let second = tokio::spawn(async move { slice.fetch_all().await });
    let second_reply = expect_list_all(&mut calls).await.expect("second fetch");

    second_reply.send(Ok(vec![brand(2, "Nuevo")])).unwrap();
    assert_eq!(second.await.unwrap().unwrap(), vec![brand(2, "Nuevo")]);

    first_reply.send(Ok(vec![brand(1, "Viejo")])).unwrap();
    assert_eq!(first.await.unwrap(), Err(SliceError::Superseded));

    let state = h.slice.state();
    assert_eq!(state.items, vec![brand(2, "Nuevo")]);
    assert_eq!(state.status, LoadStatus::Loaded);
}

#[tokio::test]
async fn in_order_fetches_both_apply() {
    let (api, mut calls) = create_mock_api::<Brand>(8);
    let h = spawn_slice(Arc::new(api));

    let slice = h.slice.clone();
    let first = tokio::spawn(async move { slice.fetch_all().await });
    let first_reply = expect_list_all(&mut calls).await.unwrap();
    let slice = h.slice.clone();
    let second = tokio::spawn(async move { slice.fetch_all().await });
    let second_reply = expect_list_all(&mut calls).await.unwrap();

    first_reply.send(Ok(vec![brand(1, "Viejo")])).unwrap();
    assert!(first.await.unwrap().is_ok());
    // Older snapshot applied, newer still pending
    assert_eq!(h.slice.state().status, LoadStatus::Loading);

    second_reply.send(Ok(vec![brand(2, "Nuevo")])).unwrap();
    assert!(second.await.unwrap().is_ok());
    assert_eq!(h.slice.state().items, vec![brand(2, "Nuevo")]);
    assert_eq!(h.slice.state().status, LoadStatus::Loaded);
}

#[tokio::test]
async fn older_snapshot_after_newest_failure_settles_loaded() {
    let (api, mut calls) = create_mock_api::<Brand>(8);
    let h = spawn_slice(Arc::new(api));

    let slice = h.slice.clone();
    let first = tokio::spawn(async move { slice.fetch_all().await });
    let first_reply = expect_list_all(&mut calls).await.unwrap();
    let slice = h.slice.clone();
    let second = tokio::spawn(async move { slice.fetch_all().await });
    let second_reply = expect_list_all(&mut calls).await.unwrap();

    second_reply
        .send(Err(ApiError::Network("connection reset".into())))
        .unwrap();
    assert!(second.await.unwrap().is_err());
    assert_eq!(h.slice.state().status, LoadStatus::Failed);

    first_reply.send(Ok(vec![brand(1, "Viejo")])).unwrap();
    assert_eq!(first.await.unwrap().unwrap(), vec![brand(1, "Viejo")]);

    let state = h.slice.state();
    assert_eq!(state.items, vec![brand(1, "Viejo")]);
    assert_eq!(state.status, LoadStatus::Loaded);
}

#[tokio::test]
async fn select_is_served_while_fetch_in_flight() {
    let (api, mut calls) = create_mock_api::<Brand>(8);
    let h = spawn_slice(Arc::new(api));

    let slice = h.slice.clone();
    let pending = tokio::spawn(async move { slice.fetch_all().await });
    let reply = expect_list_all(&mut calls).await.unwrap();

    assert!(h.slice.state().is_loading());
    assert_eq!(h.slice.select(None).await.unwrap(), None);

    reply.send(Ok(vec![])).unwrap();
    pending.await.unwrap().unwrap();
}

#[tokio::test]
async fn create_waits_for_write_then_refresh() {
    let (api, mut calls) = create_mock_api::<Brand>(8);
    let h = spawn_slice(Arc::new(api));

    let slice = h.slice.clone();
    let create = tokio::spawn(async move { slice.create(input("Bebidas")).await });

    let (payload, reply) = expect_create(&mut calls).await.expect("create call");
    assert_eq!(payload, input("Bebidas"));
    reply.send(Ok(brand(3, "Bebidas"))).unwrap();

    let refresh = expect_list_all(&mut calls).await.expect("refresh after create");
    assert!(!create.is_finished());
    refresh.send(Ok(vec![brand(3, "Bebidas")])).unwrap();

    assert_eq!(create.await.unwrap().unwrap(), brand(3, "Bebidas"));
    assert_eq!(h.slice.state().items, vec![brand(3, "Bebidas")]);
}

#[tokio::test]
async fn slice_shuts_down_when_clients_dropped() {
    let (api, mut calls) = create_mock_api::<Brand>(8);
    let h = spawn_slice(Arc::new(api));

    let slice = h.slice.clone();
    let pending = tokio::spawn(async move { slice.fetch_all().await });
    let reply = expect_list_all(&mut calls).await.unwrap();

    drop(h.slice);
    // The spawned caller still holds a clone until its request resolves
    reply.send(Ok(vec![brand(1, "Tarde")])).unwrap();
    assert!(pending.await.unwrap().is_ok());

    h.handle.await.expect("slice task panicked");
}
