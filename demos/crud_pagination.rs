//! CRUD Pagination
//!
//! This example paginates a list kept in sync with a (simulated) web API.
//!
//! Key concepts:
//! - `CrudActionCreators` describe calls; a transport turns them into responses
//! - `CrudReducer` applies responses immutably
//! - `Paginated` re-derives its view after every forwarded response
//! - Services are looked up through a `ServiceRegistry`
//! - Async responses are awaited with `wait_for_it`
//!
//! Run with: RUST_LOG=debug cargo run --example crud_pagination

use cerebellum::core::{merge, Reducer};
use cerebellum::effects::{sync_all, wait_for_it, PromiseError};
use cerebellum::paginate::PaginationState;
use cerebellum::reducers::{
    ApiMethod, CrudAction, CrudActionCreators, CrudApiAction, CrudPayload, CrudReducer, CrudState,
};
use cerebellum::registry::ServiceRegistry;
use cerebellum::{PageActions, Paginated, PaginationOptions};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

type Contacts = PaginationState<CrudState<Value>, Value>;

/// In-memory stand-in for a REST backend.
struct FakeServer {
    rows: Mutex<Vec<Value>>,
}

impl FakeServer {
    fn seeded() -> Self {
        let rows = ["Zoe", "Adam", "Maya", "Liam", "Nora", "Omar"]
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "Id": i + 1, "name": name, "city": "Lisbon" }))
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn handle(&self, call: &CrudApiAction<Value>) -> Result<CrudAction<Value>, String> {
        let mut rows = self.rows.lock().map_err(|e| e.to_string())?;
        println!("  -> {} {}", call.api.method, call.api.endpoint);

        match (call.api.method, &call.payload, &call.meta) {
            (ApiMethod::Read, _, _) => Ok(CrudAction::ReadResponse(rows.clone())),
            (ApiMethod::Create, Some(CrudPayload::Element(element)), _) => {
                let mut created = element.clone();
                created["Id"] = json!(rows.len() + 1);
                rows.push(created.clone());
                Ok(CrudAction::CreateResponse(created))
            }
            (ApiMethod::Patch, Some(CrudPayload::Mutations(patch)), Some(meta)) => {
                if let Some(row) = rows.iter_mut().find(|row| row["Id"] == meta.genuine["Id"]) {
                    *row = merge(&*row, patch);
                }
                Ok(CrudAction::PatchResponse {
                    genuine: meta.genuine.clone(),
                    patch: patch.clone(),
                })
            }
            (ApiMethod::Delete, _, Some(meta)) => {
                rows.retain(|row| row["Id"] != meta.genuine["Id"]);
                Ok(CrudAction::DeleteResponse {
                    genuine: meta.genuine.clone(),
                })
            }
            (method, _, _) => Err(format!("{method} not supported")),
        }
    }
}

fn show(label: &str, state: &Contacts) {
    let names: Vec<&str> = state
        .page_list
        .iter()
        .filter_map(|row| row["name"].as_str())
        .collect();
    println!(
        "{:<22} page {}/{} of {} contacts: {:?}",
        label,
        state.page,
        state.total,
        state.base.items.len(),
        names
    );
}

/// Send `call` to the server on a worker thread and wait for the response.
async fn dispatch(
    server: Arc<FakeServer>,
    call: CrudApiAction<Value>,
) -> Result<CrudAction<Value>, PromiseError<String>> {
    wait_for_it(move |deferred| {
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            match server.handle(&call) {
                Ok(response) => deferred.resolve(response),
                Err(e) => deferred.reject(e),
            }
        });
    })
    .await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== CRUD Pagination Example ===\n");

    let mut registry = ServiceRegistry::new();
    registry
        .declare("api-root", String::from("/api/contacts"))
        .declare_shared("server", Arc::new(FakeServer::seeded()));

    let api_root = registry
        .require::<String>("api-root")
        .expect("api root declared");
    let server = registry
        .require::<FakeServer>("server")
        .expect("server declared");

    let paginated = Paginated::new("CONTACTS", CrudReducer::<Value>::new()).with_options(
        PaginationOptions::default()
            .with_per(2)
            .with_by("name"),
    );
    let actions = PageActions::new("CONTACTS");

    let root = Arc::clone(&api_root);
    let creators = CrudActionCreators::<Contacts, Value>::new("CONTACTS", move |_, _, _| {
        root.to_string()
    })
    .when(|state, request| request.method != ApiMethod::Read || !state.base.fetching);

    let mut state = paginated.init();
    show("init", &state);

    // Load
    state = paginated.reduce(&state, &actions.forward(CrudAction::ReadRequest));
    if let Some(call) = creators.read(&state, Map::new()) {
        match dispatch(Arc::clone(&server), call).await {
            Ok(response) => state = paginated.reduce(&state, &actions.forward(response)),
            Err(e) => println!("read failed: {e}"),
        }
    }
    show("loaded", &state);

    let refresh = creators.read(&state, Map::new());
    println!("Refresh allowed once idle: {}", refresh.is_some());

    state = paginated.reduce(&state, &actions.next_page());
    show("next page", &state);

    // Create two contacts, awaiting both responses
    let calls: Vec<_> = [json!({ "name": "Bea" }), json!({ "name": "Ivan" })]
        .into_iter()
        .filter_map(|contact| creators.create(&state, contact))
        .collect();
    for call in calls {
        match dispatch(Arc::clone(&server), call).await {
            Ok(response) => state = paginated.reduce(&state, &actions.forward(response)),
            Err(e) => println!("create failed: {e}"),
        }
    }
    show("after create", &state);

    // Rename one contact
    if let Some(maya) = state.cache_list.iter().find(|row| row["name"] == "Maya").cloned() {
        if let Some(call) = creators.update(&state, maya, json!({ "name": "Mayara" })) {
            if let Ok(response) = dispatch(Arc::clone(&server), call).await {
                state = paginated.reduce(&state, &actions.forward(response));
            }
        }
    }

    // Filter and delete
    state = paginated.reduce(&state, &actions.filter_with("am"));
    show("filter \"am\"", &state);

    if let Some(first) = state.page_list.first().cloned() {
        if let Some(call) = creators.delete(&state, first) {
            if let Ok(response) = dispatch(Arc::clone(&server), call).await {
                state = paginated.reduce(&state, &actions.forward(response));
            }
        }
    }
    show("after delete", &state);

    state = paginated.reduce(&state, &actions.reset());
    show("reset", &state);

    let outcomes = sync_all(
        vec![
            cerebellum::effects::noop::<String, ()>(),
            cerebellum::effects::settled(Ok(())),
        ],
        &(),
    )
    .await;
    println!("\nBatched no-op effects settled: {}", outcomes.is_ok());

    println!("\n=== Example Complete ===");
}
