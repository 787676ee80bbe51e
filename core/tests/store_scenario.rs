use taskpad_core::task::{
    CreateTaskRequest, InMemoryTaskStore, TaskEvent, TaskPatch, TaskPriority, TaskRepository,
};
use taskpad_core::Error;

#[tokio::test]
async fn test_milk_and_release_walkthrough() {
    let store = InMemoryTaskStore::new();
    let mut events = store.subscribe();

    let milk = store
        .create(CreateTaskRequest::new("Buy milk"))
        .await
        .unwrap();
    assert_eq!(milk.id, "1");
    assert!(!milk.completed);
    assert_eq!(milk.priority, TaskPriority::Medium);

    let release = store
        .create(CreateTaskRequest::new("Ship release").with_priority(TaskPriority::High))
        .await
        .unwrap();
    assert_eq!(release.id, "2");

    let toggled = store.toggle_completion("1").await.unwrap();
    assert!(toggled.completed);

    let renamed = store
        .update("2", TaskPatch::new().title("Ship release v2"))
        .await
        .unwrap();
    assert_eq!(renamed.title, "Ship release v2");
    assert_eq!(renamed.priority, TaskPriority::High);

    assert!(store.delete("1").await.unwrap());
    let remaining = store.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "2");

    let missing = store.update("1", TaskPatch::new().completed(false)).await;
    assert_eq!(missing.unwrap_err(), Error::TaskNotFound("1".to_string()));

    let kinds: Vec<&'static str> = std::iter::from_fn(|| events.try_recv().ok())
        .map(|e: TaskEvent| e.kind())
        .collect();
    assert_eq!(
        kinds,
        vec!["created", "created", "updated", "updated", "deleted"]
    );
}

#[tokio::test]
async fn test_subscriber_sees_post_mutation_state() {
    let store = InMemoryTaskStore::new();
    let mut events = store.subscribe();

    let observer = {
        let store = store.clone();
        tokio::spawn(async move {
            let event = events.recv().await.unwrap();
            let id = event.task_id().unwrap().to_string();
            store.get(&id).await.unwrap()
        })
    };

    store.create(CreateTaskRequest::new("Observe me")).await.unwrap();

    let seen = observer.await.unwrap().unwrap();
    assert_eq!(seen.title, "Observe me");
}
