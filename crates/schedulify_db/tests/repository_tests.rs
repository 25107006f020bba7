use schedulify_db::{
    init_schema, Availability, AvailabilityCode, AvailabilityRepository, CandidateRepository,
    DbClient, DbError, NewSchedule, Repositories, ScheduleAggregateRepository,
    ScheduleRepository, User, UserRepository,
};

async fn setup() -> Repositories {
    setup_with_client().await.1
}

async fn setup_with_client() -> (DbClient, Repositories) {
    let db_client = DbClient::from_url("sqlite::memory:").await.unwrap();
    init_schema(&db_client).await.unwrap();
    let repos = Repositories::new(db_client.clone());
    (db_client, repos)
}

fn new_schedule(name: &str, created_by: i64) -> NewSchedule {
    NewSchedule {
        schedule_name: name.to_string(),
        memo: "memo".to_string(),
        created_by,
    }
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn init_schema_is_idempotent() {
    let db_client = DbClient::from_url("sqlite::memory:").await.unwrap();
    init_schema(&db_client).await.unwrap();
    init_schema(&db_client).await.unwrap();
}

#[tokio::test]
async fn user_upsert_is_idempotent() {
    let repos = setup().await;

    repos.users.upsert(User::new(0, "testuser")).await.unwrap();
    repos.users.upsert(User::new(0, "testuser")).await.unwrap();
    repos.users.upsert(User::new(0, "renamed")).await.unwrap();

    let user = repos.users.find_by_id(0).await.unwrap().unwrap();
    assert_eq!(user, User::new(0, "renamed"));
    assert!(repos.users.find_by_id(42).await.unwrap().is_none());
}

#[tokio::test]
async fn creates_schedule_with_candidates() {
    let repos = setup().await;
    repos.users.upsert(User::new(1, "alice")).await.unwrap();

    let created = repos
        .aggregates
        .create_schedule_aggregate(
            new_schedule("テスト予定1", 1),
            names(&["テスト候補1", "テスト候補2", "テスト候補3"]),
        )
        .await
        .unwrap();

    let schedule_id = &created.schedule.schedule_id;
    let stored = repos.schedules.find_by_id(schedule_id).await.unwrap().unwrap();
    assert_eq!(stored, created.schedule);

    let candidates = repos.candidates.find_by_schedule(schedule_id).await.unwrap();
    assert_eq!(candidates, created.candidates);
    let candidate_names: Vec<_> = candidates.iter().map(|c| c.candidate_name.as_str()).collect();
    assert_eq!(candidate_names, ["テスト候補1", "テスト候補2", "テスト候補3"]);
    assert!(candidates.windows(2).all(|w| w[0].candidate_id < w[1].candidate_id));

    let first = repos
        .candidates
        .find_by_id(candidates[0].candidate_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, candidates[0]);
}

#[tokio::test]
async fn lists_schedules_newest_first() {
    let repos = setup().await;
    repos.users.upsert(User::new(1, "alice")).await.unwrap();
    repos.users.upsert(User::new(2, "bob")).await.unwrap();

    let older = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("older", 1), vec![])
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("newer", 1), vec![])
        .await
        .unwrap();
    repos
        .aggregates
        .create_schedule_aggregate(new_schedule("someone else's", 2), vec![])
        .await
        .unwrap();

    let owned = repos.schedules.find_by_owner(1).await.unwrap();
    let ids: Vec<_> = owned.iter().map(|s| s.schedule_id.as_str()).collect();
    assert_eq!(
        ids,
        [
            newer.schedule.schedule_id.as_str(),
            older.schedule.schedule_id.as_str()
        ]
    );
}

#[tokio::test]
async fn availability_upsert_keeps_one_row_per_user_and_candidate() {
    let repos = setup().await;
    repos.users.upsert(User::new(1, "alice")).await.unwrap();
    let created = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("plan", 1), names(&["a", "b"]))
        .await
        .unwrap();
    let schedule_id = created.schedule.schedule_id.clone();
    let candidate_id = created.candidates[0].candidate_id;

    for code in [AvailabilityCode::Unknown, AvailabilityCode::Present] {
        repos
            .availabilities
            .upsert(Availability {
                candidate_id,
                user_id: 1,
                availability: code,
                schedule_id: schedule_id.clone(),
            })
            .await
            .unwrap();
    }

    let rows = repos
        .availabilities
        .find_by_schedule(&schedule_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].availability, AvailabilityCode::Present);

    let answerers = repos.users.find_by_schedule(&schedule_id).await.unwrap();
    assert_eq!(answerers, vec![User::new(1, "alice")]);
}

#[tokio::test]
async fn availability_for_unknown_schedule_violates_foreign_key() {
    let repos = setup().await;
    repos.users.upsert(User::new(1, "alice")).await.unwrap();

    let err = repos
        .availabilities
        .upsert(Availability {
            candidate_id: 999,
            user_id: 1,
            availability: AvailabilityCode::Present,
            schedule_id: "missing".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::QueryError(_)));
}

#[tokio::test]
async fn delete_removes_the_whole_aggregate() {
    let repos = setup().await;
    repos.users.upsert(User::new(1, "alice")).await.unwrap();
    let created = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("plan", 1), names(&["a", "b", "c"]))
        .await
        .unwrap();
    let kept = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("kept", 1), names(&["x"]))
        .await
        .unwrap();
    let schedule_id = created.schedule.schedule_id.clone();

    for candidate in created.candidates.iter().chain(kept.candidates.iter()) {
        repos
            .availabilities
            .upsert(Availability {
                candidate_id: candidate.candidate_id,
                user_id: 1,
                availability: AvailabilityCode::Present,
                schedule_id: candidate.schedule_id.clone(),
            })
            .await
            .unwrap();
    }

    let removed = repos
        .aggregates
        .delete_schedule_aggregate(&schedule_id)
        .await
        .unwrap();
    assert!(removed);

    assert!(repos
        .availabilities
        .find_by_schedule(&schedule_id)
        .await
        .unwrap()
        .is_empty());
    assert!(repos
        .candidates
        .find_by_schedule(&schedule_id)
        .await
        .unwrap()
        .is_empty());
    assert!(repos.schedules.find_by_id(&schedule_id).await.unwrap().is_none());

    let kept_id = &kept.schedule.schedule_id;
    assert!(repos.schedules.find_by_id(kept_id).await.unwrap().is_some());
    assert_eq!(
        repos.availabilities.find_by_schedule(kept_id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn deleting_unknown_schedule_is_not_an_error() {
    let repos = setup().await;
    let removed = repos
        .aggregates
        .delete_schedule_aggregate("00000000-0000-0000-0000-000000000000")
        .await
        .unwrap();
    assert!(!removed);
}

#[tokio::test]
async fn failed_aggregate_creation_leaves_nothing_behind() {
    let repos = setup().await;

    // created_by references a user that doesn't exist
    let err = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("orphan", 77), names(&["a"]))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::QueryError(_)));
    assert!(repos.schedules.find_by_owner(77).await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_delete_rolls_back_earlier_steps() {
    let (db_client, repos) = setup_with_client().await;
    repos.users.upsert(User::new(1, "alice")).await.unwrap();
    let created = repos
        .aggregates
        .create_schedule_aggregate(new_schedule("kept", 1), names(&["a", "b"]))
        .await
        .unwrap();
    let schedule_id = created.schedule.schedule_id.clone();
    repos
        .availabilities
        .upsert(Availability {
            candidate_id: created.candidates[0].candidate_id,
            user_id: 1,
            availability: AvailabilityCode::Unknown,
            schedule_id: schedule_id.clone(),
        })
        .await
        .unwrap();

    // The last step fails after availabilities and candidates are already gone.
    db_client
        .execute(
            "CREATE TRIGGER block_schedule_delete BEFORE DELETE ON schedules \
             BEGIN SELECT RAISE(ABORT, 'schedule deletion blocked'); END",
        )
        .await
        .unwrap();

    let err = repos
        .aggregates
        .delete_schedule_aggregate(&schedule_id)
        .await
        .unwrap_err();
    match err {
        DbError::QueryError(msg) => assert!(msg.contains("schedule deletion blocked"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }

    assert!(repos.schedules.find_by_id(&schedule_id).await.unwrap().is_some());
    assert_eq!(
        repos.candidates.find_by_schedule(&schedule_id).await.unwrap().len(),
        2
    );
    let availabilities = repos.availabilities.find_by_schedule(&schedule_id).await.unwrap();
    assert_eq!(availabilities.len(), 1);
    assert_eq!(availabilities[0].availability, AvailabilityCode::Unknown);
}
