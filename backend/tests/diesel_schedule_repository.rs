//! Integration tests for the Diesel adapters against a real PostgreSQL.
//!
//! Set `SCHEDULE_TEST_DATABASE_URL` to a disposable database to run them;
//! without it every test returns early. Migrations are applied on first use
//! and each test works on freshly generated user ids, so runs can share one
//! database.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use diesel::sql_types::BigInt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use rstest::rstest;
use schedule_backend::domain::ports::{
    AvailabilityRepository, CommentRepository, ScheduleRepository, ScheduleRepositoryError,
    UserRepository,
};
use schedule_backend::domain::{
    Availability, AvailabilityEntry, CandidateName, Comment, CommentText, ScheduleDraft,
    ScheduleId, ScheduleName, ScheduleRevision, User, UserId,
};
use schedule_backend::outbound::persistence::{
    DbPool, DieselAvailabilityRepository, DieselCommentRepository, DieselScheduleRepository,
    DieselUserRepository, PoolConfig, run_pending_migrations,
};
use tokio::sync::OnceCell;

const DATABASE_URL_ENV: &str = "SCHEDULE_TEST_DATABASE_URL";

static MIGRATED: OnceCell<()> = OnceCell::const_new();

struct Adapters {
    users: DieselUserRepository,
    schedules: DieselScheduleRepository,
    availabilities: DieselAvailabilityRepository,
    comments: DieselCommentRepository,
}

fn database_url() -> Option<String> {
    let url = std::env::var(DATABASE_URL_ENV).ok();
    if url.is_none() {
        eprintln!("SKIP-TEST-CLUSTER: {DATABASE_URL_ENV} not set");
    }
    url
}

async fn adapters() -> Option<Adapters> {
    let url = database_url()?;
    MIGRATED
        .get_or_init(|| async {
            run_pending_migrations(&url)
                .await
                .expect("migrations apply");
        })
        .await;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    Some(Adapters {
        users: DieselUserRepository::new(pool.clone()),
        schedules: DieselScheduleRepository::new(pool.clone()),
        availabilities: DieselAvailabilityRepository::new(pool.clone()),
        comments: DieselCommentRepository::new(pool),
    })
}

/// A user id unlikely to collide with other runs against the same database.
fn fresh_user_id() -> UserId {
    let (high, _) = uuid::Uuid::new_v4().as_u64_pair();
    let raw = i64::try_from(high >> 1).expect("shifted value fits i64");
    UserId::new(raw).expect("non-negative id")
}

async fn stored_user(adapters: &Adapters, name: &str) -> User {
    let user = User::try_from_parts(fresh_user_id().get(), name).expect("valid user");
    adapters.users.upsert(&user).await.expect("user upsert");
    user
}

fn draft(owner: UserId, candidates: &[&str]) -> ScheduleDraft {
    ScheduleDraft {
        owner,
        name: ScheduleName::new("テスト予定1").expect("valid name"),
        memo: "memo".to_owned(),
        candidates: candidates
            .iter()
            .map(|name| CandidateName::new(*name).expect("valid candidate"))
            .collect(),
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("timestamp"),
    }
}

#[rstest]
#[tokio::test]
async fn user_upsert_overwrites_username() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let user = stored_user(&adapters, "before").await;
    let renamed = User::try_from_parts(user.id().get(), "after").expect("valid user");

    adapters.users.upsert(&renamed).await.expect("second upsert");

    let found = adapters
        .users
        .find_by_id(&user.id())
        .await
        .expect("lookup")
        .expect("user present");
    assert_eq!(found.username().as_ref(), "after");
}

#[rstest]
#[tokio::test]
async fn create_keeps_candidate_order() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let owner = stored_user(&adapters, "owner").await;

    let schedule = adapters
        .schedules
        .create(&draft(owner.id(), &["テスト候補1", "テスト候補2", "テスト候補3"]))
        .await
        .expect("create");
    let candidates = adapters
        .schedules
        .list_candidates(schedule.id())
        .await
        .expect("candidates");

    let names: Vec<&str> = candidates.iter().map(|c| c.name().as_ref()).collect();
    assert_eq!(names, vec!["テスト候補1", "テスト候補2", "テスト候補3"]);
    assert_eq!(schedule.memo(), "memo");
}

#[rstest]
#[tokio::test]
async fn create_for_unknown_owner_is_a_missing_reference() {
    let Some(adapters) = adapters().await else {
        return;
    };

    let err = adapters
        .schedules
        .create(&draft(fresh_user_id(), &["c1"]))
        .await
        .expect_err("owner does not exist");

    assert!(matches!(err, ScheduleRepositoryError::MissingReference { .. }));
}

#[rstest]
#[tokio::test]
async fn update_appends_candidates_and_reports_missing_schedules() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let owner = stored_user(&adapters, "owner").await;
    let schedule = adapters
        .schedules
        .create(&draft(owner.id(), &["first"]))
        .await
        .expect("create");

    let revision = ScheduleRevision {
        schedule_id: schedule.id(),
        name: ScheduleName::new("renamed").expect("valid name"),
        memo: String::new(),
        appended_candidates: vec![CandidateName::new("second").expect("valid candidate")],
        updated_at: Utc::now(),
    };
    let updated = adapters
        .schedules
        .update(&revision)
        .await
        .expect("update")
        .expect("schedule exists");
    assert_eq!(updated.name().as_ref(), "renamed");

    let candidates = adapters
        .schedules
        .list_candidates(schedule.id())
        .await
        .expect("candidates");
    let names: Vec<&str> = candidates.iter().map(|c| c.name().as_ref()).collect();
    assert_eq!(names, vec!["first", "second"]);

    let missing = ScheduleRevision {
        schedule_id: ScheduleId::new(i64::MAX),
        ..revision
    };
    assert!(adapters.schedules.update(&missing).await.expect("update").is_none());
}

#[rstest]
#[tokio::test]
async fn composite_keys_keep_one_row_per_key() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let owner = stored_user(&adapters, "owner").await;
    let schedule = adapters
        .schedules
        .create(&draft(owner.id(), &["c1"]))
        .await
        .expect("create");
    let candidate = adapters
        .schedules
        .list_candidates(schedule.id())
        .await
        .expect("candidates")
        .remove(0);

    for value in [Availability::Absent, Availability::Present] {
        let entry = AvailabilityEntry {
            schedule_id: schedule.id(),
            user_id: owner.id(),
            candidate_id: candidate.id(),
            availability: value,
        };
        adapters
            .availabilities
            .upsert(&entry)
            .await
            .expect("availability upsert");
    }
    for text in ["first", "latest"] {
        let comment = Comment {
            schedule_id: schedule.id(),
            user_id: owner.id(),
            text: CommentText::new(text),
        };
        adapters.comments.upsert(&comment).await.expect("comment upsert");
    }

    let rows = adapters
        .availabilities
        .list_by_schedule(schedule.id())
        .await
        .expect("availability rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].availability, Availability::Present);

    let comments = adapters
        .comments
        .list_by_schedule(schedule.id())
        .await
        .expect("comment rows");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text.as_ref(), "latest");
}

#[rstest]
#[tokio::test]
async fn aggregate_delete_cascades_and_is_idempotent() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let owner = stored_user(&adapters, "owner").await;
    let schedule = adapters
        .schedules
        .create(&draft(owner.id(), &["c1", "c2"]))
        .await
        .expect("create");
    let candidate = adapters
        .schedules
        .list_candidates(schedule.id())
        .await
        .expect("candidates")
        .remove(0);
    adapters
        .availabilities
        .upsert(&AvailabilityEntry {
            schedule_id: schedule.id(),
            user_id: owner.id(),
            candidate_id: candidate.id(),
            availability: Availability::Present,
        })
        .await
        .expect("availability upsert");
    adapters
        .comments
        .upsert(&Comment {
            schedule_id: schedule.id(),
            user_id: owner.id(),
            text: CommentText::new("bye"),
        })
        .await
        .expect("comment upsert");

    assert!(adapters.schedules.delete_aggregate(schedule.id()).await.expect("delete"));
    assert!(!adapters.schedules.delete_aggregate(schedule.id()).await.expect("repeat"));

    assert!(adapters.schedules.find_by_id(schedule.id()).await.expect("lookup").is_none());
    assert!(adapters.schedules.list_candidates(schedule.id()).await.expect("candidates").is_empty());
    assert!(
        adapters
            .availabilities
            .list_by_schedule(schedule.id())
            .await
            .expect("availability rows")
            .is_empty()
    );
    assert!(
        adapters
            .comments
            .list_by_schedule(schedule.id())
            .await
            .expect("comment rows")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn owner_listing_is_newest_first() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let owner = stored_user(&adapters, "owner").await;
    let older = adapters
        .schedules
        .create(&draft(owner.id(), &["c1"]))
        .await
        .expect("create older");
    let mut newer_draft = draft(owner.id(), &["c1"]);
    newer_draft.updated_at = Utc::now();
    let newer = adapters.schedules.create(&newer_draft).await.expect("create newer");

    let listed = adapters
        .schedules
        .list_by_owner(&owner.id())
        .await
        .expect("listing");

    let ids: Vec<ScheduleId> = listed.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
}

#[rstest]
#[tokio::test]
async fn nul_characters_never_reach_postgres() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let owner = stored_user(&adapters, "own\u{0}er").await;
    let schedule = adapters
        .schedules
        .create(&draft(owner.id(), &["c\u{0}1"]))
        .await
        .expect("create");
    adapters
        .comments
        .upsert(&Comment {
            schedule_id: schedule.id(),
            user_id: owner.id(),
            text: CommentText::new("a\u{0}b"),
        })
        .await
        .expect("comment upsert");

    let comments = adapters
        .comments
        .list_by_schedule(schedule.id())
        .await
        .expect("comment rows");
    assert_eq!(comments[0].text.as_ref(), "ab");
    let candidates = adapters
        .schedules
        .list_candidates(schedule.id())
        .await
        .expect("candidates");
    assert_eq!(candidates[0].name().as_ref(), "c1");
    let found = adapters
        .users
        .find_by_id(&owner.id())
        .await
        .expect("lookup")
        .expect("user present");
    assert_eq!(found.username().as_ref(), "owner");
}

#[rstest]
#[tokio::test]
async fn delete_waits_for_in_flight_child_inserts() {
    let Some(adapters) = adapters().await else {
        return;
    };
    let Some(url) = database_url() else {
        return;
    };
    let owner = stored_user(&adapters, "owner").await;
    let schedule = adapters
        .schedules
        .create(&draft(owner.id(), &["c1"]))
        .await
        .expect("create");
    let candidate = adapters
        .schedules
        .list_candidates(schedule.id())
        .await
        .expect("candidates")
        .remove(0);

    let mut writer = AsyncPgConnection::establish(&url)
        .await
        .expect("second connection");
    diesel::sql_query("BEGIN")
        .execute(&mut writer)
        .await
        .expect("begin");
    diesel::sql_query(
        "INSERT INTO availabilities (candidate_id, user_id, schedule_id, availability) \
         VALUES ($1, $2, $3, 2)",
    )
    .bind::<BigInt, _>(candidate.id().get())
    .bind::<BigInt, _>(owner.id().get())
    .bind::<BigInt, _>(schedule.id().get())
    .execute(&mut writer)
    .await
    .expect("uncommitted availability insert");

    let schedules = adapters.schedules.clone();
    let schedule_id = schedule.id();
    let delete = tokio::spawn(async move { schedules.delete_aggregate(schedule_id).await });
    tokio::time::sleep(Duration::from_millis(200)).await;
    diesel::sql_query("COMMIT")
        .execute(&mut writer)
        .await
        .expect("commit");

    let deleted = delete
        .await
        .expect("delete task joins")
        .expect("delete succeeds");
    assert!(deleted);
    assert!(
        adapters
            .availabilities
            .list_by_schedule(schedule_id)
            .await
            .expect("availability rows")
            .is_empty()
    );
}
