use chrono::NaiveDate;
use strive_core::models::GoalInput;
use strive_core::traits::GoalStore;

use crate::integration::common::{create_user, setup_test_db};

fn goal_input(name: &str, is_public: bool) -> GoalInput {
    GoalInput {
        name: name.into(),
        description: "Goal description".into(),
        end_date: NaiveDate::from_ymd_opt(2030, 1, 15),
        location: "Skopje".into(),
        is_public,
    }
}

#[tokio::test]
async fn create_goal_returns_owner_and_fields() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let repo = db.goal_repo();

    let goal = repo
        .create_goal(alice.id, &goal_input("Test Goal", true))
        .await
        .unwrap();

    assert_eq!(goal.owner_id, alice.id);
    assert_eq!(goal.owner, "alice");
    assert_eq!(goal.name, "Test Goal");
    assert_eq!(goal.end_date, NaiveDate::from_ymd_opt(2030, 1, 15));
    assert_eq!(goal.location, "Skopje");
    assert!(goal.is_public);
    assert_eq!(goal.participant_count, 0);
}

#[tokio::test]
async fn update_and_delete_goal() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let repo = db.goal_repo();
    let goal = repo
        .create_goal(alice.id, &goal_input("Test Goal", true))
        .await
        .unwrap();

    let mut input = goal_input("Updated Goal", false);
    input.end_date = None;
    let updated = repo.update_goal(goal.id, &input).await.unwrap().unwrap();
    assert_eq!(updated.name, "Updated Goal");
    assert!(updated.end_date.is_none());
    assert!(!updated.is_public);
    assert!(updated.updated_at >= goal.updated_at);

    assert!(repo.delete_goal(goal.id).await.unwrap());
    assert!(!repo.delete_goal(goal.id).await.unwrap());
    assert!(repo.get_goal(goal.id).await.unwrap().is_none());
    assert!(repo.update_goal(goal.id, &input).await.unwrap().is_none());
}

#[tokio::test]
async fn participants_are_unique_and_counted() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let repo = db.goal_repo();
    let goal = repo
        .create_goal(alice.id, &goal_input("Shared", true))
        .await
        .unwrap();

    assert!(repo.add_participant(goal.id, bob.id).await.unwrap());
    assert!(!repo.add_participant(goal.id, bob.id).await.unwrap());
    assert!(repo.add_participant(goal.id, alice.id).await.unwrap());
    assert!(repo.is_participant(goal.id, bob.id).await.unwrap());

    let goal = repo.get_goal(goal.id).await.unwrap().unwrap();
    assert_eq!(goal.participant_count, 2);

    assert!(repo.remove_participant(goal.id, bob.id).await.unwrap());
    assert!(!repo.remove_participant(goal.id, bob.id).await.unwrap());
    assert!(!repo.is_participant(goal.id, bob.id).await.unwrap());
}

#[tokio::test]
async fn visible_owned_and_joined_listings() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let carol = create_user(&db, "carol").await;
    let repo = db.goal_repo();

    let public = repo
        .create_goal(alice.id, &goal_input("Public", true))
        .await
        .unwrap();
    let private = repo
        .create_goal(alice.id, &goal_input("Private", false))
        .await
        .unwrap();
    let bobs = repo
        .create_goal(bob.id, &goal_input("Bob's", false))
        .await
        .unwrap();

    // Carol joins the public goal; it then turns private.
    repo.add_participant(public.id, carol.id).await.unwrap();
    let mut input = goal_input("Public", false);
    input.description = "now private".into();
    repo.update_goal(public.id, &input).await.unwrap();

    let ids = |goals: Vec<strive_core::Goal>| goals.into_iter().map(|g| g.id).collect::<Vec<_>>();

    let alice_visible = ids(repo.list_visible_goals(alice.id).await.unwrap());
    assert!(alice_visible.contains(&public.id));
    assert!(alice_visible.contains(&private.id));
    assert!(!alice_visible.contains(&bobs.id));

    assert_eq!(ids(repo.list_visible_goals(carol.id).await.unwrap()), [public.id]);
    assert_eq!(ids(repo.list_visible_goals(bob.id).await.unwrap()), [bobs.id]);
    assert_eq!(ids(repo.list_owned_goals(alice.id).await.unwrap()).len(), 2);
    assert_eq!(ids(repo.list_joined_goals(carol.id).await.unwrap()), [public.id]);
    assert!(repo.list_joined_goals(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_goal_cascades_participants() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let repo = db.goal_repo();
    let goal = repo
        .create_goal(alice.id, &goal_input("Shared", true))
        .await
        .unwrap();
    repo.add_participant(goal.id, bob.id).await.unwrap();

    repo.delete_goal(goal.id).await.unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM goal_participants")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}
