use chrono::NaiveDate;
use strive_core::models::{HabitInput, TodoFilter, TodoInput};
use strive_core::traits::{HabitStore, TodoStore};

use crate::integration::common::{create_user, setup_test_db};

fn todo_input(name: &str, category: &str, deadline: Option<NaiveDate>, priority: i16) -> TodoInput {
    TodoInput {
        name: name.into(),
        category: category.into(),
        description: "Todo description".into(),
        deadline,
        priority,
        completed: false,
    }
}

#[tokio::test]
async fn todo_crud_is_scoped_to_owner() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let repo = db.todo_repo();

    let todo = repo
        .create_todo(
            alice.id,
            &todo_input("Test Todo", "Work", NaiveDate::from_ymd_opt(2030, 2, 1), 2),
        )
        .await
        .unwrap();
    assert_eq!(todo.priority, 2);
    assert!(!todo.completed);

    assert!(repo.get_todo(todo.id, bob.id).await.unwrap().is_none());
    assert!(repo.get_todo(todo.id, alice.id).await.unwrap().is_some());

    let mut input = todo_input("Updated Todo", "Personal", None, 1);
    input.completed = true;
    assert!(
        repo.update_todo(todo.id, bob.id, &input)
            .await
            .unwrap()
            .is_none()
    );
    let updated = repo
        .update_todo(todo.id, alice.id, &input)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Updated Todo");
    assert!(updated.completed);
    assert!(updated.deadline.is_none());

    assert!(!repo.delete_todo(todo.id, bob.id).await.unwrap());
    assert!(repo.delete_todo(todo.id, alice.id).await.unwrap());
}

#[tokio::test]
async fn list_todos_orders_and_filters() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let repo = db.todo_repo();
    let march = NaiveDate::from_ymd_opt(2030, 3, 1);
    let june = NaiveDate::from_ymd_opt(2030, 6, 1);

    repo.create_todo(alice.id, &todo_input("later", "Work", june, 1))
        .await
        .unwrap();
    repo.create_todo(alice.id, &todo_input("undated", "Home", None, 1))
        .await
        .unwrap();
    repo.create_todo(alice.id, &todo_input("soon-low", "Work", march, 3))
        .await
        .unwrap();
    repo.create_todo(alice.id, &todo_input("soon-high", "Work", march, 1))
        .await
        .unwrap();
    let mut done = todo_input("done", "Home", march, 1);
    done.completed = true;
    repo.create_todo(alice.id, &done).await.unwrap();

    let names = |todos: Vec<strive_core::Todo>| todos.into_iter().map(|t| t.name).collect::<Vec<_>>();

    let all = repo
        .list_todos(alice.id, &TodoFilter::default())
        .await
        .unwrap();
    assert_eq!(
        names(all),
        ["soon-high", "soon-low", "later", "undated", "done"]
    );

    let work = repo
        .list_todos(
            alice.id,
            &TodoFilter {
                completed: None,
                category: Some("Work".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(names(work), ["soon-high", "soon-low", "later"]);

    let finished = repo
        .list_todos(
            alice.id,
            &TodoFilter {
                completed: Some(true),
                category: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(names(finished), ["done"]);
}

#[tokio::test]
async fn priority_check_constraint() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;

    let result = db
        .todo_repo()
        .create_todo(alice.id, &todo_input("bad", "", None, 9))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn habit_crud_is_scoped_to_owner() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let repo = db.habit_repo();

    let habit = repo
        .create_habit(
            alice.id,
            &HabitInput {
                name: "Morning Run".into(),
                description: "Run 3km every morning".into(),
            },
        )
        .await
        .unwrap();

    assert!(repo.get_habit(habit.id, bob.id).await.unwrap().is_none());
    assert!(repo.list_habits(bob.id).await.unwrap().is_empty());
    assert_eq!(repo.list_habits(alice.id).await.unwrap().len(), 1);

    let updated = repo
        .update_habit(
            habit.id,
            alice.id,
            &HabitInput {
                name: "Evening Run".into(),
                description: "Run 5km every evening".into(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Evening Run");

    assert!(!repo.delete_habit(habit.id, bob.id).await.unwrap());
    assert!(repo.delete_habit(habit.id, alice.id).await.unwrap());
    assert!(repo.get_habit(habit.id, alice.id).await.unwrap().is_none());
}
