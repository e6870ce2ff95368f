//! `PostgreSQL` integration tests for todo and step persistence.

use super::helpers::{PgTestContext, context};
use rstest::rstest;
use todo_service::todo::{
    domain::{
        NewStep, NewTodo, Priority, Step, StepChanges, StepId, TodoChanges, TodoId,
        ValidationError,
    },
    ports::{TodoRepository, TodoRepositoryError},
    services::TodoServiceError,
};

fn new_todo(name: &str, steps: usize) -> NewTodo {
    NewTodo::new(name, "stored in postgres", Priority::Medium).with_steps(
        (0..steps).map(|n| NewStep::new(format!("Step {n}"), format!("detail {n}"))),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_save_and_find_round_trip(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;

    let saved = ctx.repository.save(&new_todo("Persisted", 3)).await?;
    let found = ctx.repository.find_by_id(saved.id()).await?;
    let listed = ctx.repository.find_all().await?;

    eyre::ensure!(found.as_ref() == Some(&saved), "lookup mismatch: {found:?}");
    eyre::ensure!(listed.contains(&saved), "saved todo missing from listing");
    let names: Vec<&str> = saved.steps().iter().map(Step::name).collect();
    eyre::ensure!(names == ["Step 0", "Step 1", "Step 2"], "steps out of order");

    ctx.repository.delete(saved.id()).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_update_keeps_steps(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let saved = ctx.repository.save(&new_todo("Before", 2)).await?;

    let updated = ctx
        .repository
        .update(saved.id(), &TodoChanges::new("After", "changed", Priority::High))
        .await?;

    eyre::ensure!(updated.name() == "After", "name not updated");
    eyre::ensure!(updated.priority() == Priority::High, "priority not updated");
    eyre::ensure!(updated.steps() == saved.steps(), "steps changed");

    ctx.repository.delete(saved.id()).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_update_of_missing_todo_is_not_found(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let missing = TodoId::new(i64::MAX);

    let result = ctx
        .repository
        .update(missing, &TodoChanges::new("Ghost", "", Priority::Low))
        .await;

    eyre::ensure!(
        matches!(result, Err(TodoRepositoryError::NotFound(id)) if id == missing),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_delete_cascades_to_steps(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let saved = ctx.repository.save(&new_todo("Doomed", 2)).await?;

    let removed = ctx.repository.delete(saved.id()).await?;
    let again = ctx.repository.delete(saved.id()).await?;
    let step_ids: Vec<StepId> = saved.steps().iter().map(Step::id).collect();
    let orphaned = ctx.repository.delete_steps(saved.id(), &step_ids).await?;

    eyre::ensure!(removed == Some(saved), "delete returned the wrong todo");
    eyre::ensure!(again.is_none(), "second delete found a todo");
    eyre::ensure!(orphaned == 0, "steps survived their todo");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_step_mutations(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let saved = ctx.repository.save(&new_todo("Steps", 1)).await?;

    let added = ctx
        .repository
        .save_steps(saved.id(), &[NewStep::new("Second", ""), NewStep::new("Third", "")])
        .await?;
    let first = saved
        .steps()
        .first()
        .map(Step::id)
        .ok_or_else(|| eyre::eyre!("saved todo has no steps"))?;
    let renamed = ctx
        .repository
        .update_step(saved.id(), first, &StepChanges::new("First", "renamed"))
        .await?;
    let removed = ctx
        .repository
        .delete_steps(saved.id(), &added.iter().map(Step::id).collect::<Vec<_>>())
        .await?;
    let stored = ctx
        .repository
        .find_by_id(saved.id())
        .await?
        .ok_or_else(|| eyre::eyre!("todo disappeared"))?;

    eyre::ensure!(added.len() == 2, "expected two new steps");
    eyre::ensure!(renamed.name() == "First", "step not renamed");
    eyre::ensure!(removed == 2, "expected two removals, got {removed}");
    eyre::ensure!(stored.steps() == [renamed], "unexpected remaining steps");

    ctx.repository.delete(saved.id()).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_service_enforces_step_limit(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let created = ctx.service.create(new_todo("Nearly full", 9)).await?;

    let result = ctx
        .service
        .add_steps(
            created.id(),
            vec![NewStep::new("Tenth", ""), NewStep::new("Eleventh", "")],
        )
        .await;
    let stored = ctx
        .service
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("todo disappeared"))?;

    eyre::ensure!(
        matches!(
            result,
            Err(TodoServiceError::Validation(ValidationError::TooManySteps { .. }))
        ),
        "unexpected result: {result:?}"
    );
    eyre::ensure!(stored.steps().len() == 9, "partial batch stored");

    ctx.service.delete(created.id()).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_TEST_DATABASE_URL"]
async fn postgres_save_steps_rechecks_capacity(
    #[future] context: eyre::Result<PgTestContext>,
) -> eyre::Result<()> {
    let ctx = context.await?;
    let saved = ctx.repository.save(&new_todo("Nearly full", 9)).await?;

    let result = ctx
        .repository
        .save_steps(saved.id(), &[NewStep::new("Tenth", ""), NewStep::new("Eleventh", "")])
        .await;
    let stored = ctx
        .repository
        .find_by_id(saved.id())
        .await?
        .ok_or_else(|| eyre::eyre!("todo disappeared"))?;

    eyre::ensure!(
        matches!(
            result,
            Err(TodoRepositoryError::CapacityExceeded { existing: 9, incoming: 2, .. })
        ),
        "unexpected result: {result:?}"
    );
    eyre::ensure!(stored.steps().len() == 9, "partial batch stored");

    ctx.repository.delete(saved.id()).await?;
    Ok(())
}
