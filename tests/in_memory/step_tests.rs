//! In-memory integration tests for step operations.

use super::helpers::{TestService, create_todo, numbered_steps, service};
use rstest::rstest;
use todo_service::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{NewStep, NewTodo, Priority, StepChanges, StepId, TodoId, ValidationError},
    ports::{TodoRepository, TodoRepositoryError},
    services::TodoServiceError,
    validation::MAX_STEPS_PER_TODO,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn steps_can_be_added_one_by_one_up_to_the_limit(service: TestService) -> eyre::Result<()> {
    let created = create_todo(&service, "Checklist", Priority::Medium, 0).await?;

    for n in 0..MAX_STEPS_PER_TODO {
        service
            .add_steps(created.id(), vec![NewStep::new(format!("Item {n}"), "")])
            .await?;
    }
    let overflow = service
        .add_steps(created.id(), vec![NewStep::new("One too many", "")])
        .await;
    let stored = service
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("todo disappeared"))?;

    eyre::ensure!(
        matches!(
            overflow,
            Err(TodoServiceError::Validation(ValidationError::TooManySteps { .. }))
        ),
        "eleventh step was accepted: {overflow:?}"
    );
    eyre::ensure!(stored.steps().len() == MAX_STEPS_PER_TODO, "wrong step count");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_step_in_batch_rejects_the_whole_batch(service: TestService) -> eyre::Result<()> {
    let created = create_todo(&service, "Checklist", Priority::Medium, 1).await?;
    let mut batch = numbered_steps(2);
    batch.push(NewStep::new("", "blank name"));

    let result = service.add_steps(created.id(), batch).await;
    let stored = service
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("todo disappeared"))?;

    eyre::ensure!(
        matches!(
            result,
            Err(TodoServiceError::Validation(ValidationError::InvalidStep { index: 2, .. }))
        ),
        "unexpected result: {result:?}"
    );
    eyre::ensure!(stored.steps().len() == 1, "partial batch was stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn step_update_is_scoped_to_its_todo(service: TestService) -> eyre::Result<()> {
    let owner = create_todo(&service, "Owner", Priority::Medium, 1).await?;
    let other = create_todo(&service, "Other", Priority::Medium, 0).await?;
    let step_id = owner
        .steps()
        .first()
        .map(|step| step.id())
        .ok_or_else(|| eyre::eyre!("owner has no steps"))?;

    let through_other = service
        .update_step(other.id(), Some(step_id), StepChanges::new("Moved", ""))
        .await;
    let through_owner = service
        .update_step(owner.id(), Some(step_id), StepChanges::new("Renamed", ""))
        .await?;

    eyre::ensure!(
        matches!(
            through_other,
            Err(TodoServiceError::Validation(ValidationError::StepNotFound { .. }))
        ),
        "step was updated through another todo"
    );
    eyre::ensure!(through_owner.name() == "Renamed", "step not renamed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_steps_frees_capacity(service: TestService) -> eyre::Result<()> {
    let created = create_todo(&service, "Full", Priority::Low, MAX_STEPS_PER_TODO).await?;
    let doomed: Vec<StepId> = created.steps().iter().take(2).map(|step| step.id()).collect();

    let removed = service.delete_steps(created.id(), &doomed).await?;
    let added = service.add_steps(created.id(), numbered_steps(2)).await?;

    eyre::ensure!(removed == 2, "expected two removals, got {removed}");
    eyre::ensure!(added.len() == 2, "expected two new steps");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_steps_of_missing_todo_removes_nothing(service: TestService) -> eyre::Result<()> {
    let removed = service
        .delete_steps(TodoId::new(77), &[StepId::new(1)])
        .await?;

    eyre::ensure!(removed == 0, "expected no removals");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rechecks_capacity_when_saving_steps() -> eyre::Result<()> {
    let repository = InMemoryTodoRepository::new();
    let saved = repository
        .save(&NewTodo::new("Full", "", Priority::Low).with_steps(numbered_steps(9)))
        .await?;

    let result = repository.save_steps(saved.id(), &numbered_steps(2)).await;
    let stored = repository
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
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn step_update_on_missing_todo_is_rejected(service: TestService) -> eyre::Result<()> {
    let result = service
        .update_step(TodoId::new(404), Some(StepId::new(1)), StepChanges::new("Renamed", ""))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TodoServiceError::Validation(ValidationError::TodoNotFound(id)))
                if id == TodoId::new(404)
        ),
        "unexpected result: {result:?}"
    );
    Ok(())
}
