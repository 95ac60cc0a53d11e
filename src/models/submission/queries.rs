use crate::db::Store;
use crate::errors::AppError;
use super::types::StoredSubmission;

const SELECT_SUBMISSION: &str = "\
    SELECT submission_id, submitted_at, full_name, email, job_role, training_title, \
           instructor_name, content_ratings, trainer_ratings, organization_ratings, \
           overall_ratings, covered_topics, other_topic, comments \
    FROM feedback_submissions";

/// Append a submission. Rows keep insertion order.
pub async fn insert(store: &Store, submission: &StoredSubmission) -> Result<(), AppError> {
    match store {
        Store::Postgres(pool) => {
            sqlx::query(
                "INSERT INTO feedback_submissions \
                 (submission_id, submitted_at, full_name, email, job_role, training_title, \
                  instructor_name, content_ratings, trainer_ratings, organization_ratings, \
                  overall_ratings, covered_topics, other_topic, comments) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
            )
            .bind(&submission.submission_id)
            .bind(&submission.submitted_at)
            .bind(&submission.full_name)
            .bind(&submission.email)
            .bind(&submission.job_role)
            .bind(&submission.training_title)
            .bind(&submission.instructor_name)
            .bind(&submission.content_ratings)
            .bind(&submission.trainer_ratings)
            .bind(&submission.organization_ratings)
            .bind(&submission.overall_ratings)
            .bind(&submission.covered_topics)
            .bind(&submission.other_topic)
            .bind(&submission.comments)
            .execute(pool)
            .await
            .map_err(|e| insert_error(e, &submission.submission_id))?;
        }
        Store::Memory(mem) => {
            let mut rows = mem.rows.write().await;
            if rows.iter().any(|r| r.submission_id == submission.submission_id) {
                return Err(duplicate_id(&submission.submission_id));
            }
            rows.push(submission.clone());
        }
    }
    Ok(())
}

/// All submissions, oldest first.
pub async fn find_all(store: &Store) -> Result<Vec<StoredSubmission>, AppError> {
    match store {
        Store::Postgres(pool) => {
            let rows = sqlx::query_as::<_, StoredSubmission>(&format!("{SELECT_SUBMISSION} ORDER BY id"))
                .fetch_all(pool)
                .await?;
            Ok(rows)
        }
        Store::Memory(mem) => Ok(mem.rows.read().await.clone()),
    }
}

/// Delete by public submission id. Returns `false` if nothing matched.
pub async fn delete_by_submission_id(store: &Store, submission_id: &str) -> Result<bool, AppError> {
    match store {
        Store::Postgres(pool) => {
            let result = sqlx::query("DELETE FROM feedback_submissions WHERE submission_id = $1")
                .bind(submission_id)
                .execute(pool)
                .await?;
            Ok(result.rows_affected() > 0)
        }
        Store::Memory(mem) => {
            let mut rows = mem.rows.write().await;
            let before = rows.len();
            rows.retain(|r| r.submission_id != submission_id);
            Ok(rows.len() < before)
        }
    }
}

fn duplicate_id(id: &str) -> AppError {
    AppError::Conflict(format!("Submission {id} already exists"))
}

/// A taken `submission_id` is a conflict on every backend.
fn insert_error(e: sqlx::Error, id: &str) -> AppError {
    let taken = e.as_database_error().is_some_and(|db| db.is_unique_violation());
    if taken {
        duplicate_id(id)
    } else {
        AppError::Db(e)
    }
}
