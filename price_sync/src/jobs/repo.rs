use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::StoreError,
    jobs::{JobFilter, JobStore},
    models::{Job, JobOutcome},
    schema::ingest_jobs::dsl as ij,
};

/// SQLite-backed job queue.
pub struct SqliteJobStore;

impl JobStore for SqliteJobStore {
    fn load(
        &self,
        conn: &mut SqliteConnection,
        filter: &JobFilter,
    ) -> Result<Vec<Job>, StoreError> {
        let mut query = ij::ingest_jobs
            .select((ij::job_id, ij::symbol, ij::trade_date))
            .into_boxed();

        query = query.filter(ij::status.eq(filter.status.as_str()));
        if let Some(date) = filter.trade_date {
            query = query.filter(ij::trade_date.eq(date));
        }
        if !filter.error_kinds.is_empty() {
            let tags: Vec<&str> = filter.error_kinds.iter().map(|k| k.as_str()).collect();
            query = query.filter(ij::error_kind.eq_any(tags));
        }

        let jobs = query
            .order((ij::symbol.asc(), ij::trade_date.asc()))
            .load::<Job>(conn)?;
        Ok(jobs)
    }

    fn mark(
        &self,
        conn: &mut SqliteConnection,
        job_id: i32,
        outcome: &JobOutcome,
    ) -> Result<(), StoreError> {
        diesel::update(ij::ingest_jobs.find(job_id))
            .set((
                ij::status.eq(outcome.status().as_str()),
                ij::error_message.eq(outcome.message()),
                ij::error_kind.eq(outcome.kind_tag()),
                ij::last_attempted.eq(Some(Utc::now().naive_utc())),
            ))
            .execute(conn)?;
        Ok(())
    }
}
