//! Storage capability for plumbers, jobs and payroll periods.
//!
//! The service receives an `Arc<dyn Storage>` at construction time; which
//! backend sits behind it is decided by whoever builds the service. The crate
//! ships [`MemoryStorage`].

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    Job, JobWithPlumber, NewJob, NewPayroll, NewPlumber, Payroll, PayrollUpdate, Plumber,
    PlumberUpdate,
};

pub use memory::MemoryStorage;

/// Outcome of [`Storage::swap_job`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSwap {
    /// The row matched and was replaced; holds the stored result.
    Replaced(Job),
    /// The row changed since it was read and was left alone.
    Stale,
    /// No job has that id.
    Missing,
}

/// Persistence operations used by the payroll service.
///
/// Lookups return `Ok(None)` for a missing id, and `update_*`/`delete_*`
/// report a missing id the same way, leaving the error choice to the caller.
#[async_trait]
pub trait Storage: Send + Sync {
    /// All plumbers, ordered by id.
    async fn list_plumbers(&self) -> EngineResult<Vec<Plumber>>;
    /// Plumbers with `is_active` set, ordered by id.
    async fn list_active_plumbers(&self) -> EngineResult<Vec<Plumber>>;
    /// One plumber.
    async fn get_plumber(&self, id: u64) -> EngineResult<Option<Plumber>>;
    /// Stores a new plumber and returns it with its assigned id.
    async fn create_plumber(&self, plumber: NewPlumber) -> EngineResult<Plumber>;
    /// Applies a partial update.
    async fn update_plumber(&self, id: u64, update: PlumberUpdate)
    -> EngineResult<Option<Plumber>>;
    /// Removes a plumber. Returns false if it did not exist.
    async fn delete_plumber(&self, id: u64) -> EngineResult<bool>;

    /// All jobs, ordered by id.
    async fn list_jobs(&self) -> EngineResult<Vec<Job>>;
    /// One job.
    async fn get_job(&self, id: u64) -> EngineResult<Option<Job>>;
    /// Jobs done by one plumber, ordered by id.
    async fn jobs_by_plumber(&self, plumber_id: u64) -> EngineResult<Vec<Job>>;
    /// Jobs settled in one payroll, ordered by id.
    async fn jobs_by_payroll(&self, payroll_id: u64) -> EngineResult<Vec<Job>>;
    /// Jobs of one payroll joined with their plumbers.
    ///
    /// Fails with `InvalidReference` if any job's plumber no longer exists.
    async fn jobs_with_plumber_by_payroll(
        &self,
        payroll_id: u64,
    ) -> EngineResult<Vec<JobWithPlumber>>;
    /// Stores a new job with its precomputed commission.
    async fn create_job(&self, job: NewJob, commission_amount: Decimal) -> EngineResult<Job>;
    /// Replaces the job stored under `expected.id` with `job`, but only if
    /// the stored row still equals `expected`. The comparison and the write
    /// happen in one step.
    async fn swap_job(&self, expected: &Job, job: Job) -> EngineResult<JobSwap>;
    /// Removes a job. Returns false if it did not exist.
    async fn delete_job(&self, id: u64) -> EngineResult<bool>;

    /// All payrolls, ordered by id.
    async fn list_payrolls(&self) -> EngineResult<Vec<Payroll>>;
    /// One payroll.
    async fn get_payroll(&self, id: u64) -> EngineResult<Option<Payroll>>;
    /// The payroll for a given week-ending date, if one exists.
    async fn payroll_by_week_ending(&self, date: NaiveDate) -> EngineResult<Option<Payroll>>;
    /// The finalized payroll with the latest week-ending date.
    async fn latest_finalized_payroll(&self) -> EngineResult<Option<Payroll>>;
    /// Stores a new payroll.
    async fn create_payroll(&self, payroll: NewPayroll) -> EngineResult<Payroll>;
    /// Applies a partial update.
    async fn update_payroll(&self, id: u64, update: PayrollUpdate)
    -> EngineResult<Option<Payroll>>;
}
