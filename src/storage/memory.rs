//! In-memory storage backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Job, JobWithPlumber, NewJob, NewPayroll, NewPlumber, Payroll, PayrollUpdate, Plumber,
    PlumberUpdate,
};

use super::{JobSwap, Storage};

#[derive(Debug, Default)]
struct Tables {
    plumbers: BTreeMap<u64, Plumber>,
    jobs: BTreeMap<u64, Job>,
    payrolls: BTreeMap<u64, Payroll>,
    next_plumber_id: u64,
    next_job_id: u64,
    next_payroll_id: u64,
}

impl Tables {
    fn allocate(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }
}

/// Storage backed by ordered maps behind a single lock.
///
/// Ids start at 1 and are never reused. Every write takes the lock once, so
/// a job's financial fields and its commission always change together.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_plumbers(&self) -> EngineResult<Vec<Plumber>> {
        Ok(self.tables.read().plumbers.values().cloned().collect())
    }

    async fn list_active_plumbers(&self) -> EngineResult<Vec<Plumber>> {
        Ok(self
            .tables
            .read()
            .plumbers
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    async fn get_plumber(&self, id: u64) -> EngineResult<Option<Plumber>> {
        Ok(self.tables.read().plumbers.get(&id).cloned())
    }

    async fn create_plumber(&self, plumber: NewPlumber) -> EngineResult<Plumber> {
        let mut tables = self.tables.write();
        let id = Tables::allocate(&mut tables.next_plumber_id);
        let plumber = plumber.with_id(id);
        tables.plumbers.insert(id, plumber.clone());
        Ok(plumber)
    }

    async fn update_plumber(
        &self,
        id: u64,
        update: PlumberUpdate,
    ) -> EngineResult<Option<Plumber>> {
        let mut tables = self.tables.write();
        Ok(tables.plumbers.get_mut(&id).map(|plumber| {
            update.apply(plumber);
            plumber.clone()
        }))
    }

    async fn delete_plumber(&self, id: u64) -> EngineResult<bool> {
        Ok(self.tables.write().plumbers.remove(&id).is_some())
    }

    async fn list_jobs(&self) -> EngineResult<Vec<Job>> {
        Ok(self.tables.read().jobs.values().cloned().collect())
    }

    async fn get_job(&self, id: u64) -> EngineResult<Option<Job>> {
        Ok(self.tables.read().jobs.get(&id).cloned())
    }

    async fn jobs_by_plumber(&self, plumber_id: u64) -> EngineResult<Vec<Job>> {
        Ok(self
            .tables
            .read()
            .jobs
            .values()
            .filter(|j| j.plumber_id == plumber_id)
            .cloned()
            .collect())
    }

    async fn jobs_by_payroll(&self, payroll_id: u64) -> EngineResult<Vec<Job>> {
        Ok(self
            .tables
            .read()
            .jobs
            .values()
            .filter(|j| j.payroll_id == payroll_id)
            .cloned()
            .collect())
    }

    async fn jobs_with_plumber_by_payroll(
        &self,
        payroll_id: u64,
    ) -> EngineResult<Vec<JobWithPlumber>> {
        let tables = self.tables.read();
        tables
            .jobs
            .values()
            .filter(|j| j.payroll_id == payroll_id)
            .map(|job| -> EngineResult<JobWithPlumber> {
                let plumber = tables.plumbers.get(&job.plumber_id).cloned().ok_or(
                    EngineError::InvalidReference {
                        job_id: job.id,
                        plumber_id: job.plumber_id,
                    },
                )?;
                Ok(JobWithPlumber {
                    job: job.clone(),
                    plumber,
                })
            })
            .collect()
    }

    async fn create_job(&self, job: NewJob, commission_amount: Decimal) -> EngineResult<Job> {
        let mut tables = self.tables.write();
        let id = Tables::allocate(&mut tables.next_job_id);
        let job = job.into_job(id, commission_amount);
        tables.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn swap_job(&self, expected: &Job, job: Job) -> EngineResult<JobSwap> {
        let mut tables = self.tables.write();
        Ok(match tables.jobs.get_mut(&expected.id) {
            None => JobSwap::Missing,
            Some(stored) if *stored != *expected => JobSwap::Stale,
            Some(stored) => {
                *stored = job;
                JobSwap::Replaced(stored.clone())
            }
        })
    }

    async fn delete_job(&self, id: u64) -> EngineResult<bool> {
        Ok(self.tables.write().jobs.remove(&id).is_some())
    }

    async fn list_payrolls(&self) -> EngineResult<Vec<Payroll>> {
        Ok(self.tables.read().payrolls.values().cloned().collect())
    }

    async fn get_payroll(&self, id: u64) -> EngineResult<Option<Payroll>> {
        Ok(self.tables.read().payrolls.get(&id).cloned())
    }

    async fn payroll_by_week_ending(&self, date: NaiveDate) -> EngineResult<Option<Payroll>> {
        Ok(self
            .tables
            .read()
            .payrolls
            .values()
            .find(|p| p.week_ending_date == date)
            .cloned())
    }

    async fn latest_finalized_payroll(&self) -> EngineResult<Option<Payroll>> {
        Ok(self
            .tables
            .read()
            .payrolls
            .values()
            .filter(|p| p.is_finalized())
            .max_by_key(|p| (p.week_ending_date, p.id))
            .cloned())
    }

    async fn create_payroll(&self, payroll: NewPayroll) -> EngineResult<Payroll> {
        let mut tables = self.tables.write();
        let id = Tables::allocate(&mut tables.next_payroll_id);
        let payroll = payroll.into_payroll(id, Utc::now());
        tables.payrolls.insert(id, payroll.clone());
        Ok(payroll)
    }

    async fn update_payroll(
        &self,
        id: u64,
        update: PayrollUpdate,
    ) -> EngineResult<Option<Payroll>> {
        let mut tables = self.tables.write();
        Ok(tables.payrolls.get_mut(&id).map(|payroll| {
            update.apply(payroll);
            payroll.clone()
        }))
    }
}
