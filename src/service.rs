//! Payroll service.
//!
//! Sits between the HTTP handlers and the storage capability. The job write
//! path prices every job with the commission calculator before it is stored,
//! and the summary read path re-runs the aggregator on every request.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculation::{
    CommissionPolicy, calculate_commission, job_totals, summarize, summary_totals,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CommissionBreakdown, Job, JobUpdate, NewJob, NewPayroll, NewPlumber, Payroll, PayrollReport,
    PayrollStatus, PayrollSummary, PayrollUpdate, Plumber, PlumberReport, PlumberUpdate,
};
use crate::storage::{JobSwap, Storage};

/// Business operations over plumbers, jobs and payroll periods.
#[derive(Clone)]
pub struct PayrollService {
    storage: Arc<dyn Storage>,
    policy: CommissionPolicy,
}

impl PayrollService {
    /// Creates a service over the given storage and commission policy.
    pub fn new(storage: Arc<dyn Storage>, policy: CommissionPolicy) -> Self {
        Self { storage, policy }
    }

    /// Returns the commission policy shared by the calculator and aggregator.
    pub fn policy(&self) -> &CommissionPolicy {
        &self.policy
    }

    /// Inserts `plumbers` if the store has none yet. Returns how many were
    /// inserted.
    pub async fn seed_plumbers(&self, plumbers: &[NewPlumber]) -> EngineResult<usize> {
        if !self.storage.list_plumbers().await?.is_empty() {
            return Ok(0);
        }
        for plumber in plumbers {
            self.storage.create_plumber(plumber.clone()).await?;
        }
        Ok(plumbers.len())
    }

    // --- Plumbers ---

    /// All plumbers.
    pub async fn list_plumbers(&self) -> EngineResult<Vec<Plumber>> {
        self.storage.list_plumbers().await
    }

    /// Active plumbers only.
    pub async fn list_active_plumbers(&self) -> EngineResult<Vec<Plumber>> {
        self.storage.list_active_plumbers().await
    }

    /// One plumber, or `PlumberNotFound`.
    pub async fn get_plumber(&self, id: u64) -> EngineResult<Plumber> {
        self.storage
            .get_plumber(id)
            .await?
            .ok_or(EngineError::PlumberNotFound { id })
    }

    /// Creates a plumber.
    pub async fn create_plumber(&self, plumber: NewPlumber) -> EngineResult<Plumber> {
        let plumber = self.storage.create_plumber(plumber).await?;
        info!(plumber_id = plumber.id, "Plumber created");
        Ok(plumber)
    }

    /// Applies a partial update. A rate change only affects jobs written
    /// afterwards.
    pub async fn update_plumber(&self, id: u64, update: PlumberUpdate) -> EngineResult<Plumber> {
        let rate_changed = update.commission_rate;
        let plumber = self
            .storage
            .update_plumber(id, update)
            .await?
            .ok_or(EngineError::PlumberNotFound { id })?;
        if let Some(rate) = rate_changed {
            info!(plumber_id = id, commission_rate = %rate, "Plumber commission rate changed");
        }
        Ok(plumber)
    }

    /// Deletes a plumber.
    pub async fn delete_plumber(&self, id: u64) -> EngineResult<()> {
        if !self.storage.delete_plumber(id).await? {
            return Err(EngineError::PlumberNotFound { id });
        }
        info!(plumber_id = id, "Plumber deleted");
        Ok(())
    }

    // --- Jobs ---

    /// All jobs.
    pub async fn list_jobs(&self) -> EngineResult<Vec<Job>> {
        self.storage.list_jobs().await
    }

    /// One job, or `JobNotFound`.
    pub async fn get_job(&self, id: u64) -> EngineResult<Job> {
        self.storage
            .get_job(id)
            .await?
            .ok_or(EngineError::JobNotFound { id })
    }

    /// Jobs done by a plumber.
    pub async fn jobs_by_plumber(&self, plumber_id: u64) -> EngineResult<Vec<Job>> {
        self.storage.jobs_by_plumber(plumber_id).await
    }

    /// Jobs settled in a payroll.
    pub async fn jobs_by_payroll(&self, payroll_id: u64) -> EngineResult<Vec<Job>> {
        self.storage.jobs_by_payroll(payroll_id).await
    }

    /// Prices and stores a new job.
    ///
    /// The plumber and payroll must exist and the payroll must still be a
    /// draft. The commission uses the plumber's current rate.
    pub async fn create_job(&self, job: NewJob) -> EngineResult<Job> {
        let plumber = self.get_plumber(job.plumber_id).await?;
        self.require_draft_payroll(job.payroll_id).await?;

        let breakdown = calculate_commission(
            job.revenue,
            job.parts_cost,
            job.outside_labor,
            plumber.commission_rate,
            &self.policy,
        )?;

        let job = self
            .storage
            .create_job(job, breakdown.commission_amount)
            .await?;
        info!(
            job_id = job.id,
            plumber_id = job.plumber_id,
            payroll_id = job.payroll_id,
            commission_amount = %job.commission_amount,
            "Job created"
        );
        Ok(job)
    }

    /// Applies a partial update to a job.
    ///
    /// The commission is recomputed with the (possibly new) plumber's current
    /// rate whenever revenue, parts cost, outside labor or the plumber
    /// changes; otherwise the stored amount is kept. Both the job's current
    /// payroll and any payroll it moves to must be drafts.
    ///
    /// The merged row is written only if the stored job has not changed since
    /// it was read. A concurrent write restarts the update from a fresh read,
    /// so neither writer's fields are lost.
    pub async fn update_job(&self, id: u64, update: JobUpdate) -> EngineResult<Job> {
        loop {
            let current = self.get_job(id).await?;
            if let Some(job) = self.try_update_job(&current, &update).await? {
                info!(job_id = id, commission_amount = %job.commission_amount, "Job updated");
                return Ok(job);
            }
            debug!(job_id = id, "Job changed during update, retrying");
        }
    }

    /// One update attempt against the row as read in `current`. Returns
    /// `None` if the stored row no longer matches it.
    async fn try_update_job(&self, current: &Job, update: &JobUpdate) -> EngineResult<Option<Job>> {
        self.require_draft_payroll(current.payroll_id).await?;

        let mut updated = update.merged_into(current);
        if updated.payroll_id != current.payroll_id {
            self.require_draft_payroll(updated.payroll_id).await?;
        }

        if updated.commission_inputs_differ(current) {
            let plumber = self.get_plumber(updated.plumber_id).await?;
            let breakdown = calculate_commission(
                updated.revenue,
                updated.parts_cost,
                updated.outside_labor,
                plumber.commission_rate,
                &self.policy,
            )?;
            debug!(
                job_id = current.id,
                previous = %current.commission_amount,
                recomputed = %breakdown.commission_amount,
                "Commission recomputed"
            );
            updated.commission_amount = breakdown.commission_amount;
        }

        match self.storage.swap_job(current, updated).await? {
            JobSwap::Replaced(job) => Ok(Some(job)),
            JobSwap::Stale => Ok(None),
            JobSwap::Missing => Err(EngineError::JobNotFound { id: current.id }),
        }
    }

    /// Deletes a job from a draft payroll.
    pub async fn delete_job(&self, id: u64) -> EngineResult<()> {
        let job = self.get_job(id).await?;
        self.require_draft_payroll(job.payroll_id).await?;
        if !self.storage.delete_job(id).await? {
            return Err(EngineError::JobNotFound { id });
        }
        info!(job_id = id, payroll_id = job.payroll_id, "Job deleted");
        Ok(())
    }

    // --- Payrolls ---

    /// All payrolls.
    pub async fn list_payrolls(&self) -> EngineResult<Vec<Payroll>> {
        self.storage.list_payrolls().await
    }

    /// One payroll, or `PayrollNotFound`.
    pub async fn get_payroll(&self, id: u64) -> EngineResult<Payroll> {
        self.storage
            .get_payroll(id)
            .await?
            .ok_or(EngineError::PayrollNotFound { id })
    }

    /// The finalized payroll with the latest week-ending date, if any.
    pub async fn latest_finalized_payroll(&self) -> EngineResult<Option<Payroll>> {
        self.storage.latest_finalized_payroll().await
    }

    /// Creates a payroll period. Only one payroll may exist per week-ending
    /// date.
    pub async fn create_payroll(&self, payroll: NewPayroll) -> EngineResult<Payroll> {
        self.require_free_week(payroll.week_ending_date, None).await?;
        let payroll = self.storage.create_payroll(payroll).await?;
        info!(
            payroll_id = payroll.id,
            week_ending_date = %payroll.week_ending_date,
            status = payroll.status.as_str(),
            "Payroll created"
        );
        Ok(payroll)
    }

    /// Applies a partial update to a payroll.
    pub async fn update_payroll(&self, id: u64, update: PayrollUpdate) -> EngineResult<Payroll> {
        let previous = self.get_payroll(id).await?;
        if let Some(week_ending_date) = update.week_ending_date {
            self.require_free_week(week_ending_date, Some(id)).await?;
        }
        let payroll = self
            .storage
            .update_payroll(id, update)
            .await?
            .ok_or(EngineError::PayrollNotFound { id })?;

        match (previous.status, payroll.status) {
            (PayrollStatus::Draft, PayrollStatus::Finalized) => {
                info!(payroll_id = id, "Payroll finalized");
            }
            (PayrollStatus::Finalized, PayrollStatus::Draft) => {
                info!(payroll_id = id, "Finalized payroll reopened as draft");
            }
            _ => {}
        }
        Ok(payroll)
    }

    // --- Summaries and reports ---

    /// Per-plumber summary rows for a payroll, rebuilt from the current jobs.
    pub async fn payroll_summary(&self, payroll_id: u64) -> EngineResult<Vec<PayrollSummary>> {
        self.get_payroll(payroll_id).await?;
        let jobs = self.storage.jobs_with_plumber_by_payroll(payroll_id).await?;
        summarize(&jobs, &self.policy)
    }

    /// A payroll with its summary rows and grand totals.
    pub async fn payroll_report(&self, payroll_id: u64) -> EngineResult<PayrollReport> {
        let payroll = self.get_payroll(payroll_id).await?;
        let jobs = self.storage.jobs_with_plumber_by_payroll(payroll_id).await?;
        let rows = summarize(&jobs, &self.policy)?;
        let totals = summary_totals(&rows)?;
        Ok(PayrollReport {
            payroll,
            rows,
            totals,
        })
    }

    /// One plumber's jobs within a payroll, with totals.
    pub async fn plumber_report(
        &self,
        payroll_id: u64,
        plumber_id: u64,
    ) -> EngineResult<PlumberReport> {
        let payroll = self.get_payroll(payroll_id).await?;
        let plumber = self.get_plumber(plumber_id).await?;

        let mut jobs: Vec<Job> = self
            .storage
            .jobs_by_payroll(payroll_id)
            .await?
            .into_iter()
            .filter(|j| j.plumber_id == plumber_id)
            .collect();
        jobs.sort_by_key(|j| (j.date, j.id));

        let totals = job_totals(&jobs, &self.policy)?;
        Ok(PlumberReport {
            plumber,
            payroll,
            jobs,
            totals,
        })
    }

    /// Runs the commission calculator without storing anything.
    pub fn preview_commission(
        &self,
        revenue: Decimal,
        parts_cost: Decimal,
        outside_labor: Decimal,
        commission_rate: Decimal,
    ) -> EngineResult<CommissionBreakdown> {
        calculate_commission(
            revenue,
            parts_cost,
            outside_labor,
            commission_rate,
            &self.policy,
        )
    }

    async fn require_free_week(&self, date: NaiveDate, owner: Option<u64>) -> EngineResult<()> {
        match self.storage.payroll_by_week_ending(date).await? {
            Some(existing) if Some(existing.id) != owner => Err(EngineError::validation(
                "week_ending_date",
                format!("payroll {} already covers the week ending {date}", existing.id),
            )),
            _ => Ok(()),
        }
    }

    async fn require_draft_payroll(&self, id: u64) -> EngineResult<Payroll> {
        let payroll = self.get_payroll(id).await?;
        if payroll.is_finalized() {
            return Err(EngineError::PayrollFinalized { id });
        }
        Ok(payroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> PayrollService {
        PayrollService::new(Arc::new(MemoryStorage::new()), CommissionPolicy::default())
    }

    fn new_plumber(name: &str, rate: &str) -> NewPlumber {
        NewPlumber {
            name: name.to_string(),
            email: "plumber@example.com".to_string(),
            phone: "555-000-0000".to_string(),
            commission_rate: dec(rate),
            is_active: true,
            start_date: date(2022, 1, 1),
        }
    }

    fn new_job(plumber_id: u64, payroll_id: u64, revenue: &str, parts: &str, labor: &str) -> NewJob {
        NewJob {
            date: date(2026, 10, 12),
            customer_name: "Johnson Residence".to_string(),
            revenue: dec(revenue),
            parts_cost: dec(parts),
            outside_labor: dec(labor),
            plumber_id,
            payroll_id,
        }
    }

    async fn draft_payroll(service: &PayrollService) -> Payroll {
        draft_payroll_ending(service, date(2026, 10, 16)).await
    }

    async fn draft_payroll_ending(service: &PayrollService, week_ending: NaiveDate) -> Payroll {
        service
            .create_payroll(NewPayroll {
                week_ending_date: week_ending,
                status: PayrollStatus::Draft,
            })
            .await
            .unwrap()
    }

    async fn finalize(service: &PayrollService, id: u64) {
        service
            .update_payroll(
                id,
                PayrollUpdate {
                    status: Some(PayrollStatus::Finalized),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_job_computes_commission() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;

        let job = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();

        assert_eq!(job.commission_amount, dec("123.75"));
    }

    #[tokio::test]
    async fn test_create_job_unknown_plumber() {
        let service = service();
        let payroll = draft_payroll(&service).await;

        let err = service
            .create_job(new_job(99, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::PlumberNotFound { id: 99 }));
    }

    #[tokio::test]
    async fn test_create_job_unknown_payroll() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();

        let err = service
            .create_job(new_job(plumber.id, 5, "850.00", "250.00", "100.00"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::PayrollNotFound { id: 5 }));
    }

    #[tokio::test]
    async fn test_create_job_on_finalized_payroll_rejected() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        finalize(&service, payroll.id).await;

        let err = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::PayrollFinalized { .. }));
    }

    #[tokio::test]
    async fn test_rate_change_does_not_touch_existing_jobs() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        let job = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();

        service
            .update_plumber(
                plumber.id,
                PlumberUpdate {
                    commission_rate: Some(dec("40")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = service.get_job(job.id).await.unwrap();
        assert_eq!(stored.commission_amount, dec("123.75"));

        // A non-financial edit keeps the snapshot.
        let renamed = service
            .update_job(
                job.id,
                JobUpdate {
                    customer_name: Some("Johnson Residence (rear)".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.commission_amount, dec("123.75"));
    }

    #[tokio::test]
    async fn test_financial_edit_recomputes_with_current_rate() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        let job = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();

        service
            .update_plumber(
                plumber.id,
                PlumberUpdate {
                    commission_rate: Some(dec("40")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_job(
                job.id,
                JobUpdate {
                    revenue: Some(dec("1200.00")),
                    parts_cost: Some(dec("350.00")),
                    outside_labor: Some(dec("0.00")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // (1200 - 437.50) * 0.40
        assert_eq!(updated.commission_amount, dec("305.00"));
    }

    #[tokio::test]
    async fn test_reassigning_plumber_uses_new_rate() {
        let service = service();
        let first = service.create_plumber(new_plumber("John Smith", "30")).await.unwrap();
        let second = service.create_plumber(new_plumber("Robert Brown", "25")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        let job = service
            .create_job(new_job(first.id, payroll.id, "1200.00", "350.00", "0.00"))
            .await
            .unwrap();
        assert_eq!(job.commission_amount, dec("228.75"));

        let moved = service
            .update_job(
                job.id,
                JobUpdate {
                    plumber_id: Some(second.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // 762.50 * 0.25
        assert_eq!(moved.commission_amount, dec("190.625"));
    }

    #[tokio::test]
    async fn test_update_job_on_finalized_payroll_rejected() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        let job = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();
        finalize(&service, payroll.id).await;

        let err = service
            .update_job(
                job.id,
                JobUpdate {
                    revenue: Some(dec("900.00")),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::PayrollFinalized { .. }));

        let err = service.delete_job(job.id).await.unwrap_err();
        assert!(matches!(err, EngineError::PayrollFinalized { .. }));
    }

    #[tokio::test]
    async fn test_moving_job_into_finalized_payroll_rejected() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let open = draft_payroll(&service).await;
        let closed = draft_payroll_ending(&service, date(2026, 10, 9)).await;
        finalize(&service, closed.id).await;
        let job = service
            .create_job(new_job(plumber.id, open.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();

        let err = service
            .update_job(
                job.id,
                JobUpdate {
                    payroll_id: Some(closed.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::PayrollFinalized { id } if id == closed.id));
    }

    #[tokio::test]
    async fn test_summary_totals_match_job_commissions() {
        let service = service();
        let john = service.create_plumber(new_plumber("John Smith", "30")).await.unwrap();
        let michael = service.create_plumber(new_plumber("Michael Johnson", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;

        for (plumber_id, revenue, parts, labor) in [
            (john.id, "850.00", "250.00", "100.00"),
            (john.id, "1200.00", "350.00", "0.00"),
            (michael.id, "450.00", "50.00", "0.00"),
        ] {
            service
                .create_job(new_job(plumber_id, payroll.id, revenue, parts, labor))
                .await
                .unwrap();
        }

        let rows = service.payroll_summary(payroll.id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].plumber_name, "John Smith");
        assert_eq!(rows[0].job_count, 2);
        assert_eq!(rows[0].total_commission, dec("352.50"));
        assert_eq!(rows[0].total_costs, dec("875.00"));
        // (450 - 62.50) * 0.30
        assert_eq!(rows[1].total_commission, dec("116.25"));

        let report = service.payroll_report(payroll.id).await.unwrap();
        let job_sum: Decimal = service
            .jobs_by_payroll(payroll.id)
            .await
            .unwrap()
            .iter()
            .map(|j| j.commission_amount)
            .sum();
        assert_eq!(report.totals.total_commission, job_sum);
        assert_eq!(report.totals.job_count, 3);
    }

    #[tokio::test]
    async fn test_summary_of_unknown_payroll() {
        let err = service().payroll_summary(3).await.unwrap_err();
        assert!(matches!(err, EngineError::PayrollNotFound { id: 3 }));
    }

    #[tokio::test]
    async fn test_summary_fails_when_plumber_deleted() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();
        service.delete_plumber(plumber.id).await.unwrap();

        let err = service.payroll_summary(payroll.id).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_plumber_report_filters_and_sorts() {
        let service = service();
        let john = service.create_plumber(new_plumber("John Smith", "30")).await.unwrap();
        let michael = service.create_plumber(new_plumber("Michael Johnson", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;

        let mut late = new_job(john.id, payroll.id, "1200.00", "350.00", "0.00");
        late.date = date(2026, 10, 15);
        service.create_job(late).await.unwrap();
        service
            .create_job(new_job(john.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();
        service
            .create_job(new_job(michael.id, payroll.id, "450.00", "50.00", "0.00"))
            .await
            .unwrap();

        let report = service.plumber_report(payroll.id, john.id).await.unwrap();
        assert_eq!(report.jobs.len(), 2);
        assert_eq!(report.jobs[0].date, date(2026, 10, 12));
        assert_eq!(report.jobs[1].date, date(2026, 10, 15));
        assert_eq!(report.totals.total_commission, dec("352.50"));
        assert_eq!(report.totals.total_adjusted_costs, dec("875.00"));
    }

    #[tokio::test]
    async fn test_seed_only_into_empty_store() {
        let service = service();
        let seed = vec![new_plumber("Lucas Whelan", "30")];

        assert_eq!(service.seed_plumbers(&seed).await.unwrap(), 1);
        assert_eq!(service.seed_plumbers(&seed).await.unwrap(), 0);
        assert_eq!(service.list_plumbers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_finalized_payroll_can_be_reopened() {
        let service = service();
        let payroll = draft_payroll(&service).await;
        finalize(&service, payroll.id).await;
        assert_eq!(
            service.latest_finalized_payroll().await.unwrap().map(|p| p.id),
            Some(payroll.id)
        );

        let reopened = service
            .update_payroll(
                payroll.id,
                PayrollUpdate {
                    status: Some(PayrollStatus::Draft),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reopened.status, PayrollStatus::Draft);
        assert!(service.latest_finalized_payroll().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_one_payroll_per_week_ending() {
        let service = service();
        let first = draft_payroll(&service).await;
        let second = draft_payroll_ending(&service, date(2026, 10, 23)).await;

        let err = service
            .create_payroll(NewPayroll {
                week_ending_date: date(2026, 10, 16),
                status: PayrollStatus::Draft,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { ref field, .. } if field == "week_ending_date"));

        let err = service
            .update_payroll(
                second.id,
                PayrollUpdate {
                    week_ending_date: Some(first.week_ending_date),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));

        // Re-stating a payroll's own date is not a conflict.
        service
            .update_payroll(
                first.id,
                PayrollUpdate {
                    week_ending_date: Some(first.week_ending_date),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[test]
    fn test_preview_uses_shared_policy() {
        let breakdown = service()
            .preview_commission(dec("1200.00"), dec("350.00"), dec("0.00"), dec("30"))
            .unwrap();
        assert_eq!(breakdown.commission_amount, dec("228.75"));
    }

    #[test]
    fn test_preview_overflow_is_an_error() {
        let err = service()
            .preview_commission(Decimal::ZERO, Decimal::MAX, Decimal::ZERO, dec("30"))
            .unwrap_err();
        assert!(matches!(err, EngineError::AmountOutOfRange { .. }));
    }

    #[tokio::test]
    async fn test_summary_overflow_is_an_error_not_a_panic() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        // The service trusts its callers; only the HTTP layer caps amounts.
        for _ in 0..2 {
            service
                .create_job(new_job(plumber.id, payroll.id, "50000000000000000000000000000", "0", "0"))
                .await
                .unwrap();
        }

        let err = service.payroll_summary(payroll.id).await.unwrap_err();
        assert!(matches!(err, EngineError::AmountOutOfRange { ref field } if field == "total_revenue"));
        let err = service.payroll_report(payroll.id).await.unwrap_err();
        assert!(matches!(err, EngineError::AmountOutOfRange { .. }));
        let err = service.plumber_report(payroll.id, plumber.id).await.unwrap_err();
        assert!(matches!(err, EngineError::AmountOutOfRange { .. }));
    }

    #[tokio::test]
    async fn test_stale_update_attempt_does_not_overwrite_a_newer_write() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        let job = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();
        let stale = service.get_job(job.id).await.unwrap();

        // Another writer changes the revenue after `stale` was read.
        service
            .update_job(
                job.id,
                JobUpdate {
                    revenue: Some(dec("1200.00")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let rename = JobUpdate {
            customer_name: Some("Johnson Residence (rear)".to_string()),
            ..Default::default()
        };
        assert!(service.try_update_job(&stale, &rename).await.unwrap().is_none());

        // The full update re-reads and keeps both changes.
        let updated = service.update_job(job.id, rename).await.unwrap();
        assert_eq!(updated.customer_name, "Johnson Residence (rear)");
        assert_eq!(updated.revenue, dec("1200.00"));
        // (1200 - 437.50) * 0.30
        assert_eq!(updated.commission_amount, dec("228.75"));
    }

    #[tokio::test]
    async fn test_update_of_deleted_job_is_not_found() {
        let service = service();
        let plumber = service.create_plumber(new_plumber("Lucas Whelan", "30")).await.unwrap();
        let payroll = draft_payroll(&service).await;
        let job = service
            .create_job(new_job(plumber.id, payroll.id, "850.00", "250.00", "100.00"))
            .await
            .unwrap();
        let read = service.get_job(job.id).await.unwrap();
        service.delete_job(job.id).await.unwrap();

        let err = service
            .try_update_job(&read, &JobUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::JobNotFound { id } if id == job.id));
    }
}
