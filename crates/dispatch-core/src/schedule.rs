use crate::error::DispatchError;
use crate::model::{Job, JobId, Rep};
use crate::routing::optimize::OptimizedRoute;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The dispatcher's day: every known job, the reps, and which slot each
/// assigned job sits in. Jobs not in any slot are in the unassigned pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    jobs: Vec<Job>,
    reps: Vec<Rep>,
    unassigned: Vec<JobId>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add freshly parsed jobs to the unassigned pool. Fails without adding
    /// anything if any id is already on the board.
    pub fn add_jobs(&mut self, jobs: Vec<Job>) -> Result<(), DispatchError> {
        for (i, job) in jobs.iter().enumerate() {
            if self.job(job.id).is_some() || jobs[..i].iter().any(|j| j.id == job.id) {
                return Err(DispatchError::DuplicateJob(job.id));
            }
        }
        for job in jobs {
            self.unassigned.push(job.id);
            self.jobs.push(job);
        }
        Ok(())
    }

    /// Add a rep, replacing any rep with the same id. Jobs the replaced rep
    /// held that the new one does not go back to the unassigned pool.
    pub fn add_rep(&mut self, rep: Rep) {
        let Some(pos) = self.reps.iter().position(|r| r.id == rep.id) else {
            self.reps.push(rep);
            return;
        };
        let replaced = std::mem::replace(&mut self.reps[pos], rep);
        let kept = self.reps[pos].job_ids();
        for job_id in replaced.job_ids().into_iter().filter(|id| !kept.contains(id)) {
            if let Some(job) = self.jobs.iter_mut().find(|j| j.id == job_id) {
                job.time_slot_label = None;
            }
            self.detach(job_id);
            self.unassigned.push(job_id);
        }
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    fn job_mut(&mut self, id: JobId) -> Result<&mut Job, DispatchError> {
        self.jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or(DispatchError::UnknownJob(id))
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn reps(&self) -> &[Rep] {
        &self.reps
    }

    pub fn rep(&self, rep_id: &str) -> Option<&Rep> {
        self.reps.iter().find(|r| r.id == rep_id)
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Job> {
        self.unassigned.iter().filter_map(|id| self.job(*id))
    }

    /// Place a job in a rep's slot, taking it out of wherever it was.
    pub fn assign(&mut self, job_id: JobId, rep_id: &str, slot_id: &str) -> Result<(), DispatchError> {
        if self.job(job_id).is_none() {
            return Err(DispatchError::UnknownJob(job_id));
        }
        let rep = self
            .reps
            .iter()
            .find(|r| r.id == rep_id)
            .ok_or_else(|| DispatchError::UnknownRep(rep_id.to_string()))?;
        let slot = rep
            .time_slots
            .iter()
            .find(|s| s.id == slot_id)
            .ok_or_else(|| DispatchError::UnknownSlot {
                rep: rep_id.to_string(),
                slot: slot_id.to_string(),
            })?;
        if !rep.is_available(slot_id) {
            return Err(DispatchError::SlotUnavailable {
                rep: rep_id.to_string(),
                slot: slot_id.to_string(),
            });
        }
        let label = slot.label.clone();

        self.detach(job_id);
        if let Some(slot) = self
            .reps
            .iter_mut()
            .find(|r| r.id == rep_id)
            .and_then(|r| r.time_slots.iter_mut().find(|s| s.id == slot_id))
        {
            slot.jobs.push(job_id);
        }
        self.job_mut(job_id)?.time_slot_label = Some(label);
        debug!(job = %job_id, rep = rep_id, slot = slot_id, "assigned job");
        Ok(())
    }

    /// Return a job to the unassigned pool.
    pub fn unassign(&mut self, job_id: JobId) -> Result<(), DispatchError> {
        self.job_mut(job_id)?.time_slot_label = None;
        self.detach(job_id);
        self.unassigned.push(job_id);
        Ok(())
    }

    /// Delete a job from the board.
    pub fn remove_job(&mut self, job_id: JobId) -> Result<Job, DispatchError> {
        let pos = self
            .jobs
            .iter()
            .position(|j| j.id == job_id)
            .ok_or(DispatchError::UnknownJob(job_id))?;
        self.detach(job_id);
        Ok(self.jobs.remove(pos))
    }

    pub fn correct_address(&mut self, job_id: JobId, address: &str) -> Result<(), DispatchError> {
        self.job_mut(job_id)?.correct_address(address);
        Ok(())
    }

    /// A rep's whole load for the day, slot by slot.
    pub fn rep_jobs(&self, rep_id: &str) -> Result<Vec<&Job>, DispatchError> {
        let rep = self
            .rep(rep_id)
            .ok_or_else(|| DispatchError::UnknownRep(rep_id.to_string()))?;
        Ok(rep
            .job_ids()
            .into_iter()
            .filter_map(|id| self.job(id))
            .collect())
    }

    /// Reorder the job ids inside each of a rep's slots to follow `order`.
    /// Ids not in `order` keep their relative position after the ordered ones.
    /// Only ordering changes; no job is moved between slots.
    pub fn apply_order(&mut self, rep_id: &str, order: &[JobId]) -> Result<(), DispatchError> {
        let rep = self
            .reps
            .iter_mut()
            .find(|r| r.id == rep_id)
            .ok_or_else(|| DispatchError::UnknownRep(rep_id.to_string()))?;
        for slot in &mut rep.time_slots {
            slot.jobs.sort_by_key(|id| {
                order.iter().position(|o| o == id).unwrap_or(usize::MAX)
            });
        }
        Ok(())
    }

    /// Apply the visiting order of an optimized route.
    pub fn apply_route(&mut self, rep_id: &str, route: &OptimizedRoute) -> Result<(), DispatchError> {
        let order: Vec<JobId> = route.jobs().map(|j| j.id).collect();
        self.apply_order(rep_id, &order)
    }

    /// Remove a job id from the pool and every slot.
    fn detach(&mut self, job_id: JobId) {
        self.unassigned.retain(|id| *id != job_id);
        for rep in &mut self.reps {
            for slot in &mut rep.time_slots {
                slot.jobs.retain(|id| *id != job_id);
            }
        }
    }
}
