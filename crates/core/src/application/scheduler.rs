//! Scheduler - Drives the clinic in barrier-synchronized rounds
//!
//! Each round runs the routers and one service worker per specialized queue
//! concurrently on blocking threads, waits for every one of them, and then
//! re-evaluates the termination predicate (all four queues empty).

use crate::application::clinic::Clinic;
use crate::application::router::{RouteOutcome, Router};
use crate::application::worker::constants::ROUTER_SLOTS;
use crate::application::worker::{ServeOutcome, ServiceWorker};
use crate::domain::Category;
use crate::error::{AppError, Result};
use crate::port::ServiceClock;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Router invocations launched per round
    pub router_slots: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            router_slots: ROUTER_SLOTS,
        }
    }
}

/// Round loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulerState {
    Running,
    /// Every queue is empty; terminal
    Drained,
}

/// Departures per specialized service point, keyed by the category each
/// one serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Departures {
    pub dentist: u64,
    pub surgeon: u64,
    pub therapist: u64,
}

impl Departures {
    fn record(&mut self, category: Category) {
        match category {
            Category::Dental => self.dentist += 1,
            Category::Surgical => self.surgeon += 1,
            Category::General => self.therapist += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.dentist + self.surgeon + self.therapist
    }
}

/// What one round achieved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    pub routed: u64,
    pub departures: Departures,
    pub service_units: u64,
}

/// Totals of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Patients waiting when the run started
    pub initial_population: usize,
    pub rounds: u64,
    pub routed: u64,
    pub departures: Departures,
    /// Sum of simulated service time, in duration units
    pub service_units: u64,
}

impl RunSummary {
    fn absorb(&mut self, report: &RoundReport) {
        self.rounds += 1;
        self.routed += report.routed;
        self.departures.dentist += report.departures.dentist;
        self.departures.surgeon += report.departures.surgeon;
        self.departures.therapist += report.departures.therapist;
        self.service_units += report.service_units;
    }
}

enum TaskOutcome {
    Route(RouteOutcome),
    Serve(Category, ServeOutcome),
}

/// Clinic round loop
pub struct Scheduler {
    clinic: Arc<Clinic>,
    clock: Arc<dyn ServiceClock>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(
        clinic: Arc<Clinic>,
        clock: Arc<dyn ServiceClock>,
        config: SchedulerConfig,
    ) -> Result<Self> {
        if config.router_slots == 0 {
            return Err(AppError::Config(
                "router_slots must be at least 1 or registration never drains".to_string(),
            ));
        }
        Ok(Self {
            clinic,
            clock,
            config,
        })
    }

    /// Termination predicate over all four queues
    pub fn state(&self) -> SchedulerState {
        if self.clinic.total_patients() == 0 {
            SchedulerState::Drained
        } else {
            SchedulerState::Running
        }
    }

    /// Run rounds until the clinic is drained.
    ///
    /// The predicate is checked before each round, so an empty clinic runs
    /// zero rounds. Any error (a failing log sink, a panicked task) stops
    /// the loop after the current round's barrier.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary {
            initial_population: self.clinic.total_patients(),
            ..Default::default()
        };
        info!(
            patients = summary.initial_population,
            router_slots = self.config.router_slots,
            "Clinic opened"
        );

        while self.state() == SchedulerState::Running {
            let report = self.run_round().await?;
            summary.absorb(&report);
            debug!(
                round = summary.rounds,
                routed = report.routed,
                departed = report.departures.total(),
                remaining = self.clinic.total_patients(),
                "Round complete"
            );
        }

        info!(
            rounds = summary.rounds,
            departed = summary.departures.total(),
            "Clinic drained"
        );
        Ok(summary)
    }

    /// Launch one round and wait for every task (barrier join).
    pub async fn run_round(&self) -> Result<RoundReport> {
        let mut tasks = JoinSet::new();

        for _ in 0..self.config.router_slots {
            let router = Router::new(Arc::clone(&self.clinic));
            tasks.spawn_blocking(move || router.route_next().map(TaskOutcome::Route));
        }
        for category in Category::ALL {
            let worker =
                ServiceWorker::new(Arc::clone(&self.clinic), category, Arc::clone(&self.clock));
            tasks.spawn_blocking(move || {
                worker
                    .serve_next()
                    .map(|outcome| TaskOutcome::Serve(category, outcome))
            });
        }

        let mut report = RoundReport::default();
        let mut first_error: Option<AppError> = None;
        // Join every task even after a failure so no round outlives the loop
        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(AppError::from).and_then(|result| result) {
                Ok(TaskOutcome::Route(RouteOutcome::Routed(_))) => report.routed += 1,
                Ok(TaskOutcome::Route(RouteOutcome::Idle)) => {}
                Ok(TaskOutcome::Serve(category, ServeOutcome::Served { units, .. })) => {
                    report.departures.record(category);
                    report.service_units += units;
                }
                Ok(TaskOutcome::Serve(_, ServeOutcome::Idle)) => {}
                Err(e) => {
                    error!(error = %e, "Round task failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
